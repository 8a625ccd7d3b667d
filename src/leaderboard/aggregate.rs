// src/leaderboard/aggregate.rs
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::money::{format_amount, parse_amount};
use crate::render::{table::table_node, Node};
use crate::table::{Row, Table};

pub const PLAYER_COLUMN: &str = "PlayerName";
pub const BUY_IN_COLUMN: &str = "BuyIn";
pub const REBUY_COLUMN: &str = "Rebuy";
pub const CASH_OUT_COLUMN: &str = "CashOut";

pub const LEADERBOARD_HEADER: [&str; 6] = [
    "Player",
    "Total Buy-in",
    "Total Rebuy",
    "Total Cash Out",
    "Total Spend",
    "Profit",
];

/// Where the results columns sit in a given file. Any of them may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultColumns {
    pub player: Option<usize>,
    pub buy_in: Option<usize>,
    pub rebuy: Option<usize>,
    pub cash_out: Option<usize>,
}

impl ResultColumns {
    pub fn locate(table: &Table) -> Self {
        let cols = Self {
            player: table.column_index(PLAYER_COLUMN),
            buy_in: table.column_index(BUY_IN_COLUMN),
            rebuy: table.column_index(REBUY_COLUMN),
            cash_out: table.column_index(CASH_OUT_COLUMN),
        };
        for (name, idx) in [
            (PLAYER_COLUMN, cols.player),
            (BUY_IN_COLUMN, cols.buy_in),
            (REBUY_COLUMN, cols.rebuy),
            (CASH_OUT_COLUMN, cols.cash_out),
        ] {
            if idx.is_none() {
                debug!(column = name, "results column missing");
            }
        }
        cols
    }

    /// Typed view of one data row. `None` when the player cell is empty or
    /// absent; absent amount columns read as 0.
    pub fn read(&self, row: &Row) -> Option<ResultRow> {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.cell(i));
        let player = cell(self.player).filter(|p| !p.is_empty())?;
        Some(ResultRow {
            player: player.to_string(),
            buy_in: parse_amount(cell(self.buy_in)),
            rebuy: parse_amount(cell(self.rebuy)),
            cash_out: parse_amount(cell(self.cash_out)),
        })
    }
}

/// One player's line from a session results file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub player: String,
    pub buy_in: f64,
    pub rebuy: f64,
    pub cash_out: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerAggregate {
    pub name: String,
    pub buy_in: f64,
    pub rebuy: f64,
    pub cash_out: f64,
    pub total_spend: f64,
    pub profit: f64,
}

impl PlayerAggregate {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    fn add(&mut self, row: &ResultRow) {
        self.buy_in += row.buy_in;
        self.rebuy += row.rebuy;
        self.cash_out += row.cash_out;
    }

    fn finalize(&mut self) {
        self.total_spend = self.buy_in + self.rebuy;
        self.profit = self.cash_out - self.total_spend;
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            format_amount(self.buy_in),
            format_amount(self.rebuy),
            format_amount(self.cash_out),
            format_amount(self.total_spend),
            format_amount(self.profit),
        ]
    }
}

/// Per-player totals, best profit first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Leaderboard {
    players: Vec<PlayerAggregate>,
}

impl Leaderboard {
    /// Aggregate typed rows. Players keep first-seen order until the profit
    /// sort, which is stable.
    pub fn aggregate(rows: impl IntoIterator<Item = ResultRow>) -> Self {
        let mut slots: HashMap<String, usize> = HashMap::new();
        let mut players: Vec<PlayerAggregate> = Vec::new();

        for row in rows {
            let idx = *slots.entry(row.player.clone()).or_insert_with(|| {
                players.push(PlayerAggregate::new(&row.player));
                players.len() - 1
            });
            players[idx].add(&row);
        }

        for p in &mut players {
            p.finalize();
        }
        players.sort_by(|a, b| b.profit.total_cmp(&a.profit));

        Self { players }
    }

    /// `None` when the table has no data rows.
    pub fn from_table(table: &Table) -> Option<Self> {
        if table.len() < 2 {
            return None;
        }
        let cols = ResultColumns::locate(table);
        Some(Self::aggregate(
            table.data_rows().iter().filter_map(|r| cols.read(r)),
        ))
    }

    pub fn players(&self) -> &[PlayerAggregate] {
        &self.players
    }

    pub fn to_node(&self) -> Node {
        table_node(
            LEADERBOARD_HEADER,
            self.players.iter().map(PlayerAggregate::cells),
        )
    }
}
