// src/leaderboard/mod.rs
pub mod aggregate;

use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

pub use aggregate::{Leaderboard, PlayerAggregate, ResultColumns, ResultRow};

use crate::fetch::fetch_text;
use crate::page::Page;
use crate::render::RenderOutcome;
use crate::table;

/// Fetch the session results at `source`, aggregate per player and render
/// the leaderboard into `container_id`. Failures are logged, never returned.
#[instrument(level = "info", skip(client, page), fields(container = %container_id))]
pub async fn build_leaderboard(
    client: &Client,
    page: &Mutex<Page>,
    source: &str,
    container_id: &str,
) -> RenderOutcome {
    let text = match fetch_text(client, source).await {
        Ok(t) => t,
        Err(e) => {
            error!(source = %source, "Error loading leaderboard: {:#}", e);
            return RenderOutcome::Failed;
        }
    };

    let board = match Leaderboard::from_table(&table::parse(&text)) {
        Some(b) => b,
        None => {
            debug!(source = %source, "no data rows; leaderboard skipped");
            return RenderOutcome::Empty;
        }
    };

    let players = board.players().len();
    if let Err(e) = page.lock().await.mount(container_id, board.to_node()) {
        error!(source = %source, "Error loading leaderboard: {:#}", e);
        return RenderOutcome::Failed;
    }
    info!(source = %source, players, "rendered leaderboard");
    RenderOutcome::Rendered { rows: players }
}
