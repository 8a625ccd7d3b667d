// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::page::{Navigation, Page, Section};

/// A CSV source and the container it renders into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    pub container: String,
    pub source: String,
}

/// A navigable section: one nav button, one `<section>`, its containers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub containers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    /// Directory or http(s) URL that relative sources are resolved against.
    pub base: Option<String>,
    pub output: String,
    pub tables: Vec<TableSpec>,
    pub leaderboard: Option<TableSpec>,
    pub sections: Vec<SectionSpec>,
    /// Section shown first; defaults to the first one listed.
    pub start_section: Option<String>,
}

fn table(container: &str, source: &str) -> TableSpec {
    TableSpec {
        container: container.to_string(),
        source: source.to_string(),
    }
}

fn section(id: &str, title: &str, containers: &[&str]) -> SectionSpec {
    SectionSpec {
        id: id.to_string(),
        title: title.to_string(),
        containers: containers.iter().map(|c| c.to_string()).collect(),
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Poker Night".to_string(),
            base: None,
            output: "index.html".to_string(),
            tables: vec![
                table("structure-table", "data/Game Structure.csv"),
                table("hosts-table", "data/Hosts.csv"),
                table("results-table", "data/Player Game Results.csv"),
                table("players-table", "data/Poker Players.csv"),
            ],
            leaderboard: Some(table("leaderboard-table", "data/Player Game Results.csv")),
            sections: vec![
                section("leaderboard", "Leaderboard", &["leaderboard-table"]),
                section("results", "Game Results", &["results-table"]),
                section("players", "Players", &["players-table"]),
                section("hosts", "Hosts", &["hosts-table"]),
                section("structure", "Game Structure", &["structure-table"]),
            ],
            start_section: None,
        }
    }
}

impl SiteConfig {
    /// Load from YAML, or JSON when the file ends in `.json`. Missing keys
    /// take their default.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading site config {}", path.display()))?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| e.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&text)
                .with_context(|| format!("parsing JSON site config {}", path.display()))
        } else {
            serde_yaml::from_str(&text)
                .with_context(|| format!("parsing YAML site config {}", path.display()))
        }
    }

    /// Wire navigation and containers, and show the start section.
    pub fn build_page(&self) -> Page {
        let mut nav = Navigation::new();
        for s in &self.sections {
            nav.add_button(s.title.as_str(), s.id.as_str());
            nav.add_section(s.id.as_str());
        }
        let started = match &self.start_section {
            Some(target) => nav.click_target(target),
            None => false,
        };
        if !started {
            nav.click(0);
        }

        let sections = self
            .sections
            .iter()
            .map(|s| Section {
                id: s.id.clone(),
                title: s.title.clone(),
                containers: s.containers.clone(),
            })
            .collect();
        Page::new(self.title.as_str(), nav, sections)
    }
}
