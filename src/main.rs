use anyhow::{Context, Result};
use futures::future::join_all;
use pokerboard::{
    build_leaderboard, create_table,
    fetch::resolve_source,
    render::table::OnData,
    RenderOutcome, SiteConfig, Table,
};
use reqwest::Client;
use std::{env, sync::Arc};
use tokio::{fs, sync::Mutex, time::Instant};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();
    info!("startup");

    // ─── 2) load site config ─────────────────────────────────────────
    let cfg = match env::var("SITE_CONFIG") {
        Ok(path) => {
            info!("loading site config {}", path);
            SiteConfig::load(&path)?
        }
        Err(_) => SiteConfig::default(),
    };

    // ─── 3) wire navigation + containers ─────────────────────────────
    let page = Arc::new(Mutex::new(cfg.build_page()));
    let client = Client::new();
    let start = Instant::now();

    // ─── 4) spawn one build per table, plus the leaderboard ──────────
    let mut handles = Vec::with_capacity(cfg.tables.len() + 1);
    for spec in &cfg.tables {
        let source = resolve_source(cfg.base.as_deref(), &spec.source)?;
        let container = spec.container.clone();
        let client = client.clone();
        let page = Arc::clone(&page);

        handles.push(tokio::spawn(async move {
            let tag = container.clone();
            let on_data: OnData = Box::new(move |rows: &Table| {
                debug!(container = %tag, rows = rows.len(), "parsed rows");
            });
            create_table(&client, &page, &container, &source, Some(on_data)).await
        }));
    }
    if let Some(spec) = &cfg.leaderboard {
        let source = resolve_source(cfg.base.as_deref(), &spec.source)?;
        let container = spec.container.clone();
        let client = client.clone();
        let page = Arc::clone(&page);

        handles.push(tokio::spawn(async move {
            build_leaderboard(&client, &page, &source, &container).await
        }));
    }

    // ─── 5) await every build ────────────────────────────────────────
    let mut rendered = 0;
    for outcome in join_all(handles).await {
        match outcome {
            Ok(RenderOutcome::Rendered { .. }) => rendered += 1,
            Ok(_) => {}
            Err(e) => warn!("build task panicked: {}", e),
        }
    }
    info!(rendered, elapsed = ?start.elapsed(), "builds finished");

    // ─── 6) write the document ───────────────────────────────────────
    let html = page.lock().await.to_html();
    fs::write(&cfg.output, html)
        .await
        .with_context(|| format!("writing {}", cfg.output))?;
    info!("wrote {}", cfg.output);

    Ok(())
}
