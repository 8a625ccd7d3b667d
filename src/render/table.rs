// src/render/table.rs
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

use super::Node;
use crate::fetch::fetch_text;
use crate::page::Page;
use crate::table::{self, Row, Table};

/// Callback handed the full parsed table (header included) after a render.
pub type OnData = Box<dyn FnOnce(&Table) + Send>;

/// What a build did to its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Container replaced; `rows` body rows written.
    Rendered { rows: usize },
    /// Nothing to show; container left as it was.
    Empty,
    /// Fetch or mount failed and was logged; container left as it was.
    Failed,
}

fn tr<I>(cell_tag: &str, cells: I) -> Node
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Node::element("tr").children_from(
        cells
            .into_iter()
            .map(|c| Node::with_text(cell_tag, c.as_ref())),
    )
}

/// `<table>` with a `<thead>` of `header` and one `<tbody>` row per entry.
pub fn table_node<H, R, C>(header: H, rows: R) -> Node
where
    H: IntoIterator,
    H::Item: AsRef<str>,
    R: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: AsRef<str>,
{
    Node::element("table")
        .child(Node::element("thead").child(tr("th", header)))
        .child(Node::element("tbody").children_from(rows.into_iter().map(|r| tr("td", r))))
}

/// Pure half of [`create_table`]: header from row 0, body from the rest with
/// blank lines dropped. `None` for a table with no rows.
pub fn build_table(table: &Table) -> Option<Node> {
    let header = table.header()?;
    let body = table
        .data_rows()
        .iter()
        .filter(|r| !r.is_blank())
        .map(Row::cells);
    Some(table_node(header.cells(), body))
}

fn body_len(node: &Node) -> usize {
    node.children()
        .iter()
        .find(|n| n.tag() == Some("tbody"))
        .map_or(0, |b| b.children().len())
}

/// Fetch `source`, render it as a table into `container_id`, then hand the
/// parsed rows to `on_data`. Failures are logged, never returned.
#[instrument(level = "info", skip(client, page, on_data), fields(container = %container_id))]
pub async fn create_table(
    client: &Client,
    page: &Mutex<Page>,
    container_id: &str,
    source: &str,
    on_data: Option<OnData>,
) -> RenderOutcome {
    let text = match fetch_text(client, source).await {
        Ok(t) => t,
        Err(e) => {
            error!(source = %source, "Error loading CSV: {:#}", e);
            return RenderOutcome::Failed;
        }
    };

    let rows = table::parse(&text);
    let node = match build_table(&rows) {
        Some(n) => n,
        None => {
            debug!(source = %source, "no rows; leaving container untouched");
            return RenderOutcome::Empty;
        }
    };
    let written = body_len(&node);

    if let Err(e) = page.lock().await.mount(container_id, node) {
        error!(source = %source, "Error loading CSV: {:#}", e);
        return RenderOutcome::Failed;
    }
    info!(source = %source, rows = written, "rendered table");

    if let Some(cb) = on_data {
        cb(&rows);
    }
    RenderOutcome::Rendered { rows: written }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Navigation, Section};
    use anyhow::Result;
    use std::io::Write;
    use std::sync::{Arc, Mutex as StdMutex};
    use tempfile::NamedTempFile;
    use tracing_subscriber::{fmt, EnvFilter};

    // Render logs go to the captured test output; later calls are no-ops.
    fn log_renders_to_test_output() {
        let filter = EnvFilter::try_from_env("LOG_LEVEL")
            .unwrap_or_else(|_| EnvFilter::new("warn,pokerboard::render=debug,pokerboard::fetch=debug"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .try_init();
    }

    fn page() -> Mutex<Page> {
        Mutex::new(Page::new(
            "test",
            Navigation::new(),
            vec![Section {
                id: "results".into(),
                title: "Results".into(),
                containers: vec!["results-table".into()],
            }],
        ))
    }

    fn csv_file(content: &str) -> Result<NamedTempFile> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(content.as_bytes())?;
        Ok(tmp)
    }

    #[test]
    fn test_build_table_skips_blank_rows() {
        let node = build_table(&table::parse("a,b\n1,<i>\n\n3,4")).unwrap();
        assert_eq!(
            node.to_html(),
            "<table><thead><tr><th>a</th><th>b</th></tr></thead>\
             <tbody><tr><td>1</td><td>&lt;i&gt;</td></tr><tr><td>3</td><td>4</td></tr></tbody></table>"
        );
        assert!(build_table(&Table::default()).is_none());
    }

    #[tokio::test]
    async fn test_create_table_renders_and_calls_back() -> Result<()> {
        log_renders_to_test_output();
        let tmp = csv_file("Host,Date\nDave,2024-01-05\nEve,2024-02-02\n")?;
        let path = tmp.path().to_string_lossy().into_owned();
        let page = page();

        let seen = Arc::new(StdMutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let on_data: OnData = Box::new(move |t: &Table| sink.lock().unwrap().push(t.len()));

        let outcome = create_table(&Client::new(), &page, "results-table", &path, Some(on_data)).await;
        assert_eq!(outcome, RenderOutcome::Rendered { rows: 2 });
        assert_eq!(*seen.lock().unwrap(), vec![3]);

        let page = page.lock().await;
        let content = page.content("results-table").unwrap();
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].tag(), Some("table"));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_table_twice_is_idempotent() -> Result<()> {
        let tmp = csv_file("a,b\n1,2")?;
        let path = tmp.path().to_string_lossy().into_owned();
        let page = page();
        let client = Client::new();

        create_table(&client, &page, "results-table", &path, None).await;
        let first = page.lock().await.content("results-table").unwrap().to_vec();
        create_table(&client, &page, "results-table", &path, None).await;
        let second = page.lock().await.content("results-table").unwrap().to_vec();

        assert_eq!(second.len(), 1);
        assert_eq!(first, second);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_table_empty_file_leaves_container() -> Result<()> {
        let tmp = csv_file("  \n\n")?;
        let path = tmp.path().to_string_lossy().into_owned();
        let page = page();
        page.lock().await.mount("results-table", Node::with_text("p", "loading"))?;

        let called = Arc::new(StdMutex::new(false));
        let flag = Arc::clone(&called);
        let on_data: OnData = Box::new(move |_: &Table| *flag.lock().unwrap() = true);

        let outcome = create_table(&Client::new(), &page, "results-table", &path, Some(on_data)).await;
        assert_eq!(outcome, RenderOutcome::Empty);
        assert!(!*called.lock().unwrap());
        assert_eq!(
            page.lock().await.content("results-table").unwrap()[0].text_content(),
            "loading"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_create_table_fetch_failure() {
        log_renders_to_test_output();
        let page = page();
        let outcome = create_table(&Client::new(), &page, "results-table", "missing/file.csv", None).await;
        assert_eq!(outcome, RenderOutcome::Failed);
        assert!(page.lock().await.content("results-table").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_table_unknown_container() -> Result<()> {
        let tmp = csv_file("a\n1")?;
        let path = tmp.path().to_string_lossy().into_owned();
        let outcome = create_table(&Client::new(), &page(), "nowhere", &path, None).await;
        assert_eq!(outcome, RenderOutcome::Failed);
        Ok(())
    }
}
