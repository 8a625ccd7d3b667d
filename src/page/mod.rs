// src/page/mod.rs
pub mod nav;

use anyhow::{bail, Result};
use chrono::Local;
use std::collections::BTreeMap;

use crate::render::{escape_text, Node};
pub use nav::Navigation;

/// A content section and the containers laid out inside it.
#[derive(Debug, Clone)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub containers: Vec<String>,
}

/// Named mount points plus the page chrome around them.
#[derive(Debug, Clone)]
pub struct Page {
    title: String,
    nav: Navigation,
    sections: Vec<Section>,
    containers: BTreeMap<String, Vec<Node>>,
}

impl Page {
    pub fn new(title: impl Into<String>, nav: Navigation, sections: Vec<Section>) -> Self {
        let containers = sections
            .iter()
            .flat_map(|s| s.containers.iter())
            .map(|id| (id.clone(), Vec::new()))
            .collect();
        Self {
            title: title.into(),
            nav,
            sections,
            containers,
        }
    }

    pub fn nav(&self) -> &Navigation {
        &self.nav
    }

    pub fn nav_mut(&mut self) -> &mut Navigation {
        &mut self.nav
    }

    pub fn has_container(&self, id: &str) -> bool {
        self.containers.contains_key(id)
    }

    pub fn content(&self, id: &str) -> Option<&[Node]> {
        self.containers.get(id).map(Vec::as_slice)
    }

    /// Replace everything inside container `id` with `node`.
    pub fn mount(&mut self, id: &str, node: Node) -> Result<()> {
        match self.containers.get_mut(id) {
            Some(content) => {
                content.clear();
                content.push(node);
                Ok(())
            }
            None => bail!("no container with id {:?}", id),
        }
    }

    fn container_node(&self, id: &str) -> Node {
        Node::element("div")
            .attr("id", id)
            .children_from(self.content(id).unwrap_or_default().iter().cloned())
    }

    pub fn to_html(&self) -> String {
        let mut body = Node::element("body")
            .child(Node::with_text("h1", self.title.as_str()))
            .child(self.nav.to_node());
        for section in &self.sections {
            let node = self
                .nav
                .section_node(&section.id)
                .child(Node::with_text("h2", section.title.as_str()))
                .children_from(section.containers.iter().map(|c| self.container_node(c)));
            body = body.child(node);
        }
        body = body.child(Node::with_text(
            "footer",
            format!("Generated {}", Local::now().format("%Y-%m-%d %H:%M")),
        ));

        let mut out = String::from("<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">");
        out.push_str("<title>");
        out.push_str(&escape_text(&self.title));
        out.push_str("</title></head>");
        body.write_html(&mut out);
        out.push_str("</html>\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn page() -> Page {
        let mut nav = Navigation::new();
        nav.add_button("Hosts", "hosts");
        nav.add_section("hosts");
        nav.click(0);
        Page::new(
            "Poker Night",
            nav,
            vec![Section {
                id: "hosts".into(),
                title: "Hosts".into(),
                containers: vec!["hosts-table".into()],
            }],
        )
    }

    #[test]
    fn test_mount_replaces_content() -> Result<()> {
        let mut page = page();
        page.mount("hosts-table", Node::with_text("p", "one"))?;
        page.mount("hosts-table", Node::with_text("p", "two"))?;
        let content = page.content("hosts-table").unwrap();
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].text_content(), "two");
        Ok(())
    }

    #[test]
    fn test_mount_unknown_container() {
        let mut page = page();
        assert!(page.mount("nope", Node::text("x")).is_err());
        assert!(!page.has_container("nope"));
    }

    #[test]
    fn test_to_html_document() -> Result<()> {
        let mut page = page();
        page.mount("hosts-table", Node::with_text("p", "Dave & Co"))?;
        let doc = Html::parse_document(&page.to_html());

        let sel = Selector::parse("section#hosts.content-section.active div#hosts-table p").unwrap();
        let texts: Vec<String> = doc.select(&sel).map(|e| e.text().collect()).collect();
        assert_eq!(texts, vec!["Dave & Co"]);

        let sel = Selector::parse("button.nav-link.active").unwrap();
        assert_eq!(doc.select(&sel).count(), 1);
        Ok(())
    }
}
