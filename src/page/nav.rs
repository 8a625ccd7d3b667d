// src/page/nav.rs
use crate::render::Node;

pub const BUTTON_CLASS: &str = "nav-link";
pub const SECTION_CLASS: &str = "content-section";
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    pub label: String,
    /// Id of the section this button shows.
    pub target: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavSection {
    pub id: String,
    pub active: bool,
}

/// Tab switching: one active button, and the sections whose id matches its
/// target active, everything else inactive.
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    buttons: Vec<NavButton>,
    sections: Vec<NavSection>,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_button(&mut self, label: impl Into<String>, target: impl Into<String>) {
        self.buttons.push(NavButton {
            label: label.into(),
            target: target.into(),
            active: false,
        });
    }

    pub fn add_section(&mut self, id: impl Into<String>) {
        self.sections.push(NavSection {
            id: id.into(),
            active: false,
        });
    }

    pub fn buttons(&self) -> &[NavButton] {
        &self.buttons
    }

    pub fn sections(&self) -> &[NavSection] {
        &self.sections
    }

    pub fn active_button(&self) -> Option<&NavButton> {
        self.buttons.iter().find(|b| b.active)
    }

    pub fn is_section_active(&self, id: &str) -> bool {
        self.sections.iter().any(|s| s.id == id && s.active)
    }

    /// Activate button `idx` and its target section. Returns false, changing
    /// nothing, if there is no such button.
    pub fn click(&mut self, idx: usize) -> bool {
        let target = match self.buttons.get(idx) {
            Some(b) => b.target.clone(),
            None => return false,
        };
        for (i, b) in self.buttons.iter_mut().enumerate() {
            b.active = i == idx;
        }
        for s in &mut self.sections {
            s.active = s.id == target;
        }
        true
    }

    /// Click the first button pointing at `target`.
    pub fn click_target(&mut self, target: &str) -> bool {
        match self.buttons.iter().position(|b| b.target == target) {
            Some(idx) => self.click(idx),
            None => false,
        }
    }

    pub fn to_node(&self) -> Node {
        Node::element("nav").children_from(self.buttons.iter().map(|b| {
            Node::element("button")
                .attr("class", class_list(BUTTON_CLASS, b.active))
                .attr("data-target", b.target.as_str())
                .child(Node::text(b.label.as_str()))
        }))
    }

    /// Section wrapper carrying the current active class.
    pub fn section_node(&self, id: &str) -> Node {
        Node::element("section")
            .attr("id", id)
            .attr("class", class_list(SECTION_CLASS, self.is_section_active(id)))
    }
}

fn class_list(base: &str, active: bool) -> String {
    if active {
        format!("{} {}", base, ACTIVE_CLASS)
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav() -> Navigation {
        let mut nav = Navigation::new();
        nav.add_button("Leaderboard", "leaderboard");
        nav.add_button("Hosts", "hosts");
        nav.add_section("leaderboard");
        nav.add_section("hosts");
        nav
    }

    #[test]
    fn test_click_is_exclusive() {
        let mut nav = nav();
        assert!(nav.click(0));
        assert!(nav.click(1));

        assert_eq!(nav.active_button().map(|b| b.label.as_str()), Some("Hosts"));
        assert_eq!(nav.buttons().iter().filter(|b| b.active).count(), 1);
        assert!(nav.is_section_active("hosts"));
        assert!(!nav.is_section_active("leaderboard"));
    }

    #[test]
    fn test_click_unknown_button_changes_nothing() {
        let mut nav = nav();
        nav.click(0);
        assert!(!nav.click(5));
        assert!(nav.is_section_active("leaderboard"));
        assert!(!nav.click_target("nowhere"));
    }

    #[test]
    fn test_target_without_section_deactivates_all() {
        let mut nav = nav();
        nav.add_button("Missing", "missing");
        nav.click(0);
        nav.click_target("missing");
        assert!(nav.sections().iter().all(|s| !s.active));
        assert_eq!(nav.active_button().map(|b| b.target.as_str()), Some("missing"));
    }

    #[test]
    fn test_nodes_carry_active_class() {
        let mut nav = nav();
        nav.click_target("hosts");
        let html = nav.to_node().to_html();
        assert!(html.contains(r#"<button class="nav-link" data-target="leaderboard">"#));
        assert!(html.contains(r#"<button class="nav-link active" data-target="hosts">"#));
        assert_eq!(
            nav.section_node("hosts").to_html(),
            r#"<section id="hosts" class="content-section active"></section>"#
        );
    }
}
