//! Collapsible navigation menu.

/// Expanded/collapsed state shared by the menu toggle and the menu itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    expanded: bool,
}

impl NavMenu {
    pub fn is_expanded(self) -> bool {
        self.expanded
    }

    /// Value for the toggle's `aria-expanded`-style label.
    pub fn expanded_attr(self) -> &'static str {
        if self.expanded { "true" } else { "false" }
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Following a link collapses the menu and yields the target section.
    pub fn follow(&mut self, index: usize, len: usize) -> Option<usize> {
        if index >= len {
            return None;
        }
        self.expanded = false;
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut nav = NavMenu::default();
        assert!(!nav.is_expanded());
        assert_eq!(nav.expanded_attr(), "false");
        nav.toggle();
        assert!(nav.is_expanded());
        assert_eq!(nav.expanded_attr(), "true");
        nav.toggle();
        assert!(!nav.is_expanded());
    }

    #[test]
    fn test_follow_collapses() {
        let mut nav = NavMenu::default();
        nav.toggle();
        assert_eq!(nav.follow(1, 4), Some(1));
        assert!(!nav.is_expanded());
    }

    #[test]
    fn test_follow_out_of_range() {
        let mut nav = NavMenu::default();
        nav.toggle();
        assert_eq!(nav.follow(7, 4), None);
        assert!(nav.is_expanded());
    }
}
