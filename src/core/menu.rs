//! Mobile navigation menu.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::messages::Messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub open: bool,
}

/// Everything the page mirrors from [`MenuState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MenuView {
    /// `isOpen` class on the menu.
    pub open: bool,
    /// `aria-expanded` on the toggle.
    pub aria_expanded: &'static str,
    /// `aria-label` on the toggle.
    pub aria_label: &'static str,
    /// `data-menu-open` on `<body>`; drives the hamburger-to-X styles.
    pub body_flag: bool,
    /// Inline `overflow` on the document element.
    pub overflow: &'static str,
}

impl MenuState {
    pub fn view(self, messages: &Messages) -> MenuView {
        MenuView {
            open: self.open,
            aria_expanded: if self.open { "true" } else { "false" },
            aria_label: if self.open {
                messages.menu_close_label
            } else {
                messages.menu_open_label
            },
            body_flag: self.open,
            overflow: if self.open { "hidden" } else { "" },
        }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Whether a key press should close the menu.
    pub fn closes_on_key(key: &str) -> bool {
        key == "Escape"
    }

    /// Whether a viewport of `width` px is wide enough to drop the mobile menu.
    pub fn closes_on_resize(width: u32, breakpoint_px: u32) -> bool {
        width >= breakpoint_px
    }
}

/// CSS turning the hamburger bars into an X while the menu is open.
pub const HAMBURGER_OPEN_CSS: &str = r#"
    [data-menu-open="true"] .navToggleBars::before { top: 0; transform: rotate(45deg); }
    [data-menu-open="true"] .navToggleBars::after  { top: 0; transform: rotate(-45deg); }
    [data-menu-open="true"] .navToggleBars { background: transparent; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;

    #[test]
    fn view_mirrors_state() {
        let m = Locale::Es.messages();
        let mut s = MenuState::default();
        let closed = s.view(m);
        assert_eq!(closed.aria_expanded, "false");
        assert_eq!(closed.aria_label, "Abrir menú");
        assert_eq!(closed.overflow, "");
        assert!(!closed.body_flag);

        s.toggle();
        let open = s.view(m);
        assert!(open.open);
        assert_eq!(open.aria_expanded, "true");
        assert_eq!(open.aria_label, "Cerrar menú");
        assert_eq!(open.overflow, "hidden");
        assert!(open.body_flag);
    }

    #[test]
    fn close_triggers() {
        assert!(MenuState::closes_on_key("Escape"));
        assert!(!MenuState::closes_on_key("Enter"));
        assert!(MenuState::closes_on_resize(860, 860));
        assert!(MenuState::closes_on_resize(1200, 860));
        assert!(!MenuState::closes_on_resize(859, 860));
    }
}
