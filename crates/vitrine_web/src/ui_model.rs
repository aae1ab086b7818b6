//! Page contract shared by wasm and native builds.
//!
//! The selectors and attribute names the static HTML pages expose. Keeping
//! them out of the wasm-only `web` module lets us unit-test them on the host.

use vitrine::form::Field;

pub const FORM_ID: &str = "contactForm";
pub const FORM_STATUS: &str = "[data-form-status]";
pub const SUBMIT_BUTTON: &str = r#"button[type="submit"]"#;

pub const NAV_LINKS: &str = ".navMenu a.navLink";
pub const NAV_TOGGLE: &str = "[data-nav-toggle]";
pub const NAV_MENU: &str = "[data-nav-menu]";
/// Clicking any of these inside the open menu closes it.
pub const NAV_CLOSERS: &str = ".navLink, .navCta, .navBack";

pub const YEAR_ID: &str = "year";
pub const TO_TOP: &str = "[data-to-top]";
pub const MATRIX_CANVAS: &str = ".matrixCanvas";
pub const REVEAL: &str = ".reveal";

/// Optional `<script type="application/json">` carrying a `SiteConfig`.
pub const CONFIG_SCRIPT_ID: &str = "vitrine-config";

pub const CLASS_ACTIVE: &str = "isActive";
pub const CLASS_OPEN: &str = "isOpen";
pub const CLASS_VISIBLE: &str = "isVisible";
pub const ATTR_MENU_OPEN: &str = "data-menu-open";

/// Selector of the inline message element for `field`.
pub fn field_message_selector(field: Field) -> String {
    format!(r#"[data-field-msg="{}"]"#, field.label())
}

/// Events that carry a field's fresh value into the page model.
pub fn edit_events() -> &'static [&'static str] {
    &["input", "change"]
}
