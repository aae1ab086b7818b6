//! Page glue for the vitrine site.
//!
//! On wasm32 with `--features web`, `start` finds the contact form, nav
//! menu, footer and backdrop canvas on the loaded page, turns their DOM
//! events into `vitrine::dispatch::Event`s and writes the resulting effects
//! back. Any other build only exposes [`ui_model`], the selectors and
//! attribute names the glue relies on, so they stay testable on the host.

pub mod ui_model;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;
