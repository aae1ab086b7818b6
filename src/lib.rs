//! # vitrine
//!
//! Interaction logic for a static, multi-page marketing site: active nav
//! link, mobile menu, contact form validation with a simulated submission,
//! footer year, scroll-to-top and a falling-character canvas backdrop.
//!
//! Everything here is plain state plus a dispatch function, so it runs and
//! tests on the host. `vitrine_web` binds it to a live page.
//!
//! ## Quick Start
//!
//! ```
//! use std::time::Duration;
//! use vitrine::prelude::*;
//!
//! let mut page = Page::new(SiteConfig::default())
//!     .with_form(FormInput::with_fields(Field::all()));
//! let mut clock = ManualScheduler::new();
//!
//! for (field, value) in [
//!     (Field::Name, "Jo"),
//!     (Field::Email, "a@b.com"),
//!     (Field::Topic, "support"),
//!     (Field::Message, "Hello there!"),
//! ] {
//!     page.dispatch(Event::Edit { field, value: value.into() }, &mut clock);
//! }
//!
//! let effects = page.dispatch(Event::Submit, &mut clock);
//! assert!(effects.contains(&Effect::SetSubmitDisabled(true)));
//!
//! for task in clock.advance(Duration::from_millis(700)) {
//!     page.dispatch(Event::TimerFired(task), &mut clock);
//! }
//! assert_eq!(page.submit_state(), Some(SubmitState::Idle));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): JSON config and serializable results/effects
//!
//! ## Modules
//!
//! - [`form`]: field set and validator
//! - [`submit`]: submission state machine
//! - [`scheduler`]: injectable one-shot timers
//! - [`dispatch`]: event → effects
//! - [`nav`], [`menu`], [`footer`], [`matrix`]: the rest of the page

#[path = "core/config.rs"]
pub mod config;

#[path = "core/dispatch.rs"]
pub mod dispatch;

#[path = "core/error.rs"]
pub mod error;

#[path = "core/footer.rs"]
pub mod footer;

#[path = "core/form.rs"]
pub mod form;

#[path = "core/matrix.rs"]
pub mod matrix;

#[path = "core/menu.rs"]
pub mod menu;

#[path = "core/messages.rs"]
pub mod messages;

#[path = "core/nav.rs"]
pub mod nav;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/scheduler.rs"]
pub mod scheduler;

#[path = "core/submit.rs"]
pub mod submit;

/// Prelude module for convenient imports.
///
/// ```
/// use vitrine::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{MatrixConfig, SiteConfig};
    pub use crate::dispatch::{Effect, Event, Page};
    pub use crate::error::{Error, Result};
    pub use crate::form::{validate, validate_with, Field, FormInput, ValidationResult};
    pub use crate::matrix::{MatrixFrame, MatrixRain};
    pub use crate::menu::{MenuState, MenuView};
    pub use crate::messages::{Locale, Messages};
    pub use crate::nav::{highlight, CurrentPage, LinkView};
    pub use crate::scheduler::{ManualScheduler, Scheduler, TimerId, TimerTask};
    pub use crate::submit::{ContactForm, SubmitOutcome, SubmitState};
}
