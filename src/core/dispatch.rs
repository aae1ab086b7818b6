//! Event dispatch.
//!
//! The browser crate turns DOM callbacks into [`Event`]s, hands them to
//! [`Page::dispatch`] and applies the returned [`Effect`]s. Nothing in here
//! touches a live page, so the whole interaction model runs on the host.

use tracing::debug;

use crate::config::SiteConfig;
use crate::footer::year_stamp;
use crate::form::{Field, FormInput};
use crate::matrix::{MatrixFrame, MatrixRain};
use crate::menu::{MenuState, MenuView};
use crate::messages::Messages;
use crate::scheduler::{Scheduler, TimerTask};
use crate::submit::{ContactForm, FormEffect, SubmitState};

#[cfg(feature = "serde")]
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Page finished loading.
    Init { year: i32 },
    Edit { field: Field, value: String },
    Blur(Field),
    Submit,
    TimerFired(TimerTask),
    MenuToggle,
    /// A nav link, CTA or back button inside the menu was clicked.
    MenuLinkClicked,
    KeyDown(String),
    /// Viewport width changed.
    Resize { width: u32 },
    /// The backdrop canvas took a new size.
    CanvasResize { width: u32, height: u32 },
    ToTopClicked,
    AnimationTick,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Effect {
    SetFieldMessage { field: Field, text: String },
    SetStatus(String),
    SetSubmitDisabled(bool),
    ResetForm,
    SetMenu(MenuView),
    SetYear(String),
    ScrollToTop,
    DrawMatrix(MatrixFrame),
}

impl From<FormEffect> for Effect {
    fn from(e: FormEffect) -> Self {
        match e {
            FormEffect::SetFieldMessage { field, text } => Effect::SetFieldMessage { field, text },
            FormEffect::SetStatus(s) => Effect::SetStatus(s),
            FormEffect::SetSubmitDisabled(d) => Effect::SetSubmitDisabled(d),
            FormEffect::ResetForm => Effect::ResetForm,
        }
    }
}

/// Component-local state for one page. Each part is optional because not
/// every page carries a form, a menu or a canvas.
#[derive(Debug)]
pub struct Page {
    config: SiteConfig,
    form: Option<ContactForm>,
    menu: Option<MenuState>,
    matrix: Option<MatrixRain>,
}

impl Page {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config: config.sanitized(),
            form: None,
            menu: None,
            matrix: None,
        }
    }

    pub fn with_form(mut self, input: FormInput) -> Self {
        self.form = Some(ContactForm::new(input));
        self
    }

    pub fn with_menu(mut self) -> Self {
        self.menu = Some(MenuState::default());
        self
    }

    pub fn with_matrix(mut self, width: u32, height: u32, seed: u64) -> Self {
        self.matrix = Some(MatrixRain::new(
            self.config.matrix.clone(),
            width,
            height,
            seed,
        ));
        self
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn form(&self) -> Option<&ContactForm> {
        self.form.as_ref()
    }

    pub fn menu(&self) -> Option<MenuState> {
        self.menu
    }

    pub fn submit_state(&self) -> Option<SubmitState> {
        self.form.as_ref().map(ContactForm::state)
    }

    fn messages(&self) -> &'static Messages {
        self.config.locale.messages()
    }

    pub fn dispatch(&mut self, event: Event, scheduler: &mut dyn Scheduler) -> Vec<Effect> {
        debug!(?event, "dispatch");
        let messages = self.messages();
        let mut form_out: Vec<FormEffect> = Vec::new();
        let mut out: Vec<Effect> = Vec::new();

        match event {
            Event::Init { year } => {
                out.push(Effect::SetYear(year_stamp(year)));
                if let Some(menu) = self.menu {
                    out.push(Effect::SetMenu(menu.view(messages)));
                }
            }
            Event::Edit { field, value } => {
                if let Some(form) = self.form.as_mut() {
                    form.edit(field, value);
                }
            }
            Event::Blur(field) => {
                if let Some(form) = self.form.as_ref() {
                    if form.input().is_present(field) {
                        form.revalidate(messages, &mut form_out);
                    }
                }
            }
            Event::Submit => {
                let delay = self.config.submit_delay();
                if let Some(form) = self.form.as_mut() {
                    form.submit(messages, delay, scheduler, &mut form_out);
                }
            }
            Event::TimerFired(TimerTask::SubmitComplete { ticket }) => {
                if let Some(form) = self.form.as_mut() {
                    form.complete(ticket, messages, &mut form_out);
                }
            }
            Event::MenuToggle => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.toggle();
                    out.push(Effect::SetMenu(menu.view(messages)));
                }
            }
            Event::MenuLinkClicked => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.close();
                    out.push(Effect::SetMenu(menu.view(messages)));
                }
            }
            Event::KeyDown(key) => {
                if let Some(menu) = self.menu.as_mut() {
                    if MenuState::closes_on_key(&key) {
                        menu.close();
                        out.push(Effect::SetMenu(menu.view(messages)));
                    }
                }
            }
            Event::Resize { width } => {
                let breakpoint = self.config.menu_breakpoint_px;
                if let Some(menu) = self.menu.as_mut() {
                    if MenuState::closes_on_resize(width, breakpoint) {
                        menu.close();
                        out.push(Effect::SetMenu(menu.view(messages)));
                    }
                }
            }
            Event::CanvasResize { width, height } => {
                if let Some(matrix) = self.matrix.as_mut() {
                    matrix.resize(width, height);
                }
            }
            Event::ToTopClicked => out.push(Effect::ScrollToTop),
            Event::AnimationTick => {
                if let Some(matrix) = self.matrix.as_mut() {
                    out.push(Effect::DrawMatrix(matrix.step()));
                }
            }
        }

        let mut effects: Vec<Effect> = form_out.into_iter().map(Effect::from).collect();
        effects.append(&mut out);
        effects
    }
}
