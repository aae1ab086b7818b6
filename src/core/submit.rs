//! Contact form submission flow.
//!
//! States: `Idle -> Validating -> {Rejected, Submitting} -> Idle`.
//! `Validating` and `Rejected` are transient: they happen inside one call and
//! the form is back to `Idle` before the call returns. Only `Submitting`
//! survives between calls, until its timer completes.

use tracing::debug;

use crate::form::{validate_with, Field, FormInput, ValidationResult};
use crate::messages::Messages;
use crate::scheduler::{Scheduler, TimerTask};

#[cfg(feature = "serde")]
use serde::Serialize;

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum SubmitState {
    #[default]
    Idle,
    Validating,
    Rejected,
    Submitting { ticket: u64 },
}

/// Render instructions for the form region.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum FormEffect {
    SetFieldMessage { field: Field, text: String },
    SetStatus(String),
    SetSubmitDisabled(bool),
    ResetForm,
}

/// Outcome of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected,
    Pending { ticket: u64 },
    /// A submission was already in flight.
    Ignored,
}

#[derive(Debug, Default)]
pub struct ContactForm {
    input: FormInput,
    state: SubmitState,
    next_ticket: u64,
    transitions: Vec<SubmitState>,
}

impl ContactForm {
    pub fn new(input: FormInput) -> Self {
        Self {
            input,
            ..Self::default()
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    /// Every state entered since the last call, oldest first.
    pub fn take_transitions(&mut self) -> Vec<SubmitState> {
        std::mem::take(&mut self.transitions)
    }

    fn enter(&mut self, next: SubmitState) {
        debug!(from = ?self.state, to = ?next, "submit state");
        self.state = next;
        self.transitions.push(next);
    }

    /// Stores a fresh value for a field present on the page. Edits to a
    /// field the page does not carry are dropped.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        if self.input.is_present(field) {
            self.input.set(field, value);
        }
    }

    /// Validates the current values and renders every present field's
    /// message, clearing the previous one first.
    pub fn revalidate(&self, messages: &Messages, out: &mut Vec<FormEffect>) -> ValidationResult {
        let result = validate_with(&self.input, messages);
        for field in Field::all() {
            out.push(FormEffect::SetFieldMessage {
                field: *field,
                text: String::new(),
            });
        }
        for (field, text) in &result.messages {
            if !text.is_empty() {
                out.push(FormEffect::SetFieldMessage {
                    field: *field,
                    text: text.clone(),
                });
            }
        }
        result
    }

    pub fn submit(
        &mut self,
        messages: &Messages,
        delay: Duration,
        scheduler: &mut dyn Scheduler,
        out: &mut Vec<FormEffect>,
    ) -> SubmitOutcome {
        if let SubmitState::Submitting { ticket } = self.state {
            debug!(ticket, "submit ignored while pending");
            return SubmitOutcome::Ignored;
        }

        self.enter(SubmitState::Validating);
        let result = self.revalidate(messages, out);

        if !result.valid {
            self.enter(SubmitState::Rejected);
            out.push(FormEffect::SetStatus(messages.rejected.to_string()));
            self.enter(SubmitState::Idle);
            return SubmitOutcome::Rejected;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.enter(SubmitState::Submitting { ticket });
        out.push(FormEffect::SetStatus(messages.pending.to_string()));
        out.push(FormEffect::SetSubmitDisabled(true));
        scheduler.schedule(delay, TimerTask::SubmitComplete { ticket });
        SubmitOutcome::Pending { ticket }
    }

    /// Finishes the simulated submission. Returns false for a stale ticket.
    pub fn complete(&mut self, ticket: u64, messages: &Messages, out: &mut Vec<FormEffect>) -> bool {
        match self.state {
            SubmitState::Submitting { ticket: current } if current == ticket => {
                out.push(FormEffect::SetStatus(messages.success.to_string()));
                out.push(FormEffect::SetSubmitDisabled(false));
                out.push(FormEffect::ResetForm);
                self.input.reset();
                self.enter(SubmitState::Idle);
                true
            }
            _ => {
                debug!(ticket, state = ?self.state, "stale completion dropped");
                false
            }
        }
    }
}
