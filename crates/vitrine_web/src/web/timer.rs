use std::rc::Weak;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use vitrine::dispatch::Event;
use vitrine::scheduler::{Scheduler, TimerId, TimerTask};

use super::dom;
use super::Runtime;

/// `setTimeout`-backed scheduler. Fired tasks are dispatched back into the
/// page they came from, if it is still alive.
pub(super) struct BrowserScheduler {
    pub(super) runtime: Weak<Runtime>,
}

impl Scheduler for BrowserScheduler {
    fn schedule(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        let runtime = self.runtime.clone();
        let cb = Closure::once_into_js(move || {
            if let Some(rt) = runtime.upgrade() {
                super::dispatch(&rt, Event::TimerFired(task));
            }
        });

        let ms = delay.as_millis().min(i32::MAX as u128) as i32;
        let res = dom::window().and_then(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
                .map_err(|_| "timer: setTimeout threw".to_string())
        });

        match res {
            Ok(handle) => TimerId(handle as u64),
            Err(e) => {
                dom::log_error(&e);
                TimerId(u64::MAX)
            }
        }
    }
}
