//! One-shot deferred tasks.
//!
//! The page never sleeps. Anything that should happen later is handed to a
//! [`Scheduler`] as plain data; when the host's timer fires it dispatches
//! [`crate::dispatch::Event::TimerFired`] with the same task. Tests use
//! [`ManualScheduler`] and move the clock by hand.

use std::time::Duration;

use tracing::trace;

#[cfg(feature = "serde")]
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TimerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum TimerTask {
    /// Finish the simulated submission identified by `ticket`.
    SubmitComplete { ticket: u64 },
}

pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, task: TimerTask) -> TimerId;
}

#[derive(Debug, Clone)]
struct Pending {
    id: TimerId,
    due: Duration,
    task: TimerTask,
}

/// Scheduler driven by an explicit clock.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Moves the clock forward and returns every task now due, earliest
    /// first. Tasks with the same deadline come out in scheduling order.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerTask> {
        self.now += by;
        let now = self.now;

        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due <= now {
                due.push(p.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|p| (p.due, p.id));
        due.into_iter().map(|p| p.task).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now + delay;
        trace!(?id, ?task, ?due, "timer scheduled");
        self.pending.push(Pending { id, due, task });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_fires_before_deadline() {
        let mut s = ManualScheduler::new();
        s.schedule(
            Duration::from_millis(700),
            TimerTask::SubmitComplete { ticket: 1 },
        );
        assert!(s.advance(Duration::from_millis(699)).is_empty());
        assert_eq!(s.pending_len(), 1);
        assert_eq!(
            s.advance(Duration::from_millis(1)),
            vec![TimerTask::SubmitComplete { ticket: 1 }]
        );
        assert_eq!(s.pending_len(), 0);
    }

    #[test]
    fn due_tasks_come_out_in_deadline_order() {
        let mut s = ManualScheduler::new();
        s.schedule(
            Duration::from_millis(50),
            TimerTask::SubmitComplete { ticket: 2 },
        );
        s.schedule(
            Duration::from_millis(10),
            TimerTask::SubmitComplete { ticket: 1 },
        );
        s.schedule(
            Duration::from_millis(50),
            TimerTask::SubmitComplete { ticket: 3 },
        );
        let fired = s.advance(Duration::from_secs(1));
        assert_eq!(
            fired,
            vec![
                TimerTask::SubmitComplete { ticket: 1 },
                TimerTask::SubmitComplete { ticket: 2 },
                TimerTask::SubmitComplete { ticket: 3 },
            ]
        );
    }
}
