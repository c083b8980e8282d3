//! Timer scheduler - descent and screen-clear timers as tokio tasks
//!
//! There is a single timer slot, so at most one of {descent, screen-clear}
//! is live: starting either aborts whatever occupies the slot. Each started
//! timer gets a fresh id and tags every event it sends with it. The game loop
//! passes incoming events through [`Scheduler::accept`], which drops events
//! from timers that are no longer live. An event already sitting in the
//! channel when its timer is cancelled is therefore never acted on.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, trace};

use crate::config::TimingConfig;

/// What a timer asks the state machine to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Descent delay elapsed: apply one Down
    Descent,
    /// Show screen-clear frame N (rows filled bottom-up, then cleared top-down)
    ClearFrame(u16),
    /// Screen-clear animation finished
    ClearDone,
}

impl TimerTick {
    /// Last event a timer sends; the slot is free afterwards.
    fn is_final(&self) -> bool {
        matches!(self, TimerTick::Descent | TimerTick::ClearDone)
    }
}

/// Event sent by a timer task back to the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub id: u64,
    pub tick: TimerTick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Descent,
    ScreenClear,
}

struct LiveTimer {
    id: u64,
    kind: TimerKind,
    handle: JoinHandle<()>,
}

pub struct Scheduler {
    timing: TimingConfig,
    events: mpsc::UnboundedSender<TimerEvent>,
    live: Option<LiveTimer>,
    next_id: u64,
}

impl Scheduler {
    pub fn new(timing: TimingConfig, events: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            timing,
            events,
            live: None,
            next_id: 0,
        }
    }

    /// Change the delay of descent timers started from now on.
    ///
    /// A descent timer already in flight keeps the delay it started with.
    pub fn set_descent_interval(&mut self, interval: Duration) {
        let ms = interval.as_millis().clamp(1, u64::MAX as u128) as u64;
        debug!(descent_ms = ms, "descent interval changed");
        self.timing.descent_ms = ms;
    }

    /// Kind of the live timer, if any
    pub fn active(&self) -> Option<TimerKind> {
        self.live
            .as_ref()
            .filter(|t| !t.handle.is_finished())
            .map(|t| t.kind)
    }

    /// Start a single-shot descent timer, replacing any live timer.
    pub fn start_descent(&mut self) -> u64 {
        let id = self.cancel_and_next_id();
        let delay = self.timing.descent();
        let events = self.events.clone();

        let handle = tokio::spawn(async move {
            sleep(delay).await;
            let _ = events.send(TimerEvent {
                id,
                tick: TimerTick::Descent,
            });
        });

        debug!(id, delay_ms = delay.as_millis() as u64, "descent timer started");
        self.live = Some(LiveTimer {
            id,
            kind: TimerKind::Descent,
            handle,
        });
        id
    }

    /// Start the screen-clear animation for a board `rows` tall, replacing any live timer.
    ///
    /// Sends `2 * rows` frames, one frame delay apart, then `ClearDone` after
    /// one more frame delay plus the tail delay.
    pub fn start_screen_clear(&mut self, rows: u8) -> u64 {
        let id = self.cancel_and_next_id();
        let frames = rows as u16 * 2;
        let frame_delay = self.timing.clear_frame();
        let tail_delay = self.timing.clear_tail();
        let events = self.events.clone();

        let handle = tokio::spawn(async move {
            for frame in 0..frames {
                let tick = TimerTick::ClearFrame(frame);
                if events.send(TimerEvent { id, tick }).is_err() {
                    return;
                }
                sleep(frame_delay).await;
            }
            sleep(tail_delay).await;
            let _ = events.send(TimerEvent {
                id,
                tick: TimerTick::ClearDone,
            });
        });

        debug!(id, frames, "screen-clear timer started");
        self.live = Some(LiveTimer {
            id,
            kind: TimerKind::ScreenClear,
            handle,
        });
        id
    }

    /// Cancel the live timer. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.live.take() {
            timer.handle.abort();
            trace!(id = timer.id, kind = ?timer.kind, "timer cancelled");
        }
    }

    /// True if `event` comes from the live timer.
    ///
    /// A final event (`Descent`, `ClearDone`) frees the slot.
    pub fn accept(&mut self, event: &TimerEvent) -> bool {
        let live = self.live.as_ref().is_some_and(|t| t.id == event.id);
        if !live {
            trace!(id = event.id, tick = ?event.tick, "stale timer event dropped");
            return false;
        }
        if event.tick.is_final() {
            self.live = None;
        }
        true
    }

    fn cancel_and_next_id(&mut self) -> u64 {
        self.cancel();
        self.next_id += 1;
        self.next_id
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
