//! Tokio driver for widget tickers.
//!
//! A [`WidgetController`](crate::widget::WidgetController) only says whether its one-second timer should be
//! running ([`TickerSlot`]). The driver owns the actual `tokio::time::Interval`:
//! it is created when the slot is armed and dropped the moment the slot is
//! disarmed, so a paused or reset widget has no timer at all.
//!
//! Intended for a current-thread runtime; nothing here is `Send`.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::widget::TickerSlot;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct TickDriver {
    period: Duration,
    interval: Option<Interval>,
    generation: u64,
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl TickDriver {
    /// A driver whose "second" lasts `period`. Anything but [`TICK_PERIOD`]
    /// is for demos and tests.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            interval: None,
            generation: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    /// Match the interval to the slot. Call after every widget command.
    pub fn sync(&mut self, slot: TickerSlot) {
        if !slot.is_armed() {
            if self.interval.take().is_some() {
                tracing::trace!("ticker cancelled");
            }
            return;
        }
        if self.interval.is_some() && self.generation == slot.generation() {
            return;
        }
        // First tick one full period after arming, not immediately.
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        self.generation = slot.generation();
        tracing::trace!(generation = self.generation, "ticker armed");
    }

    /// Resolve at the next tick. Never resolves while no interval exists,
    /// which makes it safe inside `tokio::select!`.
    pub async fn next_tick(&mut self) {
        match &mut self.interval {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
