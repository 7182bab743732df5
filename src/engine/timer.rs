//! Tick-based timers. Delays are rounded to whole ticks so a one second wait fires after exactly
//! `TICK_RATE` steps.

use std::time::Duration;

use crate::config::TICK_RATE;

pub fn ticks_for(delay: Duration) -> u64 {
    let ticks = (delay.as_secs_f64() * TICK_RATE as f64).round() as u64;
    ticks.max(1)
}

#[derive(Clone, Debug)]
struct Timer<A> {
    id: u64,
    action: A,
    due: u64,
    period: Option<u64>,
}

/// Schedules actions of type `A` against the tick clock. Fired actions are returned to the caller
/// rather than invoked, so handlers can borrow the whole game state.
#[derive(Clone, Debug)]
pub struct Scheduler<A> {
    now: u64,
    next_id: u64,
    timers: Vec<Timer<A>>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self {
            now: 0,
            next_id: 0,
            timers: Vec::new(),
        }
    }
}

impl<A: Copy> Scheduler<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    /// Fires `action` once after `delay`.
    pub fn wait(&mut self, delay: Duration, action: A) {
        self.schedule(ticks_for(delay), None, action)
    }

    /// Fires `action` every `period`, the first time one period from now.
    pub fn every(&mut self, period: Duration, action: A) {
        let ticks = ticks_for(period);
        self.schedule(ticks, Some(ticks), action)
    }

    fn schedule(&mut self, delay: u64, period: Option<u64>, action: A) {
        self.next_id += 1;
        self.timers.push(Timer {
            id: self.next_id,
            action,
            due: self.now + delay,
            period,
        });
    }

    /// Drops every pending timer. The clock keeps running.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Moves the clock forward one tick and returns the actions that came due, oldest first.
    pub fn advance(&mut self) -> Vec<A> {
        self.now += 1;
        let now = self.now;

        let mut due: Vec<(u64, u64, A)> = self
            .timers
            .iter()
            .filter(|t| t.due <= now)
            .map(|t| (t.due, t.id, t.action))
            .collect();
        due.sort_by_key(|&(at, id, _)| (at, id));

        for timer in &mut self.timers {
            if timer.due <= now {
                if let Some(period) = timer.period {
                    timer.due += period;
                }
            }
        }
        self.timers.retain(|t| t.due > now);

        due.into_iter().map(|(_, _, action)| action).collect()
    }
}
