use log::Level;

use crate::interaction::TimerSlot;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose state transitions when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Timer durations in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingConfig {
    /// No pointer or key input for this long puts the card into idle.
    pub idle_after: u32,
    /// While idle, the wobble is replayed on this period.
    pub idle_pulse_every: u32,
    /// Gap between dropping and restoring the idle class during a replay.
    pub wobble_replay_after: u32,
    /// Length of the first-interaction pulse.
    pub pulse_duration: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            idle_after: 10_000,
            idle_pulse_every: 30_000,
            wobble_replay_after: 300,
            pulse_duration: 300,
        }
    }
}

impl TimingConfig {
    pub fn delay(&self, slot: TimerSlot) -> u32 {
        match slot {
            TimerSlot::Idle => self.idle_after,
            TimerSlot::IdlePulse => self.idle_pulse_every,
            TimerSlot::WobbleReplay => self.wobble_replay_after,
            TimerSlot::PulseEnd => self.pulse_duration,
        }
    }
}

pub fn timing() -> TimingConfig {
    TimingConfig::default()
}
