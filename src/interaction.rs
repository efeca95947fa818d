//! First-interaction pulse and idle wobble.
//!
//! The state machine never touches a clock. Each transition returns the
//! timer commands the caller has to carry out, and timer expiries come back
//! in as ordinary events.

use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Fresh,
    Interacted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerSlot {
    /// One-shot: no input for the idle threshold.
    Idle,
    /// Repeating while idle.
    IdlePulse,
    /// One-shot: restore the idle class after a pulse dropped it.
    WobbleReplay,
    /// One-shot: end of the first-interaction pulse.
    PulseEnd,
}

impl TimerSlot {
    pub const COUNT: usize = 4;

    pub const ALL: [TimerSlot; Self::COUNT] = [
        TimerSlot::Idle,
        TimerSlot::IdlePulse,
        TimerSlot::WobbleReplay,
        TimerSlot::PulseEnd,
    ];

    pub fn index(&self) -> usize {
        match self {
            TimerSlot::Idle => 0,
            TimerSlot::IdlePulse => 1,
            TimerSlot::WobbleReplay => 2,
            TimerSlot::PulseEnd => 3,
        }
    }

    pub fn repeats(&self) -> bool {
        matches!(self, TimerSlot::IdlePulse)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerCommand {
    Arm(TimerSlot),
    Cancel(TimerSlot),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionState {
    phase: Phase,
    pulse_active: bool,
    is_idle: bool,
    // Stays true through the short gap of a wobble replay, unlike is_idle.
    in_idle_period: bool,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            phase: Phase::Fresh,
            pulse_active: false,
            is_idle: false,
            in_idle_period: false,
        }
    }
}

impl InteractionState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn has_ever_interacted(&self) -> bool {
        self.phase == Phase::Interacted
    }

    pub fn pulse_active(&self) -> bool {
        self.pulse_active
    }

    pub fn is_idle(&self) -> bool {
        self.is_idle
    }

    /// Mount: start watching for inactivity.
    pub fn start(&mut self) -> Vec<TimerCommand> {
        vec![TimerCommand::Arm(TimerSlot::Idle)]
    }

    pub fn slider_moved(&mut self) -> Vec<TimerCommand> {
        let mut commands = self.activity();
        if self.phase == Phase::Fresh {
            debug!("first interaction, pulsing");
            self.phase = Phase::Interacted;
            self.pulse_active = true;
            commands.push(TimerCommand::Arm(TimerSlot::PulseEnd));
        }
        commands
    }

    /// Pointer movement or a key press anywhere on the page.
    pub fn activity(&mut self) -> Vec<TimerCommand> {
        self.is_idle = false;
        self.in_idle_period = false;
        vec![
            TimerCommand::Cancel(TimerSlot::IdlePulse),
            TimerCommand::Cancel(TimerSlot::WobbleReplay),
            TimerCommand::Arm(TimerSlot::Idle),
        ]
    }

    pub fn reset(&mut self) -> Vec<TimerCommand> {
        *self = Self::default();
        vec![
            TimerCommand::Cancel(TimerSlot::PulseEnd),
            TimerCommand::Cancel(TimerSlot::IdlePulse),
            TimerCommand::Cancel(TimerSlot::WobbleReplay),
            TimerCommand::Arm(TimerSlot::Idle),
        ]
    }

    pub fn timer_fired(&mut self, slot: TimerSlot) -> Vec<TimerCommand> {
        match slot {
            TimerSlot::Idle => {
                debug!("idle");
                self.is_idle = true;
                self.in_idle_period = true;
                vec![TimerCommand::Arm(TimerSlot::IdlePulse)]
            }
            TimerSlot::IdlePulse if self.in_idle_period => {
                self.is_idle = false;
                vec![TimerCommand::Arm(TimerSlot::WobbleReplay)]
            }
            TimerSlot::IdlePulse => Vec::new(),
            TimerSlot::WobbleReplay => {
                self.is_idle = self.in_idle_period;
                Vec::new()
            }
            TimerSlot::PulseEnd => {
                self.pulse_active = false;
                Vec::new()
            }
        }
    }

    /// Unmount: nothing may fire afterwards.
    pub fn teardown(&mut self) -> Vec<TimerCommand> {
        self.is_idle = false;
        self.in_idle_period = false;
        self.pulse_active = false;
        TimerSlot::ALL.iter().map(|slot| TimerCommand::Cancel(*slot)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_index_matches_position() {
        for (position, slot) in TimerSlot::ALL.into_iter().enumerate() {
            assert_eq!(slot.index(), position);
        }
    }

    #[test]
    fn starts_fresh_and_arms_idle_timer() {
        let mut state = InteractionState::default();
        assert_eq!(state.phase(), Phase::Fresh);
        assert!(!state.has_ever_interacted());
        assert_eq!(state.start(), vec![TimerCommand::Arm(TimerSlot::Idle)]);
    }

    #[test]
    fn first_slider_move_pulses_once() {
        let mut state = InteractionState::default();
        let commands = state.slider_moved();
        assert!(state.has_ever_interacted());
        assert!(state.pulse_active());
        assert!(commands.contains(&TimerCommand::Arm(TimerSlot::PulseEnd)));

        state.timer_fired(TimerSlot::PulseEnd);
        assert!(!state.pulse_active());

        let commands = state.slider_moved();
        assert!(!state.pulse_active());
        assert!(!commands.contains(&TimerCommand::Arm(TimerSlot::PulseEnd)));
        assert!(state.has_ever_interacted());
    }

    #[test]
    fn every_slider_move_rearms_idle_timer() {
        let mut state = InteractionState::default();
        for _ in 0..3 {
            let commands = state.slider_moved();
            let arms = commands
                .iter()
                .filter(|c| **c == TimerCommand::Arm(TimerSlot::Idle))
                .count();
            assert_eq!(arms, 1);
        }
    }

    #[test]
    fn idle_timeout_sets_idle_and_input_clears_it() {
        let mut state = InteractionState::default();
        state.start();
        let commands = state.timer_fired(TimerSlot::Idle);
        assert!(state.is_idle());
        assert_eq!(commands, vec![TimerCommand::Arm(TimerSlot::IdlePulse)]);

        let commands = state.activity();
        assert!(!state.is_idle());
        assert!(commands.contains(&TimerCommand::Cancel(TimerSlot::IdlePulse)));
        assert!(commands.contains(&TimerCommand::Cancel(TimerSlot::WobbleReplay)));
        assert!(commands.contains(&TimerCommand::Arm(TimerSlot::Idle)));
    }

    #[test]
    fn slider_move_while_idle_clears_idle() {
        let mut state = InteractionState::default();
        state.timer_fired(TimerSlot::Idle);
        state.slider_moved();
        assert!(!state.is_idle());
    }

    #[test]
    fn idle_pulse_replays_wobble_without_leaving_idle() {
        let mut state = InteractionState::default();
        state.timer_fired(TimerSlot::Idle);

        let commands = state.timer_fired(TimerSlot::IdlePulse);
        assert!(!state.is_idle());
        assert_eq!(commands, vec![TimerCommand::Arm(TimerSlot::WobbleReplay)]);

        state.timer_fired(TimerSlot::WobbleReplay);
        assert!(state.is_idle());
    }

    #[test]
    fn input_during_replay_gap_stays_active() {
        let mut state = InteractionState::default();
        state.timer_fired(TimerSlot::Idle);
        state.timer_fired(TimerSlot::IdlePulse);
        state.activity();
        state.timer_fired(TimerSlot::WobbleReplay);
        assert!(!state.is_idle());
        assert!(state.timer_fired(TimerSlot::IdlePulse).is_empty());
    }

    #[test]
    fn reset_returns_to_fresh_from_any_state() {
        let mut state = InteractionState::default();
        state.slider_moved();
        state.timer_fired(TimerSlot::Idle);
        let commands = state.reset();
        assert_eq!(state, InteractionState::default());
        assert!(commands.contains(&TimerCommand::Cancel(TimerSlot::PulseEnd)));
        assert!(commands.contains(&TimerCommand::Arm(TimerSlot::Idle)));

        // A fresh interaction pulses again after reset.
        state.slider_moved();
        assert!(state.pulse_active());
    }

    #[test]
    fn teardown_cancels_every_slot() {
        let mut state = InteractionState::default();
        state.slider_moved();
        state.timer_fired(TimerSlot::Idle);
        let commands = state.teardown();
        for slot in TimerSlot::ALL {
            assert!(commands.contains(&TimerCommand::Cancel(slot)));
        }
        assert!(!commands.iter().any(|c| matches!(c, TimerCommand::Arm(_))));
    }
}
