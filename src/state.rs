//! Whole-widget state and the events that move it.

use log::{debug, info};

use crate::estimator::{clamp_age, Estimate, DEFAULT_AGE};
use crate::interaction::{InteractionState, TimerCommand, TimerSlot};
use crate::tooltip::{Topic, TooltipState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Mounted,
    SliderMoved(u8),
    Reset,
    Activity,
    /// Any key press counts as activity; Escape also dismisses the tooltip.
    KeyPressed { escape: bool },
    TimerFired(TimerSlot),
    OpenTooltip(Topic),
    CloseTooltip,
    Unmounted,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CalculatorState {
    age: u8,
    interaction: InteractionState,
    tooltip: TooltipState,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            age: DEFAULT_AGE,
            interaction: InteractionState::default(),
            tooltip: TooltipState::default(),
        }
    }
}

impl CalculatorState {
    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    pub fn estimate(&self) -> Estimate {
        Estimate::for_age(self.age)
    }

    pub fn apply(&mut self, action: Action) -> Vec<TimerCommand> {
        match action {
            Action::Mounted => self.interaction.start(),
            Action::SliderMoved(age) => {
                self.age = clamp_age(age);
                debug!("age set to {}", self.age);
                self.interaction.slider_moved()
            }
            Action::Reset => {
                info!("Resetting calculator");
                self.age = DEFAULT_AGE;
                self.interaction.reset()
            }
            Action::Activity => self.interaction.activity(),
            Action::KeyPressed { escape } => {
                if escape {
                    self.tooltip.close();
                }
                self.interaction.activity()
            }
            Action::TimerFired(slot) => self.interaction.timer_fired(slot),
            Action::OpenTooltip(topic) => {
                self.tooltip.open(topic);
                Vec::new()
            }
            Action::CloseTooltip => {
                self.tooltip.close();
                Vec::new()
            }
            Action::Unmounted => {
                self.tooltip.close();
                self.interaction.teardown()
            }
        }
    }
}
