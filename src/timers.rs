//! Owned timer handles, one per slot.
//!
//! Arming a slot cancels whatever was pending in it. Every arm or cancel
//! bumps the slot's generation, and a firing is only honoured when it
//! carries the current generation, so callbacks already queued by the
//! browser before a cancel are dropped on the floor.

use crate::interaction::TimerSlot;

pub trait CancelHandle {
    fn cancel(self);
}

struct Slot<H> {
    generation: u32,
    handle: Option<H>,
}

impl<H> Default for Slot<H> {
    fn default() -> Self {
        Self { generation: 0, handle: None }
    }
}

pub struct TimerBank<H: CancelHandle> {
    slots: [Slot<H>; TimerSlot::COUNT],
}

impl<H: CancelHandle> Default for TimerBank<H> {
    fn default() -> Self {
        Self { slots: std::array::from_fn(|_| Slot::default()) }
    }
}

impl<H: CancelHandle> TimerBank<H> {
    /// `start` receives the generation the timer must report back with.
    pub fn arm(&mut self, slot: TimerSlot, start: impl FnOnce(u32) -> H) {
        self.cancel(slot);
        let entry = &mut self.slots[slot.index()];
        entry.handle = Some(start(entry.generation));
    }

    pub fn cancel(&mut self, slot: TimerSlot) {
        let entry = &mut self.slots[slot.index()];
        if let Some(handle) = entry.handle.take() {
            handle.cancel();
        }
        entry.generation = entry.generation.wrapping_add(1);
    }

    pub fn cancel_all(&mut self) {
        for slot in TimerSlot::ALL {
            self.cancel(slot);
        }
    }

    /// Whether a firing should be applied. One-shot slots are emptied.
    pub fn accept(&mut self, slot: TimerSlot, generation: u32) -> bool {
        let entry = &mut self.slots[slot.index()];
        if entry.generation != generation || entry.handle.is_none() {
            return false;
        }
        if !slot.repeats() {
            entry.handle = None;
        }
        true
    }

    #[cfg(test)]
    pub fn is_armed(&self, slot: TimerSlot) -> bool {
        self.slots[slot.index()].handle.is_some()
    }

    pub fn armed_count(&self) -> usize {
        self.slots.iter().filter(|entry| entry.handle.is_some()).count()
    }
}
