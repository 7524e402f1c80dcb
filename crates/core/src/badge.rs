// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Badge notifications.

/// An indicator that is set when a deck is completed and cleared on a new game.
///
/// Notifications are fire and forget, implementations must not call back into
/// the session.
pub trait Badge {
    /// Sets the badge after a win.
    fn set_badge(&mut self);

    /// Clears the badge when a new game starts.
    fn clear_badge(&mut self);
}

/// A badge that ignores notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBadge;

impl Badge for NoBadge {
    fn set_badge(&mut self) {}

    fn clear_badge(&mut self) {}
}

/// A badge that keeps track of its state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BadgeState {
    is_set: bool,
    set_count: u32,
    clear_count: u32,
}

impl BadgeState {
    /// Checks if the badge is currently set.
    pub fn is_set(&self) -> bool {
        self.is_set
    }

    /// How many times the badge has been set.
    pub fn set_count(&self) -> u32 {
        self.set_count
    }

    /// How many times the badge has been cleared.
    pub fn clear_count(&self) -> u32 {
        self.clear_count
    }
}

impl Badge for BadgeState {
    fn set_badge(&mut self) {
        self.is_set = true;
        self.set_count += 1;
    }

    fn clear_badge(&mut self) {
        self.is_set = false;
        self.clear_count += 1;
    }
}
