// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game configuration.
use std::time::Duration;

use memory_cards::Image;

/// Configuration errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The deck must have at least one pair.
    #[error("The number of pairs must be greater than zero")]
    NoPairs,
    /// There are not enough images for the requested pairs.
    #[error("Too many pairs {0}, the maximum is {max}", max = Image::COUNT)]
    TooManyPairs(usize),
    /// The mismatch delay must not be zero.
    #[error("The mismatch delay must be greater than zero")]
    ZeroDelay,
    /// The mismatch delay is above the maximum.
    #[error("The mismatch delay {0:?} is too long, the maximum is {max:?}", max = Config::MAX_MISMATCH_DELAY)]
    DelayTooLong(Duration),
}

/// Game configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of distinct images in a deck, each deck has twice as many cards.
    pub pairs: usize,
    /// How long two mismatched cards stay face up before they are hidden.
    pub mismatch_delay: Duration,
}

impl Config {
    /// The default number of pairs.
    pub const DEFAULT_PAIRS: usize = 8;
    /// The default mismatch delay.
    pub const DEFAULT_MISMATCH_DELAY: Duration = Duration::from_millis(1000);
    /// The longest allowed mismatch delay.
    pub const MAX_MISMATCH_DELAY: Duration = Duration::from_secs(10);

    /// Checks the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pairs == 0 {
            Err(ConfigError::NoPairs)
        } else if self.pairs > Image::COUNT {
            Err(ConfigError::TooManyPairs(self.pairs))
        } else if self.mismatch_delay.is_zero() {
            Err(ConfigError::ZeroDelay)
        } else if self.mismatch_delay > Self::MAX_MISMATCH_DELAY {
            Err(ConfigError::DelayTooLong(self.mismatch_delay))
        } else {
            Ok(())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pairs: Self::DEFAULT_PAIRS,
            mismatch_delay: Self::DEFAULT_MISMATCH_DELAY,
        }
    }
}
