// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Memory game core types shared by the front ends.
//!
//! A [Session](session::Session) owns the deck, the pending selections and
//! the wins counter, front ends feed it clicks and timer events:
//!
//! ```
//! # use std::time::Duration;
//! # use memory_core::{badge::NoBadge, session::{Session, SelectOutcome}, Config};
//! let mut session = Session::new(Config::default(), NoBadge);
//! let first = session.cards().next().unwrap().id;
//! let outcome = session.select(first, Duration::ZERO);
//! assert!(matches!(outcome, SelectOutcome::Picked));
//! assert_eq!(session.wins(), 0);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod badge;
pub mod config;
pub use config::{Config, ConfigError};
pub mod session;
pub mod timer;

pub use memory_cards::{Card, CardId, Deck, Image};
