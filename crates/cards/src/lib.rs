// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Memory game cards types.
//!
//! This crate defines the cards used by the memory game, each card shows one
//! of a fixed set of [Image]s and has a process wide unique [CardId]:
//!
//! ```
//! # use memory_cards::{Card, Image};
//! let c1 = Card::new(Image::new(0));
//! let c2 = Card::new(Image::new(0));
//! assert_eq!(c1.image(), c2.image());
//! assert_ne!(c1.id(), c2.id());
//! ```
//!
//! and a [Deck] type with the shuffler, a deck holds two cards for each image
//! in random order:
//!
//! ```
//! # use memory_cards::Deck;
//! let deck = Deck::new_and_shuffled(4, &mut rand::rng());
//! assert_eq!(deck.len(), 8);
//! assert!(deck.is_paired());
//! assert!(!deck.all_matched());
//! ```
//!
//! The **`egui`** feature exports the [paint_card](egui::paint_card) function
//! to draw a card face or back.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod deck;
pub use deck::{Card, CardId, Deck, Image};

#[cfg(feature = "egui")]
pub mod egui;
