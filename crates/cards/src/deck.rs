// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Memory cards definitions.
use ahash::AHashMap;
use rand::prelude::*;
use std::{fmt, sync::atomic};

/// Symbols and names for each image in the set.
const IMAGES: [(&str, &str); Image::COUNT] = [
    ("★", "star"),
    ("♥", "heart"),
    ("♦", "diamond"),
    ("♣", "club"),
    ("♠", "spade"),
    ("☀", "sun"),
    ("☂", "umbrella"),
    ("☘", "shamrock"),
    ("⚓", "anchor"),
    ("♫", "notes"),
    ("✿", "flower"),
    ("☾", "moon"),
];

/// A unique card identifier.
///
/// Identifiers are never reused within a process so that views can use them
/// as stable keys across decks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(u32);

impl CardId {
    /// Create a new unique card id.
    pub fn new_id() -> CardId {
        static LAST_ID: atomic::AtomicU32 = atomic::AtomicU32::new(1);
        CardId(LAST_ID.fetch_add(1, atomic::Ordering::Relaxed))
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The image shown on a card face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Image(u8);

impl Image {
    /// The number of images in the set.
    pub const COUNT: usize = 12;

    /// Creates an image given its index in the set.
    ///
    /// Panics if the index is not less than [Image::COUNT].
    pub fn new(index: u8) -> Self {
        assert!((index as usize) < Self::COUNT, "Invalid image index {index}");
        Self(index)
    }

    /// Returns the first `count` images of the set.
    pub fn images(count: usize) -> impl DoubleEndedIterator<Item = Image> {
        (0..count.min(Self::COUNT) as u8).map(Image)
    }

    /// This image index in the set.
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// The symbol used to draw this image.
    pub fn symbol(&self) -> &'static str {
        IMAGES[self.index()].0
    }

    /// The image name.
    pub fn name(&self) -> &'static str {
        IMAGES[self.index()].1
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A memory card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    id: CardId,
    image: Image,
    matched: bool,
}

impl Card {
    /// Creates a new unmatched card with a fresh id.
    pub fn new(image: Image) -> Self {
        Self {
            id: CardId::new_id(),
            image,
            matched: false,
        }
    }

    /// This card unique id.
    pub fn id(&self) -> CardId {
        self.id
    }

    /// The card image.
    pub fn image(&self) -> Image {
        self.image
    }

    /// Checks if this card pair has been found.
    pub fn is_matched(&self) -> bool {
        self.matched
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.image, self.id)
    }
}

/// A memory cards deck.
///
/// The deck holds two cards for each image, the only change allowed once the
/// deck has been created is flagging cards as matched.
#[derive(Debug, Default, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Creates a new shuffled deck with two cards for each of the first `pairs`
    /// images.
    ///
    /// Panics if `pairs` is greater than [Image::COUNT].
    pub fn new_and_shuffled<R: Rng + ?Sized>(pairs: usize, rng: &mut R) -> Self {
        assert!(pairs <= Image::COUNT, "Too many pairs {pairs}");

        let mut cards = Image::images(pairs)
            .flat_map(|image| [Card::new(image), Card::new(image)])
            .collect::<Vec<_>>();
        cards.shuffle(rng);
        Self { cards }
    }

    /// Creates a deck with the given cards in the given order.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// The number of cards in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterates the cards in deck order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Returns a card given its id.
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Flags all cards with the given image as matched, returns the number of
    /// cards that changed.
    pub fn mark_matched(&mut self, image: Image) -> usize {
        let mut count = 0;
        for card in self.cards.iter_mut().filter(|c| c.image == image) {
            if !card.matched {
                card.matched = true;
                count += 1;
            }
        }

        count
    }

    /// Checks if the deck is not empty and all cards have been matched.
    pub fn all_matched(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.matched)
    }

    /// The number of pairs that have been matched.
    pub fn matched_pairs(&self) -> usize {
        self.cards.iter().filter(|c| c.matched).count() / 2
    }

    /// Checks that every image in the deck appears exactly twice.
    pub fn is_paired(&self) -> bool {
        let mut counts = AHashMap::<Image, usize>::with_capacity(self.cards.len() / 2);
        for card in &self.cards {
            *counts.entry(card.image).or_default() += 1;
        }

        counts.values().all(|&n| n == 2)
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
