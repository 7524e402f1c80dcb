// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game session state.
use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};
use std::time::Duration;

use memory_cards::{CardId, Deck, Image};

use crate::{
    badge::Badge,
    config::Config,
    timer::{Timer, TimerHandle},
};

/// The session phase as seen by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Zero or one card picked, the session accepts selections.
    Idle,
    /// Two mismatched cards are face up, selections are ignored until the
    /// mismatch timer fires.
    Locked,
}

/// Why a selection has been ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The session is waiting for the mismatch timer.
    Locked,
    /// The card is not in the current deck.
    UnknownCard,
    /// The card pair has already been found.
    AlreadyMatched,
    /// The card is already face up.
    AlreadyPicked,
}

/// The result of a card selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The selection didn't change the session state.
    Ignored(IgnoreReason),
    /// The card is the first of a pair.
    Picked,
    /// The two picked cards have the same image.
    Matched,
    /// The two picked cards are different, they stay face up until the timer
    /// fires.
    Mismatched(TimerHandle),
    /// The last pair has been found and a new deck has been dealt.
    Won {
        /// The wins count after this win.
        wins: u32,
    },
}

/// A card as seen by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardView {
    /// The card id.
    pub id: CardId,
    /// The card image.
    pub image: Image,
    /// The card is face up, either picked or matched.
    pub selected: bool,
    /// The card pair has been found.
    pub matched: bool,
}

/// A memory game session.
///
/// The session owns all the game state, every operation that changes the
/// state resolves picked cards and checks for a win before returning, so the
/// view layer never observes two unresolved picks or a completed deck.
#[derive(Debug)]
pub struct Session<B> {
    config: Config,
    badge: B,
    rng: StdRng,
    deck: Deck,
    pick_one: Option<CardId>,
    pick_two: Option<CardId>,
    disabled: bool,
    wins: u32,
    timer: Timer,
}

/// The result of resolving two picked cards.
enum Resolution {
    Matched,
    Mismatched(TimerHandle),
}

impl<B: Badge> Session<B> {
    /// Creates a new session with a shuffled deck.
    ///
    /// Panics if the configuration is not valid.
    pub fn new(config: Config, badge: B) -> Self {
        Self::with_rng(config, badge, StdRng::from_os_rng())
    }

    /// Creates a new session with user initialized randomness.
    pub fn with_rng(config: Config, badge: B, mut rng: StdRng) -> Self {
        if let Err(e) = config.validate() {
            panic!("Invalid session config: {e}");
        }

        let deck = Deck::new_and_shuffled(config.pairs, &mut rng);
        Self {
            config,
            badge,
            rng,
            deck,
            pick_one: None,
            pick_two: None,
            disabled: false,
            wins: 0,
            timer: Timer::default(),
        }
    }

    /// Handles a click on a card at time `now` on the session clock.
    ///
    /// Selections of unknown, matched or already picked cards and selections
    /// while the session is locked are ignored.
    pub fn select(&mut self, id: CardId, now: Duration) -> SelectOutcome {
        if self.disabled {
            return SelectOutcome::Ignored(IgnoreReason::Locked);
        }

        let Some(card) = self.deck.get(id) else {
            return SelectOutcome::Ignored(IgnoreReason::UnknownCard);
        };

        if card.is_matched() {
            return SelectOutcome::Ignored(IgnoreReason::AlreadyMatched);
        }

        if self.is_picked(id) {
            return SelectOutcome::Ignored(IgnoreReason::AlreadyPicked);
        }

        debug!("Picked card {card}");

        if self.pick_one.is_none() {
            self.pick_one = Some(id);
        } else {
            self.pick_two = Some(id);
        }

        let resolution = self.check_resolve(now);
        if self.check_win() {
            return SelectOutcome::Won { wins: self.wins };
        }

        match resolution {
            Some(Resolution::Matched) => SelectOutcome::Matched,
            Some(Resolution::Mismatched(handle)) => SelectOutcome::Mismatched(handle),
            None => SelectOutcome::Picked,
        }
    }

    /// Fires the mismatch timer if it has expired at time `now`.
    ///
    /// Returns true if the timer fired.
    pub fn tick(&mut self, now: Duration) -> bool {
        if let Some(handle) = self.timer.take_expired(now) {
            debug!("Mismatch {handle} expired");
            self.end_turn();
            true
        } else {
            false
        }
    }

    /// Fires a timer scheduled by the caller.
    ///
    /// Returns false, without changing the state, if the timer has been
    /// cancelled by a new deck or superseded by another mismatch.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.timer.take_if(handle) {
            debug!("Mismatch {handle} fired");
            self.end_turn();
            true
        } else {
            debug!("Ignoring stale {handle}");
            false
        }
    }

    /// Starts a new game, resets the wins count and deals a new deck.
    pub fn new_game(&mut self) {
        self.badge.clear_badge();
        self.wins = 0;
        self.end_turn();
        self.deal();

        info!("New game started with {} cards", self.deck.len());
    }

    /// The number of decks completed since the last new game.
    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// The session phase.
    pub fn phase(&self) -> Phase {
        if self.disabled {
            Phase::Locked
        } else {
            Phase::Idle
        }
    }

    /// Checks if selections are ignored.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Iterates the cards in deck order.
    pub fn cards(&self) -> impl Iterator<Item = CardView> + '_ {
        self.deck.iter().map(|card| CardView {
            id: card.id(),
            image: card.image(),
            selected: card.is_matched() || self.is_picked(card.id()),
            matched: card.is_matched(),
        })
    }

    /// The current deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The picked cards.
    pub fn picks(&self) -> (Option<CardId>, Option<CardId>) {
        (self.pick_one, self.pick_two)
    }

    /// The number of pairs found in the current deck.
    pub fn matched_pairs(&self) -> usize {
        self.deck.matched_pairs()
    }

    /// The number of pairs in the current deck.
    pub fn pairs(&self) -> usize {
        self.deck.len() / 2
    }

    /// The pending mismatch timer if any.
    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.timer.pending()
    }

    /// The session configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The badge collaborator.
    pub fn badge(&self) -> &B {
        &self.badge
    }

    fn is_picked(&self, id: CardId) -> bool {
        self.pick_one == Some(id) || self.pick_two == Some(id)
    }

    fn check_resolve(&mut self, now: Duration) -> Option<Resolution> {
        let (Some(one), Some(two)) = (self.pick_one, self.pick_two) else {
            return None;
        };

        let image_one = self.deck.get(one).map(|c| c.image());
        let image_two = self.deck.get(two).map(|c| c.image());

        match (image_one, image_two) {
            (Some(i1), Some(i2)) if i1 == i2 => {
                self.deck.mark_matched(i1);
                self.end_turn();
                debug!("Matched {} pair", i1.name());
                Some(Resolution::Matched)
            }
            (Some(_), Some(_)) => {
                self.disabled = true;
                let handle = self.timer.schedule(now, self.config.mismatch_delay);
                debug!("Mismatch, scheduled {handle}");
                Some(Resolution::Mismatched(handle))
            }
            // Picks always come from the current deck.
            _ => {
                self.end_turn();
                None
            }
        }
    }

    fn check_win(&mut self) -> bool {
        if !self.deck.all_matched() {
            return false;
        }

        self.wins += 1;
        info!("You've just won! Wins: {}", self.wins);

        self.end_turn();
        self.badge.set_badge();
        self.deal();

        true
    }

    fn end_turn(&mut self) {
        self.pick_one = None;
        self.pick_two = None;
        self.disabled = false;
    }

    fn deal(&mut self) {
        if let Some(handle) = self.timer.cancel() {
            debug!("Cancelled {handle}");
        }

        self.deck = Deck::new_and_shuffled(self.config.pairs, &mut self.rng);
        debug_assert!(self.deck.is_paired());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badge::BadgeState;
    use ahash::HashSet;
    use memory_cards::Card;

    const DELAY: Duration = Duration::from_millis(1000);

    fn new_session(pairs: usize) -> Session<BadgeState> {
        let config = Config {
            pairs,
            mismatch_delay: DELAY,
        };
        Session::with_rng(config, BadgeState::default(), StdRng::seed_from_u64(13))
    }

    // Creates a session with a deck with the given images order.
    fn session_with_deck(images: &[u8]) -> (Session<BadgeState>, Vec<CardId>) {
        let cards = images
            .iter()
            .map(|&i| Card::new(Image::new(i)))
            .collect::<Vec<_>>();
        let ids = cards.iter().map(|c| c.id()).collect();

        let mut session = new_session(images.len() / 2);
        session.deck = Deck::from_cards(cards);
        (session, ids)
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn new_session_state() {
        let session = new_session(8);
        assert_eq!(session.wins(), 0);
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.deck().len(), 16);
        assert_eq!(session.config().pairs, 8);
        assert_eq!(session.config().mismatch_delay, DELAY);
        assert!(session.deck().is_paired());
        assert_eq!(session.picks(), (None, None));
        assert!(session.cards().all(|c| !c.selected));
    }

    #[test]
    #[should_panic]
    fn invalid_config() {
        let config = Config {
            pairs: 0,
            ..Default::default()
        };
        let _ = Session::new(config, BadgeState::default());
    }

    #[test]
    fn play_full_deck() {
        // A1, B1, A2, B2
        let (mut session, ids) = session_with_deck(&[0, 1, 0, 1]);

        assert_eq!(session.select(ids[0], ms(0)), SelectOutcome::Picked);
        assert_eq!(session.picks(), (Some(ids[0]), None));

        assert_eq!(session.select(ids[2], ms(100)), SelectOutcome::Matched);
        assert_eq!(session.picks(), (None, None));
        assert!(!session.is_disabled());
        assert_eq!(session.matched_pairs(), 1);

        assert_eq!(session.select(ids[1], ms(200)), SelectOutcome::Picked);
        assert_eq!(
            session.select(ids[3], ms(300)),
            SelectOutcome::Won { wins: 1 }
        );

        assert_eq!(session.wins(), 1);
        assert_eq!(session.badge().set_count(), 1);
        assert!(session.badge().is_set());

        // A fresh deck has been dealt.
        assert_eq!(session.deck().len(), 4);
        assert!(session.deck().iter().all(|c| !ids.contains(&c.id())));
        assert!(session.deck().iter().all(|c| !c.is_matched()));
        assert_eq!(session.picks(), (None, None));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn match_flags_pair_only() {
        let (mut session, ids) = session_with_deck(&[0, 1, 2, 1, 0, 2]);

        session.select(ids[1], ms(0));
        assert_eq!(session.select(ids[3], ms(10)), SelectOutcome::Matched);

        let matched = session
            .deck()
            .iter()
            .filter(|c| c.is_matched())
            .map(|c| c.id())
            .collect::<Vec<_>>();
        assert_eq!(matched, vec![ids[1], ids[3]]);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.pending_timer().is_none());

        // The matched pair stays face up after the picks are cleared.
        assert_eq!(session.picks(), (None, None));
        let selected = session
            .cards()
            .filter(|c| c.selected)
            .map(|c| c.id)
            .collect::<Vec<_>>();
        assert_eq!(selected, vec![ids[1], ids[3]]);
        assert!(session.cards().filter(|c| c.selected).all(|c| c.matched));
    }

    #[test]
    fn mismatch_locks_until_timer() {
        let (mut session, ids) = session_with_deck(&[0, 1, 0, 1]);

        session.select(ids[0], ms(0));
        let outcome = session.select(ids[1], ms(500));
        let SelectOutcome::Mismatched(handle) = outcome else {
            panic!("Unexpected outcome {outcome:?}");
        };

        assert_eq!(handle.deadline(), ms(1500));
        assert_eq!(session.phase(), Phase::Locked);
        assert_eq!(session.picks(), (Some(ids[0]), Some(ids[1])));

        // Both cards are face up while locked.
        let selected = session
            .cards()
            .filter(|c| c.selected)
            .map(|c| c.id)
            .collect::<Vec<_>>();
        assert_eq!(selected, vec![ids[0], ids[1]]);

        // Selections are ignored while locked.
        assert_eq!(
            session.select(ids[2], ms(600)),
            SelectOutcome::Ignored(IgnoreReason::Locked)
        );

        assert!(!session.tick(ms(1499)));
        assert!(session.is_disabled());

        assert!(session.tick(ms(1500)));
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.picks(), (None, None));
        assert!(session.deck().iter().all(|c| !c.is_matched()));

        // The timer fires only once.
        assert!(!session.tick(ms(5000)));
    }

    #[test]
    fn mismatch_late_on_the_clock() {
        let (mut session, ids) = session_with_deck(&[0, 1, 0, 1]);
        let late = Duration::MAX - ms(10);

        session.select(ids[0], late);
        let SelectOutcome::Mismatched(handle) = session.select(ids[1], late) else {
            panic!("Expected mismatch");
        };

        // The deadline saturates instead of overflowing.
        assert_eq!(handle.deadline(), Duration::MAX);
        assert!(session.tick(Duration::MAX));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn fire_scheduled_timer() {
        let (mut session, ids) = session_with_deck(&[0, 1, 0, 1]);

        session.select(ids[0], ms(0));
        let SelectOutcome::Mismatched(handle) = session.select(ids[3], ms(0)) else {
            panic!("Expected mismatch");
        };

        assert!(session.fire(handle));
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.fire(handle));
    }

    #[test]
    fn new_game_cancels_timer() {
        let (mut session, ids) = session_with_deck(&[0, 1, 0, 1]);

        session.select(ids[0], ms(0));
        let SelectOutcome::Mismatched(handle) = session.select(ids[1], ms(0)) else {
            panic!("Expected mismatch");
        };

        session.new_game();
        assert!(session.pending_timer().is_none());
        assert_eq!(session.phase(), Phase::Idle);

        // Pick a card in the new deck, the old timer must not clear it.
        let card = session.cards().next().unwrap().id;
        assert_eq!(session.select(card, ms(100)), SelectOutcome::Picked);

        assert!(!session.fire(handle));
        assert!(!session.tick(ms(10_000)));
        assert_eq!(session.picks(), (Some(card), None));
    }

    #[test]
    fn new_mismatch_supersedes_timer() {
        let (mut session, ids) = session_with_deck(&[0, 1, 2, 0, 1, 2]);

        session.select(ids[0], ms(0));
        let SelectOutcome::Mismatched(h1) = session.select(ids[1], ms(0)) else {
            panic!("Expected mismatch");
        };
        assert!(session.tick(ms(1000)));

        session.select(ids[0], ms(1100));
        let SelectOutcome::Mismatched(h2) = session.select(ids[2], ms(1200)) else {
            panic!("Expected mismatch");
        };

        assert_ne!(h1, h2);
        assert!(!session.fire(h1));
        assert!(session.is_disabled());
        assert!(session.fire(h2));
    }

    #[test]
    fn win_on_last_pair() {
        let (mut session, ids) = session_with_deck(&[0, 1, 2, 2, 1, 0]);
        session.deck.mark_matched(Image::new(0));
        session.deck.mark_matched(Image::new(1));

        session.select(ids[2], ms(0));
        assert_eq!(
            session.select(ids[3], ms(0)),
            SelectOutcome::Won { wins: 1 }
        );

        assert_eq!(session.wins(), 1);
        assert_eq!(session.badge().set_count(), 1);
        assert_eq!(session.deck().len(), 6);
        assert_eq!(session.matched_pairs(), 0);
        assert!(session.pending_timer().is_none());

        // Further events don't count the same deck again.
        assert!(!session.tick(ms(10_000)));
        assert_eq!(session.wins(), 1);
        assert_eq!(session.badge().set_count(), 1);
    }

    #[test]
    fn wins_streak() {
        let mut session = new_session(3);

        for round in 1..=3 {
            // Play a perfect game by picking cards by image.
            for image in Image::images(3) {
                let pair = session
                    .cards()
                    .filter(|c| c.image == image)
                    .map(|c| c.id)
                    .collect::<Vec<_>>();
                assert_eq!(pair.len(), 2);

                session.select(pair[0], ms(0));
                session.select(pair[1], ms(0));
            }

            assert_eq!(session.wins(), round);
        }

        assert_eq!(session.badge().set_count(), 3);
    }

    #[test]
    fn new_game_reset() {
        let (mut session, ids) = session_with_deck(&[0, 1, 0, 1]);
        session.wins = 5;
        session.select(ids[0], ms(0));

        session.new_game();

        assert_eq!(session.wins(), 0);
        assert_eq!(session.picks(), (None, None));
        assert!(!session.is_disabled());
        assert_eq!(session.badge().clear_count(), 1);
        assert!(!session.badge().is_set());
        assert!(session.deck().iter().all(|c| !ids.contains(&c.id())));
        assert!(session.deck().is_paired());
    }

    #[test]
    fn ignored_selections() {
        let (mut session, ids) = session_with_deck(&[0, 1, 2, 0, 1, 2]);

        // Picking the same card twice.
        session.select(ids[0], ms(0));
        assert_eq!(
            session.select(ids[0], ms(0)),
            SelectOutcome::Ignored(IgnoreReason::AlreadyPicked)
        );
        assert_eq!(session.picks(), (Some(ids[0]), None));

        // Picking a matched card.
        session.select(ids[3], ms(0));
        assert_eq!(
            session.select(ids[0], ms(0)),
            SelectOutcome::Ignored(IgnoreReason::AlreadyMatched)
        );

        // Picking a card from an old deck.
        let other = Card::new(Image::new(1));
        assert_eq!(
            session.select(other.id(), ms(0)),
            SelectOutcome::Ignored(IgnoreReason::UnknownCard)
        );

        assert_eq!(session.picks(), (None, None));
        assert_eq!(session.matched_pairs(), 1);
    }

    #[test]
    fn ids_unique_across_decks() {
        let mut session = new_session(8);
        let mut ids = HashSet::default();

        for _ in 0..5 {
            for card in session.cards() {
                assert!(ids.insert(card.id));
            }
            session.new_game();
        }
    }
}
