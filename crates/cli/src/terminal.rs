// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Terminal I/O.
use anyhow::Result;
use crossterm::{
    cursor,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    execute, queue,
    style::{self, Stylize},
    terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use std::io;
use tokio::time::{self, Instant};

use memory_core::{
    Config,
    badge::BadgeState,
    session::{IgnoreReason, SelectOutcome, Session},
};

/// Keys used to pick cards, `n` and `q` are reserved for commands.
const CARD_KEYS: &[u8; 24] = b"abcdefghijklmoprstuvwxyz";

/// Runs the terminal loop.
pub async fn run(config: Config) -> Result<()> {
    let mut session = Session::new(config, BadgeState::default());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;

    let res = game_loop(&mut stdout, &mut session).await;

    execute!(
        stdout,
        Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        cursor::Show
    )?;
    disable_raw_mode()?;

    println!("{} wins", session.wins());

    res
}

async fn game_loop(stdout: &mut io::Stdout, session: &mut Session<BadgeState>) -> Result<()> {
    // The session clock starts with the game.
    let start = Instant::now();
    let mut status = String::new();

    print_session(stdout, session, &status)?;

    let mut reader = EventStream::new();
    loop {
        let timer = session.pending_timer();
        let deadline = start + timer.map(|t| t.deadline()).unwrap_or_default();

        tokio::select! {
            // Hide the mismatched cards.
            _ = time::sleep_until(deadline), if timer.is_some() => {
                if let Some(handle) = timer {
                    if session.fire(handle) {
                        status.clear();
                    }
                }
            },
            // We have received an event form the terminal.
            res = reader.next() => match res {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('n') => {
                        session.new_game();
                        status = "New game".to_string();
                    }
                    KeyCode::Char(c) => {
                        let card = key_index(c).and_then(|idx| session.cards().nth(idx));
                        if let Some(card) = card {
                            let outcome = session.select(card.id, start.elapsed());
                            status = outcome_message(&outcome);
                        }
                    }
                    _ => {}
                },
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        };

        print_session(stdout, session, &status)?;
    }

    Ok(())
}

/// Returns the key for the card at the given position.
fn card_key(idx: usize) -> Option<char> {
    CARD_KEYS.get(idx).map(|&k| k as char)
}

/// Returns the position of the card for the given key.
fn key_index(key: char) -> Option<usize> {
    CARD_KEYS.iter().position(|&k| k as char == key)
}

fn outcome_message(outcome: &SelectOutcome) -> String {
    match outcome {
        SelectOutcome::Picked => "Pick another card".to_string(),
        SelectOutcome::Matched => "Match!".to_string(),
        SelectOutcome::Mismatched(_) => "No match".to_string(),
        SelectOutcome::Won { wins } => format!("You won! {wins} wins"),
        SelectOutcome::Ignored(IgnoreReason::Locked) => "Wait...".to_string(),
        SelectOutcome::Ignored(IgnoreReason::AlreadyMatched) => "Already matched".to_string(),
        SelectOutcome::Ignored(IgnoreReason::AlreadyPicked) => "Already picked".to_string(),
        SelectOutcome::Ignored(IgnoreReason::UnknownCard) => String::new(),
    }
}

fn print_session(
    w: &mut impl io::Write,
    session: &Session<BadgeState>,
    status: &str,
) -> Result<()> {
    queue!(w, Clear(ClearType::All), cursor::MoveTo(0, 0))?;

    // Header with wins and badge.
    let badge = if session.badge().is_set() { " *" } else { "" };
    let header = format!(
        "{} wins{badge}   {}/{} pairs",
        session.wins(),
        session.matched_pairs(),
        session.pairs()
    );
    queue!(w, style::PrintStyledContent(header.as_str().dark_green()))?;

    // Cards grid, a matched or picked card shows its image.
    let cols = (session.deck().len() as f32).sqrt().ceil().max(1.0) as usize;
    let mut row = 2;
    for (idx, card) in session.cards().enumerate() {
        let col = idx % cols;
        if idx > 0 && col == 0 {
            row += 2;
        }

        let key = card_key(idx).unwrap_or(' ');
        let face = if card.selected {
            card.image.symbol()
        } else {
            "▒"
        };

        let text = format!("[{key} {face}]");
        let styled = if card.matched {
            text.as_str().dark_grey()
        } else if card.selected {
            text.as_str().yellow()
        } else {
            text.as_str().white()
        };

        queue!(
            w,
            cursor::MoveTo(col as u16 * 7, row),
            style::PrintStyledContent(styled)
        )?;
    }

    queue!(
        w,
        cursor::MoveTo(0, row + 2),
        style::Print(status),
        cursor::MoveTo(0, row + 3),
        style::PrintStyledContent("keys: pick card, n: new game, q: quit".dark_grey())
    )?;

    w.flush()?;

    Ok(())
}
