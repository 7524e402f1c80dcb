// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game view.
use eframe::egui::*;
use log::{debug, info};
use std::time::Duration;

use memory_cards::egui::paint_card;
use memory_core::{
    Config,
    badge::BadgeState,
    session::{Phase, SelectOutcome, Session},
};

/// The game view with the wins header and the cards grid.
pub struct GameView {
    session: Session<BadgeState>,
    title_wins: Option<u32>,
}

impl GameView {
    const TEXT_COLOR: Color32 = Color32::from_rgb(20, 150, 20);
    const TEXT_FONT: FontId = FontId::new(18.0, FontFamily::Monospace);
    const BADGE_COLOR: Color32 = Color32::from_rgb(230, 190, 40);
    const BG_COLOR: Color32 = Color32::from_gray(30);
    const CARD_GAP: f32 = 10.0;

    /// Creates a new [GameView] with a freshly shuffled deck.
    pub fn new(ctx: &Context, config: Config) -> Self {
        ctx.request_repaint();

        Self {
            session: Session::new(config, BadgeState::default()),
            title_wins: None,
        }
    }

    /// Process a view update.
    pub fn update(&mut self, ctx: &Context) {
        // Egui input time is the seconds since the app started.
        let now = Duration::from_secs_f64(ctx.input(|i| i.time));
        self.session.tick(now);

        self.update_title(ctx);

        TopBottomPanel::top("header").show(ctx, |ui| {
            self.paint_header(ui);
        });

        CentralPanel::default()
            .frame(Frame::NONE.fill(Self::BG_COLOR))
            .show(ctx, |ui| {
                self.paint_grid(ui, now);
            });

        // Wake up when the mismatched cards must be hidden.
        if let Some(timer) = self.session.pending_timer() {
            ctx.request_repaint_after(timer.remaining(now));
        }
    }

    fn update_title(&mut self, ctx: &Context) {
        let wins = self.session.wins();
        if self.title_wins != Some(wins) {
            ctx.send_viewport_cmd(ViewportCommand::Title(format!("{wins} wins")));
            self.title_wins = Some(wins);
        }
    }

    fn paint_header(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("{} wins", self.session.wins()))
                    .font(Self::TEXT_FONT)
                    .color(Self::TEXT_COLOR),
            );

            if self.session.badge().is_set() {
                ui.label(
                    RichText::new("★")
                        .font(Self::TEXT_FONT)
                        .color(Self::BADGE_COLOR),
                )
                .on_hover_text("Deck completed");
            }

            ui.separator();
            ui.label(
                RichText::new(format!(
                    "{}/{} pairs",
                    self.session.matched_pairs(),
                    self.session.pairs()
                ))
                .font(Self::TEXT_FONT),
            )
            .on_hover_text(format!(
                "Mismatched cards stay up for {} ms",
                self.session.config().mismatch_delay.as_millis()
            ));

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui
                    .button(RichText::new("New Game").font(Self::TEXT_FONT))
                    .clicked()
                {
                    self.session.new_game();
                }
            });
        });
    }

    fn paint_grid(&mut self, ui: &mut Ui, now: Duration) {
        let cards = self.session.cards().collect::<Vec<_>>();
        let layout = GridLayout::new(
            cards.len(),
            ui.available_rect_before_wrap().shrink(Self::CARD_GAP),
            Self::CARD_GAP,
        );

        let locked = self.session.phase() == Phase::Locked;
        let mut clicked = None;

        for (idx, card) in cards.iter().enumerate() {
            let rect = layout.card_rect(idx);
            let response = ui.interact(rect, ui.id().with(card.id), Sense::click());

            paint_card(ui.painter(), rect, card.image, card.selected);

            if !card.selected && !locked && response.hovered() {
                ui.painter().rect_stroke(
                    rect,
                    6.0,
                    Stroke::new(2.0, Self::TEXT_COLOR),
                    StrokeKind::Outside,
                );
            }

            if response.clicked() {
                clicked = Some(card.id);
            }
        }

        if let Some(id) = clicked {
            match self.session.select(id, now) {
                SelectOutcome::Ignored(reason) => debug!("Ignored click on card {id}: {reason:?}"),
                SelectOutcome::Won { wins } => info!("Deck completed, {wins} wins"),
                _ => {}
            }

            ui.ctx().request_repaint();
        }
    }
}

/// Cards positions in a grid centered in a rectangle.
#[derive(Debug)]
struct GridLayout {
    origin: Pos2,
    cols: usize,
    card_size: Vec2,
    gap: f32,
}

impl GridLayout {
    /// Cards height to width ratio.
    const CARD_RATIO: f32 = 1.4;

    fn new(count: usize, rect: Rect, gap: f32) -> Self {
        let cols = ((count as f32).sqrt().ceil() as usize).max(1);
        let rows = count.div_ceil(cols).max(1);

        let cell_width = (rect.width() - gap * (cols - 1) as f32) / cols as f32;
        let cell_height = (rect.height() - gap * (rows - 1) as f32) / rows as f32;

        let width = cell_width.min(cell_height / Self::CARD_RATIO).max(0.0);
        let card_size = vec2(width, width * Self::CARD_RATIO);

        let grid_size = vec2(
            card_size.x * cols as f32 + gap * (cols - 1) as f32,
            card_size.y * rows as f32 + gap * (rows - 1) as f32,
        );

        Self {
            origin: rect.center() - grid_size / 2.0,
            cols,
            card_size,
            gap,
        }
    }

    fn card_rect(&self, idx: usize) -> Rect {
        let (row, col) = (idx / self.cols, idx % self.cols);
        let offset = vec2(
            col as f32 * (self.card_size.x + self.gap),
            row as f32 * (self.card_size.y + self.gap),
        );

        Rect::from_min_size(self.origin + offset, self.card_size)
    }
}
