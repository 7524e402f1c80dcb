// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Memory game egui app implementation.
use eframe::egui::*;

use crate::game_view::GameView;

/// App configuration parameters.
#[derive(Debug, Default)]
pub struct Config {
    /// The game configuration.
    pub game: memory_core::Config,
}

/// The UI main frame.
pub struct AppFrame {
    game_view: GameView,
}

impl AppFrame {
    /// Creates a new App instance.
    pub fn new(config: Config, cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_theme(Theme::Dark);

        log::info!("Creating new app with config: {config:?}");

        AppFrame {
            game_view: GameView::new(&cc.egui_ctx, config.game),
        }
    }
}

impl eframe::App for AppFrame {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.game_view.update(ctx);
    }
}
