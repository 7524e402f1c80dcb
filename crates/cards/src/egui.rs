// Copyright (C) 2025  Vince Vasta.
// SPDX-License-Identifier: Apache-2.0

//! Cards painting.
use eframe::egui::*;

use crate::Image;

/// The face color for each image.
const FACE_COLORS: [Color32; Image::COUNT] = [
    Color32::from_rgb(230, 190, 40),
    Color32::from_rgb(210, 40, 60),
    Color32::from_rgb(220, 90, 30),
    Color32::from_rgb(40, 150, 60),
    Color32::from_rgb(60, 60, 80),
    Color32::from_rgb(240, 150, 20),
    Color32::from_rgb(60, 110, 200),
    Color32::from_rgb(30, 170, 90),
    Color32::from_rgb(40, 70, 130),
    Color32::from_rgb(150, 60, 170),
    Color32::from_rgb(220, 100, 160),
    Color32::from_rgb(120, 120, 200),
];

const FACE_BG: Color32 = Color32::from_gray(235);
const BACK_BG: Color32 = Color32::from_rgb(30, 60, 120);
const BACK_PATTERN: Color32 = Color32::from_rgb(50, 90, 160);
const CORNER_RADIUS: f32 = 6.0;

/// Paints a card face showing the image or the card back.
pub fn paint_card(painter: &Painter, rect: Rect, image: Image, face_up: bool) {
    if face_up {
        painter.rect_filled(rect, CORNER_RADIUS, FACE_BG);
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            image.symbol(),
            FontId::proportional(rect.height() * 0.5),
            face_color(image),
        );
    } else {
        painter.rect_filled(rect, CORNER_RADIUS, BACK_BG);

        // Inner frame and diagonal stripes.
        let inner = rect.shrink(rect.width() * 0.1);
        painter.rect_stroke(
            inner,
            CORNER_RADIUS / 2.0,
            Stroke::new(1.5, BACK_PATTERN),
            StrokeKind::Inside,
        );

        let step = inner.width() / 4.0;
        for i in 1..4 {
            let x = inner.left() + step * i as f32;
            painter.line_segment(
                [pos2(x, inner.top()), pos2(x - step, inner.bottom())],
                Stroke::new(1.0, BACK_PATTERN),
            );
        }
    }
}

/// Returns the color used to draw an image symbol.
pub fn face_color(image: Image) -> Color32 {
    FACE_COLORS[image.index()]
}
