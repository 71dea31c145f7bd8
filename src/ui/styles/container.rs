// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{opacity, palette};
use iced::widget::container;
use iced::{Background, Color, Theme};

/// Dimmed scrim behind the overlay, with animated alpha.
pub fn scrim(alpha: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM * alpha,
            ..palette::BLACK
        })),
        ..Default::default()
    }
}

/// Solid curtain sheet, with animated alpha.
pub fn curtain(alpha: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(Color {
            a: alpha,
            ..palette::CURTAIN
        })),
        ..Default::default()
    }
}

/// Caption strip across the bottom of a chooser card.
pub fn card_caption(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: 0.9,
            ..palette::GRAY_900
        })),
        text_color: Some(palette::WHITE),
        ..Default::default()
    }
}

