// SPDX-License-Identifier: MPL-2.0
//! Mode switcher: the Grid / Marquee / Search buttons floating over the page.
//!
//! The highlighted button follows the controller's externally visible mode,
//! which tracks what the user last asked for rather than the animation state.

use crate::gallery::{self, ViewMode};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::spacing;
use crate::ui::styles;
use iced::widget::{button, container, Row, Text};
use iced::{Element, Length};

/// Messages emitted by the mode switcher.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    SelectGrid,
    SelectMarquee,
    SelectSearch,
}

/// Maps a button press onto the overlay event it requests.
pub fn update(message: Message) -> gallery::Event {
    match message {
        Message::SelectGrid => gallery::Event::CloseOverlay,
        Message::SelectMarquee => gallery::Event::OpenMarquee,
        Message::SelectSearch => gallery::Event::OpenSearch,
    }
}

/// Renders the three mode buttons with the active one highlighted.
pub fn view<'a>(mode: ViewMode, i18n: &I18n) -> Element<'a, Message> {
    let mode_button = |label: String, message: Message, active: bool| {
        let styled = if active {
            button(Text::new(label)).style(styles::button::selected)
        } else {
            button(Text::new(label)).style(styles::button::mode)
        };
        styled
            .on_press(message)
            .padding([spacing::XS, spacing::MD])
    };

    let row = Row::new()
        .spacing(spacing::XS)
        .push(mode_button(
            i18n.tr("mode-grid"),
            Message::SelectGrid,
            mode == ViewMode::Grid,
        ))
        .push(mode_button(
            i18n.tr("mode-marquee"),
            Message::SelectMarquee,
            mode == ViewMode::Marquee,
        ))
        .push(mode_button(
            i18n.tr("mode-search"),
            Message::SelectSearch,
            mode == ViewMode::Search,
        ));

    container(row)
        .width(Length::Shrink)
        .padding(spacing::XS)
        .into()
}
