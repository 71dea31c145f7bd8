// SPDX-License-Identifier: MPL-2.0
//! Category chooser: a centered row of cover cards, one per gallery group.

use crate::gallery::Group;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, palette, sizing, spacing};
use crate::ui::styles;
use fluent_bundle::FluentArgs;
use iced::widget::{button, container, image, Column, Row, Text};
use iced::{alignment, Background, Color, ContentFit, Element, Length};

/// Messages emitted by the chooser.
#[derive(Debug, Clone)]
pub enum Message {
    /// A cover card was clicked.
    Pick(Group),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    Picked(Group),
}

pub fn update(message: Message) -> Event {
    match message {
        Message::Pick(group) => Event::Picked(group),
    }
}

/// Renders the chooser over a dimmed scrim. `alpha` follows the enclosing
/// stage fade so the whole view fades as one.
pub fn view<'a>(groups: &'a [Group], i18n: &I18n, alpha: f32) -> Element<'a, Message> {
    let mut cards = Row::new().spacing(sizing::ITEM_GAP);
    for group in groups {
        cards = cards.push(card(group, i18n, alpha));
    }

    let heading = Text::new(i18n.tr("chooser-heading"))
        .size(24)
        .color(Color {
            a: alpha,
            ..palette::WHITE
        });

    let content = Column::new()
        .spacing(spacing::LG)
        .align_x(alignment::Horizontal::Center)
        .push(heading)
        .push(cards);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::scrim(alpha))
        .into()
}

fn card<'a>(group: &'a Group, i18n: &I18n, alpha: f32) -> Element<'a, Message> {
    let cover = image(image::Handle::from_path(&group.cover))
        .content_fit(ContentFit::Cover)
        .width(Length::Fixed(sizing::CARD_WIDTH))
        .height(Length::Fixed(sizing::CARD_COVER_HEIGHT));

    let mut args = FluentArgs::new();
    args.set("count", group.count as i64);
    let count_label = i18n.tr_args("chooser-image-count", &args);

    let caption = container(
        Column::new()
            .align_x(alignment::Horizontal::Center)
            .push(Text::new(group.title.as_str()).size(16))
            .push(
                Text::new(count_label).size(12).color(Color {
                    a: alpha * opacity::OVERLAY_STRONG,
                    ..palette::GRAY_200
                }),
            ),
    )
    .width(Length::Fixed(sizing::CARD_WIDTH))
    .padding([spacing::XS, spacing::SM])
    .style(styles::container::card_caption);

    let body = Column::new().push(cover).push(caption);

    button(body)
        .on_press(Message::Pick(group.clone()))
        .padding(0)
        .style(card_style)
        .into()
}

fn card_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::WHITE
        })),
        _ => None,
    };
    button::Style {
        background,
        border: iced::Border {
            radius: crate::ui::design_tokens::radius::LG.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
