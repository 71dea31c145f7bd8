// SPDX-License-Identifier: MPL-2.0
//! Search panel: query input, category chips, and a filtered results grid.

use crate::gallery::Group;
use crate::i18n::fluent::I18n;
use crate::library::ImageRecord;
use crate::ui::design_tokens::{palette, sizing, spacing};
use crate::ui::styles;
use iced::widget::{button, container, image, scrollable, text_input, Column, Row, Space, Text};
use iced::{alignment, Color, ContentFit, Element, Length};

/// Result thumbnails per row.
const RESULT_COLUMNS: usize = 3;
const RESULT_HEIGHT: f32 = 160.0;

/// Messages emitted by the search panel.
#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    /// A category chip was clicked; `None` selects all categories.
    CategoryPicked(Option<String>),
    RequestClose,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    RequestClose,
}

/// Panel state: the query text and the active category filter.
#[derive(Debug, Clone, Default)]
pub struct State {
    query: String,
    category: Option<String>,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

pub fn update(state: &mut State, message: Message) -> Event {
    match message {
        Message::QueryChanged(query) => {
            state.query = query;
            Event::None
        }
        Message::CategoryPicked(category) => {
            state.category = category;
            Event::None
        }
        Message::RequestClose => Event::RequestClose,
    }
}

/// Case-insensitive substring filter over name, category id, and tags,
/// narrowed by the active category chip.
pub fn filter<'a>(
    records: &'a [ImageRecord],
    query: &str,
    category: Option<&str>,
) -> Vec<&'a ImageRecord> {
    let needle = query.trim().to_lowercase();
    records
        .iter()
        .filter(|record| category.is_none_or(|c| record.group_id == c))
        .filter(|record| {
            if needle.is_empty() {
                return true;
            }
            record.name.to_lowercase().contains(&needle)
                || record.group_id.to_lowercase().contains(&needle)
                || record
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Context needed to render the panel.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub groups: &'a [Group],
    pub records: &'a [ImageRecord],
    pub alpha: f32,
}

/// Renders the panel. `alpha` follows the enclosing stage fade.
pub fn view<'a>(state: &'a State, ctx: ViewContext<'a>) -> Element<'a, Message> {
    let input = text_input(&ctx.i18n.tr("search-placeholder"), &state.query)
        .on_input(Message::QueryChanged)
        .padding(spacing::SM)
        .width(Length::Fill);

    let header = Row::new()
        .spacing(spacing::SM)
        .push(input)
        .push(
            button(Text::new(ctx.i18n.tr("search-close")))
                .on_press(Message::RequestClose)
                .style(styles::button::mode)
                .padding([spacing::XS, spacing::MD]),
        );

    let mut chips = Row::new().spacing(spacing::XS);
    chips = chips.push(chip(
        ctx.i18n.tr("search-all-categories"),
        None,
        state.category.is_none(),
    ));
    for group in ctx.groups {
        chips = chips.push(chip(
            group.title.clone(),
            Some(group.id.clone()),
            state.category.as_deref() == Some(group.id.as_str()),
        ));
    }

    let results = filter(ctx.records, &state.query, state.category.as_deref());
    let body: Element<'a, Message> = if results.is_empty() {
        container(
            Text::new(ctx.i18n.tr("search-no-results")).color(Color {
                a: ctx.alpha,
                ..palette::GRAY_200
            }),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
    } else {
        results_grid(&results)
    };

    let content = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::LG)
        .push(header)
        .push(chips)
        .push(body);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::scrim(ctx.alpha))
        .into()
}

fn chip<'a>(label: String, category: Option<String>, active: bool) -> Element<'a, Message> {
    let styled = if active {
        button(Text::new(label).size(14)).style(styles::button::selected)
    } else {
        button(Text::new(label).size(14)).style(styles::button::mode)
    };
    styled
        .on_press(Message::CategoryPicked(category))
        .padding([spacing::XXS, spacing::SM])
        .into()
}

fn results_grid<'a>(results: &[&ImageRecord]) -> Element<'a, Message> {
    let mut rows = Column::new().spacing(sizing::ITEM_GAP);
    for chunk in results.chunks(RESULT_COLUMNS) {
        let mut row = Row::new().spacing(sizing::ITEM_GAP);
        for record in chunk {
            row = row.push(
                container(
                    image(image::Handle::from_path(&record.path))
                        .content_fit(ContentFit::Cover)
                        .width(Length::FillPortion(1))
                        .height(Length::Fixed(RESULT_HEIGHT)),
                )
                .width(Length::FillPortion(1)),
            );
        }
        // Pad the last row so items keep their width.
        for _ in chunk.len()..RESULT_COLUMNS {
            row = row.push(Space::new().width(Length::FillPortion(1)));
        }
        rows = rows.push(row);
    }

    scrollable(rows)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
