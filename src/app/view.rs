// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The page is a stack: the image grid at the bottom, the overlay layers in
//! the middle while the shell is open, and the mode switcher floating on top.
//! All animated values (fades, curtain, panel exit) are read from the overlay
//! primitives at render time.

use super::{App, Message};
use crate::ui::design_tokens::{palette, spacing};
use crate::ui::styles;
use crate::ui::transitions::{IntroGate, OverlayShell};
use crate::ui::{chooser, grid, marquee, mode_switcher, search};
use iced::widget::{button, container, stack, Column, Space, Text};
use iced::{alignment, Color, Element, Length};
use std::time::Instant;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let now = Instant::now();
        let mut layers: Vec<Element<'_, Message>> = Vec::new();

        layers.push(self.base_layer());

        if self.overlay.shell().is_open() {
            self.push_overlay_layers(&mut layers, now);
        }

        layers.push(
            container(mode_switcher::view(self.overlay.controller().mode(), &self.i18n).map(Message::ModeSwitcher))
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Bottom)
                .padding(spacing::LG)
                .into(),
        );

        stack(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// The always-present bottom layer: the grid, or the empty state.
    fn base_layer(&self) -> Element<'_, Message> {
        if self.library.is_empty() {
            self.empty_state()
        } else {
            grid::view(&self.grid_columns)
        }
    }

    fn empty_state(&self) -> Element<'_, Message> {
        let mut column = Column::new()
            .spacing(spacing::MD)
            .align_x(alignment::Horizontal::Center)
            .push(Text::new(self.i18n.tr("empty-title")).size(24));

        if self.config.gallery_dir.is_some() {
            column = column.push(Text::new(self.i18n.tr("empty-no-images")));
        } else {
            column = column.push(Text::new(self.i18n.tr("empty-body")));
        }

        column = column.push(
            button(Text::new(self.i18n.tr("empty-pick-folder")))
                .on_press(Message::PickFolder)
                .style(styles::button::selected)
                .padding([spacing::XS, spacing::MD]),
        );

        if let Some(error) = &self.scan_error {
            column = column.push(Text::new(error.clone()).size(14).color(palette::GRAY_400));
        }

        container(column)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into()
    }

    /// Pushes the scrim, the animated panel, the curtains, and the active
    /// stages, bottom to top.
    fn push_overlay_layers<'a>(&'a self, layers: &mut Vec<Element<'a, Message>>, now: Instant) {
        let shell = self.overlay.shell();
        let width = self.window_size.width;
        let height = self.window_size.height;

        // Dimmed scrim for the whole overlay, fading with the shell.
        layers.push(
            container(Space::new().width(Length::Fill).height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(styles::container::scrim(shell.fade_alpha(now)))
                .into(),
        );

        let mut panel_layers: Vec<Element<'_, Message>> = Vec::new();

        if self.overlay.chooser_fade().is_mounted() {
            let cards = chooser::view(
                self.library.groups(),
                &self.i18n,
                self.overlay.chooser_fade().opacity(now),
            )
            .map(Message::Chooser);
            panel_layers.push(offset_stage(cards, self.overlay.chooser_fade().offset_y(now)));
        }

        // Marquee curtain and backdrop sit under the marquee stage.
        push_gate_layers(&mut panel_layers, self.overlay.marquee_gate(), width, height, now);

        if self.overlay.marquee_fade().is_mounted() {
            let title = self
                .effective_group()
                .map(|group| group.title.clone())
                .unwrap_or_default();
            let strip = marquee::view(
                &self.marquee_strip,
                marquee::ViewContext {
                    i18n: &self.i18n,
                    images: &self.marquee_images,
                    title,
                    panel_height: height,
                    now,
                },
            )
            .map(Message::Marquee);
            panel_layers.push(offset_stage(strip, self.overlay.marquee_fade().offset_y(now)));
        }

        // Search curtain and backdrop cover the marquee while search is up.
        push_gate_layers(&mut panel_layers, self.overlay.search_gate(), width, height, now);

        if self.overlay.search_fade().is_mounted() {
            let panel = search::view(
                &self.search_panel,
                search::ViewContext {
                    i18n: &self.i18n,
                    groups: self.library.groups(),
                    records: self.library.records(),
                    alpha: self.overlay.search_fade().opacity(now),
                },
            )
            .map(Message::Search);
            panel_layers.push(offset_stage(panel, self.overlay.search_fade().offset_y(now)));
        }

        layers.push(panel(panel_layers, shell, width, height, now));
    }
}

/// Wraps a stage in its fade offset.
fn offset_stage(stage: Element<'_, Message>, offset: f32) -> Element<'_, Message> {
    Column::new()
        .push(Space::new().height(Length::Fixed(offset.max(0.0))))
        .push(stage)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Applies the shell's panel-exit keyframes (shrink, then fall) by insetting
/// and offsetting the panel contents.
fn panel<'a>(
    children: Vec<Element<'a, Message>>,
    shell: &OverlayShell,
    width: f32,
    height: f32,
    now: Instant,
) -> Element<'a, Message> {
    let scale = shell.panel_scale(now);
    let fall = shell.panel_offset_frac(now) * height;
    let alpha = shell.panel_alpha(now);
    let inset_x = (1.0 - scale) * width / 2.0;
    let inset_y = (1.0 - scale) * height / 2.0;

    let content = stack(children).width(Length::Fill).height(Length::Fill);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding([inset_y + fall, inset_x])
        .style(move |_theme| container::Style {
            text_color: Some(Color {
                a: alpha,
                ..palette::WHITE
            }),
            ..Default::default()
        })
        .into()
}

/// Pushes the running curtain and, afterwards, the persisted backdrop of one
/// intro gate.
fn push_gate_layers<'a>(
    layers: &mut Vec<Element<'a, Message>>,
    gate: &IntroGate,
    width: f32,
    height: f32,
    now: Instant,
) {
    if gate.is_running() {
        let rise = gate.curtain_offset_frac(now) * height;
        let scale = gate.curtain_scale(now);
        let inset_x = (1.0 - scale) * width / 2.0;
        let inset_y = (1.0 - scale) * height / 2.0;

        layers.push(
            container(
                container(Space::new().width(Length::Fill).height(Length::Fill))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .style(styles::container::curtain(1.0)),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .padding([inset_y + rise, inset_x])
            .into(),
        );
    } else if gate.backdrop_visible() {
        layers.push(
            container(Space::new().width(Length::Fill).height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(styles::container::curtain(1.0))
                .into(),
        );
    }
}
