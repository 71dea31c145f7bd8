// SPDX-License-Identifier: MPL-2.0
//! Marquee strip: a continuously scrolling band of one category's images.
//!
//! The strip runs its own little lifecycle inside the overlay: a staggered
//! intro reveal when it mounts, an endless scroll over a doubled track, a
//! lightbox that pauses the scroll, and a slide-out when the overlay is being
//! dismissed. The slide-out completion is reported upward; the phase
//! controller turns it into the shell's panel exit.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing};
use crate::ui::styles;
use crate::ui::transitions::ease_in;
use iced::widget::{button, container, image, scrollable, stack, Column, Id, Row, Space, Text};
use iced::{alignment, Color, ContentFit, Element, Length};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Duration of the strip's slide-out when the overlay closes.
pub const SLIDE_OUT: Duration = Duration::from_millis(500);

/// A full loop of the track never takes less than this many seconds, so
/// short collections do not whip past.
const MIN_LOOP_SECS: f32 = 6.0;

/// Width / height of a marquee item.
pub const ITEM_ASPECT: f32 = 4.0 / 6.0;
/// Item height as a fraction of the panel height.
pub const ITEM_HEIGHT_FRAC: f32 = 0.7;

// Intro reveal timing, in seconds.
const INTRO_ITEM_SECS: f32 = 0.35;
const INTRO_DELAY_SECS: f32 = 0.05;
const INTRO_STAGGER_SECS: f32 = 0.08;
/// How far an item rises during its intro reveal, in logical pixels.
const INTRO_DROP: f32 = 60.0;

/// Scrollable id the application targets to drive the scroll position.
pub fn track_id() -> Id {
    Id::new("marquee-track")
}

/// Caps the configured scroll speed so one loop of a `track_px`-long track
/// takes at least [`MIN_LOOP_SECS`].
#[must_use]
pub fn effective_speed(speed: f32, track_px: f32) -> f32 {
    if track_px <= 0.0 {
        return speed;
    }
    speed.min(track_px / MIN_LOOP_SECS)
}

/// Messages emitted by the strip.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    /// A track item was clicked; opens the lightbox on that image.
    OpenLightbox(usize),
    CloseLightbox,
    /// The close affordance was clicked.
    RequestClose,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    RequestClose,
    /// The slide-out finished; the overlay dismissal can continue.
    SlideOutDone,
}

/// Strip state. Created fresh each time the marquee view mounts.
#[derive(Debug, Clone)]
pub struct State {
    item_count: usize,
    /// Scroll speed in pixels per second.
    speed: f32,
    intro_started: Option<Instant>,
    /// Scroll distance accumulated before the last pause, in pixels.
    scroll_base: f32,
    scroll_since: Option<Instant>,
    lightbox: Option<usize>,
    closing_since: Option<Instant>,
    slide_reported: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            item_count: 0,
            speed: 0.0,
            intro_started: None,
            scroll_base: 0.0,
            scroll_since: None,
            lightbox: None,
            closing_since: None,
            slide_reported: false,
        }
    }
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)starts the strip as it mounts: fresh intro, scroll at zero.
    pub fn begin(&mut self, item_count: usize, speed: f32, now: Instant) {
        *self = Self {
            item_count,
            speed,
            intro_started: Some(now),
            ..Self::default()
        };
    }

    /// Clears all state as the strip unmounts.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Propagates the overlay's closing intent. The first `true` starts the
    /// slide-out clock; later calls are no-ops.
    pub fn set_closing(&mut self, closing: bool, now: Instant) {
        if closing && self.closing_since.is_none() {
            self.closing_since = Some(now);
            self.pause_scroll(now);
        }
    }

    /// Advances the clock: starts the scroll once the intro has finished and
    /// reports the slide-out completion exactly once.
    pub fn tick(&mut self, now: Instant) -> Option<Event> {
        if self.intro_done(now)
            && self.scroll_since.is_none()
            && self.lightbox.is_none()
            && self.closing_since.is_none()
        {
            self.scroll_since = Some(now);
        }

        if let Some(started) = self.closing_since {
            if !self.slide_reported
                && now.saturating_duration_since(started) >= SLIDE_OUT
            {
                self.slide_reported = true;
                return Some(Event::SlideOutDone);
            }
        }
        None
    }

    fn pause_scroll(&mut self, now: Instant) {
        if let Some(since) = self.scroll_since.take() {
            self.scroll_base += now.saturating_duration_since(since).as_secs_f32() * self.speed;
        }
    }

    /// Reveal progress of one intro item, in `[0, 1]`.
    #[must_use]
    pub fn intro_item_progress(&self, index: usize, now: Instant) -> f32 {
        let Some(started) = self.intro_started else {
            return 1.0;
        };
        let delay = INTRO_DELAY_SECS + INTRO_STAGGER_SECS * index as f32;
        let elapsed = now.saturating_duration_since(started).as_secs_f32() - delay;
        (elapsed / INTRO_ITEM_SECS).clamp(0.0, 1.0)
    }

    /// Whether every item has finished its reveal.
    #[must_use]
    pub fn intro_done(&self, now: Instant) -> bool {
        if self.item_count == 0 {
            return true;
        }
        self.intro_item_progress(self.item_count - 1, now) >= 1.0
    }

    /// Unwrapped scroll distance in pixels.
    #[must_use]
    pub fn scroll_offset(&self, now: Instant) -> f32 {
        match self.scroll_since {
            Some(since) => {
                self.scroll_base
                    + now.saturating_duration_since(since).as_secs_f32() * self.speed
            }
            None => self.scroll_base,
        }
    }

    /// Scroll offset wrapped to one track length, given the per-item stride.
    /// The track is rendered twice, so wrapping at one track length is
    /// seamless.
    #[must_use]
    pub fn wrapped_offset(&self, now: Instant, stride: f32) -> f32 {
        let track = stride * self.item_count as f32;
        if track <= 0.0 {
            return 0.0;
        }
        self.scroll_offset(now) % track
    }

    /// Slide-out progress as a fraction of the panel height, `0 → 1.2`.
    #[must_use]
    pub fn slide_offset_frac(&self, now: Instant) -> f32 {
        let Some(started) = self.closing_since else {
            return 0.0;
        };
        let p = (now.saturating_duration_since(started).as_secs_f32()
            / SLIDE_OUT.as_secs_f32())
        .min(1.0);
        1.2 * ease_in(p)
    }

    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.scroll_since.is_some()
    }

    #[must_use]
    pub fn lightbox(&self) -> Option<usize> {
        self.lightbox
    }

    #[must_use]
    pub fn is_closing(&self) -> bool {
        self.closing_since.is_some()
    }

    /// Whether the strip needs animation frames: mounted and revealing,
    /// scrolling, or sliding out.
    #[must_use]
    pub fn needs_frames(&self) -> bool {
        if self.intro_started.is_none() {
            return false;
        }
        if self.closing_since.is_some() {
            return !self.slide_reported;
        }
        self.lightbox.is_none()
    }
}

/// Handles a strip message against its state.
pub fn update(state: &mut State, message: Message, now: Instant) -> Event {
    match message {
        Message::OpenLightbox(index) => {
            state.pause_scroll(now);
            state.lightbox = Some(index);
            Event::None
        }
        Message::CloseLightbox => {
            state.lightbox = None;
            // The tick resumes the scroll unless the strip is closing.
            Event::None
        }
        Message::RequestClose => Event::RequestClose,
    }
}

/// Context needed to render the strip.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub images: &'a [PathBuf],
    pub title: String,
    pub panel_height: f32,
    pub now: Instant,
}

/// Renders the strip, its header, and the lightbox when open.
pub fn view<'a>(state: &'a State, ctx: ViewContext<'a>) -> Element<'a, Message> {
    let item_height = ctx.panel_height * ITEM_HEIGHT_FRAC;
    let slide_offset = state.slide_offset_frac(ctx.now) * ctx.panel_height;

    let band: Element<'a, Message> = if state.intro_done(ctx.now) {
        running_track(&ctx, item_height)
    } else {
        intro_track(state, &ctx, item_height)
    };

    let header = Row::new()
        .padding(spacing::MD)
        .push(
            Text::new(ctx.title.clone())
                .size(24)
                .color(palette::WHITE),
        )
        .push(Space::new().width(Length::Fill))
        .push(
            button(Text::new(ctx.i18n.tr("marquee-close")))
                .on_press(Message::RequestClose)
                .style(styles::button::mode)
                .padding([spacing::XS, spacing::MD]),
        );

    let strip = Column::new()
        // The slide-out pushes the whole strip below the panel.
        .push(Space::new().height(Length::Fixed(slide_offset)))
        .push(header)
        .push(
            container(band)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_y(alignment::Vertical::Center),
        );

    match state.lightbox {
        Some(index) => {
            let src = ctx.images.get(index % ctx.images.len().max(1));
            stack([strip.into(), lightbox(src, ctx.panel_height)])
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        }
        None => strip.into(),
    }
}

fn running_track<'a>(ctx: &ViewContext<'a>, item_height: f32) -> Element<'a, Message> {
    let item_width = item_height * ITEM_ASPECT;

    let mut track = Row::new().spacing(sizing::ITEM_GAP);
    // Double the image list so wrapping the scroll offset at one track
    // length never shows a gap.
    for (i, path) in ctx.images.iter().chain(ctx.images.iter()).enumerate() {
        let base_index = if ctx.images.is_empty() {
            0
        } else {
            i % ctx.images.len()
        };
        track = track.push(
            button(
                image(image::Handle::from_path(path))
                    .content_fit(ContentFit::Cover)
                    .width(Length::Fixed(item_width))
                    .height(Length::Fixed(item_height)),
            )
            .on_press(Message::OpenLightbox(base_index))
            .padding(0)
            .style(styles::button::image_item),
        );
    }

    // The application keeps the scroll position in sync with
    // `State::wrapped_offset` through `scrollable::scroll_to`, using the
    // same item-width-plus-gap stride the row lays out with.
    scrollable(track)
        .id(track_id())
        .direction(scrollable::Direction::Horizontal(
            scrollable::Scrollbar::hidden(),
        ))
        .width(Length::Fill)
        .into()
}

fn intro_track<'a>(
    state: &State,
    ctx: &ViewContext<'a>,
    item_height: f32,
) -> Element<'a, Message> {
    let item_width = item_height * ITEM_ASPECT;

    let mut row = Row::new().spacing(sizing::ITEM_GAP);
    for (i, path) in ctx.images.iter().enumerate() {
        let progress = state.intro_item_progress(i, ctx.now);
        let eased = crate::ui::transitions::ease_out(progress);
        let drop = INTRO_DROP * (1.0 - eased);

        let item = Column::new()
            .push(Space::new().height(Length::Fixed(drop)))
            .push(
                button(
                    image(image::Handle::from_path(path))
                        .content_fit(ContentFit::Cover)
                        .width(Length::Fixed(item_width))
                        .height(Length::Fixed(item_height)),
                )
                .on_press(Message::OpenLightbox(i))
                .padding(0)
                .style(styles::button::image_item),
            );
        row = row.push(item);
    }

    container(row).width(Length::Fill).into()
}

fn lightbox<'a, 'b>(src: Option<&'b PathBuf>, panel_height: f32) -> Element<'a, Message> {
    let backdrop = button(Space::new().width(Length::Fill).height(Length::Fill))
        .on_press(Message::CloseLightbox)
        .padding(0)
        .style(|_theme, _status| button::Style {
            background: Some(iced::Background::Color(Color {
                a: 0.55,
                ..palette::BLACK
            })),
            ..Default::default()
        });

    let mut layers: Vec<Element<'a, Message>> = vec![backdrop.into()];

    if let Some(src) = src {
        let picture = container(
            image(image::Handle::from_path(src))
                .content_fit(ContentFit::Contain)
                .height(Length::Fixed(panel_height * 0.88)),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center);
        layers.push(picture.into());
    }

    let close = container(
        button(Text::new("×").size(18))
            .on_press(Message::CloseLightbox)
            .style(styles::button::lightbox_close)
            .padding(spacing::XS),
    )
    .width(Length::Fill)
    .align_x(alignment::Horizontal::Right)
    .padding(spacing::MD);
    layers.push(close.into());

    stack(layers).width(Length::Fill).height(Length::Fill).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> Instant {
        Instant::now()
    }

    fn intro_total(n: usize) -> Duration {
        let secs = INTRO_DELAY_SECS + INTRO_STAGGER_SECS * (n - 1) as f32 + INTRO_ITEM_SECS;
        Duration::from_secs_f32(secs)
    }

    #[test]
    fn intro_staggers_items() {
        let mut state = State::new();
        let start = t0();
        state.begin(5, 250.0, start);

        let early = start + Duration::from_millis(100);
        assert!(state.intro_item_progress(0, early) > 0.0);
        assert_eq!(state.intro_item_progress(4, early), 0.0);
        assert!(!state.intro_done(early));

        let end = start + intro_total(5);
        assert!(state.intro_done(end));
    }

    #[test]
    fn scroll_starts_only_after_intro() {
        let mut state = State::new();
        let start = t0();
        state.begin(3, 100.0, start);

        assert_eq!(state.tick(start + Duration::from_millis(50)), None);
        assert!(!state.is_scrolling());

        let after = start + intro_total(3);
        state.tick(after);
        assert!(state.is_scrolling());

        let later = after + Duration::from_secs(2);
        assert!((state.scroll_offset(later) - 200.0).abs() < 1.0);
    }

    #[test]
    fn lightbox_pauses_and_resumes_scroll() {
        let mut state = State::new();
        let start = t0();
        state.begin(3, 100.0, start);
        let running = start + intro_total(3);
        state.tick(running);

        let open_at = running + Duration::from_secs(1);
        assert_eq!(update(&mut state, Message::OpenLightbox(1), open_at), Event::None);
        assert!(!state.is_scrolling());
        assert_eq!(state.lightbox(), Some(1));

        // Offset froze at the pause point.
        let frozen = state.scroll_offset(open_at + Duration::from_secs(5));
        assert!((frozen - 100.0).abs() < 1.0);

        let close_at = open_at + Duration::from_secs(2);
        update(&mut state, Message::CloseLightbox, close_at);
        state.tick(close_at);
        assert!(state.is_scrolling());
    }

    #[test]
    fn empty_strip_reports_intro_done_immediately() {
        let mut state = State::new();
        let start = t0();
        state.begin(0, 100.0, start);
        assert!(state.intro_done(start));
        assert_eq!(state.wrapped_offset(start, 100.0), 0.0);
    }

    #[test]
    fn slide_out_reports_exactly_once() {
        let mut state = State::new();
        let start = t0();
        state.begin(3, 100.0, start);
        let running = start + intro_total(3);
        state.tick(running);

        state.set_closing(true, running);
        assert!(!state.is_scrolling()); // closing pauses the scroll
        assert_eq!(state.tick(running + SLIDE_OUT / 2), None);
        assert_eq!(state.tick(running + SLIDE_OUT), Some(Event::SlideOutDone));
        assert_eq!(state.tick(running + SLIDE_OUT * 2), None);
    }

    #[test]
    fn set_closing_does_not_restart_the_slide() {
        let mut state = State::new();
        let start = t0();
        state.begin(2, 100.0, start);
        state.set_closing(true, start);
        state.set_closing(true, start + SLIDE_OUT / 2);
        assert_eq!(state.tick(start + SLIDE_OUT), Some(Event::SlideOutDone));
    }

    #[test]
    fn wrapped_offset_wraps_at_track_length() {
        let mut state = State::new();
        let start = t0();
        state.begin(4, 100.0, start);
        let running = start + intro_total(4);
        state.tick(running);

        // 4 items at stride 50 → track length 200. After 3 seconds at
        // 100 px/s the unwrapped offset is 300, wrapped 100.
        let later = running + Duration::from_secs(3);
        assert!((state.wrapped_offset(later, 50.0) - 100.0).abs() < 1.0);
    }

    #[test]
    fn effective_speed_floors_the_loop_duration() {
        // A 600 px track at 250 px/s would loop in 2.4 s; the cap slows it
        // down to one loop per MIN_LOOP_SECS.
        assert_eq!(effective_speed(250.0, 600.0), 100.0);
        // Long tracks keep the configured speed.
        assert_eq!(effective_speed(250.0, 10_000.0), 250.0);
        // An empty track changes nothing.
        assert_eq!(effective_speed(250.0, 0.0), 250.0);
    }

    #[test]
    fn request_close_propagates() {
        let mut state = State::new();
        let start = t0();
        state.begin(1, 100.0, start);
        assert_eq!(
            update(&mut state, Message::RequestClose, start),
            Event::RequestClose
        );
    }

    #[test]
    fn slide_offset_grows_toward_off_screen() {
        let mut state = State::new();
        let start = t0();
        state.begin(2, 100.0, start);
        state.set_closing(true, start);

        assert_eq!(state.slide_offset_frac(start), 0.0);
        let late = state.slide_offset_frac(start + SLIDE_OUT);
        assert!((late - 1.2).abs() < 0.001);
    }

    #[test]
    fn view_renders_running_and_intro_states() {
        let state_intro = {
            let mut s = State::new();
            s.begin(2, 100.0, t0());
            s
        };
        let i18n = I18n::default();
        let images = vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg")];
        let ctx = ViewContext {
            i18n: &i18n,
            images: &images,
            title: "travel".to_string(),
            panel_height: 600.0,
            now: t0(),
        };
        let _element = view(&state_intro, ctx);
    }
}
