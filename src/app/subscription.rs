// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native events (keyboard, window) are routed into application messages, and
//! a tick subscription runs only while something on screen is animating. The
//! Escape-to-close mapping exists only while the overlay is open, so a closed
//! page holds no keyboard subscription at all.

use super::{App, Message};
use crate::gallery::controller::Event as GalleryEvent;
use iced::{event, keyboard, time, window, Subscription};
use std::time::Duration;

/// Tick interval while animations are running.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

impl App {
    pub fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![window_events()];

        if self.overlay.controller().is_open() {
            subscriptions.push(escape_to_close());
        }

        if self.needs_frames() {
            subscriptions.push(time::every(FRAME_INTERVAL).map(Message::Tick));
        }

        Subscription::batch(subscriptions)
    }
}

/// Window resize and focus events. A focus gain triggers a rescan so edits
/// made in a file manager show up on return.
fn window_events() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| match event {
        event::Event::Window(window::Event::Resized(size)) => {
            Some(Message::WindowResized(size))
        }
        event::Event::Window(window::Event::Focused) => Some(Message::WindowFocused),
        _ => None,
    })
}

/// Escape closes the overlay, matching the close affordances inside the
/// views.
fn escape_to_close() -> Subscription<Message> {
    event::listen_with(|event, status, _window_id| {
        if status == event::Status::Captured {
            return None;
        }
        match event {
            event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(keyboard::key::Named::Escape),
                ..
            }) => Some(Message::Gallery(GalleryEvent::RequestClose)),
            _ => None,
        }
    })
}
