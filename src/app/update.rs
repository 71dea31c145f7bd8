// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.

use super::{scan_task, App, Message};
use crate::config;
use crate::gallery::controller::{Event as GalleryEvent, Pending};
use crate::ui::chooser::{self, Event as ChooserEvent};
use crate::ui::marquee::{self, Event as MarqueeEvent};
use crate::ui::mode_switcher;
use crate::ui::search::{self, Event as SearchEvent};
use iced::widget::operation;
use iced::widget::scrollable::AbsoluteOffset;
use iced::Task;
use std::time::Instant;

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ModeSwitcher(msg) => {
                let event = mode_switcher::update(msg);
                self.handle_gallery(event, Instant::now())
            }
            Message::Gallery(event) => self.handle_gallery(event, Instant::now()),
            Message::GalleryPending(pending) => {
                self.overlay.apply_pending(pending, Instant::now());
                self.sync_view_states(Instant::now());
                Task::none()
            }
            Message::Chooser(msg) => match chooser::update(msg) {
                ChooserEvent::Picked(group) => {
                    self.handle_gallery(GalleryEvent::Pick(group), Instant::now())
                }
            },
            Message::Marquee(msg) => {
                let now = Instant::now();
                match marquee::update(&mut self.marquee_strip, msg, now) {
                    MarqueeEvent::RequestClose => self.handle_gallery(GalleryEvent::RequestClose, now),
                    MarqueeEvent::SlideOutDone => {
                        self.handle_gallery(GalleryEvent::MarqueeSlideOutDone, now)
                    }
                    MarqueeEvent::None => Task::none(),
                }
            }
            Message::Search(msg) => match search::update(&mut self.search_panel, msg) {
                SearchEvent::RequestClose => {
                    self.handle_gallery(GalleryEvent::RequestClose, Instant::now())
                }
                SearchEvent::None => Task::none(),
            },
            Message::Tick(now) => self.handle_tick(now),
            Message::WindowFocused => self.rescan(),
            Message::WindowResized(size) => {
                self.window_size = size;
                Task::none()
            }
            Message::PickFolder => Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .pick_folder()
                        .await
                        .map(|handle| handle.path().to_path_buf())
                },
                Message::FolderPicked,
            ),
            Message::FolderPicked(Some(dir)) => {
                self.config.gallery_dir = Some(dir.clone());
                // A failed save should not block browsing the picked folder.
                if let Err(err) = config::save(&self.config) {
                    self.scan_error = Some(err.to_string());
                }
                scan_task(dir, self.sort_order)
            }
            Message::FolderPicked(None) => Task::none(),
            Message::LibraryScanned(Ok(library)) => {
                self.scan_error = None;
                self.library = library;
                self.library_changed();
                Task::none()
            }
            Message::LibraryScanned(Err(err)) => {
                self.scan_error = Some(err.to_string());
                Task::none()
            }
        }
    }

    /// Routes an overlay event through the choreography and re-posts any
    /// deferred actions through the message queue.
    pub(super) fn handle_gallery(&mut self, event: GalleryEvent, now: Instant) -> Task<Message> {
        let pendings = self.overlay.handle(event, now);
        self.sync_view_states(now);
        post_pendings(pendings)
    }

    /// One animation frame: polls the overlay primitives and the marquee
    /// strip, then keeps the marquee scroll position in sync.
    pub(super) fn handle_tick(&mut self, now: Instant) -> Task<Message> {
        let pendings = self.overlay.tick(now);
        self.sync_view_states(now);

        let mut tasks = vec![post_pendings(pendings)];

        if let Some(marquee::Event::SlideOutDone) = self.marquee_strip.tick(now) {
            tasks.push(self.handle_gallery(GalleryEvent::MarqueeSlideOutDone, now));
        }

        if self.marquee_strip.is_scrolling() {
            tasks.push(operation::scroll_to(
                marquee::track_id(),
                AbsoluteOffset {
                    x: self.marquee_strip.wrapped_offset(now, self.marquee_stride()),
                    y: 0.0,
                },
            ));
        }

        Task::batch(tasks)
    }

    fn rescan(&mut self) -> Task<Message> {
        match self.config.gallery_dir.clone() {
            Some(dir) => scan_task(dir, self.sort_order),
            None => Task::none(),
        }
    }
}

fn post_pendings(pendings: Vec<Pending>) -> Task<Message> {
    Task::batch(
        pendings
            .into_iter()
            .map(|pending| Task::done(Message::GalleryPending(pending))),
    )
}
