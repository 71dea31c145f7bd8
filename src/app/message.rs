// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::gallery::controller::{Event as GalleryEvent, Pending};
use crate::library::GalleryLibrary;
use crate::ui::chooser;
use crate::ui::marquee;
use crate::ui::mode_switcher;
use crate::ui::search;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    ModeSwitcher(mode_switcher::Message),
    Chooser(chooser::Message),
    Marquee(marquee::Message),
    Search(search::Message),
    /// An overlay event: a user intent or an animation completion.
    Gallery(GalleryEvent),
    /// A deferred overlay action re-posted through the message queue so its
    /// ordering against newer events is the queue order.
    GalleryPending(Pending),
    /// Animation frame for the overlay choreography and the marquee scroll.
    Tick(Instant),
    /// The window regained focus; the gallery directory is rescanned.
    WindowFocused,
    WindowResized(iced::Size),
    /// Trigger the folder picker from the empty state.
    PickFolder,
    /// Result from the folder picker.
    FolderPicked(Option<PathBuf>),
    /// Result from async gallery scanning.
    LibraryScanned(Result<GalleryLibrary, Error>),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional directory containing Fluent `.ftl` files for custom builds.
    pub i18n_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    pub config_dir: Option<String>,
    /// Optional gallery directory, overriding the configured one.
    pub gallery_dir: Option<String>,
}
