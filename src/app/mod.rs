// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the grid and the overlay.
//!
//! The `App` struct wires together the domains (library, overlay choreography,
//! localization) and translates messages into side effects like config
//! persistence or directory scanning. Policy decisions (window sizing,
//! persistence format, locale switching) stay close to the main update loop
//! so user-facing behavior is easy to audit.

mod message;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, Config, SortOrder};
use crate::gallery::Group;
use crate::i18n::fluent::I18n;
use crate::library::GalleryLibrary;
use crate::ui::design_tokens::sizing;
use crate::ui::grid;
use crate::ui::marquee;
use crate::ui::overlay::Overlay;
use crate::ui::search;
use crate::ui::theming::ThemeMode;
use iced::{window, Size, Task};
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

pub const WINDOW_DEFAULT_WIDTH: u32 = 1100;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 700;
pub const MIN_WINDOW_WIDTH: u32 = 800;
pub const MIN_WINDOW_HEIGHT: u32 = 600;

/// Root Iced application state bridging the gallery library, the overlay
/// choreography, and persisted preferences.
pub struct App {
    pub i18n: I18n,
    config: Config,
    library: GalleryLibrary,
    overlay: Overlay,
    marquee_strip: marquee::State,
    /// Whether the marquee strip's stage was mounted on the previous sync.
    marquee_mounted: bool,
    /// Images of the group the marquee currently renders.
    marquee_images: Vec<PathBuf>,
    search_panel: search::State,
    search_mounted: bool,
    grid_columns: Vec<Vec<PathBuf>>,
    grid_dims: grid::DimensionCache,
    window_size: Size,
    theme_mode: ThemeMode,
    marquee_speed: f32,
    sort_order: SortOrder,
    scan_error: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("phase", &self.overlay.controller().phase())
            .field("images", &self.library.len())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH as f32, MIN_WINDOW_HEIGHT as f32)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self {
            i18n: I18n::default(),
            config: Config::default(),
            library: GalleryLibrary::new(),
            overlay: Overlay::new(),
            marquee_strip: marquee::State::new(),
            marquee_mounted: false,
            marquee_images: Vec::new(),
            search_panel: search::State::new(),
            search_mounted: false,
            grid_columns: Vec::new(),
            grid_dims: grid::DimensionCache::default(),
            window_size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
            theme_mode: ThemeMode::System,
            marquee_speed: config::DEFAULT_MARQUEE_SPEED,
            sort_order: SortOrder::Alphabetical,
            scan_error: None,
        }
    }
}

impl App {
    /// Initializes application state and kicks off the first gallery scan if
    /// a directory is known from the CLI or the config.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load_with_dir(flags.config_dir.as_deref().map(std::path::Path::new))
            .unwrap_or_default();
        let i18n = I18n::new(flags.lang.clone(), flags.i18n_dir.clone(), &config);

        let mut app = App {
            i18n,
            ..Self::default()
        };

        app.theme_mode = config.theme_mode.unwrap_or_default();
        app.sort_order = config.sort_order.unwrap_or_default();
        app.marquee_speed = config::clamp_marquee_speed(
            config.marquee_speed.unwrap_or(config::DEFAULT_MARQUEE_SPEED),
        );

        let cli_dir = flags.gallery_dir.map(PathBuf::from);
        if let Some(dir) = &cli_dir {
            app.config = Config {
                gallery_dir: Some(dir.clone()),
                ..config
            };
        } else {
            app.config = config;
        }

        let task = match app.config.gallery_dir.clone() {
            Some(dir) => scan_task(dir, app.sort_order),
            None => Task::none(),
        };

        (app, task)
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> iced::Theme {
        self.theme_mode.iced_theme()
    }

    /// The group the marquee renders: the picked one, or the first available.
    fn effective_group(&self) -> Option<&Group> {
        self.overlay
            .controller()
            .selected_group()
            .or_else(|| self.library.groups().first())
    }

    /// Rebuilds the cached per-library views after a scan.
    fn library_changed(&mut self) {
        self.grid_columns = grid::layout(
            self.library.all_paths(),
            sizing::GRID_COLUMNS,
            &mut self.grid_dims,
        );
        self.refresh_marquee_images();
    }

    fn refresh_marquee_images(&mut self) {
        self.marquee_images = match self.effective_group() {
            Some(group) => self.library.images_from(&group.id),
            None => Vec::new(),
        };
    }

    /// Mounts, unmounts, and forwards closing intent to the marquee strip and
    /// the search panel as their stages appear and disappear.
    fn sync_view_states(&mut self, now: Instant) {
        let marquee_stage_mounted = self.overlay.marquee_fade().is_mounted();
        if marquee_stage_mounted && !self.marquee_mounted {
            self.refresh_marquee_images();
            let count = self.marquee_images.len();
            let speed = marquee::effective_speed(self.marquee_speed, self.marquee_stride() * count as f32);
            self.marquee_strip.begin(count, speed, now);
        } else if !marquee_stage_mounted && self.marquee_mounted {
            self.marquee_strip.reset();
        }
        self.marquee_mounted = marquee_stage_mounted;

        if marquee_stage_mounted {
            self.marquee_strip
                .set_closing(self.overlay.controller().marquee_closing(), now);
        }

        let search_stage_mounted = self.overlay.search_fade().is_mounted();
        if self.search_mounted && !search_stage_mounted {
            self.search_panel.reset();
        }
        self.search_mounted = search_stage_mounted;
    }

    /// Distance between the left edges of two marquee items at the current
    /// window size.
    fn marquee_stride(&self) -> f32 {
        let item_height = self.window_size.height * marquee::ITEM_HEIGHT_FRAC;
        item_height * marquee::ITEM_ASPECT + sizing::ITEM_GAP
    }

    /// Whether anything on screen needs animation frames right now.
    fn needs_frames(&self) -> bool {
        self.overlay.is_animating() || self.marquee_strip.needs_frames()
    }
}

/// Spawns the gallery scan off the UI thread.
fn scan_task(dir: PathBuf, sort_order: SortOrder) -> Task<Message> {
    Task::perform(
        async move { GalleryLibrary::scan(&dir, sort_order) },
        Message::LibraryScanned,
    )
}
