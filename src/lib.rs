// SPDX-License-Identifier: MPL-2.0
//! `iced_gallery` is an animated photo gallery browser built with the Iced
//! GUI framework.
//!
//! A background grid shows every image of a local gallery directory; an
//! overlay choreographs three views (category chooser, marquee strip, and
//! search panel) with staged enter/exit animations and intro curtains. It
//! demonstrates internationalization with Fluent, user preference
//! management, and modular UI design.

#![doc(html_root_url = "https://docs.rs/iced_gallery/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod library;
pub mod ui;
