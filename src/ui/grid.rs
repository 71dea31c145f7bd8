// SPDX-License-Identifier: MPL-2.0
//! Background image grid: the always-visible base layer under the overlay.
//!
//! Images are distributed across four columns, assigning each image to the
//! currently shortest column estimated from its aspect ratio. Aspect ratios
//! come from a bounded cache of image header reads so large galleries do not
//! decode every file up front.

use crate::ui::design_tokens::sizing;
use iced::widget::{container, image, scrollable, Column, Row};
use iced::{ContentFit, Element, Length};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Aspect ratio assumed when a file's dimensions cannot be read.
const FALLBACK_ASPECT: f32 = 1.0;

/// Bounded cache of image dimensions, read from file headers.
#[derive(Debug)]
pub struct DimensionCache {
    cache: LruCache<PathBuf, (u32, u32)>,
}

impl Default for DimensionCache {
    fn default() -> Self {
        Self::new(2048)
    }
}

impl DimensionCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is at least 1");
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Returns width / height for `path`, reading the file header on a miss.
    pub fn aspect(&mut self, path: &Path) -> f32 {
        if let Some((w, h)) = self.cache.get(path) {
            return ratio(*w, *h);
        }
        match image_rs::image_dimensions(path) {
            Ok((w, h)) => {
                self.cache.put(path.to_path_buf(), (w, h));
                ratio(w, h)
            }
            Err(_) => FALLBACK_ASPECT,
        }
    }

    /// Seeds the cache without touching the filesystem.
    pub fn insert(&mut self, path: PathBuf, dimensions: (u32, u32)) {
        self.cache.put(path, dimensions);
    }
}

fn ratio(w: u32, h: u32) -> f32 {
    if h == 0 {
        return FALLBACK_ASPECT;
    }
    w as f32 / h as f32
}

/// Distributes `paths` over `columns` columns, placing each image in the
/// column with the smallest estimated height so far. Computed once per
/// library change, not per frame.
pub fn layout<'a>(
    paths: impl IntoIterator<Item = &'a Path>,
    columns: usize,
    dims: &mut DimensionCache,
) -> Vec<Vec<PathBuf>> {
    let columns = columns.max(1);
    let mut result: Vec<Vec<PathBuf>> = vec![Vec::new(); columns];
    let mut heights = vec![0.0_f32; columns];

    for path in paths {
        let aspect = dims.aspect(path).max(0.05);
        let shortest = heights
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap_or(0);
        result[shortest].push(path.to_path_buf());
        // Column widths are equal, so relative height is 1 / aspect.
        heights[shortest] += 1.0 / aspect;
    }

    result
}

/// Renders the scrollable four-column grid from a precomputed layout.
pub fn view<'a, Message: Clone + 'a>(columns: &'a [Vec<PathBuf>]) -> Element<'a, Message> {
    let mut row = Row::new().spacing(sizing::ITEM_GAP).padding(sizing::ITEM_GAP);
    for column_paths in columns {
        let mut column = Column::new()
            .spacing(sizing::ITEM_GAP)
            .width(Length::FillPortion(1));
        for path in column_paths {
            column = column.push(
                image(image::Handle::from_path(path))
                    .content_fit(ContentFit::Cover)
                    .width(Length::Fill),
            );
        }
        row = row.push(column);
    }

    container(scrollable(row).width(Length::Fill).height(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
