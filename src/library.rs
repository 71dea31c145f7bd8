// SPDX-License-Identifier: MPL-2.0
//! Gallery library scanner.
//!
//! Scans the gallery root directory for supported image formats. First-level
//! subdirectories become categories; images sitting directly in the root are
//! collected under an `uncategorized` group. An optional `tags.toml` sidecar
//! inside a category directory attaches free-form tags to individual files
//! for the search panel.

use crate::config::SortOrder;
use crate::error::Result;
use crate::gallery::Group;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Group id used for images directly in the gallery root.
pub const UNCATEGORIZED: &str = "uncategorized";

const TAGS_FILE: &str = "tags.toml";

/// One image found in the gallery, with the metadata the search panel
/// filters on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub path: PathBuf,
    /// File name without extension, used as the display name.
    pub name: String,
    pub group_id: String,
    pub tags: Vec<String>,
}

/// The scanned gallery: every image record plus the derived category groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryLibrary {
    records: Vec<ImageRecord>,
    groups: Vec<Group>,
}

impl GalleryLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `root` for supported images and derives category groups.
    ///
    /// Returns an error if the root directory cannot be read; unreadable
    /// entries inside it are skipped.
    pub fn scan(root: &Path, sort_order: SortOrder) -> Result<Self> {
        let mut records = Vec::new();
        let mut category_dirs = Vec::new();

        for entry in std::fs::read_dir(root)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && is_supported_image(&path) {
                records.push(record_for(&path, UNCATEGORIZED, &HashMap::new()));
            } else if path.is_dir() {
                category_dirs.push(path);
            }
        }

        // Scan each first-level subdirectory as a category. Deeper nesting is
        // ignored; the gallery layout is intentionally flat.
        category_dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        for dir in &category_dirs {
            let Some(id) = dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let tags = load_tags(dir);
            for entry in std::fs::read_dir(dir)? {
                let entry = entry?;
                let path = entry.path();
                if path.is_file() && is_supported_image(&path) {
                    records.push(record_for(&path, id, &tags));
                }
            }
        }

        sort_records(&mut records, sort_order);
        let groups = derive_groups(&records);

        Ok(Self { records, groups })
    }

    /// Returns every image record in sorted order.
    #[must_use]
    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    /// Returns the derived category groups, ordered by id.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Returns the image paths belonging to one category.
    #[must_use]
    pub fn images_from(&self, group_id: &str) -> Vec<PathBuf> {
        self.records
            .iter()
            .filter(|r| r.group_id == group_id)
            .map(|r| r.path.clone())
            .collect()
    }

    /// Returns every image path, in sorted order.
    pub fn all_paths(&self) -> impl Iterator<Item = &Path> {
        self.records.iter().map(|r| r.path.as_path())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn record_for(path: &Path, group_id: &str, tags: &HashMap<String, Vec<String>>) -> ImageRecord {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let name = path
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    ImageRecord {
        path: path.to_path_buf(),
        name,
        group_id: group_id.to_string(),
        tags: tags.get(&file_name).cloned().unwrap_or_default(),
    }
}

/// Sidecar format: a `[tags]` table mapping file names to tag lists.
#[derive(Debug, Default, Deserialize)]
struct TagsFile {
    #[serde(default)]
    tags: HashMap<String, Vec<String>>,
}

/// Reads the `tags.toml` sidecar of a category directory. A missing or
/// malformed sidecar yields no tags rather than failing the scan.
fn load_tags(dir: &Path) -> HashMap<String, Vec<String>> {
    let path = dir.join(TAGS_FILE);
    let Ok(content) = std::fs::read_to_string(&path) else {
        return HashMap::new();
    };
    toml::from_str::<TagsFile>(&content)
        .map(|f| f.tags)
        .unwrap_or_default()
}

/// Checks if a file has a supported image extension.
fn is_supported_image(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    matches!(
        ext.to_ascii_lowercase().as_str(),
        "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp"
    )
}

/// Sorts image records according to the configured sort order. Records are
/// always grouped by category first so covers and marquee order are stable.
fn sort_records(records: &mut [ImageRecord], sort_order: SortOrder) {
    match sort_order {
        SortOrder::Alphabetical => {
            records.sort_by(|a, b| {
                (&a.group_id, a.path.file_name()).cmp(&(&b.group_id, b.path.file_name()))
            });
        }
        SortOrder::ModifiedDate => {
            records.sort_by(|a, b| {
                let a_time = modified_time(&a.path);
                let b_time = modified_time(&b.path);
                (&a.group_id, a_time).cmp(&(&b.group_id, b_time))
            });
        }
        SortOrder::CreatedDate => {
            records.sort_by(|a, b| {
                let a_time = created_time(&a.path);
                let b_time = created_time(&b.path);
                (&a.group_id, a_time).cmp(&(&b.group_id, b_time))
            });
        }
    }
}

fn modified_time(path: &Path) -> std::time::SystemTime {
    path.metadata()
        .and_then(|m| m.modified())
        .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
}

fn created_time(path: &Path) -> std::time::SystemTime {
    path.metadata()
        .and_then(|m| m.created())
        .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
}

/// Builds one group per distinct category, keeping record order: the first
/// image of a category becomes its cover.
fn derive_groups(records: &[ImageRecord]) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|g| g.id == record.group_id) {
            Some(group) => group.count += 1,
            None => groups.push(Group::new(
                record.group_id.clone(),
                record.path.clone(),
                1,
            )),
        }
    }
    groups
}
