// SPDX-License-Identifier: MPL-2.0
//! Category group records selectable in the chooser view.

use std::path::PathBuf;

/// A gallery category: a stable id, a display title, a cover image, and the
/// number of images it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub title: String,
    pub cover: PathBuf,
    pub count: usize,
}

impl Group {
    /// Creates a group whose title mirrors its id.
    #[must_use]
    pub fn new(id: impl Into<String>, cover: PathBuf, count: usize) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            cover,
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_group_title_mirrors_id() {
        let group = Group::new("travel", PathBuf::from("travel/a.jpg"), 3);
        assert_eq!(group.id, "travel");
        assert_eq!(group.title, "travel");
        assert_eq!(group.count, 3);
    }
}
