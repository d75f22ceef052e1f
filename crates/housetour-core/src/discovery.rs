//! Asset discovery — how many photos each location has.
//!
//! The graph never counts photos itself; a `SlotSource` is injected when it
//! is built. `ImageDirectory` probes `{dir}/{name}1.jpg`, `{name}2.jpg`, ...
//! until one is missing.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;

/// Supplies the slot count for a location name.
pub trait SlotSource {
    fn slot_count(&self, location: &str) -> usize;
}

impl SlotSource for HashMap<String, usize> {
    fn slot_count(&self, location: &str) -> usize {
        self.get(location).copied().unwrap_or(0)
    }
}

impl SlotSource for BTreeMap<String, usize> {
    fn slot_count(&self, location: &str) -> usize {
        self.get(location).copied().unwrap_or(0)
    }
}

/// Photos on disk, numbered from 1 per location.
#[derive(Debug, Clone)]
pub struct ImageDirectory {
    root: PathBuf,
    extension: String,
}

impl ImageDirectory {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.resolve_images_dir(), config.image_extension.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File name of a slot; slot 0 is `{name}1.{ext}`.
    pub fn file_name(&self, location: &str, slot: usize) -> String {
        format!("{}{}.{}", location, slot + 1, self.extension)
    }

    pub fn photo_path(&self, location: &str, slot: usize) -> PathBuf {
        self.root.join(self.file_name(location, slot))
    }
}

impl SlotSource for ImageDirectory {
    fn slot_count(&self, location: &str) -> usize {
        let mut count = 0;
        while self.photo_path(location, count).is_file() {
            count += 1;
        }
        debug!("Discovered {} photo(s) for {}", count, location);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"jpg").unwrap();
    }

    #[test]
    fn test_probe_stops_at_first_gap() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "kitchen1.jpg");
        touch(tmp.path(), "kitchen2.jpg");
        touch(tmp.path(), "kitchen3.jpg");
        // gap at 4, so 5 is never reached
        touch(tmp.path(), "kitchen5.jpg");

        let images = ImageDirectory::new(tmp.path(), "jpg");
        assert_eq!(images.slot_count("kitchen"), 3);
    }

    #[test]
    fn test_missing_location_has_zero_slots() {
        let tmp = tempfile::tempdir().unwrap();
        let images = ImageDirectory::new(tmp.path(), "jpg");
        assert_eq!(images.slot_count("attic"), 0);
    }

    #[test]
    fn test_missing_directory_has_zero_slots() {
        let images = ImageDirectory::new("/nonexistent/housetour/images", "jpg");
        assert_eq!(images.slot_count("kitchen"), 0);
    }

    #[test]
    fn test_extension_is_respected() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "hall1.png");
        touch(tmp.path(), "hall2.jpg");

        assert_eq!(ImageDirectory::new(tmp.path(), "png").slot_count("hall"), 1);
        assert_eq!(ImageDirectory::new(tmp.path(), "jpg").slot_count("hall"), 0);
    }

    #[test]
    fn test_photo_path_is_one_based() {
        let images = ImageDirectory::new("Images", "jpg");
        assert_eq!(
            images.photo_path("livingRoom", 0),
            PathBuf::from("Images/livingRoom1.jpg")
        );
        assert_eq!(images.file_name("livingRoom", 7), "livingRoom8.jpg");
    }

    #[test]
    fn test_map_source() {
        let mut counts = HashMap::new();
        counts.insert("kitchen".to_string(), 4);
        assert_eq!(counts.slot_count("kitchen"), 4);
        assert_eq!(counts.slot_count("cellar"), 0);
    }
}
