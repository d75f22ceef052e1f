//! Configuration — YAML config + env var overrides, plus the house table.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::LocationConfigError;
use crate::input::KeyBindings;

/// Location name -> authored entry.
pub type HouseConfig = BTreeMap<String, LocationConfig>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `{location}{n}.{ext}` photos
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,

    /// Photo file extension, without the dot
    #[serde(default = "default_image_extension")]
    pub image_extension: String,

    /// Where the tour starts
    #[serde(default = "default_entry_location")]
    pub entry_location: String,

    /// Milliseconds between ticks of the controller loop
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Logical canvas size, used to lay out the on-screen arrows
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,

    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,

    #[serde(default)]
    pub key_bindings: KeyBindings,

    /// Location table (slot counts come from asset discovery, not from here)
    #[serde(default = "default_house")]
    pub house: HouseConfig,

    /// Resolved project root (set at load time, not serialized from YAML)
    #[serde(skip)]
    pub project_root: PathBuf,
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("Images")
}
fn default_image_extension() -> String {
    "jpg".into()
}
fn default_entry_location() -> String {
    "livingRoom".into()
}
fn default_tick_interval_ms() -> u64 {
    16
}
fn default_canvas_width() -> u32 {
    800
}
fn default_canvas_height() -> u32 {
    // 16:9
    450
}

/// The house as it was first photographed.
pub fn default_house() -> HouseConfig {
    let turnable = |default_dir: usize, exits: &[(usize, &str)]| LocationConfig::Turnable {
        default_dir,
        exits: exits
            .iter()
            .map(|(dir, target)| (*dir, target.to_string()))
            .collect(),
    };

    let mut house = HouseConfig::new();
    house.insert(
        "livingRoom".into(),
        turnable(
            0,
            &[(0, "kitchen"), (4, "corridor"), (5, "sonRoom"), (7, "momRoom")],
        ),
    );
    house.insert("kitchen".into(), turnable(0, &[]));
    house.insert("momRoom".into(), turnable(1, &[]));
    house.insert("corridor".into(), turnable(3, &[(1, "bathroom")]));
    house.insert("sonRoom".into(), turnable(2, &[]));
    house.insert("bathroom".into(), turnable(2, &[]));
    house
}

impl Config {
    /// Load config from a YAML file with env var overrides.
    pub fn load(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        let mut config: Config =
            serde_yaml::from_str(&content).context("Failed to parse config.yaml")?;

        config.project_root = config_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf()
            .canonicalize()
            .unwrap_or_else(|_| {
                config_path
                    .parent()
                    .unwrap_or(Path::new("."))
                    .to_path_buf()
            });

        if let Ok(dir) = std::env::var("HOUSETOUR_IMAGES_DIR") {
            config.images_dir = PathBuf::from(dir);
        }
        if let Ok(entry) = std::env::var("HOUSETOUR_ENTRY") {
            config.entry_location = entry;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load config from the default location (project_root/config.yaml)
    pub fn load_from_dir(project_root: &Path) -> Result<Self> {
        Self::load(&project_root.join("config.yaml"))
    }

    fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            anyhow::bail!("tick_interval_ms must be greater than zero");
        }
        if self.entry_location.trim().is_empty() {
            anyhow::bail!("entry_location must not be empty");
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            anyhow::bail!(
                "canvas must have a non-zero size (got {}x{})",
                self.canvas_width,
                self.canvas_height
            );
        }
        Ok(())
    }

    /// Images directory, resolved against the project root when relative.
    pub fn resolve_images_dir(&self) -> PathBuf {
        if self.images_dir.is_absolute() {
            self.images_dir.clone()
        } else {
            self.project_root.join(&self.images_dir)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            images_dir: default_images_dir(),
            image_extension: default_image_extension(),
            entry_location: default_entry_location(),
            tick_interval_ms: default_tick_interval_ms(),
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            key_bindings: KeyBindings::default(),
            house: default_house(),
            project_root: PathBuf::new(),
        }
    }
}

// ── Location entries ──

/// One authored location. Slot counts are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation", into = "RawLocation")]
pub enum LocationConfig {
    Turnable {
        default_dir: usize,
        exits: BTreeMap<usize, String>,
    },
    Path {
        ending_pointer: Option<String>,
    },
}

/// Wire form of a location entry. Accepts both snake_case and the
/// camelCase keys the house table was first written with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLocation {
    #[serde(default, alias = "isPath")]
    is_path: bool,
    #[serde(default, alias = "defaultDir", skip_serializing_if = "Option::is_none")]
    default_dir: Option<usize>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    exits: BTreeMap<usize, String>,
    #[serde(
        default,
        alias = "endingPointer",
        skip_serializing_if = "Option::is_none"
    )]
    ending_pointer: Option<String>,
}

impl TryFrom<RawLocation> for LocationConfig {
    type Error = LocationConfigError;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        if raw.is_path {
            if !raw.exits.is_empty() {
                return Err(LocationConfigError::PathWithExits);
            }
            Ok(LocationConfig::Path {
                ending_pointer: raw.ending_pointer,
            })
        } else {
            if raw.ending_pointer.is_some() {
                return Err(LocationConfigError::TurnableWithEndingPointer);
            }
            Ok(LocationConfig::Turnable {
                default_dir: raw.default_dir.unwrap_or(0),
                exits: raw.exits,
            })
        }
    }
}

impl From<LocationConfig> for RawLocation {
    fn from(location: LocationConfig) -> Self {
        match location {
            LocationConfig::Turnable { default_dir, exits } => RawLocation {
                is_path: false,
                default_dir: Some(default_dir),
                exits,
                ending_pointer: None,
            },
            LocationConfig::Path { ending_pointer } => RawLocation {
                is_path: true,
                ending_pointer,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_defaults() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "image_extension: jpg").unwrap();

        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.images_dir, PathBuf::from("Images"));
        assert_eq!(config.tick_interval_ms, 16);
        assert_eq!(config.canvas_width, 800);
        assert_eq!(config.canvas_height, 450);
        assert_eq!(config.house.len(), 6);
        assert_eq!(
            config.house.get("momRoom"),
            Some(&LocationConfig::Turnable {
                default_dir: 1,
                exits: BTreeMap::new(),
            })
        );
    }

    #[test]
    fn test_load_authored_house_table() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(
            tmp,
            "house:\n  livingRoom: {{ defaultDir: 0, exits: {{ 0: hall }} }}\n  hall: {{ isPath: true, endingPointer: kitchen }}\n  kitchen: {{ defaultDir: 2 }}"
        )
        .unwrap();

        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.house.len(), 3);
        assert_eq!(
            config.house.get("hall"),
            Some(&LocationConfig::Path {
                ending_pointer: Some("kitchen".into()),
            })
        );
        match config.house.get("livingRoom") {
            Some(LocationConfig::Turnable { default_dir, exits }) => {
                assert_eq!(*default_dir, 0);
                assert_eq!(exits.get(&0).map(String::as_str), Some("hall"));
            }
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn test_snake_case_keys_accepted() {
        let raw = "is_path: true\nending_pointer: kitchen";
        let location: LocationConfig = serde_yaml::from_str(raw).unwrap();
        assert_eq!(
            location,
            LocationConfig::Path {
                ending_pointer: Some("kitchen".into()),
            }
        );
    }

    #[test]
    fn test_dead_end_path_has_no_pointer() {
        let location: LocationConfig = serde_yaml::from_str("isPath: true").unwrap();
        assert_eq!(
            location,
            LocationConfig::Path {
                ending_pointer: None
            }
        );
    }

    #[test]
    fn test_path_with_exits_rejected() {
        let result: Result<LocationConfig, _> =
            serde_yaml::from_str("isPath: true\nexits: { 0: kitchen }");
        assert!(result.is_err());
    }

    #[test]
    fn test_turnable_with_ending_pointer_rejected() {
        let result: Result<LocationConfig, _> =
            serde_yaml::from_str("defaultDir: 1\nendingPointer: kitchen");
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_tick_interval_fails() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "tick_interval_ms: 0").unwrap();

        assert!(Config::load(tmp.path()).is_err());
    }

    #[test]
    fn test_relative_images_dir_resolves_against_root() {
        let config = Config {
            project_root: PathBuf::from("/srv/tour"),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_images_dir(),
            PathBuf::from("/srv/tour/Images")
        );
    }
}
