//! Location graph — every location and its legal exits, immutable once
//! built.
//!
//! Built from the authored house table plus slot counts from a
//! `SlotSource`. Construction is the only place configuration errors
//! surface: dangling destinations, zero-slot locations, a missing entry.
//! Exits authored for directions that were never photographed are dropped
//! without error.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::config::{Config, HouseConfig, LocationConfig};
use crate::discovery::SlotSource;
use crate::error::GraphError;
use crate::types::LocationKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A panoramic viewpoint: one slot per direction, an optional exit per
    /// slot.
    Turnable {
        default_direction: usize,
        /// Exactly one entry per direction slot.
        exits: Vec<Option<String>>,
    },
    /// A corridor walked one slot at a time.
    Path {
        slots: usize,
        ending_pointer: Option<String>,
    },
}

impl Location {
    pub fn kind(&self) -> LocationKind {
        match self {
            Location::Turnable { .. } => LocationKind::Turnable,
            Location::Path { .. } => LocationKind::Path,
        }
    }

    pub fn slot_count(&self) -> usize {
        match self {
            Location::Turnable { exits, .. } => exits.len(),
            Location::Path { slots, .. } => *slots,
        }
    }

    /// Destination faced at `direction`. Always `None` on a path.
    pub fn exit(&self, direction: usize) -> Option<&str> {
        match self {
            Location::Turnable { exits, .. } => exits.get(direction)?.as_deref(),
            Location::Path { .. } => None,
        }
    }

    pub fn ending_pointer(&self) -> Option<&str> {
        match self {
            Location::Turnable { .. } => None,
            Location::Path { ending_pointer, .. } => ending_pointer.as_deref(),
        }
    }

    pub fn default_direction(&self) -> usize {
        match self {
            Location::Turnable {
                default_direction, ..
            } => *default_direction,
            Location::Path { .. } => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocationGraph {
    locations: BTreeMap<String, Location>,
    entry: String,
}

impl LocationGraph {
    /// Build and validate the graph. Fails on the first configuration
    /// error, visiting locations in name order.
    pub fn build(
        house: &HouseConfig,
        entry: &str,
        slots: &dyn SlotSource,
    ) -> Result<Self, GraphError> {
        if house.is_empty() {
            return Err(GraphError::Empty);
        }
        if !house.contains_key(entry) {
            return Err(GraphError::MissingEntry(entry.to_string()));
        }

        let mut locations = BTreeMap::new();
        for (name, authored) in house {
            let count = slots.slot_count(name);
            if count == 0 {
                return Err(GraphError::ZeroSlots {
                    location: name.clone(),
                });
            }

            let location = match authored {
                LocationConfig::Turnable { default_dir, exits } => {
                    let mut pointers = vec![None; count];
                    for (&direction, target) in exits {
                        if !house.contains_key(target) {
                            return Err(GraphError::DanglingExit {
                                location: name.clone(),
                                direction,
                                target: target.clone(),
                            });
                        }
                        match pointers.get_mut(direction) {
                            Some(slot) => *slot = Some(target.clone()),
                            None => debug!(
                                "Dropping exit {} -> {} from {}: only {} photo(s)",
                                direction, target, name, count
                            ),
                        }
                    }
                    if *default_dir >= count {
                        warn!(
                            "{} defaults to direction {} but has only {} photo(s)",
                            name, default_dir, count
                        );
                    }
                    Location::Turnable {
                        default_direction: *default_dir,
                        exits: pointers,
                    }
                }
                LocationConfig::Path { ending_pointer } => {
                    if let Some(target) = ending_pointer {
                        if !house.contains_key(target) {
                            return Err(GraphError::DanglingEndingPointer {
                                location: name.clone(),
                                target: target.clone(),
                            });
                        }
                    }
                    Location::Path {
                        slots: count,
                        ending_pointer: ending_pointer.clone(),
                    }
                }
            };
            locations.insert(name.clone(), location);
        }

        Ok(Self {
            locations,
            entry: entry.to_string(),
        })
    }

    pub fn from_config(config: &Config, slots: &dyn SlotSource) -> Result<Self, GraphError> {
        Self::build(&config.house, &config.entry_location, slots)
    }

    pub fn get(&self, name: &str) -> Option<&Location> {
        self.locations.get(name)
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Never zero: `build` rejects an empty house.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.locations.len()
    }
}

/// Graphs shared by the transition, input and controller tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::config::default_house;

    /// The default house: 8 views in the living room, 4 everywhere else.
    pub fn house() -> LocationGraph {
        let mut counts = BTreeMap::new();
        for name in ["kitchen", "momRoom", "corridor", "sonRoom", "bathroom"] {
            counts.insert(name.to_string(), 4);
        }
        counts.insert("livingRoom".to_string(), 8);
        LocationGraph::build(&default_house(), "livingRoom", &counts).unwrap()
    }

    /// livingRoom --(0)--> hall (3 steps) --> kitchen --(0)--> cellarStairs
    /// (2 steps, dead end).
    pub fn house_with_paths() -> LocationGraph {
        let mut house = HouseConfig::new();
        house.insert(
            "livingRoom".into(),
            LocationConfig::Turnable {
                default_dir: 0,
                exits: BTreeMap::from([(0, "hall".to_string())]),
            },
        );
        house.insert(
            "hall".into(),
            LocationConfig::Path {
                ending_pointer: Some("kitchen".into()),
            },
        );
        house.insert(
            "kitchen".into(),
            LocationConfig::Turnable {
                default_dir: 2,
                exits: BTreeMap::from([(0, "cellarStairs".to_string())]),
            },
        );
        house.insert(
            "cellarStairs".into(),
            LocationConfig::Path {
                ending_pointer: None,
            },
        );

        let counts = BTreeMap::from([
            ("livingRoom".to_string(), 8),
            ("hall".to_string(), 3),
            ("kitchen".to_string(), 4),
            ("cellarStairs".to_string(), 2),
        ]);
        LocationGraph::build(&house, "livingRoom", &counts).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_house;

    fn counts(pairs: &[(&str, usize)]) -> BTreeMap<String, usize> {
        pairs.iter().map(|(n, c)| (n.to_string(), *c)).collect()
    }

    #[test]
    fn test_default_house_builds() {
        let graph = fixtures::house();
        assert_eq!(graph.len(), 6);
        assert_eq!(graph.entry(), "livingRoom");

        let living = graph.get("livingRoom").unwrap();
        assert_eq!(living.kind(), LocationKind::Turnable);
        assert_eq!(living.slot_count(), 8);
        assert_eq!(living.exit(0), Some("kitchen"));
        assert_eq!(living.exit(1), None);
        assert_eq!(living.exit(4), Some("corridor"));
        assert_eq!(living.exit(7), Some("momRoom"));
        assert_eq!(living.exit(8), None);
    }

    #[test]
    fn test_out_of_range_exits_dropped_silently() {
        // Only five photos of the living room: the exits at 5 and 7 vanish.
        let slots = counts(&[
            ("livingRoom", 5),
            ("kitchen", 1),
            ("momRoom", 2),
            ("corridor", 4),
            ("sonRoom", 3),
            ("bathroom", 3),
        ]);
        let graph = LocationGraph::build(&default_house(), "livingRoom", &slots).unwrap();
        let living = graph.get("livingRoom").unwrap();
        assert_eq!(living.slot_count(), 5);
        assert_eq!(living.exit(0), Some("kitchen"));
        assert_eq!(living.exit(4), Some("corridor"));
        assert_eq!(living.exit(5), None);
        assert_eq!(living.exit(7), None);
    }

    #[test]
    fn test_dangling_exit_rejected() {
        let mut house = default_house();
        house.insert(
            "kitchen".into(),
            LocationConfig::Turnable {
                default_dir: 0,
                exits: BTreeMap::from([(1, "pantry".to_string())]),
            },
        );
        let slots: BTreeMap<String, usize> =
            house.keys().map(|name| (name.clone(), 4)).collect();

        let err = LocationGraph::build(&house, "livingRoom", &slots).unwrap_err();
        assert_eq!(
            err,
            GraphError::DanglingExit {
                location: "kitchen".into(),
                direction: 1,
                target: "pantry".into(),
            }
        );
    }

    #[test]
    fn test_dangling_exit_rejected_even_when_out_of_range() {
        let mut house = default_house();
        house.insert(
            "kitchen".into(),
            LocationConfig::Turnable {
                default_dir: 0,
                exits: BTreeMap::from([(9, "pantry".to_string())]),
            },
        );
        let slots: BTreeMap<String, usize> =
            house.keys().map(|name| (name.clone(), 4)).collect();

        assert!(matches!(
            LocationGraph::build(&house, "livingRoom", &slots),
            Err(GraphError::DanglingExit { .. })
        ));
    }

    #[test]
    fn test_dangling_ending_pointer_rejected() {
        let mut house = HouseConfig::new();
        house.insert(
            "hall".into(),
            LocationConfig::Path {
                ending_pointer: Some("garden".into()),
            },
        );
        let err = LocationGraph::build(&house, "hall", &counts(&[("hall", 3)])).unwrap_err();
        assert_eq!(
            err,
            GraphError::DanglingEndingPointer {
                location: "hall".into(),
                target: "garden".into(),
            }
        );
    }

    #[test]
    fn test_zero_slots_rejected() {
        let slots = counts(&[("livingRoom", 8), ("kitchen", 4)]);
        let err = LocationGraph::build(&default_house(), "livingRoom", &slots).unwrap_err();
        // bathroom sorts first among the locations with no photos
        assert_eq!(
            err,
            GraphError::ZeroSlots {
                location: "bathroom".into()
            }
        );
    }

    #[test]
    fn test_missing_entry_rejected() {
        let slots: BTreeMap<String, usize> =
            default_house().keys().map(|name| (name.clone(), 4)).collect();
        let err = LocationGraph::build(&default_house(), "attic", &slots).unwrap_err();
        assert_eq!(err, GraphError::MissingEntry("attic".into()));
    }

    #[test]
    fn test_empty_house_rejected() {
        let err = LocationGraph::build(&HouseConfig::new(), "livingRoom", &counts(&[]))
            .unwrap_err();
        assert_eq!(err, GraphError::Empty);
    }

    #[test]
    fn test_default_direction_out_of_range_is_kept() {
        // momRoom defaults to 1 but only one photo exists; not a load error
        let slots: BTreeMap<String, usize> = default_house()
            .keys()
            .map(|name| (name.clone(), if name == "momRoom" { 1 } else { 8 }))
            .collect();
        let graph = LocationGraph::build(&default_house(), "livingRoom", &slots).unwrap();
        assert_eq!(graph.get("momRoom").unwrap().default_direction(), 1);
    }

    #[test]
    fn test_paths() {
        let graph = fixtures::house_with_paths();
        let hall = graph.get("hall").unwrap();
        assert_eq!(hall.kind(), LocationKind::Path);
        assert_eq!(hall.slot_count(), 3);
        assert_eq!(hall.ending_pointer(), Some("kitchen"));
        assert_eq!(hall.exit(0), None);

        let stairs = graph.get("cellarStairs").unwrap();
        assert_eq!(stairs.ending_pointer(), None);
    }
}
