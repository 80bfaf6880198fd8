//! Value structs shared across the workspace.

use serde::{Deserialize, Serialize};

use crate::enums::Species;

/// An immutable grid coordinate.
///
/// Rows grow downward and columns grow rightward. A location carries no
/// knowledge of grid bounds; the field decides whether it is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Row index (0-based).
    pub row: usize,
    /// Column index (0-based).
    pub col: usize,
}

impl Location {
    /// Create a location at `(row, col)`.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Number of live animals per species.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    /// Live rats.
    pub rats: u32,
    /// Live zebras.
    pub zebras: u32,
    /// Live snakes.
    pub snakes: u32,
}

impl PopulationCounts {
    /// Return the count for one species.
    pub const fn get(&self, species: Species) -> u32 {
        match species {
            Species::Rat => self.rats,
            Species::Zebra => self.zebras,
            Species::Snake => self.snakes,
        }
    }

    /// Count one more animal of `species`.
    pub const fn record(&mut self, species: Species) {
        let slot = match species {
            Species::Rat => &mut self.rats,
            Species::Zebra => &mut self.zebras,
            Species::Snake => &mut self.snakes,
        };
        *slot = slot.saturating_add(1);
    }

    /// Total live animals across all species.
    pub const fn total(&self) -> u32 {
        self.rats.saturating_add(self.zebras).saturating_add(self.snakes)
    }

    /// Number of species with at least one live animal.
    pub fn species_present(&self) -> usize {
        Species::ALL
            .into_iter()
            .filter(|s| self.get(*s) > 0)
            .count()
    }
}

impl FromIterator<Species> for PopulationCounts {
    fn from_iter<I: IntoIterator<Item = Species>>(iter: I) -> Self {
        let mut counts = Self::default();
        for species in iter {
            counts.record(species);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locations_compare_by_value() {
        assert_eq!(Location::new(2, 3), Location { row: 2, col: 3 });
        assert_ne!(Location::new(2, 3), Location::new(3, 2));
    }

    #[test]
    fn counts_collect_from_species() {
        let counts: PopulationCounts = [Species::Rat, Species::Rat, Species::Snake]
            .into_iter()
            .collect();
        assert_eq!(counts.get(Species::Rat), 2);
        assert_eq!(counts.get(Species::Zebra), 0);
        assert_eq!(counts.get(Species::Snake), 1);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.species_present(), 2);
    }

    #[test]
    fn empty_counts_have_no_species() {
        assert_eq!(PopulationCounts::default().species_present(), 0);
    }
}
