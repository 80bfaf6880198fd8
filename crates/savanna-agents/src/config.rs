//! Per-species constants for the animal life cycle.
//!
//! Each species is described by one [`SpeciesTraits`] value: when it may
//! breed, how long it lives, how likely and how large a litter is, and
//! (for predators) how many ticks a meal lasts. The [`SpeciesTable`] bundles
//! the three species so callers (simulator, tests) can override defaults
//! from `savanna-config.yaml` before a run starts. Traits never change while
//! a run is in progress.
//!
//! | Species | Breeding age | Max age | Breed prob. | Max litter | Food value |
//! |---------|--------------|---------|-------------|------------|------------|
//! | Rat     | 5            | 40      | 0.12        | 4          | --         |
//! | Zebra   | 6            | 48      | 0.075       | 2          | --         |
//! | Snake   | 15           | 150     | 0.08        | 2          | 9          |

use savanna_types::Species;
use serde::Deserialize;

/// Life-cycle constants for one species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesTraits {
    /// Minimum age (in ticks) at which the animal may breed.
    pub breeding_age: u32,

    /// The animal dies once its age exceeds this value.
    pub max_age: u32,

    /// Probability in `[0, 1]` that a breeding attempt produces a litter.
    pub breeding_probability: f64,

    /// Largest litter a single breeding event can produce.
    pub max_litter_size: u32,

    /// Ticks one meal sustains the animal. `None` for species without a
    /// hunger mechanic.
    pub food_value: Option<u32>,
}

impl SpeciesTraits {
    /// Default rat traits.
    pub const fn rat() -> Self {
        Self {
            breeding_age: 5,
            max_age: 40,
            breeding_probability: 0.12,
            max_litter_size: 4,
            food_value: None,
        }
    }

    /// Default zebra traits.
    pub const fn zebra() -> Self {
        Self {
            breeding_age: 6,
            max_age: 48,
            breeding_probability: 0.075,
            max_litter_size: 2,
            food_value: None,
        }
    }

    /// Default snake traits.
    pub const fn snake() -> Self {
        Self {
            breeding_age: 15,
            max_age: 150,
            breeding_probability: 0.08,
            max_litter_size: 2,
            food_value: Some(9),
        }
    }

    /// Default traits for `species`.
    pub const fn defaults_for(species: Species) -> Self {
        match species {
            Species::Rat => Self::rat(),
            Species::Zebra => Self::zebra(),
            Species::Snake => Self::snake(),
        }
    }

    /// Whether an animal of this species at `age` may breed.
    pub const fn can_breed(&self, age: u32) -> bool {
        age >= self.breeding_age
    }

    /// Whether this species has a hunger mechanic.
    pub const fn has_hunger(&self) -> bool {
        self.food_value.is_some()
    }
}

/// Optional per-field overrides for one species, as read from YAML.
///
/// Only the fields that are present replace the species default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraitOverrides {
    /// Override for [`SpeciesTraits::breeding_age`].
    #[serde(default)]
    pub breeding_age: Option<u32>,
    /// Override for [`SpeciesTraits::max_age`].
    #[serde(default)]
    pub max_age: Option<u32>,
    /// Override for [`SpeciesTraits::breeding_probability`].
    #[serde(default)]
    pub breeding_probability: Option<f64>,
    /// Override for [`SpeciesTraits::max_litter_size`].
    #[serde(default)]
    pub max_litter_size: Option<u32>,
    /// Override for [`SpeciesTraits::food_value`]. Ignored for species
    /// without a hunger mechanic.
    #[serde(default)]
    pub food_value: Option<u32>,
}

impl TraitOverrides {
    /// Apply these overrides on top of `base`.
    #[must_use]
    pub fn apply(&self, base: SpeciesTraits) -> SpeciesTraits {
        SpeciesTraits {
            breeding_age: self.breeding_age.unwrap_or(base.breeding_age),
            max_age: self.max_age.unwrap_or(base.max_age),
            breeding_probability: self
                .breeding_probability
                .map_or(base.breeding_probability, |p| p.clamp(0.0, 1.0)),
            max_litter_size: self.max_litter_size.unwrap_or(base.max_litter_size),
            food_value: base
                .food_value
                .map(|default| self.food_value.unwrap_or(default)),
        }
    }
}

/// The traits of every species in the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesTable {
    /// Rat traits.
    pub rat: SpeciesTraits,
    /// Zebra traits.
    pub zebra: SpeciesTraits,
    /// Snake traits.
    pub snake: SpeciesTraits,
}

impl Default for SpeciesTable {
    fn default() -> Self {
        Self {
            rat: SpeciesTraits::rat(),
            zebra: SpeciesTraits::zebra(),
            snake: SpeciesTraits::snake(),
        }
    }
}

impl SpeciesTable {
    /// Return the traits for `species`.
    pub const fn get(&self, species: Species) -> &SpeciesTraits {
        match species {
            Species::Rat => &self.rat,
            Species::Zebra => &self.zebra,
            Species::Snake => &self.snake,
        }
    }

    /// Return a mutable reference to the traits for `species`.
    pub const fn get_mut(&mut self, species: Species) -> &mut SpeciesTraits {
        match species {
            Species::Rat => &mut self.rat,
            Species::Zebra => &mut self.zebra,
            Species::Snake => &mut self.snake,
        }
    }
}
