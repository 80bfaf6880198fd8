//! Enumeration types for the Savanna simulation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

/// The species tag carried by every animal.
///
/// Rats and zebras are herbivores with the same rule set and different
/// constants. Snakes are predators with a hunger mechanic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    /// Small, fast-breeding herbivore. Hunted by snakes.
    Rat,
    /// Large, slow-breeding herbivore. Rests at night.
    Zebra,
    /// Predator that must eat rats to survive.
    Snake,
}

impl Species {
    /// Every species, in the priority order used when seeding the grid
    /// (predators first, then herbivores).
    pub const ALL: [Self; 3] = [Self::Snake, Self::Rat, Self::Zebra];

    /// Whether this species hunts other animals.
    pub const fn is_predator(self) -> bool {
        matches!(self, Self::Snake)
    }

    /// Whether `self` is eaten by `predator`.
    pub const fn is_prey_of(self, predator: Self) -> bool {
        matches!((predator, self), (Self::Snake, Self::Rat))
    }
}

impl core::fmt::Display for Species {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Rat => write!(f, "rat"),
            Self::Zebra => write!(f, "zebra"),
            Self::Snake => write!(f, "snake"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sex
// ---------------------------------------------------------------------------

/// Biological sex, fixed at birth. Breeding requires two different sexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Female.
    Female,
    /// Male.
    Male,
}

impl Sex {
    /// Map a fair coin flip to a sex (`true` is female).
    pub const fn from_coin(flip: bool) -> Self {
        if flip { Self::Female } else { Self::Male }
    }

    /// Whether the two sexes can breed with each other.
    pub const fn complements(self, other: Self) -> bool {
        !matches!(
            (self, other),
            (Self::Female, Self::Female) | (Self::Male, Self::Male)
        )
    }
}

// ---------------------------------------------------------------------------
// Day phase
// ---------------------------------------------------------------------------

/// The two-phase day/night cycle held by the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPhase {
    /// Animals move freely.
    #[default]
    Day,
    /// Herbivores stay put.
    Night,
}

impl DayPhase {
    /// Return the opposite phase.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Day => Self::Night,
            Self::Night => Self::Day,
        }
    }
}

impl core::fmt::Display for DayPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Night => write!(f, "night"),
        }
    }
}

// ---------------------------------------------------------------------------
// Death cause
// ---------------------------------------------------------------------------

/// The cause of an animal's death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Age exceeded the species maximum.
    OldAge,
    /// Food level dropped to zero.
    Starvation,
    /// No free adjacent cell to move into.
    Overcrowding,
    /// Eaten by a predator.
    Predation,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OldAge => write!(f, "old_age"),
            Self::Starvation => write!(f, "starvation"),
            Self::Overcrowding => write!(f, "overcrowding"),
            Self::Predation => write!(f, "predation"),
        }
    }
}
