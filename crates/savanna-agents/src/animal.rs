//! The animal record shared by every species.
//!
//! An [`Animal`] is a tagged record: the [`Species`] selects the constants
//! and movement rules, while aging, placement, and death bookkeeping are the
//! same for all species. Animals never hold a reference to the field; the
//! field is passed in explicitly wherever occupancy is read or changed.

use rand::Rng;
use savanna_types::{AgentId, DeathCause, Location, Sex, Species};

use crate::config::SpeciesTraits;

/// A single animal and its mutable life-cycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animal {
    /// Unique identifier, also the key the field stores.
    pub(crate) id: AgentId,
    /// Species tag.
    pub(crate) species: Species,
    /// Sex, fixed at birth.
    pub(crate) sex: Sex,
    /// Age in ticks.
    pub(crate) age: u32,
    /// Remaining ticks before starvation, for species with hunger.
    pub(crate) food_level: Option<u32>,
    /// `false` once the animal has died. Never flips back.
    pub(crate) alive: bool,
    /// Current cell; `None` once dead.
    pub(crate) location: Option<Location>,
    /// Why the animal died, once it has.
    pub(crate) death_cause: Option<DeathCause>,
}

impl Animal {
    /// Create a newborn: age 0 and, for species with hunger, a full stomach.
    ///
    /// Draws one coin flip for the sex.
    pub fn newborn<R: Rng + ?Sized>(
        id: AgentId,
        species: Species,
        traits: &SpeciesTraits,
        location: Location,
        rng: &mut R,
    ) -> Self {
        let sex = Sex::from_coin(rng.random_bool(0.5));
        Self {
            id,
            species,
            sex,
            age: 0,
            food_level: traits.food_value,
            alive: true,
            location: Some(location),
            death_cause: None,
        }
    }

    /// Create an animal for the initial population, with a random age in
    /// `[0, max_age)` and, for species with hunger, a random food level in
    /// `[0, food_value)`.
    ///
    /// Draws the sex first, then the age, then the food level.
    pub fn with_random_age<R: Rng + ?Sized>(
        id: AgentId,
        species: Species,
        traits: &SpeciesTraits,
        location: Location,
        rng: &mut R,
    ) -> Self {
        let sex = Sex::from_coin(rng.random_bool(0.5));
        let age = random_below(traits.max_age, rng);
        let food_level = traits.food_value.map(|value| random_below(value, rng));
        Self {
            id,
            species,
            sex,
            age,
            food_level,
            alive: true,
            location: Some(location),
            death_cause: None,
        }
    }

    /// Construct an animal with explicit state (tests and scenario setup).
    pub const fn from_parts(
        id: AgentId,
        species: Species,
        sex: Sex,
        age: u32,
        food_level: Option<u32>,
        location: Location,
    ) -> Self {
        Self {
            id,
            species,
            sex,
            age,
            food_level,
            alive: true,
            location: Some(location),
            death_cause: None,
        }
    }

    /// Unique identifier.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Species tag.
    pub const fn species(&self) -> Species {
        self.species
    }

    /// Sex.
    pub const fn sex(&self) -> Sex {
        self.sex
    }

    /// Age in ticks.
    pub const fn age(&self) -> u32 {
        self.age
    }

    /// Remaining food level, if the species gets hungry.
    pub const fn food_level(&self) -> Option<u32> {
        self.food_level
    }

    /// Whether the animal is still alive.
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Current cell, or `None` once dead.
    pub const fn location(&self) -> Option<Location> {
        self.location
    }

    /// Why the animal died, if it has.
    pub const fn death_cause(&self) -> Option<DeathCause> {
        self.death_cause
    }
}

/// Uniform integer in `[0, bound)`, or 0 when `bound` is 0.
fn random_below<R: Rng + ?Sized>(bound: u32, rng: &mut R) -> u32 {
    if bound == 0 {
        0
    } else {
        rng.random_range(0..bound)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn newborn_starts_young_and_fed() {
        let mut rng = SmallRng::seed_from_u64(42);
        let snake = Animal::newborn(
            AgentId(1),
            Species::Snake,
            &SpeciesTraits::snake(),
            Location::new(0, 0),
            &mut rng,
        );
        assert_eq!(snake.age(), 0);
        assert_eq!(snake.food_level(), Some(9));
        assert!(snake.is_alive());
        assert_eq!(snake.location(), Some(Location::new(0, 0)));
        assert_eq!(snake.death_cause(), None);
    }

    #[test]
    fn herbivore_newborn_has_no_food_level() {
        let mut rng = SmallRng::seed_from_u64(42);
        let rat = Animal::newborn(
            AgentId(2),
            Species::Rat,
            &SpeciesTraits::rat(),
            Location::new(1, 1),
            &mut rng,
        );
        assert_eq!(rat.food_level(), None);
    }

    #[test]
    fn random_age_stays_below_max() {
        let mut rng = SmallRng::seed_from_u64(7);
        let traits = SpeciesTraits::snake();
        for n in 0..200 {
            let snake = Animal::with_random_age(
                AgentId(n),
                Species::Snake,
                &traits,
                Location::new(0, 0),
                &mut rng,
            );
            assert!(snake.age() < traits.max_age);
            assert!(snake.food_level().is_some_and(|f| f < 9));
        }
    }

    #[test]
    fn both_sexes_appear() {
        let mut rng = SmallRng::seed_from_u64(99);
        let sexes: Vec<Sex> = (0..64)
            .map(|n| {
                Animal::newborn(
                    AgentId(n),
                    Species::Zebra,
                    &SpeciesTraits::zebra(),
                    Location::new(0, 0),
                    &mut rng,
                )
                .sex()
            })
            .collect();
        assert!(sexes.contains(&Sex::Female));
        assert!(sexes.contains(&Sex::Male));
    }

    #[test]
    fn zero_max_age_yields_zero_age() {
        let mut rng = SmallRng::seed_from_u64(1);
        let traits = SpeciesTraits {
            max_age: 0,
            ..SpeciesTraits::rat()
        };
        let rat = Animal::with_random_age(
            AgentId(1),
            Species::Rat,
            &traits,
            Location::new(0, 0),
            &mut rng,
        );
        assert_eq!(rat.age(), 0);
    }
}
