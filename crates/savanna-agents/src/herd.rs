//! Animal creation, lookup, and death bookkeeping.
//!
//! The [`Herd`] owns every [`Animal`] record of a run, keyed by
//! [`AgentId`]. It hands out ids from a monotonic counter and keeps each
//! animal's `location` in step with the [`Field`]: spawning places the
//! animal, moving re-registers it, and killing vacates its cell at once so
//! later actors in the same tick see the space as free.
//!
//! The herd does not decide iteration order. The simulator keeps the
//! population list and asks the herd for records by id.

use std::collections::BTreeMap;

use rand::Rng;
use savanna_types::{AgentId, DeathCause, Location, PopulationCounts, Species};
use savanna_world::Field;
use tracing::trace;

use crate::animal::Animal;
use crate::config::{SpeciesTable, SpeciesTraits};
use crate::error::AgentError;

/// Registry of every animal in the current run.
#[derive(Debug, Clone)]
pub struct Herd {
    /// All animals indexed by id, dead ones included until reaped.
    animals: BTreeMap<AgentId, Animal>,
    /// Next id to hand out.
    next_id: u64,
    /// Per-species constants, fixed for the run.
    traits: SpeciesTable,
}

impl Herd {
    /// Create an empty herd with the given species traits.
    pub const fn new(traits: SpeciesTable) -> Self {
        Self {
            animals: BTreeMap::new(),
            next_id: 0,
            traits,
        }
    }

    /// Return the traits for `species`.
    pub const fn traits(&self, species: Species) -> &SpeciesTraits {
        self.traits.get(species)
    }

    /// Return the full species table.
    pub const fn species_table(&self) -> &SpeciesTable {
        &self.traits
    }

    fn allocate_id(&mut self) -> Result<AgentId, AgentError> {
        let id = AgentId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| AgentError::ArithmeticOverflow {
                context: String::from("agent id counter"),
            })?;
        Ok(id)
    }

    /// Register a pre-built animal and place it on the field.
    fn admit(&mut self, animal: Animal, field: &mut Field) -> Result<AgentId, AgentError> {
        let location = animal.location.ok_or(AgentError::NotPlaced(animal.id))?;
        field.place(animal.id, location)?;
        self.animals.insert(animal.id, animal);
        Ok(animal.id)
    }

    /// Create an animal with a random age (initial population) at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::World`] if the cell is taken or out of bounds.
    pub fn spawn_seed<R: Rng + ?Sized>(
        &mut self,
        species: Species,
        location: Location,
        field: &mut Field,
        rng: &mut R,
    ) -> Result<AgentId, AgentError> {
        let id = self.allocate_id()?;
        let traits = *self.traits(species);
        let animal = Animal::with_random_age(id, species, &traits, location, rng);
        self.admit(animal, field)
    }

    /// Create a newborn (age 0) at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::World`] if the cell is taken or out of bounds.
    pub fn spawn_newborn<R: Rng + ?Sized>(
        &mut self,
        species: Species,
        location: Location,
        field: &mut Field,
        rng: &mut R,
    ) -> Result<AgentId, AgentError> {
        let id = self.allocate_id()?;
        let traits = *self.traits(species);
        let animal = Animal::newborn(id, species, &traits, location, rng);
        self.admit(animal, field)
    }

    /// Insert an animal with explicit state, assigning it a fresh id.
    ///
    /// Used to set up scenarios with known ages, sexes, and food levels.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::World`] if the cell is taken or out of bounds.
    pub fn insert_with<F>(&mut self, field: &mut Field, build: F) -> Result<AgentId, AgentError>
    where
        F: FnOnce(AgentId) -> Animal,
    {
        let id = self.allocate_id()?;
        let mut animal = build(id);
        animal.id = id;
        self.admit(animal, field)
    }

    /// Look up an animal by id.
    pub fn get(&self, id: AgentId) -> Option<&Animal> {
        self.animals.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: AgentId) -> Option<&mut Animal> {
        self.animals.get_mut(&id)
    }

    /// Whether `id` refers to a live animal.
    pub fn is_alive(&self, id: AgentId) -> bool {
        self.animals.get(&id).is_some_and(Animal::is_alive)
    }

    /// Species of the animal registered at `location`, if any.
    pub fn species_at(&self, field: &Field, location: Location) -> Option<Species> {
        field
            .object_at(location)
            .and_then(|id| self.get(id))
            .map(Animal::species)
    }

    /// Move a live animal to `target`, vacating its old cell.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::AgentNotFound`] for an unknown id or
    /// [`AgentError::World`] if `target` is held by another animal.
    pub fn relocate(
        &mut self,
        id: AgentId,
        target: Location,
        field: &mut Field,
    ) -> Result<(), AgentError> {
        let animal = self.animals.get_mut(&id).ok_or(AgentError::AgentNotFound(id))?;
        field.place(id, target)?;
        animal.location = Some(target);
        Ok(())
    }

    /// Mark an animal dead and vacate its cell.
    ///
    /// Killing an already-dead animal is a no-op and keeps the first cause.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::AgentNotFound`] for an unknown id.
    pub fn kill(
        &mut self,
        id: AgentId,
        cause: DeathCause,
        field: &mut Field,
    ) -> Result<(), AgentError> {
        let animal = self.animals.get_mut(&id).ok_or(AgentError::AgentNotFound(id))?;
        if !animal.alive {
            return Ok(());
        }
        animal.alive = false;
        animal.death_cause = Some(cause);
        if let Some(location) = animal.location.take()
            && field.object_at(location) == Some(id)
        {
            field.clear_location(location);
        }
        trace!(agent = %id, species = %animal.species, cause = %cause, "Animal died");
        Ok(())
    }

    /// Drop the records of the given animals.
    pub fn remove_all(&mut self, ids: &[AgentId]) {
        for id in ids {
            self.animals.remove(id);
        }
    }

    /// Remove every animal. The id counter keeps running so ids stay unique
    /// across resets.
    pub fn clear(&mut self) {
        self.animals.clear();
    }

    /// Number of records held (dead animals included until reaped).
    pub fn len(&self) -> usize {
        self.animals.len()
    }

    /// Whether the herd holds no records.
    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    /// Iterate over every record in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Animal> {
        self.animals.values()
    }

    /// Count live animals per species.
    pub fn counts(&self) -> PopulationCounts {
        self.iter()
            .filter(|a| a.is_alive())
            .map(Animal::species)
            .collect()
    }
}

impl Default for Herd {
    fn default() -> Self {
        Self::new(SpeciesTable::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use savanna_types::Sex;

    use super::*;

    fn setup() -> (Herd, Field, SmallRng) {
        (
            Herd::default(),
            Field::new(5, 5).unwrap(),
            SmallRng::seed_from_u64(42),
        )
    }

    #[test]
    fn spawn_places_animal_on_field() {
        let (mut herd, mut field, mut rng) = setup();
        let loc = Location::new(2, 3);
        let id = herd.spawn_seed(Species::Zebra, loc, &mut field, &mut rng).unwrap();
        assert_eq!(field.object_at(loc), Some(id));
        assert_eq!(herd.get(id).unwrap().location(), Some(loc));
        assert_eq!(herd.counts().zebras, 1);
    }

    #[test]
    fn ids_are_sequential() {
        let (mut herd, mut field, mut rng) = setup();
        let a = herd
            .spawn_newborn(Species::Rat, Location::new(0, 0), &mut field, &mut rng)
            .unwrap();
        let b = herd
            .spawn_newborn(Species::Rat, Location::new(0, 1), &mut field, &mut rng)
            .unwrap();
        assert_eq!(a, AgentId(0));
        assert_eq!(b, AgentId(1));
    }

    #[test]
    fn spawn_on_occupied_cell_fails() {
        let (mut herd, mut field, mut rng) = setup();
        let loc = Location::new(1, 1);
        herd.spawn_seed(Species::Rat, loc, &mut field, &mut rng).unwrap();
        let err = herd.spawn_seed(Species::Snake, loc, &mut field, &mut rng);
        assert!(matches!(err, Err(AgentError::World { .. })));
        assert_eq!(herd.len(), 1);
    }

    #[test]
    fn kill_vacates_cell_and_records_cause() {
        let (mut herd, mut field, mut rng) = setup();
        let loc = Location::new(4, 4);
        let id = herd.spawn_seed(Species::Rat, loc, &mut field, &mut rng).unwrap();
        herd.kill(id, DeathCause::Predation, &mut field).unwrap();

        let rat = herd.get(id).unwrap();
        assert!(!rat.is_alive());
        assert_eq!(rat.location(), None);
        assert_eq!(rat.death_cause(), Some(DeathCause::Predation));
        assert_eq!(field.object_at(loc), None);
        assert_eq!(herd.counts().total(), 0);
    }

    #[test]
    fn second_kill_keeps_first_cause() {
        let (mut herd, mut field, mut rng) = setup();
        let id = herd
            .spawn_seed(Species::Rat, Location::new(0, 0), &mut field, &mut rng)
            .unwrap();
        herd.kill(id, DeathCause::OldAge, &mut field).unwrap();
        herd.kill(id, DeathCause::Predation, &mut field).unwrap();
        assert_eq!(herd.get(id).unwrap().death_cause(), Some(DeathCause::OldAge));
    }

    #[test]
    fn kill_unknown_animal_errors() {
        let (mut herd, mut field, _) = setup();
        assert!(matches!(
            herd.kill(AgentId(77), DeathCause::OldAge, &mut field),
            Err(AgentError::AgentNotFound(AgentId(77)))
        ));
    }

    #[test]
    fn relocate_moves_both_views() {
        let (mut herd, mut field, mut rng) = setup();
        let from = Location::new(0, 0);
        let to = Location::new(1, 1);
        let id = herd.spawn_seed(Species::Zebra, from, &mut field, &mut rng).unwrap();
        herd.relocate(id, to, &mut field).unwrap();
        assert_eq!(field.object_at(from), None);
        assert_eq!(field.object_at(to), Some(id));
        assert_eq!(herd.get(id).unwrap().location(), Some(to));
    }

    #[test]
    fn insert_with_overrides_builder_id() {
        let (mut herd, mut field, _) = setup();
        let loc = Location::new(3, 3);
        let id = herd
            .insert_with(&mut field, |id| {
                Animal::from_parts(id, Species::Snake, Sex::Male, 20, Some(1), loc)
            })
            .unwrap();
        let snake = herd.get(id).unwrap();
        assert_eq!(snake.id(), id);
        assert_eq!(snake.age(), 20);
        assert_eq!(snake.food_level(), Some(1));
    }

    #[test]
    fn clear_keeps_id_counter() {
        let (mut herd, mut field, mut rng) = setup();
        herd.spawn_seed(Species::Rat, Location::new(0, 0), &mut field, &mut rng)
            .unwrap();
        herd.clear();
        field.clear();
        let id = herd
            .spawn_seed(Species::Rat, Location::new(0, 0), &mut field, &mut rng)
            .unwrap();
        assert_eq!(id, AgentId(1));
        assert!(!herd.is_empty());
    }

    #[test]
    fn remove_all_drops_records() {
        let (mut herd, mut field, mut rng) = setup();
        let a = herd
            .spawn_seed(Species::Rat, Location::new(0, 0), &mut field, &mut rng)
            .unwrap();
        let b = herd
            .spawn_seed(Species::Rat, Location::new(0, 1), &mut field, &mut rng)
            .unwrap();
        herd.remove_all(&[a]);
        assert!(herd.get(a).is_none());
        assert!(herd.get(b).is_some());
    }
}
