//! The per-tick life-cycle state machine.
//!
//! [`act`] runs once per live animal per tick, in population order. Every
//! species follows the same skeleton; only the constants and the movement
//! rule differ:
//!
//! 1. **Age** -- add one tick; past the species maximum the animal dies of
//!    old age and nothing else happens.
//! 2. **Hunger** (species with a food value) -- lose one unit of food;
//!    at zero the animal starves and nothing else happens.
//! 3. **Breed** -- see [`breeding`](crate::breeding).
//! 4. **Choose a target**:
//!    - snakes take the first live prey in scan order (killing it and
//!      refilling their food), otherwise a random free neighbour;
//!    - rats and zebras stay put at night, and by day take a random free
//!      neighbour.
//! 5. **Move** to the target, or die of overcrowding when there is none.
//!    This can happen after a successful breeding in the same tick.
//!
//! Order matters: an animal acting later in the tick sees the cells that
//! earlier actors vacated, claimed, or filled with newborns.

use rand::Rng;
use savanna_types::{AgentId, DeathCause, Location, Species};
use savanna_world::Field;
use tracing::trace;

use crate::breeding;
use crate::death;
use crate::error::AgentError;
use crate::herd::Herd;

/// What happened to one animal during its turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActOutcome {
    /// Number of newborns placed this turn.
    pub born: u32,
    /// The prey eaten this turn, if any.
    pub ate: Option<AgentId>,
    /// Cause of death, if the animal died this turn.
    pub died: Option<DeathCause>,
}

impl ActOutcome {
    const fn died(cause: DeathCause, born: u32, ate: Option<AgentId>) -> Self {
        Self {
            born,
            ate,
            died: Some(cause),
        }
    }
}

/// Run one tick of the life cycle for animal `id`.
///
/// Newborns are appended to `newborns`; they are already on the field and in
/// the herd but do not act until the next tick. A dead animal does nothing
/// and reports an empty outcome.
///
/// # Errors
///
/// Returns [`AgentError`] only when occupancy invariants are broken (unknown
/// id, live animal without a cell, or a cell claimed twice). Deaths are
/// reported through [`ActOutcome::died`], not as errors.
pub fn act<R: Rng + ?Sized>(
    id: AgentId,
    herd: &mut Herd,
    field: &mut Field,
    rng: &mut R,
    newborns: &mut Vec<AgentId>,
) -> Result<ActOutcome, AgentError> {
    let animal = herd.get(id).ok_or(AgentError::AgentNotFound(id))?;
    if !animal.is_alive() {
        return Ok(ActOutcome::default());
    }
    let species = animal.species();
    let traits = *herd.traits(species);

    // 1. Age.
    let age = increment_age(herd, id)?;
    if let Some(cause) = death::check_old_age(age, &traits) {
        herd.kill(id, cause, field)?;
        return Ok(ActOutcome::died(cause, 0, None));
    }

    // 2. Hunger.
    if traits.has_hunger() {
        let food = increment_hunger(herd, id)?;
        if let Some(cause) = death::check_starvation(food) {
            herd.kill(id, cause, field)?;
            return Ok(ActOutcome::died(cause, 0, None));
        }
    }

    // 3. Breed.
    let born = breeding::give_birth(id, herd, field, rng, newborns)?;

    // 4. Choose a target.
    let here = herd
        .get(id)
        .and_then(|a| a.location())
        .ok_or(AgentError::NotPlaced(id))?;
    let (target, ate) = match species {
        Species::Snake => hunt(id, here, herd, field, rng)?,
        Species::Rat | Species::Zebra => (graze(here, field, rng), None),
    };

    // 5. Move or die.
    match target {
        Some(destination) => {
            herd.relocate(id, destination, field)?;
            Ok(ActOutcome {
                born,
                ate,
                died: None,
            })
        }
        None => {
            herd.kill(id, DeathCause::Overcrowding, field)?;
            Ok(ActOutcome::died(DeathCause::Overcrowding, born, ate))
        }
    }
}

fn increment_age(herd: &mut Herd, id: AgentId) -> Result<u32, AgentError> {
    let animal = herd.get_mut(id).ok_or(AgentError::AgentNotFound(id))?;
    animal.age = animal
        .age
        .checked_add(1)
        .ok_or_else(|| AgentError::ArithmeticOverflow {
            context: format!("age of {id}"),
        })?;
    Ok(animal.age)
}

fn increment_hunger(herd: &mut Herd, id: AgentId) -> Result<Option<u32>, AgentError> {
    let animal = herd.get_mut(id).ok_or(AgentError::AgentNotFound(id))?;
    animal.food_level = animal.food_level.map(|food| food.saturating_sub(1));
    Ok(animal.food_level)
}

/// Herbivore movement: stay put at night, wander by day.
fn graze<R: Rng + ?Sized>(here: Location, field: &Field, rng: &mut R) -> Option<Location> {
    if field.is_night() {
        Some(here)
    } else {
        field.free_adjacent_location(here, rng)
    }
}

/// Predator movement: eat the first live prey in scan order, otherwise
/// wander to a random free neighbour.
fn hunt<R: Rng + ?Sized>(
    id: AgentId,
    here: Location,
    herd: &mut Herd,
    field: &mut Field,
    rng: &mut R,
) -> Result<(Option<Location>, Option<AgentId>), AgentError> {
    let species = herd.get(id).map(|a| a.species()).ok_or(AgentError::AgentNotFound(id))?;
    let prey = field.adjacent_locations(here).into_iter().find_map(|loc| {
        let occupant = field.object_at(loc)?;
        let animal = herd.get(occupant)?;
        (animal.is_alive() && animal.species().is_prey_of(species)).then_some((loc, occupant))
    });

    let Some((prey_cell, prey_id)) = prey else {
        return Ok((field.free_adjacent_location(here, rng), None));
    };

    herd.kill(prey_id, DeathCause::Predation, field)?;
    let refill = herd.traits(species).food_value;
    if let Some(animal) = herd.get_mut(id) {
        animal.food_level = refill;
    }
    trace!(predator = %id, prey = %prey_id, at = %prey_cell, "Prey eaten");
    Ok((Some(prey_cell), Some(prey_id)))
}
