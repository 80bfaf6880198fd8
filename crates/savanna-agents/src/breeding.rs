//! Breeding: mate search, litter size, and newborn placement.
//!
//! A breeding attempt works in three steps:
//!
//! 1. Scan the adjacent cells in field scan order for the *first* occupant of
//!    the same species. The scan stops there whether or not that neighbour
//!    turns out to be a suitable partner.
//! 2. If the partner has the other sex and the acting animal has reached
//!    breeding age, roll the species' breeding probability. A hit yields a
//!    litter of `1..=max_litter_size`.
//! 3. Newborns take the acting animal's free neighbour cells left to right.
//!    Births beyond the free slots are dropped, not queued.

use rand::Rng;
use savanna_types::{AgentId, Location, Species};
use savanna_world::Field;
use tracing::trace;

use crate::config::SpeciesTraits;
use crate::error::AgentError;
use crate::herd::Herd;

/// Return the first adjacent animal of `species` around `location`.
pub fn first_conspecific(
    herd: &Herd,
    field: &Field,
    location: Location,
    species: Species,
) -> Option<AgentId> {
    field
        .adjacent_locations(location)
        .into_iter()
        .filter_map(|loc| field.object_at(loc))
        .find(|id| herd.get(*id).is_some_and(|a| a.species() == species))
}

/// Roll a litter size for one breeding event.
///
/// Draws a uniform value in `[0, 1)`; if it is at most the breeding
/// probability, draws the litter size uniformly from `1..=max_litter_size`.
/// Otherwise returns 0. A probability of zero never breeds.
pub fn litter_size<R: Rng + ?Sized>(traits: &SpeciesTraits, rng: &mut R) -> u32 {
    let roll: f64 = rng.random();
    let hit = traits.breeding_probability > 0.0 && roll <= traits.breeding_probability;
    if hit && traits.max_litter_size > 0 {
        rng.random_range(1..=traits.max_litter_size)
    } else {
        0
    }
}

/// Run a breeding attempt for the animal `id` and place any newborns.
///
/// Newborn ids are appended to `newborns` in placement order. Returns the
/// number of animals actually born.
///
/// # Errors
///
/// Returns [`AgentError::AgentNotFound`] if `id` is unknown,
/// [`AgentError::NotPlaced`] if it has no location, or
/// [`AgentError::World`] if a newborn cannot be placed.
pub fn give_birth<R: Rng + ?Sized>(
    id: AgentId,
    herd: &mut Herd,
    field: &mut Field,
    rng: &mut R,
    newborns: &mut Vec<AgentId>,
) -> Result<u32, AgentError> {
    let parent = *herd.get(id).ok_or(AgentError::AgentNotFound(id))?;
    let location = parent.location().ok_or(AgentError::NotPlaced(id))?;
    let traits = *herd.traits(parent.species());

    let Some(partner_id) = first_conspecific(herd, field, location, parent.species()) else {
        return Ok(0);
    };
    let partner = herd.get(partner_id).ok_or(AgentError::AgentNotFound(partner_id))?;

    let wanted = if parent.sex().complements(partner.sex()) && traits.can_breed(parent.age()) {
        litter_size(&traits, rng)
    } else {
        0
    };
    if wanted == 0 {
        return Ok(0);
    }

    let free = field.free_adjacent_locations(location);
    let mut born: u32 = 0;
    for slot in free.into_iter().take(usize::try_from(wanted).unwrap_or(usize::MAX)) {
        let child = herd.spawn_newborn(parent.species(), slot, field, rng)?;
        newborns.push(child);
        born = born.saturating_add(1);
    }

    trace!(
        parent = %id,
        partner = %partner_id,
        species = %parent.species(),
        wanted,
        born,
        "Litter born"
    );
    Ok(born)
}
