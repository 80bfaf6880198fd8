//! Death conditions for animals.
//!
//! An animal dies when:
//! - its age exceeds the species maximum ([`DeathCause::OldAge`]),
//! - its food level drops to zero ([`DeathCause::Starvation`], predators only),
//! - it finds no free adjacent cell to move into ([`DeathCause::Overcrowding`]),
//! - a predator eats it ([`DeathCause::Predation`]).
//!
//! The first two are pure checks on the animal's counters and live here.
//! Overcrowding and predation depend on the field and are decided in
//! [`lifecycle`](crate::lifecycle).

use savanna_types::DeathCause;

use crate::config::SpeciesTraits;

/// Check whether an animal of the given age has outlived its species.
///
/// Returns `Some(DeathCause::OldAge)` once `age > max_age`. An animal whose
/// age equals the maximum is still alive.
pub const fn check_old_age(age: u32, traits: &SpeciesTraits) -> Option<DeathCause> {
    if age > traits.max_age {
        return Some(DeathCause::OldAge);
    }
    None
}

/// Check whether a food level means starvation.
///
/// `None` (no hunger mechanic) never starves.
pub const fn check_starvation(food_level: Option<u32>) -> Option<DeathCause> {
    match food_level {
        Some(0) => Some(DeathCause::Starvation),
        _ => None,
    }
}
