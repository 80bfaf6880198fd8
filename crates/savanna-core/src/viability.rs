//! Policies that decide whether a run is still worth continuing.
//!
//! [`Simulator::simulate`] asks its [`Viability`] before every tick and stops
//! early once the answer is `false`.
//!
//! [`Simulator::simulate`]: crate::simulator::Simulator::simulate

use savanna_agents::Herd;
use savanna_types::{PopulationCounts, Species};
use savanna_world::Field;

/// Decides whether the simulation should keep running.
pub trait Viability {
    /// Return `true` while the run should continue.
    fn is_viable(&mut self, field: &Field, herd: &Herd) -> bool;
}

/// Never stops a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysViable;

impl Viability for AlwaysViable {
    fn is_viable(&mut self, _field: &Field, _herd: &Herd) -> bool {
        true
    }
}

/// Viable while more than one species is present on the field.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeciesDiversity;

impl Viability for SpeciesDiversity {
    fn is_viable(&mut self, field: &Field, herd: &Herd) -> bool {
        on_field(field, herd).species_present() > 1
    }
}

/// Viable while at least one predator and one of its prey remain.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredatorAndPrey;

impl Viability for PredatorAndPrey {
    fn is_viable(&mut self, field: &Field, herd: &Herd) -> bool {
        let counts = on_field(field, herd);
        Species::ALL
            .into_iter()
            .filter(|predator| predator.is_predator() && counts.get(*predator) > 0)
            .any(|predator| {
                Species::ALL
                    .into_iter()
                    .any(|prey| prey.is_prey_of(predator) && counts.get(prey) > 0)
            })
    }
}

/// Count the live animals currently registered on the field.
fn on_field(field: &Field, herd: &Herd) -> PopulationCounts {
    field
        .occupants()
        .filter_map(|(_, id)| herd.get(id))
        .filter(|animal| animal.is_alive())
        .map(savanna_agents::Animal::species)
        .collect()
}
