//! Per-tick bookkeeping returned by the simulator.
//!
//! Every call to [`Simulator::simulate_one_step`] produces a [`TickSummary`]:
//! the tick number, the phase the tick ran in, how many animals were born,
//! how many died and why, and the live population afterwards.
//!
//! [`Simulator::simulate_one_step`]: crate::simulator::Simulator::simulate_one_step

use savanna_types::{DayPhase, DeathCause, PopulationCounts};
use serde::Serialize;

/// Deaths in one tick, broken down by cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeathTally {
    /// Animals that outlived their species maximum.
    pub old_age: u32,
    /// Predators whose food ran out.
    pub starvation: u32,
    /// Animals with no free neighbour to move into.
    pub overcrowding: u32,
    /// Prey eaten by predators.
    pub predation: u32,
}

impl DeathTally {
    /// Count one death of the given cause.
    pub const fn record(&mut self, cause: DeathCause) {
        let slot = match cause {
            DeathCause::OldAge => &mut self.old_age,
            DeathCause::Starvation => &mut self.starvation,
            DeathCause::Overcrowding => &mut self.overcrowding,
            DeathCause::Predation => &mut self.predation,
        };
        *slot = slot.saturating_add(1);
    }

    /// Deaths of every cause.
    pub const fn total(&self) -> u32 {
        self.old_age
            .saturating_add(self.starvation)
            .saturating_add(self.overcrowding)
            .saturating_add(self.predation)
    }
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// The day phase the tick ran in.
    pub phase: DayPhase,
    /// Animals born during this tick, including any eaten before it ended.
    pub births: u32,
    /// Deaths during this tick, newborns included.
    pub deaths: DeathTally,
    /// Live animals per species at the end of the tick.
    pub counts: PopulationCounts,
}

impl TickSummary {
    /// Total live animals at the end of the tick.
    pub const fn population(&self) -> u32 {
        self.counts.total()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_each_cause() {
        let mut tally = DeathTally::default();
        tally.record(DeathCause::OldAge);
        tally.record(DeathCause::Predation);
        tally.record(DeathCause::Predation);
        assert_eq!(tally.old_age, 1);
        assert_eq!(tally.predation, 2);
        assert_eq!(tally.starvation, 0);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn summary_serializes_to_json() {
        let mut counts = PopulationCounts::default();
        counts.record(savanna_types::Species::Rat);
        let summary = TickSummary {
            tick: 3,
            phase: DayPhase::Night,
            births: 2,
            deaths: DeathTally::default(),
            counts,
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["tick"], 3);
        assert_eq!(json["phase"], "night");
        assert_eq!(json["counts"]["rats"], 1);
        assert_eq!(summary.population(), 1);
    }
}
