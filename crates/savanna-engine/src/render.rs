//! Text rendering of the field and the per-tick pacing callback.
//!
//! Each cell is drawn as one character: `R` for a rat, `Z` for a zebra,
//! `S` for a snake, and `.` for an empty cell.

use std::fmt::Write as _;
use std::time::Duration;

use savanna_agents::Herd;
use savanna_core::TickCallback;
use savanna_core::tick::TickSummary;
use savanna_types::{Location, Species};
use savanna_world::Field;
use tracing::debug;

/// Character used for an animal of `species`.
const fn glyph(species: Species) -> char {
    match species {
        Species::Rat => 'R',
        Species::Zebra => 'Z',
        Species::Snake => 'S',
    }
}

/// Render the field as rows of characters, one line per row.
pub fn render_field(field: &Field, herd: &Herd) -> String {
    let capacity = field
        .width()
        .saturating_add(1)
        .saturating_mul(field.depth());
    let mut out = String::with_capacity(capacity);
    for row in 0..field.depth() {
        for col in 0..field.width() {
            let cell = herd
                .species_at(field, Location::new(row, col))
                .map_or('.', glyph);
            out.push(cell);
        }
        out.push('\n');
    }
    out
}

/// Tick callback that logs each summary and optionally draws the field.
///
/// With a non-zero delay the field is printed after every tick and the
/// loop sleeps for the delay, so the run can be watched in a terminal.
pub struct PacedReport {
    delay: Duration,
}

impl PacedReport {
    /// Create a callback that sleeps `delay_ms` milliseconds between ticks.
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }
}

impl TickCallback for PacedReport {
    fn on_tick(&mut self, summary: &TickSummary, field: &Field, herd: &Herd) {
        debug!(
            tick = summary.tick,
            phase = %summary.phase,
            births = summary.births,
            deaths = summary.deaths.total(),
            population = summary.population(),
            "Tick report"
        );

        if self.delay.is_zero() {
            return;
        }
        let mut frame = String::new();
        let _ = writeln!(
            frame,
            "tick {} ({}) rats={} zebras={} snakes={}",
            summary.tick,
            summary.phase,
            summary.counts.rats,
            summary.counts.zebras,
            summary.counts.snakes
        );
        frame.push_str(&render_field(field, herd));
        print!("{frame}");
        std::thread::sleep(self.delay);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use savanna_agents::Animal;
    use savanna_types::Sex;

    use super::*;

    #[test]
    fn renders_one_glyph_per_cell() {
        let mut field = Field::new(2, 3).unwrap();
        let mut herd = Herd::default();
        herd.insert_with(&mut field, |id| {
            Animal::from_parts(id, Species::Rat, Sex::Male, 1, None, Location::new(0, 0))
        })
        .unwrap();
        herd.insert_with(&mut field, |id| {
            Animal::from_parts(id, Species::Snake, Sex::Female, 1, Some(3), Location::new(1, 2))
        })
        .unwrap();
        assert_eq!(render_field(&field, &herd), "R..\n..S\n");
    }

    #[test]
    fn empty_field_is_all_dots() {
        let field = Field::new(1, 4).unwrap();
        assert_eq!(render_field(&field, &Herd::default()), "....\n");
    }
}
