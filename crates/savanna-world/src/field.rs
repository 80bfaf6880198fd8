//! The occupancy grid: a bounded `depth x width` field of cells.
//!
//! The [`Field`] is the single authority on who stands where. Each cell
//! holds at most one [`AgentId`], and a reverse index maps every registered
//! animal back to its cell so the two directions can never disagree.
//! Overcrowding therefore needs no separate density counter: it shows up as
//! an empty result from [`Field::free_adjacent_location`].
//!
//! # Scan Order
//!
//! [`Field::adjacent_locations`] walks the 3x3 neighbourhood row-major and
//! skips the centre:
//!
//! ```text
//! 0 1 2
//! 3 . 4
//! 5 6 7
//! ```
//!
//! The order is fixed. Breeding-partner and prey searches take the first
//! match, so it decides priority.
//!
//! # Day/Night
//!
//! The field also holds the current [`DayPhase`]. Only the orchestrator
//! writes it (via [`Field::time_skip`]); animals only read it.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::IndexedRandom;
use savanna_types::{AgentId, DayPhase, Location};
use tracing::trace;

use crate::error::WorldError;

/// Row/column offsets of the eight neighbours, in scan order.
const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A rectangular grid mapping each cell to at most one animal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Number of rows.
    depth: usize,
    /// Number of columns.
    width: usize,
    /// Row-major cell storage: `cells[row * width + col]`.
    cells: Vec<Option<AgentId>>,
    /// Reverse index: animal -> the cell it occupies.
    positions: BTreeMap<AgentId, Location>,
    /// Current phase of the day/night cycle.
    phase: DayPhase,
}

impl Field {
    /// Create an empty field in the [`DayPhase::Day`] phase.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either dimension is zero,
    /// or [`WorldError::ArithmeticOverflow`] if the cell count overflows.
    pub fn new(depth: usize, width: usize) -> Result<Self, WorldError> {
        if depth == 0 || width == 0 {
            return Err(WorldError::InvalidDimensions { depth, width });
        }
        let cell_count = depth
            .checked_mul(width)
            .ok_or(WorldError::ArithmeticOverflow)?;
        Ok(Self {
            depth,
            width,
            cells: vec![None; cell_count],
            positions: BTreeMap::new(),
            phase: DayPhase::Day,
        })
    }

    /// Number of rows.
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Whether `location` lies inside the grid.
    pub const fn contains(&self, location: Location) -> bool {
        location.row < self.depth && location.col < self.width
    }

    /// Row-major index of an in-bounds location.
    fn index_of(&self, location: Location) -> Option<usize> {
        if !self.contains(location) {
            return None;
        }
        location
            .row
            .checked_mul(self.width)
            .and_then(|base| base.checked_add(location.col))
    }

    const fn out_of_bounds(&self, location: Location) -> WorldError {
        WorldError::OutOfBounds {
            location,
            depth: self.depth,
            width: self.width,
        }
    }

    // -------------------------------------------------------------------
    // Occupancy
    // -------------------------------------------------------------------

    /// Return the animal registered at `location`, if any.
    ///
    /// Out-of-bounds locations are reported as empty.
    pub fn object_at(&self, location: Location) -> Option<AgentId> {
        self.index_of(location)
            .and_then(|idx| self.cells.get(idx).copied().flatten())
    }

    /// Return the cell an animal is registered at, if it is on the field.
    pub fn location_of(&self, agent: AgentId) -> Option<Location> {
        self.positions.get(&agent).copied()
    }

    /// Register `agent` as the occupant of `location`.
    ///
    /// Any stale mapping for the agent's previous cell is cleared first, so a
    /// move is a single call. Re-placing an agent on its own cell is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] for a location outside the grid,
    /// or [`WorldError::CellOccupied`] if a different animal already holds
    /// the cell. In both cases the field is left untouched.
    pub fn place(&mut self, agent: AgentId, location: Location) -> Result<(), WorldError> {
        let idx = self
            .index_of(location)
            .ok_or_else(|| self.out_of_bounds(location))?;

        if let Some(occupant) = self.cells.get(idx).copied().flatten()
            && occupant != agent
        {
            return Err(WorldError::CellOccupied {
                location,
                occupant,
                incoming: agent,
            });
        }

        if let Some(previous) = self.positions.get(&agent).copied()
            && previous != location
            && let Some(prev_idx) = self.index_of(previous)
            && let Some(cell) = self.cells.get_mut(prev_idx)
        {
            *cell = None;
        }

        let cell = self
            .cells
            .get_mut(idx)
            .ok_or_else(|| WorldError::OutOfBounds {
                location,
                depth: self.depth,
                width: self.width,
            })?;
        *cell = Some(agent);
        self.positions.insert(agent, location);
        Ok(())
    }

    /// Vacate `location`, returning the animal that was there.
    pub fn clear_location(&mut self, location: Location) -> Option<AgentId> {
        let idx = self.index_of(location)?;
        let previous = self.cells.get_mut(idx).and_then(Option::take);
        if let Some(agent) = previous {
            self.positions.remove(&agent);
        }
        previous
    }

    /// Remove every occupant. The day/night phase is left unchanged.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
        self.positions.clear();
        trace!(depth = self.depth, width = self.width, "Field cleared");
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.positions.len()
    }

    /// Iterate over every occupied cell in row-major order.
    pub fn occupants(&self) -> impl Iterator<Item = (Location, AgentId)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            let agent = (*cell)?;
            let row = idx.checked_div(width)?;
            let col = idx.checked_rem(width)?;
            Some((Location::new(row, col), agent))
        })
    }

    // -------------------------------------------------------------------
    // Adjacency
    // -------------------------------------------------------------------

    /// Return the in-bounds neighbours of `location` in fixed scan order.
    ///
    /// Yields up to eight locations; fewer at edges and corners, none for a
    /// location outside the grid.
    pub fn adjacent_locations(&self, location: Location) -> Vec<Location> {
        if !self.contains(location) {
            return Vec::new();
        }
        NEIGHBOUR_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| {
                let row = location.row.checked_add_signed(dr)?;
                let col = location.col.checked_add_signed(dc)?;
                let candidate = Location::new(row, col);
                self.contains(candidate).then_some(candidate)
            })
            .collect()
    }

    /// Return the unoccupied neighbours of `location`, in scan order.
    pub fn free_adjacent_locations(&self, location: Location) -> Vec<Location> {
        self.adjacent_locations(location)
            .into_iter()
            .filter(|loc| self.object_at(*loc).is_none())
            .collect()
    }

    /// Pick one unoccupied neighbour uniformly at random.
    ///
    /// Returns `None` (without consuming randomness) when every neighbour is
    /// occupied.
    pub fn free_adjacent_location<R: Rng + ?Sized>(
        &self,
        location: Location,
        rng: &mut R,
    ) -> Option<Location> {
        self.free_adjacent_locations(location).choose(rng).copied()
    }

    // -------------------------------------------------------------------
    // Day/night
    // -------------------------------------------------------------------

    /// Return the current phase.
    pub const fn phase(&self) -> DayPhase {
        self.phase
    }

    /// Whether it is currently night.
    pub const fn is_night(&self) -> bool {
        matches!(self.phase, DayPhase::Night)
    }

    /// Flip the day/night phase and return the new phase.
    pub const fn time_skip(&mut self) -> DayPhase {
        self.phase = self.phase.toggled();
        self.phase
    }

    /// Put the phase back to [`DayPhase::Day`] (used on simulation reset).
    pub const fn reset_phase(&mut self) {
        self.phase = DayPhase::Day;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn field(depth: usize, width: usize) -> Field {
        Field::new(depth, width).unwrap()
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            Field::new(0, 10),
            Err(WorldError::InvalidDimensions { depth: 0, width: 10 })
        ));
        assert!(matches!(
            Field::new(10, 0),
            Err(WorldError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn new_field_is_empty_daytime() {
        let f = field(4, 6);
        assert_eq!(f.depth(), 4);
        assert_eq!(f.width(), 6);
        assert_eq!(f.occupied_count(), 0);
        assert_eq!(f.phase(), DayPhase::Day);
        assert!(!f.is_night());
    }

    #[test]
    fn interior_cell_has_eight_neighbours_in_row_major_order() {
        let f = field(5, 5);
        let adj = f.adjacent_locations(Location::new(2, 2));
        assert_eq!(
            adj,
            vec![
                Location::new(1, 1),
                Location::new(1, 2),
                Location::new(1, 3),
                Location::new(2, 1),
                Location::new(2, 3),
                Location::new(3, 1),
                Location::new(3, 2),
                Location::new(3, 3),
            ]
        );
    }

    #[test]
    fn corner_cell_has_three_neighbours() {
        let f = field(5, 5);
        assert_eq!(
            f.adjacent_locations(Location::new(0, 0)),
            vec![Location::new(0, 1), Location::new(1, 0), Location::new(1, 1)]
        );
        assert_eq!(f.adjacent_locations(Location::new(4, 4)).len(), 3);
    }

    #[test]
    fn edge_cell_has_five_neighbours() {
        let f = field(5, 5);
        assert_eq!(f.adjacent_locations(Location::new(0, 2)).len(), 5);
    }

    #[test]
    fn single_cell_field_has_no_neighbours() {
        let f = field(1, 1);
        assert!(f.adjacent_locations(Location::new(0, 0)).is_empty());
    }

    #[test]
    fn out_of_bounds_location_has_no_neighbours() {
        let f = field(3, 3);
        assert!(f.adjacent_locations(Location::new(7, 7)).is_empty());
    }

    #[test]
    fn place_registers_both_directions() {
        let mut f = field(3, 3);
        let loc = Location::new(1, 2);
        f.place(AgentId(1), loc).unwrap();
        assert_eq!(f.object_at(loc), Some(AgentId(1)));
        assert_eq!(f.location_of(AgentId(1)), Some(loc));
        assert_eq!(f.occupied_count(), 1);
    }

    #[test]
    fn place_clears_stale_previous_cell() {
        let mut f = field(3, 3);
        f.place(AgentId(1), Location::new(0, 0)).unwrap();
        f.place(AgentId(1), Location::new(0, 1)).unwrap();
        assert_eq!(f.object_at(Location::new(0, 0)), None);
        assert_eq!(f.object_at(Location::new(0, 1)), Some(AgentId(1)));
        assert_eq!(f.occupied_count(), 1);
    }

    #[test]
    fn replacing_on_same_cell_is_noop() {
        let mut f = field(3, 3);
        let loc = Location::new(2, 2);
        f.place(AgentId(5), loc).unwrap();
        f.place(AgentId(5), loc).unwrap();
        assert_eq!(f.object_at(loc), Some(AgentId(5)));
        assert_eq!(f.occupied_count(), 1);
    }

    #[test]
    fn place_on_occupied_cell_fails_without_corruption() {
        let mut f = field(3, 3);
        let loc = Location::new(1, 1);
        f.place(AgentId(1), loc).unwrap();
        f.place(AgentId(2), Location::new(0, 0)).unwrap();

        let err = f.place(AgentId(2), loc).unwrap_err();
        assert!(matches!(
            err,
            WorldError::CellOccupied {
                occupant: AgentId(1),
                incoming: AgentId(2),
                ..
            }
        ));
        assert_eq!(f.object_at(loc), Some(AgentId(1)));
        assert_eq!(f.location_of(AgentId(2)), Some(Location::new(0, 0)));
    }

    #[test]
    fn place_out_of_bounds_fails() {
        let mut f = field(2, 2);
        assert!(matches!(
            f.place(AgentId(1), Location::new(2, 0)),
            Err(WorldError::OutOfBounds { .. })
        ));
        assert_eq!(f.occupied_count(), 0);
    }

    #[test]
    fn clear_location_returns_previous_occupant() {
        let mut f = field(3, 3);
        let loc = Location::new(0, 2);
        f.place(AgentId(9), loc).unwrap();
        assert_eq!(f.clear_location(loc), Some(AgentId(9)));
        assert_eq!(f.object_at(loc), None);
        assert_eq!(f.location_of(AgentId(9)), None);
        assert_eq!(f.clear_location(loc), None);
    }

    #[test]
    fn clear_empties_everything_but_keeps_phase() {
        let mut f = field(3, 3);
        f.place(AgentId(1), Location::new(0, 0)).unwrap();
        f.place(AgentId(2), Location::new(2, 2)).unwrap();
        f.time_skip();
        f.clear();
        assert_eq!(f.occupied_count(), 0);
        assert_eq!(f.occupants().count(), 0);
        assert!(f.is_night());
    }

    #[test]
    fn free_adjacent_skips_occupied_and_keeps_order() {
        let mut f = field(3, 3);
        let centre = Location::new(1, 1);
        f.place(AgentId(1), Location::new(0, 0)).unwrap();
        f.place(AgentId(2), Location::new(1, 2)).unwrap();
        let free = f.free_adjacent_locations(centre);
        assert_eq!(
            free,
            vec![
                Location::new(0, 1),
                Location::new(0, 2),
                Location::new(1, 0),
                Location::new(2, 0),
                Location::new(2, 1),
                Location::new(2, 2),
            ]
        );
    }

    #[test]
    fn free_adjacent_location_picks_a_free_neighbour() {
        let mut f = field(3, 3);
        let centre = Location::new(1, 1);
        f.place(AgentId(1), Location::new(0, 0)).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let picked = f.free_adjacent_location(centre, &mut rng).unwrap();
            assert!(f.free_adjacent_locations(centre).contains(&picked));
        }
    }

    #[test]
    fn free_adjacent_location_none_when_surrounded() {
        let mut f = field(3, 3);
        let centre = Location::new(1, 1);
        let mut next = 0_u64;
        for loc in f.adjacent_locations(centre) {
            next += 1;
            f.place(AgentId(next), loc).unwrap();
        }
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(f.free_adjacent_location(centre, &mut rng), None);
    }

    #[test]
    fn free_adjacent_location_is_deterministic_for_a_seed() {
        let f = field(6, 6);
        let centre = Location::new(3, 3);
        let pick = |seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            (0..10)
                .map(|_| f.free_adjacent_location(centre, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(pick(1234), pick(1234));
    }

    #[test]
    fn occupants_iterate_row_major() {
        let mut f = field(2, 3);
        f.place(AgentId(2), Location::new(1, 0)).unwrap();
        f.place(AgentId(1), Location::new(0, 2)).unwrap();
        let all: Vec<_> = f.occupants().collect();
        assert_eq!(
            all,
            vec![
                (Location::new(0, 2), AgentId(1)),
                (Location::new(1, 0), AgentId(2)),
            ]
        );
    }

    #[test]
    fn time_skip_alternates_phase() {
        let mut f = field(1, 1);
        assert_eq!(f.time_skip(), DayPhase::Night);
        assert!(f.is_night());
        assert_eq!(f.time_skip(), DayPhase::Day);
        f.time_skip();
        f.reset_phase();
        assert_eq!(f.phase(), DayPhase::Day);
    }
}
