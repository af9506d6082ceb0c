//! Stairs placement and party entry resolution.

use crate::types::Pos;

use super::generator::GeneratorState;
use super::grid::TileGrid;
use super::model::{Special, StartResolution};
use super::seed::LevelRng;

pub const DEFAULT_START: Pos = Pos { y: 1, x: 1 };

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct StairsPlacement {
    pub(super) stairs_up: Option<Pos>,
    pub(super) stairs_down: Option<Pos>,
    pub(super) start: Pos,
    pub(super) start_resolution: StartResolution,
}

/// Draws stairs up and down independently from every floor tile; they may land on the same tile,
/// in which case the down stamp wins.
pub(super) fn place_stairs(state: &mut GeneratorState, rng: &mut LevelRng) -> StairsPlacement {
    let floors = state.grid.floor_positions();
    let (stairs_up, stairs_down) = if floors.is_empty() {
        (None, None)
    } else {
        let up = floors[rng.below(floors.len())];
        stamp(&mut state.grid, up, Special::StairsUp);
        let down = floors[rng.below(floors.len())];
        stamp(&mut state.grid, down, Special::StairsDown);
        (Some(up), Some(down))
    };

    let (start, start_resolution) = resolve_start(&state.grid);
    if stairs_up.is_some() && stairs_up == stairs_down {
        log::debug!(
            "stairs up and down share {stairs_up:?}; start resolved via {start_resolution:?}"
        );
    }

    StairsPlacement { stairs_up, stairs_down, start, start_resolution }
}

pub(super) fn resolve_start(grid: &TileGrid) -> (Pos, StartResolution) {
    if let Some(tile) = grid.tiles().iter().find(|tile| tile.special == Some(Special::StairsUp)) {
        return (tile.pos, StartResolution::Stairs);
    }
    if let Some(tile) = grid.tiles().iter().find(|tile| tile.is_floor()) {
        return (tile.pos, StartResolution::Fallback);
    }
    (DEFAULT_START, StartResolution::Default)
}

fn stamp(grid: &mut TileGrid, pos: Pos, special: Special) {
    if let Some(tile) = grid.get_mut(pos) {
        tile.special = Some(special);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_prefers_the_stairs_up_tile() {
        let mut state = GeneratorState::new(7, 7);
        for x in 1..6 {
            state.grid.carve(Pos::new(x, 3), 0);
        }
        let mut rng = LevelRng::new("stairs");

        let placement = place_stairs(&mut state, &mut rng);

        let up = placement.stairs_up.expect("floor exists");
        assert!(placement.stairs_down.is_some());
        if placement.stairs_up == placement.stairs_down {
            assert_eq!(placement.start_resolution, StartResolution::Fallback);
            assert_eq!(placement.start, Pos::new(1, 3));
        } else {
            assert_eq!(placement.start_resolution, StartResolution::Stairs);
            assert_eq!(placement.start, up);
        }
    }

    #[test]
    fn coinciding_stairs_fall_back_to_the_first_floor_tile() {
        let mut state = GeneratorState::new(3, 3);
        state.grid.carve(Pos::new(1, 1), 0);
        let mut rng = LevelRng::new(0_u64);

        let placement = place_stairs(&mut state, &mut rng);

        assert_eq!(placement.stairs_up, Some(Pos::new(1, 1)));
        assert_eq!(placement.stairs_down, Some(Pos::new(1, 1)));
        assert_eq!(placement.start_resolution, StartResolution::Fallback);
        assert_eq!(placement.start, Pos::new(1, 1));
    }

    #[test]
    fn fallback_uses_scan_order() {
        let mut state = GeneratorState::new(5, 5);
        state.grid.carve(Pos::new(3, 3), 0);
        state.grid.carve(Pos::new(3, 2), 0);
        state.grid.carve(Pos::new(3, 1), 0);

        let (start, resolution) = resolve_start(&state.grid);

        assert_eq!((start, resolution), (Pos::new(3, 1), StartResolution::Fallback));
    }

    #[test]
    fn no_floor_resolves_to_the_default_start() {
        let mut state = GeneratorState::new(3, 3);
        let mut rng = LevelRng::new(0_u64);
        let placement = place_stairs(&mut state, &mut rng);
        assert_eq!(placement.stairs_up, None);
        assert_eq!(placement.stairs_down, None);
        assert_eq!(placement.start, DEFAULT_START);
        assert_eq!(placement.start_resolution, StartResolution::Default);
    }
}
