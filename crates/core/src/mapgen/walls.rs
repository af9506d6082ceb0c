//! Derives per-tile wall state from neighbour solidity and turns some connector edges into doors.

use crate::types::{Direction, Pos};

use super::generator::GeneratorState;
use super::model::{Special, Wall, Walls};
use super::seed::LevelRng;

pub(super) fn derive_walls(state: &mut GeneratorState) {
    for pos in state.grid.positions() {
        let walls = if state.grid.is_floor(pos) {
            let wall_for = |direction: Direction| {
                if state.grid.is_floor(pos.step(direction)) {
                    Wall::passage()
                } else {
                    Wall::solid()
                }
            };
            Walls {
                north: wall_for(Direction::North),
                south: wall_for(Direction::South),
                east: wall_for(Direction::East),
                west: wall_for(Direction::West),
            }
        } else {
            Walls::all_solid()
        };
        if let Some(tile) = state.grid.get_mut(pos) {
            tile.walls = walls;
        }
    }
}

/// Places doors on the open edges of opened connectors. Returns the number of door edges.
pub(super) fn place_doors(
    state: &mut GeneratorState,
    rng: &mut LevelRng,
    door_chance: f64,
) -> usize {
    let eligible: Vec<Pos> = state.door_eligible.iter().copied().collect();
    let mut doors = 0_usize;

    for pos in eligible {
        if !state.grid.is_floor(pos) {
            continue;
        }
        let mut placed = false;
        for direction in Direction::ALL {
            let neighbour = pos.step(direction);
            if !state.grid.is_floor(neighbour) || !rng.chance(door_chance) {
                continue;
            }
            set_wall(state, pos, direction, Wall::door());
            set_wall(state, neighbour, direction.opposite(), Wall::door());
            placed = true;
            doors += 1;
        }
        if placed && let Some(tile) = state.grid.get_mut(pos) {
            tile.special = Some(Special::Door);
        }
    }

    log::debug!("placed {doors} doors across {} eligible connectors", state.door_eligible.len());
    doors
}

fn set_wall(state: &mut GeneratorState, pos: Pos, direction: Direction, wall: Wall) {
    if let Some(tile) = state.grid.get_mut(pos) {
        *tile.walls.get_mut(direction) = wall;
    }
}
