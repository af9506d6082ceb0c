//! Recursive-backtracker corridors between rooms, plus optional dead-end pruning.

use crate::types::{Direction, Pos};

use super::generator::GeneratorState;
use super::seed::LevelRng;

/// Grows one maze from every odd interior cell still solid after room packing.
pub(super) fn carve_mazes(state: &mut GeneratorState, rng: &mut LevelRng, winding_percent: f64) {
    let width = state.grid.width();
    let height = state.grid.height();
    let mut runs = 0_usize;

    for y in (1..height.saturating_sub(1)).step_by(2) {
        for x in (1..width.saturating_sub(1)).step_by(2) {
            let start = Pos { y: y as i32, x: x as i32 };
            if state.grid.is_floor(start) {
                continue;
            }
            grow_maze(state, rng, start, winding_percent);
            runs += 1;
        }
    }

    log::debug!("maze carver grew {runs} corridor regions");
}

fn grow_maze(state: &mut GeneratorState, rng: &mut LevelRng, start: Pos, winding_percent: f64) {
    let region = state.regions.allocate();
    state.grid.carve(start, region);

    let mut stack = vec![start];
    let mut last_direction: Option<Direction> = None;

    while let Some(&cell) = stack.last() {
        let open: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&direction| can_carve(state, cell, direction))
            .collect();

        if open.is_empty() {
            stack.pop();
            last_direction = None;
            continue;
        }

        let direction = match last_direction {
            Some(last) if open.contains(&last) && rng.chance(winding_percent) => last,
            _ => open[rng.below(open.len())],
        };

        state.grid.carve(cell.step(direction), region);
        let next = cell.step_by(direction, 2);
        state.grid.carve(next, region);
        stack.push(next);
        last_direction = Some(direction);
    }
}

fn is_dead_end(state: &GeneratorState, pos: Pos) -> bool {
    state.grid.is_floor(pos)
        && state.grid.solid_neighbour_count(pos) >= 3
        && !state.rooms.iter().any(|room| room.rect.contains(pos))
}

fn can_carve(state: &GeneratorState, cell: Pos, direction: Direction) -> bool {
    let destination = cell.step_by(direction, 2);
    state.grid.is_interior(destination) && !state.grid.is_floor(destination)
}

/// Refills corridor tips (floor with three or more solid sides) until none remain.
/// Room tiles are never refilled, so every recorded room keeps its floor.
pub(super) fn remove_dead_ends(state: &mut GeneratorState) -> usize {
    let mut pending: Vec<Pos> =
        state.grid.positions().filter(|&pos| is_dead_end(state, pos)).collect();
    let mut removed = 0_usize;

    while let Some(pos) = pending.pop() {
        if !is_dead_end(state, pos) {
            continue;
        }
        state.grid.fill(pos);
        state.door_eligible.remove(&pos);
        removed += 1;
        for direction in Direction::ALL {
            let neighbour = pos.step(direction);
            if is_dead_end(state, neighbour) {
                pending.push(neighbour);
            }
        }
    }

    log::debug!("dead-end removal refilled {removed} tiles");
    removed
}
