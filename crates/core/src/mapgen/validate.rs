//! Structural checks over finished levels, shared by tests and the tooling binaries.

use std::collections::VecDeque;

use crate::types::{Direction, Pos};

use super::model::{LevelDescriptor, OverrideZone, ZoneKind};

pub fn floor_count(level: &LevelDescriptor) -> usize {
    level.floor_tiles().count()
}

/// Floor tiles reachable from the start by crossing passages and doors.
pub fn reachable_floor_count(level: &LevelDescriptor) -> usize {
    if !level.is_floor(level.start) {
        return 0;
    }

    let mut seen = vec![false; level.width * level.height];
    let index = |pos: Pos| (pos.y as usize) * level.width + (pos.x as usize);
    seen[index(level.start)] = true;
    let mut open = VecDeque::from([level.start]);
    let mut reached = 0_usize;

    while let Some(pos) = open.pop_front() {
        reached += 1;
        let Some(tile) = level.tile(pos) else {
            continue;
        };
        for direction in Direction::ALL {
            if !tile.walls.get(direction).is_passable() {
                continue;
            }
            let next = pos.step(direction);
            if !level.is_floor(next) || seen[index(next)] {
                continue;
            }
            seen[index(next)] = true;
            open.push_back(next);
        }
    }

    reached
}

pub fn is_fully_connected(level: &LevelDescriptor) -> bool {
    reachable_floor_count(level) == floor_count(level)
}

/// Floor-tile edges whose wall state disagrees with the neighbouring tile.
pub fn wall_inconsistencies(level: &LevelDescriptor) -> Vec<(Pos, Direction)> {
    let mut mismatches = Vec::new();
    for tile in level.floor_tiles() {
        for direction in Direction::ALL {
            let wall = tile.walls.get(direction);
            let neighbour = tile.pos.step(direction);
            let consistent = if level.is_floor(neighbour) {
                !wall.exists || wall.is_door()
            } else {
                wall.exists && !wall.is_door()
            };
            if !consistent {
                mismatches.push((tile.pos, direction));
            }
        }
    }
    mismatches
}

/// Pairs of special-mob / high-frequency zones whose rectangles intersect.
pub fn overlapping_zone_pairs(zones: &[OverrideZone]) -> Vec<(String, String)> {
    let checked: Vec<&OverrideZone> = zones
        .iter()
        .filter(|zone| matches!(zone.kind, ZoneKind::SpecialMobs | ZoneKind::HighFrequency))
        .collect();

    let mut pairs = Vec::new();
    for (index, left) in checked.iter().enumerate() {
        for right in &checked[index + 1..] {
            if left.rect.intersects(&right.rect) {
                pairs.push((left.id.clone(), right.id.clone()));
            }
        }
    }
    pairs
}
