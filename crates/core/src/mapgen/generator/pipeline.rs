//! Level-construction pipeline that composes the mapgen stages.

use crate::config::GeneratorConfig;

use super::super::connect::connect_regions;
use super::super::layout::place_rooms;
use super::super::maze::{carve_mazes, remove_dead_ends};
use super::super::model::LevelDescriptor;
use super::super::seed::LevelRng;
use super::super::stairs::place_stairs;
use super::super::walls::{derive_walls, place_doors};
use super::super::zones::{ZoneAnchors, place_zones};
use super::GeneratorState;

pub(super) fn run(
    state: &mut GeneratorState,
    rng: &mut LevelRng,
    config: &GeneratorConfig,
    level_number: u32,
) -> LevelDescriptor {
    place_rooms(state, rng, config);
    carve_mazes(state, rng, config.winding_percent);
    let connectivity = connect_regions(state, rng, config.extra_connector_chance);
    if config.remove_dead_ends {
        let filled = remove_dead_ends(state);
        log::debug!("filled {filled} dead-end tiles");
    }

    derive_walls(state);
    if config.doors_enabled {
        place_doors(state, rng, config.door_chance);
    }

    let stairs = place_stairs(state, rng);
    let anchors = ZoneAnchors { start: stairs.start, stairs_down: stairs.stairs_down };
    let override_zones = place_zones(state, rng, config, &anchors);

    let width = state.grid.width();
    let height = state.grid.height();
    log::debug!(
        "level {level_number}: {width}x{height}, {} rooms, {} regions, start {:?} via {:?}",
        state.rooms.len(),
        state.regions.count(),
        stairs.start,
        stairs.start_resolution
    );

    LevelDescriptor {
        level_number,
        width,
        height,
        tiles: state.grid.tiles().to_vec(),
        rooms: state.rooms.clone(),
        override_zones,
        start: stairs.start,
        start_resolution: stairs.start_resolution,
        stairs_up: stairs.stairs_up,
        stairs_down: stairs.stairs_down,
        connectivity,
    }
}
