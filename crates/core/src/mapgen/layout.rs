//! Room packing on the odd lattice.

use crate::config::GeneratorConfig;

use super::generator::GeneratorState;
use super::model::{Rect, Room, RoomKind};
use super::seed::LevelRng;

/// Tries `room_attempts` random placements; each attempt either carves a whole room or
/// leaves the grid untouched.
pub(super) fn place_rooms(
    state: &mut GeneratorState,
    rng: &mut LevelRng,
    config: &GeneratorConfig,
) {
    let (minimum_size, maximum_size) = config.odd_room_sizes();
    let width = state.grid.width();
    let height = state.grid.height();

    for _ in 0..config.room_attempts {
        let room_width = rng.odd_between(minimum_size, maximum_size);
        let room_height = rng.odd_between(minimum_size, maximum_size);
        if room_width + 2 > width || room_height + 2 > height {
            continue;
        }

        let x = rng.odd_between(1, width - room_width - 1);
        let y = rng.odd_between(1, height - room_height - 1);
        let candidate = Rect { x, y, width: room_width, height: room_height };
        if state.rooms.iter().any(|room| room.rect.intersects(&candidate)) {
            continue;
        }

        carve_room(state, candidate, config);
    }

    log::debug!("room packer placed {} rooms", state.rooms.len());
}

fn carve_room(state: &mut GeneratorState, rect: Rect, config: &GeneratorConfig) {
    let region = state.regions.allocate();
    for pos in rect.positions() {
        state.grid.carve(pos, region);
    }

    let kind = if rect.width >= config.hall_min_size && rect.height >= config.hall_min_size {
        RoomKind::Hall
    } else {
        RoomKind::Chamber
    };
    state.rooms.push(Room { id: state.rooms.len(), rect, kind });
}
