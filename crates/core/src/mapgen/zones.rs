//! Encounter override zones stamped over the finished layout.
//!
//! Zones are placed in a fixed order: safe, boss, special mobs, high frequency.
//! Safe and boss squares go down unconditionally; every later zone must miss all
//! zones placed before it. Tiles covered by several zones keep the last stamp.

use crate::config::GeneratorConfig;
use crate::types::Pos;

use super::generator::GeneratorState;
use super::model::{OverrideZone, Rect, Room, RoomKind, ZoneKind};
use super::seed::LevelRng;

pub(super) struct ZoneAnchors {
    pub(super) start: Pos,
    pub(super) stairs_down: Option<Pos>,
}

pub(super) fn place_zones(
    state: &mut GeneratorState,
    rng: &mut LevelRng,
    config: &GeneratorConfig,
    anchors: &ZoneAnchors,
) -> Vec<OverrideZone> {
    let width = state.grid.width();
    let height = state.grid.height();
    let rates = config.encounter_rates;
    let mut zones = Vec::new();

    zones.push(OverrideZone {
        id: zone_id(ZoneKind::Safe, 0),
        kind: ZoneKind::Safe,
        rect: Rect::square_around(anchors.start, config.safe_zone_radius, width, height),
        encounter_rate: 0.0,
        description: "Quiet ground around the entrance".to_string(),
        monster_groups: Vec::new(),
    });

    if let Some(stairs_down) = anchors.stairs_down {
        zones.push(OverrideZone {
            id: zone_id(ZoneKind::Boss, 0),
            kind: ZoneKind::Boss,
            rect: Rect::square_around(stairs_down, config.boss_zone_radius, width, height),
            encounter_rate: rates.boss,
            description: "A guardian watches the way down".to_string(),
            monster_groups: vec!["boss".to_string()],
        });
    }

    let special_count =
        rng.between(config.special_mob_zones.min, config.special_mob_zones.max);
    for index in 0..special_count {
        let available: Vec<&Room> = state
            .rooms
            .iter()
            .filter(|room| !zones.iter().any(|zone| zone.rect.intersects(&room.rect)))
            .collect();
        if available.is_empty() {
            break;
        }
        let room = available[rng.below(available.len())];
        let monster_groups = match room.kind {
            RoomKind::Chamber => vec!["elite".to_string()],
            RoomKind::Hall => vec!["elite".to_string(), "pack".to_string()],
        };
        zones.push(OverrideZone {
            id: zone_id(ZoneKind::SpecialMobs, index),
            kind: ZoneKind::SpecialMobs,
            rect: room.rect,
            encounter_rate: rates.special_mobs,
            description: format!("Room {} is held by unusual monsters", room.id),
            monster_groups,
        });
    }

    let mut corridor_pool: Vec<Pos> = state
        .grid
        .floor_positions()
        .into_iter()
        .filter(|&pos| !state.rooms.iter().any(|room| room.rect.contains(pos)))
        .collect();
    let high_frequency_count =
        rng.between(config.high_frequency_zones.min, config.high_frequency_zones.max);
    let mut placed = 0_usize;
    while placed < high_frequency_count && !corridor_pool.is_empty() {
        let anchor = corridor_pool.remove(rng.below(corridor_pool.len()));
        let rect =
            Rect::square_around(anchor, config.high_frequency_zone_radius, width, height);
        if zones.iter().any(|zone| zone.rect.intersects(&rect)) {
            continue;
        }
        zones.push(OverrideZone {
            id: zone_id(ZoneKind::HighFrequency, placed),
            kind: ZoneKind::HighFrequency,
            rect,
            encounter_rate: rates.high_frequency,
            description: "A well-travelled stretch of corridor".to_string(),
            monster_groups: Vec::new(),
        });
        placed += 1;
    }

    stamp_zone_ids(state, &zones);
    log::debug!("placed {} override zones", zones.len());
    zones
}

fn zone_id(kind: ZoneKind, index: usize) -> String {
    format!("{}-{index}", kind.label())
}

fn stamp_zone_ids(state: &mut GeneratorState, zones: &[OverrideZone]) {
    for zone in zones {
        for pos in zone.rect.positions() {
            if let Some(tile) = state.grid.get_mut(pos)
                && tile.is_floor()
            {
                tile.encounter_zone_id = Some(zone.id.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CountRange, EncounterRates};
    use crate::mapgen::connect::connect_regions;
    use crate::mapgen::layout::place_rooms;
    use crate::mapgen::maze::carve_mazes;

    fn finished_layout(seed: u64, size: usize) -> (GeneratorState, LevelRng) {
        let config = GeneratorConfig::default();
        let mut state = GeneratorState::new(size, size);
        let mut rng = LevelRng::new(seed);
        place_rooms(&mut state, &mut rng, &config);
        carve_mazes(&mut state, &mut rng, config.winding_percent);
        connect_regions(&mut state, &mut rng, config.extra_connector_chance);
        (state, rng)
    }

    fn anchors(state: &GeneratorState) -> ZoneAnchors {
        let floors = state.grid.floor_positions();
        ZoneAnchors { start: floors[0], stairs_down: floors.last().copied() }
    }

    #[test]
    fn zones_come_out_in_placement_order() {
        let (mut state, mut rng) = finished_layout(21, 41);
        let anchors = anchors(&state);
        let zones = place_zones(&mut state, &mut rng, &GeneratorConfig::default(), &anchors);

        assert_eq!(zones[0].kind, ZoneKind::Safe);
        assert_eq!(zones[0].encounter_rate, 0.0);
        assert_eq!(zones[1].kind, ZoneKind::Boss);
        assert_eq!(zones[1].monster_groups, vec!["boss".to_string()]);
        let kinds: Vec<ZoneKind> = zones.iter().map(|zone| zone.kind).collect();
        let mut sorted = kinds.clone();
        sorted.sort_by_key(|kind| match kind {
            ZoneKind::Safe => 0,
            ZoneKind::Boss => 1,
            ZoneKind::SpecialMobs => 2,
            ZoneKind::HighFrequency => 3,
        });
        assert_eq!(kinds, sorted);
    }

    #[test]
    fn later_zones_never_overlap_earlier_ones() {
        for seed in 0..20_u64 {
            let (mut state, mut rng) = finished_layout(seed, 41);
            let anchors = anchors(&state);
            let config = GeneratorConfig {
                special_mob_zones: CountRange { min: 3, max: 4 },
                high_frequency_zones: CountRange { min: 3, max: 5 },
                ..Default::default()
            };
            let zones = place_zones(&mut state, &mut rng, &config, &anchors);

            for (index, zone) in zones.iter().enumerate().skip(2) {
                for earlier in &zones[..index] {
                    assert!(
                        !zone.rect.intersects(&earlier.rect),
                        "{} overlaps {} (seed {seed})",
                        zone.id,
                        earlier.id
                    );
                }
            }
        }
    }

    #[test]
    fn special_mob_zones_cover_whole_rooms() {
        let (mut state, mut rng) = finished_layout(3, 41);
        let anchors = anchors(&state);
        let config = GeneratorConfig {
            special_mob_zones: CountRange { min: 2, max: 2 },
            ..Default::default()
        };
        let zones = place_zones(&mut state, &mut rng, &config, &anchors);

        for zone in zones.iter().filter(|zone| zone.kind == ZoneKind::SpecialMobs) {
            assert!(state.rooms.iter().any(|room| room.rect == zone.rect));
            assert!(zone.monster_groups.contains(&"elite".to_string()));
        }
    }

    #[test]
    fn high_frequency_zones_are_anchored_in_corridors() {
        let (mut state, mut rng) = finished_layout(8, 41);
        let anchors = anchors(&state);
        let config = GeneratorConfig {
            high_frequency_zones: CountRange { min: 2, max: 2 },
            high_frequency_zone_radius: 0,
            ..Default::default()
        };
        let zones = place_zones(&mut state, &mut rng, &config, &anchors);

        for zone in zones.iter().filter(|zone| zone.kind == ZoneKind::HighFrequency) {
            let anchor = zone.rect.center();
            assert!(state.grid.is_floor(anchor));
            assert!(!state.rooms.iter().any(|room| room.rect.contains(anchor)));
        }
    }

    #[test]
    fn only_floor_tiles_receive_zone_ids() {
        let (mut state, mut rng) = finished_layout(5, 31);
        let anchors = anchors(&state);
        let zones = place_zones(&mut state, &mut rng, &GeneratorConfig::default(), &anchors);

        for tile in state.grid.tiles() {
            match &tile.encounter_zone_id {
                Some(id) => {
                    assert!(tile.is_floor(), "solid tile {:?} stamped", tile.pos);
                    let zone = zones.iter().find(|zone| &zone.id == id).expect("zone exists");
                    assert!(zone.rect.contains(tile.pos));
                }
                None => {
                    if tile.is_floor() {
                        assert!(!zones.iter().any(|zone| zone.rect.contains(tile.pos)));
                    }
                }
            }
        }
    }

    fn corridor_strip(width: usize) -> GeneratorState {
        let mut state = GeneratorState::new(width, 7);
        for x in 1..(width as i32 - 1) {
            state.grid.carve(Pos::new(x, 3), 0);
        }
        state
    }

    #[test]
    fn safe_zone_rate_is_zero_whatever_the_config_says() {
        let mut state = corridor_strip(11);
        let mut rng = LevelRng::new(1_u64);
        let config = GeneratorConfig {
            encounter_rates: EncounterRates { safe: 0.5, ..Default::default() },
            ..Default::default()
        };
        let anchors = ZoneAnchors { start: Pos::new(1, 3), stairs_down: None };

        let zones = place_zones(&mut state, &mut rng, &config, &anchors);

        assert_eq!(zones[0].kind, ZoneKind::Safe);
        assert_eq!(zones[0].encounter_rate, 0.0);
    }

    #[test]
    fn boss_stamp_overwrites_safe_stamp_on_shared_tiles() {
        let mut state = corridor_strip(11);
        let mut rng = LevelRng::new(3_u64);
        let config = GeneratorConfig {
            high_frequency_zones: CountRange { min: 0, max: 0 },
            ..Default::default()
        };
        let anchors = ZoneAnchors { start: Pos::new(1, 3), stairs_down: Some(Pos::new(5, 3)) };

        let zones = place_zones(&mut state, &mut rng, &config, &anchors);

        assert_eq!(zones.len(), 2);
        let (safe, boss) = (&zones[0], &zones[1]);
        assert!(safe.rect.intersects(&boss.rect));
        let zone_at = |x: i32| {
            state.grid.get(Pos::new(x, 3)).and_then(|tile| tile.encounter_zone_id.clone())
        };
        assert_eq!(zone_at(1).as_deref(), Some("safe-0"));
        assert_eq!(zone_at(2).as_deref(), Some("safe-0"));
        assert_eq!(zone_at(3).as_deref(), Some("boss-0"), "shared tile keeps the later zone");
        assert_eq!(zone_at(7).as_deref(), Some("boss-0"));
        assert_eq!(zone_at(8), None);
    }

    #[test]
    fn missing_stairs_skip_the_boss_zone() {
        let (mut state, mut rng) = finished_layout(2, 21);
        let anchors = ZoneAnchors { start: Pos::new(1, 1), stairs_down: None };
        let zones = place_zones(&mut state, &mut rng, &GeneratorConfig::default(), &anchors);
        assert!(zones.iter().all(|zone| zone.kind != ZoneKind::Boss));
    }
}
