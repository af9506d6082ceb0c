//! Joins carved regions through connector cells until everything is reachable from region 0.

use crate::types::{Direction, Pos};

use super::generator::GeneratorState;
use super::model::ConnectivityReport;
use super::regions::RegionMerge;
use super::seed::LevelRng;

const OPEN_REGION: usize = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct Connector {
    pub(super) pos: Pos,
    /// Distinct neighbouring regions, ascending.
    pub(super) regions: Vec<usize>,
}

/// Solid interior cells whose orthogonal floor neighbours span two or more regions, in scan order.
pub(super) fn find_connectors(state: &GeneratorState) -> Vec<Connector> {
    let mut connectors = Vec::new();
    for pos in state.grid.positions() {
        if !state.grid.is_interior(pos) || state.grid.is_floor(pos) {
            continue;
        }
        let mut regions: Vec<usize> = Direction::ALL
            .into_iter()
            .filter_map(|direction| state.grid.region_at(pos.step(direction)))
            .collect();
        regions.sort_unstable();
        regions.dedup();
        if regions.len() >= 2 {
            connectors.push(Connector { pos, regions });
        }
    }
    connectors
}

pub(super) fn connect_regions(
    state: &mut GeneratorState,
    rng: &mut LevelRng,
    extra_connector_chance: f64,
) -> ConnectivityReport {
    let region_count = state.regions.count();
    if region_count == 0 {
        return ConnectivityReport { region_count: 0, connected_regions: 0 };
    }

    let connectors = find_connectors(state);
    let mut merge = RegionMerge::new(region_count);
    let mut consumed = vec![false; connectors.len()];
    let mut pool: Vec<usize> = (0..connectors.len()).collect();

    loop {
        let candidates: Vec<usize> = pool
            .iter()
            .copied()
            .filter(|&index| bridges_open_region(&mut merge, &connectors[index].regions))
            .collect();
        if candidates.is_empty() {
            break;
        }

        let chosen = candidates[rng.below(candidates.len())];
        let connector = &connectors[chosen];
        let open_root = merge.find(OPEN_REGION);
        state.grid.carve(connector.pos, open_root);
        state.door_eligible.insert(connector.pos);
        for &region in &connector.regions {
            merge.union(OPEN_REGION, region);
        }
        consumed[chosen] = true;

        pool.retain(|&index| {
            index != chosen && distinct_roots(&mut merge, &connectors[index].regions) > 1
        });
    }

    let mut loops = 0_usize;
    for (index, connector) in connectors.iter().enumerate() {
        if consumed[index] || !rng.chance(extra_connector_chance) {
            continue;
        }
        state.grid.carve(connector.pos, connector.regions[0]);
        state.door_eligible.insert(connector.pos);
        loops += 1;
    }

    let report =
        ConnectivityReport { region_count, connected_regions: merge.set_size(OPEN_REGION) };
    if report.is_complete() {
        log::debug!(
            "connected {region_count} regions through {} connectors ({loops} loops)",
            state.door_eligible.len()
        );
    } else {
        log::warn!(
            "connector pool exhausted: only {} of {} regions reachable from region 0",
            report.connected_regions,
            report.region_count
        );
    }
    report
}

fn bridges_open_region(merge: &mut RegionMerge, regions: &[usize]) -> bool {
    let open_root = merge.find(OPEN_REGION);
    let mut touches_open = false;
    let mut touches_closed = false;
    for &region in regions {
        if merge.find(region) == open_root {
            touches_open = true;
        } else {
            touches_closed = true;
        }
    }
    touches_open && touches_closed
}

fn distinct_roots(merge: &mut RegionMerge, regions: &[usize]) -> usize {
    let mut roots: Vec<usize> = regions.iter().map(|&region| merge.find(region)).collect();
    roots.sort_unstable();
    roots.dedup();
    roots.len()
}
