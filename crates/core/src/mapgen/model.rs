//! Public data models for generated levels: tiles, walls, rooms, zones, and the level descriptor.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Direction, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Solid,
    Floor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallKind {
    Solid,
    Door,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenMechanism {
    Player,
    Key,
    Lever,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoorProperties {
    pub locked: bool,
    pub open: bool,
    pub open_mechanism: OpenMechanism,
    pub key_id: Option<String>,
    pub one_way: bool,
    pub hidden: bool,
    pub discovered: bool,
}

impl Default for DoorProperties {
    fn default() -> Self {
        Self {
            locked: false,
            open: false,
            open_mechanism: OpenMechanism::Player,
            key_id: None,
            one_way: false,
            hidden: false,
            discovered: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wall {
    pub exists: bool,
    pub kind: WallKind,
    pub properties: Option<DoorProperties>,
}

impl Wall {
    pub fn solid() -> Self {
        Self { exists: true, kind: WallKind::Solid, properties: None }
    }

    pub fn passage() -> Self {
        Self { exists: false, kind: WallKind::Solid, properties: None }
    }

    pub fn door() -> Self {
        Self { exists: true, kind: WallKind::Door, properties: Some(DoorProperties::default()) }
    }

    pub fn is_door(&self) -> bool {
        self.exists && self.kind == WallKind::Door
    }

    /// Movement may cross this edge: either an open passage or a door.
    pub fn is_passable(&self) -> bool {
        !self.exists || self.kind == WallKind::Door
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Walls {
    pub north: Wall,
    pub south: Wall,
    pub east: Wall,
    pub west: Wall,
}

impl Walls {
    pub fn all_solid() -> Self {
        Self {
            north: Wall::solid(),
            south: Wall::solid(),
            east: Wall::solid(),
            west: Wall::solid(),
        }
    }

    pub fn get(&self, direction: Direction) -> &Wall {
        match direction {
            Direction::North => &self.north,
            Direction::South => &self.south,
            Direction::East => &self.east,
            Direction::West => &self.west,
        }
    }

    pub fn get_mut(&mut self, direction: Direction) -> &mut Wall {
        match direction {
            Direction::North => &mut self.north,
            Direction::South => &mut self.south,
            Direction::East => &mut self.east,
            Direction::West => &mut self.west,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Special {
    StairsUp,
    StairsDown,
    Treasure,
    Door,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub pos: Pos,
    pub kind: TileKind,
    pub walls: Walls,
    pub region: Option<usize>,
    pub special: Option<Special>,
    pub encounter_zone_id: Option<String>,
}

impl Tile {
    pub fn solid(pos: Pos) -> Self {
        Self {
            pos,
            kind: TileKind::Solid,
            walls: Walls::all_solid(),
            region: None,
            special: None,
            encounter_zone_id: None,
        }
    }

    pub fn is_floor(&self) -> bool {
        self.kind == TileKind::Floor
    }
}

/// Axis-aligned inclusive rectangle in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn right(self) -> usize {
        self.x + self.width - 1
    }

    pub fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    pub fn center(self) -> Pos {
        Pos { y: (self.y + (self.height / 2)) as i32, x: (self.x + (self.width / 2)) as i32 }
    }

    /// Square of the given radius around `center`, clipped to a `width` x `height` grid.
    pub fn square_around(center: Pos, radius: usize, width: usize, height: usize) -> Self {
        let radius = radius as i64;
        let left = (i64::from(center.x) - radius).max(0) as usize;
        let top = (i64::from(center.y) - radius).max(0) as usize;
        let right = ((i64::from(center.x) + radius).max(0) as usize).min(width.saturating_sub(1));
        let bottom = ((i64::from(center.y) + radius).max(0) as usize).min(height.saturating_sub(1));
        Self {
            x: left,
            y: top,
            width: right.saturating_sub(left) + 1,
            height: bottom.saturating_sub(top) + 1,
        }
    }

    pub fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    pub fn contains(self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 {
            return false;
        }
        let px = pos.x as usize;
        let py = pos.y as usize;
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    pub fn positions(self) -> impl Iterator<Item = Pos> {
        (self.y..=self.bottom()).flat_map(move |y| {
            (self.x..=self.right()).map(move |x| Pos { y: y as i32, x: x as i32 })
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    Chamber,
    Hall,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub id: usize,
    pub rect: Rect,
    pub kind: RoomKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Safe,
    Boss,
    SpecialMobs,
    HighFrequency,
}

impl ZoneKind {
    pub fn label(self) -> &'static str {
        match self {
            ZoneKind::Safe => "safe",
            ZoneKind::Boss => "boss",
            ZoneKind::SpecialMobs => "special_mobs",
            ZoneKind::HighFrequency => "high_frequency",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverrideZone {
    pub id: String,
    pub kind: ZoneKind,
    pub rect: Rect,
    pub encounter_rate: f64,
    pub description: String,
    pub monster_groups: Vec<String>,
}

/// Which branch of start resolution produced the entry tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartResolution {
    Stairs,
    Fallback,
    Default,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectivityReport {
    pub region_count: usize,
    pub connected_regions: usize,
}

impl ConnectivityReport {
    pub fn is_complete(&self) -> bool {
        self.connected_regions == self.region_count
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    pub level_number: u32,
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
    pub rooms: Vec<Room>,
    pub override_zones: Vec<OverrideZone>,
    pub start: Pos,
    pub start_resolution: StartResolution,
    pub stairs_up: Option<Pos>,
    pub stairs_down: Option<Pos>,
    pub connectivity: ConnectivityReport,
}

impl LevelDescriptor {
    pub fn tile(&self, pos: Pos) -> Option<&Tile> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let x = pos.x as usize;
        let y = pos.y as usize;
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get(y * self.width + x)
    }

    pub fn is_floor(&self, pos: Pos) -> bool {
        self.tile(pos).is_some_and(Tile::is_floor)
    }

    pub fn floor_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|tile| tile.is_floor())
    }

    pub fn zone(&self, id: &str) -> Option<&OverrideZone> {
        self.override_zones.iter().find(|zone| zone.id == id)
    }

    /// Encounter rate override for the zone stamped on `pos`, if any.
    pub fn encounter_rate_at(&self, pos: Pos) -> Option<f64> {
        let zone_id = self.tile(pos)?.encounter_zone_id.as_deref()?;
        self.zone(zone_id).map(|zone| zone.encounter_rate)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.level_number.to_le_bytes());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());

        for tile in &self.tiles {
            bytes.push(match tile.kind {
                TileKind::Solid => 0,
                TileKind::Floor => 1,
            });
            let mut wall_bits = 0_u8;
            for (slot, direction) in Direction::ALL.into_iter().enumerate() {
                let wall = tile.walls.get(direction);
                if wall.exists {
                    wall_bits |= 1 << (slot * 2);
                }
                if wall.kind == WallKind::Door {
                    wall_bits |= 1 << (slot * 2 + 1);
                }
            }
            bytes.push(wall_bits);
            bytes.extend(tile.region.map_or(u32::MAX, |region| region as u32).to_le_bytes());
            bytes.push(match tile.special {
                None => 0,
                Some(Special::StairsUp) => 1,
                Some(Special::StairsDown) => 2,
                Some(Special::Treasure) => 3,
                Some(Special::Door) => 4,
            });
            let zone_id = tile.encounter_zone_id.as_deref().unwrap_or("");
            bytes.extend((zone_id.len() as u32).to_le_bytes());
            bytes.extend(zone_id.as_bytes());
        }

        bytes.extend((self.override_zones.len() as u32).to_le_bytes());
        for zone in &self.override_zones {
            bytes.extend((zone.id.len() as u32).to_le_bytes());
            bytes.extend(zone.id.as_bytes());
            for value in [zone.rect.x, zone.rect.y, zone.rect.width, zone.rect.height] {
                bytes.extend((value as u32).to_le_bytes());
            }
            bytes.extend(zone.encounter_rate.to_bits().to_le_bytes());
        }

        for pos in [Some(self.start), self.stairs_up, self.stairs_down] {
            match pos {
                Some(pos) => {
                    bytes.push(1);
                    bytes.extend(pos.y.to_le_bytes());
                    bytes.extend(pos.x.to_le_bytes());
                }
                None => bytes.push(0),
            }
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
