//! Row-major tile lattice shared by every generation stage.

use crate::types::{Direction, Pos};

use super::model::{Tile, TileKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> Self {
        let mut tiles = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile::solid(Pos { y: y as i32, x: x as i32 }));
            }
        }
        Self { width, height, tiles }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn into_tiles(self) -> Vec<Tile> {
        self.tiles
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn is_border(&self, pos: Pos) -> bool {
        pos.x == 0
            || pos.y == 0
            || pos.x as usize == self.width - 1
            || pos.y as usize == self.height - 1
    }

    /// In bounds and not on the outer ring.
    pub fn is_interior(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && !self.is_border(pos)
    }

    pub fn get(&self, pos: Pos) -> Option<&Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.tiles.get(self.index(pos))
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        let index = self.index(pos);
        self.tiles.get_mut(index)
    }

    /// Off-grid cells read as solid.
    pub fn kind_at(&self, pos: Pos) -> TileKind {
        self.get(pos).map_or(TileKind::Solid, |tile| tile.kind)
    }

    pub fn is_floor(&self, pos: Pos) -> bool {
        self.kind_at(pos) == TileKind::Floor
    }

    pub fn region_at(&self, pos: Pos) -> Option<usize> {
        self.get(pos).and_then(|tile| tile.region)
    }

    pub fn carve(&mut self, pos: Pos, region: usize) {
        if let Some(tile) = self.get_mut(pos) {
            tile.kind = TileKind::Floor;
            tile.region = Some(region);
        }
    }

    pub fn fill(&mut self, pos: Pos) {
        if let Some(tile) = self.get_mut(pos) {
            tile.kind = TileKind::Solid;
            tile.region = None;
        }
    }

    pub fn solid_neighbour_count(&self, pos: Pos) -> usize {
        Direction::ALL.into_iter().filter(|&direction| !self.is_floor(pos.step(direction))).count()
    }

    /// Every position in row-major scan order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let width = self.width;
        (0..self.height)
            .flat_map(move |y| (0..width).map(move |x| Pos { y: y as i32, x: x as i32 }))
    }

    pub fn floor_positions(&self) -> Vec<Pos> {
        self.tiles.iter().filter(|tile| tile.is_floor()).map(|tile| tile.pos).collect()
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}
