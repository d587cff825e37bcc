//! Dungeon levels
//!
//! A level is a tile grid with a spawn point, the entities placed when the
//! world starts on it, and per-cell arrival traits.

mod generator;

pub use generator::LevelGenerator;

use serde::{Deserialize, Serialize};

use crate::entity::{Item, Living, Location};

/// Kind of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Floor,
    Rock,
    DoorOpen,
    DoorClosed,
    StairsUp,
    StairsDown,
}

impl Tile {
    /// Whether an entity may stand on this tile
    pub fn is_walkable(&self) -> bool {
        !matches!(self, Tile::Rock | Tile::DoorClosed)
    }

    pub fn is_door(&self) -> bool {
        matches!(self, Tile::DoorOpen | Tile::DoorClosed)
    }

    /// Single character used when printing a level
    pub fn glyph(&self) -> char {
        match self {
            Tile::Floor => '.',
            Tile::Rock => '#',
            Tile::DoorOpen => '/',
            Tile::DoorClosed => '+',
            Tile::StairsUp => '<',
            Tile::StairsDown => '>',
        }
    }
}

/// Behavior bound to a cell, run when an entity arrives on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellTrait {
    /// Descend to a freshly generated level. Only players may enter, and
    /// only once every NPC is dead.
    NextLevel,
}

/// Something placed on the level each time the world starts on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitialEntity {
    Npc(Living),
    Item(Item),
}

impl InitialEntity {
    pub fn location(&self) -> Location {
        match self {
            InitialEntity::Npc(npc) => npc.location,
            InitialEntity::Item(item) => item.location,
        }
    }
}

/// A tile grid plus its spawn point, initial entities and cell traits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
    spawn: Location,
    initial_entities: Vec<InitialEntity>,
    traits: Vec<(Location, CellTrait)>,
}

impl Level {
    /// An all-floor level with the spawn in the top-left corner
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Floor; (width * height) as usize],
            spawn: Location::default(),
            initial_entities: Vec::new(),
            traits: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, loc: Location) -> bool {
        loc.x >= 0 && loc.y >= 0 && (loc.x as u32) < self.width && (loc.y as u32) < self.height
    }

    fn index(&self, loc: Location) -> Option<usize> {
        self.in_bounds(loc)
            .then(|| (loc.y as u32 * self.width + loc.x as u32) as usize)
    }

    /// Tile at a location, `None` outside the grid
    pub fn tile(&self, loc: Location) -> Option<Tile> {
        self.index(loc).map(|i| self.tiles[i])
    }

    /// Replace a tile. Out-of-bounds writes are ignored.
    pub fn set_tile(&mut self, loc: Location, tile: Tile) -> bool {
        match self.index(loc) {
            Some(i) => {
                self.tiles[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Whether the tile itself lets an entity stand there
    pub fn is_walkable(&self, loc: Location) -> bool {
        self.tile(loc).is_some_and(|t| t.is_walkable())
    }

    pub fn spawn(&self) -> Location {
        self.spawn
    }

    pub fn set_spawn(&mut self, loc: Location) {
        self.spawn = loc;
    }

    /// Arrival trait of a cell. Down-stairs carry [`CellTrait::NextLevel`]
    /// unless another trait was set explicitly.
    pub fn trait_at(&self, loc: Location) -> Option<CellTrait> {
        self.traits
            .iter()
            .find(|(l, _)| *l == loc)
            .map(|(_, t)| *t)
            .or_else(|| match self.tile(loc) {
                Some(Tile::StairsDown) => Some(CellTrait::NextLevel),
                _ => None,
            })
    }

    pub fn set_trait(&mut self, loc: Location, cell_trait: CellTrait) {
        self.traits.retain(|(l, _)| *l != loc);
        self.traits.push((loc, cell_trait));
    }

    pub fn initial_entities(&self) -> &[InitialEntity] {
        &self.initial_entities
    }

    pub fn add_initial(&mut self, entity: InitialEntity) {
        self.initial_entities.push(entity);
    }

    /// Every location in row-major order
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Location::new(x, y)))
    }

    /// First location holding a tile kind
    pub fn find_tile(&self, tile: Tile) -> Option<Location> {
        self.locations().find(|l| self.tile(*l) == Some(tile))
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.height as i32 {
            let row: String = (0..self.width as i32)
                .map(|x| self.tile(Location::new(x, y)).map_or(' ', |t| t.glyph()))
                .collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
