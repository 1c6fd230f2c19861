// src/tile.rs
//! Координаты и тайлы
//!
//! Карта хранит только открытые клетки: отсутствие записи означает «закрыто/неизвестно».
//! Генерация только добавляет тайлы и никогда их не удаляет.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Целочисленная точка на сетке
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Соседняя клетка в заданном направлении
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Значение клетки. В ядре моделируется только один вид — открытая клетка.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tile {
    #[default]
    Open,
}

/// Четыре направления движения по сетке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    East,
    West,
    South,
    North,
}

impl Direction {
    /// Все направления в порядке кодов действий 1..=4
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::South,
        Direction::North,
    ];

    #[must_use]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::South => (0, 1),
            Direction::North => (0, -1),
        }
    }

    /// Код действия для табличного экспорта переходов
    #[must_use]
    pub fn action_code(self) -> u8 {
        match self {
            Direction::East => 1,
            Direction::West => 2,
            Direction::South => 3,
            Direction::North => 4,
        }
    }
}

/// Отображение координата → тайл
///
/// `BTreeMap` даёт детерминированный порядок обхода для экспорта и тестов.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileMap {
    tiles: BTreeMap<Coordinate, Tile>,
}

impl TileMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, coord: Coordinate) {
        self.tiles.insert(coord, Tile::Open);
    }

    /// Объединяет с другой картой. Повторная запись безвредна: значение всегда `Open`.
    pub fn merge(&mut self, other: &TileMap) {
        self.tiles.extend(other.iter());
    }

    #[must_use]
    pub fn get(&self, coord: Coordinate) -> Option<Tile> {
        self.tiles.get(&coord).copied()
    }

    #[must_use]
    pub fn is_open(&self, coord: Coordinate) -> bool {
        self.get(coord) == Some(Tile::Open)
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Tile)> + '_ {
        self.tiles.iter().map(|(&coord, &tile)| (coord, tile))
    }

    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.tiles.keys().copied()
    }
}

impl FromIterator<Coordinate> for TileMap {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        let mut map = TileMap::new();
        for coord in iter {
            map.open(coord);
        }
        map
    }
}
