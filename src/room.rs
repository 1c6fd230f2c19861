// src/room.rs
//! Комнаты — прямоугольники со стенами и внутренней областью
//!
//! Комната владеет своей геометрией и тайлами и умеет перегенерировать себя
//! заново со свежими случайными размерами. После принятия в карту комната
//! больше не изменяется.

use crate::config::DungeonParams;
use crate::graph::{Vertex, VertexId};
use crate::tile::{Coordinate, TileMap};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Четыре угла прямоугольника
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corners {
    pub top_left: Coordinate,
    pub top_right: Coordinate,
    pub bottom_left: Coordinate,
    pub bottom_right: Coordinate,
}

impl Corners {
    /// Углы, выведенные из левого верхнего угла и размеров
    #[must_use]
    pub fn from_origin(origin: Coordinate, width: i32, height: i32) -> Self {
        Self {
            top_left: origin,
            top_right: Coordinate::new(origin.x + width, origin.y),
            bottom_left: Coordinate::new(origin.x, origin.y + height),
            bottom_right: Coordinate::new(origin.x + width, origin.y + height),
        }
    }

    #[must_use]
    pub fn as_array(&self) -> [Coordinate; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }
}

/// Границы комнаты, согласованные с углами
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Bounds {
    fn from_corners(corners: &Corners) -> Self {
        Self {
            x_min: corners.top_left.x,
            y_min: corners.top_left.y,
            x_max: corners.top_right.x,
            y_max: corners.bottom_left.y,
        }
    }

    /// Попадает ли точка в прямоугольник, расширенный на `margin` со всех сторон (включительно)
    #[must_use]
    pub fn contains_with_margin(&self, point: Coordinate, margin: i32) -> bool {
        (self.x_min - margin..=self.x_max + margin).contains(&point.x)
            && (self.y_min - margin..=self.y_max + margin).contains(&point.y)
    }

    /// Есть ли хотя бы одна клетка не на стене
    #[must_use]
    pub fn has_interior(&self) -> bool {
        self.x_max - self.x_min >= 2 && self.y_max - self.y_min >= 2
    }

    /// Строго внутри: не на стене
    #[must_use]
    pub fn is_interior(&self, point: Coordinate) -> bool {
        point.x > self.x_min && point.x < self.x_max && point.y > self.y_min && point.y < self.y_max
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    id: VertexId,
    corners: Corners,
    bounds: Bounds,
    tiles: TileMap,
}

impl Room {
    /// Создаёт комнату со случайной геометрией
    pub fn new<R: Rng + ?Sized>(id: VertexId, params: &DungeonParams, rng: &mut R) -> Self {
        let (origin, width, height) = roll_geometry(params, rng);
        Self::from_origin(id, origin, width, height)
    }

    /// Создаёт комнату с заданной геометрией
    ///
    /// `width` и `height` — разница координат противоположных стен. Размеры не проверяются:
    /// комнату без внутренней области отклонит `DungeonMap::from_rooms`.
    #[must_use]
    pub fn from_origin(id: VertexId, origin: Coordinate, width: i32, height: i32) -> Self {
        let corners = Corners::from_origin(origin, width, height);
        let mut room = Self {
            id,
            corners,
            bounds: Bounds::from_corners(&corners),
            tiles: TileMap::new(),
        };
        room.rebuild(origin, width, height);
        room
    }

    /// Перегенерирует геометрию и тайлы со свежей случайностью
    pub fn generate<R: Rng + ?Sized>(&mut self, params: &DungeonParams, rng: &mut R) {
        let (origin, width, height) = roll_geometry(params, rng);
        self.rebuild(origin, width, height);
    }

    fn rebuild(&mut self, origin: Coordinate, width: i32, height: i32) {
        self.tiles.clear();
        self.corners = Corners::from_origin(origin, width, height);
        self.bounds = Bounds::from_corners(&self.corners);
        self.build_corners();
        self.build_walls();
        self.build_interior();
    }

    fn build_corners(&mut self) {
        for corner in self.corners.as_array() {
            self.tiles.open(corner);
        }
    }

    fn build_walls(&mut self) {
        let Bounds {
            x_min,
            x_max,
            y_min,
            y_max,
        } = self.bounds;
        for x in x_min..=x_max {
            self.tiles.open(Coordinate::new(x, y_min));
            self.tiles.open(Coordinate::new(x, y_max));
        }
        for y in y_min..=y_max {
            self.tiles.open(Coordinate::new(x_min, y));
            self.tiles.open(Coordinate::new(x_max, y));
        }
    }

    fn build_interior(&mut self) {
        let b = self.bounds;
        for x in b.x_min + 1..b.x_max {
            for y in b.y_min + 1..b.y_max {
                self.tiles.open(Coordinate::new(x, y));
            }
        }
    }

    /// Случайная внутренняя точка (не на стене)
    pub fn random_interior_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Coordinate {
        let b = self.bounds;
        let x = rng.gen_range(b.x_min + 1..=b.x_max - 1);
        let y = rng.gen_range(b.y_min + 1..=b.y_max - 1);
        Coordinate::new(x, y)
    }

    /// Пересекается ли эта комната с `other` с учётом отступа в одну клетку.
    ///
    /// Проверка несимметрична: смотрятся только углы `self`.
    #[must_use]
    pub fn overlaps(&self, other: &Room) -> bool {
        self.corners
            .as_array()
            .iter()
            .any(|&corner| other.bounds.contains_with_margin(corner, 1))
    }

    #[must_use]
    pub fn id(&self) -> VertexId {
        self.id
    }

    #[must_use]
    pub fn corners(&self) -> &Corners {
        &self.corners
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }
}

impl Vertex for Room {
    fn id(&self) -> VertexId {
        self.id
    }
}

fn roll_geometry<R: Rng + ?Sized>(params: &DungeonParams, rng: &mut R) -> (Coordinate, i32, i32) {
    let rooms = &params.rooms;
    let origin = Coordinate::new(
        rng.gen_range(0..=params.width - rooms.edge_margin),
        rng.gen_range(0..=params.height - rooms.edge_margin),
    );
    let height = rng.gen_range(rooms.min_height..=rooms.max_height);
    let width = rng.gen_range(rooms.min_width..=rooms.max_width);
    (origin, width, height)
}
