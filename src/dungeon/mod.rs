// src/dungeon/mod.rs
//! Карта подземелья
//!
//! Генерация — последовательный конвейер на одном источнике случайности:
//! 1. Размещение комнат (с перегенерацией при пересечениях)
//! 2. Случайный граф над комнатами и склейка компонент связности
//! 3. Объединение тайлов всех комнат
//! 4. Один коридор на каждое ребро графа
//!
//! Готовая карта только читается: тайлы, границы комнат, коридоры.

pub mod corridor;
pub mod items;
pub mod placement;
pub mod snapshot;

use crate::config::DungeonParams;
use crate::error::GenerationError;
use crate::graph::{Graph, VertexId, Wiring};
use crate::room::Room;
use crate::tile::{Coordinate, Direction, Tile, TileMap};
use corridor::{Corridor, carve_corridors};
use placement::{PlacementReport, RandomRooms, place_rooms};
use rand::Rng;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct DungeonMap {
    params: DungeonParams,
    graph: Graph<Room>,
    tiles: TileMap,
    corridors: Vec<Corridor>,
    placement: PlacementReport,
    wiring: Wiring,
}

impl DungeonMap {
    /// Генерирует карту по параметрам, беря всю случайность из `rng`
    pub fn generate<R: Rng + ?Sized>(params: &DungeonParams, rng: &mut R) -> Result<Self, GenerationError> {
        params.validate()?;

        let requested = rng.gen_range(params.placement.min_rooms..=params.placement.max_rooms);
        let (rooms, placement) = {
            let mut source = RandomRooms::new(params, rng);
            place_rooms(requested, &params.placement, &mut source)
        };
        Self::from_rooms(params, rooms, placement, rng)
    }

    /// Достраивает карту из уже размещённых комнат: граф, тайлы, коридоры
    pub fn from_rooms<R: Rng + ?Sized>(
        params: &DungeonParams,
        rooms: Vec<Room>,
        placement: PlacementReport,
        rng: &mut R,
    ) -> Result<Self, GenerationError> {
        if !placement.is_complete() {
            if params.placement.require_all {
                return Err(GenerationError::PlacementExhausted {
                    requested: placement.requested,
                    placed: placement.placed,
                });
            }
            warn!(
                requested = placement.requested,
                placed = placement.placed,
                "размещены не все комнаты"
            );
        }
        if rooms.is_empty() {
            return Err(GenerationError::NoRooms);
        }
        if let Some(room) = rooms.iter().find(|room| !room.bounds().has_interior()) {
            return Err(GenerationError::InvalidRoom {
                id: room.id(),
                bounds: room.bounds(),
            });
        }

        let mut graph = Graph::new();
        let mut tiles = TileMap::new();
        for room in rooms {
            tiles.merge(room.tiles());
            graph.add_vertex(room)?;
        }

        let wiring = graph.randomly_add_edges(rng)?;
        let corridors = carve_corridors(&graph, &mut tiles, params.corridors.axis_order, rng)?;

        info!(
            rooms = graph.len(),
            requested = placement.requested,
            edges = graph.edge_count(),
            corridors = corridors.len(),
            open_tiles = tiles.len(),
            "подземелье сгенерировано"
        );

        Ok(Self {
            params: params.clone(),
            graph,
            tiles,
            corridors,
            placement,
            wiring,
        })
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.params.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.params.height
    }

    #[must_use]
    pub fn params(&self) -> &DungeonParams {
        &self.params
    }

    /// Тайл по координате или `None`, если клетка закрыта/неизвестна
    #[must_use]
    pub fn get_tile(&self, x: i32, y: i32) -> Option<Tile> {
        self.tiles.get(Coordinate::new(x, y))
    }

    #[must_use]
    pub fn is_open_tile(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y) == Some(Tile::Open)
    }

    #[must_use]
    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    /// Комнаты в порядке размещения
    pub fn rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.graph.vertices()
    }

    #[must_use]
    pub fn room(&self, id: VertexId) -> Option<&Room> {
        self.graph.vertex(id)
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        self.graph.len()
    }

    #[must_use]
    pub fn graph(&self) -> &Graph<Room> {
        &self.graph
    }

    #[must_use]
    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    #[must_use]
    pub fn placement(&self) -> &PlacementReport {
        &self.placement
    }

    #[must_use]
    pub fn wiring(&self) -> Wiring {
        self.wiring
    }

    /// Лежит ли в точке угол какой-либо комнаты
    #[must_use]
    pub fn is_room_corner(&self, x: i32, y: i32) -> bool {
        let point = Coordinate::new(x, y);
        self.rooms()
            .any(|room| room.corners().as_array().contains(&point))
    }

    /// Допустимые ходы из клетки: направление и открытая клетка назначения
    #[must_use]
    pub fn open_neighbors(&self, from: Coordinate) -> Vec<(Direction, Coordinate)> {
        Direction::ALL
            .iter()
            .map(|&direction| (direction, from.step(direction)))
            .filter(|&(_, to)| self.tiles.is_open(to))
            .collect()
    }
}
