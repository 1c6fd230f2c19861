// src/dungeon/snapshot.rs
//! Снимок готовой карты для внешних потребителей (экспорт, отрисовка)
//!
//! Снимок — неизменяемая копия данных: комнаты, открытые клетки и коридоры.

use super::DungeonMap;
use super::corridor::Corridor;
use super::placement::PlacementReport;
use crate::graph::VertexId;
use crate::room::{Bounds, Corners};
use crate::tile::Coordinate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSnapshot {
    pub id: VertexId,
    pub bounds: Bounds,
    pub corners: Corners,
    /// Соседи по графу в порядке добавления рёбер
    pub neighbors: Vec<VertexId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapSnapshot {
    pub width: i32,
    pub height: i32,
    pub placement: PlacementReport,
    pub rooms: Vec<RoomSnapshot>,
    /// Открытые клетки, отсортированные по (x, y)
    pub open_tiles: Vec<Coordinate>,
    pub corridors: Vec<Corridor>,
}

impl DungeonMap {
    #[must_use]
    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            width: self.width(),
            height: self.height(),
            placement: self.placement.clone(),
            rooms: self
                .rooms()
                .map(|room| RoomSnapshot {
                    id: room.id(),
                    bounds: room.bounds(),
                    corners: *room.corners(),
                    neighbors: self.graph.neighbors(room.id()),
                })
                .collect(),
            open_tiles: self.tiles.coordinates().collect(),
            corridors: self.corridors.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::DungeonParams;
    use crate::dungeon::DungeonMap;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn snapshot_mirrors_the_map() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let map = DungeonMap::generate(&DungeonParams::default(), &mut rng).unwrap();
        let snapshot = map.snapshot();

        assert_eq!(snapshot.rooms.len(), map.room_count());
        assert_eq!(snapshot.open_tiles.len(), map.tiles().len());
        assert_eq!(snapshot.corridors.len(), map.corridors().len());
        assert!(snapshot.open_tiles.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let map = DungeonMap::generate(&DungeonParams::default(), &mut rng).unwrap();
        let json = serde_json::to_value(map.snapshot()).unwrap();

        assert_eq!(json["width"], 20);
        assert!(json["rooms"][0]["bounds"]["x_min"].is_number());
        assert!(json["open_tiles"].as_array().is_some_and(|tiles| !tiles.is_empty()));
    }
}
