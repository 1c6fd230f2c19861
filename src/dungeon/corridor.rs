// src/dungeon/corridor.rs
//! Прокладка коридоров между связанными комнатами
//!
//! Для каждого ребра графа берётся по случайной внутренней точке в обеих комнатах,
//! и между ними строится Г-образный путь шириной в одну клетку.

use crate::config::AxisOrder;
use crate::error::GraphError;
use crate::graph::{Graph, VertexId};
use crate::room::Room;
use crate::tile::{Coordinate, TileMap};
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Коридор между двумя комнатами
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Corridor {
    pub from: VertexId,
    pub to: VertexId,
    pub start: Coordinate,
    pub end: Coordinate,
    /// Клетки пути без стартовой, последняя равна `end`
    pub path: Vec<Coordinate>,
}

/// Путь от `start` до `end` по одной клетке за шаг.
///
/// Сначала идёт полный проход по первой оси, затем по второй.
/// Стартовая клетка в путь не входит, поэтому длина равна манхэттенскому расстоянию.
#[must_use]
pub fn carve_path(start: Coordinate, end: Coordinate, y_first: bool) -> Vec<Coordinate> {
    let mut path = Vec::with_capacity(((start.x - end.x).abs() + (start.y - end.y).abs()) as usize);
    let mut cursor = start;

    let walk_x = |cursor: &mut Coordinate, path: &mut Vec<Coordinate>| {
        while cursor.x != end.x {
            cursor.x += (end.x - cursor.x).signum();
            path.push(*cursor);
        }
    };
    let walk_y = |cursor: &mut Coordinate, path: &mut Vec<Coordinate>| {
        while cursor.y != end.y {
            cursor.y += (end.y - cursor.y).signum();
            path.push(*cursor);
        }
    };

    if y_first {
        walk_y(&mut cursor, &mut path);
        walk_x(&mut cursor, &mut path);
    } else {
        walk_x(&mut cursor, &mut path);
        walk_y(&mut cursor, &mut path);
    }
    path
}

/// Коридор между двумя комнатами.
///
/// Монетка для порядка осей бросается всегда, даже при `AxisOrder::XThenY`,
/// чтобы последовательность случайных чисел не зависела от настройки.
pub fn carve_corridor<R: Rng + ?Sized>(
    from: &Room,
    to: &Room,
    order: AxisOrder,
    rng: &mut R,
) -> Corridor {
    let coin: bool = rng.r#gen();
    let start = from.random_interior_point(rng);
    let end = to.random_interior_point(rng);
    let y_first = match order {
        AxisOrder::XThenY => false,
        AxisOrder::Random => coin,
    };
    Corridor {
        from: from.id(),
        to: to.id(),
        start,
        end,
        path: carve_path(start, end, y_first),
    }
}

/// Прокладывает ровно один коридор на каждое различное ребро графа и открывает его клетки
pub fn carve_corridors<R: Rng + ?Sized>(
    graph: &Graph<Room>,
    tiles: &mut TileMap,
    order: AxisOrder,
    rng: &mut R,
) -> Result<Vec<Corridor>, GraphError> {
    let mut drawn = HashSet::new();
    let mut corridors = Vec::new();

    for room in graph.vertices() {
        for adjacent in graph.neighbors(room.id()) {
            let key = if room.id() < adjacent {
                (room.id(), adjacent)
            } else {
                (adjacent, room.id())
            };
            if !drawn.insert(key) {
                continue;
            }
            let other = graph
                .vertex(adjacent)
                .ok_or(GraphError::UnknownVertex(adjacent))?;
            let corridor = carve_corridor(room, other, order, rng);
            for &cell in &corridor.path {
                tiles.open(cell);
            }
            debug!(
                from = corridor.from,
                to = corridor.to,
                length = corridor.path.len(),
                "коридор проложен"
            );
            corridors.push(corridor);
        }
    }
    Ok(corridors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn x_then_y_makes_an_l_shape() {
        let path = carve_path(Coordinate::new(1, 1), Coordinate::new(4, 3), false);
        let expected: Vec<Coordinate> = [(2, 1), (3, 1), (4, 1), (4, 2), (4, 3)]
            .into_iter()
            .map(Coordinate::from)
            .collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn y_first_turns_the_other_way() {
        let path = carve_path(Coordinate::new(5, 5), Coordinate::new(3, 3), true);
        let expected: Vec<Coordinate> = [(5, 4), (5, 3), (4, 3), (3, 3)]
            .into_iter()
            .map(Coordinate::from)
            .collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn same_point_gives_empty_path() {
        let p = Coordinate::new(2, 2);
        assert!(carve_path(p, p, false).is_empty());
    }

    #[test]
    fn corridor_endpoints_are_room_interiors() {
        let a = Room::from_origin(0, Coordinate::new(0, 0), 5, 3);
        let b = Room::from_origin(1, Coordinate::new(10, 8), 6, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for order in [AxisOrder::XThenY, AxisOrder::Random] {
            let corridor = carve_corridor(&a, &b, order, &mut rng);
            assert!(a.bounds().is_interior(corridor.start));
            assert!(b.bounds().is_interior(corridor.end));
            assert_eq!(corridor.path.last(), Some(&corridor.end));
        }
    }

    #[test]
    fn each_edge_is_drawn_once() {
        let mut graph = Graph::new();
        graph.add_vertex(Room::from_origin(0, Coordinate::new(0, 0), 5, 3)).unwrap();
        graph.add_vertex(Room::from_origin(1, Coordinate::new(10, 0), 5, 3)).unwrap();
        graph.add_vertex(Room::from_origin(2, Coordinate::new(0, 10), 5, 3)).unwrap();
        graph.add_edge(0, 1).unwrap();
        graph.add_edge(2, 0).unwrap();

        let mut tiles = TileMap::new();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let corridors = carve_corridors(&graph, &mut tiles, AxisOrder::XThenY, &mut rng).unwrap();

        let pairs: Vec<(VertexId, VertexId)> = corridors.iter().map(|c| (c.from, c.to)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2)]);
        for corridor in &corridors {
            assert!(corridor.path.iter().all(|&cell| tiles.is_open(cell)));
        }
    }
}
