use dungen::dungeon::corridor::carve_path;
use dungen::graph::{Graph, Vertex, VertexId};
use dungen::room::Room;
use dungen::{AxisOrder, Coordinate, DungeonMap, DungeonParams, ExhaustionPolicy};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn params_strategy() -> impl Strategy<Value = DungeonParams> {
    (
        any::<u64>(),
        20..40_i32,
        20..40_i32,
        prop_oneof![Just(AxisOrder::XThenY), Just(AxisOrder::Random)],
        prop_oneof![Just(ExhaustionPolicy::Abort), Just(ExhaustionPolicy::Skip)],
    )
        .prop_map(|(seed, width, height, axis_order, on_exhausted)| {
            let mut params = DungeonParams {
                seed,
                width,
                height,
                ..DungeonParams::default()
            };
            params.corridors.axis_order = axis_order;
            params.placement.on_exhausted = on_exhausted;
            params
        })
}

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-30..30_i32, -30..30_i32).prop_map(|(x, y)| Coordinate::new(x, y))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rooms_are_valid_rectangles_on_grid(params in params_strategy()) {
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let map = DungeonMap::generate(&params, &mut rng).unwrap();
        for room in map.rooms() {
            let b = room.bounds();
            prop_assert!(b.x_min < b.x_max);
            prop_assert!(b.y_min < b.y_max);
            for corner in room.corners().as_array() {
                prop_assert!((0..params.width).contains(&corner.x));
                prop_assert!((0..params.height).contains(&corner.y));
            }
        }
    }

    #[test]
    fn accepted_rooms_never_overlap(params in params_strategy()) {
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let map = DungeonMap::generate(&params, &mut rng).unwrap();
        let rooms: Vec<&Room> = map.rooms().collect();
        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                prop_assert!(!a.overlaps(b));
                prop_assert!(!b.overlaps(a));
            }
        }
    }

    #[test]
    fn generated_graph_is_one_component(params in params_strategy()) {
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let map = DungeonMap::generate(&params, &mut rng).unwrap();
        let components = map.graph().get_connected_components();
        prop_assert_eq!(components.len(), 1);
        prop_assert_eq!(components[0].len(), map.room_count());
    }

    #[test]
    fn corridors_are_four_connected(params in params_strategy()) {
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let map = DungeonMap::generate(&params, &mut rng).unwrap();
        for corridor in map.corridors() {
            let mut previous = corridor.start;
            for &cell in &corridor.path {
                let step = (cell.x - previous.x).abs() + (cell.y - previous.y).abs();
                prop_assert_eq!(step, 1);
                prop_assert!(map.is_open_tile(cell.x, cell.y));
                previous = cell;
            }
            prop_assert_eq!(previous, corridor.end);
        }
    }

    #[test]
    fn carved_path_has_manhattan_length(start in coordinate(), end in coordinate(), y_first in any::<bool>()) {
        let path = carve_path(start, end, y_first);
        let expected = (start.x - end.x).abs() + (start.y - end.y).abs();
        prop_assert_eq!(path.len(), expected as usize);

        let mut previous = start;
        for &cell in &path {
            let dx = (cell.x - previous.x).abs();
            let dy = (cell.y - previous.y).abs();
            prop_assert!((dx, dy) == (1, 0) || (dx, dy) == (0, 1));
            previous = cell;
        }
        if !path.is_empty() {
            prop_assert_eq!(path.last().copied(), Some(end));
        }
    }

    #[test]
    fn random_wiring_connects_any_vertex_count(count in 1..60_u32, seed in any::<u64>()) {
        let mut graph = Graph::new();
        for id in 0..count {
            graph.add_vertex(Node(id)).unwrap();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        graph.randomly_add_edges(&mut rng).unwrap();

        let components = graph.get_connected_components();
        prop_assert_eq!(components.len(), 1);
        prop_assert_eq!(components[0].len(), count as usize);
        for id in 0..count {
            let neighbors = graph.neighbors(id);
            prop_assert!(!neighbors.contains(&id));
            for neighbor in neighbors {
                prop_assert!(graph.neighbors(neighbor).contains(&id));
            }
        }
    }
}

#[derive(Debug)]
struct Node(VertexId);

impl Vertex for Node {
    fn id(&self) -> VertexId {
        self.0
    }
}

#[test]
fn components_agree_with_petgraph() {
    for seed in 0..25_u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut graph = Graph::new();
        for id in 0..12 {
            graph.add_vertex(Node(id)).unwrap();
        }
        let mut reference = petgraph::graph::UnGraph::<(), ()>::new_undirected();
        let nodes: Vec<_> = (0..12).map(|_| reference.add_node(())).collect();
        for _ in 0..6 {
            let a = rand::Rng::gen_range(&mut rng, 0..12_u32);
            let b = rand::Rng::gen_range(&mut rng, 0..12_u32);
            if a != b && !graph.has_edge(a, b) {
                graph.add_edge(a, b).unwrap();
                reference.add_edge(nodes[a as usize], nodes[b as usize], ());
            }
        }
        assert_eq!(
            graph.get_connected_components().len(),
            petgraph::algo::connected_components(&reference)
        );
    }
}
