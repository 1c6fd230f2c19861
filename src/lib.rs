pub mod batch;
pub mod config;
pub mod dungeon;
pub mod error;
pub mod graph;
pub mod room;
pub mod tile;

pub use batch::generate_batch;
pub use config::{AxisOrder, DungeonParams, ExhaustionPolicy};
pub use dungeon::DungeonMap;
pub use error::{ConfigError, GenerationError, GraphError};
pub use tile::{Coordinate, Direction, Tile};

use rand::SeedableRng;

/// Генерирует карту с генератором `ChaCha8`, засеянным `params.seed`
pub fn generate_dungeon(params: &DungeonParams) -> Result<DungeonMap, GenerationError> {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(params.seed);
    DungeonMap::generate(params, &mut rng)
}
