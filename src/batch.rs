// src/batch.rs
//! Пакетная генерация: одна карта на каждый сид
//!
//! С фичей `parallel` карты строятся параллельно через `rayon`, порядок результатов
//! всегда совпадает с порядком сидов.

use crate::config::DungeonParams;
use crate::dungeon::DungeonMap;
use crate::error::GenerationError;
use crate::generate_dungeon;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

fn generate_with_seed(params: &DungeonParams, seed: u64) -> Result<DungeonMap, GenerationError> {
    let params = DungeonParams {
        seed,
        ..params.clone()
    };
    generate_dungeon(&params)
}

#[cfg(feature = "parallel")]
#[must_use]
pub fn generate_batch(params: &DungeonParams, seeds: &[u64]) -> Vec<Result<DungeonMap, GenerationError>> {
    seeds
        .par_iter()
        .map(|&seed| generate_with_seed(params, seed))
        .collect()
}

#[cfg(not(feature = "parallel"))]
#[must_use]
pub fn generate_batch(params: &DungeonParams, seeds: &[u64]) -> Vec<Result<DungeonMap, GenerationError>> {
    seeds
        .iter()
        .map(|&seed| generate_with_seed(params, seed))
        .collect()
}
