// src/dungeon/items.rs
use super::DungeonMap;
use crate::error::GenerationError;
use crate::tile::Coordinate;
use rand::Rng;

impl DungeonMap {
    /// Выбирает место для предмета внутри случайной комнаты.
    ///
    /// Комната выбирается один раз, затем точки внутри неё перебираются,
    /// пока `is_valid` не примет одну из них. Карта не изменяется.
    pub fn place_item<R, F>(&self, rng: &mut R, mut is_valid: F) -> Result<Coordinate, GenerationError>
    where
        R: Rng + ?Sized,
        F: FnMut(Coordinate) -> bool,
    {
        let room = self.graph.random_vertex(rng)?;
        let attempts = self.params.placement.item_attempts;
        for _ in 0..attempts {
            let point = room.random_interior_point(rng);
            if is_valid(point) {
                tracing::debug!(room = room.id(), ?point, "место для предмета найдено");
                return Ok(point);
            }
        }
        Err(GenerationError::ItemPlacementExhausted { attempts })
    }
}
