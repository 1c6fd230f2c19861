// src/error.rs
//! Ошибки генерации подземелья
//!
//! Отсутствие тайла по координате ошибкой не считается: `get_tile` просто возвращает `None`.

use crate::graph::VertexId;
use crate::room::Bounds;
use std::io;

/// Ошибки структуры графа комнат
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Вершина с таким идентификатором не зарегистрирована
    #[error("vertex {0} not found")]
    UnknownVertex(VertexId),

    /// Вершина с таким идентификатором уже есть в графе
    #[error("vertex {0} already registered")]
    DuplicateVertex(VertexId),

    /// Ребро из вершины в саму себя
    #[error("self-loop on vertex {0}")]
    SelfLoop(VertexId),

    /// Случайная выборка из пустого множества вершин
    #[error("cannot sample a vertex from an empty graph")]
    Empty,
}

/// Ошибки загрузки и проверки конфигурации
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Параметры прочитаны, но несовместимы друг с другом
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Ошибки верхнего уровня, которые возвращает `DungeonMap::generate`
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Бюджет попыток исчерпан, а конфигурация требует все комнаты
    #[error("requested {requested} rooms, placed {placed}")]
    PlacementExhausted { requested: usize, placed: usize },

    /// Не удалось найти допустимую точку для предмета
    #[error("no valid item location after {attempts} attempts")]
    ItemPlacementExhausted { attempts: u32 },

    /// Комната без внутренней области: в ней негде начать коридор
    #[error("room {id} has no interior: {bounds:?}")]
    InvalidRoom { id: VertexId, bounds: Bounds },

    /// На карте нет ни одной комнаты
    #[error("map has no rooms")]
    NoRooms,
}
