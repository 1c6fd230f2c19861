// src/config.rs
//! Конфигурация генерации подземелья
//!
//! Этот модуль определяет все параметры, управляющие процедурной генерацией карты:
//! - Размер сетки
//! - Диапазоны размеров комнат и отступ от края карты
//! - Количество комнат, бюджет попыток размещения и политику при его исчерпании
//! - Порядок осей при прокладке коридоров
//!
//! Все структуры поддерживают сериализацию в TOML/JSON для удобной настройки через конфигурационные файлы.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Что делать, когда для одной комнаты исчерпан бюджет попыток
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum ExhaustionPolicy {
    /// Прекратить размещение всех оставшихся комнат (исходное поведение)
    #[default]
    Abort,
    /// Пропустить только эту комнату и продолжить со следующей
    Skip,
}

/// Порядок движения по осям при прокладке коридора
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum AxisOrder {
    /// Сначала полностью по X, затем по Y (исходное поведение)
    #[default]
    XThenY,
    /// Порядок выбирается подброшенной монеткой для каждого коридора
    Random,
}

/// Настройки геометрии комнат
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomSettings {
    /// Минимальная ширина прямоугольника (разница `x_max - x_min`)
    #[serde(default = "default_min_width")]
    pub min_width: i32,

    #[serde(default = "default_max_width")]
    pub max_width: i32,

    #[serde(default = "default_min_height")]
    pub min_height: i32,

    #[serde(default = "default_max_height")]
    pub max_height: i32,

    /// Левый верхний угол выбирается в `[0, W - edge_margin] × [0, H - edge_margin]`.
    ///
    /// Отступ не зависит от фактического размера комнаты, поэтому он обязан
    /// быть больше максимальной ширины и высоты.
    #[serde(default = "default_edge_margin")]
    pub edge_margin: i32,
}

fn default_min_width() -> i32 {
    5
}
fn default_max_width() -> i32 {
    8
}
fn default_min_height() -> i32 {
    3
}
fn default_max_height() -> i32 {
    5
}
fn default_edge_margin() -> i32 {
    10
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            min_width: 5,
            max_width: 8,
            min_height: 3,
            max_height: 5,
            edge_margin: 10,
        }
    }
}

/// Настройки размещения комнат и предметов
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlacementSettings {
    /// Минимальное запрошенное количество комнат
    #[serde(default = "default_min_rooms")]
    pub min_rooms: usize,

    /// Максимальное запрошенное количество комнат (включительно)
    #[serde(default = "default_max_rooms")]
    pub max_rooms: usize,

    /// Сколько раз можно перегенерировать одну комнату при пересечении
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default)]
    pub on_exhausted: ExhaustionPolicy,

    /// Считать нехватку комнат ошибкой вместо молчаливого усечения
    #[serde(default)]
    pub require_all: bool,

    /// Бюджет попыток для поиска точки под предмет
    #[serde(default = "default_item_attempts")]
    pub item_attempts: u32,
}

fn default_min_rooms() -> usize {
    5
}
fn default_max_rooms() -> usize {
    9
}
fn default_max_attempts() -> u32 {
    50
}
fn default_item_attempts() -> u32 {
    100
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            min_rooms: 5,
            max_rooms: 9,
            max_attempts: 50,
            on_exhausted: ExhaustionPolicy::Abort,
            require_all: false,
            item_attempts: 100,
        }
    }
}

/// Настройки коридоров
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CorridorSettings {
    #[serde(default)]
    pub axis_order: AxisOrder,
}

/// Основные параметры генерации подземелья
///
/// Полная конфигурация для генерации одной карты. Поддерживает загрузку из TOML-файлов.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DungeonParams {
    /// Сид генератора случайных чисел (детерминированная генерация)
    #[serde(default)]
    pub seed: u64,

    /// Ширина сетки в тайлах (по умолчанию 20)
    #[serde(default = "default_width")]
    pub width: i32,

    /// Высота сетки в тайлах (по умолчанию 20)
    #[serde(default = "default_height")]
    pub height: i32,

    #[serde(default)]
    pub rooms: RoomSettings,

    #[serde(default)]
    pub placement: PlacementSettings,

    #[serde(default)]
    pub corridors: CorridorSettings,
}

fn default_width() -> i32 {
    20
}
fn default_height() -> i32 {
    20
}

impl Default for DungeonParams {
    fn default() -> Self {
        Self {
            seed: 0,
            width: 20,
            height: 20,
            rooms: RoomSettings::default(),
            placement: PlacementSettings::default(),
            corridors: CorridorSettings::default(),
        }
    }
}

impl DungeonParams {
    /// Загружает параметры из TOML-файла и проверяет их
    ///
    /// # Пример
    /// ```toml
    /// # dungeon.toml
    /// seed = 42
    /// width = 30
    ///
    /// [placement]
    /// on_exhausted = "Skip"
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let params: Self = toml::from_str(contents)?;
        params.validate()?;
        Ok(params)
    }

    /// Проверяет согласованность параметров
    ///
    /// Гарантирует, что любая комната, построенная по этим параметрам,
    /// целиком помещается в сетку и имеет хотя бы одну внутреннюю клетку.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rooms = &self.rooms;
        let placement = &self.placement;

        if self.width <= 0 || self.height <= 0 {
            return Err(invalid(format!(
                "map size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width < rooms.edge_margin || self.height < rooms.edge_margin {
            return Err(invalid(format!(
                "map {}x{} is smaller than edge margin {}",
                self.width, self.height, rooms.edge_margin
            )));
        }
        if rooms.min_width < 2 || rooms.min_height < 2 {
            return Err(invalid("rooms must be at least 2 tiles wide and tall".into()));
        }
        if rooms.min_width > rooms.max_width || rooms.min_height > rooms.max_height {
            return Err(invalid("room size range is empty".into()));
        }
        if rooms.max_width >= rooms.edge_margin || rooms.max_height >= rooms.edge_margin {
            return Err(invalid(format!(
                "edge margin {} must exceed max room size {}x{}",
                rooms.edge_margin, rooms.max_width, rooms.max_height
            )));
        }
        if placement.min_rooms == 0 || placement.min_rooms > placement.max_rooms {
            return Err(invalid(format!(
                "room count range {}..={} is invalid",
                placement.min_rooms, placement.max_rooms
            )));
        }
        if placement.max_attempts == 0 || placement.item_attempts == 0 {
            return Err(invalid("attempt budgets must be positive".into()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}
