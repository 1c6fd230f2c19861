// src/dungeon/placement.rs
//! Размещение комнат без пересечений
//!
//! Кандидат перегенерируется, пока пересекается хотя бы с одной принятой комнатой.
//! Когда бюджет попыток исчерпан, поведение задаёт `ExhaustionPolicy`:
//! `Abort` прекращает размещение всех оставшихся комнат, `Skip` пропускает только текущую.

use crate::config::{DungeonParams, ExhaustionPolicy, PlacementSettings};
use crate::graph::VertexId;
use crate::room::Room;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

/// Источник комнат-кандидатов
pub trait RoomSource {
    /// Новая комната с данным идентификатором
    fn spawn(&mut self, id: VertexId) -> Room;

    /// Новая геометрия для уже созданной комнаты
    fn reroll(&mut self, room: &mut Room);
}

/// Комнаты со случайной геометрией по параметрам генерации
pub struct RandomRooms<'a, R: ?Sized> {
    params: &'a DungeonParams,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> RandomRooms<'a, R> {
    pub fn new(params: &'a DungeonParams, rng: &'a mut R) -> Self {
        Self { params, rng }
    }
}

impl<R: Rng + ?Sized> RoomSource for RandomRooms<'_, R> {
    fn spawn(&mut self, id: VertexId) -> Room {
        Room::new(id, self.params, self.rng)
    }

    fn reroll(&mut self, room: &mut Room) {
        room.generate(self.params, self.rng);
    }
}

/// Сколько комнат запрошено и сколько реально размещено
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlacementReport {
    pub requested: usize,
    pub placed: usize,
    /// Комната, на которой размещение было прервано (политика `Abort`)
    pub exhausted_at: Option<VertexId>,
    /// Комнаты, пропущенные по политике `Skip`
    pub skipped: Vec<VertexId>,
}

impl PlacementReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.placed == self.requested
    }
}

/// Размещает до `requested` комнат с идентификаторами `0..requested`
pub fn place_rooms<S: RoomSource + ?Sized>(
    requested: usize,
    settings: &PlacementSettings,
    source: &mut S,
) -> (Vec<Room>, PlacementReport) {
    let mut rooms: Vec<Room> = Vec::with_capacity(requested);
    let mut report = PlacementReport {
        requested,
        ..PlacementReport::default()
    };

    for i in 0..requested {
        let id = i as VertexId;
        let mut room = source.spawn(id);
        let mut attempts = 0;
        let mut accepted = true;

        while !is_allowed_location(&room, &rooms) {
            if attempts >= settings.max_attempts {
                accepted = false;
                break;
            }
            source.reroll(&mut room);
            attempts += 1;
        }

        if accepted {
            debug!(room = id, attempts, bounds = ?room.bounds(), "комната размещена");
            rooms.push(room);
            continue;
        }

        warn!(room = id, attempts, "бюджет попыток размещения исчерпан");
        match settings.on_exhausted {
            ExhaustionPolicy::Abort => {
                report.exhausted_at = Some(id);
                break;
            }
            ExhaustionPolicy::Skip => report.skipped.push(id),
        }
    }

    report.placed = rooms.len();
    (rooms, report)
}

/// Кандидат допустим, если не пересекается ни с одной комнатой ни в одну сторону
#[must_use]
pub fn is_allowed_location(candidate: &Room, accepted: &[Room]) -> bool {
    !accepted
        .iter()
        .any(|room| candidate.overlaps(room) || room.overlaps(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Coordinate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Комнаты в заранее заданных местах; `stuck` всегда ставится поверх комнаты 0
    struct Scripted {
        stuck: Option<VertexId>,
        spawned: Vec<VertexId>,
        rerolls: u32,
    }

    impl Scripted {
        fn new(stuck: Option<VertexId>) -> Self {
            Self {
                stuck,
                spawned: Vec::new(),
                rerolls: 0,
            }
        }
    }

    impl RoomSource for Scripted {
        fn spawn(&mut self, id: VertexId) -> Room {
            self.spawned.push(id);
            if Some(id) == self.stuck {
                Room::from_origin(id, Coordinate::new(0, 0), 5, 3)
            } else {
                Room::from_origin(id, Coordinate::new(id as i32 * 10, 0), 5, 3)
            }
        }

        fn reroll(&mut self, _room: &mut Room) {
            self.rerolls += 1;
        }
    }

    #[test]
    fn exhausted_room_aborts_the_rest() {
        let settings = PlacementSettings::default();
        let mut source = Scripted::new(Some(5));

        let (rooms, report) = place_rooms(9, &settings, &mut source);

        assert_eq!(rooms.len(), 5);
        assert_eq!(report.placed, 5);
        assert_eq!(report.requested, 9);
        assert_eq!(report.exhausted_at, Some(5));
        assert!(!report.is_complete());
        assert_eq!(source.spawned, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(source.rerolls, 50);
    }

    #[test]
    fn skip_policy_continues_after_failure() {
        let settings = PlacementSettings {
            on_exhausted: ExhaustionPolicy::Skip,
            ..PlacementSettings::default()
        };
        let mut source = Scripted::new(Some(2));

        let (rooms, report) = place_rooms(5, &settings, &mut source);

        let ids: Vec<VertexId> = rooms.iter().map(Room::id).collect();
        assert_eq!(ids, vec![0, 1, 3, 4]);
        assert_eq!(report.skipped, vec![2]);
        assert_eq!(report.exhausted_at, None);
    }

    #[test]
    fn non_overlapping_rooms_need_no_rerolls() {
        let mut source = Scripted::new(None);
        let (rooms, report) = place_rooms(3, &PlacementSettings::default(), &mut source);
        assert_eq!(rooms.len(), 3);
        assert!(report.is_complete());
        assert_eq!(source.rerolls, 0);
    }

    #[test]
    fn random_placement_keeps_rooms_apart() {
        let params = DungeonParams::default();
        for seed in 0..30 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut source = RandomRooms::new(&params, &mut rng);
            let (rooms, report) = place_rooms(9, &params.placement, &mut source);
            assert_eq!(rooms.len(), report.placed);
            assert!(!rooms.is_empty());
            for (i, a) in rooms.iter().enumerate() {
                for b in &rooms[i + 1..] {
                    assert!(!a.overlaps(b) && !b.overlaps(a));
                }
            }
        }
    }

    #[test]
    fn corner_test_misses_crossing_rooms() {
        // Крест из двух комнат: ни один угол не лежит в чужом прямоугольнике.
        // При размерах по умолчанию такая пара невозможна.
        let wide = Room::from_origin(0, Coordinate::new(0, 4), 12, 2);
        let tall = Room::from_origin(1, Coordinate::new(4, 0), 2, 12);
        assert!(!tall.overlaps(&wide));
        assert!(!wide.overlaps(&tall));
        assert!(is_allowed_location(&tall, std::slice::from_ref(&wide)));
    }

    #[test]
    fn allowed_location_checks_both_directions() {
        let wide = Room::from_origin(0, Coordinate::new(0, 4), 12, 2);
        let inner = Room::from_origin(2, Coordinate::new(2, 5), 3, 2);
        assert!(!wide.overlaps(&inner));
        assert!(inner.overlaps(&wide));
        assert!(!is_allowed_location(&wide, std::slice::from_ref(&inner)));
    }
}
