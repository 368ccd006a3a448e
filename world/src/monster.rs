//! Poop monsters and their staircase pursuit.

use snake_battle_core::{CellCoord, CellPoint, MonsterId, MonsterSnapshot, PlayerId};

use crate::snake::Snake;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PoopMonster {
    pub(crate) id: MonsterId,
    pub(crate) position: CellPoint,
    pub(crate) target: Option<PlayerId>,
}

impl PoopMonster {
    /// Creates an idle monster on the provided cell.
    pub(crate) fn new(id: MonsterId, cell: CellCoord) -> Self {
        Self {
            id,
            position: cell.to_point(),
            target: None,
        }
    }

    /// Cell the monster touches.
    pub(crate) fn cell(&self) -> CellCoord {
        self.position.truncate()
    }

    /// Moves `speed` cells along the dominant axis toward the quarry's tail.
    ///
    /// When the quarry's head lies closer than `head_avoidance` on both axes
    /// the monster moves directly away from the head instead. Ties between the
    /// axes resolve vertically.
    pub(crate) fn advance(&mut self, quarry: Option<&Snake>, speed: f32, head_avoidance: f32) {
        let Some(quarry) = quarry else {
            return;
        };

        let tail = quarry.tail().to_point();
        let head = quarry.head().to_point();
        let mut dx = tail.column - self.position.column;
        let mut dy = tail.row - self.position.row;

        let head_dx = head.column - self.position.column;
        let head_dy = head.row - self.position.row;
        if head_dx.abs() < head_avoidance && head_dy.abs() < head_avoidance {
            dx = -head_dx;
            dy = -head_dy;
        }

        if dx.abs() > dy.abs() {
            self.position.column += if dx > 0.0 { speed } else { -speed };
        } else {
            self.position.row += if dy > 0.0 { speed } else { -speed };
        }
    }

    pub(crate) fn snapshot(&self) -> MonsterSnapshot {
        MonsterSnapshot {
            id: self.id,
            position: self.position,
            target: self.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::snake_with_body;
    use snake_battle_core::Direction;

    fn monster_at(column: f32, row: f32) -> PoopMonster {
        PoopMonster {
            id: MonsterId::new(0),
            position: CellPoint::new(column, row),
            target: Some(PlayerId::ONE),
        }
    }

    #[test]
    fn idle_monster_stays_put() {
        let mut monster = PoopMonster::new(MonsterId::new(3), CellCoord::new(4, 9));

        monster.advance(None, 0.5, 1.0);

        assert_eq!(monster.position, CellPoint::new(4.0, 9.0));
        assert_eq!(monster.target, None);
    }

    #[test]
    fn chases_the_tail_vertically() {
        let quarry = snake_with_body(
            PlayerId::ONE,
            &[(5, 3), (5, 4), (5, 5), (5, 6), (5, 7), (5, 8)],
            Direction::North,
        );
        let mut monster = monster_at(5.0, 5.0);

        monster.advance(Some(&quarry), 0.5, 1.0);

        assert_eq!(monster.position, CellPoint::new(5.0, 5.5));
    }

    #[test]
    fn moves_along_the_dominant_axis_only() {
        let quarry = snake_with_body(PlayerId::ONE, &[(20, 20), (12, 7)], Direction::East);
        let mut monster = monster_at(5.0, 5.0);

        monster.advance(Some(&quarry), 0.5, 1.0);
        assert_eq!(monster.position, CellPoint::new(5.5, 5.0));

        let quarry = snake_with_body(PlayerId::ONE, &[(20, 20), (6, 1)], Direction::East);
        monster.advance(Some(&quarry), 0.5, 1.0);
        assert_eq!(monster.position, CellPoint::new(5.5, 4.5));
    }

    #[test]
    fn flees_from_a_head_closer_than_one_cell() {
        let quarry = snake_with_body(PlayerId::ONE, &[(6, 5), (7, 5), (8, 5)], Direction::West);
        let mut monster = monster_at(5.5, 5.0);

        monster.advance(Some(&quarry), 0.5, 1.0);

        assert_eq!(monster.position, CellPoint::new(5.0, 5.0));
    }

    #[test]
    fn head_exactly_one_cell_away_is_still_pursued() {
        let quarry = snake_with_body(PlayerId::ONE, &[(6, 5), (7, 5), (8, 5)], Direction::West);
        let mut monster = monster_at(5.0, 5.0);

        monster.advance(Some(&quarry), 0.5, 1.0);

        assert_eq!(monster.position, CellPoint::new(5.5, 5.0));
    }

    #[test]
    fn reports_truncated_cell() {
        let monster = monster_at(7.5, 3.5);
        assert_eq!(monster.cell(), CellCoord::new(7, 3));
    }
}
