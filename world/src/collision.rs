//! Lethality checks across snakes, bullets, poop and monsters.

use snake_battle_core::GameOverCause;

use crate::{monster::PoopMonster, snake::Snake, turret::Turret};

/// Reports the first lethal condition at the snake's head, if any.
///
/// `hostile_turrets` must already exclude the snake's own turret. Poop is
/// harmless while its *owner* has the poop eater buff, whoever steps on it.
pub(crate) fn snake_collision<'a, I>(
    snake: &Snake,
    other: &Snake,
    hostile_turrets: I,
) -> Option<GameOverCause>
where
    I: IntoIterator<Item = &'a Turret>,
{
    if let Some(cause) = body_collision(snake, other) {
        return Some(cause);
    }
    if snake.god_mode {
        return None;
    }

    let head = snake.head();
    if hostile_turrets
        .into_iter()
        .flat_map(|turret| turret.bullets.iter())
        .any(|bullet| bullet.cell() == head)
    {
        return Some(GameOverCause::Bullet);
    }
    let stepped_in_poop = [snake, other].into_iter().any(|owner| {
        owner.poop_eater == 0 && owner.poop_spots.iter().any(|spot| spot.cell == head)
    });
    if stepped_in_poop {
        return Some(GameOverCause::Poop);
    }
    None
}

/// Reports a head that ran into its own body or the opponent's body.
pub(crate) fn body_collision(snake: &Snake, other: &Snake) -> Option<GameOverCause> {
    if snake.god_mode {
        return None;
    }

    let head = snake.head();
    if snake.body.iter().skip(1).any(|cell| *cell == head) {
        return Some(GameOverCause::SelfCollision);
    }
    if other.occupies(head) {
        return Some(GameOverCause::OpponentCollision);
    }
    None
}

/// Reports whether any monster touches any cell of any snake.
pub(crate) fn monster_contact(monsters: &[PoopMonster], snakes: &[Snake]) -> bool {
    monsters.iter().any(|monster| {
        let cell = monster.cell();
        snakes.iter().any(|snake| snake.occupies(cell))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        snake::{snake_with_body, PoopSpot},
        turret::{Bullet, Turret},
    };
    use snake_battle_core::{CellCoord, CellPoint, Direction, MonsterId, PlayerId, TurretId};

    const NO_TURRETS: [&Turret; 0] = [];

    fn lone_rival() -> Snake {
        snake_with_body(PlayerId::TWO, &[(30, 30)], Direction::West)
    }

    fn turret_with_bullet_at(column: f32, row: f32) -> Turret {
        let mut turret = Turret::new(TurretId::new(0), CellCoord::new(20, 20), None);
        turret.bullets.push(Bullet {
            position: CellPoint::new(column, row),
            velocity: CellPoint::new(1.0, 0.0),
        });
        turret
    }

    #[test]
    fn self_intersection_is_lethal() {
        let snake = snake_with_body(
            PlayerId::ONE,
            &[(10, 10), (10, 11), (10, 12), (10, 10)],
            Direction::North,
        );

        assert_eq!(
            snake_collision(&snake, &lone_rival(), NO_TURRETS),
            Some(GameOverCause::SelfCollision)
        );
    }

    #[test]
    fn head_inside_opponent_is_lethal() {
        let snake = snake_with_body(PlayerId::ONE, &[(30, 30), (29, 30)], Direction::East);
        assert_eq!(
            snake_collision(&snake, &lone_rival(), NO_TURRETS),
            Some(GameOverCause::OpponentCollision)
        );
    }

    #[test]
    fn bullet_hits_truncated_cell() {
        let snake = snake_with_body(PlayerId::ONE, &[(12, 4)], Direction::East);
        let turret = turret_with_bullet_at(12.7, 4.2);

        assert_eq!(
            snake_collision(&snake, &lone_rival(), [&turret]),
            Some(GameOverCause::Bullet)
        );
    }

    #[test]
    fn exempted_turret_bullets_are_harmless() {
        let snake = snake_with_body(PlayerId::ONE, &[(12, 4)], Direction::East);
        let turret = turret_with_bullet_at(12.0, 4.0);

        let hostile = [&turret]
            .into_iter()
            .filter(|candidate| Some(candidate.id) != Some(TurretId::new(0)));
        assert_eq!(snake_collision(&snake, &lone_rival(), hostile), None);
    }

    #[test]
    fn poop_protection_follows_the_owner_not_the_eater() {
        let mut snake = snake_with_body(PlayerId::ONE, &[(8, 8)], Direction::East);
        let mut rival = lone_rival();
        rival.poop_spots.push(PoopSpot {
            cell: CellCoord::new(8, 8),
            stink_timer: 0,
        });

        snake.poop_eater = 50;
        assert_eq!(
            snake_collision(&snake, &rival, NO_TURRETS),
            Some(GameOverCause::Poop)
        );

        snake.poop_eater = 0;
        rival.poop_eater = 50;
        assert_eq!(snake_collision(&snake, &rival, NO_TURRETS), None);
    }

    #[test]
    fn own_poop_is_lethal_without_buff() {
        let mut snake = snake_with_body(PlayerId::ONE, &[(8, 8)], Direction::East);
        snake.poop_spots.push(PoopSpot {
            cell: CellCoord::new(8, 8),
            stink_timer: 20,
        });

        assert_eq!(
            snake_collision(&snake, &lone_rival(), NO_TURRETS),
            Some(GameOverCause::Poop)
        );
    }

    #[test]
    fn god_mode_suppresses_every_cause() {
        let mut snake = snake_with_body(
            PlayerId::ONE,
            &[(30, 30), (30, 31), (30, 30)],
            Direction::North,
        );
        snake.god_mode = true;
        snake.poop_spots.push(PoopSpot {
            cell: CellCoord::new(30, 30),
            stink_timer: 0,
        });
        let turret = turret_with_bullet_at(30.0, 30.0);

        assert_eq!(snake_collision(&snake, &lone_rival(), [&turret]), None);
    }

    #[test]
    fn body_check_ignores_bullets_and_poop() {
        let mut snake = snake_with_body(PlayerId::ONE, &[(12, 4)], Direction::East);
        snake.poop_spots.push(PoopSpot {
            cell: CellCoord::new(12, 4),
            stink_timer: 0,
        });
        assert_eq!(body_collision(&snake, &lone_rival()), None);

        let rival = snake_with_body(PlayerId::TWO, &[(13, 4), (12, 4)], Direction::East);
        assert_eq!(
            body_collision(&snake, &rival),
            Some(GameOverCause::OpponentCollision)
        );

        snake.god_mode = true;
        assert_eq!(body_collision(&snake, &rival), None);
    }

    #[test]
    fn monster_touching_any_segment_counts() {
        let snakes = [
            snake_with_body(PlayerId::ONE, &[(3, 3), (3, 4), (3, 5)], Direction::North),
            lone_rival(),
        ];
        let mut monster = PoopMonster::new(MonsterId::new(0), CellCoord::new(10, 10));
        assert!(!monster_contact(&[monster], &snakes));

        monster.position = CellPoint::new(3.5, 5.0);
        assert!(monster_contact(&[monster], &snakes));
    }
}
