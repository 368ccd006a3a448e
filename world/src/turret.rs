//! Authoritative turret and bullet state.

use std::collections::BTreeMap;

use snake_battle_core::{
    BulletSnapshot, CellCoord, CellPoint, Grid, PlayerId, TurretId, TurretSnapshot,
};

/// Projectile owned by the turret that fired it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Bullet {
    pub(crate) position: CellPoint,
    /// Unit length.
    pub(crate) velocity: CellPoint,
}

impl Bullet {
    /// Cell the bullet currently hits.
    pub(crate) fn cell(&self) -> CellCoord {
        self.position.truncate()
    }
}

/// Stationary turret that periodically fires at both snake heads.
#[derive(Clone, Debug)]
pub(crate) struct Turret {
    pub(crate) id: TurretId,
    pub(crate) cell: CellCoord,
    pub(crate) owner: Option<PlayerId>,
    pub(crate) bullets: Vec<Bullet>,
    /// Ticks until the next volley; keeps decreasing while idle.
    pub(crate) shoot_timer: i32,
}

impl Turret {
    pub(crate) fn new(id: TurretId, cell: CellCoord, owner: Option<PlayerId>) -> Self {
        Self {
            id,
            cell,
            owner,
            bullets: Vec::new(),
            shoot_timer: 0,
        }
    }

    /// Counts the cooldown down and moves every bullet, dropping those that
    /// left the grid.
    pub(crate) fn update(&mut self, grid: Grid) {
        self.shoot_timer -= 1;
        self.bullets.retain_mut(|bullet| {
            bullet.position.column += bullet.velocity.column;
            bullet.position.row += bullet.velocity.row;
            grid.contains_point(bullet.position)
        });
    }

    /// Fires one bullet at each target once the cooldown has elapsed.
    ///
    /// Targets sitting on the turret itself are skipped. The cooldown is
    /// re-armed whenever the turret was ready, even if nothing was fired.
    /// Returns the number of bullets appended, or `None` when not ready.
    pub(crate) fn shoot(&mut self, targets: &[CellCoord], cooldown: i32) -> Option<u32> {
        if self.shoot_timer > 0 {
            return None;
        }

        let origin = self.cell.to_point();
        let mut fired = 0;
        for target in targets {
            let displacement = CellPoint::new(
                (target.column() - self.cell.column()) as f32,
                (target.row() - self.cell.row()) as f32,
            );
            let length = displacement.length();
            if length <= 0.0 {
                continue;
            }
            self.bullets.push(Bullet {
                position: origin,
                velocity: CellPoint::new(displacement.column / length, displacement.row / length),
            });
            fired += 1;
        }
        self.shoot_timer = cooldown;
        Some(fired)
    }

    pub(crate) fn snapshot(&self) -> TurretSnapshot {
        TurretSnapshot {
            id: self.id,
            cell: self.cell,
            owner: self.owner,
            shoot_timer: self.shoot_timer,
            bullets: self
                .bullets
                .iter()
                .map(|bullet| BulletSnapshot {
                    position: bullet.position,
                    velocity: bullet.velocity,
                })
                .collect(),
        }
    }
}

/// Registry that stores turrets and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TurretRegistry {
    entries: BTreeMap<TurretId, Turret>,
    next_turret_id: TurretId,
}

impl TurretRegistry {
    /// Creates an empty turret registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_turret_id: TurretId::new(0),
        }
    }

    /// Removes every turret and restarts identifier allocation.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.next_turret_id = TurretId::new(0);
    }

    /// Places a new turret and returns its identifier.
    pub(crate) fn place(&mut self, cell: CellCoord, owner: Option<PlayerId>) -> TurretId {
        let id = self.next_turret_id;
        self.next_turret_id = TurretId::new(id.get() + 1);
        let _ = self.entries.insert(id, Turret::new(id, cell, owner));
        id
    }

    pub(crate) fn contains(&self, id: TurretId) -> bool {
        self.entries.contains_key(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Turret> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Turret> {
        self.entries.values_mut()
    }

    /// Turrets whose bullets may hurt the snake owning `exempt`.
    pub(crate) fn hostile_to(&self, exempt: Option<TurretId>) -> impl Iterator<Item = &Turret> {
        self.entries
            .values()
            .filter(move |turret| Some(turret.id) != exempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: Grid = Grid::new(40);

    fn assert_close(actual: CellPoint, expected: (f32, f32)) {
        assert!(
            (actual.column - expected.0).abs() < 1e-6 && (actual.row - expected.1).abs() < 1e-6,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn ready_turret_fires_one_unit_bullet_per_head() {
        let mut turret = Turret::new(TurretId::new(0), CellCoord::new(10, 10), None);

        let fired = turret.shoot(&[CellCoord::new(15, 10), CellCoord::new(5, 10)], 30);

        assert_eq!(fired, Some(2));
        assert_eq!(turret.bullets.len(), 2);
        assert_close(turret.bullets[0].velocity, (1.0, 0.0));
        assert_close(turret.bullets[1].velocity, (-1.0, 0.0));
        assert_close(turret.bullets[0].position, (10.0, 10.0));
        assert_eq!(turret.shoot_timer, 30);
    }

    #[test]
    fn diagonal_targets_get_normalized_velocity() {
        let mut turret = Turret::new(TurretId::new(0), CellCoord::new(20, 20), None);

        let _ = turret.shoot(&[CellCoord::new(23, 24), CellCoord::new(20, 2)], 30);

        assert_close(turret.bullets[0].velocity, (0.6, 0.8));
        assert_close(turret.bullets[1].velocity, (0.0, -1.0));
        for bullet in &turret.bullets {
            assert!((bullet.velocity.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn coincident_target_is_skipped_but_cooldown_rearms() {
        let mut turret = Turret::new(TurretId::new(0), CellCoord::new(10, 10), None);

        let fired = turret.shoot(&[CellCoord::new(10, 10), CellCoord::new(10, 10)], 30);

        assert_eq!(fired, Some(0));
        assert!(turret.bullets.is_empty());
        assert_eq!(turret.shoot_timer, 30);
    }

    #[test]
    fn cooling_turret_holds_fire() {
        let mut turret = Turret::new(TurretId::new(0), CellCoord::new(10, 10), None);
        turret.shoot_timer = 1;

        assert_eq!(turret.shoot(&[CellCoord::new(1, 1)], 30), None);
        assert!(turret.bullets.is_empty());
    }

    #[test]
    fn update_moves_bullets_and_drops_escapees() {
        let mut turret = Turret::new(TurretId::new(0), CellCoord::new(38, 20), None);
        let _ = turret.shoot(&[CellCoord::new(39, 20), CellCoord::new(30, 20)], 30);

        turret.update(GRID);
        assert_eq!(turret.bullets.len(), 2);
        assert_close(turret.bullets[0].position, (39.0, 20.0));

        turret.update(GRID);
        assert_eq!(turret.bullets.len(), 1);
        assert_close(turret.bullets[0].position, (36.0, 20.0));
        assert_eq!(turret.shoot_timer, 28);
    }

    #[test]
    fn idle_timer_keeps_falling() {
        let mut turret = Turret::new(TurretId::new(0), CellCoord::new(10, 10), None);
        for _ in 0..5 {
            turret.update(GRID);
        }
        assert_eq!(turret.shoot_timer, -5);
    }

    #[test]
    fn registry_allocates_sequential_ids_and_exempts_owner() {
        let mut registry = TurretRegistry::new();
        let neutral = registry.place(CellCoord::new(20, 20), None);
        let personal = registry.place(CellCoord::new(3, 3), Some(PlayerId::ONE));

        assert_eq!((neutral.get(), personal.get()), (0, 1));
        assert!(registry.contains(personal));
        let hostile: Vec<_> = registry.hostile_to(Some(personal)).map(|t| t.id).collect();
        assert_eq!(hostile, vec![neutral]);
        assert_eq!(registry.hostile_to(None).count(), 2);

        registry.clear();
        assert_eq!(registry.iter().count(), 0);
        assert_eq!(registry.place(CellCoord::new(1, 1), None).get(), 0);
    }
}
