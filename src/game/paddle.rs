//=========================================================================
// Paddle
//=========================================================================
//
// Key-driven vertical mover.
//
// Per update:
//   held keys → displacement → goal bars hit? revert → clamp to arena
//   → vertical speed = realized displacement / dt
//
// The vertical speed is what a ball picks up on contact.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::IVec2;
use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::geometry::overlaps_between;
use crate::core::input::KeyCode;
use crate::core::object::{GameObject, ObjectBase, ObjectKind, SceneEffect, World};
use crate::core::render::Texture;

//=== PaddleKeys ==========================================================

/// Up/down key binding of one paddle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddleKeys {
    pub up: KeyCode,
    pub down: KeyCode,
}

impl PaddleKeys {
    pub const fn new(up: KeyCode, down: KeyCode) -> Self {
        Self { up, down }
    }
}

//=== Paddle ==============================================================

#[derive(Debug, Clone)]
pub struct Paddle {
    base: ObjectBase,
    keys: PaddleKeys,
    speed: f32,
    vertical_speed: f32,
}

impl Paddle {
    /// Default travel speed in pixels per second.
    pub const SPEED: f32 = 300.0;

    pub fn new(texture: Texture, start: IVec2, arena: (i32, i32), speed: f32, keys: PaddleKeys) -> Self {
        Self {
            base: ObjectBase::new(Some(texture), start, arena),
            keys,
            speed,
            vertical_speed: 0.0,
        }
    }

    pub fn keys(&self) -> PaddleKeys {
        self.keys
    }

    /// Realized vertical speed of the last update, in pixels per second.
    pub fn vertical_speed(&self) -> f32 {
        self.vertical_speed
    }

    /// Displacement requested by the held keys. Down wins when both are held.
    fn requested_movement(&self, dt: f32) -> f32 {
        let mut movement = 0.0;
        if self.base.keys.is_down(self.keys.up) {
            movement = -self.speed * dt;
        }
        if self.base.keys.is_down(self.keys.down) {
            movement = self.speed * dt;
        }
        movement
    }
}

impl GameObject for Paddle {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Paddle
    }

    fn reset(&mut self) {
        self.base.reset();
        self.vertical_speed = 0.0;
    }

    fn update(&mut self, dt: f32, world: &World<'_>) -> Vec<SceneEffect> {
        let previous_y = self.base.position.y;
        let movement = self.requested_movement(dt);
        self.base.position.y += movement;

        let areas = self.collision_areas();
        if world
            .of_kind(ObjectKind::Goal)
            .any(|goal| overlaps_between(&areas, &goal.areas))
        {
            trace!("Paddle at x={} blocked by goal bar", self.base.position.x);
            self.base.position.y -= movement;
        }

        let lowest = (self.base.max_y() - self.base.height) as f32;
        if self.base.position.y > lowest {
            self.base.position.y = lowest;
        }
        if self.base.position.y < 0.0 {
            self.base.position.y = 0.0;
        }

        self.vertical_speed = if dt > 0.0 {
            (self.base.position.y - previous_y) / dt
        } else {
            0.0
        };

        Vec::new()
    }

    fn deflects_by_velocity(&self) -> Option<f32> {
        Some(self.vertical_speed)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Rect;
    use crate::core::object::{Collider, ObjectId};
    use crate::core::render::TextureId;

    const ARENA: (i32, i32) = (1080, 810);

    fn paddle_at(x: i32, y: i32) -> Paddle {
        let texture = Texture { id: TextureId(1), width: 32, height: 128 };
        Paddle::new(
            texture,
            IVec2::new(x, y),
            ARENA,
            Paddle::SPEED,
            PaddleKeys::new(KeyCode::KeyQ, KeyCode::KeyA),
        )
    }

    /// Goal at `x` as seen by other objects: two 64-wide bars around a
    /// 320-pixel hole.
    fn goal_collider(id: usize, x: i32) -> Collider {
        let bar = (ARENA.1 - 320) / 2;
        Collider {
            id: ObjectId(id),
            kind: ObjectKind::Goal,
            can_collide: true,
            areas: vec![Rect::new(x, 0, 64, bar), Rect::new(x, (ARENA.1 + 320) / 2, 64, bar)],
            deflection: None,
        }
    }

    fn step(paddle: &mut Paddle, dt: f32, others: &[Collider]) {
        let mut colliders = vec![paddle.collider(ObjectId(0))];
        colliders.extend_from_slice(others);
        let world = World::new(ObjectId(0), &colliders);
        let effects = paddle.update(dt, &world);
        assert!(effects.is_empty(), "Paddles never emit scene effects");
    }

    //=====================================================================
    // Movement
    //=====================================================================

    #[test]
    fn up_key_moves_up_at_speed() {
        let mut paddle = paddle_at(25, 341);
        paddle.key_down(KeyCode::KeyQ);
        step(&mut paddle, 0.1, &[]);
        assert_eq!(paddle.position().y, 311.0);
        assert_eq!(paddle.vertical_speed(), -300.0);
    }

    #[test]
    fn idle_paddle_stays_put() {
        let mut paddle = paddle_at(25, 341);
        step(&mut paddle, 0.1, &[]);
        assert_eq!(paddle.position().y, 341.0);
        assert_eq!(paddle.vertical_speed(), 0.0);
    }

    #[test]
    fn both_keys_held_last_checked_wins() {
        let mut paddle = paddle_at(25, 341);
        paddle.key_down(KeyCode::KeyQ);
        paddle.key_down(KeyCode::KeyA);
        step(&mut paddle, 0.1, &[]);
        assert_eq!(paddle.position().y, 371.0, "Down key takes effect, not the sum");
    }

    #[test]
    fn releasing_key_stops_motion() {
        let mut paddle = paddle_at(25, 341);
        paddle.key_down(KeyCode::KeyA);
        step(&mut paddle, 0.1, &[]);
        paddle.key_up(KeyCode::KeyA);
        step(&mut paddle, 0.1, &[]);
        assert_eq!(paddle.position().y, 371.0);
    }

    #[test]
    fn foreign_keys_are_ignored() {
        let mut paddle = paddle_at(25, 341);
        paddle.key_down(KeyCode::KeyO);
        step(&mut paddle, 0.1, &[]);
        assert_eq!(paddle.position().y, 341.0);
    }

    //=====================================================================
    // Clamping
    //=====================================================================

    #[test]
    fn clamps_at_top_edge() {
        let mut paddle = paddle_at(25, 0);
        paddle.key_down(KeyCode::KeyQ);
        step(&mut paddle, 0.1, &[]);
        assert_eq!(paddle.position().y, 0.0, "Paddle must never go above the arena");
        assert_eq!(paddle.vertical_speed(), 0.0);
    }

    #[test]
    fn clamps_at_bottom_edge() {
        let lowest = ARENA.1 - 128;
        let mut paddle = paddle_at(25, lowest);
        paddle.key_down(KeyCode::KeyA);
        step(&mut paddle, 0.1, &[]);
        assert_eq!(paddle.position().y, lowest as f32, "Paddle must never leave the arena");
    }

    #[test]
    fn overshoot_is_clamped_not_reverted() {
        let mut paddle = paddle_at(25, 10);
        paddle.key_down(KeyCode::KeyQ);
        step(&mut paddle, 0.1, &[]);
        assert_eq!(paddle.position().y, 0.0);
        assert_eq!(paddle.vertical_speed(), -100.0);
    }

    #[test]
    fn zero_dt_records_no_speed() {
        let mut paddle = paddle_at(25, 341);
        paddle.key_down(KeyCode::KeyQ);
        step(&mut paddle, 0.0, &[]);
        assert_eq!(paddle.position().y, 341.0);
        assert_eq!(paddle.vertical_speed(), 0.0);
    }

    //=====================================================================
    // Goals
    //=====================================================================

    #[test]
    fn goal_bar_blocks_movement() {
        // Top bar ends at y=245 (inclusive), paddle top sits just below it
        let mut paddle = paddle_at(25, 246);
        paddle.key_down(KeyCode::KeyQ);
        step(&mut paddle, 0.1, &[goal_collider(1, 0)]);
        assert_eq!(paddle.position().y, 246.0, "Move into the bar must be fully reverted");
        assert_eq!(paddle.vertical_speed(), 0.0);
    }

    #[test]
    fn paddle_slides_freely_inside_the_hole() {
        let mut paddle = paddle_at(25, 300);
        paddle.key_down(KeyCode::KeyA);
        step(&mut paddle, 0.1, &[goal_collider(1, 0)]);
        assert_eq!(paddle.position().y, 330.0);
    }

    #[test]
    fn goal_in_another_lane_does_not_block() {
        let mut paddle = paddle_at(250, 246);
        paddle.key_down(KeyCode::KeyQ);
        step(&mut paddle, 0.1, &[goal_collider(1, 0), goal_collider(2, 1016)]);
        assert_eq!(paddle.position().y, 216.0);
    }

    #[test]
    fn only_goals_block() {
        let mut wall = goal_collider(1, 0);
        wall.kind = ObjectKind::Ball;
        let mut paddle = paddle_at(25, 246);
        paddle.key_down(KeyCode::KeyQ);
        step(&mut paddle, 0.1, &[wall]);
        assert_eq!(paddle.position().y, 216.0);
    }

    //=====================================================================
    // Reset / Capabilities
    //=====================================================================

    #[test]
    fn reset_restores_start_and_speed() {
        let mut paddle = paddle_at(25, 341);
        paddle.key_down(KeyCode::KeyA);
        step(&mut paddle, 0.1, &[]);
        paddle.reset();
        assert_eq!(paddle.position().y, 341.0);
        assert_eq!(paddle.vertical_speed(), 0.0);
        assert!(paddle.base().keys.is_down(KeyCode::KeyA), "Held keys survive a reset");
    }

    #[test]
    fn deflection_reports_vertical_speed() {
        let mut paddle = paddle_at(25, 341);
        paddle.key_down(KeyCode::KeyQ);
        step(&mut paddle, 0.1, &[]);
        assert_eq!(paddle.deflects_by_velocity(), Some(-300.0));
        assert_eq!(paddle.kind(), ObjectKind::Paddle);
    }
}
