//=========================================================================
// Ball
//=========================================================================
//
// Constant-speed mover with a unit direction vector.
//
// Per update:
//   move → first new contact: undo x step, flip x, bend by deflection
//        → vertical walls bounce → off a side: Score(opposite side)
//
// Contacts are debounced: an object stays in `touching` while it
// overlaps the ball and only bounces the ball again after separating.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use glam::{IVec2, Vec2};
use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::geometry::overlaps_between;
use crate::core::input::Side;
use crate::core::object::{GameObject, ObjectBase, ObjectId, ObjectKind, SceneEffect, World};
use crate::core::render::Texture;

//=== Constants ===========================================================

/// Fraction of a paddle's vertical speed added to the ball's direction.
pub const DEFLECTION_FACTOR: f32 = 0.003;

//=== Ball ================================================================

#[derive(Debug, Clone)]
pub struct Ball {
    base: ObjectBase,
    speed: f32,
    direction: Vec2,
    touching: HashSet<ObjectId>,
}

impl Ball {
    /// Default travel speed in pixels per second.
    pub const SPEED: f32 = 300.0;

    /// Direction every ball starts with and returns to on reset.
    pub const START_DIRECTION: Vec2 = Vec2::X;

    pub fn new(texture: Texture, start: IVec2, arena: (i32, i32), speed: f32) -> Self {
        Self {
            base: ObjectBase::new(Some(texture), start, arena),
            speed,
            direction: Self::START_DIRECTION,
            touching: HashSet::new(),
        }
    }

    /// Overrides the initial direction. Zero vectors keep the default.
    pub fn with_direction(mut self, direction: Vec2) -> Self {
        self.direction = direction.normalize_or(Self::START_DIRECTION);
        self
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Whether `id` is in the debounce set.
    pub fn is_touching(&self, id: ObjectId) -> bool {
        self.touching.contains(&id)
    }

    /// Bends the direction by a paddle's vertical speed and renormalizes.
    ///
    /// A bend that cancels the direction entirely leaves it unbent.
    pub(crate) fn deflect(&mut self, vertical_speed: f32) {
        let bent = Vec2::new(
            self.direction.x,
            self.direction.y + vertical_speed * DEFLECTION_FACTOR,
        );
        self.direction = bent.try_normalize().unwrap_or(self.direction);
    }

    fn bounce_off_walls(&mut self) {
        let lowest = (self.base.max_y() - self.base.height) as f32;
        if self.base.position.y > lowest {
            self.base.position.y = lowest;
            self.direction.y = -self.direction.y;
        }
        if self.base.position.y < 0.0 {
            self.base.position.y = 0.0;
            self.direction.y = -self.direction.y;
        }
    }

    fn scored_sides(&self) -> Vec<SceneEffect> {
        let mut effects = Vec::new();
        if self.base.position.x < 0.0 {
            effects.push(SceneEffect::Score(Side::Right));
        }
        if self.base.position.x > (self.base.max_x() - self.base.width) as f32 {
            effects.push(SceneEffect::Score(Side::Left));
        }
        effects
    }
}

impl GameObject for Ball {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Ball
    }

    fn reset(&mut self) {
        self.base.reset();
        self.direction = Self::START_DIRECTION;
        self.touching.clear();
    }

    fn update(&mut self, dt: f32, world: &World<'_>) -> Vec<SceneEffect> {
        let step = self.direction * self.speed * dt;
        self.base.position += step;

        let own = self.collision_areas();
        for other in world.others() {
            if !other.can_collide {
                continue;
            }

            if overlaps_between(&own, &other.areas) {
                if self.touching.insert(other.id) {
                    self.base.position.x -= step.x;
                    self.direction.x = -self.direction.x;
                    if let Some(vertical_speed) = other.deflection {
                        self.deflect(vertical_speed);
                    }
                    trace!("Ball bounced off {:?} {:?}, direction {}", other.kind, other.id, self.direction);
                    break;
                }
            } else {
                self.touching.remove(&other.id);
            }
        }

        self.bounce_off_walls();
        self.scored_sides()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
