//=========================================================================
// Game Objects
//=========================================================================
//
// Polymorphic entities owned by a scene.
//
// Architecture:
// ```text
//   Scene
//     ├─ objects: Vec<Box<dyn GameObject>>
//     │     └─ ObjectBase (position, footprint, start, arena, keys)
//     └─ per object update:
//          snapshot all → [Collider] → World { self_id, colliders }
//          object.update(dt, &world) → Vec<SceneEffect> → scene drains
// ```
//
// Objects never hold references to each other or to their scene. They
// see the rest of the scene through a read-only snapshot (`World`) and
// talk back through the returned outbox (`SceneEffect`).
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{IVec2, Vec2};

//=== Internal Dependencies ===============================================

use crate::core::geometry::Rect;
use crate::core::input::{KeyCode, KeyStates, Side};
use crate::core::render::{Canvas, Texture};

//=== Identity ============================================================

/// Index of an object in its scene's collection.
///
/// Valid for the lifetime of the scene: objects are never removed or
/// reordered once the scene is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

/// Discriminant of the concrete object variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Paddle,
    Ball,
    Goal,
    Scoreboard,
}

//=== SceneEffect =========================================================

/// Scene-level request emitted by an object during `update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEffect {
    /// The given side scored a point.
    Score(Side),
}

//=== Collider ============================================================

/// Read-only snapshot of one object, taken before another object updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub can_collide: bool,
    pub areas: Vec<Rect>,
    /// Vertical speed imparted to a ball on contact, if any.
    pub deflection: Option<f32>,
}

//=== World ===============================================================

/// Collision context handed to `GameObject::update`.
#[derive(Debug, Clone, Copy)]
pub struct World<'a> {
    self_id: ObjectId,
    colliders: &'a [Collider],
}

impl<'a> World<'a> {
    pub fn new(self_id: ObjectId, colliders: &'a [Collider]) -> Self {
        Self { self_id, colliders }
    }

    /// Id of the object being updated.
    pub fn self_id(&self) -> ObjectId {
        self.self_id
    }

    /// Every object in the scene, including the one being updated.
    pub fn all(&self) -> &'a [Collider] {
        self.colliders
    }

    /// Every object except the one being updated, in scene order.
    pub fn others(&self) -> impl Iterator<Item = &'a Collider> + 'a {
        let self_id = self.self_id;
        self.colliders.iter().filter(move |c| c.id != self_id)
    }

    /// Objects of one kind, excluding self.
    pub fn of_kind(&self, kind: ObjectKind) -> impl Iterator<Item = &'a Collider> + 'a {
        self.others().filter(move |c| c.kind == kind)
    }
}

//=== ObjectBase ==========================================================

/// State shared by every object variant.
#[derive(Debug, Clone)]
pub struct ObjectBase {
    texture: Option<Texture>,
    /// Footprint size, derived from the texture unless set explicitly.
    pub width: i32,
    pub height: i32,
    /// Current position with sub-pixel precision.
    pub position: Vec2,
    start: IVec2,
    arena: IVec2,
    pub keys: KeyStates,
}

impl ObjectBase {
    //--- Construction -----------------------------------------------------

    /// Creates an object at `start` inside an arena of `arena` pixels.
    ///
    /// Objects without a texture start with an empty footprint; variants
    /// size themselves with [`with_size`](Self::with_size).
    pub fn new(texture: Option<Texture>, start: IVec2, arena: (i32, i32)) -> Self {
        let (width, height) = texture.map(|t| (t.width, t.height)).unwrap_or((0, 0));
        Self {
            texture,
            width,
            height,
            position: start.as_vec2(),
            start,
            arena: IVec2::new(arena.0, arena.1),
            keys: KeyStates::new(),
        }
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    /// Replaces the texture and adopts its size.
    pub fn set_texture(&mut self, texture: Texture) {
        self.width = texture.width;
        self.height = texture.height;
        self.texture = Some(texture);
    }

    pub fn start(&self) -> IVec2 {
        self.start
    }

    pub fn max_x(&self) -> i32 {
        self.arena.x
    }

    pub fn max_y(&self) -> i32 {
        self.arena.y
    }

    /// Full visual box at the current (truncated) position.
    pub fn footprint(&self) -> Rect {
        Rect::new(
            self.position.x as i32,
            self.position.y as i32,
            self.width,
            self.height,
        )
    }

    //--- Behavior ---------------------------------------------------------

    pub fn reset(&mut self) {
        self.position = self.start.as_vec2();
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(texture) = &self.texture {
            canvas.copy(texture, self.footprint());
        }
    }
}

//=== GameObject Trait ====================================================

/// Capabilities every object exposes to its scene.
///
/// Only `base`, `base_mut` and `kind` are required. The defaults give a
/// textured, collidable, motionless object whose collision area is its
/// footprint.
pub trait GameObject {
    fn base(&self) -> &ObjectBase;

    fn base_mut(&mut self) -> &mut ObjectBase;

    fn kind(&self) -> ObjectKind;

    /// Whether the object takes part in collision tests at all.
    fn can_collide(&self) -> bool {
        true
    }

    /// Returns the object to its start state.
    fn reset(&mut self) {
        self.base_mut().reset();
    }

    fn key_down(&mut self, key: KeyCode) {
        self.base_mut().keys.press(key);
    }

    fn key_up(&mut self, key: KeyCode) {
        self.base_mut().keys.release(key);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        self.base().draw(canvas);
    }

    /// Advances the object by `dt` seconds.
    fn update(&mut self, _dt: f32, _world: &World<'_>) -> Vec<SceneEffect> {
        Vec::new()
    }

    /// Boxes used for overlap tests. Must be mutually disjoint.
    fn collision_areas(&self) -> Vec<Rect> {
        vec![self.base().footprint()]
    }

    /// Vertical speed a ball picks up when bouncing off this object.
    fn deflects_by_velocity(&self) -> Option<f32> {
        None
    }

    fn position(&self) -> Vec2 {
        self.base().position
    }

    /// Snapshot used as collision context for other objects.
    fn collider(&self, id: ObjectId) -> Collider {
        Collider {
            id,
            kind: self.kind(),
            can_collide: self.can_collide(),
            areas: self.collision_areas(),
            deflection: self.deflects_by_velocity(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
