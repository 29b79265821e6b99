//=========================================================================
// Goal
//=========================================================================
//
// Static hockey goal: two solid bars with a hole between them.
//
//   y = 0           ┌──┐
//                   │  │  top bar     (arena_h - hole) / 2 tall
//                   └──┘
//                         hole        `hole` tall, no collision area
//                   ┌──┐
//                   │  │  bottom bar  starts at (arena_h + hole) / 2
//   y = arena_h     └──┘
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::IVec2;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Rect;
use crate::core::object::{GameObject, ObjectBase, ObjectKind};
use crate::core::render::{Canvas, Color};

//=== Goal ================================================================

#[derive(Debug, Clone)]
pub struct Goal {
    base: ObjectBase,
    hole: i32,
}

impl Goal {
    pub const WIDTH: i32 = 64;
    pub const HOLE: i32 = 320;

    /// Creates a goal spanning the full arena height at `x`.
    pub fn new(x: i32, width: i32, hole: i32, arena: (i32, i32)) -> Self {
        Self {
            base: ObjectBase::new(None, IVec2::new(x, 0), arena).with_size(width, arena.1),
            hole,
        }
    }

    pub fn hole(&self) -> i32 {
        self.hole
    }

    /// Top and bottom bars.
    pub fn bars(&self) -> [Rect; 2] {
        let x = self.base.position.x as i32;
        let y = self.base.position.y as i32;
        let arena_height = self.base.max_y();
        let bar_height = (arena_height - self.hole) / 2;
        [
            Rect::new(x, y, self.base.width, bar_height),
            Rect::new(x, y + (arena_height + self.hole) / 2, self.base.width, bar_height),
        ]
    }
}

impl GameObject for Goal {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Goal
    }

    fn collision_areas(&self) -> Vec<Rect> {
        self.bars().to_vec()
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.set_draw_color(Color::BLACK);
        for bar in self.bars() {
            canvas.fill_rect(bar);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
