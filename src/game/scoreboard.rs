//=========================================================================
// Scoreboard
//=========================================================================
//
// Two counters rendered as "left - right", centered on its anchor.
//
// Owns its text texture and re-rasterizes it on every point. Never
// collides.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::IVec2;
use log::info;

//=== Internal Dependencies ===============================================

use crate::core::error::CollaboratorError;
use crate::core::geometry::Rect;
use crate::core::input::Side;
use crate::core::object::{GameObject, ObjectBase, ObjectKind};
use crate::core::render::{Assets, Canvas, Color, Font};

//=== Scoreboard ==========================================================

#[derive(Debug, Clone)]
pub struct Scoreboard {
    base: ObjectBase,
    font: Font,
    scores: [u32; 2],
}

impl Scoreboard {
    pub const TEXT_COLOR: Color = Color::BLACK;

    /// Creates a 0 - 0 board anchored (top-center) at `anchor`.
    pub fn new<A: Assets + ?Sized>(
        assets: &mut A,
        font: Font,
        anchor: IVec2,
        arena: (i32, i32),
    ) -> Result<Self, CollaboratorError> {
        let mut board = Self {
            base: ObjectBase::new(None, anchor, arena),
            font,
            scores: [0, 0],
        };
        board.refresh_text(assets)?;
        Ok(board)
    }

    pub fn score(&self, side: Side) -> u32 {
        self.scores[side.index()]
    }

    pub fn text(&self) -> String {
        format!("{} - {}", self.scores[0], self.scores[1])
    }

    /// Adds one point to `side` and re-renders the text.
    pub fn add_point<A: Assets + ?Sized>(&mut self, side: Side, assets: &mut A) -> Result<(), CollaboratorError> {
        self.scores[side.index()] += 1;
        info!("Score: {}", self.text());
        self.refresh_text(assets)
    }

    /// Frees the text texture.
    pub fn release<A: Assets + ?Sized>(&mut self, assets: &mut A) {
        if let Some(texture) = self.base.texture().copied() {
            assets.release_texture(texture);
        }
    }

    /// Renders the current text. The old texture is freed only once the
    /// new one exists.
    fn refresh_text<A: Assets + ?Sized>(&mut self, assets: &mut A) -> Result<(), CollaboratorError> {
        let fresh = assets.render_text(self.font, &self.text(), Self::TEXT_COLOR)?;
        if let Some(stale) = self.base.texture().copied() {
            assets.release_texture(stale);
        }
        self.base.set_texture(fresh);
        Ok(())
    }

    /// Destination box: horizontally centered on the anchor, top-aligned.
    fn text_rect(&self) -> Rect {
        Rect::new(
            (self.base.position.x - self.base.width as f32 / 2.0) as i32,
            self.base.position.y as i32,
            self.base.width,
            self.base.height,
        )
    }
}

impl GameObject for Scoreboard {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Scoreboard
    }

    fn can_collide(&self) -> bool {
        false
    }

    fn collision_areas(&self) -> Vec<Rect> {
        vec![self.text_rect()]
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(texture) = self.base.texture() {
            canvas.copy(texture, self.text_rect());
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
