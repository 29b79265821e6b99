//=========================================================================
// Text Rasterization
//=========================================================================
//
// Lays a single line of text out with ab_glyph and rasterizes it into a
// tiny-skia pixmap.
//
// Layout:
// ```text
//   ┌──────────────────────────────┐ ─┬─ 0
//   │  ascent                       │  │
//   ├──baseline────────────────────┤  │ line height
//   │  descent                      │  │
//   └──────────────────────────────┘ ─┴─
//   |<-- sum of advances + kerning -->|
// ```
//
// Glyph coverage becomes alpha in the requested color. Overlapping glyph
// pixels keep the stronger coverage.
//
//=========================================================================

//=== External Dependencies ===============================================

use ab_glyph::{point, Font as _, FontVec, GlyphId, PxScale, ScaleFont};
use tiny_skia::{ColorU8, Pixmap};

//=== Internal Dependencies ===============================================

use crate::core::error::CollaboratorError;
use crate::core::render::Color;

//=== LoadedFont ==========================================================

/// Parsed font face at a fixed pixel scale.
pub(crate) struct LoadedFont {
    face: FontVec,
    scale: PxScale,
}

impl LoadedFont {
    /// Parses TrueType/OpenType bytes.
    pub(crate) fn from_bytes(data: Vec<u8>, size: f32) -> Result<Self, String> {
        let face = FontVec::try_from_vec(data).map_err(|e| e.to_string())?;
        Ok(Self {
            face,
            scale: PxScale::from(size),
        })
    }

    /// Pixel size of `text` laid out on one line.
    pub(crate) fn measure(&self, text: &str) -> (u32, u32) {
        let scaled = self.face.as_scaled(self.scale);
        let mut width = 0.0_f32;
        let mut previous: Option<GlyphId> = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        (width.ceil().max(1.0) as u32, scaled.height().ceil().max(1.0) as u32)
    }

    /// Renders `text` in `color` onto a transparent pixmap of `measure(text)`.
    pub(crate) fn rasterize(&self, text: &str, color: Color) -> Result<Pixmap, CollaboratorError> {
        let (width, height) = self.measure(text);
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| CollaboratorError::Text(format!("cannot allocate {}x{} text", width, height)))?;

        let scaled = self.face.as_scaled(self.scale);
        let baseline = scaled.ascent();
        let stride = width as usize;
        let pixels = pixmap.pixels_mut();

        let mut caret = 0.0_f32;
        let mut previous: Option<GlyphId> = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(self.scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = self.face.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i32 + gx as i32;
                let y = bounds.min.y as i32 + gy as i32;
                if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                    return;
                }
                let alpha = (coverage.clamp(0.0, 1.0) * f32::from(color.a)).round() as u8;
                let slot = &mut pixels[y as usize * stride + x as usize];
                if alpha > slot.alpha() {
                    *slot = ColorU8::from_rgba(color.r, color.g, color.b, alpha).premultiply();
                }
            });
        }

        Ok(pixmap)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
