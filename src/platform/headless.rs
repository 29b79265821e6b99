//=========================================================================
// Headless Backend
//=========================================================================
//
// Window-less `Backend` that replays scripted input and records drawing.
//
// Architecture:
// ```text
//   script: [frame 0 events][frame 1 events]...   → poll_events()
//   Canvas calls → pending ops ──present()──> frames[n]
//   Assets calls → synthetic handles with deterministic sizes
// ```
//
// Once the script runs out, every poll reports `Quit`, so a stack driven
// by this backend always terminates.
//
// Text metrics: each character advances half the font size, and the line
// is as tall as the font size (32 px font → 16×32 per character).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::error::CollaboratorError;
use crate::core::geometry::Rect;
use crate::core::input::GameEvent;
use crate::core::render::{Assets, Backend, Canvas, Color, Font, Texture, TextureId};

//=== DrawOp ==============================================================

/// One recorded canvas call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    SetColor(Color),
    Clear,
    FillRect(Rect),
    Copy { texture: TextureId, dst: Rect },
}

//=== HeadlessBackend =====================================================

#[derive(Debug)]
pub struct HeadlessBackend {
    size: (i32, i32),
    script: VecDeque<Vec<GameEvent>>,
    mouse_position: (i32, i32),

    pending: Vec<DrawOp>,
    frames: Vec<Vec<DrawOp>>,

    texture_sizes: HashMap<PathBuf, (i32, i32)>,
    missing: HashSet<PathBuf>,
    live_textures: HashSet<TextureId>,
    fonts: HashMap<Font, f32>,
    rendered_texts: Vec<String>,
    next_id: u32,
}

impl HeadlessBackend {
    /// Size used for textures without an explicit entry.
    pub const DEFAULT_TEXTURE_SIZE: (i32, i32) = (32, 32);

    //--- Construction -----------------------------------------------------

    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: (width, height),
            script: VecDeque::new(),
            mouse_position: (0, 0),
            pending: Vec::new(),
            frames: Vec::new(),
            texture_sizes: HashMap::new(),
            missing: HashSet::new(),
            live_textures: HashSet::new(),
            fonts: HashMap::new(),
            rendered_texts: Vec::new(),
            next_id: 1,
        }
    }

    /// Replaces the input script. Entry `n` is returned by the n-th poll.
    pub fn with_script(mut self, frames: Vec<Vec<GameEvent>>) -> Self {
        self.script = frames.into();
        self
    }

    /// Size reported for textures loaded from `path`.
    ///
    /// Matches the exact path first, then the file name alone.
    pub fn with_texture_size(mut self, path: impl Into<PathBuf>, width: i32, height: i32) -> Self {
        self.texture_sizes.insert(path.into(), (width, height));
        self
    }

    /// Makes texture and font loads from `path` fail.
    pub fn with_missing_asset(mut self, path: impl Into<PathBuf>) -> Self {
        self.missing.insert(path.into());
        self
    }

    //--- Scripting --------------------------------------------------------

    pub fn set_mouse_position(&mut self, x: i32, y: i32) {
        self.mouse_position = (x, y);
    }

    //--- Inspection -------------------------------------------------------

    /// Draw operations of every presented frame, oldest first.
    pub fn frames(&self) -> &[Vec<DrawOp>] {
        &self.frames
    }

    /// Draw operations issued since the last present.
    pub fn pending_ops(&self) -> &[DrawOp] {
        &self.pending
    }

    /// Every string passed to `render_text`, in call order.
    pub fn rendered_texts(&self) -> Vec<String> {
        self.rendered_texts.clone()
    }

    pub fn live_textures(&self) -> usize {
        self.live_textures.len()
    }

    pub fn live_fonts(&self) -> usize {
        self.fonts.len()
    }

    //--- Internal Helpers -------------------------------------------------

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn is_missing(&self, path: &Path) -> bool {
        self.missing.contains(path)
    }

    fn size_for(&self, path: &Path) -> (i32, i32) {
        if let Some(size) = self.texture_sizes.get(path) {
            return *size;
        }
        path.file_name()
            .and_then(|name| self.texture_sizes.get(Path::new(name)))
            .copied()
            .unwrap_or(Self::DEFAULT_TEXTURE_SIZE)
    }

    fn new_texture(&mut self, width: i32, height: i32) -> Texture {
        let id = TextureId(self.allocate_id());
        self.live_textures.insert(id);
        Texture { id, width, height }
    }
}

//=== Canvas ==============================================================

impl Canvas for HeadlessBackend {
    fn output_size(&self) -> (i32, i32) {
        self.size
    }

    fn set_draw_color(&mut self, color: Color) {
        self.pending.push(DrawOp::SetColor(color));
    }

    fn clear(&mut self) {
        self.pending.push(DrawOp::Clear);
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.pending.push(DrawOp::FillRect(rect));
    }

    fn copy(&mut self, texture: &Texture, dst: Rect) {
        if self.live_textures.contains(&texture.id) {
            self.pending.push(DrawOp::Copy { texture: texture.id, dst });
        }
    }
}

//=== Assets ==============================================================

impl Assets for HeadlessBackend {
    fn load_texture(&mut self, path: &Path) -> Result<Texture, CollaboratorError> {
        if self.is_missing(path) {
            return Err(CollaboratorError::Asset {
                path: path.to_path_buf(),
                reason: String::from("file not found"),
            });
        }
        let (width, height) = self.size_for(path);
        Ok(self.new_texture(width, height))
    }

    fn load_font(&mut self, path: &Path, point_size: f32) -> Result<Font, CollaboratorError> {
        if self.is_missing(path) {
            return Err(CollaboratorError::Font {
                path: path.to_path_buf(),
                reason: String::from("file not found"),
            });
        }
        let font = Font(self.allocate_id());
        self.fonts.insert(font, point_size);
        Ok(font)
    }

    fn render_text(&mut self, font: Font, text: &str, _color: Color) -> Result<Texture, CollaboratorError> {
        let point_size = *self
            .fonts
            .get(&font)
            .ok_or_else(|| CollaboratorError::Text(format!("unknown font {:?}", font)))?;

        let advance = (point_size / 2.0) as i32;
        let width = advance * text.chars().count() as i32;
        let height = point_size as i32;
        self.rendered_texts.push(text.to_string());
        Ok(self.new_texture(width, height))
    }

    fn release_texture(&mut self, texture: Texture) {
        self.live_textures.remove(&texture.id);
    }

    fn release_font(&mut self, font: Font) {
        self.fonts.remove(&font);
    }
}

//=== Backend =============================================================

impl Backend for HeadlessBackend {
    fn poll_events(&mut self) -> Vec<GameEvent> {
        match self.script.pop_front() {
            Some(events) => events,
            None => {
                trace!(target: "platform", "Headless script exhausted, requesting quit");
                vec![GameEvent::Quit]
            }
        }
    }

    fn mouse_position(&self) -> (i32, i32) {
        self.mouse_position
    }

    fn present(&mut self) -> Result<(), CollaboratorError> {
        let frame = std::mem::take(&mut self.pending);
        self.frames.push(frame);
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
