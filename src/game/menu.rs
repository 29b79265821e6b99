//=========================================================================
// Menu Scene
//=========================================================================
//
// Title screen with clickable text labels.
//
// Layout (W×H window):
//   "Play Pong"    centered at (W/2, H/2)
//   "Play Hockey"  8 px below the previous label
//   "Quit"         8 px below the previous label
//
// A left click runs the action of the first label under the cursor.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::IVec2;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::error::{CollaboratorError, GameError};
use crate::core::geometry::{overlaps, Rect};
use crate::core::input::{GameEvent, MouseButton};
use crate::core::render::{Assets, Canvas, Color, Font, Texture};
use crate::core::scene::{scene_builder, Scene, SceneContext, SceneEnv};
use crate::game::play::{GameMode, PlayScene};

//=== MenuAction ==========================================================

/// What clicking a label does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    PlayPong,
    PlayHockey,
    /// Pops the menu, which ends the game when it is the last scene.
    Exit,
}

//=== Label ===============================================================

/// Text on a filled background, centered on an anchor point.
#[derive(Debug, Clone)]
pub struct Label {
    texture: Texture,
    anchor: IVec2,
    background: Color,
    action: MenuAction,
}

impl Label {
    pub fn new<A: Assets + ?Sized>(
        assets: &mut A,
        font: Font,
        text: &str,
        anchor: IVec2,
        foreground: Color,
        background: Color,
        action: MenuAction,
    ) -> Result<Self, CollaboratorError> {
        let texture = assets.render_text(font, text, foreground)?;
        Ok(Self {
            texture,
            anchor,
            background,
            action,
        })
    }

    pub fn action(&self) -> MenuAction {
        self.action
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered_at(self.anchor.x, self.anchor.y, self.texture.width, self.texture.height)
    }

    /// Hit test against a 1×1 probe at `(x, y)`.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        overlaps(&self.bounds(), &Rect::point(x, y))
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let bounds = self.bounds();
        canvas.set_draw_color(self.background);
        canvas.fill_rect(bounds);
        canvas.copy(&self.texture, bounds);
    }
}

//=== MenuScene ===========================================================

pub struct MenuScene {
    font: Font,
    labels: Vec<Label>,
}

impl MenuScene {
    pub const BACKGROUND: Color = Color::BLACK;
    pub const LABEL_FOREGROUND: Color = Color::WHITE;
    pub const LABEL_BACKGROUND: Color = Color::RED;
    /// Vertical gap between stacked labels.
    pub const LABEL_SPACING: i32 = 8;

    const ENTRIES: [(&'static str, MenuAction); 3] = [
        ("Play Pong", MenuAction::PlayPong),
        ("Play Hockey", MenuAction::PlayHockey),
        ("Quit", MenuAction::Exit),
    ];

    pub fn new(env: &mut SceneEnv<'_>) -> Result<Self, GameError> {
        let assets = &env.config.assets;
        let font = env.graphics.load_font(&assets.font, assets.font_size)?;
        let (width, height) = env.window_dimensions();

        let mut labels: Vec<Label> = Vec::with_capacity(Self::ENTRIES.len());
        let mut anchor = IVec2::new(width / 2, height / 2);
        for (text, action) in Self::ENTRIES {
            if let Some(previous) = labels.last() {
                anchor.y += previous.texture.height + Self::LABEL_SPACING;
            }
            let label = Label::new(
                &mut *env.graphics,
                font,
                text,
                anchor,
                Self::LABEL_FOREGROUND,
                Self::LABEL_BACKGROUND,
                action,
            )?;
            labels.push(label);
        }

        Ok(Self { font, labels })
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Action of the first label under `(x, y)`.
    pub fn hit(&self, x: i32, y: i32) -> Option<MenuAction> {
        self.labels.iter().find(|label| label.contains(x, y)).map(Label::action)
    }

    fn run(action: MenuAction, ctx: &mut SceneContext<'_>) {
        info!("Menu action: {:?}", action);
        match action {
            MenuAction::PlayPong => {
                ctx.push(scene_builder(|env: &mut SceneEnv<'_>| PlayScene::new(env, GameMode::Pong)))
            }
            MenuAction::PlayHockey => {
                ctx.push(scene_builder(|env: &mut SceneEnv<'_>| PlayScene::new(env, GameMode::Hockey)))
            }
            MenuAction::Exit => ctx.pop(),
        }
    }
}

impl Scene for MenuScene {
    fn name(&self) -> &str {
        "menu"
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.set_draw_color(Self::BACKGROUND);
        canvas.clear();
        for label in &self.labels {
            label.draw(canvas);
        }
    }

    fn update(&mut self, _dt: f32, _ctx: &mut SceneContext<'_>) -> Result<(), GameError> {
        Ok(())
    }

    fn on_event(&mut self, event: &GameEvent, ctx: &mut SceneContext<'_>) -> Result<(), GameError> {
        if let GameEvent::MouseButtonDown { button: MouseButton::Left, .. } = event {
            let (x, y) = ctx.mouse_position();
            match self.hit(x, y) {
                Some(action) => Self::run(action, ctx),
                None => debug!("Click at ({}, {}) hit no label", x, y),
            }
        }
        Ok(())
    }

    fn release(&mut self, assets: &mut dyn Assets) {
        for label in self.labels.drain(..) {
            assets.release_texture(label.texture);
        }
        assets.release_font(self.font);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
