//=========================================================================
// Play Scene
//=========================================================================
//
// One match of Pong (2 paddles) or Hockey (6 paddles + 2 goals).
//
// Object order (also the update order):
// ```text
//   lane 25:  left Q/A, right O/L
//   lane 250: left W/S, right I/K      hockey only
//   lane 350: left E/D, right U/J      hockey only
//   goals: left x=0, right x=W-64      hockey only
//   ball, scoreboard
// ```
//
// Each object updates against a fresh snapshot of every object, and its
// scene effects are applied before the next object runs.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::iter;

use glam::IVec2;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::error::GameError;
use crate::core::input::{GameEvent, KeyCode, Side};
use crate::core::object::{Collider, GameObject, ObjectId, SceneEffect, World};
use crate::core::render::{Assets, Canvas, Color, Font, Graphics, Texture};
use crate::core::scene::{Scene, SceneContext, SceneEnv};
use crate::game::ball::Ball;
use crate::game::goal::Goal;
use crate::game::paddle::{Paddle, PaddleKeys};
use crate::game::scoreboard::Scoreboard;

//=== GameMode ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Pong,
    Hockey,
}

impl GameMode {
    pub fn name(self) -> &'static str {
        match self {
            GameMode::Pong => "pong",
            GameMode::Hockey => "hockey",
        }
    }

    fn lanes(self) -> &'static [Lane] {
        match self {
            GameMode::Pong => &LANES[..1],
            GameMode::Hockey => &LANES,
        }
    }

    fn has_goals(self) -> bool {
        self == GameMode::Hockey
    }
}

//=== Lanes ===============================================================

/// A mirrored pair of paddles `offset` pixels in from each side.
struct Lane {
    offset: i32,
    left: PaddleKeys,
    right: PaddleKeys,
}

static LANES: [Lane; 3] = [
    Lane {
        offset: 25,
        left: PaddleKeys::new(KeyCode::KeyQ, KeyCode::KeyA),
        right: PaddleKeys::new(KeyCode::KeyO, KeyCode::KeyL),
    },
    Lane {
        offset: 250,
        left: PaddleKeys::new(KeyCode::KeyW, KeyCode::KeyS),
        right: PaddleKeys::new(KeyCode::KeyI, KeyCode::KeyK),
    },
    Lane {
        offset: 350,
        left: PaddleKeys::new(KeyCode::KeyE, KeyCode::KeyD),
        right: PaddleKeys::new(KeyCode::KeyU, KeyCode::KeyJ),
    },
];

//=== PlayScene ===========================================================

pub struct PlayScene {
    mode: GameMode,
    objects: Vec<Box<dyn GameObject>>,
    scoreboard: Scoreboard,
    textures: Vec<Texture>,
    font: Font,
}

impl PlayScene {
    pub const BACKGROUND: Color = Color::WHITE;

    /// Loads the match assets and lays out the objects for `mode`.
    pub fn new(env: &mut SceneEnv<'_>, mode: GameMode) -> Result<Self, GameError> {
        let assets = &env.config.assets;
        let font = env.graphics.load_font(&assets.font, assets.font_size)?;
        let paddle_texture = env.graphics.load_texture(&assets.paddle_texture)?;
        let ball_texture = env.graphics.load_texture(&assets.ball_texture)?;
        let arena = env.graphics.output_size();
        let (width, height) = arena;

        let mut objects: Vec<Box<dyn GameObject>> = Vec::new();

        let paddle_y = height / 2 - paddle_texture.height / 2;
        for lane in mode.lanes() {
            let right_x = width - lane.offset - paddle_texture.width;
            for (x, keys) in [(lane.offset, lane.left), (right_x, lane.right)] {
                objects.push(Box::new(Paddle::new(
                    paddle_texture,
                    IVec2::new(x, paddle_y),
                    arena,
                    Paddle::SPEED,
                    keys,
                )));
            }
        }

        if mode.has_goals() {
            for x in [0, width - Goal::WIDTH] {
                objects.push(Box::new(Goal::new(x, Goal::WIDTH, Goal::HOLE, arena)));
            }
        }

        let ball_start = IVec2::new(
            width / 2 - ball_texture.width / 2,
            height / 2 - ball_texture.height / 2,
        );
        objects.push(Box::new(Ball::new(ball_texture, ball_start, arena, Ball::SPEED)));

        let scoreboard = Scoreboard::new(&mut *env.graphics, font, IVec2::new(width / 2, 0), arena)?;

        info!("Starting {} match with {} objects", mode.name(), objects.len() + 1);
        Ok(Self::assemble(mode, objects, scoreboard, vec![paddle_texture, ball_texture], font))
    }

    /// Builds a scene from ready-made parts. `textures` and `font` are
    /// released with the scene.
    pub fn assemble(
        mode: GameMode,
        objects: Vec<Box<dyn GameObject>>,
        scoreboard: Scoreboard,
        textures: Vec<Texture>,
        font: Font,
    ) -> Self {
        Self {
            mode,
            objects,
            scoreboard,
            textures,
            font,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Objects in update order, excluding the scoreboard.
    pub fn objects(&self) -> &[Box<dyn GameObject>] {
        &self.objects
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Id the scoreboard has in collision snapshots.
    fn scoreboard_id(&self) -> ObjectId {
        ObjectId(self.objects.len())
    }

    fn snapshot(&self) -> Vec<Collider> {
        self.objects
            .iter()
            .enumerate()
            .map(|(index, object)| object.collider(ObjectId(index)))
            .chain(iter::once(self.scoreboard.collider(self.scoreboard_id())))
            .collect()
    }

    /// Updates every object in order, applying effects as they come.
    fn step(&mut self, dt: f32, graphics: &mut dyn Graphics) -> Result<(), GameError> {
        for index in 0..=self.objects.len() {
            let colliders = self.snapshot();
            let world = World::new(ObjectId(index), &colliders);
            let effects = match self.objects.get_mut(index) {
                Some(object) => object.update(dt, &world),
                None => self.scoreboard.update(dt, &world),
            };
            for effect in effects {
                self.apply(effect, graphics)?;
            }
        }
        Ok(())
    }

    fn apply(&mut self, effect: SceneEffect, graphics: &mut dyn Graphics) -> Result<(), GameError> {
        match effect {
            SceneEffect::Score(side) => self.award_point(side, graphics),
        }
    }

    /// Resets every object, then scores for `side`.
    fn award_point(&mut self, side: Side, graphics: &mut dyn Graphics) -> Result<(), GameError> {
        debug!("{:?} side scored, resetting field", side);
        for object in &mut self.objects {
            object.reset();
        }
        self.scoreboard.reset();
        self.scoreboard.add_point(side, graphics)?;
        Ok(())
    }
}

impl Scene for PlayScene {
    fn name(&self) -> &str {
        self.mode.name()
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.set_draw_color(Self::BACKGROUND);
        canvas.clear();
        for object in &self.objects {
            object.draw(canvas);
        }
        self.scoreboard.draw(canvas);
    }

    fn update(&mut self, dt: f32, ctx: &mut SceneContext<'_>) -> Result<(), GameError> {
        self.step(dt, &mut *ctx.graphics)
    }

    fn on_event(&mut self, event: &GameEvent, ctx: &mut SceneContext<'_>) -> Result<(), GameError> {
        match *event {
            GameEvent::KeyDown(KeyCode::Escape) => {
                info!("Leaving {} match", self.mode.name());
                ctx.pop();
            }
            GameEvent::KeyDown(key) => {
                for object in &mut self.objects {
                    object.key_down(key);
                }
                self.scoreboard.key_down(key);
            }
            GameEvent::KeyUp(key) => {
                for object in &mut self.objects {
                    object.key_up(key);
                }
                self.scoreboard.key_up(key);
            }
            GameEvent::Score(side) => self.award_point(side, &mut *ctx.graphics)?,
            GameEvent::Quit | GameEvent::MouseButtonDown { .. } => {}
        }
        Ok(())
    }

    fn release(&mut self, assets: &mut dyn Assets) {
        self.scoreboard.release(assets);
        for texture in self.textures.drain(..) {
            assets.release_texture(texture);
        }
        assets.release_font(self.font);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;

    use glam::Vec2;

    use super::*;
    use crate::core::config::GameConfig;
    use crate::core::geometry::Rect;
    use crate::core::object::ObjectKind;
    use crate::core::scene::{scene_builder, SceneStack, TransitionQueue};
    use crate::game::menu::MenuScene;
    use crate::platform::headless::{DrawOp, HeadlessBackend};

    const DT: f32 = 1.0 / 60.0;

    fn config() -> GameConfig {
        GameConfig {
            frame_budget: Duration::ZERO,
            ..GameConfig::default()
        }
    }

    fn backend() -> HeadlessBackend {
        HeadlessBackend::new(1080, 810)
            .with_texture_size("paddle.png", 32, 128)
            .with_texture_size("ball.png", 32, 32)
    }

    fn scene(backend: &mut HeadlessBackend, mode: GameMode) -> PlayScene {
        let config = config();
        let mut env = SceneEnv { graphics: backend, config: &config };
        PlayScene::new(&mut env, mode).unwrap()
    }

    /// Runs `f` with a context over `backend`. Returns how many
    /// transitions the handler queued.
    fn with_ctx(backend: &mut HeadlessBackend, f: impl FnOnce(&mut SceneContext<'_>)) -> usize {
        let config = config();
        let mut transitions = TransitionQueue::new();
        let mut ctx = SceneContext::new(backend, &config, &mut transitions, (0, 0));
        f(&mut ctx);
        transitions.len()
    }

    fn positions(scene: &PlayScene) -> Vec<Vec2> {
        scene.objects().iter().map(|o| o.position()).collect()
    }

    fn kinds(scene: &PlayScene) -> Vec<ObjectKind> {
        scene.objects().iter().map(|o| o.kind()).collect()
    }

    //=====================================================================
    // Layout
    //=====================================================================

    #[test]
    fn pong_layout() {
        let mut backend = backend();
        let scene = scene(&mut backend, GameMode::Pong);

        assert_eq!(kinds(&scene), vec![ObjectKind::Paddle, ObjectKind::Paddle, ObjectKind::Ball]);
        assert_eq!(
            positions(&scene),
            vec![Vec2::new(25.0, 341.0), Vec2::new(1023.0, 341.0), Vec2::new(524.0, 389.0)]
        );
        assert_eq!(scene.scoreboard().text(), "0 - 0");
        assert_eq!(scene.name(), "pong");
    }

    #[test]
    fn hockey_layout() {
        let mut backend = backend();
        let scene = scene(&mut backend, GameMode::Hockey);

        let paddle_xs: Vec<f32> = scene.objects()[..6].iter().map(|o| o.position().x).collect();
        assert_eq!(paddle_xs, vec![25.0, 1023.0, 250.0, 798.0, 350.0, 698.0]);
        assert_eq!(
            kinds(&scene)[6..],
            [ObjectKind::Goal, ObjectKind::Goal, ObjectKind::Ball]
        );
        assert_eq!(
            scene.objects()[7].collision_areas(),
            vec![Rect::new(1016, 0, 64, 245), Rect::new(1016, 565, 64, 245)]
        );
    }

    #[test]
    fn hockey_paddles_answer_their_own_keys() {
        let mut backend = backend();
        let mut scene = scene(&mut backend, GameMode::Hockey);
        with_ctx(&mut backend, |ctx| {
            scene.on_event(&GameEvent::KeyDown(KeyCode::KeyE), ctx).unwrap();
            scene.update(0.1, ctx).unwrap();
        });

        let ys: Vec<f32> = scene.objects()[..6].iter().map(|o| o.position().y).collect();
        assert_eq!(ys, vec![341.0, 341.0, 341.0, 341.0, 311.0, 341.0], "Only the E/D paddle moves");
    }

    //=====================================================================
    // Events
    //=====================================================================

    #[test]
    fn escape_requests_pop() {
        let mut backend = backend();
        let mut scene = scene(&mut backend, GameMode::Pong);
        let queued = with_ctx(&mut backend, |ctx| {
            scene.on_event(&GameEvent::KeyDown(KeyCode::Escape), ctx).unwrap();
        });
        assert_eq!(queued, 1);
    }

    #[test]
    fn key_events_reach_paddles() {
        let mut backend = backend();
        let mut scene = scene(&mut backend, GameMode::Pong);
        with_ctx(&mut backend, |ctx| {
            scene.on_event(&GameEvent::KeyDown(KeyCode::KeyL), ctx).unwrap();
            scene.update(0.1, ctx).unwrap();
            scene.on_event(&GameEvent::KeyUp(KeyCode::KeyL), ctx).unwrap();
            scene.update(0.1, ctx).unwrap();
        });
        assert_eq!(scene.objects()[0].position().y, 341.0);
        assert_eq!(scene.objects()[1].position().y, 371.0);
    }

    #[test]
    fn queued_score_event_resets_and_scores() {
        let mut backend = backend();
        let mut scene = scene(&mut backend, GameMode::Pong);
        let start = positions(&scene);
        with_ctx(&mut backend, |ctx| {
            scene.on_event(&GameEvent::KeyDown(KeyCode::KeyQ), ctx).unwrap();
            scene.update(0.1, ctx).unwrap();
            scene.on_event(&GameEvent::Score(Side::Left), ctx).unwrap();
        });
        assert_eq!(positions(&scene), start);
        assert_eq!(scene.scoreboard().score(Side::Left), 1);
        assert_eq!(scene.scoreboard().score(Side::Right), 0);
    }

    //=====================================================================
    // Scoring
    //=====================================================================

    /// Pong field with the left paddle parked at the top so a left-moving
    /// ball in the middle lane runs straight out.
    fn open_left_field(backend: &mut HeadlessBackend) -> PlayScene {
        let paddle = backend.load_texture(Path::new("paddle.png")).unwrap();
        let ball = backend.load_texture(Path::new("ball.png")).unwrap();
        let font = backend.load_font(Path::new("Terminus.ttf"), 32.0).unwrap();
        let arena = (1080, 810);

        let objects: Vec<Box<dyn GameObject>> = vec![
            Box::new(Paddle::new(paddle, IVec2::new(25, 0), arena, Paddle::SPEED, LANES[0].left)),
            Box::new(Paddle::new(paddle, IVec2::new(1023, 341), arena, Paddle::SPEED, LANES[0].right)),
            Box::new(
                Ball::new(ball, IVec2::new(532, 389), arena, Ball::SPEED).with_direction(Vec2::new(-1.0, 0.0)),
            ),
        ];
        let scoreboard = Scoreboard::new(backend, font, IVec2::new(540, 0), arena).unwrap();
        PlayScene::assemble(GameMode::Pong, objects, scoreboard, vec![paddle, ball], font)
    }

    #[test]
    fn ball_leaving_left_scores_once_for_right() {
        let mut backend = backend();
        let mut scene = open_left_field(&mut backend);
        let start = positions(&scene);

        let mut frames_until_score = None;
        with_ctx(&mut backend, |ctx| {
            for frame in 1..=200 {
                scene.update(DT, ctx).unwrap();
                if frames_until_score.is_none() && scene.scoreboard().score(Side::Right) == 1 {
                    frames_until_score = Some(frame);
                    assert_eq!(positions(&scene), start, "Every object is back at its start");
                }
            }
        });

        assert!(frames_until_score.is_some(), "Ball never left the field");
        assert_eq!(scene.scoreboard().score(Side::Right), 1, "Exactly one point for the right side");
        assert_eq!(scene.scoreboard().score(Side::Left), 0);
    }

    #[test]
    fn ball_resets_to_rightward_after_score() {
        let mut backend = backend();
        let mut scene = open_left_field(&mut backend);
        with_ctx(&mut backend, |ctx| {
            scene.on_event(&GameEvent::Score(Side::Right), ctx).unwrap();
            scene.update(DT, ctx).unwrap();
        });
        assert_eq!(scene.objects()[2].position().x, 537.0, "Ball heads right after a reset");
    }

    #[test]
    fn ball_bounces_off_paddle() {
        let mut backend = backend();
        let mut scene = scene(&mut backend, GameMode::Pong);
        with_ctx(&mut backend, |ctx| {
            for _ in 0..120 {
                scene.update(DT, ctx).unwrap();
            }
        });
        assert_eq!(scene.scoreboard().text(), "0 - 0", "Paddles in the ball lane keep it in play");
    }

    //=====================================================================
    // Drawing / Release
    //=====================================================================

    #[test]
    fn draw_clears_white_then_objects_then_scoreboard() {
        let mut backend = backend();
        let scene = scene(&mut backend, GameMode::Hockey);
        scene.draw(&mut backend);

        let ops = backend.pending_ops();
        assert_eq!(ops[0], DrawOp::SetColor(Color::WHITE));
        assert_eq!(ops[1], DrawOp::Clear);
        let copies = ops.iter().filter(|op| matches!(op, DrawOp::Copy { .. })).count();
        let fills = ops.iter().filter(|op| matches!(op, DrawOp::FillRect(_))).count();
        assert_eq!(copies, 6 + 1 + 1, "Paddles, ball and scoreboard are textured");
        assert_eq!(fills, 4, "Two bars per goal");
        assert!(matches!(ops.last(), Some(DrawOp::Copy { .. })));
    }

    #[test]
    fn release_frees_all_assets() {
        let mut backend = backend();
        let mut scene = scene(&mut backend, GameMode::Pong);
        assert_eq!(backend.live_textures(), 3);
        scene.release(&mut backend);
        assert_eq!(backend.live_textures(), 0);
        assert_eq!(backend.live_fonts(), 0);
    }

    //=====================================================================
    // Stack Integration
    //=====================================================================

    #[test]
    fn menu_below_play_draws_first_and_gets_no_events() {
        let frames = vec![vec![GameEvent::KeyDown(KeyCode::KeyQ)]];
        let mut stack = SceneStack::new(backend().with_script(frames), config());
        stack.push(scene_builder(|env: &mut SceneEnv<'_>| MenuScene::new(env))).unwrap();
        stack
            .push(scene_builder(|env: &mut SceneEnv<'_>| PlayScene::new(env, GameMode::Pong)))
            .unwrap();

        stack.run_frame(DT).unwrap();

        let frame = &stack.backend().frames()[0];
        let clears: Vec<_> = frame
            .windows(2)
            .filter_map(|pair| match pair {
                [DrawOp::SetColor(color), DrawOp::Clear] => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(clears, vec![Color::BLACK, Color::WHITE], "Menu draws before play");
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn escape_returns_to_menu() {
        let frames = vec![vec![GameEvent::KeyDown(KeyCode::Escape)], vec![]];
        let mut stack = SceneStack::new(backend().with_script(frames), config());
        stack.push(scene_builder(|env: &mut SceneEnv<'_>| MenuScene::new(env))).unwrap();
        stack
            .push(scene_builder(|env: &mut SceneEnv<'_>| PlayScene::new(env, GameMode::Hockey)))
            .unwrap();

        stack.run_frame(DT).unwrap();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.current().unwrap().name(), "menu");
        assert_eq!(stack.backend().live_fonts(), 1, "Only the menu font remains");
    }
}
