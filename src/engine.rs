//=========================================================================
// Bouncy Games Engine
//
// Main entry point: configuration, window and first scene.
//
// Architecture:
// ```text
//     GameBuilder  ──build()──>  Game  ──run()──>  SceneStack<WinitPlatform>
//         │                        │                  └─ MenuScene on top
//         ├─ with_window_size()    └─ run_with(backend) for any Backend
//         ├─ with_title()
//         ├─ with_frame_budget()
//         └─ with_assets()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::config::{AssetPaths, GameConfig};
use crate::core::error::GameError;
use crate::core::render::Backend;
use crate::core::scene::{scene_builder, SceneEnv, SceneStack};
use crate::game::MenuScene;
use crate::platform::WinitPlatform;

//=== GameBuilder =========================================================

/// Builder for configuring and constructing a [`Game`].
///
/// # Default Values
///
/// See [`GameConfig::default`]: a 1080×810 window titled "Bouncy games",
/// a 16 ms frame budget and assets in the working directory.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use bouncy_games::GameBuilder;
///
/// GameBuilder::new()
///     .with_window_size(1280, 720)
///     .with_frame_budget(Duration::from_millis(8))
///     .build()
///     .run()?;
/// # Ok::<(), bouncy_games::core::error::GameError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameBuilder {
    config: GameConfig,
}

impl GameBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
        }
    }

    /// Sets the window size in physical pixels. This is also the arena.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Window size must be positive, got {}x{}",
            width,
            height
        );
        self.config.window_width = width;
        self.config.window_height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Sets the minimum duration of one frame. Zero disables pacing.
    ///
    /// Default: 16 ms
    pub fn with_frame_budget(mut self, budget: Duration) -> Self {
        self.config.frame_budget = budget;
        self
    }

    /// Sets where the font and textures are loaded from.
    ///
    /// # Panics
    ///
    /// Panics if the font size is not positive.
    pub fn with_assets(mut self, assets: AssetPaths) -> Self {
        assert!(assets.font_size > 0.0, "Font size must be positive, got {}", assets.font_size);
        self.config.assets = assets;
        self
    }

    /// Builds the game instance.
    pub fn build(self) -> Game {
        info!(
            "Building game ({}x{}, frame budget {:?})",
            self.config.window_width, self.config.window_height, self.config.frame_budget
        );
        Game { config: self.config }
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Game ================================================================

/// Game runtime. Create via [`GameBuilder`].
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
}

impl Game {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Opens the window and blocks until the player quits.
    ///
    /// # Errors
    ///
    /// Any windowing, asset or present failure ends the game with an error.
    pub fn run(self) -> Result<(), GameError> {
        let platform = WinitPlatform::new(&self.config)?;
        self.run_with(platform)
    }

    /// Runs the menu-first scene stack on `backend` until it empties or
    /// a quit arrives.
    pub fn run_with<B: Backend>(self, backend: B) -> Result<(), GameError> {
        info!("Starting game: {}", self.config.title);

        let mut stack = SceneStack::new(backend, self.config);
        stack.push(scene_builder(|env: &mut SceneEnv<'_>| MenuScene::new(env)))?;
        stack.run()?;

        info!("Game shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::CollaboratorError;
    use crate::core::input::{GameEvent, MouseButton};
    use crate::platform::headless::HeadlessBackend;

    //=====================================================================
    // GameBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let game = GameBuilder::new().build();
        assert_eq!(game.config(), &GameConfig::default());
    }

    #[test]
    fn builder_with_window_size() {
        let game = GameBuilder::new().with_window_size(640, 480).build();
        assert_eq!(game.config().window_dimensions(), (640, 480));
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn builder_with_window_size_panics_on_zero() {
        GameBuilder::new().with_window_size(0, 480);
    }

    #[test]
    #[should_panic(expected = "Font size must be positive")]
    fn builder_with_assets_panics_on_zero_font() {
        GameBuilder::new().with_assets(AssetPaths {
            font_size: 0.0,
            ..AssetPaths::default()
        });
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let game = GameBuilder::new()
            .with_title("Hockey night")
            .with_frame_budget(Duration::ZERO)
            .with_assets(AssetPaths::rooted_at("assets"))
            .build();

        assert_eq!(game.config().title, "Hockey night");
        assert_eq!(game.config().frame_budget, Duration::ZERO);
        assert_eq!(game.config().assets.ball_texture, std::path::PathBuf::from("assets/ball.png"));
    }

    //=====================================================================
    // Game Tests
    //=====================================================================

    fn quick_game() -> Game {
        GameBuilder::new().with_frame_budget(Duration::ZERO).build()
    }

    #[test]
    fn run_with_ends_on_quit() {
        let backend = HeadlessBackend::new(1080, 810).with_script(vec![vec![], vec![GameEvent::Quit]]);
        assert!(quick_game().run_with(backend).is_ok());
    }

    #[test]
    fn clicking_quit_label_ends_the_game() {
        let mut backend = HeadlessBackend::new(1080, 810)
            .with_script(vec![vec![GameEvent::MouseButtonDown { button: MouseButton::Left, x: 0, y: 0 }]]);
        // "Quit" is the third label, centered at (540, 485).
        backend.set_mouse_position(540, 485);
        assert!(quick_game().run_with(backend).is_ok());
    }

    #[test]
    fn missing_font_aborts_startup() {
        let backend = HeadlessBackend::new(1080, 810).with_missing_asset("Terminus.ttf");
        let result = quick_game().run_with(backend);
        assert!(matches!(
            result,
            Err(GameError::Collaborator(CollaboratorError::Font { .. }))
        ));
    }
}
