//=========================================================================
// Game Configuration
//=========================================================================
//
// Startup-only settings: window geometry, frame budget and asset paths.
//
// Values are fixed once the stack starts running. `GameBuilder` in
// `crate::engine` is the fluent front end that fills this struct in.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;
use std::time::Duration;

//=== AssetPaths ==========================================================

/// Locations of the files scenes load on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetPaths {
    /// TrueType font used by the menu labels and the scoreboard.
    pub font: PathBuf,
    pub font_size: f32,
    pub paddle_texture: PathBuf,
    pub ball_texture: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            font: PathBuf::from("Terminus.ttf"),
            font_size: 32.0,
            paddle_texture: PathBuf::from("paddle.png"),
            ball_texture: PathBuf::from("ball.png"),
        }
    }
}

impl AssetPaths {
    /// Resolves every path relative to `root`.
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let defaults = Self::default();
        Self {
            font: root.join(defaults.font),
            font_size: defaults.font_size,
            paddle_texture: root.join(defaults.paddle_texture),
            ball_texture: root.join(defaults.ball_texture),
        }
    }
}

//=== GameConfig ==========================================================

/// Window and loop settings.
///
/// # Default Values
///
/// - **Window**: 1080×810, titled "Bouncy games"
/// - **Frame budget**: 16 ms
/// - **Assets**: see [`AssetPaths::default`]
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,
    /// Minimum wall-clock duration of one frame.
    pub frame_budget: Duration,
    pub assets: AssetPaths,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: 1080,
            window_height: 810,
            title: String::from("Bouncy games"),
            frame_budget: Duration::from_millis(16),
            assets: AssetPaths::default(),
        }
    }
}

impl GameConfig {
    /// Window size as signed pixel coordinates.
    pub fn window_dimensions(&self) -> (i32, i32) {
        (self.window_width as i32, self.window_height as i32)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
