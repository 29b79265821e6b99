//=========================================================================
// Bouncy Games — Binary
//
// Initializes logging and runs the game with default settings.
//
// Logging defaults to `info`; override with `RUST_LOG`, e.g.
// `RUST_LOG=platform=trace,bouncy_games=debug`.
//
//=========================================================================

use std::process::ExitCode;

use bouncy_games::GameBuilder;
use log::error;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match GameBuilder::new().build().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}
