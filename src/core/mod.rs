//=========================================================================
// Core
//
// Engine pieces that know nothing about Pong or Hockey.
//
// Responsibilities:
// - Startup configuration (`config`) and error types (`error`)
// - Rectangle overlap helpers (`geometry`)
// - Event vocabulary and held-key tracking (`input`)
// - Drawing and asset contracts implemented by backends (`render`)
// - The object model every game entity implements (`object`)
// - The scene stack and its frame loop (`scene`)
//
//=========================================================================

pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod object;
pub mod render;
pub mod scene;
