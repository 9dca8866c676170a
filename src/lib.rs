//! Kobra - a terminal snake game with a greedy autopilot
//!
//! This library provides:
//! - Core game logic: grid, snake, fruit, engine, autopilot and session (game module)
//! - Key decoding (input module)
//! - TUI rendering of game snapshots and menus (render module)
//! - Per-process game stats (metrics module)
//! - The interactive terminal driver and its menus (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
