//! Maple — progression engine.
//!
//! Turns a player's choice in a scene into the next scene and a new save,
//! and answers read-only questions about where a player stands.

pub mod application;
pub mod domain;
