//! Pure progression rules.

pub mod commands;
pub mod progression;
pub mod resolver;
