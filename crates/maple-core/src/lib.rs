//! Maple Core — shared domain types and ports.
//!
//! This crate defines the story data model, the save record, the error
//! taxonomy and the traits every adapter implements. It contains no
//! infrastructure code.

pub mod clock;
pub mod command;
pub mod content;
pub mod error;
pub mod identity;
pub mod ids;
pub mod ledger;
pub mod save;
pub mod scene;
