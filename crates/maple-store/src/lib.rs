//! Maple — PostgreSQL adapters.
//!
//! The save ledger and the session-token lookup. Schema lives in the
//! workspace `migrations/` directory.

pub mod pg_save_ledger;
pub mod pg_session_identity;
pub mod queries;
