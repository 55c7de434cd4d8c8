//! Command and query handlers wiring the domain rules to the ledger and
//! the content store.

pub mod command_handlers;
pub mod policy;
pub mod query_handlers;
