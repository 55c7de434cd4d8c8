//! Maple — scene content loaded from versioned YAML files.
//!
//! Each scene lives in `<root>/<scene_id>.yaml`. Files are read on demand;
//! scenes are immutable once authored, so nothing is cached here.

pub mod fs_content_store;
