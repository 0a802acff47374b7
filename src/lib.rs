//! Block battle referee (workspace facade crate).
//!
//! Re-exports the member crates under short names so tools and tests can use
//! `blockbattle::{core, engine, protocol, types}` without knowing the layout
//! under `crates/`.

pub use blockbattle_core as core;
pub use blockbattle_engine as engine;
pub use blockbattle_protocol as protocol;
pub use blockbattle_types as types;
