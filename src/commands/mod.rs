//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation against a [`GroupEngine`](crate::group::GroupEngine),
//! the item store or the configuration.

pub mod db;
pub mod import;
pub mod list;
pub mod member;
pub mod options;
pub mod tag;
pub mod tree;
pub mod values;

// Re-export execute functions for convenience
pub use db::execute as db;
pub use import::execute as import;
pub use list::execute as list;
pub use member::execute as member;
pub use options::execute as options;
pub use tag::execute as tag;
pub use tag::remove;
pub use tree::execute as tree;
pub use values::execute as values;

pub use import::{load_items_file, parse_items};
