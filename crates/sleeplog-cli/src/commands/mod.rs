//! CLI subcommand implementations.

pub mod entries;
pub mod list;
pub mod status;
pub mod timer;
pub mod util;
