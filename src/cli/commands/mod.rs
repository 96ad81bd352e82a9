//! Command implementations, one module per subcommand.

pub mod backup;
pub mod completions;
pub mod delete;
pub mod generate;
pub mod get;
pub mod keygen;
pub mod list;
pub mod move_cmd;
pub mod put;
pub mod restore;
