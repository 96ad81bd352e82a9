pub mod backend;
pub mod backup;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
mod fsutil;
