pub mod cli;
pub mod config;
pub mod ids;
pub mod persistence;
pub mod render;
pub mod session;
pub mod storage;
pub mod terminal;
pub mod types;
pub mod utils;
pub mod validate;
pub mod workout_log;
