pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod render;
pub mod splice;
pub mod types;
pub mod updater;
