pub mod commands;
pub mod config;
pub mod error;
pub mod identity;
pub mod keyring;
pub mod platform;
pub mod state;
pub mod store;
pub mod workout;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, ValueEnum, Debug, Default, Serialize, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
