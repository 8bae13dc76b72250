// src/lib.rs

pub mod admin;
pub mod api;
pub mod commands;
pub mod config;
pub mod errors;
pub mod launch;
pub mod models;
pub mod utils;

pub use errors::{LaunchError, LauncherError, Result};
pub use launch::{LaunchOrchestrator, LaunchPhase};
pub use models::{LaunchRequest, LaunchResult, LaunchStatus};
