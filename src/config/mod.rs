//! Configuration module for fincontrol
//!
//! This module provides configuration management including:
//! - Config directory resolution with an environment override
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FinPaths;
pub use settings::Settings;
