//! Configuration module for demo-insights
//!
//! Handles loading application settings from TOML files and the environment.

mod settings;

pub use settings::{
    EmailSettings, GeneralSettings, LlmSettings, Settings, TuiSettings, API_KEY_ENV,
};
