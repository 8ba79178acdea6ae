#![forbid(unsafe_code)]

//! Core domain model and business logic for Gym Notes.
//!
//! This crate provides:
//! - Domain types (user profiles, workout feature selections, schemas)
//! - Field and record validation
//! - Terminal prompts (record collection, numbered menus)
//! - Table gateways (in-memory and CSV files)
//! - The interactive session workflow

pub mod types;
pub mod error;
pub mod validate;
pub mod prompt;
pub mod menus;
pub mod gateway;
pub mod csv_store;
pub mod config;
pub mod logging;
pub mod workflow;

// Re-export commonly used types
pub use error::{Error, RecordError, Result};
pub use types::*;
pub use config::Config;
pub use menus::FeatureMenus;
pub use prompt::Console;
pub use gateway::{MemoryGateway, Record, TableGateway};
pub use csv_store::CsvGateway;
pub use workflow::{SessionSummary, Workflow};
