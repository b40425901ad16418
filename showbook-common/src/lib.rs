//! # Showbook Common Library
//!
//! Data layer shared by the showbook services:
//! - Database initialization, migrations and row models
//! - Venue / artist / show queries and transactional commands
//! - Form parsing and validation
//! - Typed view-models handed to the presentation layer
//! - Configuration loading
//! - Show time formatting and classification

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod time;
pub mod views;

pub use error::{Error, Result};
