//! CLI functionality for the sqlscope tool
//!
//! This module contains all CLI-related functionality including:
//! - Statement analysis
//! - The diagnostic code listing
//! - Output formatting

pub mod analyze;
pub mod codes;
pub mod output;
