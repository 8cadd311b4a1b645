//! Integration tests for the configuration system

pub mod file_formats;
