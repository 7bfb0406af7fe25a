//! # SQL Convention Validator Library
//!
//! Line-oriented convention checks for SQL text.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod lines;
pub mod output;
pub mod rules;
pub mod suggest;

pub use rules::validate;
