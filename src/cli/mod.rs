//! CLI module
//!
//! Command-line interface for the feed.
//!
//! # Commands
//!
//! - `listings` - Fetch and merge every listings page
//! - `page` - Fetch one listings page
//! - `content` - Load testimonials, FAQ or footer
//! - `config` - Print the effective configuration
//! - `stamp` - Print the site clock stamps

mod commands;
mod runner;

pub use commands::{Cli, Commands, ContentKind, OutputFormat};
pub use runner::{report_json, Runner};
