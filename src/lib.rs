//! newsdesk - News section manager for a small organization's website
//!
//! Keeps the site's news articles in a JSON data file, maintains the list of
//! featured articles, and publishes every change through git.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::NewsdeskError;
