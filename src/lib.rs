//! Episode file renamer.
//!
//! Parses season/episode identity out of messy video filenames, matches
//! it against local episode metadata, and builds a reviewable plan of
//! rename operations that a second command then executes. Duplicate
//! claims on one episode resolve to stable version suffixes, so running
//! the tool twice over the same library is a no-op.

pub mod cli;
pub mod core;
pub mod models;
pub mod naming;
pub mod services;
pub mod utils;

mod error;

pub use error::{Error, Result};
