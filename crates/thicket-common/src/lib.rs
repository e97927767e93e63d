//! Common utilities for the Thicket markup parser.
//!
//! This crate provides shared infrastructure used by the parser and its
//! front ends:
//! - **Warning System** - deduplicated, colored stderr output for recoverable
//!   parse problems

pub mod warning;
