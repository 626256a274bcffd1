//! Foundation types for WPGen.
//!
//! This crate contains the types shared by all WPGen crates: the packed
//! ARGB color and its parser, the bitmap buffer, configuration,
//! user-facing strings, and error types.

pub mod bitmap;
pub mod color;
pub mod config;
pub mod error;
pub mod strings;
