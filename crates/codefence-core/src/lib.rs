//! Codefence Core
//!
//! This crate provides the types shared by every codefence crate.
//!
//! # Overview
//!
//! The core crate contains:
//! - [`ParseState`] - The states of the streaming fence state machine
//! - [`FenceChar`] - The two fence delimiter characters
//! - [`CodeBlockInfo`], [`CompletedCodeBlock`] - What the parser emits
//! - [`CodefenceError`] - Error types

pub mod enums;
pub mod error;
pub mod types;

pub use enums::{FenceChar, ParseState};
pub use error::{CodefenceError, Result};
pub use types::{CodeBlockInfo, CompletedCodeBlock};
