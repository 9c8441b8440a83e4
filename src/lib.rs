// src/lib.rs
// compact-memory - conversation memory across auto-compaction

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod bridge;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod project;
pub mod transcript;
pub mod utils;

pub use error::{HookError, Result};
