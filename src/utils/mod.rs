//! Shared utilities.

pub mod chinese;
pub mod fs;
pub mod hash;
