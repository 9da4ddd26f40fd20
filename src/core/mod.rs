//! Core business logic modules.

pub mod events;
pub mod executor;
pub mod normalizer;
pub mod patterns;
pub mod planner;
pub mod resolver;
pub mod scanner;
