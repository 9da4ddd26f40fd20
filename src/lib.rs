//! Show Organizer Library
//!
//! Reorganizes TV show folders into a canonical media-server layout:
//! `<Show>/Season NN/<Show> - SNNEMM - Episode MM.ext`.
//!
//! Planning never touches the files being organized; the resulting plan can be
//! reviewed, saved, and executed later.

pub mod cli;
pub mod core;
pub mod error;
pub mod generators;
pub mod models;
pub mod utils;

pub use error::{Error, Result};
