//! Site subsystems.

pub mod reading;
pub mod runtime;
pub mod terminal;
pub mod web;
pub mod writing;
