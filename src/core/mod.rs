//! Pure parsing and command-construction logic.

pub mod command;
pub mod record;
