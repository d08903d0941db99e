//! Helper functions shared by the generator and templates

mod date;
mod title;

pub use date::*;
pub use title::*;
