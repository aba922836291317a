//! Helper functions shared by the content layer and the CLI

mod date;

pub use date::*;
