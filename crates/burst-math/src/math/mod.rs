//! Core math modules.

pub mod exponential;
pub mod geometric;
pub mod select;
