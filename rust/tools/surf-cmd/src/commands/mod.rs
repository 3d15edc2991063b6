//! Command implementations for surf-cmd

pub mod build;
pub mod get;
pub mod inspect;
pub mod scan;
