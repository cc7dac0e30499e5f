//! arcdex - ARC Raiders reference lookup
//!
//! Core library: loads the community data files into typed records,
//! searches them, derives item economics and computes the map event
//! rotation.

pub mod cards;
pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
