//! Core types for the pubfinder search pipeline

pub mod provider;
pub mod venue;

pub use provider::*;
pub use venue::*;
