// src/api/mod.rs
pub mod companies;
pub mod import;
pub mod stats;

// Re-export all route functions
pub use companies::*;
pub use import::*;
pub use stats::*;
