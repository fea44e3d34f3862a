#![warn(
    clippy::pedantic,
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    rust_2021_compatibility
)]
#![deny(rustdoc::broken_intra_doc_links)]
#![doc = include_str!("../README.md")]

pub mod errors;
pub mod field_type;
pub(crate) mod macros;
pub mod method_descriptor;
pub mod names;
pub mod signatures;

/// Test utilities
#[cfg(test)]
pub(crate) mod tests;
