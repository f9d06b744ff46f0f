//! Terminal output helpers

pub mod paint;
