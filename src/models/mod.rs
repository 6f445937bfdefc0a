//! CLI-facing models

pub mod display;
