//! Adapter implementations for port traits.
//!
//! - `system_fonts` — Font files read from the local filesystem

pub mod system_fonts;

pub use system_fonts::SystemFonts;
