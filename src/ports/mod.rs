//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the generator core and an
//! external system. Implementations live in `src/adapters/`.

pub mod font_source;

pub use font_source::FontSource;
