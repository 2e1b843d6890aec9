//! State types for Motivation Widget
//!
//! - `widget_state`: typed view of the persisted document
//! - `geometry`: window size/position and corner-grip resizing
//! - `font`: base font and tag font descriptors
//! - `color`: color string parsing

mod color;
mod font;
mod geometry;
mod widget_state;

pub use color::*;
pub use font::*;
pub use geometry::*;
pub use widget_state::*;
