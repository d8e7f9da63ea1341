//! SVG rendering of the stages of Suurballe's algorithm.
//!
//! A small force-directed layout places the nodes of the main graph; every
//! later snapshot is drawn on the same positions.

pub mod layout;
pub mod sink;
pub mod svg;
pub mod types;

pub use sink::{SvgStageSink, ViewMode};
pub use svg::{SvgOptions, generate_svg, write_svg};
pub use types::*;
