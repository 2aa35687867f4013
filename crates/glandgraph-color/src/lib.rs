//! glandgraph-color - coloring objects of a mask
//!
//! - **Color scales** - map normalized values to RGB ([`ColorScale`])
//! - **Outcome colors** - the fixed palette for annotation and
//!   classification outcomes ([`OutcomeColor`])
//! - **Region colorizer** - paint each seeded object with its own color
//!   ([`colorize`])

pub mod colormap;
pub mod coloring;
pub mod error;

pub use error::{ColorError, ColorResult};

pub use colormap::{Anchors, ColorScale, OutcomeColor};
pub use coloring::{
    ColorizeOptions, Colorized, PaintIssue, colorize, colorize_outcomes, normalize_values,
};
