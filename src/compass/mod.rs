//! Compass diagram: geometry and rendering.
//!
//! `layout` computes the backend-free patch geometry; `draw` paints it
//! with plotters.

pub mod draw;
pub mod layout;

pub use draw::{render_figure, CompassData, Figure, FigureRow, Panel};
pub use layout::Magnitudes;
