//! Connector geometry.
//!
//! Connectors are computed from measured boxes, not from layout positions,
//! so they stay correct after reflow (resize, late image or font loads).
//! Measurement is injected through `BoxMeasure`.

pub mod curve;
pub mod geometry;
pub mod measure;
pub mod render;

pub use curve::CubicConnector;
pub use geometry::{Extent, Point, Rect};
pub use measure::{BoxMeasure, StaticBoxes};
pub use render::{ConnectorRenderer, ConnectorSet, PartialGeometryError};
