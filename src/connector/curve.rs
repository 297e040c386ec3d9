//! Cubic connector curves.
//!
//! A connector leaves the parent's right-middle point and enters the child's
//! left-middle point. Both control points sit on the vertical line halfway
//! between the endpoints; the first is pinned to the start height, the second
//! to the end height. The curve therefore never leaves the vertical band
//! between its endpoints.

use std::fmt::Write;

use serde::Serialize;

use super::geometry::{Point, Rect};
use crate::graph::NodeId;

/// One parent→child connector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CubicConnector {
    pub from: NodeId,
    pub to: NodeId,
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
    /// Matches the destination node so both arrive together.
    pub delay_ms: u32,
}

impl CubicConnector {
    /// Connector between two measured boxes.
    pub fn between(from: NodeId, parent: Rect, to: NodeId, child: Rect, delay_ms: u32) -> Self {
        let start = parent.right_middle();
        let end = child.left_middle();
        let control_x = start.x + (end.x - start.x) * 0.5;
        Self {
            from,
            to,
            start,
            control1: Point::new(control_x, start.y),
            control2: Point::new(control_x, end.y),
            end,
            delay_ms,
        }
    }

    /// SVG path data: `M sx sy C c1x c1y, c2x c2y, ex ey`.
    pub fn svg_path(&self) -> String {
        let mut d = String::with_capacity(64);
        let _ = write!(
            &mut d,
            "M {} {} C {} {}, {} {}, {} {}",
            fmt_coord(self.start.x),
            fmt_coord(self.start.y),
            fmt_coord(self.control1.x),
            fmt_coord(self.control1.y),
            fmt_coord(self.control2.x),
            fmt_coord(self.control2.y),
            fmt_coord(self.end.x),
            fmt_coord(self.end.y),
        );
        d
    }

    /// Point on the curve at parameter `t` in [0, 1].
    pub fn point_at(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Point::new(
            a * self.start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            a * self.start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        )
    }
}

/// Coordinates are rounded to 1/100 px; integers print without a fraction.
fn fmt_coord(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // avoids "-0"
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}
