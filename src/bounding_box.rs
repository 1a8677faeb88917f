use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

const AXES: [char; 3] = ['x', 'y', 'z'];

/// Axis-aligned box, used both for the detector volume handed in by the
/// geometry service and for the inset volume vertices are drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lower_left: [f64; 3],
    pub upper_right: [f64; 3],
    pub center: [f64; 3],
    pub width: [f64; 3],
}

impl BoundingBox {
    pub fn new(lower_left: [f64; 3], upper_right: [f64; 3]) -> Self {
        let center = [
            0.5 * (lower_left[0] + upper_right[0]),
            0.5 * (lower_left[1] + upper_right[1]),
            0.5 * (lower_left[2] + upper_right[2]),
        ];
        let width = [
            upper_right[0] - lower_left[0],
            upper_right[1] - lower_left[1],
            upper_right[2] - lower_left[2],
        ];
        BoundingBox {
            lower_left,
            upper_right,
            center,
            width,
        }
    }

    /// Smallest box enclosing every volume in `boxes`.
    ///
    /// Returns `None` for an empty slice.
    pub fn enclosing(boxes: &[BoundingBox]) -> Option<Self> {
        let (first, rest) = boxes.split_first()?;
        let mut lower_left = first.lower_left;
        let mut upper_right = first.upper_right;
        for b in rest {
            for axis in 0..3 {
                lower_left[axis] = lower_left[axis].min(b.lower_left[axis]);
                upper_right[axis] = upper_right[axis].max(b.upper_right[axis]);
            }
        }
        Some(Self::new(lower_left, upper_right))
    }

    /// Shrink the box by `margins[axis] = [lower inset, upper inset]`.
    ///
    /// Negative margins grow the box. An inset that crosses over is a
    /// configuration error.
    pub fn inset(&self, margins: [[f64; 2]; 3]) -> Result<Self, ConfigError> {
        let mut lower_left = [0.0; 3];
        let mut upper_right = [0.0; 3];
        for axis in 0..3 {
            lower_left[axis] = self.lower_left[axis] + margins[axis][0];
            upper_right[axis] = self.upper_right[axis] - margins[axis][1];
            if lower_left[axis] > upper_right[axis] {
                return Err(ConfigError::EmptyVolume {
                    axis: AXES[axis],
                    lo: lower_left[axis],
                    hi: upper_right[axis],
                });
            }
        }
        Ok(Self::new(lower_left, upper_right))
    }

    pub fn contains(&self, point: [f64; 3]) -> bool {
        (0..3).all(|axis| {
            point[axis] >= self.lower_left[axis] && point[axis] <= self.upper_right[axis]
        })
    }
}
