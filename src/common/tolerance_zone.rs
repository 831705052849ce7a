// A closed interval of acceptable scalar values, used for the trailing and leading edge bands.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TolZone {
    /// The lower bound of the tolerance zone
    pub lower: f64,

    /// The upper bound of the tolerance zone
    pub upper: f64,
}

impl TolZone {
    /// Create a symmetric zone of `center ± half_width`. A negative width is treated as its
    /// magnitude, so the bounds are always ordered.
    pub fn around(center: f64, half_width: f64) -> Self {
        let w = half_width.abs();
        Self {
            lower: center - w,
            upper: center + w,
        }
    }

    /// Returns true if the given value is within the tolerance zone
    pub fn contains(&self, x: f64) -> bool {
        x >= self.lower && x <= self.upper
    }
}
