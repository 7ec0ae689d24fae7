//! Height clamping and hysteresis.
//!
//! A renderer can request any height it likes; the mounter bounds it to
//! [`HeightLimits`] and only applies changes that exceed the jitter
//! threshold. This is the last line of defense against a compromised or
//! buggy renderer requesting degenerate sizes, and it suppresses visual
//! judder from sub-pixel remeasurements.

use serde::{Deserialize, Serialize};

/// Closed interval of acceptable iframe heights, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightLimits {
    pub min: u32,
    pub max: u32,
}

impl HeightLimits {
    /// Clamps a requested height into the interval.
    ///
    /// Non-finite requests collapse to `min`; fractional pixels truncate,
    /// matching how the wire value is consumed.
    pub fn clamp(&self, requested: f64) -> u32 {
        if !requested.is_finite() || requested < self.min as f64 {
            return self.min;
        }
        if requested > self.max as f64 {
            return self.max;
        }
        requested as u32
    }
}

/// Per-iframe resize state: the last height actually applied.
///
/// One tracker lives in each mount-registry entry. [`HeightTracker::apply`]
/// is the single decision point for whether an inbound resize message
/// changes anything.
#[derive(Debug, Clone)]
pub struct HeightTracker {
    limits: HeightLimits,
    threshold: u32,
    last: u32,
}

impl HeightTracker {
    /// A fresh tracker. `last` starts at zero so the first genuine
    /// measurement always clears the threshold.
    pub fn new(limits: HeightLimits, threshold: u32) -> Self {
        Self {
            limits,
            threshold,
            last: 0,
        }
    }

    /// Last height this tracker committed, zero before the first apply.
    pub fn last(&self) -> u32 {
        self.last
    }

    /// Clamps `requested` and commits it if it moved more than the jitter
    /// threshold away from the last applied height. Returns the height to
    /// set on the iframe, or `None` when the message should have no effect.
    pub fn apply(&mut self, requested: f64) -> Option<u32> {
        let clamped = self.limits.clamp(requested);
        if clamped.abs_diff(self.last) > self.threshold {
            self.last = clamped;
            Some(clamped)
        } else {
            None
        }
    }
}
