use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use std::ops::Range;

/// half a unit on each side, so a single value still spans a visible axis
pub const AXIS_PAD: f64 = 0.5;

/// A continuous f64 axis whose grid lines and labels sit exactly on the given integer ticks,
/// whatever number of labels the mesh asks for.
#[derive(Clone)]
pub struct TickedAxis {
    inner: RangedCoordf64,
    ticks: Vec<f64>,
}

impl TickedAxis {
    /// spans [lo - AXIS_PAD, hi + AXIS_PAD], with lo and hi widened to include every tick
    pub fn new(lo: i64, hi: i64, ticks: &[i64]) -> Self {
        let lo = ticks.first().map_or(lo, |&t| t.min(lo));
        let hi = ticks.last().map_or(hi, |&t| t.max(hi));
        let range = (lo as f64 - AXIS_PAD)..(hi as f64 + AXIS_PAD);
        TickedAxis {
            inner: range.into(),
            ticks: ticks.iter().map(|&t| t as f64).collect(),
        }
    }

    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }
}

impl Ranged for TickedAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    /// the ticks are the bold points, there are no light points
    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.weight().allow_light_points() {
            Vec::new()
        } else {
            self.ticks.clone()
        }
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }

    fn axis_pixel_range(&self, limit: (i32, i32)) -> Range<i32> {
        self.inner.axis_pixel_range(limit)
    }
}
