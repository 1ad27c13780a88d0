use crate::error::{AxisError, AxisResult};

/// Interval and adjusted end inferred from a raw numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NiceRange {
    pub start: f64,
    pub end: f64,
    pub interval: f64,
    pub precision: u8,
}

const DIVISION_FACTORS: [f64; 8] = [
    100_000_000.0,
    10_000_000.0,
    1_000_000.0,
    100_000.0,
    10_000.0,
    1_000.0,
    100.0,
    10.0,
];

/// Largest power-of-ten bucket that the span strictly exceeds (1 when none does).
#[must_use]
pub fn division_factor(span: f64) -> f64 {
    DIVISION_FACTORS
        .iter()
        .copied()
        .find(|factor| span > *factor)
        .unwrap_or(1.0)
}

/// Infers a readable tick interval for `[start, end]` and grows `end` so the
/// interval divides the span evenly.
///
/// Spans of at most 1 use a fixed 0.2 interval and at least one decimal place.
/// Inputs are expected to be finite with `end >= start`; callers validate.
#[must_use]
pub fn nice_range(start: f64, end: f64, precision: u8, include_extra_interval: bool) -> NiceRange {
    let mut span = end - start;
    let mut precision = precision;
    let interval;

    if span <= 1.0 {
        interval = 0.2;
        precision = precision.max(1);
    } else {
        interval = if span >= 100.0 {
            let factor = division_factor(span);
            (span / factor).ceil() * (factor / 10.0)
        } else if span >= 20.0 {
            5.0
        } else {
            (span / 10.0).ceil()
        };
        span = round_up_to_multiple(span, interval);
    }

    if include_extra_interval {
        span += interval;
    }

    NiceRange {
        start,
        end: start + span,
        interval,
        precision,
    }
}

fn round_up_to_multiple(span: f64, interval: f64) -> f64 {
    let steps = span / interval;
    let nearest = steps.round();
    if (steps - nearest).abs() <= 1e-9 * nearest.abs().max(1.0) {
        nearest * interval
    } else {
        steps.ceil() * interval
    }
}

/// Linear interpolation between two (value, coordinate) anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSegment {
    value_start: f64,
    value_end: f64,
    coordinate_start: f64,
    coordinate_end: f64,
}

impl LinearSegment {
    pub fn new(
        value_start: f64,
        value_end: f64,
        coordinate_start: f64,
        coordinate_end: f64,
    ) -> AxisResult<Self> {
        if !value_start.is_finite()
            || !value_end.is_finite()
            || !coordinate_start.is_finite()
            || !coordinate_end.is_finite()
        {
            return Err(AxisError::InvalidData(
                "segment anchors must be finite".to_owned(),
            ));
        }

        Ok(Self {
            value_start,
            value_end,
            coordinate_start,
            coordinate_end,
        })
    }

    /// Maps a value to a coordinate. Degenerate segments collapse onto the start anchor.
    #[must_use]
    pub fn coordinate_at(self, value: f64) -> f64 {
        let span = self.value_end - self.value_start;
        if span == 0.0 {
            return self.coordinate_start;
        }
        let ratio = (value - self.value_start) / span;
        self.coordinate_start + (self.coordinate_end - self.coordinate_start) * ratio
    }

    #[must_use]
    pub fn value_at(self, coordinate: f64) -> f64 {
        let span = self.coordinate_end - self.coordinate_start;
        if span == 0.0 {
            return self.value_start;
        }
        let ratio = (coordinate - self.coordinate_start) / span;
        self.value_start + (self.value_end - self.value_start) * ratio
    }
}

/// Relative float equality used for axis value lookups.
#[must_use]
pub fn values_match(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let magnitude = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= 1e-9 * magnitude
}
