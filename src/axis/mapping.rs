use crate::core::{LinearSegment, TextMeasurer, values_match};

use super::{Axis, AxisPoint};

impl<M: TextMeasurer> Axis<M> {
    /// Pixel position of `value` along the axis.
    ///
    /// Exact point values map to their point's coordinate; values between two
    /// neighbouring points are interpolated linearly. `None` outside the point
    /// range or before the axis is placed.
    #[must_use]
    pub fn physical_coordinate(&self, value: f64) -> Option<f64> {
        if !value.is_finite() || self.endpoints.is_none() {
            return None;
        }
        let reversed = self.range.reversed;
        let index = self.points.partition_point(|point| {
            if reversed {
                point.value() > value
            } else {
                point.value() < value
            }
        });
        let (lower, upper) = bracketing_pair(&self.points, index, |point| {
            values_match(point.value(), value)
        })?;

        let segment = LinearSegment::new(
            lower.value(),
            upper.value(),
            lower.physical_coordinate()?,
            upper.physical_coordinate()?,
        )
        .ok()?;
        Some(segment.coordinate_at(value))
    }

    /// Axis value at pixel position `coordinate`; inverse of [`Axis::physical_coordinate`].
    #[must_use]
    pub fn value_from_physical_coordinate(&self, coordinate: f64) -> Option<f64> {
        if !coordinate.is_finite() || self.endpoints.is_none() {
            return None;
        }
        // Coordinates grow with the point index horizontally and shrink vertically.
        let vertical = self.is_vertical();
        let index = self.points.partition_point(|point| {
            point.physical_coordinate().is_some_and(|placed| {
                if vertical {
                    placed > coordinate
                } else {
                    placed < coordinate
                }
            })
        });
        let (lower, upper) = bracketing_pair(&self.points, index, |point| {
            point
                .physical_coordinate()
                .is_some_and(|placed| values_match(placed, coordinate))
        })?;

        let segment = LinearSegment::new(
            lower.value(),
            upper.value(),
            lower.physical_coordinate()?,
            upper.physical_coordinate()?,
        )
        .ok()?;
        Some(segment.value_at(coordinate))
    }
}

/// Neighbours around a partition index, or the same point twice on an exact hit.
fn bracketing_pair(
    points: &[AxisPoint],
    index: usize,
    is_exact: impl Fn(&AxisPoint) -> bool,
) -> Option<(&AxisPoint, &AxisPoint)> {
    if let Some(point) = points.get(index).filter(|point| is_exact(point)) {
        return Some((point, point));
    }
    if let Some(point) = index
        .checked_sub(1)
        .and_then(|before| points.get(before))
        .filter(|point| is_exact(point))
    {
        return Some((point, point));
    }
    if index == 0 || index >= points.len() {
        return None;
    }
    Some((&points[index - 1], &points[index]))
}
