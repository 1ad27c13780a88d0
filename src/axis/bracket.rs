use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{TextMeasurer, values_match};
use crate::core::time::day_index;
use crate::error::{AxisError, AxisResult};

use super::{Axis, Label};

/// How the span of a bracket is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BracketLineShape {
    /// A line parallel to the axis with end ticks pointing back toward it.
    #[default]
    Lines,
    /// A line with arrowheads at both ends.
    Arrow,
    /// Label only.
    NoLine,
}

/// Where a bracket caption sits across the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BracketLabelAlignment {
    /// Flush with the outer edge of the bracket band.
    #[default]
    AlignWithBoundary,
    /// Directly beside the bracket line.
    AnchorWithLine,
}

/// Families of brackets generated from axis state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BracketType {
    /// One bracket per fiscal quarter of the current date range.
    FiscalQuarterly,
}

/// Secondary annotation spanning `start..=end` on the outer side of the axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisBracket {
    pub start: f64,
    pub end: f64,
    pub label_position: f64,
    pub label: Label,
    #[serde(default)]
    pub line_shape: BracketLineShape,
    #[serde(default)]
    pub label_alignment: BracketLabelAlignment,
    /// Device-independent length of the end ticks.
    #[serde(default = "default_tickmark_length")]
    pub tickmark_length: f64,
    /// Device-independent gap between the axis labels and the bracket line.
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f64,
    #[serde(skip)]
    pub(crate) start_coordinate: Option<f64>,
    #[serde(skip)]
    pub(crate) end_coordinate: Option<f64>,
    #[serde(skip)]
    pub(crate) label_coordinate: Option<f64>,
}

fn default_tickmark_length() -> f64 {
    5.0
}

fn default_line_spacing() -> f64 {
    10.0
}

impl AxisBracket {
    #[must_use]
    pub fn new(start: f64, end: f64, label_position: f64, label: impl Into<Label>) -> Self {
        Self {
            start,
            end,
            label_position,
            label: label.into(),
            line_shape: BracketLineShape::default(),
            label_alignment: BracketLabelAlignment::default(),
            tickmark_length: default_tickmark_length(),
            line_spacing: default_line_spacing(),
            start_coordinate: None,
            end_coordinate: None,
            label_coordinate: None,
        }
    }

    #[must_use]
    pub fn with_line_shape(mut self, shape: BracketLineShape) -> Self {
        self.line_shape = shape;
        self
    }

    #[must_use]
    pub fn with_label_alignment(mut self, alignment: BracketLabelAlignment) -> Self {
        self.label_alignment = alignment;
        self
    }

    /// Start and end coincide; drawn as one connecting tick.
    #[must_use]
    pub fn is_single_line(&self) -> bool {
        values_match(self.start, self.end)
    }

    /// Resolved pixel positions of start, end and caption; `None` until placed
    /// or when an end falls outside the axis range.
    #[must_use]
    pub fn physical_coordinates(&self) -> Option<(f64, f64, f64)> {
        Some((
            self.start_coordinate?,
            self.end_coordinate?,
            self.label_coordinate?,
        ))
    }

    pub fn validate(&self) -> AxisResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() || !self.label_position.is_finite() {
            return Err(AxisError::InvalidData(
                "bracket start, end and label position must be finite".to_owned(),
            ));
        }
        if !self.tickmark_length.is_finite() || self.tickmark_length < 0.0 {
            return Err(AxisError::InvalidData(
                "bracket tick mark length must be finite and >= 0".to_owned(),
            ));
        }
        if !self.line_spacing.is_finite() || self.line_spacing < 0.0 {
            return Err(AxisError::InvalidData(
                "bracket line spacing must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

impl<M: TextMeasurer> Axis<M> {
    /// Adds a bracket and resolves its pixel positions against the current placement.
    pub fn add_bracket(&mut self, bracket: AxisBracket) -> AxisResult<()> {
        bracket.validate()?;
        let mut bracket = bracket;
        self.resolve_bracket(&mut bracket);
        self.brackets.push(bracket);
        Ok(())
    }

    /// Generates a family of brackets from the current axis state.
    pub fn add_brackets(&mut self, bracket_type: BracketType) -> AxisResult<usize> {
        match bracket_type {
            BracketType::FiscalQuarterly => self.add_fiscal_quarter_brackets(),
        }
    }

    pub fn clear_brackets(&mut self) {
        self.brackets.clear();
    }

    /// Pixel depth of the widest bracket band: line spacing plus caption thickness.
    #[must_use]
    pub fn calc_brackets_width(&self) -> f64 {
        self.brackets
            .iter()
            .map(|bracket| self.bracket_width(bracket))
            .fold(0.0, f64::max)
    }

    pub(crate) fn bracket_width(&self, bracket: &AxisBracket) -> f64 {
        let caption = self.measure_label(&bracket.label);
        let thickness = if self.is_vertical() {
            caption.width
        } else {
            caption.height
        };
        self.scale_to_screen(bracket.line_spacing) + thickness
    }

    pub(crate) fn resolve_bracket(&self, bracket: &mut AxisBracket) {
        bracket.start_coordinate = self.physical_coordinate(bracket.start);
        bracket.end_coordinate = self.physical_coordinate(bracket.end);
        bracket.label_coordinate = self.physical_coordinate(bracket.label_position);
    }

    pub(crate) fn resolve_brackets(&mut self) {
        let mut brackets = std::mem::take(&mut self.brackets);
        for bracket in &mut brackets {
            self.resolve_bracket(bracket);
        }
        self.brackets = brackets;
    }

    fn add_fiscal_quarter_brackets(&mut self) -> AxisResult<usize> {
        let Some(dates) = self.date_range else {
            warn!("fiscal quarter brackets need a date range");
            return Err(AxisError::MissingDateRange);
        };

        let boundaries = dates.fiscal_year.quarter_boundaries(dates.first, dates.last);
        let mut added = 0;
        for pair in boundaries.windows(2) {
            let [(quarter, quarter_start), (_, next_start)] = [pair[0], pair[1]];
            let start = day_index(dates.first, quarter_start) as f64;
            let end = (day_index(dates.first, next_start) - 1) as f64;
            let year_start = dates.fiscal_year.year_start(quarter_start);
            let Some(label_year) = year_start.and_then(|start| dates.fiscal_year.label_year(start))
            else {
                continue;
            };
            let text = format!("Q{quarter}FY{:02}", label_year.rem_euclid(100));
            let bracket = AxisBracket::new(start, end, (start + end) / 2.0, text);
            self.add_bracket(bracket)?;
            added += 1;
        }
        debug!(added, "added fiscal quarter brackets");
        Ok(added)
    }
}
