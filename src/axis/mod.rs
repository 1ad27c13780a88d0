//! Axis aggregate: range building, physical placement, value/coordinate
//! mapping, label fitting and footprint geometry.
//!
//! Each concern lives in its own file as a separate `impl<M: TextMeasurer> Axis<M>`
//! block; this module holds the state and the plain accessors.

mod bounds;
mod bracket;
mod config;
mod dates;
mod draw;
mod label;
mod label_fit;
mod mapping;
mod placement;
mod point;
mod range;
mod side;
mod snapshot;
mod tick;

use std::cell::RefCell;
use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Anchoring, FontSpec, HeuristicTextMeasurer, Point, TextMeasurer};
use crate::error::{AxisError, AxisResult};

pub use bounds::LabelOverhang;
pub use bracket::{AxisBracket, BracketLabelAlignment, BracketLineShape, BracketType};
pub use config::AxisStyleConfig;
pub use dates::DateRange;
pub use label::{DisplayedLabel, Label, LabelDisplay};
pub use label_fit::LabelExtentCacheStats;
pub use point::{AxisPoint, AxisRange};
pub use snapshot::{
    AXIS_SNAPSHOT_JSON_SCHEMA_V1, AxisPointSnapshot, AxisSnapshot, AxisSnapshotJsonContractV1,
    BracketSnapshot, TickMarkSnapshot,
};
pub use tick::{TickMark, TickMarkDisplay};

use label_fit::LabelExtentCache;

/// Which side of the plot the axis sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisType {
    LeftY,
    RightY,
    BottomX,
    TopX,
}

impl AxisType {
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::LeftY | Self::RightY)
    }

    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        !self.is_vertical()
    }
}

/// Label reading direction relative to the axis line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelOrientation {
    #[default]
    Parallel,
    Perpendicular,
}

/// Where perpendicular labels sit across the axis line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PerpendicularLabelAlignment {
    /// Flush against the tick marks.
    #[default]
    AlignWithAxisLine,
    /// Flush against the outer edge of the label block.
    AlignWithBoundary,
    /// Straddling the axis line.
    CenterOnAxisLine,
}

/// Where parallel labels sit along the axis relative to their tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParallelLabelAlignment {
    #[default]
    Centered,
    /// The label's top/left edge sits on the tick; it hangs toward the right/bottom.
    FlushLeading,
    /// The label's bottom/right edge sits on the tick; it hangs toward the left/top.
    FlushTrailing,
}

/// Groups of state cleared by [`Axis::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisResetLevel {
    RangeAndLabelValues,
    Brackets,
    TitleHeaderFooter,
    CosmeticSettings,
    AllSettings,
}

/// One chart axis.
///
/// Mutators that change the point set, label text or orientation bump an internal
/// generation counter; cached label extents are recomputed lazily on mismatch.
#[derive(Debug)]
pub struct Axis<M: TextMeasurer = HeuristicTextMeasurer> {
    axis_type: AxisType,
    measurer: M,
    style: AxisStyleConfig,

    points: Vec<AxisPoint>,
    custom_labels: BTreeMap<OrderedFloat<f64>, Label>,
    tick_marks: Vec<TickMark>,
    custom_tick_marks: Vec<TickMark>,
    brackets: Vec<AxisBracket>,
    range: AxisRange,
    tick_interval: f64,
    date_range: Option<DateRange>,

    endpoints: Option<(Point, Point)>,
    label_offset: f64,
    scaling: f64,
    dpi_scale: f64,
    label_scaling: f64,

    label_orientation: LabelOrientation,
    parallel_alignment: ParallelLabelAlignment,
    perpendicular_alignment: PerpendicularLabelAlignment,
    label_display: LabelDisplay,
    stack_labels: bool,
    auto_stacking: bool,
    double_sided_labels: bool,
    showing_labels: bool,
    showing_outer_labels: bool,
    start_at_zero: bool,
    free_floating: bool,
    anchoring: Anchoring,

    title: Label,
    header: Label,
    footer: Label,

    max_width: Option<f64>,
    max_height: Option<f64>,

    generation: u64,
    extent_cache: RefCell<LabelExtentCache>,
}

impl Axis<HeuristicTextMeasurer> {
    /// Creates an axis measured with the built-in heuristic and default style.
    #[must_use]
    pub fn new(axis_type: AxisType) -> Self {
        Self::build(axis_type, HeuristicTextMeasurer, AxisStyleConfig::default())
    }
}

impl<M: TextMeasurer> Axis<M> {
    pub fn with_measurer(axis_type: AxisType, measurer: M, style: AxisStyleConfig) -> AxisResult<Self> {
        style.validate()?;
        Ok(Self::build(axis_type, measurer, style))
    }

    fn build(axis_type: AxisType, measurer: M, style: AxisStyleConfig) -> Self {
        Self {
            axis_type,
            measurer,
            style,
            points: Vec::new(),
            custom_labels: BTreeMap::new(),
            tick_marks: Vec::new(),
            custom_tick_marks: Vec::new(),
            brackets: Vec::new(),
            range: AxisRange::default(),
            tick_interval: 1.0,
            date_range: None,
            endpoints: None,
            label_offset: 0.0,
            scaling: 1.0,
            dpi_scale: 1.0,
            label_scaling: 1.0,
            label_orientation: LabelOrientation::default(),
            parallel_alignment: ParallelLabelAlignment::default(),
            perpendicular_alignment: PerpendicularLabelAlignment::default(),
            label_display: LabelDisplay::default(),
            stack_labels: false,
            auto_stacking: axis_type.is_horizontal(),
            double_sided_labels: false,
            showing_labels: true,
            showing_outer_labels: true,
            start_at_zero: false,
            free_floating: false,
            anchoring: Anchoring::default(),
            title: Label::default(),
            header: Label::default(),
            footer: Label::default(),
            max_width: None,
            max_height: None,
            generation: 0,
            extent_cache: RefCell::new(LabelExtentCache::default()),
        }
    }

    /// Marks every cached label extent stale.
    pub(crate) fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    #[must_use]
    pub fn axis_type(&self) -> AxisType {
        self.axis_type
    }

    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.axis_type.is_vertical()
    }

    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.axis_type.is_horizontal()
    }

    #[must_use]
    pub fn style(&self) -> &AxisStyleConfig {
        &self.style
    }

    pub fn set_style(&mut self, style: AxisStyleConfig) -> AxisResult<()> {
        style.validate()?;
        self.style = style;
        self.touch();
        Ok(())
    }

    #[must_use]
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    #[must_use]
    pub fn font(&self) -> &FontSpec {
        &self.style.font
    }

    pub fn set_font(&mut self, font: FontSpec) {
        self.style.font = font;
        self.touch();
    }

    #[must_use]
    pub fn points(&self) -> &[AxisPoint] {
        &self.points
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn tick_marks(&self) -> &[TickMark] {
        &self.tick_marks
    }

    #[must_use]
    pub fn custom_tick_marks(&self) -> &[TickMark] {
        &self.custom_tick_marks
    }

    #[must_use]
    pub fn brackets(&self) -> &[AxisBracket] {
        &self.brackets
    }

    #[must_use]
    pub fn tick_interval(&self) -> f64 {
        self.tick_interval
    }

    pub fn set_tick_interval(&mut self, interval: f64) -> AxisResult<()> {
        if !interval.is_finite() || interval <= 0.0 {
            warn!(interval, "rejected tick interval");
            return Err(AxisError::InvalidData(
                "tick interval must be finite and > 0".to_owned(),
            ));
        }
        self.tick_interval = interval;
        self.refresh_placement();
        Ok(())
    }

    /// Physical endpoints, ordered top/left first. `None` until placed.
    #[must_use]
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        self.endpoints
    }

    /// Pixel distance between consecutive axis points.
    #[must_use]
    pub fn label_physical_offset(&self) -> f64 {
        self.label_offset
    }

    #[must_use]
    pub fn scaling(&self) -> f64 {
        self.scaling
    }

    /// Sets the parent scaling and resets the label scaling to it.
    pub fn set_scaling(&mut self, scaling: f64) -> AxisResult<()> {
        validate_scale_factor(scaling, "scaling")?;
        self.scaling = scaling;
        self.label_scaling = scaling;
        Ok(())
    }

    #[must_use]
    pub fn dpi_scale(&self) -> f64 {
        self.dpi_scale
    }

    pub fn set_dpi_scale(&mut self, dpi_scale: f64) -> AxisResult<()> {
        validate_scale_factor(dpi_scale, "dpi scale")?;
        self.dpi_scale = dpi_scale;
        Ok(())
    }

    /// Font scaling applied to axis labels only, as chosen by label fitting.
    #[must_use]
    pub fn label_scaling(&self) -> f64 {
        self.label_scaling
    }

    pub fn set_label_scaling(&mut self, scaling: f64) -> AxisResult<()> {
        validate_scale_factor(scaling, "label scaling")?;
        self.label_scaling = scaling;
        Ok(())
    }

    #[must_use]
    pub fn label_orientation(&self) -> LabelOrientation {
        self.label_orientation
    }

    pub fn set_label_orientation(&mut self, orientation: LabelOrientation) {
        self.label_orientation = orientation;
        self.touch();
    }

    #[must_use]
    pub fn parallel_label_alignment(&self) -> ParallelLabelAlignment {
        self.parallel_alignment
    }

    pub fn set_parallel_label_alignment(&mut self, alignment: ParallelLabelAlignment) {
        self.parallel_alignment = alignment;
    }

    #[must_use]
    pub fn perpendicular_label_alignment(&self) -> PerpendicularLabelAlignment {
        self.perpendicular_alignment
    }

    pub fn set_perpendicular_label_alignment(&mut self, alignment: PerpendicularLabelAlignment) {
        self.perpendicular_alignment = alignment;
    }

    #[must_use]
    pub fn label_display(&self) -> LabelDisplay {
        self.label_display
    }

    pub fn set_label_display(&mut self, display: LabelDisplay) {
        self.label_display = display;
        self.touch();
    }

    #[must_use]
    pub fn is_stacking_labels(&self) -> bool {
        self.stack_labels
    }

    pub fn set_stack_labels(&mut self, stack: bool) {
        self.stack_labels = stack;
    }

    #[must_use]
    pub fn is_auto_stacking_enabled(&self) -> bool {
        self.auto_stacking
    }

    pub fn enable_auto_stacking(&mut self, enable: bool) {
        self.auto_stacking = enable;
    }

    #[must_use]
    pub fn has_double_sided_labels(&self) -> bool {
        self.double_sided_labels
    }

    pub fn set_double_sided_labels(&mut self, double_sided: bool) {
        self.double_sided_labels = double_sided;
    }

    #[must_use]
    pub fn is_showing_labels(&self) -> bool {
        self.showing_labels
    }

    pub fn show_labels(&mut self, show: bool) {
        self.showing_labels = show;
        self.touch();
    }

    /// Whether the first and last labels hang half outside the line.
    #[must_use]
    pub fn is_showing_outer_labels(&self) -> bool {
        self.showing_outer_labels
    }

    pub fn show_outer_labels(&mut self, show: bool) {
        self.showing_outer_labels = show;
    }

    #[must_use]
    pub fn is_starting_at_zero(&self) -> bool {
        self.start_at_zero
    }

    /// Numeric ranges set afterwards start at or below zero.
    pub fn start_at_zero(&mut self, start_at_zero: bool) {
        self.start_at_zero = start_at_zero;
    }

    /// Free-floating axes are positioned by their endpoints, not by a layout cell.
    #[must_use]
    pub fn is_free_floating(&self) -> bool {
        self.free_floating
    }

    pub fn set_free_floating(&mut self, free_floating: bool) {
        self.free_floating = free_floating;
    }

    #[must_use]
    pub fn anchoring(&self) -> Anchoring {
        self.anchoring
    }

    pub fn set_anchoring(&mut self, anchoring: Anchoring) {
        self.anchoring = anchoring;
    }

    #[must_use]
    pub fn title(&self) -> &Label {
        &self.title
    }

    pub fn set_title(&mut self, title: Label) {
        self.title = title;
    }

    #[must_use]
    pub fn header(&self) -> &Label {
        &self.header
    }

    pub fn set_header(&mut self, header: Label) {
        self.header = header;
    }

    #[must_use]
    pub fn footer(&self) -> &Label {
        &self.footer
    }

    pub fn set_footer(&mut self, footer: Label) {
        self.footer = footer;
    }

    #[must_use]
    pub fn tick_mark_display(&self) -> TickMarkDisplay {
        self.style.tick_mark_display
    }

    /// Changes the display of regular tick marks; custom tick marks keep their own.
    pub fn set_tick_mark_display(&mut self, display: TickMarkDisplay) {
        self.style.tick_mark_display = display;
        for tick in &mut self.tick_marks {
            tick.display = display;
        }
    }

    /// Ceilings recorded by [`Axis::set_bounding_box`].
    #[must_use]
    pub fn max_size(&self) -> (Option<f64>, Option<f64>) {
        (self.max_width, self.max_height)
    }

    /// Clears the requested group of state back to its defaults.
    pub fn reset(&mut self, level: AxisResetLevel) {
        let all = level == AxisResetLevel::AllSettings;
        if all || level == AxisResetLevel::CosmeticSettings {
            let defaults = AxisStyleConfig::default();
            self.style.font = defaults.font;
            self.style.font_color = defaults.font_color;
            self.style.axis_line_color = defaults.axis_line_color;
            self.style.axis_line_width = defaults.axis_line_width;
            self.perpendicular_alignment = PerpendicularLabelAlignment::default();
            self.parallel_alignment = ParallelLabelAlignment::default();
        }
        if all || level == AxisResetLevel::Brackets {
            self.brackets.clear();
        }
        if all || level == AxisResetLevel::TitleHeaderFooter {
            self.title = Label::default();
            self.header = Label::default();
            self.footer = Label::default();
        }
        if all || level == AxisResetLevel::RangeAndLabelValues {
            self.points.clear();
            self.custom_labels.clear();
            self.tick_marks.clear();
            self.custom_tick_marks.clear();
            self.label_offset = 0.0;
            self.range = AxisRange::default();
            self.tick_interval = 1.0;
            self.date_range = None;
            self.style.major_tick_length = AxisStyleConfig::default().major_tick_length;
            self.style.minor_tick_length = AxisStyleConfig::default().minor_tick_length;
        }
        if all {
            self.stack_labels = false;
            self.auto_stacking = self.axis_type.is_horizontal();
            self.range.reversed = false;
            self.start_at_zero = false;
            self.label_display = LabelDisplay::default();
            self.label_orientation = LabelOrientation::default();
            self.double_sided_labels = false;
            self.showing_labels = true;
            self.showing_outer_labels = true;
            self.style.label_line_length = AxisStyleConfig::default().label_line_length;
            self.style.tick_mark_display = AxisStyleConfig::default().tick_mark_display;
            self.max_width = None;
            self.max_height = None;
        }
        self.touch();
        debug!(?level, "reset axis");
    }

    /// Pixels for a length given in device-independent units.
    pub(crate) fn scale_to_screen(&self, value: f64) -> f64 {
        value * self.scaling * self.dpi_scale
    }
}

fn validate_scale_factor(value: f64, name: &str) -> AxisResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AxisError::InvalidData(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(())
}
