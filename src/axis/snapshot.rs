use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Point, Rect, TextMeasurer};
use crate::error::{AxisError, AxisResult};

use super::{Axis, AxisRange, AxisType, DateRange, LabelExtentCacheStats, TickMarkDisplay};

pub const AXIS_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisPointSnapshot {
    pub value: f64,
    pub label: String,
    pub shown: bool,
    pub coordinate: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickMarkSnapshot {
    pub value: f64,
    pub coordinate: Option<f64>,
    pub line_length: f64,
    pub display: TickMarkDisplay,
    pub custom: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketSnapshot {
    pub start: f64,
    pub end: f64,
    pub label: String,
    pub coordinates: Option<(f64, f64, f64)>,
}

/// Serializable layout state used by regression tests and debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSnapshot {
    pub axis_type: AxisType,
    pub range: AxisRange,
    pub date_range: Option<DateRange>,
    pub endpoints: Option<(Point, Point)>,
    pub label_offset: f64,
    pub scaling: f64,
    pub label_scaling: f64,
    pub stacking_labels: bool,
    pub points: Vec<AxisPointSnapshot>,
    /// Custom label text keyed by the formatted value, in ascending value order.
    pub custom_labels: IndexMap<String, String>,
    pub tick_marks: Vec<TickMarkSnapshot>,
    pub brackets: Vec<BracketSnapshot>,
    pub bounding_box: Option<Rect>,
    pub label_cache: LabelExtentCacheStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: AxisSnapshot,
}

impl<M: TextMeasurer> Axis<M> {
    #[must_use]
    pub fn snapshot(&self) -> AxisSnapshot {
        let points = self
            .points
            .iter()
            .map(|point| AxisPointSnapshot {
                value: point.value(),
                label: point.display_label().to_owned(),
                shown: point.is_shown(),
                coordinate: point.physical_coordinate(),
            })
            .collect();
        let custom_labels = self
            .custom_labels()
            .map(|(value, label)| (value.to_string(), label.text.clone()))
            .collect();
        let regular = self.tick_marks.iter().map(|tick| (tick, false));
        let custom = self.custom_tick_marks.iter().map(|tick| (tick, true));
        let tick_marks = regular
            .chain(custom)
            .map(|(tick, custom)| TickMarkSnapshot {
                value: tick.value,
                coordinate: tick.physical_coordinate,
                line_length: tick.line_length,
                display: tick.display,
                custom,
            })
            .collect();
        let brackets = self
            .brackets
            .iter()
            .map(|bracket| BracketSnapshot {
                start: bracket.start,
                end: bracket.end,
                label: bracket.label.text.clone(),
                coordinates: bracket.physical_coordinates(),
            })
            .collect();
        let bounding_box = self.bounding_box();

        AxisSnapshot {
            axis_type: self.axis_type,
            range: self.range,
            date_range: self.date_range,
            endpoints: self.endpoints,
            label_offset: self.label_offset,
            scaling: self.scaling,
            label_scaling: self.label_scaling,
            stacking_labels: self.stack_labels,
            points,
            custom_labels,
            tick_marks,
            brackets,
            bounding_box,
            label_cache: self.label_extent_cache_stats(),
        }
    }

    pub fn snapshot_json_pretty(&self) -> AxisResult<String> {
        self.snapshot().to_json_pretty()
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> AxisResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}

impl AxisSnapshot {
    pub fn to_json_pretty(&self) -> AxisResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AxisError::InvalidData(format!("failed to serialize axis snapshot: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> AxisResult<String> {
        let payload = AxisSnapshotJsonContractV1 {
            schema_version: AXIS_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            AxisError::InvalidData(format!("failed to serialize axis snapshot contract v1: {e}"))
        })
    }

    /// Accepts both a bare snapshot and a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> AxisResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<AxisSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: AxisSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            AxisError::InvalidData(format!("failed to parse axis snapshot json payload: {e}"))
        })?;
        if payload.schema_version != AXIS_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(AxisError::InvalidData(format!(
                "unsupported axis snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
