//! chart-axis: axis geometry and label layout for statistical charts.
//!
//! An [`Axis`] turns a numeric or calendar range into evenly spaced points,
//! places them between two pixel endpoints, maps values to coordinates and
//! back, shrinks or stacks labels that would overlap, and reports the pixel
//! footprint a host layout must reserve. Drawing goes through the backend
//! agnostic [`render::Renderer`] contract.

pub mod axis;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use axis::{Axis, AxisStyleConfig, AxisType};
pub use error::{AxisError, AxisResult};
