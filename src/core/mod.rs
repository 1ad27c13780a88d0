pub mod number_format;
pub mod scale;
pub mod text;
pub mod time;
pub mod types;

pub use number_format::{NumberLocale, format_axis_number};
pub use scale::{LinearSegment, NiceRange, nice_range, values_match};
pub use text::{FontSpec, HeuristicTextMeasurer, TextMeasurer, split_text_to_fit_length};
pub use time::{DateInterval, FiscalYear, WeekStart};
pub use types::{Anchoring, Point, Rect, Size};
