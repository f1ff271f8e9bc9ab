//! iCalendar rendering.

mod encode;
mod escape;
mod fold;
mod render;

pub use encode::{encode_duration, encode_utc_offset};
pub use escape::{escape_param_value, escape_text};
pub use fold::{DEFAULT_FOLD_INDENT, MAX_LINE_OCTETS, fold_line, fold_line_with_indent};
pub use render::{FoldIndent, RenderOptions, append_components, append_properties};
