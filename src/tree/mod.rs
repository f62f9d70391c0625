//! Collapsible tree rendering of structured-data records
//!
//! Each record becomes an accordion section. Properties are rendered
//! depth-first: scalars, nulls and lists of scalars as leaves, nested objects
//! and other lists as branches whose children are shown only while the
//! branch is expanded. Expand flags live in an [`ExpandState`] keyed by
//! [`NodePath`], so each node toggles independently.

pub mod path;
pub mod render;
pub mod state;
pub mod text;
pub mod value;

pub use path::{NodePath, PathSegment, RecordNodePath};
pub use render::{Line, RenderConfig, SeparatorKind, TreeRenderer, NESTED_DEPTH_STEP};
pub use state::{ExpandPolicy, ExpandState};
pub use text::{to_text, write_text};
pub use value::{format_display_value, ValueKind};
