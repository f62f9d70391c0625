//! # Schema Lens - structured-data tree viewer
//!
//! Renders JSON-LD style schema markup as a collapsible tree: raw blobs are
//! normalized into records, and each record is rendered as a section of
//! independently expandable nodes with type-aware leaf formatting.
//!
//! ## Modules
//!
//! - **extract**: Parse blobs and flatten `@graph` wrappers into records
//! - **tree**: Classify values, format leaves and render records as lines
//! - **view**: A rendering session holding one batch and its expand state
//!
//! ## Quick Start
//!
//! ```rust
//! use schema_lens::extract::{extract, RawBlob};
//! use schema_lens::tree::{to_text, ExpandState, TreeRenderer};
//!
//! # fn main() -> anyhow::Result<()> {
//! let blobs = vec![RawBlob::from(
//!     r#"{"@type": "Product", "name": "Widget", "offers": [{"price": 10}, {"price": 20}]}"#,
//! )];
//!
//! let records = extract(blobs)?;
//! let renderer = TreeRenderer::default();
//! let lines = renderer.render_record(&records[0], 0, true, &ExpandState::default());
//!
//! let text = to_text(&lines);
//! assert!(text.starts_with("▾ Product"));
//! assert!(text.contains("Array (2 items)"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Interactive session
//!
//! ```rust
//! use schema_lens::{RawBlob, Rendered, SchemaView, ViewConfig};
//! use serde_json::json;
//!
//! let mut view = SchemaView::load(
//!     vec![RawBlob::from(json!({"@type": "Event", "location": {"name": "Hall"}}))],
//!     ViewConfig::default(),
//! );
//!
//! // Root branches start expanded; this collapses `location`
//! let expanded = view.toggle_node(0, &"location".parse().unwrap());
//! assert_eq!(expanded, Some(false));
//!
//! match view.render() {
//!     Rendered::Sections(lines) => assert_eq!(lines.len(), 3),
//!     Rendered::Error(message) => panic!("{}", message),
//! }
//! ```

pub mod error;
pub mod extract;
pub mod tree;
pub mod view;

// Re-export commonly used types for convenience
pub use error::{ExtractError, PathError};
pub use extract::{extract, script_blobs, ExtractConfig, RawBlob, Record, RecordExtractor};
pub use tree::{format_display_value, ExpandPolicy, ExpandState, Line, NodePath, RenderConfig, TreeRenderer, ValueKind};
pub use view::{Rendered, SchemaView, SectionMode, ViewConfig};
