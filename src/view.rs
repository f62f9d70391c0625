//! Rendering session over one input batch
//!
//! A [`SchemaView`] owns the records extracted from the current batch, one
//! [`ExpandState`] per record and the accordion state of the record
//! sections. Loading a new batch throws all of that away.

use crate::error::ExtractError;
use crate::extract::{ExtractConfig, RawBlob, Record, RecordExtractor};
use crate::tree::{to_text, ExpandState, Line, NodePath, RenderConfig, TreeRenderer, ValueKind};
use log::{debug, warn};
use serde::Serialize;

/// Configuration for a view session
#[derive(Debug, Clone, Default)]
pub struct ViewConfig {
    pub extract: ExtractConfig,
    pub render: RenderConfig,
}

/// How record sections open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectionMode {
    /// At most one section open at a time
    #[default]
    Accordion,
    /// Every section open
    AllOpen,
}

/// What the view currently shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rendered {
    /// The batch was rejected; this message replaces the tree
    Error(String),
    Sections(Vec<Line>),
}

impl Rendered {
    pub fn to_text(&self) -> String {
        match self {
            Rendered::Error(message) => format!("{}\n", message),
            Rendered::Sections(lines) => to_text(lines),
        }
    }
}

pub struct SchemaView {
    extractor: RecordExtractor,
    renderer: TreeRenderer,
    batch: Result<Vec<Record>, ExtractError>,
    states: Vec<ExpandState>,
    open_section: Option<usize>,
    section_mode: SectionMode,
}

impl SchemaView {
    /// An empty view with no batch loaded
    pub fn new(config: ViewConfig) -> Self {
        SchemaView {
            extractor: RecordExtractor::new(config.extract),
            renderer: TreeRenderer::new(config.render),
            batch: Ok(Vec::new()),
            states: Vec::new(),
            open_section: None,
            section_mode: SectionMode::default(),
        }
    }

    pub fn load<I>(blobs: I, config: ViewConfig) -> Self
    where
        I: IntoIterator<Item = RawBlob>,
    {
        let mut view = Self::new(config);
        // A rejected batch is kept in the view and shown as its message
        let _ = view.replace_batch(blobs);
        view
    }

    /// Swap in a new batch, discarding all expand and accordion state.
    ///
    /// Returns the number of records extracted.
    pub fn replace_batch<I>(&mut self, blobs: I) -> Result<usize, &ExtractError>
    where
        I: IntoIterator<Item = RawBlob>,
    {
        self.batch = self.extractor.extract(blobs);

        let count = match &self.batch {
            Ok(records) => records.len(),
            Err(err) => {
                warn!("rejecting batch: {}", err);
                0
            }
        };
        debug!("loaded batch with {} records", count);

        self.states = (0..count).map(|_| self.renderer.new_state()).collect();
        self.open_section = if count > 0 { Some(0) } else { None };

        match &self.batch {
            Ok(_) => Ok(count),
            Err(err) => Err(err),
        }
    }

    pub fn records(&self) -> &[Record] {
        match &self.batch {
            Ok(records) => records,
            Err(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&ExtractError> {
        self.batch.as_ref().err()
    }

    pub fn set_section_mode(&mut self, mode: SectionMode) {
        self.section_mode = mode;
    }

    pub fn open_section(&self) -> Option<usize> {
        self.open_section
    }

    pub fn is_section_open(&self, index: usize) -> bool {
        match self.section_mode {
            SectionMode::AllOpen => index < self.records().len(),
            SectionMode::Accordion => self.open_section == Some(index),
        }
    }

    /// Open section `index`, or close it if it is the open one. Returns whether it is now open.
    pub fn toggle_section(&mut self, index: usize) -> bool {
        if index >= self.records().len() {
            return false;
        }

        self.open_section = if self.open_section == Some(index) {
            None
        } else {
            Some(index)
        };
        self.open_section == Some(index)
    }

    /// Flip the expand flag of one branch node.
    ///
    /// Returns the new flag, or `None` when the path does not name a branch
    /// in that record.
    pub fn toggle_node(&mut self, record: usize, path: &NodePath) -> Option<bool> {
        let records = self.batch.as_ref().ok()?;
        let (path, depth, value) = self.renderer.node_at(records.get(record)?, path)?;

        if !ValueKind::classify(Some(value)).is_branch() {
            return None;
        }

        let state = self.states.get_mut(record)?;
        Some(state.toggle(&path, depth))
    }

    pub fn expand_state(&self, record: usize) -> Option<&ExpandState> {
        self.states.get(record)
    }

    pub fn render(&self) -> Rendered {
        let records = match &self.batch {
            Ok(records) => records,
            Err(err) => return Rendered::Error(err.user_message().to_string()),
        };

        let mut lines = Vec::new();
        for (index, (record, state)) in records.iter().zip(&self.states).enumerate() {
            self.renderer
                .render_record_into(record, index, self.is_section_open(index), state, &mut lines);
        }

        Rendered::Sections(lines)
    }
}

impl Default for SchemaView {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ExpandPolicy;
    use serde_json::json;

    fn blobs() -> Vec<RawBlob> {
        vec![
            RawBlob::from(r#"{"@type": "Product", "name": "Widget", "offers": [{"price": 10}, {"price": 20}]}"#),
            RawBlob::from(json!({
                "@graph": [
                    {"@type": "Organization", "address": {"city": "Oslo"}, "founder": {"name": "Ada"}},
                    {"name": "untyped"}
                ]
            })),
        ]
    }

    fn headers(rendered: &Rendered) -> Vec<(String, bool)> {
        match rendered {
            Rendered::Sections(lines) => lines
                .iter()
                .filter_map(|line| match line {
                    Line::Header { label, open, .. } => Some((label.clone(), *open)),
                    _ => None,
                })
                .collect(),
            Rendered::Error(_) => Vec::new(),
        }
    }

    fn branch_expanded(rendered: &Rendered, key: &str) -> Option<bool> {
        let Rendered::Sections(lines) = rendered else {
            return None;
        };
        lines.iter().find_map(|line| match line {
            Line::Branch { key: k, expanded, .. } if k == key => Some(*expanded),
            _ => None,
        })
    }

    #[test]
    fn test_first_section_open_by_default() {
        let view = SchemaView::load(blobs(), ViewConfig::default());

        assert_eq!(view.records().len(), 3);
        assert_eq!(
            headers(&view.render()),
            vec![
                ("Product".to_string(), true),
                ("Organization".to_string(), false),
                ("Schema 3".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_accordion_keeps_one_section_open() {
        let mut view = SchemaView::load(blobs(), ViewConfig::default());

        assert!(view.toggle_section(1));
        assert_eq!(view.open_section(), Some(1));
        assert!(!view.is_section_open(0));

        assert!(!view.toggle_section(1));
        assert_eq!(view.open_section(), None);

        assert!(!view.toggle_section(7));
    }

    #[test]
    fn test_all_open_mode() {
        let mut view = SchemaView::load(blobs(), ViewConfig::default());
        view.set_section_mode(SectionMode::AllOpen);

        assert!(headers(&view.render()).iter().all(|(_, open)| *open));
    }

    #[test]
    fn test_toggle_node_is_independent() {
        let mut view = SchemaView::load(blobs(), ViewConfig::default());
        view.set_section_mode(SectionMode::AllOpen);

        assert_eq!(view.toggle_node(1, &"address".parse().unwrap()), Some(false));

        let rendered = view.render();
        assert_eq!(branch_expanded(&rendered, "address"), Some(false));
        assert_eq!(branch_expanded(&rendered, "founder"), Some(true));
        assert_eq!(branch_expanded(&rendered, "offers"), Some(true));
    }

    #[test]
    fn test_toggle_node_by_numeric_and_slashed_keys() {
        let mut view = SchemaView::load(
            vec![RawBlob::from(json!({
                "years": {"2024": {"a": 1}},
                "a/b": {"x": 1}
            }))],
            ViewConfig::default(),
        );

        // Deeper branches start collapsed; the parsed path must hit the rendered node
        assert_eq!(view.toggle_node(0, &"years/2024".parse().unwrap()), Some(true));
        assert_eq!(view.toggle_node(0, &"a~1b".parse().unwrap()), Some(false));

        let rendered = view.render();
        assert_eq!(branch_expanded(&rendered, "2024"), Some(true));
        assert_eq!(branch_expanded(&rendered, "a/b"), Some(false));
    }

    #[test]
    fn test_toggle_node_rejects_leaves_and_unknown_paths() {
        let mut view = SchemaView::load(blobs(), ViewConfig::default());

        assert_eq!(view.toggle_node(0, &"name".parse().unwrap()), None);
        assert_eq!(view.toggle_node(0, &"nope".parse().unwrap()), None);
        assert_eq!(view.toggle_node(9, &"offers".parse().unwrap()), None);
    }

    #[test]
    fn test_malformed_batch_shows_single_message() {
        let view = SchemaView::load(
            vec![RawBlob::from(r#"{"@type": "A"}"#), RawBlob::from("{oops")],
            ViewConfig::default(),
        );

        assert!(view.records().is_empty());
        assert_eq!(view.error().map(|e| e.blob_index()), Some(1));
        assert_eq!(view.render(), Rendered::Error("Invalid JSON format".to_string()));
        assert_eq!(view.render().to_text(), "Invalid JSON format\n");
    }

    #[test]
    fn test_replace_batch_resets_state() {
        let mut view = SchemaView::load(blobs(), ViewConfig::default());
        view.toggle_section(2);
        view.toggle_node(0, &"offers".parse().unwrap());

        let count = view.replace_batch(blobs()).unwrap();

        assert_eq!(count, 3);
        assert_eq!(view.open_section(), Some(0));
        assert_eq!(branch_expanded(&view.render(), "offers"), Some(true));
    }

    #[test]
    fn test_recovers_after_bad_batch() {
        let mut view = SchemaView::default();
        assert!(view.replace_batch(vec![RawBlob::from("[")]).is_err());

        assert_eq!(view.replace_batch(blobs()).ok(), Some(3));
        assert!(view.error().is_none());
    }

    #[test]
    fn test_policy_comes_from_config() {
        let config = ViewConfig {
            render: RenderConfig {
                expand_policy: ExpandPolicy::AllCollapsed,
                ..RenderConfig::default()
            },
            ..ViewConfig::default()
        };
        let view = SchemaView::load(blobs(), config);

        assert_eq!(branch_expanded(&view.render(), "offers"), Some(false));
        assert_eq!(view.expand_state(0).map(|s| s.policy()), Some(ExpandPolicy::AllCollapsed));
    }

    #[test]
    fn test_empty_batch() {
        let view = SchemaView::load(Vec::new(), ViewConfig::default());

        assert_eq!(view.open_section(), None);
        assert_eq!(view.render(), Rendered::Sections(Vec::new()));
    }
}
