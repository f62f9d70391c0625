//! Recursive tree rendering of a single record
//!
//! The renderer walks a record depth-first and emits a flat list of
//! [`Line`]s: a section header, then one line per visible node, each
//! followed by a trailing separator. Collapsed branches contribute only
//! their own line. The output is a plain data model, so it can be written as
//! text, serialized, or asserted on directly.

use crate::extract::Record;
use crate::tree::path::{NodePath, PathSegment};
use crate::tree::state::{ExpandPolicy, ExpandState};
use crate::tree::value::{format_display_value, ValueKind};
use serde::Serialize;
use serde_json::{Map, Value};

/// Prefix marking metadata keys that are not listed as properties
pub const RESERVED_PREFIX: &str = "@";

/// Metadata key used as the section label
pub const TYPE_KEY: &str = "@type";

/// Depth increment from a branch to the nodes it contains.
///
/// Sequence elements do not get a level of their own: the properties of an
/// object inside a sequence sit at the same depth as the children of a
/// mapping branch would.
pub const NESTED_DEPTH_STEP: usize = 2;

/// Configuration for the tree renderer
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Keys with this prefix are hidden from the top-level property list
    pub reserved_prefix: String,

    /// Key whose value labels the record's section
    pub type_key: String,

    /// Initial expand state of branches that were never toggled
    pub expand_policy: ExpandPolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            reserved_prefix: String::from(RESERVED_PREFIX),
            type_key: String::from(TYPE_KEY),
            expand_policy: ExpandPolicy::default(),
        }
    }
}

/// Rule drawn after a node, or between two elements of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparatorKind {
    Node,
    Item,
}

/// One rendered row of the tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "line", rename_all = "snake_case")]
pub enum Line {
    /// Accordion header of a record section
    Header {
        index: usize,
        label: String,
        open: bool,
    },

    /// A label/value pair with no expand control
    Leaf {
        depth: usize,
        path: NodePath,
        key: String,
        kind: ValueKind,
        value: String,
    },

    /// A node with children behind a toggle
    Branch {
        depth: usize,
        path: NodePath,
        key: String,
        kind: ValueKind,
        summary: String,
        expanded: bool,
    },

    /// A scalar element of a sequence, shown without a label
    Item {
        depth: usize,
        path: NodePath,
        value: String,
    },

    Separator {
        depth: usize,
        kind: SeparatorKind,
    },
}

impl Line {
    pub fn path(&self) -> Option<&NodePath> {
        match self {
            Line::Leaf { path, .. } | Line::Branch { path, .. } | Line::Item { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}

/// Renders records into lines
#[derive(Debug, Clone, Default)]
pub struct TreeRenderer {
    config: RenderConfig,
}

impl TreeRenderer {
    pub fn new(config: RenderConfig) -> Self {
        TreeRenderer { config }
    }

    /// A fresh expand state using this renderer's policy
    pub fn new_state(&self) -> ExpandState {
        ExpandState::new(self.config.expand_policy)
    }

    /// Section label: the type key when it holds something, else `Schema N`
    pub fn label(&self, record: &Record, index: usize) -> String {
        match record.get(&self.config.type_key) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(value) if is_truthy(value) => format_display_value(Some(value)),
            _ => format!("Schema {}", index + 1),
        }
    }

    /// Displayable top-level properties, in document order
    pub fn properties<'r>(&self, record: &'r Record) -> impl Iterator<Item = (&'r String, &'r Value)> + 'r {
        let prefix = self.config.reserved_prefix.clone();
        record
            .fields()
            .filter(move |(key, _)| prefix.is_empty() || !key.starts_with(prefix.as_str()))
    }

    /// Locate the node at `path`, returning its canonical path, depth and value.
    ///
    /// Paths address nodes the way the renderer emits them: an object inside a
    /// sequence has no node of its own, so `offers/0/price` is one level below
    /// `offers`. A numeric segment that meets an object is read as a key, and
    /// the returned path spells it that way, matching the rendered [`Line`].
    pub fn node_at<'r>(&self, record: &'r Record, path: &NodePath) -> Option<(NodePath, usize, &'r Value)> {
        let mut segments = path.segments().iter();

        let first = segment_key(segments.next()?);
        if !self.config.reserved_prefix.is_empty() && first.starts_with(self.config.reserved_prefix.as_str()) {
            return None;
        }

        let mut value = record.get(&first)?;
        let mut resolved = NodePath::root().key(first);
        let mut depth = 0;

        while let Some(segment) = segments.next() {
            match (value, segment) {
                (Value::Object(fields), segment) => {
                    let key = segment_key(segment);
                    value = fields.get(&key)?;
                    resolved = resolved.key(key);
                }
                (Value::Array(items), PathSegment::Index(idx)) => {
                    let item = items.get(*idx)?;
                    resolved = resolved.index(*idx);
                    value = match item {
                        Value::Object(fields) => {
                            let key = segment_key(segments.next()?);
                            let field = fields.get(&key)?;
                            resolved = resolved.key(key);
                            field
                        }
                        other => other,
                    };
                }
                _ => return None,
            }
            depth += NESTED_DEPTH_STEP;
        }

        Some((resolved, depth, value))
    }

    /// Render one record as a section. A closed section is just its header.
    pub fn render_record(
        &self,
        record: &Record,
        index: usize,
        open: bool,
        state: &ExpandState,
    ) -> Vec<Line> {
        let mut lines = Vec::new();
        self.render_record_into(record, index, open, state, &mut lines);
        lines
    }

    pub fn render_record_into(
        &self,
        record: &Record,
        index: usize,
        open: bool,
        state: &ExpandState,
        lines: &mut Vec<Line>,
    ) {
        lines.push(Line::Header {
            index,
            label: self.label(record, index),
            open,
        });

        if !open {
            return;
        }

        let root = NodePath::root();
        for (key, value) in self.properties(record) {
            self.render_node(key, value, root.key(key.as_str()), 0, state, lines);
        }
    }

    fn render_node(
        &self,
        key: &str,
        value: &Value,
        path: NodePath,
        depth: usize,
        state: &ExpandState,
        lines: &mut Vec<Line>,
    ) {
        let kind = ValueKind::classify(Some(value));

        if kind.is_leaf() {
            lines.push(Line::Leaf {
                depth,
                path,
                key: key.to_string(),
                kind,
                value: format_display_value(Some(value)),
            });
        } else {
            let expanded = state.is_expanded(&path, depth);
            lines.push(Line::Branch {
                depth,
                path: path.clone(),
                key: key.to_string(),
                kind,
                summary: branch_summary(value),
                expanded,
            });

            if expanded {
                match value {
                    Value::Array(items) => self.render_sequence(items, &path, depth, state, lines),
                    Value::Object(fields) => self.render_mapping(fields, &path, depth, state, lines),
                    _ => {}
                }
            }
        }

        lines.push(Line::Separator {
            depth,
            kind: SeparatorKind::Node,
        });
    }

    fn render_sequence(
        &self,
        items: &[Value],
        path: &NodePath,
        depth: usize,
        state: &ExpandState,
        lines: &mut Vec<Line>,
    ) {
        let child_depth = depth + NESTED_DEPTH_STEP;

        for (idx, item) in items.iter().enumerate() {
            let item_path = path.index(idx);

            match item {
                Value::Object(fields) => {
                    for (key, value) in fields {
                        self.render_node(key, value, item_path.key(key.as_str()), child_depth, state, lines);
                    }
                }
                Value::Array(_) => {
                    let label = format!("[{}]", idx);
                    self.render_node(&label, item, item_path, child_depth, state, lines);
                }
                scalar => lines.push(Line::Item {
                    depth: child_depth,
                    path: item_path,
                    value: format_display_value(Some(scalar)),
                }),
            }

            if idx + 1 < items.len() {
                lines.push(Line::Separator {
                    depth: child_depth,
                    kind: SeparatorKind::Item,
                });
            }
        }
    }

    fn render_mapping(
        &self,
        fields: &Map<String, Value>,
        path: &NodePath,
        depth: usize,
        state: &ExpandState,
        lines: &mut Vec<Line>,
    ) {
        for (key, value) in fields {
            self.render_node(key, value, path.key(key.as_str()), depth + NESTED_DEPTH_STEP, state, lines);
        }
    }
}

/// Object keys may be all digits, so an index segment can stand for a key
fn segment_key(segment: &PathSegment) -> String {
    match segment {
        PathSegment::Key(key) => key.clone(),
        PathSegment::Index(idx) => idx.to_string(),
    }
}

fn branch_summary(value: &Value) -> String {
    match value {
        Value::Array(items) => format!("Array ({} items)", items.len()),
        Value::Object(fields) => format!("Object ({} fields)", fields.len()),
        _ => String::new(),
    }
}

/// Falsy values (`null`, `false`, `0`, `""`) do not make a label
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
