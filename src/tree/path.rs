use crate::error::PathError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One step from a parent node to a child
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(&key.replace('~', "~0").replace('/', "~1")),
            PathSegment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// Stable address of a node, from the record root down
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<PathSegment>);

impl NodePath {
    pub fn root() -> Self {
        NodePath(Vec::new())
    }

    pub fn key(&self, key: impl Into<String>) -> Self {
        self.child(PathSegment::Key(key.into()))
    }

    pub fn index(&self, idx: usize) -> Self {
        self.child(PathSegment::Index(idx))
    }

    fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        NodePath(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = PathError;

    /// Parse `offers/1/price`.
    ///
    /// Inside a key `~1` stands for `/` and `~0` for `~`. All-digit segments
    /// parse as indices; [`TreeRenderer::node_at`](crate::tree::TreeRenderer::node_at)
    /// reads them as keys when they meet an object.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_matches('/');
        if s.is_empty() {
            return Err(PathError::Empty);
        }

        let segments = s
            .split('/')
            .map(|part| match part.parse::<usize>() {
                Ok(idx) => PathSegment::Index(idx),
                Err(_) => PathSegment::Key(part.replace("~1", "/").replace("~0", "~")),
            })
            .collect();

        Ok(NodePath(segments))
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A node address qualified by its record, written `RECORD:PATH` with a 1-based record number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordNodePath {
    /// Zero-based record position
    pub record: usize,
    pub path: NodePath,
}

impl FromStr for RecordNodePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (record, path) = s
            .split_once(':')
            .ok_or_else(|| PathError::MissingSeparator(s.to_string()))?;

        let record = match record.trim().parse::<usize>() {
            Ok(n) if n > 0 => n - 1,
            _ => return Err(PathError::InvalidRecord(record.to_string())),
        };

        Ok(RecordNodePath {
            record,
            path: path.parse()?,
        })
    }
}
