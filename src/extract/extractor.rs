use crate::error::ExtractError;
use crate::extract::blob::RawBlob;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding a JSON-LD graph collection
pub const GRAPH_KEY: &str = "@graph";

/// A top-level structured-data record - one schema object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Record(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// All fields in document order, metadata keys included
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Configuration for record extraction
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Key whose sequence value is unwrapped into individual records
    pub graph_key: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            graph_key: String::from(GRAPH_KEY),
        }
    }
}

/// Turns a batch of raw blobs into a flat, ordered list of records
pub struct RecordExtractor {
    config: ExtractConfig,
}

impl RecordExtractor {
    pub fn new(config: ExtractConfig) -> Self {
        RecordExtractor { config }
    }

    /// Extract records from a batch of blobs.
    ///
    /// Fails on the first blob that does not parse; nothing from the batch is
    /// returned in that case.
    pub fn extract<I>(&self, blobs: I) -> Result<Vec<Record>, ExtractError>
    where
        I: IntoIterator<Item = RawBlob>,
    {
        let mut records = Vec::new();

        for (index, blob) in blobs.into_iter().enumerate() {
            let value = blob
                .into_value()
                .map_err(|source| ExtractError::Malformed { index, source })?;
            self.collect_records(value, index, &mut records);
        }

        Ok(records)
    }

    fn collect_records(&self, value: Value, index: usize, records: &mut Vec<Record>) {
        let Value::Object(mut obj) = value else {
            debug!("blob {}: skipping non-object value", index);
            return;
        };

        if let Some(Value::Array(graph)) = obj.get_mut(&self.config.graph_key) {
            let graph = std::mem::take(graph);
            debug!("blob {}: expanding graph of {} entries", index, graph.len());

            // Only the graph's direct elements become records
            for (pos, item) in graph.into_iter().enumerate() {
                match item {
                    Value::Object(fields) => records.push(Record(fields)),
                    _ => debug!("blob {}: skipping non-object graph entry {}", index, pos),
                }
            }
            return;
        }

        records.push(Record(obj));
    }
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new(ExtractConfig::default())
    }
}

/// Extract records from a batch using the default configuration
pub fn extract<I>(blobs: I) -> Result<Vec<Record>, ExtractError>
where
    I: IntoIterator<Item = RawBlob>,
{
    RecordExtractor::default().extract(blobs)
}
