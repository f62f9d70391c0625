//! Record extraction - normalize raw structured-data blobs into records
//!
//! Blobs arrive either as JSON text (typically the body of an
//! `application/ld+json` script tag) or as already-parsed values. The
//! extractor parses them, unwraps one level of `@graph` collections, and
//! returns the object-shaped records in input order.

pub mod blob;
pub mod extractor;
pub mod html;

pub use blob::RawBlob;
pub use extractor::{extract, ExtractConfig, Record, RecordExtractor};
pub use html::script_blobs;
