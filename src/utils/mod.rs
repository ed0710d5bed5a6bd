//! Utility functions and helpers
//!
//! This module contains raw record access, JSON decoding, and UTC
//! timestamp bucketing used by the record types.

pub mod raw;
pub mod serialization;
pub mod time;

pub use raw::{raw_record, RawFields, RawRecord};
pub use serialization::{load_raw_records, raw_record_from_json, raw_records_from_json_str};
pub use time::UtcTimestamp;
