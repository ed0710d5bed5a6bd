// JSON decoding layer: explorer/node responses into flat raw records
use crate::error::{EconomicsError, Result};
use crate::utils::raw::RawRecord;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Flatten one JSON object into a `RawRecord`.
///
/// Strings are kept verbatim, numbers and booleans are stringified, `null` drops
/// the key (reads as absent), nested arrays/objects are kept as compact JSON.
pub fn raw_record_from_json(value: &Value) -> Result<RawRecord> {
    let object = value.as_object().ok_or_else(|| {
        EconomicsError::Serialization(format!("Expected a JSON object, got: {value}"))
    })?;

    let mut record = RawRecord::with_capacity(object.len());
    for (key, field) in object {
        let text = match field {
            Value::Null => continue,
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            nested => nested.to_string(),
        };
        record.insert(key.clone(), text);
    }
    Ok(record)
}

/// Decode a single object, an array of objects, or an explorer envelope `{"result": [...]}`
pub fn raw_records_from_json_str(json: &str) -> Result<Vec<RawRecord>> {
    let value: Value = serde_json::from_str(json)?;

    let payload = match value {
        Value::Object(ref map) if map.contains_key("result") => &map["result"],
        ref other => other,
    };

    match payload {
        Value::Array(items) => items.iter().map(raw_record_from_json).collect(),
        Value::Object(_) => Ok(vec![raw_record_from_json(payload)?]),
        other => Err(EconomicsError::Serialization(format!(
            "Expected an object or an array of objects, got: {other}"
        ))),
    }
}

pub fn load_raw_records<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let contents = fs::read_to_string(path.as_ref())?;
    let records = raw_records_from_json_str(&contents)?;
    log::debug!(
        "Loaded {} raw record(s) from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_object() {
        let value = json!({
            "hash": "0xabc",
            "number": "0x10",
            "confirmations": 12,
            "isPending": false,
            "contractAddress": null,
            "uncles": ["0x1", "0x2"]
        });

        let record = raw_record_from_json(&value).unwrap();
        assert_eq!(record["hash"], "0xabc");
        assert_eq!(record["confirmations"], "12");
        assert_eq!(record["isPending"], "false");
        assert!(!record.contains_key("contractAddress"));
        assert_eq!(record["uncles"], r#"["0x1","0x2"]"#);
    }

    #[test]
    fn test_decode_shapes() {
        let single = raw_records_from_json_str(r#"{"hash": "0x1"}"#).unwrap();
        assert_eq!(single.len(), 1);

        let list = raw_records_from_json_str(r#"[{"hash": "0x1"}, {"hash": "0x2"}]"#).unwrap();
        assert_eq!(list.len(), 2);

        let envelope = raw_records_from_json_str(
            r#"{"status": "1", "message": "OK", "result": [{"hash": "0x1"}]}"#,
        )
        .unwrap();
        assert_eq!(envelope.len(), 1);
        assert_eq!(envelope[0]["hash"], "0x1");
    }

    #[test]
    fn test_decode_invalid_data() {
        assert!(raw_records_from_json_str("not json").is_err());
        assert!(matches!(
            raw_records_from_json_str("[1, 2]"),
            Err(EconomicsError::Serialization(_))
        ));
        assert!(raw_records_from_json_str(r#""text""#).is_err());
    }
}
