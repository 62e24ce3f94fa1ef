//! Inspection of transaction effects returned by sponsored execution.
//!
//! The only question the client ever asks of effects is "what objects did
//! this transaction create" (to recover a freshly created room or position
//! id). Backends differ in how they shape the created list, so extraction
//! probes the known shapes and skips anything unparsable.

use serde_json::Value;
use tanda_types::ObjectId;

/// Object ids created by a transaction, read from its effects object.
///
/// Accepts entries shaped as `{"reference": {"objectId": "0x.."}}`,
/// `{"objectId": "0x.."}`, or a bare id string. Entries that fit none of
/// these, or whose id does not parse, are skipped.
pub fn created_object_ids(effects: &Value) -> Vec<ObjectId> {
    let Some(created) = effects.get("created").and_then(Value::as_array) else {
        return Vec::new();
    };

    created
        .iter()
        .filter_map(|entry| {
            entry
                .get("reference")
                .and_then(|r| r.get("objectId"))
                .or_else(|| entry.get("objectId"))
                .or(Some(entry))
                .and_then(Value::as_str)
        })
        .filter_map(|s| s.parse().ok())
        .collect()
}
