//! Asymmetric serde codec for document editor lists.
//!
//! # Design
//! The server's wire contract for `settings.editors` is asymmetric: editors
//! are *submitted* as bare username strings but *returned* as full creator
//! profiles. The [`editor_list`] module preserves that asymmetry — writing a
//! [`Creator`] emits only its username, reading reconstructs the full record.

use serde::de::Deserializer;
use serde::ser::{SerializeSeq, Serializer};
use serde::Deserialize;
use serde_json::Value;

use crate::types::Creator;

/// Use with `#[serde(with = "editor_list")]` on a `Vec<Creator>` field.
pub mod editor_list {
    use super::*;

    /// Writes each editor as a bare JSON string — its username.
    pub fn serialize<S>(editors: &[Creator], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(editors.len()))?;
        for editor in editors {
            seq.serialize_element(&editor.username)?;
        }
        seq.end()
    }

    /// Reads each element as a full creator object. Elements missing any of
    /// the required fields (`id`, `documents_made`, `username`, `flags`)
    /// yield no creator and are dropped from the list; `icon` is optional.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Creator>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<Value>::deserialize(deserializer)?;
        Ok(raw.into_iter().filter_map(creator_from_value).collect())
    }
}

fn creator_from_value(value: Value) -> Option<Creator> {
    let object = value.as_object()?;
    Some(Creator {
        id: object.get("id")?.as_str()?.to_string(),
        documents_made: object.get("documents_made")?.as_u64()?,
        username: object.get("username")?.as_str()?.to_string(),
        flags: object.get("flags")?.as_u64()?,
        icon: object
            .get("icon")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}
