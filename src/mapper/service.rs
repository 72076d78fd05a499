//! Purpose: Provide the shared JSON conversion engine and its five entry points.
//! Exports: `Mapper`, `mapper`.
//! Role: Central seam for typed JSON reads/writes with defensive null handling.
//! Invariants: Missing input is never a failure; it logs a warning and yields an absent result.
//! Invariants: Conversion failures are logged and surfaced with their cause intact, except in
//! `read_value_as_map`, which swallows them by contract.

use std::collections::HashMap;
use std::fs::File;
use std::hash::Hash;
use std::io::BufReader;
use std::sync::OnceLock;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::mapper::encoding::{self, EncodingRules};
use crate::mapper::error::{Error, ErrorKind};

/// The shared JSON conversion engine.
///
/// Holds the process-wide [`EncodingRules`], so any temporal field using the
/// `compact_date`/`compact_datetime` adapters is rendered identically across
/// every conversion. Obtain it through [`mapper`]; the instance is built once
/// and shared for the lifetime of the process.
#[derive(Debug)]
pub struct Mapper {
    rules: &'static EncodingRules,
}

static MAPPER: OnceLock<Mapper> = OnceLock::new();

/// Shared mapper instance, built with its encoding rules on first use.
pub fn mapper() -> &'static Mapper {
    MAPPER.get_or_init(Mapper::new)
}

impl Mapper {
    fn new() -> Self {
        Self {
            rules: encoding::rules(),
        }
    }

    pub fn rules(&self) -> &'static EncodingRules {
        self.rules
    }

    /// Parse JSON text into a single typed value.
    ///
    /// Missing content is an absent result, not a failure. A parse failure is
    /// logged and returned with the underlying cause attached as `source()`.
    pub fn read_value<T: DeserializeOwned>(&self, content: Option<&str>) -> Result<Option<T>, Error> {
        let Some(content) = content else {
            warn!("skipping read: content is missing");
            return Ok(None);
        };

        match serde_json::from_str(content) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(error = %err, "json read failed");
                Err(Error::new(ErrorKind::Parse)
                    .with_message("json read failed")
                    .with_source(err))
            }
        }
    }

    /// Parse JSON text into an ordered list of typed values.
    pub fn read_value_list<T: DeserializeOwned>(
        &self,
        content: Option<&str>,
    ) -> Result<Option<Vec<T>>, Error> {
        let Some(content) = content else {
            warn!("skipping list read: content is missing");
            return Ok(None);
        };

        match serde_json::from_str(content) {
            Ok(values) => Ok(Some(values)),
            Err(err) => {
                warn!(error = %err, "json list read failed");
                Err(Error::new(ErrorKind::Parse)
                    .with_message("json list read failed")
                    .with_source(err))
            }
        }
    }

    /// Parse JSON text into a mapping of typed keys and values.
    ///
    /// Unlike the sibling readers, this operation never fails: a parse failure
    /// is logged (cause at warn, offending text at info) and resolved to an
    /// absent result. Callers must treat `None` as "could not parse". External
    /// callers depend on this asymmetry, so it is kept rather than unified
    /// with the propagating readers.
    pub fn read_value_as_map<K, V>(&self, content: Option<&str>) -> Option<HashMap<K, V>>
    where
        K: DeserializeOwned + Eq + Hash,
        V: DeserializeOwned,
    {
        let Some(content) = content else {
            warn!("skipping map read: content is missing");
            return None;
        };

        match serde_json::from_str(content) {
            Ok(map) => Some(map),
            Err(err) => {
                warn!(error = %err, "json map read failed");
                info!(content, "offending map payload");
                None
            }
        }
    }

    /// Parse a file into a generic JSON tree, for callers that do not know the
    /// target shape ahead of time.
    pub fn read_tree(&self, source: Option<File>) -> Result<Option<Value>, Error> {
        let Some(source) = source else {
            warn!("skipping tree read: source is missing");
            return Ok(None);
        };

        match serde_json::from_reader(BufReader::new(source)) {
            Ok(tree) => Ok(Some(tree)),
            Err(err) => {
                warn!(error = %err, "json tree read failed");
                Err(Error::new(ErrorKind::Parse)
                    .with_message("json tree read failed")
                    .with_source(err))
            }
        }
    }

    /// Serialize a typed value to JSON text using the shared encoding rules.
    pub fn write_value_as_string<T: Serialize>(
        &self,
        value: Option<&T>,
    ) -> Result<Option<String>, Error> {
        let Some(value) = value else {
            warn!("skipping write: value is missing");
            return Ok(None);
        };

        match serde_json::to_string(value) {
            Ok(text) => Ok(Some(text)),
            Err(err) => {
                warn!(error = %err, "json write failed");
                Err(Error::new(ErrorKind::Format)
                    .with_message("json write failed")
                    .with_source(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mapper;
    use crate::mapper::ErrorKind;
    use serde::{Deserialize, Serialize};
    use serde_json::{Value, json};
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Ticket {
        id: String,
        seats: u32,
    }

    #[test]
    fn read_value_parses_typed_object() {
        let ticket: Option<Ticket> = mapper()
            .read_value(Some(r#"{"id":"t-1","seats":2}"#))
            .expect("read");
        assert_eq!(
            ticket,
            Some(Ticket {
                id: "t-1".to_string(),
                seats: 2
            })
        );
    }

    #[test]
    fn missing_content_is_absent_not_failure() {
        let ticket: Option<Ticket> = mapper().read_value(None).expect("absent");
        assert!(ticket.is_none());

        let tickets: Option<Vec<Ticket>> = mapper().read_value_list(None).expect("absent");
        assert!(tickets.is_none());

        let map: Option<HashMap<String, u32>> = mapper().read_value_as_map(None);
        assert!(map.is_none());

        let tree = mapper().read_tree(None).expect("absent");
        assert!(tree.is_none());

        let text = mapper().write_value_as_string::<Ticket>(None).expect("absent");
        assert!(text.is_none());
    }

    #[test]
    fn malformed_content_propagates_for_object_and_list() {
        let err = mapper()
            .read_value::<Ticket>(Some("{invalid json"))
            .expect_err("object read should fail");
        assert_eq!(err.kind(), ErrorKind::Parse);

        let err = mapper()
            .read_value_list::<Ticket>(Some("[{invalid"))
            .expect_err("list read should fail");
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn malformed_content_is_swallowed_for_map() {
        let map: Option<HashMap<String, u32>> = mapper().read_value_as_map(Some("{invalid json"));
        assert!(map.is_none());
    }

    #[test]
    fn list_read_preserves_order() {
        let values: Option<Vec<u32>> = mapper()
            .read_value_list(Some("[3,1,2]"))
            .expect("list read");
        assert_eq!(values, Some(vec![3, 1, 2]));
    }

    #[test]
    fn map_read_ignores_key_order() {
        let left: HashMap<String, u32> = mapper()
            .read_value_as_map(Some(r#"{"a":1,"b":2}"#))
            .expect("map read");
        let right: HashMap<String, u32> = mapper()
            .read_value_as_map(Some(r#"{"b":2,"a":1}"#))
            .expect("map read");
        assert_eq!(left, right);
    }

    #[test]
    fn write_then_read_round_trips() {
        let ticket = Ticket {
            id: "t-9".to_string(),
            seats: 4,
        };
        let text = mapper()
            .write_value_as_string(Some(&ticket))
            .expect("write")
            .expect("text");
        let back: Ticket = mapper()
            .read_value(Some(&text))
            .expect("read")
            .expect("value");
        assert_eq!(back, ticket);
    }

    #[test]
    fn singleton_is_shared_and_rules_are_identical() {
        assert!(std::ptr::eq(mapper(), mapper()));
        assert!(std::ptr::eq(mapper().rules(), mapper().rules()));
    }

    #[test]
    fn generic_value_read_needs_no_target_shape() {
        let tree: Value = json!({"kind": "untyped", "n": 1});
        let text = serde_json::to_string(&tree).expect("encode");
        let parsed: Option<Value> = mapper().read_value(Some(&text)).expect("read");
        assert_eq!(parsed, Some(tree));
    }
}
