//! Composite keys for the flat world state.
//!
//! Every record lives under `<namespace>.<typeName>#<id>` and every per-type
//! counter under `<namespace>.<typeName>.index`. The separators `.` and `#`
//! are reserved: type names and ids may contain neither, and a namespace may
//! not contain `#`. That keeps the mapping injective and lets [`KeySpace::parse`]
//! split a key unambiguously from the right.

use thiserror::Error;

const TYPE_SEPARATOR: char = '.';
const ID_SEPARATOR: char = '#';
const COUNTER_SUFFIX: &str = "index";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("{segment} segment must not be empty")]
    Empty { segment: &'static str },

    #[error("{segment} segment '{value}' contains reserved separator '{separator}'")]
    ReservedSeparator {
        segment: &'static str,
        value: String,
        separator: char,
    },

    #[error("key '{0}' does not belong to this key space")]
    Foreign(String),
}

/// A key decoded by [`KeySpace::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedKey {
    Entity { type_name: String, id: String },
    Counter { type_name: String },
}

/// Builds and parses the composite keys of one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpace {
    namespace: String,
}

impl KeySpace {
    pub fn new(namespace: impl Into<String>) -> Result<Self, KeyError> {
        let namespace = namespace.into();
        check_segment("namespace", &namespace, &[ID_SEPARATOR])?;
        Ok(Self { namespace })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key of the record `id` of type `type_name`.
    pub fn entity_key(&self, type_name: &str, id: &str) -> Result<String, KeyError> {
        check_segment("type name", type_name, &[TYPE_SEPARATOR, ID_SEPARATOR])?;
        check_segment("id", id, &[TYPE_SEPARATOR, ID_SEPARATOR])?;
        Ok(format!(
            "{}{TYPE_SEPARATOR}{type_name}{ID_SEPARATOR}{id}",
            self.namespace
        ))
    }

    /// Key of the identifier counter of `type_name`.
    pub fn counter_key(&self, type_name: &str) -> Result<String, KeyError> {
        check_segment("type name", type_name, &[TYPE_SEPARATOR, ID_SEPARATOR])?;
        Ok(format!(
            "{}{TYPE_SEPARATOR}{type_name}{TYPE_SEPARATOR}{COUNTER_SUFFIX}",
            self.namespace
        ))
    }

    /// Decode a key produced by this key space.
    pub fn parse(&self, key: &str) -> Result<ParsedKey, KeyError> {
        let foreign = || KeyError::Foreign(key.to_string());
        let rest = key
            .strip_prefix(self.namespace.as_str())
            .and_then(|r| r.strip_prefix(TYPE_SEPARATOR))
            .ok_or_else(foreign)?;

        if let Some((type_name, id)) = rest.split_once(ID_SEPARATOR) {
            self.entity_key(type_name, id).map_err(|_| foreign())?;
            return Ok(ParsedKey::Entity {
                type_name: type_name.to_string(),
                id: id.to_string(),
            });
        }

        match rest.split_once(TYPE_SEPARATOR) {
            Some((type_name, COUNTER_SUFFIX)) if !type_name.is_empty() => Ok(ParsedKey::Counter {
                type_name: type_name.to_string(),
            }),
            _ => Err(foreign()),
        }
    }
}

fn check_segment(segment: &'static str, value: &str, reserved: &[char]) -> Result<(), KeyError> {
    if value.is_empty() {
        return Err(KeyError::Empty { segment });
    }
    if let Some(separator) = value.chars().find(|c| reserved.contains(c)) {
        return Err(KeyError::ReservedSeparator {
            segment,
            value: value.to_string(),
            separator,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyspace() -> KeySpace {
        KeySpace::new("sample.PreciousCargoChaincode").unwrap()
    }

    #[test]
    fn builds_entity_and_counter_keys() {
        let ks = keyspace();
        assert_eq!(
            ks.entity_key("Shipment", "0000000001").unwrap(),
            "sample.PreciousCargoChaincode.Shipment#0000000001"
        );
        assert_eq!(
            ks.counter_key("Shipment").unwrap(),
            "sample.PreciousCargoChaincode.Shipment.index"
        );
    }

    #[test]
    fn rejects_reserved_separators_and_empty_segments() {
        let ks = keyspace();
        assert!(matches!(
            ks.entity_key("Ship.ment", "1"),
            Err(KeyError::ReservedSeparator { separator: '.', .. })
        ));
        assert!(matches!(
            ks.entity_key("Shipment", "00#1"),
            Err(KeyError::ReservedSeparator { separator: '#', .. })
        ));
        assert!(matches!(ks.counter_key(""), Err(KeyError::Empty { .. })));
        assert!(matches!(KeySpace::new("ns#1"), Err(KeyError::ReservedSeparator { .. })));
        assert!(matches!(KeySpace::new(""), Err(KeyError::Empty { .. })));
    }

    #[test]
    fn distinct_type_and_id_pairs_never_collide() {
        let ks = keyspace();
        let a = ks.entity_key("trackingDataPoint[0000000001]", "0000000002").unwrap();
        let b = ks.entity_key("trackingDataPoint[0000000002]", "0000000001").unwrap();
        let counter = ks.counter_key("trackingDataPoint[0000000001]").unwrap();
        assert_ne!(a, b);
        assert_ne!(a, counter);
    }

    #[test]
    fn parse_inverts_key_construction() {
        let ks = keyspace();
        let key = ks.entity_key("trackingDataPoint[0000000007]", "0000000003").unwrap();
        assert_eq!(
            ks.parse(&key).unwrap(),
            ParsedKey::Entity {
                type_name: "trackingDataPoint[0000000007]".to_string(),
                id: "0000000003".to_string(),
            }
        );
        let counter = ks.counter_key("ShipmentCo").unwrap();
        assert_eq!(
            ks.parse(&counter).unwrap(),
            ParsedKey::Counter {
                type_name: "ShipmentCo".to_string()
            }
        );
    }

    #[test]
    fn parse_rejects_foreign_keys() {
        let ks = keyspace();
        for key in [
            "other.ns.Shipment#0000000001",
            "sample.PreciousCargoChaincode.Shipment",
            "sample.PreciousCargoChaincode.Shipment.counter",
            "sample.PreciousCargoChaincode.Shipment#",
        ] {
            assert!(matches!(ks.parse(key), Err(KeyError::Foreign(_))), "{key}");
        }
    }
}
