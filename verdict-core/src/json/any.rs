//! Decoding when the shape is not known up front

use std::fmt;

use serde::de::{self, DeserializeSeed, MapAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use super::container::{finish, read_parts, Container, ContainerRepr, Shape};
use super::fields::Context;
use crate::error_info::ErrorInfo;
use crate::outcome::{Outcome, OutcomeView, ValueOutcome};
use crate::status::Status;

/// An outcome of either shape, picked by the presence of `value`
#[derive(Debug, Clone, PartialEq)]
pub enum AnyOutcome {
    /// The document had no `value` property
    Valueless(Outcome),
    /// The document had a `value` property, kept as raw JSON
    Valued(ValueOutcome<Value>),
}

impl AnyOutcome {
    /// Shape of the decoded document
    pub fn shape(&self) -> Shape {
        match self {
            AnyOutcome::Valueless(_) => Outcome::shape(),
            AnyOutcome::Valued(_) => <ValueOutcome<Value>>::shape(),
        }
    }

    /// The raw value, if the document was valued and the value was not null
    pub fn value(&self) -> Option<&Value> {
        match self {
            AnyOutcome::Valueless(_) => None,
            AnyOutcome::Valued(outcome) => outcome.value(),
        }
    }

    /// Drop the value and keep status, errors and messages
    pub fn into_outcome(self) -> Outcome {
        match self {
            AnyOutcome::Valueless(outcome) => outcome,
            AnyOutcome::Valued(outcome) => outcome.into(),
        }
    }
}

impl OutcomeView for AnyOutcome {
    fn status(&self) -> &Status {
        match self {
            AnyOutcome::Valueless(outcome) => outcome.status(),
            AnyOutcome::Valued(outcome) => outcome.status(),
        }
    }

    fn errors(&self) -> &[ErrorInfo] {
        match self {
            AnyOutcome::Valueless(outcome) => outcome.errors(),
            AnyOutcome::Valued(outcome) => outcome.errors(),
        }
    }

    fn messages(&self) -> &[String] {
        match self {
            AnyOutcome::Valueless(outcome) => outcome.messages(),
            AnyOutcome::Valued(outcome) => outcome.messages(),
        }
    }

    fn first_error_message(&self) -> Option<&str> {
        match self {
            AnyOutcome::Valueless(outcome) => outcome.first_error_message(),
            AnyOutcome::Valued(outcome) => outcome.first_error_message(),
        }
    }
}

impl From<Outcome> for AnyOutcome {
    fn from(outcome: Outcome) -> Self {
        AnyOutcome::Valueless(outcome)
    }
}

impl From<ValueOutcome<Value>> for AnyOutcome {
    fn from(outcome: ValueOutcome<Value>) -> Self {
        AnyOutcome::Valued(outcome)
    }
}

pub(crate) struct AnyRepr<'a> {
    pub outcome: &'a AnyOutcome,
    pub ctx: &'a Context,
}

impl Serialize for AnyRepr<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.outcome {
            AnyOutcome::Valueless(container) => ContainerRepr {
                container,
                ctx: self.ctx,
            }
            .serialize(serializer),
            AnyOutcome::Valued(container) => ContainerRepr {
                container,
                ctx: self.ctx,
            }
            .serialize(serializer),
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AnySeed<'a> {
    pub ctx: &'a Context,
}

impl<'de> DeserializeSeed<'de> for AnySeed<'_> {
    type Value = AnyOutcome;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for AnySeed<'_> {
    type Value = AnyOutcome;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an outcome object")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        let parts = read_parts::<A, Value>(map, self.ctx, true)?;
        let valued = parts.value_present;
        let (status, errors, messages, value) = finish(parts);
        // A raw null carries nothing; the valued shape already records it.
        let value = value.filter(|value| !value.is_null());
        Ok(if valued {
            AnyOutcome::Valued(ValueOutcome::from_parts(status, errors, messages, value))
        } else {
            AnyOutcome::Valueless(Outcome::from_parts(status, errors, messages))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> AnyOutcome {
        AnySeed {
            ctx: Context::default_ref(),
        }
        .deserialize(value)
        .unwrap()
    }

    #[test]
    fn test_picks_shape_by_value_presence() {
        let valued = decode(json!({"value": [1, 2], "status": {"code": 200}}));
        assert!(matches!(valued, AnyOutcome::Valued(_)));
        assert_eq!(valued.value(), Some(&json!([1, 2])));

        let valueless = decode(json!({"status": {"code": 200}}));
        assert!(matches!(valueless, AnyOutcome::Valueless(_)));
        assert_eq!(valueless.shape(), Shape::Valueless);
    }

    #[test]
    fn test_null_value_is_still_valued() {
        let outcome = decode(json!({"value": null, "status": {"code": 404, "description": "Not Found"}}));
        assert!(matches!(outcome, AnyOutcome::Valued(_)));
        assert_eq!(outcome.value(), None);
        assert!(outcome.is_failure());
    }

    #[test]
    fn test_reencoding_preserves_shape() {
        let document = json!({
            "value": {"id": 7},
            "isSuccess": true,
            "isFailure": false,
            "status": {"code": 200, "description": "OK"}
        });
        let outcome = decode(document.clone());
        let encoded = serde_json::to_value(AnyRepr {
            outcome: &outcome,
            ctx: Context::default_ref(),
        })
        .unwrap();
        assert_eq!(encoded, document);
    }

    #[test]
    fn test_into_outcome_drops_value() {
        let outcome = decode(json!({"value": 1, "status": {"code": 200}, "messages": ["m"]}));
        let plain = outcome.into_outcome();
        assert!(plain.is_success());
        assert_eq!(plain.messages(), ["m".to_string()]);
    }
}
