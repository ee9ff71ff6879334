//! Status object codec

use std::fmt;

use serde::de::{self, DeserializeSeed, IgnoredAny, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::fields::{Bindings, Context, StatusField};
use super::lenient::{fallback_visits, LenientText, PositiveCode};
use crate::registry::StatusRegistry;
use crate::status::Status;

/// Writes `{code, description}`
pub(crate) struct StatusRepr<'a> {
    pub status: &'a Status,
    pub ctx: &'a Context,
}

impl Serialize for StatusRepr<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let names = &self.ctx.names;
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(&names.code, &self.status.code())?;
        map.serialize_entry(&names.description, self.status.description())?;
        map.end()
    }
}

/// Reads a status object. Yields `None` when the value is not an object or
/// carries no positive integer code.
#[derive(Clone, Copy)]
pub(crate) struct StatusSeed<'a> {
    pub ctx: &'a Context,
}

impl<'de> DeserializeSeed<'de> for StatusSeed<'_> {
    type Value = Option<Status>;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for StatusSeed<'_> {
    type Value = Option<Status>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a status object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut code = None;
        let mut description = None;
        let mut bindings = Bindings::new();
        while let Some(key) = map.next_key::<String>()? {
            match bindings.admit(self.ctx.names.status_binding(&key)) {
                Some(StatusField::Code) => code = map.next_value_seed(PositiveCode)?,
                Some(StatusField::Description) => description = map.next_value_seed(LenientText)?,
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(code.map(|code| resolve(code, description)))
    }

    fallback_visits!('de => None; unit bool i64 u64 f64 str seq);
}

/// Prefer the registered instance when it matches; otherwise build a value
/// without registering it, so untrusted documents cannot grow the registry.
fn resolve(code: u32, description: Option<String>) -> Status {
    let registered = StatusRegistry::global().get(code);
    match (registered, description) {
        (Some(known), Some(text)) if known.description() == text => known,
        (Some(known), None) => known,
        (_, Some(text)) => Status::custom(code, text).unwrap_or(Status::ERROR),
        (None, None) => Status::custom(code, format!("Status {code}")).unwrap_or(Status::ERROR),
    }
}
