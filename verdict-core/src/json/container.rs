//! Outcome container codec
//!
//! The container is the only place that rejects input: the top-level token
//! must be an object, and a present `value` must decode as the element type.
//! Everything below that is read leniently and repaired by the fallback in
//! [`finish`].

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::value::UnitDeserializer;
use serde::de::{self, DeserializeSeed, IgnoredAny, IntoDeserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

use super::fields::{Bindings, ContainerField, Context};
use super::lenient::LenientStrings;
use super::node::{NodeListRepr, NodeListSeed};
use super::status::{StatusRepr, StatusSeed};
use crate::error_info::ErrorInfo;
use crate::outcome::{Outcome, OutcomeView, ValueOutcome};
use crate::status::Status;

const DESERIALIZATION_CODE: &str = "Outcome.Deserialization";
const DESERIALIZATION_MESSAGE: &str = "The outcome document could not be fully interpreted";

/// Wire shape of a container type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// No `value` property
    Valueless,
    /// A `value` property holding the element type
    Valued {
        /// Rust name of the element type
        element: &'static str,
    },
}

impl Shape {
    /// Whether the shape carries a `value` property
    pub fn has_value(self) -> bool {
        matches!(self, Shape::Valued { .. })
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Valueless => f.write_str("valueless"),
            Shape::Valued { element } => write!(f, "valued<{element}>"),
        }
    }
}

/// Types the codec can read and write as an outcome document.
///
/// Implemented by [`Outcome`], [`ValueOutcome`] and boxed or shared
/// pointers to either. Anything else is rejected at compile time.
pub trait Container: OutcomeView + Sized {
    /// Element type carried under `value`; `()` for the valueless shape
    type Value;

    /// Wire shape of this container type
    fn shape() -> Shape;

    /// The carried value, if any
    fn value(&self) -> Option<&Self::Value>;

    /// Build a container from decoded parts without enforcing the factory
    /// invariants
    fn assemble(
        status: Status,
        errors: Vec<ErrorInfo>,
        messages: Vec<String>,
        value: Option<Self::Value>,
    ) -> Self;
}

impl Container for Outcome {
    type Value = ();

    fn shape() -> Shape {
        Shape::Valueless
    }

    fn value(&self) -> Option<&()> {
        None
    }

    fn assemble(status: Status, errors: Vec<ErrorInfo>, messages: Vec<String>, _: Option<()>) -> Self {
        Outcome::from_parts(status, errors, messages)
    }
}

impl<T> Container for ValueOutcome<T> {
    type Value = T;

    fn shape() -> Shape {
        Shape::Valued {
            element: std::any::type_name::<T>(),
        }
    }

    fn value(&self) -> Option<&T> {
        ValueOutcome::value(self)
    }

    fn assemble(
        status: Status,
        errors: Vec<ErrorInfo>,
        messages: Vec<String>,
        value: Option<T>,
    ) -> Self {
        ValueOutcome::from_parts(status, errors, messages, value)
    }
}

impl<C: Container> Container for Box<C> {
    type Value = C::Value;

    fn shape() -> Shape {
        C::shape()
    }

    fn value(&self) -> Option<&C::Value> {
        (**self).value()
    }

    fn assemble(
        status: Status,
        errors: Vec<ErrorInfo>,
        messages: Vec<String>,
        value: Option<C::Value>,
    ) -> Self {
        Box::new(C::assemble(status, errors, messages, value))
    }
}

impl<C: Container> Container for Arc<C> {
    type Value = C::Value;

    fn shape() -> Shape {
        C::shape()
    }

    fn value(&self) -> Option<&C::Value> {
        (**self).value()
    }

    fn assemble(
        status: Status,
        errors: Vec<ErrorInfo>,
        messages: Vec<String>,
        value: Option<C::Value>,
    ) -> Self {
        Arc::new(C::assemble(status, errors, messages, value))
    }
}

/// Writes a container, `value` first when the shape has one
pub(crate) struct ContainerRepr<'a, C> {
    pub container: &'a C,
    pub ctx: &'a Context,
}

impl<C> Serialize for ContainerRepr<'_, C>
where
    C: Container,
    C::Value: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if C::shape().has_value() {
            map.serialize_entry(&self.ctx.names.value, &self.container.value())?;
        }
        write_common(&mut map, self.container, self.ctx)?;
        map.end()
    }
}

/// Writes any view with the valueless shape
pub(crate) struct ViewRepr<'a> {
    pub view: &'a dyn OutcomeView,
    pub ctx: &'a Context,
}

impl Serialize for ViewRepr<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        write_common(&mut map, self.view, self.ctx)?;
        map.end()
    }
}

pub(crate) fn write_common<M, V>(map: &mut M, view: &V, ctx: &Context) -> Result<(), M::Error>
where
    M: SerializeMap,
    V: OutcomeView + ?Sized,
{
    let names = &ctx.names;
    map.serialize_entry(&names.is_success, &view.is_success())?;
    map.serialize_entry(&names.is_failure, &view.is_failure())?;
    map.serialize_entry(
        &names.status,
        &StatusRepr {
            status: view.status(),
            ctx,
        },
    )?;
    if !view.messages().is_empty() {
        map.serialize_entry(&names.messages, view.messages())?;
    }
    if !view.errors().is_empty() {
        map.serialize_entry(
            &names.errors,
            &NodeListRepr {
                nodes: view.errors(),
                ctx,
            },
        )?;
    }
    if let Some(message) = view.first_error_message() {
        map.serialize_entry(&names.error_message, message)?;
    }
    Ok(())
}

/// Properties read from a container document before the fallback runs
pub(crate) struct RawParts<T> {
    pub status: Option<Status>,
    pub errors: Vec<ErrorInfo>,
    pub messages: Vec<String>,
    pub value: Option<T>,
    pub value_present: bool,
}

/// Read the recognized container properties in any order. `value` is only
/// decoded when `capture_value` is set; otherwise it is skipped like any
/// unknown property.
pub(crate) fn read_parts<'de, A, T>(
    mut map: A,
    ctx: &Context,
    capture_value: bool,
) -> Result<RawParts<T>, A::Error>
where
    A: MapAccess<'de>,
    T: Deserialize<'de>,
{
    let mut parts = RawParts {
        status: None,
        errors: Vec::new(),
        messages: Vec::new(),
        value: None,
        value_present: false,
    };

    let mut bindings = Bindings::new();
    while let Some(key) = map.next_key::<String>()? {
        match bindings.admit(ctx.names.container_binding(&key)) {
            Some(ContainerField::Value) if capture_value => {
                parts.value = map.next_value_seed(ValueSeed(PhantomData))?;
                parts.value_present = true;
            }
            Some(ContainerField::Status) => parts.status = map.next_value_seed(StatusSeed { ctx })?,
            Some(ContainerField::Messages) => parts.messages = map.next_value_seed(LenientStrings)?,
            Some(ContainerField::Errors) => {
                parts.errors = map.next_value_seed(NodeListSeed { ctx })?;
            }
            Some(ContainerField::Value) | None => {
                map.next_value::<IgnoredAny>()?;
            }
        }
    }
    Ok(parts)
}

/// Reads a present `value`. A `null` is kept as a value when the element
/// type accepts it, so `()` and `Option<_>` elements survive a round trip;
/// for any other type it reads as absent.
struct ValueSeed<T>(PhantomData<fn() -> T>);

impl<'de, T: Deserialize<'de>> DeserializeSeed<'de> for ValueSeed<T> {
    type Value = Option<T>;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_option(self)
    }
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for ValueSeed<T> {
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a value or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        let null: UnitDeserializer<E> = ().into_deserializer();
        Ok(T::deserialize(null).ok())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        self.visit_none()
    }

    fn visit_some<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        T::deserialize(deserializer).map(Some)
    }
}

/// Apply the fallback: an unresolved status becomes [`Status::ERROR`], and a
/// document that would then read as an error-free failure gains a diagnostic
/// error.
pub(crate) fn finish<T>(parts: RawParts<T>) -> (Status, Vec<ErrorInfo>, Vec<String>, Option<T>) {
    let RawParts {
        status,
        mut errors,
        messages,
        value,
        ..
    } = parts;

    let status = match status {
        Some(status) => status,
        None => {
            if errors.is_empty() {
                log::debug!("outcome document has no resolvable status or errors, synthesizing diagnostic");
                errors.push(
                    ErrorInfo::unexpected(DESERIALIZATION_CODE, DESERIALIZATION_MESSAGE)
                        .with_detail("status was missing or malformed"),
                );
            } else {
                log::debug!("outcome document has no resolvable status, using {}", Status::ERROR);
            }
            Status::ERROR
        }
    };
    (status, errors, messages, value)
}

/// Reads a container of type `C`
pub(crate) struct ContainerSeed<'a, C> {
    pub ctx: &'a Context,
    marker: PhantomData<fn() -> C>,
}

impl<'a, C> ContainerSeed<'a, C> {
    pub fn new(ctx: &'a Context) -> Self {
        Self {
            ctx,
            marker: PhantomData,
        }
    }
}

impl<'de, C> DeserializeSeed<'de> for ContainerSeed<'_, C>
where
    C: Container,
    C::Value: Deserialize<'de>,
{
    type Value = C;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<C, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de, C> Visitor<'de> for ContainerSeed<'_, C>
where
    C: Container,
    C::Value: Deserialize<'de>,
{
    type Value = C;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an outcome object")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<C, A::Error> {
        let parts = read_parts::<A, C::Value>(map, self.ctx, C::shape().has_value())?;
        let (status, errors, messages, value) = finish(parts);
        Ok(C::assemble(status, errors, messages, value))
    }
}
