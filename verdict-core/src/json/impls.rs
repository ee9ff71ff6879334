//! Plain serde impls using the default codec options
//!
//! These let the model types sit inside any serde document. Custom naming
//! or layouts go through [`JsonCodec`](super::JsonCodec) instead.

use serde::de::{self, DeserializeSeed, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde::Deserialize;

use super::any::{AnyOutcome, AnyRepr, AnySeed};
use super::container::{ContainerRepr, ContainerSeed};
use super::fields::Context;
use super::node::{CategoryRepr, CategorySeed, NodeRepr, NodeSeed};
use super::options::CategoryFormat;
use super::status::{StatusRepr, StatusSeed};
use crate::category::ErrorCategory;
use crate::error_info::ErrorInfo;
use crate::outcome::{Outcome, ValueOutcome};
use crate::status::Status;

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ContainerRepr {
            container: self,
            ctx: Context::default_ref(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ContainerSeed::new(Context::default_ref()).deserialize(deserializer)
    }
}

impl<T: Serialize> Serialize for ValueOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ContainerRepr {
            container: self,
            ctx: Context::default_ref(),
        }
        .serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ValueOutcome<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ContainerSeed::new(Context::default_ref()).deserialize(deserializer)
    }
}

impl Serialize for AnyOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        AnyRepr {
            outcome: self,
            ctx: Context::default_ref(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AnyOutcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        AnySeed {
            ctx: Context::default_ref(),
        }
        .deserialize(deserializer)
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        StatusRepr {
            status: self,
            ctx: Context::default_ref(),
        }
        .serialize(serializer)
    }
}

/// Standalone statuses have no fallback, so an unresolvable one is an error.
impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        StatusSeed {
            ctx: Context::default_ref(),
        }
        .deserialize(deserializer)?
        .ok_or_else(|| de::Error::custom("expected a status object with a positive integer code"))
    }
}

impl Serialize for ErrorInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeRepr {
            node: self,
            ctx: Context::default_ref(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ErrorInfo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        NodeSeed {
            ctx: Context::default_ref(),
        }
        .deserialize(deserializer)?
        .ok_or_else(|| de::Error::custom("expected an error object"))
    }
}

impl Serialize for ErrorCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CategoryRepr {
            category: *self,
            format: CategoryFormat::Name,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ErrorCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        CategorySeed.deserialize(deserializer)
    }
}
