//! JSON encoding and decoding of outcomes
//!
//! Writing is exact: the document always reflects the container. Reading is
//! forgiving below the top level. A document is only rejected when it is
//! not valid JSON, when its top-level token is not an object, or when a
//! present `value` does not decode as the element type. Missing or malformed
//! status, messages, errors and error nodes are repaired instead.
//!
//! ```
//! use verdict_core::json::{JsonCodec, CodecOptions, NamingPolicy};
//! use verdict_core::{OutcomeView, ValueOutcome};
//!
//! let codec = JsonCodec::new(CodecOptions::default().naming_policy(NamingPolicy::SnakeCase));
//! let text = codec.to_string(&ValueOutcome::success(42)).unwrap();
//! assert!(text.contains("\"is_success\":true"));
//!
//! let back: ValueOutcome<i32> = codec.from_str(&text).unwrap();
//! assert_eq!(back.value(), Some(&42));
//! assert!(back.is_success());
//! ```

mod any;
mod container;
mod fields;
mod impls;
mod lenient;
mod naming;
mod node;
mod options;
mod status;

use std::io::{Read, Write};

use serde::de::DeserializeSeed;
use serde::{Deserialize, Serialize};

pub use any::AnyOutcome;
pub use container::{Container, Shape};
pub use naming::{NamingPolicy, UnknownNamingPolicy};
pub use options::{CategoryFormat, CodecOptions, ExtensionLayout, UnknownOption};

use crate::error::Result;
use crate::outcome::OutcomeView;
use any::{AnyRepr, AnySeed};
use container::{ContainerRepr, ContainerSeed, ViewRepr};
use fields::Context;

/// Encoder and decoder bound to one set of [`CodecOptions`]
///
/// Property names are computed once at construction. A codec is immutable
/// and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    ctx: Context,
}

impl JsonCodec {
    /// Create a codec with the given options
    pub fn new(options: CodecOptions) -> Self {
        Self {
            ctx: Context::new(options),
        }
    }

    /// Options this codec was built with
    pub fn options(&self) -> &CodecOptions {
        &self.ctx.options
    }

    /// Encode a container to a string
    pub fn to_string<C>(&self, container: &C) -> Result<String>
    where
        C: Container,
        C::Value: Serialize,
    {
        let bytes = self.to_vec(container)?;
        // serde_json only emits UTF-8
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Encode a container to bytes
    pub fn to_vec<C>(&self, container: &C) -> Result<Vec<u8>>
    where
        C: Container,
        C::Value: Serialize,
    {
        let mut out = Vec::with_capacity(128);
        self.to_writer(&mut out, container)?;
        Ok(out)
    }

    /// Encode a container into `writer`
    pub fn to_writer<W, C>(&self, writer: W, container: &C) -> Result<()>
    where
        W: Write,
        C: Container,
        C::Value: Serialize,
    {
        self.write(
            writer,
            &ContainerRepr {
                container,
                ctx: &self.ctx,
            },
        )
    }

    /// Encode a container to a JSON value
    pub fn to_value<C>(&self, container: &C) -> Result<serde_json::Value>
    where
        C: Container,
        C::Value: Serialize,
    {
        Ok(serde_json::to_value(ContainerRepr {
            container,
            ctx: &self.ctx,
        })?)
    }

    /// Encode any view with the valueless shape
    pub fn encode_view(&self, view: &dyn OutcomeView) -> Result<String> {
        let mut out = Vec::with_capacity(128);
        self.write(&mut out, &ViewRepr { view, ctx: &self.ctx })?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Encode an outcome of either shape
    pub fn encode_any(&self, outcome: &AnyOutcome) -> Result<String> {
        let mut out = Vec::with_capacity(128);
        self.write(
            &mut out,
            &AnyRepr {
                outcome,
                ctx: &self.ctx,
            },
        )?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Decode a container from a string
    pub fn from_str<'de, C>(&self, text: &'de str) -> Result<C>
    where
        C: Container,
        C::Value: Deserialize<'de>,
    {
        self.read(
            serde_json::Deserializer::from_str(text),
            ContainerSeed::new(&self.ctx),
        )
    }

    /// Decode a container from bytes
    pub fn from_slice<'de, C>(&self, bytes: &'de [u8]) -> Result<C>
    where
        C: Container,
        C::Value: Deserialize<'de>,
    {
        self.read(
            serde_json::Deserializer::from_slice(bytes),
            ContainerSeed::new(&self.ctx),
        )
    }

    /// Decode a container from a reader
    pub fn from_reader<R, C>(&self, reader: R) -> Result<C>
    where
        R: Read,
        C: Container,
        C::Value: for<'de> Deserialize<'de>,
    {
        self.read(
            serde_json::Deserializer::from_reader(reader),
            ContainerSeed::new(&self.ctx),
        )
    }

    /// Decode a container from a JSON value
    pub fn from_value<C>(&self, value: serde_json::Value) -> Result<C>
    where
        C: Container,
        C::Value: for<'de> Deserialize<'de>,
    {
        let seed = ContainerSeed::new(&self.ctx);
        if self.ctx.options.unbounded_depth {
            Ok(seed.deserialize(serde_stacker::Deserializer::new(value))?)
        } else {
            Ok(seed.deserialize(value)?)
        }
    }

    /// Decode a document whose shape is not known, picking the shape by the
    /// presence of `value`
    pub fn decode_any(&self, text: &str) -> Result<AnyOutcome> {
        self.read(
            serde_json::Deserializer::from_str(text),
            AnySeed { ctx: &self.ctx },
        )
    }

    fn write<W: Write, T: Serialize + ?Sized>(&self, writer: W, value: &T) -> Result<()> {
        if self.ctx.options.pretty {
            serde_json::to_writer_pretty(writer, value)?;
        } else {
            serde_json::to_writer(writer, value)?;
        }
        Ok(())
    }

    fn read<'de, R, S>(&self, mut de: serde_json::Deserializer<R>, seed: S) -> Result<S::Value>
    where
        R: serde_json::de::Read<'de>,
        S: DeserializeSeed<'de>,
    {
        let value = if self.ctx.options.unbounded_depth {
            de.disable_recursion_limit();
            seed.deserialize(serde_stacker::Deserializer::new(&mut de))?
        } else {
            seed.deserialize(&mut de)?
        };
        de.end()?;
        Ok(value)
    }
}
