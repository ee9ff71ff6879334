//! Forgiving leaf readers
//!
//! Every seed here accepts any JSON token. Tokens of the wrong kind are
//! consumed in full and mapped to a fallback instead of failing the document.

use std::fmt;

use serde::de::{self, DeserializeSeed, IgnoredAny, MapAccess, SeqAccess, Visitor};

/// Implements the visitor methods a lenient visitor does not care about.
/// Each one consumes its token and produces the fallback expression.
macro_rules! fallback_visits {
    ($de:lifetime => $fallback:expr; $($kind:ident)*) => {
        $( $crate::json::lenient::fallback_visits!(@visit $kind $de $fallback); )*
    };
    (@visit unit $de:lifetime $fallback:expr) => {
        fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok($fallback)
        }
    };
    (@visit bool $de:lifetime $fallback:expr) => {
        fn visit_bool<E: serde::de::Error>(self, _: bool) -> std::result::Result<Self::Value, E> {
            Ok($fallback)
        }
    };
    (@visit i64 $de:lifetime $fallback:expr) => {
        fn visit_i64<E: serde::de::Error>(self, _: i64) -> std::result::Result<Self::Value, E> {
            Ok($fallback)
        }
    };
    (@visit u64 $de:lifetime $fallback:expr) => {
        fn visit_u64<E: serde::de::Error>(self, _: u64) -> std::result::Result<Self::Value, E> {
            Ok($fallback)
        }
    };
    (@visit f64 $de:lifetime $fallback:expr) => {
        fn visit_f64<E: serde::de::Error>(self, _: f64) -> std::result::Result<Self::Value, E> {
            Ok($fallback)
        }
    };
    (@visit str $de:lifetime $fallback:expr) => {
        fn visit_str<E: serde::de::Error>(self, _: &str) -> std::result::Result<Self::Value, E> {
            Ok($fallback)
        }
    };
    (@visit seq $de:lifetime $fallback:expr) => {
        fn visit_seq<A: serde::de::SeqAccess<$de>>(
            self,
            mut seq: A,
        ) -> std::result::Result<Self::Value, A::Error> {
            $crate::json::lenient::drain_seq(&mut seq)?;
            Ok($fallback)
        }
    };
    (@visit map $de:lifetime $fallback:expr) => {
        fn visit_map<A: serde::de::MapAccess<$de>>(
            self,
            mut map: A,
        ) -> std::result::Result<Self::Value, A::Error> {
            $crate::json::lenient::drain_map(&mut map)?;
            Ok($fallback)
        }
    };
}

pub(crate) use fallback_visits;

/// Consume the remaining elements of a sequence
pub(crate) fn drain_seq<'de, A: SeqAccess<'de>>(seq: &mut A) -> Result<(), A::Error> {
    while seq.next_element::<IgnoredAny>()?.is_some() {}
    Ok(())
}

/// Consume the remaining entries of a map
pub(crate) fn drain_map<'de, A: MapAccess<'de>>(map: &mut A) -> Result<(), A::Error> {
    while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
    Ok(())
}

/// Reads a scalar as text. Numbers and booleans are rendered, `null` and
/// containers read as absent.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LenientText;

impl<'de> DeserializeSeed<'de> for LenientText {
    type Value = Option<String>;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for LenientText {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fallback_visits!('de => None; unit seq map);
}

/// Reads an array of strings. Anything else reads as an empty list; `null`
/// and container elements are skipped.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LenientStrings;

impl<'de> DeserializeSeed<'de> for LenientStrings {
    type Value = Vec<String>;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for LenientStrings {
    type Value = Vec<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of strings")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(64));
        while let Some(item) = seq.next_element_seed(LenientText)? {
            items.extend(item);
        }
        Ok(items)
    }

    fallback_visits!('de => Vec::new(); unit bool i64 u64 f64 str map);
}

/// Reads a positive integer that fits in `u32`. Integral floats and numeric
/// strings are accepted; everything else reads as absent.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PositiveCode;

impl PositiveCode {
    fn check(value: u64) -> Option<u32> {
        u32::try_from(value).ok().filter(|code| *code > 0)
    }
}

impl<'de> DeserializeSeed<'de> for PositiveCode {
    type Value = Option<u32>;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for PositiveCode {
    type Value = Option<u32>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a positive integer")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Self::check(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(u64::try_from(v).ok().and_then(Self::check))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.fract() == 0.0 && v >= 1.0 && v <= f64::from(u32::MAX) {
            Ok(Self::check(v as u64))
        } else {
            Ok(None)
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.trim().parse::<u64>().ok().and_then(Self::check))
    }

    fallback_visits!('de => None; unit bool seq map);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(value: serde_json::Value) -> Option<String> {
        LenientText.deserialize(value).unwrap()
    }

    fn code(value: serde_json::Value) -> Option<u32> {
        PositiveCode.deserialize(value).unwrap()
    }

    #[test]
    fn test_text_accepts_scalars() {
        assert_eq!(text(json!("abc")), Some("abc".to_string()));
        assert_eq!(text(json!(12)), Some("12".to_string()));
        assert_eq!(text(json!(true)), Some("true".to_string()));
        assert_eq!(text(json!(null)), None);
        assert_eq!(text(json!({"a": 1})), None);
        assert_eq!(text(json!([1, 2])), None);
    }

    #[test]
    fn test_strings_skip_non_scalars() {
        let items = LenientStrings
            .deserialize(json!(["a", null, {"x": 1}, "b"]))
            .unwrap();
        assert_eq!(items, vec!["a".to_string(), "b".to_string()]);
        assert!(LenientStrings.deserialize(json!("nope")).unwrap().is_empty());
        assert!(LenientStrings.deserialize(json!({"a": "b"})).unwrap().is_empty());
    }

    #[test]
    fn test_positive_code() {
        assert_eq!(code(json!(200)), Some(200));
        assert_eq!(code(json!(404.0)), Some(404));
        assert_eq!(code(json!("503")), Some(503));
        assert_eq!(code(json!(0)), None);
        assert_eq!(code(json!(-5)), None);
        assert_eq!(code(json!(2.5)), None);
        assert_eq!(code(json!(u64::MAX)), None);
        assert_eq!(code(json!("OK")), None);
        assert_eq!(code(json!(null)), None);
        assert_eq!(code(json!({"code": 200})), None);
    }

    #[test]
    fn test_wrong_kinds_are_consumed_in_streams() {
        // Each field value is read through a lenient seed inside a larger
        // document; the reader must stay aligned afterwards.
        let mut reader =
            serde_json::Deserializer::from_str(r#"[{"deep": [1, {"x": [2]}]}, "after"]"#);
        struct Pair;
        impl<'de> Visitor<'de> for Pair {
            type Value = (Option<String>, Option<String>);
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("pair")
            }
            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let first = seq.next_element_seed(LenientText)?.flatten();
                let second = seq.next_element_seed(LenientText)?.flatten();
                Ok((first, second))
            }
        }
        let pair = de::Deserializer::deserialize_seq(&mut reader, Pair).unwrap();
        assert_eq!(pair, (None, Some("after".to_string())));
    }
}
