//! JSON helpers for the state RPC.
//!
//! The node serializes 64-bit quantities as decimal strings so that they
//! survive JavaScript clients. Use with `#[serde(with = "...")]`.

/// `u64` as a decimal string. Plain JSON numbers are accepted on input.
pub mod u64_string {
    use serde::de::{self, Deserializer, Visitor};
    use serde::Serializer;
    use std::fmt;

    pub fn serialize<S: Serializer>(v: &u64, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&v.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        d.deserialize_any(U64Visitor)
    }

    struct U64Visitor;

    impl<'de> Visitor<'de> for U64Visitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a u64 as a decimal string or number")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(E::custom)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            v.parse().map_err(E::custom)
        }
    }
}

/// `Option<u64>` as an optional decimal string.
pub mod opt_u64_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &Option<u64>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(v) => super::u64_string::serialize(v, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        #[derive(Deserialize)]
        struct Wrapped(#[serde(with = "super::u64_string")] u64);

        Ok(Option::<Wrapped>::deserialize(d)?.map(|w| w.0))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "super::u64_string")]
        value: u64,
        #[serde(default, with = "super::opt_u64_string")]
        counter: Option<u64>,
    }

    #[test]
    fn test_u64_string_roundtrip() {
        let s = Sample { value: u64::MAX, counter: Some(7) };
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["value"], "18446744073709551615");
        assert_eq!(json["counter"], "7");
        let back: Sample = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_numbers_and_missing_accepted() {
        let s: Sample = serde_json::from_value(serde_json::json!({ "value": 42 })).unwrap();
        assert_eq!(s, Sample { value: 42, counter: None });
    }
}
