//! Serde helpers for the loosely typed JSON the gestão API returns.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serializer};
use std::fmt;

/// Identifiers that arrive either as JSON numbers or as numeric strings.
///
/// Encoding always produces a JSON number.
pub mod lenient_id {
    use super::{Deserializer, Serializer, Visitor, de, fmt};

    /// Serializes the id as a number.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(*value)
    }

    /// Deserializes an id from a string or an integer. `null` and `""` decode as `0`.
    ///
    /// # Errors
    ///
    /// Returns an error for negative numbers, fractional numbers or non-numeric strings.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LenientIdVisitor;

        impl Visitor<'_> for LenientIdVisitor {
            type Value = u64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a non-negative integer id, as a number or a string")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value)
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(value).map_err(|_| E::custom(format!("negative id {value}")))
            }

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value.fract() == 0.0 && value >= 0.0 {
                    Ok(value as u64)
                } else {
                    Err(E::custom(format!("invalid id {value}")))
                }
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Ok(0);
                }
                trimmed.parse::<u64>().map_err(de::Error::custom)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(0)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(0)
            }
        }

        deserializer.deserialize_any(LenientIdVisitor)
    }

    /// Lists of ids, such as the members present at a meeting.
    pub mod vec {
        use super::super::{Deserialize, Deserializer, Serializer, Visitor, fmt};
        use serde::de::SeqAccess;

        /// Serializes the ids as a list of numbers.
        ///
        /// # Errors
        ///
        /// Returns an error if the serializer fails.
        pub fn serialize<S>(value: &[u64], serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_seq(value.iter())
        }

        /// Deserializes a list whose items may be numbers or numeric strings.
        /// `null` decodes as an empty list.
        ///
        /// # Errors
        ///
        /// Returns an error if any element is not a valid id.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct VecVisitor;

            impl<'de> Visitor<'de> for VecVisitor {
                type Value = Vec<u64>;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a sequence of ids")
                }

                fn visit_unit<E>(self) -> Result<Self::Value, E>
                where
                    E: serde::de::Error,
                {
                    Ok(Vec::new())
                }

                fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
                where
                    A: SeqAccess<'de>,
                {
                    #[derive(Deserialize)]
                    #[serde(transparent)]
                    struct Id(#[serde(deserialize_with = "super::deserialize")] u64);

                    let mut ids = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                    while let Some(Id(id)) = seq.next_element()? {
                        ids.push(id);
                    }
                    Ok(ids)
                }
            }

            deserializer.deserialize_any(VecVisitor)
        }
    }
}

/// Calendar dates exchanged with the API.
///
/// The backend stores timestamps while the screens only care about the day, so
/// decoding accepts `YYYY-MM-DD` as well as full RFC 3339 timestamps, and encoding
/// emits midnight UTC.
pub mod api_date {
    use chrono::{DateTime, NaiveDate};

    use super::{Deserializer, Serializer, Visitor, de, fmt};

    const DAY_FORMAT: &str = "%Y-%m-%d";

    /// Parses a date in any of the accepted wire formats.
    #[must_use]
    pub fn parse(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if let Ok(date) = NaiveDate::parse_from_str(value, DAY_FORMAT) {
            return Some(date);
        }
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
            return Some(timestamp.date_naive());
        }
        value
            .get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, DAY_FORMAT).ok())
    }

    /// Serializes the date as an RFC 3339 timestamp at midnight UTC.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn serialize<S>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}T00:00:00Z", value.format(DAY_FORMAT)))
    }

    /// Deserializes a date from `YYYY-MM-DD` or an RFC 3339 timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a string in an accepted format.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DateVisitor;

        impl Visitor<'_> for DateVisitor {
            type Value = NaiveDate;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a date as YYYY-MM-DD or an RFC 3339 timestamp")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse(value).ok_or_else(|| E::custom(format!("invalid date: {value}")))
            }
        }

        deserializer.deserialize_str(DateVisitor)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Deserialize, Serialize)]
    struct Sample {
        #[serde(with = "super::lenient_id")]
        id: u64,
        #[serde(with = "super::lenient_id::vec", default)]
        ids: Vec<u64>,
        #[serde(with = "super::api_date")]
        day: NaiveDate,
    }

    #[test]
    fn test_ids_accept_strings_and_numbers() {
        let sample: Sample =
            serde_json::from_str(r#"{"id": "12", "ids": [1, "2", 3], "day": "2024-01-01"}"#)
                .unwrap();
        assert_eq!(sample.id, 12);
        assert_eq!(sample.ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_negative_id_is_rejected() {
        let result: Result<Sample, _> =
            serde_json::from_str(r#"{"id": -1, "day": "2024-01-01"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_null_ids_decode_as_empty() {
        let sample: Sample =
            serde_json::from_str(r#"{"id": null, "ids": null, "day": "2024-01-01"}"#).unwrap();
        assert_eq!(sample.id, 0);
        assert!(sample.ids.is_empty());
    }

    #[test]
    fn test_dates_accept_timestamps() {
        let sample: Sample =
            serde_json::from_str(r#"{"id": 1, "day": "2024-03-09T00:00:00.000Z"}"#).unwrap();
        assert_eq!(sample.day, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn test_dates_encode_as_midnight_utc() {
        let sample = Sample {
            id: 3,
            ids: vec![4],
            day: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        };
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["day"], "2025-06-30T00:00:00Z");
        assert_eq!(json["id"], 3);
        assert_eq!(json["ids"][0], 4);
    }
}
