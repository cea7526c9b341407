//! Time-of-day helpers.
//!
//! Slots are stored at minute resolution and travel as `"HH:MM"` strings,
//! the format the scheduling forms produce.

use chrono::{NaiveTime, Timelike};

pub const FORMAT: &str = "%H:%M";

/// Parses `"HH:MM"` (or `"H:MM"`) into a time of day.
pub fn parse(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), FORMAT).ok()
}

pub fn format(time: NaiveTime) -> String {
    time.format(FORMAT).to_string()
}

/// True when the time carries no seconds or sub-second component.
pub fn is_whole_minute(time: NaiveTime) -> bool {
    time.second() == 0 && time.nanosecond() == 0
}

/// Serde adapter for `NaiveTime` as `"HH:MM"`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid time of day '{}', expected HH:MM", raw)))
    }

    /// Same as the parent module, for optional fields. Empty strings read
    /// as `None` so untouched form inputs count as missing.
    pub mod option {
        use chrono::NaiveTime;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match time {
                Some(time) => serializer.serialize_some(&super::super::format(*time)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => super::super::parse(&raw).map(Some).ok_or_else(|| {
                    de::Error::custom(format!("invalid time of day '{}', expected HH:MM", raw))
                }),
            }
        }
    }
}
