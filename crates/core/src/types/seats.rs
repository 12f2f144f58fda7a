//! Seat-count buckets.
//!
//! Café capacity is recorded as one of a fixed set of ranges rather than an
//! exact count.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not one of the seat buckets.
#[derive(thiserror::Error, Debug, Clone)]
#[error("'{0}' is not a valid seat range")]
pub struct SeatsBucketError(pub String);

/// A bucketed seat count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SeatsBucket {
    ZeroToTen,
    TenToTwenty,
    TwentyToThirty,
    ThirtyToForty,
    FortyToFifty,
    FiftyPlus,
}

impl SeatsBucket {
    /// All buckets in ascending order, for form select options.
    pub const ALL: [Self; 6] = [
        Self::ZeroToTen,
        Self::TenToTwenty,
        Self::TwentyToThirty,
        Self::ThirtyToForty,
        Self::FortyToFifty,
        Self::FiftyPlus,
    ];

    /// The bucket's label, which is also its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ZeroToTen => "0-10",
            Self::TenToTwenty => "10-20",
            Self::TwentyToThirty => "20-30",
            Self::ThirtyToForty => "30-40",
            Self::FortyToFifty => "40-50",
            Self::FiftyPlus => "50+",
        }
    }
}

impl fmt::Display for SeatsBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SeatsBucket {
    type Err = SeatsBucketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| SeatsBucketError(s.to_owned()))
    }
}

impl TryFrom<String> for SeatsBucket {
    type Error = SeatsBucketError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SeatsBucket> for String {
    fn from(bucket: SeatsBucket) -> Self {
        bucket.as_str().to_owned()
    }
}

// SQLx support (with sqlite feature)
#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for SeatsBucket {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for SeatsBucket {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Ok(s.parse()?)
    }
}

#[cfg(feature = "sqlite")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for SeatsBucket {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'q, sqlx::Sqlite>>::encode(self.as_str().to_owned(), buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_labels() {
        for bucket in SeatsBucket::ALL {
            let parsed: SeatsBucket = bucket.as_str().parse().unwrap();
            assert_eq!(parsed, bucket);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("60+".parse::<SeatsBucket>().is_err());
        assert!("".parse::<SeatsBucket>().is_err());
    }

    #[test]
    fn test_display_matches_stored_form() {
        assert_eq!(SeatsBucket::FiftyPlus.to_string(), "50+");
        assert_eq!(SeatsBucket::ZeroToTen.to_string(), "0-10");
    }
}
