use pousada_core::models::BookingStatus;
use sqlx::{
    Decode, Encode, Sqlite, Type,
    encode::IsNull,
    error::BoxDynError,
    sqlite::{SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef},
};

/// A [`BookingStatus`] as stored in the `status` column, i.e. its snake-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StoredStatus(pub BookingStatus);

impl From<StoredStatus> for BookingStatus {
    fn from(value: StoredStatus) -> Self {
        value.0
    }
}

impl Type<Sqlite> for StoredStatus {
    fn type_info() -> SqliteTypeInfo {
        <&str as Type<Sqlite>>::type_info()
    }
}

impl<'q> Encode<'q, Sqlite> for StoredStatus {
    fn encode_by_ref(&self, buf: &mut Vec<SqliteArgumentValue<'q>>) -> Result<IsNull, BoxDynError> {
        <&str as Encode<Sqlite>>::encode(self.0.as_str(), buf)
    }
}

impl<'r> Decode<'r, Sqlite> for StoredStatus {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let text = <&str as Decode<Sqlite>>::decode(value)?;
        Ok(Self(text.parse()?))
    }
}
