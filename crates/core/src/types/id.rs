//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. The remote backend
//! issues UUIDs for every row, so the wrappers are UUID-backed.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around [`uuid::Uuid`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_uuid()`
/// - `From<Uuid>` and `Into<Uuid>` implementations
/// - `Display` and `FromStr` delegating to the UUID representation
///
/// # Example
///
/// ```rust
/// # use tatame_core::define_id;
/// define_id!(UserId);
/// define_id!(ScheduleId);
///
/// let user_id = UserId::new(uuid::Uuid::new_v4());
/// let schedule_id = ScheduleId::new(uuid::Uuid::new_v4());
///
/// // These are different types, so this won't compile:
/// // let _: UserId = schedule_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Create a new ID from a UUID value.
            #[must_use]
            pub const fn new(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Get the underlying UUID value.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.parse::<::uuid::Uuid>().map(Self)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(ScheduleId);
define_id!(AttendanceId);
define_id!(PaymentId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct_types() {
        let raw = uuid::Uuid::new_v4();
        let user_id = UserId::new(raw);
        let schedule_id = ScheduleId::new(raw);
        assert_eq!(user_id.as_uuid(), schedule_id.as_uuid());
    }

    #[test]
    fn test_display_matches_uuid() {
        let raw = uuid::Uuid::new_v4();
        let id = UserId::new(raw);
        assert_eq!(id.to_string(), raw.to_string());
    }

    #[test]
    fn test_from_str_roundtrip() {
        let raw = uuid::Uuid::new_v4();
        let parsed: ScheduleId = raw.to_string().parse().unwrap();
        assert_eq!(parsed.as_uuid(), raw);
    }

    #[test]
    fn test_serde_transparent() {
        let raw = uuid::Uuid::new_v4();
        let id = PaymentId::new(raw);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{raw}\""));
        let back: PaymentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
