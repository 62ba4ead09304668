//! Role and payment enums.

use serde::{Deserialize, Serialize};

/// Profile role.
///
/// Read by the client to decide whether the admin surface is shown. This is
/// UI convenience only - authorization is enforced by the remote service's
/// row-level security, never by this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular academy member. Assigned to every freshly created profile.
    #[default]
    Student,
    /// May manage the schedule list.
    Admin,
}

impl Role {
    /// Whether this role unlocks the admin surface.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Payment record status.
///
/// The client only ever writes `Pending`; the other states are set by an
/// administrative process outside this repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Pix,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_default_is_student() {
        assert_eq!(Role::default(), Role::Student);
        assert!(!Role::default().is_admin());
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::Student, Role::Admin] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_role_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let back: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(back, Role::Student);
    }

    #[test]
    fn test_payment_serde() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(serde_json::to_string(&PaymentMethod::Pix).unwrap(), "\"pix\"");
    }
}
