//! Role enumeration.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::ROLE_ADMINISTRATOR;

/// Roles recognised by the application.
///
/// Accounts without any role are househelp accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Administrator,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 1] = [Role::Administrator];

    /// Name stored in the database and carried in session tokens
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => ROLE_ADMINISTRATOR,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored role name matches no known role
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_name() {
        let parsed: Role = Role::Administrator.as_str().parse().unwrap();
        assert_eq!(parsed, Role::Administrator);
    }

    #[test]
    fn test_misspelled_role_is_rejected() {
        assert_eq!(
            "Administrators".parse::<Role>(),
            Err(UnknownRole("Administrators".to_string()))
        );
        assert!("administrator".parse::<Role>().is_err());
    }
}
