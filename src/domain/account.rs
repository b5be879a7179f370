//! Account domain entity and related types.

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{ReachOut, Role};
use crate::config::{DEFAULT_PROFILE_PICTURE_URL, PROFILE_PICTURE_DATA_URI_PREFIX};

/// Account domain entity
#[derive(Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_available: bool,
    #[serde(skip_serializing)]
    pub profile_picture: Option<Vec<u8>>,
    pub roles: Vec<Role>,
    pub reach_outs: Vec<ReachOut>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("is_available", &self.is_available)
            .field("roles", &self.roles)
            .field("reach_outs", &self.reach_outs.len())
            .finish_non_exhaustive()
    }
}

impl Account {
    /// Create a new househelp account; not available until edited
    #[cfg(test)]
    pub fn new(id: Uuid, username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            password_hash,
            name: None,
            description: None,
            is_available: false,
            profile_picture: None,
            roles: Vec::new(),
            reach_outs: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Check if account holds the Administrator role
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Administrator)
    }

    /// Any account that is not an administrator is a househelp
    pub fn is_house_help(&self) -> bool {
        !self.is_admin()
    }

    /// Case-sensitive substring match on username, name or description.
    /// Missing fields never match.
    pub fn matches_search(&self, term: &str) -> bool {
        self.username.contains(term)
            || self.name.as_deref().is_some_and(|name| name.contains(term))
            || self
                .description
                .as_deref()
                .is_some_and(|description| description.contains(term))
    }

    /// Data URI for the stored picture, or the placeholder path
    pub fn profile_picture_url(&self) -> String {
        match &self.profile_picture {
            Some(bytes) if !bytes.is_empty() => format!(
                "{}{}",
                PROFILE_PICTURE_DATA_URI_PREFIX,
                BASE64_STANDARD.encode(bytes)
            ),
            _ => DEFAULT_PROFILE_PICTURE_URL.to_string(),
        }
    }

    pub fn reach_out_count(&self) -> usize {
        self.reach_outs.len()
    }
}

/// Data required to insert an account
#[derive(Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl std::fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Account response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "jane")]
    pub username: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "Jane Wanjiku")]
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_available: bool,
    pub roles: Vec<Role>,
    /// Number of reach-out requests received
    pub reach_outs: usize,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            reach_outs: account.reach_out_count(),
            id: account.id,
            username: account.username,
            email: account.email,
            name: account.name,
            description: account.description,
            is_available: account.is_available,
            roles: account.roles,
            created_at: account.created_at,
        }
    }
}

/// Public directory entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountSummary {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub profile_picture_url: String,
}

impl From<Account> for AccountSummary {
    fn from(account: Account) -> Self {
        Self {
            profile_picture_url: account.profile_picture_url(),
            id: account.id,
            username: account.username,
            name: account.name,
            description: account.description,
        }
    }
}

/// Projection shown to an account owner
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileView {
    pub id: Uuid,
    pub profile_picture_url: String,
    pub username: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub email: String,
    pub is_available: bool,
    pub reach_outs: Vec<ReachOut>,
}

impl From<Account> for ProfileView {
    fn from(account: Account) -> Self {
        Self {
            profile_picture_url: account.profile_picture_url(),
            id: account.id,
            username: account.username,
            name: account.name,
            description: account.description,
            email: account.email,
            is_available: account.is_available,
            reach_outs: account.reach_outs,
        }
    }
}

/// Navigation-bar summary of the signed-in account
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginSummary {
    pub username: String,
    pub profile_picture_url: String,
}

impl From<Account> for LoginSummary {
    fn from(account: Account) -> Self {
        Self {
            profile_picture_url: account.profile_picture_url(),
            username: account.username,
        }
    }
}
