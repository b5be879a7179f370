//! Reach-out request value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A contact inquiry a visitor sent to a househelp.
///
/// Owned by its account; never updated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReachOut {
    /// Sender display name
    #[schema(example = "Bob")]
    pub name: String,
    /// Sender phone number
    #[schema(example = "0712345678")]
    pub phone: String,
    /// Free-text message
    #[schema(example = "Need cleaner")]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl ReachOut {
    pub fn new(name: String, phone: String, description: String) -> Self {
        Self {
            name,
            phone,
            description,
            created_at: Utc::now(),
        }
    }
}
