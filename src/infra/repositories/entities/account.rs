//! Account database entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    /// Upper-cased username, unique
    #[sea_orm(unique)]
    pub normalized_username: String,
    pub email: String,
    /// Upper-cased email, unique
    #[sea_orm(unique)]
    pub normalized_email: String,
    pub password_hash: String,
    pub name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub is_available: bool,
    pub profile_picture: Option<Vec<u8>>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::account_role::Entity")]
    AccountRole,
    #[sea_orm(has_many = "super::reach_out::Entity")]
    ReachOut,
}

impl Related<super::account_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountRole.def()
    }
}

impl Related<super::reach_out::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReachOut.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Case-insensitive lookup key for usernames and emails
pub fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}
