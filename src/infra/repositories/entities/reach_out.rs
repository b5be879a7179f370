//! Reach-out database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::ReachOut;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reach_outs")]
pub struct Model {
    /// Ordinal within the store; the request has no identity of its own
    #[sea_orm(primary_key)]
    pub id: i32,
    pub account_id: Uuid,
    pub name: String,
    pub phone: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    Account,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain value object
impl From<Model> for ReachOut {
    fn from(model: Model) -> Self {
        ReachOut {
            name: model.name,
            phone: model.phone,
            description: model.description,
            created_at: model.created_at,
        }
    }
}
