//! Reach-out service - contact requests sent to a househelp.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ReachOut;
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Confirmation returned once a request has been stored
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReachOutReceipt {
    pub house_help_id: Uuid,
    #[schema(example = "jane")]
    pub username: String,
    #[schema(example = "Reach out request sent to jane")]
    pub message: String,
}

/// Reach-out service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReachOutService: Send + Sync {
    /// Append a contact request to the target account
    async fn submit(
        &self,
        house_help_id: Uuid,
        name: String,
        phone: String,
        description: String,
    ) -> AppResult<ReachOutReceipt>;
}

/// Concrete implementation of ReachOutService using Unit of Work.
pub struct ReachOutDesk<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReachOutDesk<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ReachOutService for ReachOutDesk<U> {
    async fn submit(
        &self,
        house_help_id: Uuid,
        name: String,
        phone: String,
        description: String,
    ) -> AppResult<ReachOutReceipt> {
        let accounts = self.uow.accounts();
        let target = accounts.find_by_id(house_help_id).await?.ok_or_not_found()?;

        accounts
            .add_reach_out(target.id, ReachOut::new(name, phone, description))
            .await?;

        tracing::info!(house_help_id = %target.id, "Reach out request stored");
        Ok(ReachOutReceipt {
            house_help_id: target.id,
            message: format!("Reach out request sent to {}", target.username),
            username: target.username,
        })
    }
}
