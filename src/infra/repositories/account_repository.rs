//! Account repository implementation.
//!
//! Accounts are loaded together with their role memberships and
//! reach-out requests so that services only ever see whole aggregates.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use super::entities::account::{self, normalize, ActiveModel, Entity as AccountEntity};
use super::entities::account_role::{self, Entity as AccountRoleEntity};
use super::entities::reach_out::{self, Entity as ReachOutEntity};
use super::entities::role::{self as stored_role, Entity as RoleEntity};
use crate::domain::{Account, NewAccount, ReachOut, Role};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account repository trait for dependency injection.
///
/// Username and email lookups are case-insensitive.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// Find account by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;

    /// Find account by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Insert a new account without roles
    async fn create(&self, account: NewAccount) -> AppResult<Account>;

    /// Persist identity and profile fields; the credential is left untouched
    async fn update(&self, account: Account) -> AppResult<Account>;

    /// Replace the stored credential hash
    async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<()>;

    /// Delete account together with its roles and reach-outs
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Enumerate every account
    async fn list(&self) -> AppResult<Vec<Account>>;

    /// Append a reach-out request to an account
    async fn add_reach_out(&self, account_id: Uuid, reach_out: ReachOut) -> AppResult<()>;

    /// Whether the role has been created
    async fn role_exists(&self, role: Role) -> AppResult<bool>;

    /// Create the role
    async fn create_role(&self, role: Role) -> AppResult<()>;

    /// Grant a role to an account; the role must exist
    async fn add_to_role(&self, account_id: Uuid, role: Role) -> AppResult<()>;
}

/// Concrete implementation of AccountRepository
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Load roles and reach-outs for a single account row
    async fn hydrate(&self, model: account::Model) -> AppResult<Account> {
        let roles = AccountRoleEntity::find()
            .filter(account_role::Column::AccountId.eq(model.id))
            .all(&self.db)
            .await?
            .into_iter()
            .filter_map(parse_role)
            .collect();

        let reach_outs = ReachOutEntity::find()
            .filter(reach_out::Column::AccountId.eq(model.id))
            .order_by_asc(reach_out::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(ReachOut::from)
            .collect();

        Ok(into_account(model, roles, reach_outs))
    }

    async fn hydrate_optional(&self, model: Option<account::Model>) -> AppResult<Option<Account>> {
        match model {
            Some(model) => self.hydrate(model).await.map(Some),
            None => Ok(None),
        }
    }
}

/// Skip role names that no longer match the enumeration
fn parse_role(row: account_role::Model) -> Option<Role> {
    match row.role.parse::<Role>() {
        Ok(role) => Some(role),
        Err(e) => {
            tracing::warn!(account_id = %row.account_id, error = %e, "Ignoring stored role");
            None
        }
    }
}

fn into_account(model: account::Model, roles: Vec<Role>, reach_outs: Vec<ReachOut>) -> Account {
    Account {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        name: model.name,
        description: model.description,
        is_available: model.is_available,
        profile_picture: model.profile_picture,
        roles,
        reach_outs,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        let model = AccountEntity::find_by_id(id).one(&self.db).await?;
        self.hydrate_optional(model).await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let model = AccountEntity::find()
            .filter(account::Column::NormalizedUsername.eq(normalize(username)))
            .one(&self.db)
            .await?;
        self.hydrate_optional(model).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let model = AccountEntity::find()
            .filter(account::Column::NormalizedEmail.eq(normalize(email)))
            .one(&self.db)
            .await?;
        self.hydrate_optional(model).await
    }

    async fn create(&self, account: NewAccount) -> AppResult<Account> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            normalized_username: Set(normalize(&account.username)),
            username: Set(account.username),
            normalized_email: Set(normalize(&account.email)),
            email: Set(account.email),
            password_hash: Set(account.password_hash),
            name: Set(None),
            description: Set(None),
            is_available: Set(false),
            profile_picture: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from_write)?;
        Ok(into_account(model, Vec::new(), Vec::new()))
    }

    async fn update(&self, account: Account) -> AppResult<Account> {
        let existing = AccountEntity::find_by_id(account.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.normalized_username = Set(normalize(&account.username));
        active.username = Set(account.username);
        active.normalized_email = Set(normalize(&account.email));
        active.email = Set(account.email);
        active.name = Set(account.name);
        active.description = Set(account.description);
        active.is_available = Set(account.is_available);
        active.profile_picture = Set(account.profile_picture);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from_write)?;
        Ok(into_account(model, account.roles, account.reach_outs))
    }

    async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<()> {
        let existing = AccountEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(chrono::Utc::now());

        active.update(&self.db).await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        // Children go first so the cascade holds even where foreign keys are not enforced
        let txn = self.db.begin().await?;

        ReachOutEntity::delete_many()
            .filter(reach_out::Column::AccountId.eq(id))
            .exec(&txn)
            .await?;
        AccountRoleEntity::delete_many()
            .filter(account_role::Column::AccountId.eq(id))
            .exec(&txn)
            .await?;
        let result = AccountEntity::delete_by_id(id).exec(&txn).await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AppError::NotFound);
        }

        txn.commit().await?;
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        let models = AccountEntity::find()
            .order_by_asc(account::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let mut roles: HashMap<Uuid, Vec<Role>> = HashMap::new();
        for row in AccountRoleEntity::find().all(&self.db).await? {
            let account_id = row.account_id;
            if let Some(role) = parse_role(row) {
                roles.entry(account_id).or_default().push(role);
            }
        }

        let mut reach_outs: HashMap<Uuid, Vec<ReachOut>> = HashMap::new();
        for row in ReachOutEntity::find()
            .order_by_asc(reach_out::Column::Id)
            .all(&self.db)
            .await?
        {
            reach_outs
                .entry(row.account_id)
                .or_default()
                .push(ReachOut::from(row));
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let id = model.id;
                into_account(
                    model,
                    roles.remove(&id).unwrap_or_default(),
                    reach_outs.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }

    async fn add_reach_out(&self, account_id: Uuid, reach_out: ReachOut) -> AppResult<()> {
        let active_model = reach_out::ActiveModel {
            account_id: Set(account_id),
            name: Set(reach_out.name),
            phone: Set(reach_out.phone),
            description: Set(reach_out.description),
            created_at: Set(reach_out.created_at),
            ..Default::default()
        };

        ReachOutEntity::insert(active_model)
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    async fn role_exists(&self, role: Role) -> AppResult<bool> {
        let found = RoleEntity::find_by_id(role.as_str().to_string())
            .one(&self.db)
            .await?;
        Ok(found.is_some())
    }

    async fn create_role(&self, role: Role) -> AppResult<()> {
        let active_model = stored_role::ActiveModel {
            name: Set(role.as_str().to_string()),
        };

        RoleEntity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(AppError::from_write)?;
        Ok(())
    }

    async fn add_to_role(&self, account_id: Uuid, role: Role) -> AppResult<()> {
        if !self.role_exists(role).await? {
            return Err(AppError::internal(format!("Role '{}' does not exist", role)));
        }

        let active_model = account_role::ActiveModel {
            account_id: Set(account_id),
            role: Set(role.as_str().to_string()),
        };

        AccountRoleEntity::insert(active_model)
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }
}
