//! Fixtures shared by the service unit tests.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Account, Password, ReachOut, Role};
use crate::infra::{AccountRepository, MockAccountRepository, UnitOfWork};

/// Unit of Work handing out a single mocked repository
pub(crate) struct TestUnitOfWork {
    account_repo: Arc<MockAccountRepository>,
}

impl TestUnitOfWork {
    pub(crate) fn new(account_repo: MockAccountRepository) -> Arc<Self> {
        Arc::new(Self {
            account_repo: Arc::new(account_repo),
        })
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn accounts(&self) -> Arc<dyn AccountRepository> {
        self.account_repo.clone()
    }
}

pub(crate) fn account(username: &str) -> Account {
    Account::new(
        Uuid::new_v4(),
        username.to_string(),
        format!("{}@x.com", username),
        "hash".to_string(),
    )
}

pub(crate) fn account_with_password(username: &str, password: &str) -> Account {
    let mut account = account(username);
    account.password_hash = Password::new(password).unwrap().into_string();
    account
}

pub(crate) fn admin(username: &str) -> Account {
    let mut account = account(username);
    account.roles.push(Role::Administrator);
    account
}

pub(crate) fn with_reach_outs(mut account: Account, count: usize) -> Account {
    for i in 0..count {
        account.reach_outs.push(ReachOut::new(
            format!("Sender {}", i),
            "0712345678".to_string(),
            "Need cleaner".to_string(),
        ));
    }
    account
}
