use chrono::Utc;

use crate::models::{Account, AccountUpdate, NewAccount, Role};
use crate::store::{new_record_id, Entity, KvStore, StoreError};

use super::{decode, decode_all, merge_update};

pub async fn create_account(
    store: &impl KvStore,
    input: NewAccount,
) -> Result<Account, StoreError> {
    let now = Utc::now();
    let account = Account {
        id: new_record_id(),
        name: input.name,
        email: input.email,
        role: input.role,
        password: input.password,
        created_at: now,
        updated_at: now,
    };
    store
        .set(
            &Entity::Account.key(&account.id),
            serde_json::to_value(&account)?,
        )
        .await?;
    tracing::info!(id = %account.id, role = account.role.as_str(), "Created account");
    Ok(account)
}

pub async fn get_account(store: &impl KvStore, id: &str) -> Result<Option<Account>, StoreError> {
    match store.get(&Entity::Account.key(id)).await? {
        Some(value) => Ok(Some(decode(value)?)),
        None => Ok(None),
    }
}

/// Login-path lookup. Full prefix scan plus in-memory match; there is no
/// secondary index on email.
pub async fn find_account_by_email(
    store: &impl KvStore,
    email: &str,
) -> Result<Option<Account>, StoreError> {
    let accounts: Vec<Account> =
        decode_all(store.scan_by_prefix(Entity::Account.prefix()).await?)?;
    Ok(accounts
        .into_iter()
        .find(|account| account.email.eq_ignore_ascii_case(email)))
}

pub async fn list_accounts_by_role(
    store: &impl KvStore,
    role: Role,
) -> Result<Vec<Account>, StoreError> {
    let accounts: Vec<Account> =
        decode_all(store.scan_by_prefix(Entity::Account.prefix()).await?)?;
    Ok(accounts
        .into_iter()
        .filter(|account| account.role == role)
        .collect())
}

/// Field-level merge update; fields absent from `update` keep their value.
pub async fn update_account(
    store: &impl KvStore,
    id: &str,
    update: AccountUpdate,
) -> Result<Account, StoreError> {
    merge_update(store, Entity::Account, id, &update).await
}
