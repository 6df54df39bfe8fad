use std::collections::HashMap;

use chrono::Utc;

use crate::models::{Account, DoctorProfile, DoctorRecord, DoctorUpdate, NewDoctor, Role};
use crate::store::{new_record_id, Entity, KvStore, StoreError};

use super::{decode, decode_all, merge_document, touch};

/// Same two-write shape as `create_patient`; the account lands first and a
/// failed profile write surfaces as `PartialWrite`.
pub async fn create_doctor(
    store: &impl KvStore,
    input: NewDoctor,
) -> Result<DoctorRecord, StoreError> {
    let id = new_record_id();
    let now = Utc::now();

    let account = Account {
        id: id.clone(),
        name: input.name,
        email: input.email,
        role: Role::Doctor,
        password: input.password,
        created_at: now,
        updated_at: now,
    };
    store
        .set(&Entity::Account.key(&id), serde_json::to_value(&account)?)
        .await?;

    let profile = DoctorProfile {
        id: id.clone(),
        user_id: id.clone(),
        phone: input.phone,
        specialization: input.specialization,
        qualification: input.qualification,
        experience: input.experience,
        created_at: now,
        updated_at: now,
    };
    store
        .set(
            &Entity::DoctorProfile.key(&id),
            serde_json::to_value(&profile)?,
        )
        .await
        .map_err(|e| StoreError::partial_write(Entity::DoctorProfile, &id, e))?;

    tracing::info!(id = %id, "Created doctor");
    Ok(DoctorRecord::join(&account, &profile))
}

pub async fn get_doctor(
    store: &impl KvStore,
    id: &str,
) -> Result<Option<DoctorRecord>, StoreError> {
    let profile = store.get(&Entity::DoctorProfile.key(id)).await?;
    let account = store.get(&Entity::Account.key(id)).await?;
    match (profile, account) {
        (Some(profile), Some(account)) => Ok(Some(DoctorRecord::join(
            &decode::<Account>(account)?,
            &decode::<DoctorProfile>(profile)?,
        ))),
        _ => Ok(None),
    }
}

pub async fn list_doctors(store: &impl KvStore) -> Result<Vec<DoctorRecord>, StoreError> {
    let profiles: Vec<DoctorProfile> =
        decode_all(store.scan_by_prefix(Entity::DoctorProfile.prefix()).await?)?;
    let accounts: Vec<Account> =
        decode_all(store.scan_by_prefix(Entity::Account.prefix()).await?)?;

    let accounts_by_id: HashMap<&str, &Account> =
        accounts.iter().map(|a| (a.id.as_str(), a)).collect();

    Ok(profiles
        .iter()
        .filter_map(|profile| {
            accounts_by_id
                .get(profile.id.as_str())
                .map(|account| DoctorRecord::join(account, profile))
        })
        .collect())
}

pub async fn update_doctor(
    store: &impl KvStore,
    id: &str,
    update: DoctorUpdate,
) -> Result<DoctorRecord, StoreError> {
    let profile_key = Entity::DoctorProfile.key(id);
    let account_key = Entity::Account.key(id);

    let mut profile_doc = store
        .get(&profile_key)
        .await?
        .ok_or_else(|| StoreError::not_found(Entity::DoctorProfile, id))?;
    let mut account_doc = store
        .get(&account_key)
        .await?
        .ok_or_else(|| StoreError::not_found(Entity::Account, id))?;

    let now = serde_json::to_value(Utc::now())?;
    merge_document(&mut account_doc, &serde_json::to_value(update.account_fields())?);
    touch(&mut account_doc, &now);
    merge_document(&mut profile_doc, &serde_json::to_value(update.profile_fields())?);
    touch(&mut profile_doc, &now);

    store.set(&account_key, account_doc.clone()).await?;
    store
        .set(&profile_key, profile_doc.clone())
        .await
        .map_err(|e| StoreError::partial_write(Entity::DoctorProfile, id, e))?;

    Ok(DoctorRecord::join(
        &decode::<Account>(account_doc)?,
        &decode::<DoctorProfile>(profile_doc)?,
    ))
}
