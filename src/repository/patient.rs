use std::collections::HashMap;

use chrono::Utc;

use crate::models::{Account, NewPatient, PatientProfile, PatientRecord, PatientUpdate, Role};
use crate::store::{new_record_id, Entity, KvStore, StoreError};

use super::{decode, decode_all, merge_document, touch};

/// Create the account record and the patient profile under one identifier.
///
/// The two writes are not atomic: if the profile write fails the account
/// stays behind as an orphan, surfaced as `PartialWrite` and picked up later
/// by the orphan cleanup path.
pub async fn create_patient(
    store: &impl KvStore,
    input: NewPatient,
) -> Result<PatientRecord, StoreError> {
    let id = new_record_id();
    let now = Utc::now();

    let account = Account {
        id: id.clone(),
        name: input.name,
        email: input.email,
        role: Role::Patient,
        password: input.password,
        created_at: now,
        updated_at: now,
    };
    store
        .set(&Entity::Account.key(&id), serde_json::to_value(&account)?)
        .await?;

    let profile = PatientProfile {
        id: id.clone(),
        user_id: id.clone(),
        age: input.age,
        phone: input.phone,
        address: input.address,
        medical_history: input.medical_history,
        created_at: now,
        updated_at: now,
    };
    store
        .set(
            &Entity::PatientProfile.key(&id),
            serde_json::to_value(&profile)?,
        )
        .await
        .map_err(|e| StoreError::partial_write(Entity::PatientProfile, &id, e))?;

    tracing::info!(id = %id, "Created patient");
    Ok(PatientRecord::join(&account, &profile))
}

/// Two point reads; the joined view exists only when both records do.
pub async fn get_patient(
    store: &impl KvStore,
    id: &str,
) -> Result<Option<PatientRecord>, StoreError> {
    let profile = store.get(&Entity::PatientProfile.key(id)).await?;
    let account = store.get(&Entity::Account.key(id)).await?;
    match (profile, account) {
        (Some(profile), Some(account)) => Ok(Some(PatientRecord::join(
            &decode::<Account>(account)?,
            &decode::<PatientProfile>(profile)?,
        ))),
        _ => Ok(None),
    }
}

/// Scan both prefixes and equi-join on identifier in memory. Profiles
/// without a matching account are dropped from this view — it assumes the
/// join holds; `orphan::detect_orphans` surfaces the rest.
pub async fn list_patients(store: &impl KvStore) -> Result<Vec<PatientRecord>, StoreError> {
    let profiles: Vec<PatientProfile> =
        decode_all(store.scan_by_prefix(Entity::PatientProfile.prefix()).await?)?;
    let accounts: Vec<Account> =
        decode_all(store.scan_by_prefix(Entity::Account.prefix()).await?)?;

    let accounts_by_id: HashMap<&str, &Account> =
        accounts.iter().map(|a| (a.id.as_str(), a)).collect();

    Ok(profiles
        .iter()
        .filter_map(|profile| {
            accounts_by_id
                .get(profile.id.as_str())
                .map(|account| PatientRecord::join(account, profile))
        })
        .collect())
}

/// Field-level merge across both underlying records. Both are read before
/// either is written, so a missing record fails the whole update with
/// `NotFound` instead of leaving one side half-changed.
pub async fn update_patient(
    store: &impl KvStore,
    id: &str,
    update: PatientUpdate,
) -> Result<PatientRecord, StoreError> {
    let profile_key = Entity::PatientProfile.key(id);
    let account_key = Entity::Account.key(id);

    let mut profile_doc = store
        .get(&profile_key)
        .await?
        .ok_or_else(|| StoreError::not_found(Entity::PatientProfile, id))?;
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
        .map_err(|e| StoreError::partial_write(Entity::PatientProfile, id, e))?;

    Ok(PatientRecord::join(
        &decode::<Account>(account_doc)?,
        &decode::<PatientProfile>(profile_doc)?,
    ))
}
