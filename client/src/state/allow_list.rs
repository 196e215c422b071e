//! Per-role email allow-lists kept in the document store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two documents, `roles/admins` and `roles/employees`, each hold an
//! `emails` string array. The login screen loads them on mount; the first
//! load ever seeds each missing document with one hard-coded address.
//! Existing documents are never rewritten.

#[cfg(test)]
#[path = "allow_list_test.rs"]
mod allow_list_test;

use serde_json::Value;

use crate::net::firestore::{DocumentStore, StoreError};

pub const ROLES_COLLECTION: &str = "roles";
pub const ADMINS_DOC: &str = "admins";
pub const EMPLOYEES_DOC: &str = "employees";

pub const SEED_ADMIN_EMAIL: &str = "thirupathip.aiml2023@citchennai.net";
pub const SEED_EMPLOYEE_EMAIL: &str = "vengi@citchennai.net";

/// Permitted addresses per role, as stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowList {
    pub admins: Vec<String>,
    pub employees: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AllowListError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Roles data missing or malformed in Firestore")]
    Malformed,
}

/// Extract the `emails` array; `None` unless it is present and all strings.
pub fn parse_emails(data: Option<&Value>) -> Option<Vec<String>> {
    data?
        .get("emails")?
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_owned))
        .collect()
}

async fn ensure_document<D>(store: &D, id: &str, seed: &str) -> Result<Option<Value>, StoreError>
where
    D: DocumentStore + ?Sized,
{
    let existing = store.get_document(ROLES_COLLECTION, id).await?;
    if existing.is_some() {
        return Ok(existing);
    }
    leptos::logging::log!("seeding {ROLES_COLLECTION}/{id}");
    store
        .set_document(ROLES_COLLECTION, id, &serde_json::json!({ "emails": [seed] }))
        .await?;
    store.get_document(ROLES_COLLECTION, id).await
}

/// Load both allow-lists, creating any missing document with its seed.
///
/// # Errors
///
/// Returns `Store` if the store fails, or `Malformed` if either document is
/// still absent or has no string-array `emails` field after seeding.
pub async fn init_allow_list<D>(store: &D) -> Result<AllowList, AllowListError>
where
    D: DocumentStore + ?Sized,
{
    let admins = ensure_document(store, ADMINS_DOC, SEED_ADMIN_EMAIL).await?;
    let employees = ensure_document(store, EMPLOYEES_DOC, SEED_EMPLOYEE_EMAIL).await?;

    match (parse_emails(admins.as_ref()), parse_emails(employees.as_ref())) {
        (Some(admins), Some(employees)) => Ok(AllowList { admins, employees }),
        _ => Err(AllowListError::Malformed),
    }
}
