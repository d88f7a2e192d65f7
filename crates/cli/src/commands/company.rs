//! Company management commands.
//!
//! # Usage
//!
//! ```bash
//! bizniz company list
//! bizniz company create --name "Acme" --contract-level Gold --contract-length 12mo
//! bizniz company update 64a1f0 --industry ""   # empty string clears the field
//! bizniz company delete 64a1f0
//! ```

use bizniz_client::{ClientError, EditSession, EntityStore};
use bizniz_core::{Company, CompanyDraft};

use super::{CliError, apply_optional, cell, client_parts, non_empty};

/// Optional per-field changes for `update`. `None` keeps the current value;
/// for optional fields an empty string clears it.
#[derive(Debug, Default)]
pub struct FieldChanges {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub contract_level: Option<String>,
    pub contract_length: Option<String>,
}

/// List all companies.
pub async fn list() -> Result<(), CliError> {
    let (transport, resolver) = client_parts()?;
    let mut store: EntityStore<Company> = EntityStore::new(transport, resolver);
    store.load().await?;

    if store.items().is_empty() {
        println!("No companies found.");
        return Ok(());
    }

    println!(
        "{:<24} {:<16} {:<16} {:<14} {:<14} {}",
        "Name", "Industry", "Location", "Level", "Length", "Id"
    );
    for company in store.items() {
        println!(
            "{:<24} {:<16} {:<16} {:<14} {:<14} {}",
            company.name,
            cell(company.industry.as_deref()),
            cell(company.location.as_deref()),
            company.contract_level,
            company.contract_length,
            company.id,
        );
    }
    Ok(())
}

/// Create a new company.
pub async fn create(
    name: String,
    industry: Option<String>,
    location: Option<String>,
    contract_level: String,
    contract_length: String,
) -> Result<(), CliError> {
    let (transport, resolver) = client_parts()?;
    let mut store: EntityStore<Company> = EntityStore::new(transport, resolver);

    let draft = CompanyDraft {
        name,
        industry: non_empty(industry),
        location: non_empty(location),
        contract_level,
        contract_length,
    };

    let created = store.create(&draft).await?;
    println!("Created company {} ({})", created.name, created.id);
    Ok(())
}

/// Update an existing company, driving the edit session.
pub async fn update(id: &str, changes: FieldChanges) -> Result<(), CliError> {
    let (transport, resolver) = client_parts()?;
    let mut store: EntityStore<Company> = EntityStore::new(transport, resolver);
    store.load().await?;

    let current = store
        .find(id)
        .cloned()
        .ok_or_else(|| ClientError::NotFound {
            resource: "company",
            id: id.to_string(),
        })?;

    let mut session = EditSession::new();
    session.begin_edit(current.clone(), CompanyDraft::from_company(&current));

    if let Some(draft) = session.draft_mut() {
        if let Some(name) = changes.name {
            draft.name = name;
        }
        apply_optional(&mut draft.industry, changes.industry);
        apply_optional(&mut draft.location, changes.location);
        if let Some(level) = changes.contract_level {
            draft.contract_level = level;
        }
        if let Some(length) = changes.contract_length {
            draft.contract_length = length;
        }
    }

    let draft = session.submit()?;
    match store.update(id, &draft).await {
        Ok(updated) => {
            session.confirm()?;
            println!("Updated company {} ({})", updated.name, updated.id);
            Ok(())
        }
        Err(e) => {
            session.fail(e.to_string())?;
            session.acknowledge()?;
            Err(e.into())
        }
    }
}

/// Delete a company.
pub async fn delete(id: &str) -> Result<(), CliError> {
    let (transport, resolver) = client_parts()?;
    let mut store: EntityStore<Company> = EntityStore::new(transport, resolver);
    store.load().await?;

    store.remove(id).await?;
    println!("Deleted company {id}");
    Ok(())
}
