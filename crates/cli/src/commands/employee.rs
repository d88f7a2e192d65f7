//! Employee management commands.
//!
//! # Usage
//!
//! ```bash
//! bizniz employee list
//! bizniz employee create --surname Doe --name Jane --company 64a1f0
//! bizniz employee update 64b2c1 --salary "" --competence Rust
//! bizniz employee delete 64b2c1
//! ```

use bizniz_client::{ClientError, EditSession, EntityStore};
use bizniz_core::{Company, CompanyId, Employee, EmployeeDraft};

use super::{CliError, apply_optional, cell, client_parts, non_empty};

/// Optional per-field changes for `update`. `None` keeps the current value;
/// for optional fields an empty string clears it.
#[derive(Debug, Default)]
pub struct FieldChanges {
    pub surname: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub competence: Option<String>,
    pub company: Option<String>,
}

/// List all employees, resolving each company reference to its name.
pub async fn list() -> Result<(), CliError> {
    let (transport, resolver) = client_parts()?;
    let mut employees: EntityStore<Employee> =
        EntityStore::new(transport.clone(), resolver.clone());
    let mut companies: EntityStore<Company> = EntityStore::new(transport, resolver);

    employees.load().await?;
    companies.load().await?;

    if employees.items().is_empty() {
        println!("No employees found.");
        return Ok(());
    }

    println!(
        "{:<16} {:<16} {:<14} {:<10} {:<16} {:<20} {}",
        "Surname", "Name", "Location", "Salary", "Competence", "Company", "Id"
    );
    for employee in employees.items() {
        // The company field is a weak reference; an unresolved one renders a
        // sentinel rather than failing the listing.
        let company_name = employee.company.as_ref().map_or("—", |company_id| {
            companies
                .find(company_id.as_str())
                .map_or("Unknown", |company| company.name.as_str())
        });

        println!(
            "{:<16} {:<16} {:<14} {:<10} {:<16} {:<20} {}",
            employee.surname,
            employee.name,
            cell(employee.location.as_deref()),
            cell(employee.salary.as_deref()),
            cell(employee.competence.as_deref()),
            company_name,
            employee.id,
        );
    }
    Ok(())
}

/// Create a new employee.
pub async fn create(
    surname: String,
    name: String,
    location: Option<String>,
    salary: Option<String>,
    competence: Option<String>,
    company: Option<String>,
) -> Result<(), CliError> {
    let (transport, resolver) = client_parts()?;
    let mut store: EntityStore<Employee> = EntityStore::new(transport, resolver);

    let draft = EmployeeDraft {
        surname,
        name,
        location: non_empty(location),
        salary: non_empty(salary),
        competence: non_empty(competence),
        company: non_empty(company).map(CompanyId::new),
    };

    let created = store.create(&draft).await?;
    println!(
        "Created employee {} {} ({})",
        created.name, created.surname, created.id
    );
    Ok(())
}

/// Update an existing employee, driving the edit session.
pub async fn update(id: &str, changes: FieldChanges) -> Result<(), CliError> {
    let (transport, resolver) = client_parts()?;
    let mut store: EntityStore<Employee> = EntityStore::new(transport, resolver);
    store.load().await?;

    let current = store
        .find(id)
        .cloned()
        .ok_or_else(|| ClientError::NotFound {
            resource: "employee",
            id: id.to_string(),
        })?;

    let mut session = EditSession::new();
    session.begin_edit(current.clone(), EmployeeDraft::from_employee(&current));

    if let Some(draft) = session.draft_mut() {
        if let Some(surname) = changes.surname {
            draft.surname = surname;
        }
        if let Some(name) = changes.name {
            draft.name = name;
        }
        apply_optional(&mut draft.location, changes.location);
        apply_optional(&mut draft.salary, changes.salary);
        apply_optional(&mut draft.competence, changes.competence);

        let mut company = draft.company.as_ref().map(ToString::to_string);
        apply_optional(&mut company, changes.company);
        draft.company = company.map(CompanyId::new);
    }

    let draft = session.submit()?;
    match store.update(id, &draft).await {
        Ok(updated) => {
            session.confirm()?;
            println!(
                "Updated employee {} {} ({})",
                updated.name, updated.surname, updated.id
            );
            Ok(())
        }
        Err(e) => {
            session.fail(e.to_string())?;
            session.acknowledge()?;
            Err(e.into())
        }
    }
}

/// Delete an employee.
pub async fn delete(id: &str) -> Result<(), CliError> {
    let (transport, resolver) = client_parts()?;
    let mut store: EntityStore<Employee> = EntityStore::new(transport, resolver);
    store.load().await?;

    store.remove(id).await?;
    println!("Deleted employee {id}");
    Ok(())
}
