//! Employee entity and draft types.

use serde::{Deserialize, Serialize};

use super::id::{CompanyId, EmployeeId};

/// An employee as confirmed by the server.
///
/// The `company` field is a weak reference: a lookup key into the company
/// collection, not an ownership relation. It may legitimately point at a
/// company that is no longer present; rendering code substitutes a sentinel
/// rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: EmployeeId,
    /// Family name (required).
    pub surname: String,
    /// Given name (required).
    pub name: String,
    /// Work location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Salary, free-form (the backend stores whatever string was entered).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    /// Competence / specialty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competence: Option<String>,
    /// Weak reference to the employing company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyId>,
}

/// Fields submitted when creating or updating an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    /// Family name (required).
    pub surname: String,
    /// Given name (required).
    pub name: String,
    /// Work location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Salary, free-form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    /// Competence / specialty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competence: Option<String>,
    /// Weak reference to the employing company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyId>,
}

impl EmployeeDraft {
    /// Seed a draft from an existing employee, for the edit flow.
    #[must_use]
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            surname: employee.surname.clone(),
            name: employee.name.clone(),
            location: employee.location.clone(),
            salary: employee.salary.clone(),
            competence: employee.competence.clone(),
            company: employee.company.clone(),
        }
    }
}
