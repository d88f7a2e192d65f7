//! Company entity and draft types.

use serde::{Deserialize, Serialize};

use super::id::CompanyId;

/// A company as confirmed by the server.
///
/// The identifier is server-assigned and immutable after creation; everything
/// else is operator-editable through the update flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: CompanyId,
    /// Company name (required, non-empty).
    pub name: String,
    /// Industry sector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// Head-office location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Contract level (required).
    pub contract_level: String,
    /// Contract length (required).
    pub contract_length: String,
}

/// Fields submitted when creating or updating a company.
///
/// Carries every field except the identifier, which only the server assigns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDraft {
    /// Company name (required, non-empty).
    pub name: String,
    /// Industry sector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// Head-office location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Contract level (required).
    pub contract_level: String,
    /// Contract length (required).
    pub contract_length: String,
}

impl CompanyDraft {
    /// Seed a draft from an existing company, for the edit flow.
    #[must_use]
    pub fn from_company(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            industry: company.industry.clone(),
            location: company.location.clone(),
            contract_level: company.contract_level.clone(),
            contract_length: company.contract_length.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_wire_field_names() {
        let json = serde_json::json!({
            "_id": "1",
            "name": "Acme",
            "contractLevel": "Gold",
            "contractLength": "12mo"
        });

        let company: Company = serde_json::from_value(json).expect("deserialize company");
        assert_eq!(company.id.as_str(), "1");
        assert_eq!(company.contract_level, "Gold");
        assert_eq!(company.industry, None);
    }

    #[test]
    fn test_draft_omits_empty_optionals() {
        let draft = CompanyDraft {
            name: "Acme".to_owned(),
            contract_level: "Gold".to_owned(),
            contract_length: "12mo".to_owned(),
            ..CompanyDraft::default()
        };

        let value = serde_json::to_value(&draft).expect("serialize draft");
        let object = value.as_object().expect("draft serializes to an object");
        assert!(!object.contains_key("industry"));
        assert!(!object.contains_key("_id"));
        assert_eq!(object["contractLevel"], "Gold");
    }
}
