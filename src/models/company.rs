//! Company model.

use serde::{Deserialize, Serialize};

use crate::models::schema::{Allocation, EntitySchema, KeyType};

/// A company, keyed by a caller-chosen identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub company_id: String,
    pub name: String,
}

/// Fields a company update may change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyPatch {
    #[serde(default)]
    pub name: Option<String>,
}

impl EntitySchema for Company {
    const LABEL: &'static str = "Company";
    const KEY: &'static str = "company_id";
    const KEY_TYPE: KeyType = KeyType::Text;
    const ALLOCATION: Allocation = Allocation::Upsert;

    type Draft = Company;
    type Patch = CompanyPatch;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_company_from_properties() {
        let props = json!({"company_id": "acme", "name": "Acme"});
        let company = Company::from_properties(props.as_object().unwrap().clone()).unwrap();
        assert_eq!(
            company,
            Company {
                company_id: "acme".into(),
                name: "Acme".into()
            }
        );
    }
}
