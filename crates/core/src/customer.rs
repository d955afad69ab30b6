//! Customer records read from the agency directory.

use serde::Serialize;

use crate::types::DbId;

/// A customer row as read from the directory store.
///
/// Read-only snapshot; the launcher never writes customers back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRecord {
    pub id: DbId,
    pub company_name: String,
    /// Advertising account code assigned to this customer.
    pub ads_code: String,
}

impl CustomerRecord {
    /// Label used in the customer picker: `"{company} ({ads code})"`.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.company_name, self.ads_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: DbId, name: &str, code: &str) -> CustomerRecord {
        CustomerRecord {
            id,
            company_name: name.to_string(),
            ads_code: code.to_string(),
        }
    }

    #[test]
    fn display_name_appends_ads_code() {
        let c = customer(1, "Padaria Central", "123-456-7890");
        assert_eq!(c.display_name(), "Padaria Central (123-456-7890)");
    }
}
