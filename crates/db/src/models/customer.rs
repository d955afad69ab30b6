//! Row mapping for the `clientes` table.

use launcher_core::customer::CustomerRecord;
use launcher_core::types::DbId;
use sqlx::FromRow;

/// A row from the `clientes` table.
///
/// Column names follow the back-office schema (`nome_empresa`,
/// `adscode`). Both are nullable there.
#[derive(Debug, Clone, FromRow)]
pub struct CustomerRow {
    pub id: DbId,
    pub nome_empresa: Option<String>,
    pub adscode: Option<String>,
}

impl From<CustomerRow> for CustomerRecord {
    fn from(row: CustomerRow) -> Self {
        CustomerRecord {
            id: row.id,
            company_name: row.nome_empresa.unwrap_or_default(),
            ads_code: row.adscode.unwrap_or_default(),
        }
    }
}
