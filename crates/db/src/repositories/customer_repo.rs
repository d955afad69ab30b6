//! Repository for the `clientes` table.

use sqlx::PgPool;

use crate::models::customer::CustomerRow;

/// Name of the customer relation, used in diagnostics.
pub const CUSTOMER_TABLE: &str = "clientes";

/// Column list for `clientes` queries. `id` is widened so both
/// `SERIAL` and `BIGSERIAL` schemas decode.
const COLUMNS: &str = "id::BIGINT AS id, nome_empresa, adscode";

/// Provides read access to customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// List every customer ordered by company name ascending.
    pub async fn list_ordered(pool: &PgPool) -> Result<Vec<CustomerRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {CUSTOMER_TABLE} ORDER BY nome_empresa ASC");
        sqlx::query_as::<_, CustomerRow>(&query)
            .fetch_all(pool)
            .await
    }
}
