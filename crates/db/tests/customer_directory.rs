//! Database tests for the customer directory.
//!
//! These need a reachable Postgres (`DATABASE_URL`); run them with
//! `cargo test -p launcher-db -- --ignored`.

use std::sync::Arc;

use launcher_core::error::DirectoryUnavailable;
use launcher_db::directory::{CustomerDirectory, CustomerSource, PgCustomerSource, DEFAULT_CACHE_TTL};
use launcher_db::repositories::CustomerRepo;
use sqlx::PgPool;

async fn seed(pool: &PgPool, rows: &[(&str, &str)]) {
    for (name, code) in rows {
        sqlx::query("INSERT INTO clientes (nome_empresa, adscode) VALUES ($1, $2)")
            .bind(name)
            .bind(code)
            .execute(pool)
            .await
            .unwrap();
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn repo_lists_customers_by_company_name(pool: PgPool) {
    seed(
        &pool,
        &[
            ("Oficina do Zé", "333-333-3333"),
            ("Advocacia Lima", "111-111-1111"),
            ("Clínica Sorriso", "222-222-2222"),
        ],
    )
    .await;

    let rows = CustomerRepo::list_ordered(&pool).await.unwrap();
    let names: Vec<_> = rows
        .iter()
        .map(|r| r.nome_empresa.clone().unwrap_or_default())
        .collect();
    assert_eq!(names, ["Advocacia Lima", "Clínica Sorriso", "Oficina do Zé"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn directory_maps_rows_to_records(pool: PgPool) {
    seed(&pool, &[("Padaria Central", "123-456-7890")]).await;

    let directory =
        CustomerDirectory::new(Arc::new(PgCustomerSource::new(pool)), DEFAULT_CACHE_TTL);
    let listing = directory.list_customers().await;

    assert_eq!(listing.unavailable, None);
    assert_eq!(listing.customers.len(), 1);
    assert_eq!(
        listing.customers[0].display_name(),
        "Padaria Central (123-456-7890)"
    );
}

#[sqlx::test(migrations = false)]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn missing_relation_reports_schema_missing(pool: PgPool) {
    let source = PgCustomerSource::new(pool);
    let err = source.fetch_customers().await.unwrap_err();
    assert_eq!(
        err,
        DirectoryUnavailable::SchemaMissing {
            relation: "clientes"
        }
    );
}
