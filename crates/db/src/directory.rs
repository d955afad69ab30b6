//! Customer directory with a bounded-staleness cache.
//!
//! [`CustomerDirectory`] never fails: when the store cannot be read it
//! returns an empty listing plus a [`DirectoryUnavailable`] diagnostic,
//! and the next call tries the store again.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use launcher_core::customer::CustomerRecord;
use launcher_core::error::DirectoryUnavailable;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::repositories::customer_repo::{CustomerRepo, CUSTOMER_TABLE};
use crate::DbPool;

/// PostgreSQL SQLSTATE for `undefined_table`.
const UNDEFINED_TABLE: &str = "42P01";

/// Default cache window for customer listings.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Where customer records come from.
#[async_trait]
pub trait CustomerSource: Send + Sync {
    /// Fetch every customer. One read-only query, no retries.
    async fn fetch_customers(&self) -> Result<Vec<CustomerRecord>, DirectoryUnavailable>;
}

/// [`CustomerSource`] backed by the Postgres `clientes` table.
pub struct PgCustomerSource {
    pool: DbPool,
}

impl PgCustomerSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerSource for PgCustomerSource {
    async fn fetch_customers(&self) -> Result<Vec<CustomerRecord>, DirectoryUnavailable> {
        let rows = CustomerRepo::list_ordered(&self.pool)
            .await
            .map_err(|e| classify_error(&e))?;
        Ok(rows.into_iter().map(CustomerRecord::from).collect())
    }
}

/// Map a sqlx error onto the operator-facing diagnostic.
pub fn classify_error(err: &sqlx::Error) -> DirectoryUnavailable {
    if let sqlx::Error::Database(db_err) = err {
        if db_err.code().as_deref() == Some(UNDEFINED_TABLE) {
            return DirectoryUnavailable::SchemaMissing {
                relation: CUSTOMER_TABLE,
            };
        }
    }
    DirectoryUnavailable::ConnectionFailed(err.to_string())
}

/// Result of one directory read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Customers ordered by company name ascending; empty when unavailable.
    pub customers: Vec<CustomerRecord>,
    pub unavailable: Option<DirectoryUnavailable>,
}

impl DirectoryListing {
    fn available(customers: Vec<CustomerRecord>) -> Self {
        Self {
            customers,
            unavailable: None,
        }
    }

    fn unavailable(reason: DirectoryUnavailable) -> Self {
        Self {
            customers: Vec::new(),
            unavailable: Some(reason),
        }
    }
}

struct CachedListing {
    fetched_at: Instant,
    customers: Vec<CustomerRecord>,
}

/// Reads customers through a [`CustomerSource`], caching successful reads.
pub struct CustomerDirectory {
    source: Arc<dyn CustomerSource>,
    ttl: Duration,
    cache: RwLock<Option<CachedListing>>,
}

impl CustomerDirectory {
    pub fn new(source: Arc<dyn CustomerSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            cache: RwLock::new(None),
        }
    }

    /// List customers ordered by company name ascending.
    ///
    /// The order is the store's own (`ORDER BY nome_empresa`, under the
    /// database collation); the directory never re-sorts.
    ///
    /// Served from cache while the last successful read is younger than
    /// the TTL. Failures are not cached.
    pub async fn list_customers(&self) -> DirectoryListing {
        if let Some(customers) = self.cached().await {
            return DirectoryListing::available(customers);
        }

        match self.source.fetch_customers().await {
            Ok(customers) => {
                tracing::debug!(count = customers.len(), "Customer directory refreshed");
                let mut cache = self.cache.write().await;
                *cache = Some(CachedListing {
                    fetched_at: Instant::now(),
                    customers: customers.clone(),
                });
                DirectoryListing::available(customers)
            }
            Err(reason) => {
                tracing::warn!(error = %reason, "Customer directory unavailable");
                DirectoryListing::unavailable(reason)
            }
        }
    }

    /// Drop the cached listing so the next read hits the store.
    pub async fn invalidate(&self) {
        self.cache.write().await.take();
    }

    async fn cached(&self) -> Option<Vec<CustomerRecord>> {
        let cache = self.cache.read().await;
        cache
            .as_ref()
            .filter(|c| c.fetched_at.elapsed() < self.ttl)
            .map(|c| c.customers.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use assert_matches::assert_matches;

    use super::*;

    fn customer(id: i64, name: &str) -> CustomerRecord {
        CustomerRecord {
            id,
            company_name: name.to_string(),
            ads_code: format!("{id}00-000-0000"),
        }
    }

    /// Scripted source: pops one response per call, repeating the last.
    struct ScriptedSource {
        responses: Mutex<Vec<Result<Vec<CustomerRecord>, DirectoryUnavailable>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<Vec<CustomerRecord>, DirectoryUnavailable>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CustomerSource for ScriptedSource {
        async fn fetch_customers(&self) -> Result<Vec<CustomerRecord>, DirectoryUnavailable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut responses = self.responses.lock().unwrap();
            if responses.len() > 1 {
                responses.remove(0)
            } else {
                responses[0].clone()
            }
        }
    }

    #[tokio::test]
    async fn listing_keeps_store_collation_order() {
        // Collation order for mixed case and accents, as Postgres returns it.
        let source = ScriptedSource::new(vec![Ok(vec![
            customer(1, "alpha dental"),
            customer(2, "Beta Ltda"),
            customer(3, "Ótica Visão"),
            customer(4, "Zeta Imports"),
        ])]);
        let directory = CustomerDirectory::new(source, DEFAULT_CACHE_TTL);

        let listing = directory.list_customers().await;
        let names: Vec<_> = listing
            .customers
            .iter()
            .map(|c| c.company_name.as_str())
            .collect();
        assert_eq!(names, ["alpha dental", "Beta Ltda", "Ótica Visão", "Zeta Imports"]);
        assert_eq!(listing.unavailable, None);
    }

    #[tokio::test]
    async fn repeated_reads_within_ttl_hit_cache() {
        let source = ScriptedSource::new(vec![
            Ok(vec![customer(1, "First")]),
            Ok(vec![customer(2, "Changed")]),
        ]);
        let directory = CustomerDirectory::new(source.clone(), DEFAULT_CACHE_TTL);

        let first = directory.list_customers().await;
        let second = directory.list_customers().await;
        assert_eq!(first, second);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn expired_cache_refetches() {
        let source = ScriptedSource::new(vec![
            Ok(vec![customer(1, "First")]),
            Ok(vec![customer(2, "Changed")]),
        ]);
        let directory = CustomerDirectory::new(source.clone(), Duration::ZERO);

        directory.list_customers().await;
        let second = directory.list_customers().await;
        assert_eq!(second.customers[0].company_name, "Changed");
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let source = ScriptedSource::new(vec![Ok(vec![customer(1, "Only")])]);
        let directory = CustomerDirectory::new(source.clone(), DEFAULT_CACHE_TTL);

        directory.list_customers().await;
        directory.invalidate().await;
        directory.list_customers().await;
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn unavailable_store_yields_empty_listing_with_diagnostic() {
        let source = ScriptedSource::new(vec![Err(DirectoryUnavailable::SchemaMissing {
            relation: CUSTOMER_TABLE,
        })]);
        let directory = CustomerDirectory::new(source, DEFAULT_CACHE_TTL);

        let listing = directory.list_customers().await;
        assert!(listing.customers.is_empty());
        assert_matches!(
            listing.unavailable,
            Some(DirectoryUnavailable::SchemaMissing { relation: "clientes" })
        );
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let source = ScriptedSource::new(vec![
            Err(DirectoryUnavailable::ConnectionFailed("refused".into())),
            Ok(vec![customer(1, "Back")]),
        ]);
        let directory = CustomerDirectory::new(source.clone(), DEFAULT_CACHE_TTL);

        let first = directory.list_customers().await;
        assert!(first.unavailable.is_some());
        let second = directory.list_customers().await;
        assert_eq!(second.unavailable, None);
        assert_eq!(second.customers.len(), 1);
        assert_eq!(source.calls(), 2);
    }

    #[test]
    fn non_database_errors_classify_as_connection_failures() {
        assert_matches!(
            classify_error(&sqlx::Error::PoolTimedOut),
            DirectoryUnavailable::ConnectionFailed(_)
        );
    }
}
