//! Embedded PostgreSQL databases for running suites against the Diesel store.
//!
//! One cluster is shared by every test in a binary. Each test gets its own
//! database cloned from a template with the forum migrations applied. The
//! template name carries a hash of `backend/migrations`, so a schema change
//! never reuses a stale template.
//!
//! Set `SKIP_TEST_CLUSTER=1` to skip the PostgreSQL suites where no cluster
//! can be started; otherwise a setup failure fails the test.

use std::future::Future;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use forum_backend::domain::ports::StorePorts;
use forum_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations, store_ports};
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use uuid::Uuid;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "forum_template";
const POOL_SIZE: u32 = 8;

fn template_database_name() -> Result<String, String> {
    let migrations = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let hash = hash_directory(migrations).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Create the migrated template once per cluster and return its name.
fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template_name);
        run_pending_migrations(&url).map_err(|err| format!("migrate template: {err}"))?;
    }

    Ok(template_name)
}

fn provision_database() -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster_handle().map_err(|err| format!("start cluster: {err:?}"))?;
    let template_name = ensure_template_database(cluster)?;
    let database_name = format!("test_{}", Uuid::new_v4());
    cluster
        .temporary_database_from_template(database_name.as_str(), template_name.as_str())
        .map_err(|err| format!("create database from template: {err:?}"))
}

/// True when `SKIP_TEST_CLUSTER` is `1`, `true`, or `yes`.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Run `scenario` over Diesel ports backed by a fresh database.
///
/// The database is provisioned before the actix runtime starts and dropped
/// after it stops.
pub fn with_postgres_ports<F, Fut>(scenario: F)
where
    F: FnOnce(StorePorts) -> Fut,
    Fut: Future<Output = ()>,
{
    let database = match provision_database() {
        Ok(database) => database,
        Err(reason) if should_skip_test_cluster() => {
            eprintln!("SKIP-TEST-CLUSTER: {reason}");
            return;
        }
        Err(reason) => {
            panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.")
        }
    };

    let url = database.url().to_owned();
    actix_web::rt::System::new().block_on(async move {
        let config = PoolConfig::new(url).with_max_size(POOL_SIZE);
        let pool = DbPool::new(config).await.expect("pool opens");
        scenario(store_ports(&pool)).await;
    });
    drop(database);
}
