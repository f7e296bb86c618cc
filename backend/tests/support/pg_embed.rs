//! Embedded PostgreSQL bootstrap for the Diesel suite.
//!
//! `pg-embed-setup-unpriv` installs binaries and data under `/var/tmp` unless
//! `PG_RUNTIME_DIR` and `PG_DATA_DIR` say otherwise. When either is unset,
//! both are pointed at a fresh directory below the cargo target directory
//! for the duration of the bootstrap.

use std::path::PathBuf;
use std::sync::{LazyLock, Mutex};
use std::time::Duration;

use pg_embedded_setup_unpriv::TestCluster;
use uuid::Uuid;

/// Bootstraps mutate process environment, so only one runs at a time.
static BOOTSTRAP: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Download and network failures worth another attempt.
const TRANSIENT_PATTERNS: [&str; 7] = [
    "error decoding response body",
    "connection reset",
    "connection refused",
    "timed out",
    "timeout",
    "temporarily unavailable",
    "dns error",
];

fn scratch_root() -> PathBuf {
    std::env::var_os("CARGO_TARGET_DIR").map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../target"),
        PathBuf::from,
    )
}

fn scratch_dirs() -> std::io::Result<(String, String)> {
    let base = scratch_root()
        .join("pg-embed")
        .join(format!("roster-{}-{}", std::process::id(), Uuid::new_v4()));
    let runtime = base.join("install");
    let data = base.join("data");
    std::fs::create_dir_all(&runtime)?;
    std::fs::create_dir_all(&data)?;
    Ok((
        runtime.to_string_lossy().into_owned(),
        data.to_string_lossy().into_owned(),
    ))
}

fn is_transient(message: &str) -> bool {
    let lowered = message.to_lowercase();
    TRANSIENT_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
}

/// Start a private cluster, retrying transient download failures with
/// exponential back-off.
///
/// The cluster shuts down when the returned guard is dropped.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _bootstrap = BOOTSTRAP
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);

    let _env = if std::env::var_os("PG_RUNTIME_DIR").is_none()
        || std::env::var_os("PG_DATA_DIR").is_none()
    {
        let (runtime, data) = scratch_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime)),
            ("PG_DATA_DIR", Some(data)),
        ]))
    } else {
        None
    };

    let mut attempt = 0;
    loop {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                let message = format!("{err:?}");
                if attempt >= MAX_RETRIES || !is_transient(&message) {
                    return Err(message);
                }
                let delay = RETRY_DELAY * 2_u32.pow(attempt);
                eprintln!("pg-embed: attempt {} failed, retrying in {delay:?}: {message}", attempt + 1);
                std::thread::sleep(delay);
                attempt += 1;
            }
        }
    }
}
