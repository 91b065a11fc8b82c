//! Single-instance lock for the server.
//!
//! Two servers ticking the same reminder tables would double-fire every
//! notification, so startup takes an exclusive file lock and refuses to run
//! alongside another instance.

use anyhow::{Context, Result, anyhow};
use fs2::FileExt;
use std::fs::{self, File};
use std::path::PathBuf;

/// Held for the lifetime of the process; the lock releases on drop.
pub struct InstanceLock {
    _file: File,
}

impl InstanceLock {
    pub fn acquire() -> Result<Self> {
        let path = lock_path()?;
        let file = File::create(&path).context("Failed to create lock file")?;

        file.try_lock_exclusive().map_err(|_| {
            anyhow!(
                "Another weekplan-server instance is already running.\n\
                If you believe this is an error, remove: {}",
                path.display()
            )
        })?;

        Ok(InstanceLock { _file: file })
    }
}

fn lock_path() -> Result<PathBuf> {
    let runtime_dir = dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .ok_or_else(|| anyhow!("Could not determine runtime directory"))?;

    let dir = runtime_dir.join("weekplan");
    fs::create_dir_all(&dir)?;

    Ok(dir.join("server.lock"))
}
