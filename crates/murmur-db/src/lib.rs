pub mod migrations;
pub mod models;
pub mod queries;
pub mod store;

pub use store::{AccountStore, MessageStore};

use anyhow::{Result, bail};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, TryLockError};
use std::time::{Duration, Instant};
use tracing::{info, warn};

const ACQUIRE_BACKOFF: Duration = Duration::from_millis(2);

/// Sizing and timeout bounds for the connection pool.
#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    /// Number of read-only connections. Clamped to at least one.
    pub readers: usize,
    /// How long an operation may wait for a free connection before failing.
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            readers: 4,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// SQLite store with a reader/writer split.
///
/// All writes go through the single writer connection; reads are spread
/// round-robin over the reader pool. Connections are only reachable through
/// [`Database::with_reader`] and [`Database::with_writer`], so every
/// acquisition is released when the closure returns, errors or unwinds.
pub struct Database {
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    reader_idx: AtomicUsize,
    acquire_timeout: Duration,
}

impl Database {
    pub fn open(path: &Path, pool: PoolConfig) -> Result<Self> {
        let writer = Connection::open(path)?;

        // WAL mode for concurrent reads
        writer.pragma_update(None, "journal_mode", "WAL")?;
        writer.pragma_update(None, "foreign_keys", "ON")?;
        writer.busy_timeout(pool.acquire_timeout)?;

        migrations::run(&writer)?;

        let reader_count = pool.readers.max(1);
        let mut readers = Vec::with_capacity(reader_count);
        for _ in 0..reader_count {
            let conn = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            conn.busy_timeout(pool.acquire_timeout)?;
            readers.push(Mutex::new(conn));
        }

        info!(
            "Database opened at {} (1 writer + {} readers)",
            path.display(),
            reader_count
        );
        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            reader_idx: AtomicUsize::new(0),
            acquire_timeout: pool.acquire_timeout,
        })
    }

    pub fn with_reader<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let start = self.reader_idx.fetch_add(1, Ordering::Relaxed);
        let conn = self.acquire(&self.readers, start)?;
        f(&conn)
    }

    pub fn with_writer<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.acquire(std::slice::from_ref(&self.writer), 0)?;
        f(&conn)
    }

    /// Grab the first free slot, starting at `start`, polling until the
    /// acquire timeout runs out.
    fn acquire<'a>(
        &self,
        slots: &'a [Mutex<Connection>],
        start: usize,
    ) -> Result<MutexGuard<'a, Connection>> {
        let start = start % slots.len();
        let deadline = Instant::now() + self.acquire_timeout;
        loop {
            for offset in 0..slots.len() {
                let slot = &slots[(start + offset) % slots.len()];
                match slot.try_lock() {
                    Ok(guard) => return Ok(guard),
                    Err(TryLockError::WouldBlock) => continue,
                    Err(TryLockError::Poisoned(poisoned)) => {
                        warn!("Connection lock poisoned by a panicked operation, recovering");
                        let guard = poisoned.into_inner();
                        slot.clear_poison();
                        // A panic may have left a transaction open on this connection.
                        if !guard.is_autocommit() {
                            guard.execute_batch("ROLLBACK")?;
                        }
                        return Ok(guard);
                    }
                }
            }

            if Instant::now() >= deadline {
                bail!(
                    "connection pool exhausted: no connection free after {:?}",
                    self.acquire_timeout
                );
            }
            std::thread::sleep(ACQUIRE_BACKOFF);
        }
    }
}
