//! Shared test utilities for unit tests.
//!
//! This module is only compiled during testing (`#[cfg(test)]`).

use crate::config::manager::HOME_ENV_VAR;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize tests that modify `PROXIMITY_MONITOR_HOME`.
static HOME_LOCK: Mutex<()> = Mutex::new(());

/// Helper function to create a temporary test directory using tempfile.
/// Returns a `TempDir` that automatically cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// RAII guard that points `PROXIMITY_MONITOR_HOME` at a temp directory for
/// a test scope and restores the original value when dropped.
///
/// # Safety Considerations
///
/// `std::env::set_var` and `std::env::remove_var` are unsafe because another
/// thread may read the environment concurrently. `HOME_LOCK` is held for the
/// guard's lifetime so only one test modifies the variable at a time, and
/// only code under such a guard reads it in a way that matters.
pub struct HomeGuard {
    original: Option<std::ffi::OsString>,
    // Held for the lifetime of this struct
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables under a global lock"
)]
impl HomeGuard {
    /// Create a new guard that sets the home override to the given temp directory path.
    pub fn new(temp_dir: &TempDir) -> Self {
        // A panicking test poisons the lock; the protected data is `()` so
        // recovering is fine
        let lock = HOME_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let original = std::env::var_os(HOME_ENV_VAR);
        // SAFETY: serialized by HOME_LOCK, restored on drop
        unsafe {
            std::env::set_var(HOME_ENV_VAR, temp_dir.path());
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables under a global lock"
)]
impl Drop for HomeGuard {
    fn drop(&mut self) {
        // SAFETY: the guard still holds HOME_LOCK
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var(HOME_ENV_VAR, original);
            }
        } else {
            unsafe {
                std::env::remove_var(HOME_ENV_VAR);
            }
        }
    }
}
