//! Environment helpers shared by the configuration integration tests.

use std::ffi::{OsStr, OsString};
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Serialises environment access for the lifetime of a test.
pub struct EnvLock {
    overrides: Vec<(&'static str, Option<OsString>)>,
    _guard: MutexGuard<'static, ()>,
}

impl EnvLock {
    pub fn acquire() -> Self {
        let guard = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Self {
            overrides: Vec::new(),
            _guard: guard,
        }
    }

    pub fn set_var(&mut self, key: &'static str, value: impl AsRef<OsStr>) {
        let previous = std::env::var_os(key);
        // SAFETY: callers hold `ENV_MUTEX`, and `Drop` restores the value.
        unsafe { std::env::set_var(key, value) };
        self.overrides.push((key, previous));
    }
}

impl Drop for EnvLock {
    fn drop(&mut self) {
        while let Some((key, previous)) = self.overrides.pop() {
            match previous {
                Some(value) => unsafe { std::env::set_var(key, value) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}
