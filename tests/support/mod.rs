//! Shared helpers for integration tests.

use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with one environment variable temporarily set or removed.
///
/// The previous value is restored afterwards, also on unwind, and access is
/// serialized so parallel tests never observe each other's variables.
///
/// `value` is `Some(v)` to set the variable or `None` to remove it.
pub fn with_env<F, R>(key: &str, value: Option<&str>, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = RestoreEnv {
        key: key.to_string(),
        previous: std::env::var(key).ok(),
    };

    match value {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }

    f()
}

struct RestoreEnv {
    key: String,
    previous: Option<String>,
}

impl Drop for RestoreEnv {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(v) => std::env::set_var(&self.key, v),
            None => std::env::remove_var(&self.key),
        }
    }
}
