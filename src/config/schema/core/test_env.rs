use std::sync::{Mutex, MutexGuard, PoisonError};

/// Every variable `Config::apply_env_overrides` reads.
const OVERRIDE_VARS: [&str; 9] = [
    "DISCORD_BOT_TOKEN",
    "DISCORD_CLIENT_ID",
    "DISCORD_ENABLE_YOUTUBE",
    "SYNCFM_API_BASE",
    "POSTHOG_API_KEY",
    "POSTHOG_HOST",
    "POSTHOG_FLUSH_AT",
    "POSTHOG_FLUSH_INTERVAL_MS",
    "POSTHOG_DISABLED",
];

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Exclusive access to the override variables for one test.
///
/// Starts with all of them unset and puts the previous values back on drop,
/// while the lock is still held.
pub(super) struct ScopedEnv {
    _lock: MutexGuard<'static, ()>,
    saved: Vec<(&'static str, Option<String>)>,
}

impl ScopedEnv {
    pub(super) fn clean() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = OVERRIDE_VARS
            .iter()
            .map(|&key| (key, std::env::var(key).ok()))
            .collect();
        for key in OVERRIDE_VARS {
            // SAFETY: ENV_LOCK is held; config tests touch the env only
            // through this guard.
            unsafe {
                std::env::remove_var(key);
            }
        }
        Self { _lock: lock, saved }
    }

    pub(super) fn set(&self, key: &'static str, value: &str) -> &Self {
        assert!(
            OVERRIDE_VARS.contains(&key),
            "{key} is not read by apply_env_overrides"
        );
        // SAFETY: see `clean`.
        unsafe {
            std::env::set_var(key, value);
        }
        self
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, previous) in &self.saved {
            // SAFETY: `_lock` is released only after this body returns.
            unsafe {
                match previous {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
