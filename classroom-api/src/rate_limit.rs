use core::fmt;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time::{Instant, sleep};

/// Serializes access to `T` and keeps consecutive uses at least
/// `min_interval` apart, so platform calls stay well under upstream quota.
/// Naturally-spaced calls pay no delay.
pub struct RateLimited<T> {
    inner: Mutex<Inner<T>>,
    min_interval: Duration,
}

#[derive(Debug)]
struct Inner<T> {
    t: T,
    last_use: Option<Instant>,
}

impl<T> RateLimited<T> {
    pub fn new(t: T, min_interval: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner { t, last_use: None }),
            min_interval,
        }
    }

    pub async fn get(&self) -> impl std::ops::DerefMut<Target = T> + '_ {
        let mut inner = self.inner.lock().await;
        if let Some(last_use) = inner.last_use {
            let since = last_use.elapsed();
            if since < self.min_interval {
                sleep(self.min_interval - since).await;
            }
        }
        inner.last_use = Some(Instant::now());
        MutexGuard::map(inner, |inner| &mut inner.t)
    }
}

impl<T: fmt::Debug> fmt::Debug for RateLimited<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("RateLimited").field(&self.inner).finish()
    }
}
