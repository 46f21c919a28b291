//! Running futures against a [`Deadline`].

use std::future::Future;

use enginekit_core::{Clock, Deadline, Error, Result};

/// Await `fut` for at most the time left on `deadline`.
///
/// An already-expired deadline fails without polling the future.
pub async fn within<C, F, T>(deadline: &Deadline<C>, fut: F) -> Result<T>
where
    C: Clock,
    F: Future<Output = Result<T>>,
{
    let exceeded = || Error::DeadlineExceeded {
        budget_ms: deadline.budget_ms(),
    };

    let Some(remaining) = deadline.remaining() else {
        return Err(exceeded());
    };

    match tokio::time::timeout(remaining, fut).await {
        Ok(result) => result,
        Err(_) => Err(exceeded()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::{Duration, Instant};

    use enginekit_core::ManualClock;

    use super::*;

    #[tokio::test]
    async fn test_completes_inside_budget() {
        let deadline = Deadline::new(5_000.0);
        let value = within(&deadline, async { Ok::<_, Error>(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let deadline = Deadline::new(5_000.0);
        let err = within(&deadline, async { Err::<(), _>(Error::Http("boom".into())) })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }

    #[tokio::test]
    async fn test_expired_deadline_skips_future() {
        let clock = ManualClock::new(0.0);
        let deadline = Deadline::with_clock(100.0, &clock);
        clock.set(1.0);

        let polled = AtomicBool::new(false);
        let err = within(&deadline, async {
            polled.store(true, Ordering::SeqCst);
            Ok::<_, Error>(())
        })
        .await
        .unwrap_err();

        assert!(err.is_deadline());
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_slow_future_is_cut_off() {
        let deadline = Deadline::new(50.0);
        let started = Instant::now();
        let err = within(&deadline, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, Error>(())
        })
        .await
        .unwrap_err();

        assert!(err.is_deadline());
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
