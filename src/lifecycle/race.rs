//! First-of-N completion race.
//!
//! The coordinator blocks on several independent event sources (serve loop
//! exit, shutdown trigger, drain completion) and acts on whichever finishes
//! first. `Race` collects those sources as named futures so a new trigger is
//! one more `.with(..)` call rather than a new `select!` arm.

use std::future::Future;

use futures_util::future::{select_all, BoxFuture, FutureExt};

/// The source that completed first, and its output.
#[derive(Debug)]
pub struct Winner<T> {
    /// Name the source was registered under.
    pub source: &'static str,
    /// The source's output.
    pub value: T,
}

/// A set of named futures with a common output type.
pub struct Race<'a, T> {
    names: Vec<&'static str>,
    sources: Vec<BoxFuture<'a, T>>,
}

impl<'a, T> Race<'a, T> {
    /// Start a race with its first completion source.
    pub fn new<F>(name: &'static str, source: F) -> Self
    where
        F: Future<Output = T> + Send + 'a,
    {
        Self {
            names: vec![name],
            sources: vec![source.boxed()],
        }
    }

    /// Add a completion source. Sources are polled in insertion order, so an
    /// earlier source wins when several are ready at once.
    pub fn with<F>(mut self, name: &'static str, source: F) -> Self
    where
        F: Future<Output = T> + Send + 'a,
    {
        self.names.push(name);
        self.sources.push(source.boxed());
        self
    }

    /// Wait for the first source to complete. The remaining sources are dropped.
    pub async fn run(self) -> Winner<T> {
        let (value, index, _rest) = select_all(self.sources).await;
        Winner {
            source: self.names[index],
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn fastest_source_wins() {
        let winner = Race::new("slow", async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            1
        })
        .with("fast", async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            2
        })
        .run()
        .await;

        assert_eq!(winner.source, "fast");
        assert_eq!(winner.value, 2);
    }

    #[tokio::test]
    async fn insertion_order_breaks_ties() {
        let winner = Race::new("first", std::future::ready("a"))
            .with("second", std::future::ready("b"))
            .run()
            .await;

        assert_eq!(winner.source, "first");
    }

    #[tokio::test]
    async fn losers_are_dropped() {
        struct SetOnDrop(Arc<AtomicBool>);
        impl Drop for SetOnDrop {
            fn drop(&mut self) {
                self.0.store(true, Ordering::SeqCst);
            }
        }

        let dropped = Arc::new(AtomicBool::new(false));
        let guard = SetOnDrop(dropped.clone());

        let race = Race::new("ready", std::future::ready(())).with("pending", async move {
            let _guard = guard;
            std::future::pending::<()>().await
        });
        race.run().await;
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn borrows_local_state() {
        let mut counter = 0u32;
        let winner = Race::new("bump", async {
            counter += 1;
            counter
        })
        .run()
        .await;

        assert_eq!(winner.value, 1);
        assert_eq!(counter, 1);
    }
}
