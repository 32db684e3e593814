//! A simulated people directory: the item list arrives after a delay, or the
//! fetch fails.

use futures::stream::BoxStream;
use futures::StreamExt;
use std::time::Duration;
use typeahead_core::{After, SubscriptionId, SubscriptionSource};
use typeahead_widgets::Item;

/// Why the directory could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Something went wrong!")]
    Unavailable,
}

/// How the simulated fetch behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    pub delay: Duration,
    /// Fail instead of returning the directory.
    pub fail: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(3000),
            fail: false,
        }
    }
}

/// One delayed fetch, run as a subscription.
///
/// The model declares it only while it is waiting for data. Once the result
/// arrives the model stops declaring it; if the model is torn down first the
/// runtime aborts the pending sleep.
#[derive(Debug, Clone, Copy)]
pub struct MockFetch {
    config: FetchConfig,
}

impl MockFetch {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }
}

impl SubscriptionSource for MockFetch {
    type Output = Result<Vec<Item>, FetchError>;

    fn id(&self) -> SubscriptionId {
        SubscriptionId::of::<Self>()
    }

    fn stream(self) -> BoxStream<'static, Self::Output> {
        let FetchConfig { delay, fail } = self.config;
        After::new(delay, "fetch")
            .stream()
            .map(move |_| {
                if fail {
                    tracing::warn!("simulated fetch failed");
                    Err(FetchError::Unavailable)
                } else {
                    let people = directory();
                    tracing::info!(count = people.len(), "simulated fetch finished");
                    Ok(people)
                }
            })
            .boxed()
    }
}

const NAMES: &[&str] = &[
    "Ada Lovelace",
    "Alan Turing",
    "Grace Hopper",
    "Barbara Liskov",
    "Edsger Dijkstra",
    "Donald Knuth",
    "Margaret Hamilton",
    "Ken Thompson",
    "Dennis Ritchie",
    "Frances Allen",
    "John McCarthy",
    "Radia Perlman",
    "Leslie Lamport",
    "Katherine Johnson",
    "Tony Hoare",
    "Adele Goldberg",
    "Niklaus Wirth",
    "Hedy Lamarr",
    "Robin Milner",
    "Shafi Goldwasser",
];

/// The people the simulated fetch returns.
pub fn directory() -> Vec<Item> {
    NAMES
        .iter()
        .zip(1u64..)
        .map(|(name, id)| Item::new(id, *name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn directory_ids_are_unique() {
        let people = directory();
        let ids: HashSet<u64> = people.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), people.len());
        assert_eq!(people[0], Item::new(1, "Ada Lovelace"));
    }

    #[test]
    fn error_message() {
        assert_eq!(FetchError::Unavailable.to_string(), "Something went wrong!");
    }

    #[test]
    fn default_delay_is_three_seconds() {
        assert_eq!(FetchConfig::default().delay, Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn resolves_once_after_delay() {
        let start = tokio::time::Instant::now();
        let mut stream = MockFetch::new(FetchConfig::default()).stream();
        let people = stream.next().await.unwrap().unwrap();
        assert!(start.elapsed() >= Duration::from_secs(3));
        assert_eq!(people.len(), NAMES.len());
        assert!(stream.next().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn failing_fetch_reports_error() {
        let config = FetchConfig {
            delay: Duration::from_millis(10),
            fail: true,
        };
        let mut stream = MockFetch::new(config).stream();
        assert_eq!(stream.next().await, Some(Err(FetchError::Unavailable)));
    }
}
