use crate::subscription::{SubscriptionId, SubscriptionSource};
use futures::stream::BoxStream;
use std::time::{Duration, Instant};

/// A one-shot delay that emits a single [`Instant`] after `duration`.
///
/// Because it is a subscription rather than a command, dropping it from
/// [`Model::subscriptions`](crate::Model::subscriptions) before it fires
/// cancels the pending timer.
///
/// ```rust,ignore
/// let sub = subscribe(After::new(Duration::from_millis(500), "splash"))
///     .map(|_| Msg::SplashDone);
/// ```
pub struct After {
    /// How long to wait before firing.
    pub duration: Duration,
    /// Distinguishes concurrent delays of the same length.
    pub id: &'static str,
}

impl After {
    /// Create a new one-shot delay.
    pub fn new(duration: Duration, id: &'static str) -> Self {
        Self { duration, id }
    }
}

impl SubscriptionSource for After {
    type Output = Instant;

    fn id(&self) -> SubscriptionId {
        SubscriptionId::with_str::<Self>(self.id)
    }

    fn stream(self) -> BoxStream<'static, Instant> {
        Box::pin(futures::stream::once(async move {
            tokio::time::sleep(self.duration).await;
            Instant::now()
        }))
    }
}
