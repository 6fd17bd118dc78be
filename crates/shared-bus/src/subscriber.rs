//! # Event Subscriber
//!
//! Defines the subscription side of the event bus.

use crate::events::{BeaconEvent, EventFilter};
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::warn;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event bus was closed.
    #[error("Event bus closed")]
    Closed,
}

/// A subscription handle for receiving events.
///
/// The bus keeps at most its capacity of undelivered events per subscriber.
/// A subscriber that falls further behind loses the oldest ones; the loss is
/// counted in [`lagged`](Self::lagged) so the owner can resynchronise.
pub struct Subscription {
    /// The broadcast receiver.
    receiver: broadcast::Receiver<BeaconEvent>,

    /// Filter for this subscription.
    filter: EventFilter,

    /// Events lost to lag since creation.
    lagged: u64,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<BeaconEvent>, filter: EventFilter) -> Self {
        Self {
            receiver,
            filter,
            lagged: 0,
        }
    }

    /// Total events this subscriber lost by falling behind.
    #[must_use]
    pub fn lagged(&self) -> u64 {
        self.lagged
    }

    fn record_lag(&mut self, count: u64) {
        self.lagged += count;
        warn!(
            lagged = count,
            total = self.lagged,
            "[bus] subscriber lagged, events dropped"
        );
    }

    /// Receive the next event that matches the filter.
    ///
    /// # Returns
    ///
    /// - `Some(event)` - The next matching event
    /// - `None` - The channel was closed (bus dropped)
    pub async fn recv(&mut self) -> Option<BeaconEvent> {
        loop {
            let event = match self.receiver.recv().await {
                Ok(e) => e,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    self.record_lag(count);
                    continue;
                }
            };

            if self.filter.matches(&event) {
                return Some(event);
            }
        }
    }

    /// Try to receive the next event without blocking.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(event))` - An event was available and matched
    /// - `Ok(None)` - No event available (would block)
    /// - `Err(SubscriptionError::Closed)` - The channel was closed
    pub fn try_recv(&mut self) -> Result<Option<BeaconEvent>, SubscriptionError> {
        loop {
            let event = match self.receiver.try_recv() {
                Ok(e) => e,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(count)) => {
                    self.record_lag(count);
                    continue;
                }
            };

            if self.filter.matches(&event) {
                return Ok(Some(event));
            }
        }
    }

    /// Get the filter for this subscription.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

/// A stream wrapper for subscriptions.
///
/// Implements `tokio_stream::Stream` for use with stream combinators.
pub struct EventStream {
    inner: BroadcastStream<BeaconEvent>,
    filter: EventFilter,
}

impl EventStream {
    /// Create a new event stream from a subscription.
    #[must_use]
    pub fn new(subscription: Subscription) -> Self {
        Self {
            inner: BroadcastStream::new(subscription.receiver),
            filter: subscription.filter,
        }
    }

    /// Get the filter for this stream.
    #[must_use]
    pub fn event_filter(&self) -> &EventFilter {
        &self.filter
    }
}

impl Stream for EventStream {
    type Item = BeaconEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match Pin::new(&mut self.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(event))) => {
                    if self.filter.matches(&event) {
                        return Poll::Ready(Some(event));
                    }
                }
                Poll::Ready(Some(Err(BroadcastStreamRecvError::Lagged(count)))) => {
                    warn!(lagged = count, "[bus] stream lagged, events dropped");
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
