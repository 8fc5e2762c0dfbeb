// Channel-backed position source
use crate::application::tracking::{
    PositionEvent, PositionSample, PositionSource, TrackingError, TrackingErrorKind, WatchOptions,
};
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Create a connected feed/source pair. Events pushed into the feed are
/// delivered to whoever watches the source
pub fn channel(capacity: usize) -> (PositionFeed, ChannelPositionSource) {
    let (tx, rx) = mpsc::channel(capacity);
    (
        PositionFeed { sender: tx },
        ChannelPositionSource {
            receiver: Mutex::new(Some(rx)),
        },
    )
}

#[derive(Debug, Clone)]
pub struct PositionFeed {
    sender: mpsc::Sender<PositionEvent>,
}

impl PositionFeed {
    pub async fn sample(
        &self,
        sample: PositionSample,
    ) -> Result<(), mpsc::error::SendError<PositionEvent>> {
        self.sender.send(PositionEvent::Sample(sample)).await
    }

    pub async fn error(
        &self,
        error: TrackingError,
    ) -> Result<(), mpsc::error::SendError<PositionEvent>> {
        self.sender.send(PositionEvent::Error(error)).await
    }

    /// Resolves once nobody is watching the source any more
    pub async fn closed(&self) {
        self.sender.closed().await
    }
}

/// A source that can be watched once
#[derive(Debug)]
pub struct ChannelPositionSource {
    receiver: Mutex<Option<mpsc::Receiver<PositionEvent>>>,
}

#[async_trait]
impl PositionSource for ChannelPositionSource {
    async fn watch(
        &self,
        options: WatchOptions,
    ) -> Result<BoxStream<'static, PositionEvent>, TrackingError> {
        let receiver = self
            .receiver
            .lock()
            .map_err(|_| TrackingError::new(TrackingErrorKind::Unknown, "position source poisoned"))?
            .take();

        let Some(mut rx) = receiver else {
            return Err(TrackingError::new(
                TrackingErrorKind::Unavailable,
                "position source is already being watched",
            ));
        };

        tracing::debug!("Watching channel position source with {:?}", options);

        let stream = async_stream::stream! {
            while let Some(event) = rx.recv().await {
                yield event;
            }
        };
        Ok(stream.boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_flow_through() {
        let (feed, source) = channel(4);
        let mut events = source.watch(WatchOptions::default()).await.unwrap();

        let sample = PositionSample {
            latitude: 1.0,
            longitude: 2.0,
            accuracy: None,
            timestamp: 3,
        };
        feed.sample(sample.clone()).await.unwrap();
        drop(feed);

        assert_eq!(events.next().await, Some(PositionEvent::Sample(sample)));
        assert_eq!(events.next().await, None);
    }

    #[tokio::test]
    async fn test_second_watch_is_refused() {
        let (_feed, source) = channel(4);
        let _events = source.watch(WatchOptions::default()).await.unwrap();

        let err = source.watch(WatchOptions::default()).await.err().unwrap();
        assert_eq!(err.kind, TrackingErrorKind::Unavailable);
    }
}
