// Tracking adapter - Feeds live position updates into the location log
use crate::application::location_log::LocationLogStore;
use crate::domain::location::LocationPoint;
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingErrorKind {
    PermissionDenied,
    Unavailable,
    Timeout,
    Unknown,
}

impl TrackingErrorKind {
    /// Map a W3C geolocation error code
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => TrackingErrorKind::PermissionDenied,
            2 => TrackingErrorKind::Unavailable,
            3 => TrackingErrorKind::Timeout,
            _ => TrackingErrorKind::Unknown,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            TrackingErrorKind::PermissionDenied => {
                "Location permission denied. Please enable location in your browser settings."
            }
            TrackingErrorKind::Unavailable => "Location unavailable. Please check your device's GPS.",
            TrackingErrorKind::Timeout => "Location request timed out. Please try again.",
            TrackingErrorKind::Unknown => "Unknown location error.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct TrackingError {
    pub kind: TrackingErrorKind,
    pub message: String,
}

impl TrackingError {
    pub fn new(kind: TrackingErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// A raw reading from a position source
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSample {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub timestamp: i64,
}

impl PositionSample {
    pub fn into_point(self, id: impl Into<String>) -> LocationPoint {
        LocationPoint {
            id: id.into(),
            latitude: self.latitude,
            longitude: self.longitude,
            timestamp: self.timestamp,
            accuracy: self.accuracy,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PositionEvent {
    Sample(PositionSample),
    Error(TrackingError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchOptions {
    pub high_accuracy: bool,
    /// Oldest cached reading the source may hand back
    pub maximum_age_ms: u64,
    pub timeout_ms: u64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            maximum_age_ms: 30_000,
            timeout_ms: 27_000,
        }
    }
}

/// A live position feed, such as a platform geolocation watch
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Start watching. The returned stream ends when the source stops
    async fn watch(
        &self,
        options: WatchOptions,
    ) -> Result<BoxStream<'static, PositionEvent>, TrackingError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    #[default]
    Unknown,
    Granted,
    Denied,
}

pub struct LocationTracker {
    store: Arc<LocationLogStore>,
    options: WatchOptions,
    permission: Arc<watch::Sender<PermissionState>>,
}

impl LocationTracker {
    pub fn new(store: Arc<LocationLogStore>) -> Self {
        Self::with_options(store, WatchOptions::default())
    }

    pub fn with_options(store: Arc<LocationLogStore>, options: WatchOptions) -> Self {
        let (permission, _) = watch::channel(PermissionState::Unknown);
        Self {
            store,
            options,
            permission: Arc::new(permission),
        }
    }

    pub fn permission(&self) -> PermissionState {
        *self.permission.borrow()
    }

    /// Observe permission changes, e.g. to prompt the user after a denial
    pub fn permission_changes(&self) -> watch::Receiver<PermissionState> {
        self.permission.subscribe()
    }

    /// Start appending every sample from `source` to the log
    ///
    /// Errors from the source are logged and handed to `on_error`; a
    /// permission denial also flips the tracker's permission state. The
    /// subscription runs until the handle is unsubscribed or dropped, or the
    /// source's stream ends
    pub async fn subscribe<F>(
        &self,
        source: &dyn PositionSource,
        on_error: F,
    ) -> Result<TrackingHandle, TrackingError>
    where
        F: Fn(&TrackingError) + Send + Sync + 'static,
    {
        let mut events = match source.watch(self.options.clone()).await {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!("Failed to start location tracking: {}", e);
                update_permission(&self.permission, &e);
                return Err(e);
            }
        };

        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        let store = self.store.clone();
        let permission = self.permission.clone();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut cancel_rx => {
                        tracing::debug!("Location tracking cancelled");
                        break;
                    }
                    event = events.next() => {
                        match event {
                            Some(PositionEvent::Sample(sample)) => {
                                permission.send_if_modified(|state| {
                                    let changed = *state != PermissionState::Granted;
                                    *state = PermissionState::Granted;
                                    changed
                                });
                                let point = sample.into_point(format!("loc-{}", uuid::Uuid::new_v4()));
                                if let Err(e) = store.append(point) {
                                    tracing::error!("Failed to record location: {}", e);
                                }
                            }
                            Some(PositionEvent::Error(e)) => {
                                tracing::warn!("Geolocation error: {}", e);
                                on_error(&e);
                                update_permission(&permission, &e);
                            }
                            None => {
                                tracing::debug!("Position source closed");
                                break;
                            }
                        }
                    }
                }
            }
        });

        tracing::info!("Location tracking active");
        Ok(TrackingHandle {
            cancel: Some(cancel_tx),
            task,
        })
    }
}

fn update_permission(permission: &watch::Sender<PermissionState>, error: &TrackingError) {
    if error.kind == TrackingErrorKind::PermissionDenied {
        permission.send_replace(PermissionState::Denied);
    }
}

/// A running subscription. Dropping it stops tracking
pub struct TrackingHandle {
    cancel: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl TrackingHandle {
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop tracking and wait for the subscription to wind down; no sample is
    /// recorded after this returns
    pub async fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
        if let Err(e) = (&mut self.task).await {
            tracing::warn!("Tracking task ended abnormally: {}", e);
        }
        tracing::info!("Location tracking paused");
    }
}

impl Drop for TrackingHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }
}
