//! The debounced autosave coordinator.
//!
//! [`AutosaveSurface`] owns one active section of the profile editor.
//! Field edits land synchronously in the surface's local field map (so
//! the input echoes with zero latency) and are mirrored into a pending
//! [`EditBuffer`] holding the full section snapshot. A background task
//! debounces the buffer and dispatches a single consolidated update per
//! quiet period through the configured [`SaveSink`].
//!
//! Flushes are fire-and-forget: the buffer is cleared at dispatch time,
//! so edits made while a save is in flight start a fresh buffer and
//! timer rather than being lost. A response that arrives later simply
//! overwrites local state — the service is the source of truth.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde_json::{Map, Value};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinSet;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use brandloom_core::schema;
use brandloom_core::types::ProfileId;
use brandloom_core::{
    BusinessProfile, CompletionStatus, CoreError, EditBuffer, SaveStatus, SectionId, SectionUpdate,
};

use crate::events::AutosaveEvent;
use crate::sink::{SaveError, SaveSink};

/// Quiet period before a buffered edit is flushed.
const DEBOUNCE_DELAY: Duration = Duration::from_millis(1000);

/// Cosmetic delay before a `Saved` indicator reverts to `Idle`.
const SAVED_RESET_DELAY: Duration = Duration::from_millis(2000);

/// Broadcast channel capacity for surface events.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Tunable timings for one surface.
#[derive(Debug, Clone)]
pub struct AutosaveConfig {
    /// Quiet period before a buffered edit is flushed.
    pub debounce: Duration,
    /// Delay before `Saved` cosmetically reverts to `Idle`.
    pub saved_reset: Duration,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce: DEBOUNCE_DELAY,
            saved_reset: SAVED_RESET_DELAY,
        }
    }
}

/// Locally-owned state of one editing surface.
struct SurfaceState {
    /// Current field values as displayed, including unsaved edits.
    fields: Map<String, Value>,
    /// Progressive save indicator.
    status: SaveStatus,
    /// Human-readable message for the last failed flush.
    error: Option<String>,
    /// Completion percentages from the last canonical record.
    completion: CompletionStatus,
}

/// Messages from the surface handle to its background task.
enum Command {
    /// A field changed; carries the full section snapshot after the edit.
    Edit { snapshot: Map<String, Value> },
}

/// Handle to one autosaving section editor.
///
/// Created via [`AutosaveSurface::spawn`]. Dropping the handle cancels
/// any pending flush timer; no network call occurs after teardown.
pub struct AutosaveSurface {
    section: SectionId,
    shared: Arc<RwLock<SurfaceState>>,
    tx: mpsc::UnboundedSender<Command>,
    events: broadcast::Sender<AutosaveEvent>,
    cancel: CancellationToken,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl AutosaveSurface {
    /// Spawn the coordinator task for one section.
    ///
    /// * `identifier`     - profile being edited.
    /// * `section`        - the single active section for this surface.
    /// * `initial_fields` - the section's field map as last loaded.
    pub fn spawn(
        identifier: ProfileId,
        section: SectionId,
        initial_fields: Map<String, Value>,
        sink: Arc<dyn SaveSink>,
        config: AutosaveConfig,
    ) -> Self {
        let shared = Arc::new(RwLock::new(SurfaceState {
            fields: initial_fields,
            status: SaveStatus::Idle,
            error: None,
            completion: CompletionStatus::default(),
        }));

        let (tx, rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let cancel = CancellationToken::new();

        let coordinator = Coordinator {
            identifier,
            section,
            shared: Arc::clone(&shared),
            events: events.clone(),
            sink,
            config,
        };

        let task = tokio::spawn(coordinator.run(rx, cancel.clone()));

        Self {
            section,
            shared,
            tx,
            events,
            cancel,
            task: Some(task),
        }
    }

    /// The section this surface is bound to.
    pub fn section(&self) -> SectionId {
        self.section
    }

    /// Record a field edit.
    ///
    /// Updates the local field map synchronously, then hands the full
    /// section snapshot to the coordinator task, which resets the
    /// debounce timer. Fields outside the section's schema are rejected
    /// without touching any state.
    pub fn on_field_change(&self, field: &str, value: Value) -> Result<(), CoreError> {
        if !schema::is_known_field(self.section, field) {
            return Err(CoreError::UnknownField {
                section: self.section.as_str().to_string(),
                field: field.to_string(),
            });
        }

        let snapshot = {
            let mut state = self.shared.write().expect("surface state lock poisoned");
            state.fields.insert(field.to_string(), value);
            state.fields.clone()
        };

        if self.tx.send(Command::Edit { snapshot }).is_err() {
            tracing::warn!(
                section = self.section.as_str(),
                "Autosave task stopped; edit kept locally but will not be persisted"
            );
        }

        Ok(())
    }

    /// Current field values, including unsaved edits.
    pub fn fields(&self) -> Map<String, Value> {
        self.shared
            .read()
            .expect("surface state lock poisoned")
            .fields
            .clone()
    }

    /// Current save indicator state.
    pub fn status(&self) -> SaveStatus {
        self.shared
            .read()
            .expect("surface state lock poisoned")
            .status
    }

    /// Message from the last failed flush, if any.
    pub fn error_message(&self) -> Option<String> {
        self.shared
            .read()
            .expect("surface state lock poisoned")
            .error
            .clone()
    }

    /// Completion percentages from the last canonical record.
    pub fn completion(&self) -> CompletionStatus {
        self.shared
            .read()
            .expect("surface state lock poisoned")
            .completion
            .clone()
    }

    /// Subscribe to surface events (status changes, flushes, failures).
    pub fn subscribe(&self) -> broadcast::Receiver<AutosaveEvent> {
        self.events.subscribe()
    }

    /// Tear the surface down, cancelling any pending flush timer.
    ///
    /// A flush already in flight cannot be cancelled, but its response
    /// is discarded once the task has stopped.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for AutosaveSurface {
    fn drop(&mut self) {
        // A dormant, not-yet-fired flush must never outlive the surface.
        self.cancel.cancel();
    }
}

// ---------------------------------------------------------------------------
// Coordinator task
// ---------------------------------------------------------------------------

/// State owned by the background task.
struct Coordinator {
    identifier: ProfileId,
    section: SectionId,
    shared: Arc<RwLock<SurfaceState>>,
    events: broadcast::Sender<AutosaveEvent>,
    sink: Arc<dyn SaveSink>,
    config: AutosaveConfig,
}

impl Coordinator {
    /// Drive the surface until cancelled or all handles are dropped.
    async fn run(self, mut rx: mpsc::UnboundedReceiver<Command>, cancel: CancellationToken) {
        let mut buffer: Option<EditBuffer> = None;
        let mut flush_at: Option<Instant> = None;
        let mut reset_at: Option<Instant> = None;
        let mut in_flight: JoinSet<Result<BusinessProfile, SaveError>> = JoinSet::new();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    break;
                }
                cmd = rx.recv() => match cmd {
                    Some(Command::Edit { snapshot }) => {
                        match buffer.as_mut() {
                            // Last write wins: the snapshot already carries
                            // every field at its current value.
                            Some(buf) => buf.replace(snapshot),
                            None => buffer = Some(EditBuffer::new(self.section, snapshot)),
                        }
                        flush_at = Some(Instant::now() + self.config.debounce);
                    }
                    None => break,
                },
                _ = sleep_until(flush_at.unwrap_or_else(Instant::now)), if flush_at.is_some() => {
                    flush_at = None;
                    // A timer that fires with nothing buffered is a no-op.
                    if let Some(buf) = buffer.take() {
                        self.dispatch_flush(buf, &mut in_flight);
                    }
                }
                Some(result) = in_flight.join_next(), if !in_flight.is_empty() => {
                    match result {
                        Ok(outcome) => self.apply_outcome(outcome, &mut reset_at),
                        Err(e) => {
                            tracing::error!(
                                section = self.section.as_str(),
                                error = %e,
                                "Flush task aborted"
                            );
                        }
                    }
                }
                _ = sleep_until(reset_at.unwrap_or_else(Instant::now)), if reset_at.is_some() => {
                    reset_at = None;
                    self.revert_saved_to_idle();
                }
            }
        }

        tracing::debug!(
            section = self.section.as_str(),
            "Autosave surface stopped"
        );
    }

    /// Transition to `Saving` and dispatch the buffered payload.
    ///
    /// The buffer has already been taken by the caller, so edits that
    /// arrive while this save is in flight start a fresh cycle.
    fn dispatch_flush(
        &self,
        buffer: EditBuffer,
        in_flight: &mut JoinSet<Result<BusinessProfile, SaveError>>,
    ) {
        let (section_id, section_data) = buffer.into_parts();
        let update = SectionUpdate {
            identifier: self.identifier,
            section_id,
            section_data,
        };

        tracing::debug!(
            profile_id = %self.identifier,
            section = section_id.as_str(),
            "Dispatching consolidated section update"
        );

        self.set_status(SaveStatus::Saving);
        let _ = self.events.send(AutosaveEvent::FlushDispatched { section: section_id });

        let sink = Arc::clone(&self.sink);
        in_flight.spawn(async move { sink.save_section(update).await });
    }

    /// Apply a completed flush: adopt the canonical record on success,
    /// surface the message on failure. Local edits are never rolled back.
    fn apply_outcome(
        &self,
        outcome: Result<BusinessProfile, SaveError>,
        reset_at: &mut Option<Instant>,
    ) {
        match outcome {
            Ok(profile) => {
                {
                    let mut state = self.shared.write().expect("surface state lock poisoned");
                    // The server may normalize values or add derived keys;
                    // its copy of the section replaces ours wholesale.
                    if let Some(canonical) = profile.section(self.section) {
                        state.fields = canonical.clone();
                    }
                    state.completion = profile.completion_status.clone();
                    state.error = None;
                    state.status = SaveStatus::Saved;
                }

                let _ = self.events.send(AutosaveEvent::StatusChanged {
                    section: self.section,
                    status: SaveStatus::Saved,
                });
                let _ = self.events.send(AutosaveEvent::ProfileRefreshed {
                    overall: profile.completion_status.overall,
                });

                *reset_at = Some(Instant::now() + self.config.saved_reset);
            }
            Err(e) => {
                tracing::warn!(
                    profile_id = %self.identifier,
                    section = self.section.as_str(),
                    error = %e,
                    "Section flush failed; keeping local edits"
                );

                {
                    let mut state = self.shared.write().expect("surface state lock poisoned");
                    state.error = Some(e.to_string());
                    state.status = SaveStatus::Error;
                }

                let _ = self.events.send(AutosaveEvent::StatusChanged {
                    section: self.section,
                    status: SaveStatus::Error,
                });
                let _ = self.events.send(AutosaveEvent::SaveFailed {
                    section: self.section,
                    message: e.to_string(),
                });
            }
        }
    }

    /// Cosmetic revert of `Saved` to `Idle`.
    ///
    /// Skipped when a newer flush has already moved the indicator on;
    /// triggers no network activity of its own.
    fn revert_saved_to_idle(&self) {
        let reverted = {
            let mut state = self.shared.write().expect("surface state lock poisoned");
            if state.status == SaveStatus::Saved {
                state.status = SaveStatus::Idle;
                true
            } else {
                false
            }
        };

        if reverted {
            let _ = self.events.send(AutosaveEvent::StatusChanged {
                section: self.section,
                status: SaveStatus::Idle,
            });
        }
    }

    /// Set the indicator state and broadcast the change.
    fn set_status(&self, status: SaveStatus) {
        {
            let mut state = self.shared.write().expect("surface state lock poisoned");
            state.status = status;
        }
        let _ = self.events.send(AutosaveEvent::StatusChanged {
            section: self.section,
            status,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_editor_timings() {
        let config = AutosaveConfig::default();
        assert_eq!(config.debounce, Duration::from_millis(1000));
        assert_eq!(config.saved_reset, Duration::from_millis(2000));
    }
}
