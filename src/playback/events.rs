//! Output event listener
//!
//! rodio has no callbacks, so the listener polls the output on a fixed tick
//! and turns what it sees into `OutputEvent`s.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::audio::OutputEvent;
use crate::model::PlaybackStatus;

use super::PlaybackController;

pub const OUTPUT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// An output reading tagged with the load generation it was taken under
#[derive(Debug, Clone, PartialEq)]
pub struct PolledEvent {
    pub generation: u64,
    pub event: OutputEvent,
}

impl PlaybackController {
    pub fn start_output_listener(&self, interval: Duration) -> JoinHandle<()> {
        let controller = self.clone();
        tracing::info!(interval_ms = interval.as_millis() as u64, "Starting output listener");

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if let Some(polled) = controller.poll_output().await {
                    controller.handle_output_event(polled).await;
                }
            }
        })
    }

    /// Read the output once. Only a playing output produces events.
    pub(crate) async fn poll_output(&self) -> Option<PolledEvent> {
        if self.state.borrow().status != PlaybackStatus::Playing {
            return None;
        }

        let session = self.session.lock().await;
        let event = if session.output.is_finished() {
            OutputEvent::Ended
        } else {
            OutputEvent::TimeUpdate(session.output.position().as_secs_f64())
        };
        Some(PolledEvent {
            generation: session.generation,
            event,
        })
    }

    /// Apply a polled event. Readings from a song that has since been
    /// replaced are dropped.
    pub async fn handle_output_event(&self, polled: PolledEvent) {
        let mut session = self.session.lock().await;
        if session.generation != polled.generation {
            tracing::trace!(
                event_generation = polled.generation,
                generation = session.generation,
                "Dropping output event from a replaced song"
            );
            return;
        }

        match polled.event {
            OutputEvent::TimeUpdate(position) => {
                self.state.send_if_modified(|state| {
                    if !state.is_playing() || !position.is_finite() {
                        return false;
                    }
                    let position = position.clamp(0.0, state.duration().max(0.0));
                    if position == state.elapsed {
                        return false;
                    }
                    state.elapsed = position;
                    true
                });
            }
            OutputEvent::Ended => {
                let (playing, song_id, shuffle) = {
                    let state = self.state.borrow();
                    (state.is_playing(), state.current_song_id().map(str::to_string), state.shuffle)
                };
                if !playing {
                    tracing::trace!("Ignoring end of track while not playing");
                    return;
                }
                let Some(song_id) = song_id else {
                    return;
                };
                tracing::info!(song_id = %song_id, "Track ended, advancing");
                if let Some(next) = self.next_song(&song_id, shuffle) {
                    self.switch_to(&mut session, next);
                }
            }
        }
    }
}
