//! rodio-backed output handle

use std::io::Cursor;
use std::time::Duration;

use rodio::{Decoder, OutputStreamHandle, Sink};

use super::output::{AudioOutput, AudioSource};
use crate::error::{PlayerError, Result};

/// Plays one source at a time through a fresh `Sink` per load.
///
/// The `OutputStream` that owns the device must outlive this value; it is
/// not `Send`, so the caller keeps it on the main task.
pub struct RodioOutput {
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    volume: f32,
}

impl RodioOutput {
    pub fn new(handle: OutputStreamHandle, volume: f32) -> Self {
        Self {
            handle,
            sink: None,
            volume: volume.clamp(0.0, 1.0),
        }
    }
}

impl AudioOutput for RodioOutput {
    fn load(&mut self, source: &AudioSource, bytes: Vec<u8>) -> Result<()> {
        self.stop();

        let decoder = Decoder::new(Cursor::new(bytes)).map_err(|e| PlayerError::load(source, e))?;
        let sink = Sink::try_new(&self.handle).map_err(|e| PlayerError::Output(e.to_string()))?;
        sink.pause();
        sink.set_volume(self.volume);
        sink.append(decoder);

        tracing::trace!(source = %source, "Source decoded into sink");
        self.sink = Some(sink);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        match &self.sink {
            Some(sink) => {
                sink.play();
                Ok(())
            }
            None => Err(PlayerError::PlaybackStartFailure(
                "no source loaded".to_string(),
            )),
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        match &self.sink {
            Some(sink) => sink
                .try_seek(position)
                .map_err(|e| PlayerError::Output(e.to_string())),
            None => Ok(()),
        }
    }

    fn position(&self) -> Duration {
        self.sink
            .as_ref()
            .map(|sink| sink.get_pos())
            .unwrap_or(Duration::ZERO)
    }

    fn is_finished(&self) -> bool {
        self.sink.as_ref().map(|sink| sink.empty()).unwrap_or(false)
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }
}
