//! Scripted output and fetcher for exercising the controller without a sound device

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::audio::{AudioOutput, AudioSource, SourceFetcher};
use crate::error::{PlayerError, Result};
use crate::model::{Catalog, PlaybackState};

use super::{PlaybackConfig, PlaybackController};

/// What the mock should fail at
#[derive(Clone, Debug, Default)]
pub struct MockScript {
    pub fail_files: bool,
    pub fail_remote: bool,
    /// Number of `play` calls to reject before accepting
    pub play_failures: u32,
    /// Delay before a file fetch resolves
    pub file_delay: Duration,
}

#[derive(Default)]
struct MockState {
    script: MockScript,
    fetched: Vec<AudioSource>,
    loaded: Vec<AudioSource>,
    seeks: Vec<Duration>,
    plays: u32,
    paused: bool,
    position: Duration,
    finished: bool,
}

/// Shared view of the mock, kept by the test after the output is boxed
#[derive(Clone, Default)]
pub struct MockHandle {
    state: Arc<Mutex<MockState>>,
}

impl MockHandle {
    pub fn set_script(&self, script: MockScript) {
        self.state.lock().unwrap().script = script;
    }

    pub fn fetched(&self) -> Vec<AudioSource> {
        self.state.lock().unwrap().fetched.clone()
    }

    pub fn loaded(&self) -> Vec<AudioSource> {
        self.state.lock().unwrap().loaded.clone()
    }

    pub fn seeks(&self) -> Vec<Duration> {
        self.state.lock().unwrap().seeks.clone()
    }

    pub fn plays(&self) -> u32 {
        self.state.lock().unwrap().plays
    }

    pub fn is_paused(&self) -> bool {
        self.state.lock().unwrap().paused
    }

    pub fn set_position(&self, position: Duration) {
        self.state.lock().unwrap().position = position;
    }

    pub fn finish(&self) {
        self.state.lock().unwrap().finished = true;
    }
}

struct MockOutput(MockHandle);

impl AudioOutput for MockOutput {
    fn load(&mut self, source: &AudioSource, _bytes: Vec<u8>) -> Result<()> {
        let mut state = self.0.state.lock().unwrap();
        state.loaded.push(source.clone());
        state.paused = true;
        state.position = Duration::ZERO;
        state.finished = false;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let mut state = self.0.state.lock().unwrap();
        state.plays += 1;
        if state.script.play_failures > 0 {
            state.script.play_failures -= 1;
            return Err(PlayerError::PlaybackStartFailure("rejected".to_string()));
        }
        state.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.0.state.lock().unwrap().paused = true;
    }

    fn stop(&mut self) {
        let mut state = self.0.state.lock().unwrap();
        state.paused = true;
        state.finished = false;
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        let mut state = self.0.state.lock().unwrap();
        state.seeks.push(position);
        state.position = position;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.0.state.lock().unwrap().position
    }

    fn is_finished(&self) -> bool {
        self.0.state.lock().unwrap().finished
    }

    fn set_volume(&mut self, _volume: f32) {}
}

struct MockFetcher(MockHandle);

#[async_trait]
impl SourceFetcher for MockFetcher {
    async fn fetch(&self, source: &AudioSource) -> Result<Vec<u8>> {
        let (fail, delay) = {
            let mut state = self.0.state.lock().unwrap();
            state.fetched.push(source.clone());
            match source {
                AudioSource::File(_) => (state.script.fail_files, state.script.file_delay),
                AudioSource::Remote(_) => (state.script.fail_remote, Duration::ZERO),
            }
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if fail {
            return Err(PlayerError::load(source, "scripted failure"));
        }
        Ok(vec![0; 16])
    }
}

pub fn harness(catalog: Catalog, script: MockScript) -> (PlaybackController, MockHandle) {
    harness_with(catalog, script, PlaybackConfig::default())
}

pub fn harness_with(
    catalog: Catalog,
    script: MockScript,
    config: PlaybackConfig,
) -> (PlaybackController, MockHandle) {
    let handle = MockHandle::default();
    handle.set_script(script);
    let controller = PlaybackController::new(
        Arc::new(catalog),
        config,
        Box::new(MockOutput(handle.clone())),
        Arc::new(MockFetcher(handle.clone())),
    );
    (controller, handle)
}

/// Wait until the current load chain has finished one way or another.
pub async fn settle(controller: &PlaybackController) -> PlaybackState {
    let mut rx = controller.subscribe();
    let state = rx
        .wait_for(|state| !state.is_loading())
        .await
        .expect("controller dropped");
    state.clone()
}
