use std::{
    sync::{Arc, Mutex},
    thread,
    time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, Sender, unbounded};
use thiserror::Error;

use crate::{
    gesture,
    speech::SpeechSynth,
    stabilizer::{DEBOUNCE_WINDOW, Effect, Stabilizer},
    transcript::ConversationLog,
    types::{EntryKind, GestureLabel, Landmark},
};

#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    pub debounce_window: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            debounce_window: DEBOUNCE_WINDOW,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("recognition session is no longer running")]
    Stopped,
}

/// Raw and stable labels as currently published by the worker, observable
/// from any thread (the UI reads this every render).
#[derive(Clone, Default)]
pub struct GestureState {
    inner: Arc<Mutex<Labels>>,
}

#[derive(Default)]
struct Labels {
    raw: Option<GestureLabel>,
    stable: Option<GestureLabel>,
}

impl GestureState {
    pub fn raw(&self) -> Option<GestureLabel> {
        self.inner.lock().expect("gesture state poisoned").raw
    }

    pub fn stable(&self) -> Option<GestureLabel> {
        self.inner.lock().expect("gesture state poisoned").stable
    }

    /// Status line for display: the stable label, else the raw one, else a
    /// searching placeholder while no hand is recognized.
    pub fn status_text(&self) -> &'static str {
        let labels = self.inner.lock().expect("gesture state poisoned");
        match labels.stable.or(labels.raw) {
            Some(label) => label.display_name(),
            None => "Searching…",
        }
    }

    fn set_raw(&self, raw: Option<GestureLabel>) {
        self.inner.lock().expect("gesture state poisoned").raw = raw;
    }

    fn set_stable(&self, stable: Option<GestureLabel>) {
        self.inner.lock().expect("gesture state poisoned").stable = stable;
    }

    fn reset(&self) {
        let mut labels = self.inner.lock().expect("gesture state poisoned");
        labels.raw = None;
        labels.stable = None;
    }
}

enum Control {
    Commit,
    Reset,
    Shutdown,
}

enum Event {
    Frame(Vec<Landmark>),
    Control(Control),
    Deadline,
    Closed,
}

/// Owns the recognition worker: classifies each incoming landmark frame,
/// runs the debounce stabilizer, and applies speak/log effects. Tracking
/// frames arrive on `frame_rx` at whatever rate the engine manages; gaps
/// simply leave the worker parked.
pub struct RecognitionSession {
    state: GestureState,
    control_tx: Sender<Control>,
    handle: Option<thread::JoinHandle<()>>,
}

impl RecognitionSession {
    pub fn start<S: SpeechSynth + 'static>(
        config: SessionConfig,
        frame_rx: Receiver<Vec<Landmark>>,
        speech: S,
        transcript: ConversationLog,
    ) -> RecognitionSession {
        let state = GestureState::default();
        let (control_tx, control_rx) = unbounded();

        let worker_state = state.clone();
        let handle = thread::spawn(move || {
            run_worker(config, frame_rx, control_rx, speech, transcript, worker_state);
        });
        log::info!(
            "recognition session started (debounce {:?})",
            config.debounce_window
        );

        RecognitionSession {
            state,
            control_tx,
            handle: Some(handle),
        }
    }

    pub fn state(&self) -> GestureState {
        self.state.clone()
    }

    /// Force-logs the current stable label, bypassing the dedup gate. The
    /// user's explicit re-confirmation, wired to the "Sign" button.
    pub fn commit(&self) -> Result<(), SessionError> {
        self.control_tx
            .send(Control::Commit)
            .map_err(|_| SessionError::Stopped)
    }

    /// Clears all recognition state, including the spoken/logged memory.
    /// Call when the tracking engine restarts mid-session.
    pub fn reset(&self) -> Result<(), SessionError> {
        self.control_tx
            .send(Control::Reset)
            .map_err(|_| SessionError::Stopped)
    }

    /// Stops the worker and joins it. Any pending confirmation dies with
    /// the worker; nothing is promoted or spoken after this returns.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.control_tx.send(Control::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RecognitionSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker<S: SpeechSynth>(
    config: SessionConfig,
    frame_rx: Receiver<Vec<Landmark>>,
    control_rx: Receiver<Control>,
    mut speech: S,
    transcript: ConversationLog,
    state: GestureState,
) {
    let mut stabilizer = Stabilizer::with_window(config.debounce_window);

    loop {
        match next_event(&frame_rx, &control_rx, stabilizer.deadline()) {
            Event::Frame(landmarks) => {
                let label = gesture::classify(&landmarks);
                state.set_raw(label);
                stabilizer.observe(label, Instant::now());
            }
            Event::Deadline => {
                for effect in stabilizer.tick(Instant::now()) {
                    apply_effect(effect, &mut speech, &transcript);
                }
                state.set_stable(stabilizer.stable());
            }
            Event::Control(Control::Commit) => {
                if let Some(effect) = stabilizer.commit() {
                    apply_effect(effect, &mut speech, &transcript);
                }
            }
            Event::Control(Control::Reset) => {
                stabilizer.reset();
                state.reset();
                log::info!("recognition state reset");
            }
            Event::Control(Control::Shutdown) | Event::Closed => break,
        }
    }
    log::info!("recognition worker stopped");
}

/// Blocks on frame and control input, waking at the stabilizer's pending
/// deadline when one is armed. The deadline is re-derived every iteration,
/// so re-arming on a raw-label change is atomic with frame handling.
fn next_event(
    frame_rx: &Receiver<Vec<Landmark>>,
    control_rx: &Receiver<Control>,
    deadline: Option<Instant>,
) -> Event {
    match deadline {
        Some(deadline) => {
            let timeout = deadline.saturating_duration_since(Instant::now());
            crossbeam_channel::select! {
                recv(frame_rx) -> msg => msg.map(Event::Frame).unwrap_or(Event::Closed),
                recv(control_rx) -> msg => msg.map(Event::Control).unwrap_or(Event::Closed),
                default(timeout) => Event::Deadline,
            }
        }
        None => {
            crossbeam_channel::select! {
                recv(frame_rx) -> msg => msg.map(Event::Frame).unwrap_or(Event::Closed),
                recv(control_rx) -> msg => msg.map(Event::Control).unwrap_or(Event::Closed),
            }
        }
    }
}

fn apply_effect<S: SpeechSynth>(effect: Effect, speech: &mut S, transcript: &ConversationLog) {
    match effect {
        Effect::Speak(label) => {
            // New utterances always preempt the in-flight one.
            speech.stop();
            speech.speak(label.speech_text());
            log::info!("speaking \"{}\"", label.speech_text());
        }
        Effect::Log(label) => {
            transcript.push(EntryKind::Sign, label.display_name());
        }
    }
}
