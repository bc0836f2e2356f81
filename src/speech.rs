/// Interface to the platform speech synthesizer. The session always calls
/// `stop` before `speak`: a new utterance preempts the in-flight one, there
/// is no queue. Calls are fire-and-forget; a slow or failing synthesizer
/// must not block the recognition loop, so implementations should hand off
/// to their own thread or platform queue.
pub trait SpeechSynth: Send {
    fn stop(&mut self);
    fn speak(&mut self, text: &str);
}

/// Synthesizer that discards everything. Useful headless and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSpeech;

impl SpeechSynth for NullSpeech {
    fn stop(&mut self) {}

    fn speak(&mut self, text: &str) {
        log::debug!("speech (discarded): {text}");
    }
}
