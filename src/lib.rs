//! Recognizes static hand gestures from 21-point landmark frames and turns
//! them into one-shot speech and transcript events.
//!
//! Two stages run per tracked frame: [`gesture::classify`] maps the
//! landmarks to a raw label, and the [`stabilizer::Stabilizer`] debounces
//! that label over a 1.5 s window before promoting it to a stable gesture
//! and emitting each distinct confirmation exactly once.
//!
//! [`session::RecognitionSession`] wires both stages to a landmark channel
//! fed by the external hand-tracking engine, a [`speech::SpeechSynth`]
//! implementation, and a shared [`transcript::ConversationLog`].

pub mod gesture;
pub mod session;
pub mod speech;
pub mod stabilizer;
pub mod transcript;
pub mod types;

pub use gesture::classify;
pub use session::{GestureState, RecognitionSession, SessionConfig, SessionError};
pub use speech::{NullSpeech, SpeechSynth};
pub use stabilizer::{DEBOUNCE_WINDOW, Effect, Stabilizer};
pub use transcript::ConversationLog;
pub use types::{EntryKind, GestureLabel, LANDMARK_COUNT, Landmark, TranscriptEntry};
