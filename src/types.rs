/// Number of keypoints in one tracked hand, per the standard hand-landmark
/// topology: wrist at index 0, then MCP/PIP/DIP/TIP for each of five digits.
pub const LANDMARK_COUNT: usize = 21;

/// A single tracked keypoint. Coordinates are normalized image space
/// (smaller `y` is higher on screen); depth is optional and relative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: Option<f32>,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Landmark { x, y, z: None }
    }

    pub fn with_depth(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z: Some(z) }
    }

    pub fn depth(&self) -> f32 {
        self.z.unwrap_or(0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureLabel {
    Hello,
    Help,
}

impl GestureLabel {
    pub fn display_name(&self) -> &'static str {
        match self {
            GestureLabel::Hello => "Hello",
            GestureLabel::Help => "Help",
        }
    }

    /// Text handed to the speech synthesizer. Currently identical to the
    /// display name; kept separate so spoken phrasing can diverge later.
    pub fn speech_text(&self) -> &'static str {
        self.display_name()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Sign,
    Voice,
}

impl EntryKind {
    pub fn tag(&self) -> &'static str {
        match self {
            EntryKind::Sign => "sign",
            EntryKind::Voice => "voice",
        }
    }
}

/// One committed line of the conversation. `id` increases monotonically
/// within a session and doubles as an insertion-order key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub id: u64,
    pub kind: EntryKind,
    pub text: String,
}
