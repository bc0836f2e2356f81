use crate::types::{GestureLabel, LANDMARK_COUNT, Landmark};

/// A digit counts as extended only when its tip reaches meaningfully farther
/// from the wrist than its knuckle; curled fingers collapse back under this.
const EXTENSION_MARGIN: f32 = 1.15;

const WRIST: usize = 0;
const THUMB_MCP: usize = 2;
const THUMB_TIP: usize = 4;

/// (MCP, PIP, TIP) indices for the four non-thumb digits.
const INDEX_FINGER: [usize; 3] = [5, 6, 8];
const MIDDLE_FINGER: [usize; 3] = [9, 10, 12];
const RING_FINGER: [usize; 3] = [13, 14, 16];
const PINKY_FINGER: [usize; 3] = [17, 18, 20];

/// Maps one frame of landmarks to a gesture label. Pure and deterministic;
/// frames with fewer than 21 points classify as no gesture.
///
/// Rules form an ordered decision list, first match wins. New gestures are
/// appended as further mutually-exclusive predicate combinations before the
/// final fallthrough; keep the order, an overlapping rule inserted earlier
/// would shadow the ones below it.
pub fn classify(landmarks: &[Landmark]) -> Option<GestureLabel> {
    if landmarks.len() < LANDMARK_COUNT {
        return None;
    }

    let thumb = thumb_extended(landmarks);
    let index = finger_extended(landmarks, INDEX_FINGER);
    let middle = finger_extended(landmarks, MIDDLE_FINGER);
    let ring = finger_extended(landmarks, RING_FINGER);
    let pinky = finger_extended(landmarks, PINKY_FINGER);

    if thumb && index && middle && ring && pinky {
        return Some(GestureLabel::Hello);
    }

    if thumb && pinky && !index && !middle && !ring {
        return Some(GestureLabel::Help);
    }

    None
}

/// A non-thumb digit is extended iff its tip sits above the PIP joint in
/// image space (smaller y) and clears the radial margin from the wrist.
fn finger_extended(landmarks: &[Landmark], idx: [usize; 3]) -> bool {
    let wrist = landmarks[WRIST];
    let mcp = landmarks[idx[0]];
    let pip = landmarks[idx[1]];
    let tip = landmarks[idx[2]];

    let vertical = tip.y < pip.y;
    let radial = distance(tip, wrist) > distance(mcp, wrist) * EXTENSION_MARGIN;
    vertical && radial
}

/// Thumb motion is lateral rather than vertical in the canonical pose, so
/// only the radial check applies.
fn thumb_extended(landmarks: &[Landmark]) -> bool {
    let wrist = landmarks[WRIST];
    let mcp = landmarks[THUMB_MCP];
    let tip = landmarks[THUMB_TIP];

    distance(tip, wrist) > distance(mcp, wrist) * EXTENSION_MARGIN
}

fn distance(a: Landmark, b: Landmark) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.depth() - b.depth();
    (dx * dx + dy * dy + dz * dz).sqrt()
}
