use std::time::{Duration, Instant};

use crate::types::GestureLabel;

/// How long a raw label must hold unbroken before it is promoted to stable.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(1_500);

/// Side effect produced by a stable-label transition. Carries a concrete
/// label by construction, so a `None` stable value can never reach a sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Speak(GestureLabel),
    Log(GestureLabel),
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    label: Option<GestureLabel>,
    deadline: Instant,
}

/// Debounces the raw per-frame classification into a stable label and gates
/// the speak/log side effects to fire once per distinct transition.
///
/// Time is injected: callers pass `Instant::now()` (or a synthetic clock in
/// tests) to `observe` and `tick`, and drive `tick` when `deadline` expires.
/// There is exactly one pending-confirmation slot; arming it replaces any
/// previous deadline, so two outstanding timers cannot coexist.
pub struct Stabilizer {
    window: Duration,
    raw: Option<GestureLabel>,
    stable: Option<GestureLabel>,
    pending: Option<Pending>,
    last_spoken: Option<GestureLabel>,
    last_logged: Option<GestureLabel>,
}

impl Stabilizer {
    pub fn new() -> Self {
        Self::with_window(DEBOUNCE_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Stabilizer {
            window,
            raw: None,
            stable: None,
            pending: None,
            last_spoken: None,
            last_logged: None,
        }
    }

    pub fn raw(&self) -> Option<GestureLabel> {
        self.raw
    }

    pub fn stable(&self) -> Option<GestureLabel> {
        self.stable
    }

    /// Deadline of the pending confirmation, if one is armed. The driving
    /// loop waits on frame input at most until this instant, then calls
    /// [`tick`](Self::tick).
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    /// Feeds one raw classifier output. A change in value (including drops
    /// to `None` from tracking flicker) cancels and re-arms the confirmation
    /// window; repeats of the current raw value leave the armed deadline
    /// alone, so a steadily held gesture still promotes on schedule.
    pub fn observe(&mut self, label: Option<GestureLabel>, now: Instant) {
        if label == self.raw {
            return;
        }
        self.raw = label;
        self.pending = Some(Pending {
            label,
            deadline: now + self.window,
        });
        log::debug!("raw label changed to {label:?}, window restarted");
    }

    /// Promotes the pending label to stable if its deadline has passed,
    /// returning the side effects owed for the transition. Idempotent:
    /// promotion consumes the pending slot, so a held gesture confirms
    /// exactly once.
    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        let due = match self.pending {
            Some(p) if now >= p.deadline => p,
            _ => return Vec::new(),
        };
        self.pending = None;

        let previous = self.stable;
        self.stable = due.label;
        if previous != self.stable {
            log::info!("stable label: {previous:?} -> {:?}", self.stable);
        }
        self.transition_effects()
    }

    /// Effects owed after a promotion: speak and log fire independently,
    /// each at most once per distinct stable value. Re-confirming the same
    /// value without an intervening different one is suppressed; going away
    /// and back re-fires both.
    fn transition_effects(&mut self) -> Vec<Effect> {
        let Some(stable) = self.stable else {
            return Vec::new();
        };

        let mut effects = Vec::new();
        if self.last_spoken != Some(stable) {
            self.last_spoken = Some(stable);
            effects.push(Effect::Speak(stable));
        }
        if self.last_logged != Some(stable) {
            self.last_logged = Some(stable);
            effects.push(Effect::Log(stable));
        }
        effects
    }

    /// User-triggered re-confirmation: force-log the current stable label
    /// even if it was already logged. Deliberately bypasses the dedup gate
    /// and leaves it untouched.
    pub fn commit(&self) -> Option<Effect> {
        self.stable.map(Effect::Log)
    }

    /// Tracking-restart policy: a restarted engine forgets the session so
    /// far, so the first gesture confirmed afterwards speaks and logs again.
    pub fn reset(&mut self) {
        self.raw = None;
        self.stable = None;
        self.pending = None;
        self.last_spoken = None;
        self.last_logged = None;
    }
}

impl Default for Stabilizer {
    fn default() -> Self {
        Stabilizer::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GestureLabel::{Hello, Help};

    const WINDOW: Duration = DEBOUNCE_WINDOW;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Runs `tick` whenever the armed deadline falls inside the elapsed
    /// span, mimicking the timer firing between frames.
    fn advance(stab: &mut Stabilizer, from: Instant, by: Duration) -> (Instant, Vec<Effect>) {
        let now = from + by;
        let mut fired = Vec::new();
        if let Some(deadline) = stab.deadline() {
            if deadline <= now {
                fired = stab.tick(deadline);
            }
        }
        (now, fired)
    }

    #[test]
    fn short_hold_then_switch_never_promotes() {
        let mut stab = Stabilizer::new();
        let t0 = Instant::now();

        stab.observe(Some(Hello), t0);
        // Switch away 100 ms before the window closes.
        stab.observe(Some(Help), t0 + WINDOW - ms(100));
        let effects = stab.tick(t0 + WINDOW);
        assert!(effects.is_empty());
        assert_eq!(stab.stable(), None);

        // The replacement label promotes on its own schedule.
        let effects = stab.tick(t0 + WINDOW - ms(100) + WINDOW);
        assert_eq!(effects, vec![Effect::Speak(Help), Effect::Log(Help)]);
        assert_eq!(stab.stable(), Some(Help));
    }

    #[test]
    fn repeats_do_not_restart_the_window() {
        let mut stab = Stabilizer::new();
        let t0 = Instant::now();

        stab.observe(Some(Hello), t0);
        // Tracking delivers the same raw value every 100 ms.
        for i in 1..=14 {
            stab.observe(Some(Hello), t0 + ms(100 * i));
        }
        assert_eq!(stab.deadline(), Some(t0 + WINDOW));

        let effects = stab.tick(t0 + WINDOW);
        assert_eq!(effects, vec![Effect::Speak(Hello), Effect::Log(Hello)]);
        assert_eq!(stab.stable(), Some(Hello));

        // Promotion consumed the slot; further ticks fire nothing.
        assert_eq!(stab.deadline(), None);
        assert!(stab.tick(t0 + WINDOW + ms(500)).is_empty());
    }

    #[test]
    fn flicker_every_200ms_never_stabilizes() {
        let mut stab = Stabilizer::new();
        let mut now = Instant::now();

        for i in 0..10 {
            let label = if i % 2 == 0 { Some(Hello) } else { None };
            stab.observe(label, now);
            let (next, fired) = advance(&mut stab, now, ms(200));
            assert!(fired.is_empty());
            now = next;
        }
        assert_eq!(stab.stable(), None);
    }

    #[test]
    fn none_promotion_fires_nothing() {
        let mut stab = Stabilizer::new();
        let t0 = Instant::now();

        stab.observe(Some(Hello), t0);
        stab.observe(None, t0 + ms(300));
        let effects = stab.tick(t0 + ms(300) + WINDOW);
        assert!(effects.is_empty());
        assert_eq!(stab.stable(), None);
    }

    #[test]
    fn away_and_back_refires_both_hooks() {
        let mut stab = Stabilizer::new();
        let mut now = Instant::now();

        stab.observe(Some(Hello), now);
        now += WINDOW;
        assert_eq!(stab.tick(now), vec![Effect::Speak(Hello), Effect::Log(Hello)]);

        stab.observe(Some(Help), now);
        now += WINDOW;
        assert_eq!(stab.tick(now), vec![Effect::Speak(Help), Effect::Log(Help)]);

        stab.observe(Some(Hello), now);
        now += WINDOW;
        assert_eq!(stab.tick(now), vec![Effect::Speak(Hello), Effect::Log(Hello)]);
    }

    #[test]
    fn reconfirming_same_value_is_suppressed() {
        let mut stab = Stabilizer::new();
        let mut now = Instant::now();

        stab.observe(Some(Hello), now);
        now += WINDOW;
        assert_eq!(stab.tick(now), vec![Effect::Speak(Hello), Effect::Log(Hello)]);

        // Brief tracking drop, too short to promote None, then Hello again.
        stab.observe(None, now);
        now += ms(200);
        stab.observe(Some(Hello), now);
        now += WINDOW;
        assert!(stab.tick(now).is_empty());
        assert_eq!(stab.stable(), Some(Hello));
    }

    #[test]
    fn commit_bypasses_and_preserves_the_gate() {
        let mut stab = Stabilizer::new();
        let mut now = Instant::now();

        assert_eq!(stab.commit(), None);

        stab.observe(Some(Help), now);
        now += WINDOW;
        stab.tick(now);

        // Already logged once; manual commit logs again regardless.
        assert_eq!(stab.commit(), Some(Effect::Log(Help)));
        assert_eq!(stab.commit(), Some(Effect::Log(Help)));

        // The automatic gate is unchanged: re-confirming Help stays quiet.
        stab.observe(None, now);
        now += ms(100);
        stab.observe(Some(Help), now);
        now += WINDOW;
        assert!(stab.tick(now).is_empty());
    }

    #[test]
    fn reset_restores_first_confirmation_behavior() {
        let mut stab = Stabilizer::new();
        let mut now = Instant::now();

        stab.observe(Some(Hello), now);
        now += WINDOW;
        stab.tick(now);
        assert_eq!(stab.stable(), Some(Hello));

        stab.reset();
        assert_eq!(stab.raw(), None);
        assert_eq!(stab.stable(), None);
        assert_eq!(stab.deadline(), None);

        stab.observe(Some(Hello), now);
        now += WINDOW;
        assert_eq!(stab.tick(now), vec![Effect::Speak(Hello), Effect::Log(Hello)]);
    }

    #[test]
    fn custom_window_is_honored() {
        let mut stab = Stabilizer::with_window(ms(100));
        let t0 = Instant::now();

        stab.observe(Some(Hello), t0);
        assert!(stab.tick(t0 + ms(99)).is_empty());
        assert_eq!(
            stab.tick(t0 + ms(100)),
            vec![Effect::Speak(Hello), Effect::Log(Hello)]
        );
    }

    #[test]
    fn early_tick_leaves_pending_armed() {
        let mut stab = Stabilizer::new();
        let t0 = Instant::now();

        stab.observe(Some(Hello), t0);
        assert!(stab.tick(t0 + WINDOW - ms(1)).is_empty());
        assert_eq!(stab.deadline(), Some(t0 + WINDOW));
    }
}
