use super::easing::ease_in_out_cubic;
use super::palette::Rgb;
use super::petal::{spawn_petals, Petal, PETAL_COUNT};

/// Total growth phase duration: the window over which petal starts are
/// staggered.
pub(crate) const GROWTH_TOTAL_MS: u64 = 5000;
/// Growth duration of a single petal.
pub(crate) const PETAL_GROWTH_MS: u64 = 1200;

/// Phase of the animation state machine.
#[derive(Debug, Clone, Copy, PartialEq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Phase {
    /// Nothing drawn, waiting for the start trigger.
    Idle,
    /// Petals growing outward with staggered starts.
    Growing,
    /// Fully grown flower breathing in opacity.
    Pulsing {
        /// Clock value at which the pulse phase began.
        since_ms: u64,
    },
}

/// Everything drawn in one frame, captured as an immutable snapshot.
#[derive(Debug, Clone)]
pub(crate) struct FrameSnapshot {
    pub(crate) petals: Vec<Petal>,
    /// Global opacity applied to every petal.
    pub(crate) alpha: f32,
}

/// The fully grown flower at full opacity, as used for still captures.
pub(crate) fn full_bloom(palette: &[Rgb; 8]) -> FrameSnapshot {
    let mut petals = spawn_petals(palette);
    for petal in &mut petals {
        petal.progress = 1.0;
    }
    FrameSnapshot { petals, alpha: 1.0 }
}

/// Opacity breathing for the pulse phase, oscillating between 0.6 and 1.0.
pub(crate) fn pulse_alpha(pulse_ms: u64) -> f32 {
    let wave = ((pulse_ms as f32 * 0.003).sin() + 1.0) * 0.5;
    0.6 + wave * 0.4
}

/// The animation state machine. Time never flows implicitly: callers inject
/// the elapsed milliseconds since the start trigger on every tick, so the
/// machine runs identically against a real frame clock or a synthetic one.
#[derive(Debug)]
pub(crate) struct Animator {
    palette: [Rgb; 8],
    petals: Vec<Petal>,
    phase: Phase,
}

impl Animator {
    pub(crate) fn new(palette: [Rgb; 8]) -> Self {
        Self { palette, petals: Vec::new(), phase: Phase::Idle }
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn is_animating(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Whether the drawing indicator should be shown.
    pub(crate) fn is_growing(&self) -> bool {
        self.phase == Phase::Growing
    }

    pub(crate) fn petals(&self) -> &[Petal] {
        &self.petals
    }

    /// Begin the growth phase. A start while already animating is a silent
    /// no-op; returns whether the animation actually started so the caller
    /// knows to rebase its clock.
    pub(crate) fn start(&mut self) -> bool {
        if self.is_animating() {
            return false;
        }
        self.petals = spawn_petals(&self.palette);
        self.phase = Phase::Growing;
        true
    }

    /// Return to idle from any phase: no petals, nothing drawn.
    pub(crate) fn reset(&mut self) {
        self.petals.clear();
        self.phase = Phase::Idle;
    }

    /// Advance the machine to `now_ms` milliseconds after the start trigger.
    pub(crate) fn advance(&mut self, now_ms: u64) {
        if self.phase != Phase::Growing {
            return;
        }
        let stagger = GROWTH_TOTAL_MS as f32 / PETAL_COUNT as f32;
        for (index, petal) in self.petals.iter_mut().enumerate() {
            let local = now_ms as f32 - index as f32 * stagger;
            if local > 0.0 {
                let fraction = (local / PETAL_GROWTH_MS as f32).min(1.0);
                petal.progress = ease_in_out_cubic(fraction);
            }
        }
        if now_ms >= GROWTH_TOTAL_MS + PETAL_GROWTH_MS {
            for petal in &mut self.petals {
                petal.progress = 1.0;
            }
            self.phase = Phase::Pulsing { since_ms: now_ms };
        }
    }

    /// Capture the current frame for rendering.
    pub(crate) fn snapshot(&self, now_ms: u64) -> FrameSnapshot {
        let alpha = match self.phase {
            Phase::Pulsing { since_ms } => pulse_alpha(now_ms.saturating_sub(since_ms)),
            _ => 1.0,
        };
        FrameSnapshot { petals: self.petals.clone(), alpha }
    }
}
