// SPDX-License-Identifier: MPL-2.0
//! Animation primitives for the gallery overlay.
//!
//! Iced has no retained animation tree, so these primitives keep their own
//! clocks: the application's tick subscription polls them with the current
//! [`Instant`] and they report completion events exactly once. The view layer
//! reads their progress accessors to derive opacity, offsets, and scale.
//!
//! Completion must be edge-triggered: a completion that would fire twice, or
//! fire for an animation that was aborted by a newer request, breaks the
//! overlay choreography. Each primitive therefore latches its reports.

use crate::gallery::ClosingStage;
use std::time::{Duration, Instant};

/// Stage enter fade duration.
pub const STAGE_IN: Duration = Duration::from_millis(350);
/// Stage exit fade duration.
pub const STAGE_OUT: Duration = Duration::from_millis(250);
/// Shell entrance fade duration.
pub const SHELL_FADE: Duration = Duration::from_millis(250);
/// Shell panel exit duration (shrink-hold, then fly down).
pub const PANEL_OUT: Duration = Duration::from_millis(800);
/// Intro curtain duration (rise, then expand to full screen).
pub const CURTAIN: Duration = Duration::from_millis(1200);

/// Vertical offset a stage enters from, in logical pixels.
const STAGE_ENTER_OFFSET: f32 = 16.0;

fn progress(started: Instant, now: Instant, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(started);
    (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
}

pub fn ease_out(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

// ---------------------------------------------------------------------------
// StageFade
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum FadeState {
    Hidden,
    Entering { started: Instant },
    Shown,
    Exiting { started: Instant },
}

/// Completion report from a [`StageFade`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    /// The exit fade finished and the stage unmounted.
    ExitComplete,
}

/// Mounts a view with an enter fade when shown, plays an exit fade then
/// unmounts when hidden, and reports `ExitComplete` exactly once per
/// completed exit.
///
/// If `show` flips back on before the exit finishes, the exit is aborted
/// with no report and a fresh entrance starts.
#[derive(Debug, Clone)]
pub struct StageFade {
    state: FadeState,
    /// How far down the stage slides while exiting, in logical pixels.
    exit_offset: f32,
}

impl StageFade {
    #[must_use]
    pub fn new(exit_offset: f32) -> Self {
        Self {
            state: FadeState::Hidden,
            exit_offset,
        }
    }

    /// Drives the mount state. Call on every controller change; repeated
    /// calls with the same value are no-ops.
    pub fn set_show(&mut self, show: bool, now: Instant) {
        self.state = match (self.state, show) {
            (FadeState::Hidden, true) | (FadeState::Exiting { .. }, true) => {
                FadeState::Entering { started: now }
            }
            (FadeState::Entering { .. }, false) | (FadeState::Shown, false) => {
                FadeState::Exiting { started: now }
            }
            (state, _) => state,
        };
    }

    /// Unmounts immediately with no exit animation and no report, as when
    /// the enclosing shell itself unmounts.
    pub fn hide_now(&mut self) {
        self.state = FadeState::Hidden;
    }

    /// Advances the clock. Returns `ExitComplete` at most once per exit.
    pub fn tick(&mut self, now: Instant) -> Option<StageEvent> {
        match self.state {
            FadeState::Entering { started } if progress(started, now, STAGE_IN) >= 1.0 => {
                self.state = FadeState::Shown;
                None
            }
            FadeState::Exiting { started } if progress(started, now, STAGE_OUT) >= 1.0 => {
                self.state = FadeState::Hidden;
                Some(StageEvent::ExitComplete)
            }
            _ => None,
        }
    }

    /// Whether the child view should be in the widget tree at all.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.state != FadeState::Hidden
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(
            self.state,
            FadeState::Entering { .. } | FadeState::Exiting { .. }
        )
    }

    /// Current opacity in `[0, 1]`.
    #[must_use]
    pub fn opacity(&self, now: Instant) -> f32 {
        match self.state {
            FadeState::Hidden => 0.0,
            FadeState::Shown => 1.0,
            FadeState::Entering { started } => ease_out(progress(started, now, STAGE_IN)),
            FadeState::Exiting { started } => 1.0 - ease_in(progress(started, now, STAGE_OUT)),
        }
    }

    /// Current vertical offset in logical pixels.
    #[must_use]
    pub fn offset_y(&self, now: Instant) -> f32 {
        match self.state {
            FadeState::Hidden | FadeState::Shown => 0.0,
            FadeState::Entering { started } => {
                STAGE_ENTER_OFFSET * (1.0 - ease_out(progress(started, now, STAGE_IN)))
            }
            FadeState::Exiting { started } => {
                self.exit_offset * ease_in(progress(started, now, STAGE_OUT))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// IntroGate
// ---------------------------------------------------------------------------

/// Completion report from an [`IntroGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroEvent {
    /// The curtain reveal finished.
    Done,
}

/// One-shot curtain reveal: triggered on a false→true edge of `play`, it runs
/// once and reports `Done` exactly once. With `persist_backdrop` set, an
/// opaque backdrop stays behind after the reveal until [`IntroGate::reset`].
#[derive(Debug, Clone)]
pub struct IntroGate {
    running_since: Option<Instant>,
    played: bool,
    prev_play: bool,
    persist_backdrop: bool,
}

impl Default for IntroGate {
    fn default() -> Self {
        Self::new()
    }
}

impl IntroGate {
    #[must_use]
    pub fn new() -> Self {
        Self {
            running_since: None,
            played: false,
            prev_play: false,
            persist_backdrop: false,
        }
    }

    /// Edge-detects `play`. Only a false→true transition starts the curtain;
    /// holding `play` high does not retrigger it.
    pub fn set_play(&mut self, play: bool, now: Instant) {
        if play && !self.prev_play {
            self.running_since = Some(now);
            self.played = true;
        }
        self.prev_play = play;
    }

    /// Whether the backdrop persists after the reveal.
    pub fn set_persist_backdrop(&mut self, persist: bool) {
        self.persist_backdrop = persist;
    }

    /// Advances the clock. Returns `Done` at most once per run.
    pub fn tick(&mut self, now: Instant) -> Option<IntroEvent> {
        let started = self.running_since?;
        if progress(started, now, CURTAIN) >= 1.0 {
            self.running_since = None;
            return Some(IntroEvent::Done);
        }
        None
    }

    /// Clears the played/backdrop state, as when the overlay fully closes.
    pub fn reset(&mut self) {
        self.running_since = None;
        self.played = false;
        self.prev_play = false;
        self.persist_backdrop = false;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Whether the persistent backdrop should be drawn.
    #[must_use]
    pub fn backdrop_visible(&self) -> bool {
        self.persist_backdrop && self.played && !self.is_running()
    }

    /// Curtain rise: fraction of the viewport the curtain still sits below
    /// its final position, `0.3 → 0` over the first 55% of the run.
    #[must_use]
    pub fn curtain_offset_frac(&self, now: Instant) -> f32 {
        let Some(started) = self.running_since else {
            return 0.0;
        };
        let p = progress(started, now, CURTAIN);
        let rise = (p / 0.55).min(1.0);
        0.3 * (1.0 - ease_in_out(rise))
    }

    /// Curtain scale: `0.7 → 1.0` over the last 45% of the run.
    #[must_use]
    pub fn curtain_scale(&self, now: Instant) -> f32 {
        let Some(started) = self.running_since else {
            return 1.0;
        };
        let p = progress(started, now, CURTAIN);
        if p <= 0.55 {
            return 0.7;
        }
        let expand = ((p - 0.55) / 0.45).min(1.0);
        0.7 + 0.3 * ease_in_out(expand)
    }
}

// ---------------------------------------------------------------------------
// OverlayShell
// ---------------------------------------------------------------------------

/// Lifecycle report from the [`OverlayShell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    /// The entrance fade finished. Fired once per open cycle.
    Entered,
    /// The panel exit finished. Fired once per dismissal.
    PanelOutDone,
}

/// The outer overlay container: an entrance fade when opened, and a
/// three-keyframe panel exit (shrink to 70% and hold, then fly down while
/// fading) when dismissed via [`ClosingStage::PanelOut`]. `SlideOut` leaves
/// the panel static; only the marquee strip reacts to it.
#[derive(Debug, Clone)]
pub struct OverlayShell {
    open: bool,
    fade_started: Option<Instant>,
    entered: bool,
    closing_stage: ClosingStage,
    panel_started: Option<Instant>,
    panel_reported: bool,
}

impl Default for OverlayShell {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayShell {
    #[must_use]
    pub fn new() -> Self {
        Self {
            open: false,
            fade_started: None,
            entered: false,
            closing_stage: ClosingStage::Idle,
            panel_started: None,
            panel_reported: false,
        }
    }

    /// Drives the mount state. Opening rearms the entrance fade and the
    /// `Entered` guard; closing tears everything down.
    pub fn set_open(&mut self, open: bool, now: Instant) {
        if open && !self.open {
            self.open = true;
            self.fade_started = Some(now);
            self.entered = false;
            self.panel_started = None;
            self.panel_reported = false;
        } else if !open && self.open {
            self.open = false;
            self.fade_started = None;
        }
    }

    /// Mirrors the controller's closing stage. Entering `PanelOut` starts the
    /// panel exit clock.
    pub fn set_closing_stage(&mut self, stage: ClosingStage, now: Instant) {
        if stage == ClosingStage::PanelOut && self.closing_stage != ClosingStage::PanelOut {
            self.panel_started = Some(now);
            self.panel_reported = false;
        }
        self.closing_stage = stage;
    }

    /// Advances the clock. `Entered` and `PanelOutDone` are each reported at
    /// most once per cycle.
    pub fn tick(&mut self, now: Instant) -> Option<ShellEvent> {
        if self.open && !self.entered {
            if let Some(started) = self.fade_started {
                if progress(started, now, SHELL_FADE) >= 1.0 {
                    self.entered = true;
                    return Some(ShellEvent::Entered);
                }
            }
        }
        if self.closing_stage == ClosingStage::PanelOut && !self.panel_reported {
            if let Some(started) = self.panel_started {
                if progress(started, now, PANEL_OUT) >= 1.0 {
                    self.panel_reported = true;
                    return Some(ShellEvent::PanelOutDone);
                }
            }
        }
        None
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        (self.open && !self.entered)
            || (self.closing_stage == ClosingStage::PanelOut && !self.panel_reported)
    }

    /// Entrance fade opacity in `[0, 1]`.
    #[must_use]
    pub fn fade_alpha(&self, now: Instant) -> f32 {
        if !self.open {
            return 0.0;
        }
        match self.fade_started {
            Some(started) => ease_out(progress(started, now, SHELL_FADE)),
            None => 1.0,
        }
    }

    fn panel_progress(&self, now: Instant) -> f32 {
        match (self.closing_stage, self.panel_started) {
            (ClosingStage::PanelOut, Some(started)) => progress(started, now, PANEL_OUT),
            _ => 0.0,
        }
    }

    /// Panel scale: shrinks to 70% during the first half of the exit, holds.
    #[must_use]
    pub fn panel_scale(&self, now: Instant) -> f32 {
        let p = self.panel_progress(now);
        if p <= 0.0 {
            return 1.0;
        }
        let shrink = (p / 0.5).min(1.0);
        1.0 - 0.3 * ease_in_out(shrink)
    }

    /// Panel fall: fraction of the viewport height the panel has flown down,
    /// `0 → 1.2` during the second half of the exit.
    #[must_use]
    pub fn panel_offset_frac(&self, now: Instant) -> f32 {
        let p = self.panel_progress(now);
        if p <= 0.5 {
            return 0.0;
        }
        let fall = ((p - 0.5) / 0.5).min(1.0);
        1.2 * ease_in_out(fall)
    }

    /// Panel opacity: fades during the fall.
    #[must_use]
    pub fn panel_alpha(&self, now: Instant) -> f32 {
        let p = self.panel_progress(now);
        if p <= 0.5 {
            return 1.0;
        }
        1.0 - ease_in_out(((p - 0.5) / 0.5).min(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> Instant {
        Instant::now()
    }

    #[test]
    fn stage_fade_mounts_on_show() {
        let mut fade = StageFade::new(120.0);
        assert!(!fade.is_mounted());

        let start = t0();
        fade.set_show(true, start);
        assert!(fade.is_mounted());
        assert!(fade.is_animating());

        assert_eq!(fade.tick(start + STAGE_IN), None);
        assert!(!fade.is_animating());
        assert_eq!(fade.opacity(start + STAGE_IN), 1.0);
    }

    #[test]
    fn stage_fade_reports_exit_complete_exactly_once() {
        let mut fade = StageFade::new(120.0);
        let start = t0();
        fade.set_show(true, start);
        fade.tick(start + STAGE_IN);

        fade.set_show(false, start + STAGE_IN);
        let end = start + STAGE_IN + STAGE_OUT;
        assert_eq!(fade.tick(end), Some(StageEvent::ExitComplete));
        assert!(!fade.is_mounted());
        assert_eq!(fade.tick(end + STAGE_OUT), None);
    }

    #[test]
    fn aborted_exit_suppresses_the_report_and_remounts() {
        let mut fade = StageFade::new(120.0);
        let start = t0();
        fade.set_show(true, start);
        fade.tick(start + STAGE_IN);
        fade.set_show(false, start + STAGE_IN);

        // Shown again halfway through the exit: fresh entrance, no report.
        let mid = start + STAGE_IN + STAGE_OUT / 2;
        fade.set_show(true, mid);
        assert!(fade.is_mounted());
        assert_eq!(fade.tick(mid + STAGE_OUT), None);
        assert_eq!(fade.tick(mid + STAGE_IN), None);
        assert_eq!(fade.opacity(mid + STAGE_IN), 1.0);
    }

    #[test]
    fn stage_fade_repeated_set_show_is_a_no_op() {
        let mut fade = StageFade::new(120.0);
        let start = t0();
        fade.set_show(true, start);
        // A later redundant call must not restart the entrance clock.
        fade.set_show(true, start + STAGE_IN);
        assert_eq!(fade.tick(start + STAGE_IN), None);
        assert!(!fade.is_animating());
    }

    #[test]
    fn stage_fade_offset_moves_toward_exit_offset() {
        let mut fade = StageFade::new(100.0);
        let start = t0();
        fade.set_show(true, start);
        fade.tick(start + STAGE_IN);
        fade.set_show(false, start + STAGE_IN);

        let late = start + STAGE_IN + STAGE_OUT.mul_f32(0.9);
        assert!(fade.offset_y(late) > 0.0);
        assert!(fade.offset_y(late) <= 100.0);
    }

    #[test]
    fn intro_gate_runs_once_per_edge() {
        let mut gate = IntroGate::new();
        let start = t0();
        gate.set_play(true, start);
        assert!(gate.is_running());

        assert_eq!(gate.tick(start + CURTAIN), Some(IntroEvent::Done));
        assert!(!gate.is_running());
        assert_eq!(gate.tick(start + CURTAIN * 2), None);

        // Holding play high does not retrigger.
        gate.set_play(true, start + CURTAIN * 2);
        assert!(!gate.is_running());

        // A fresh edge replays.
        gate.set_play(false, start + CURTAIN * 2);
        gate.set_play(true, start + CURTAIN * 3);
        assert!(gate.is_running());
    }

    #[test]
    fn intro_gate_backdrop_persists_after_reveal() {
        let mut gate = IntroGate::new();
        gate.set_persist_backdrop(true);
        let start = t0();

        assert!(!gate.backdrop_visible());
        gate.set_play(true, start);
        assert!(!gate.backdrop_visible()); // still running

        gate.tick(start + CURTAIN);
        assert!(gate.backdrop_visible());

        gate.reset();
        assert!(!gate.backdrop_visible());
    }

    #[test]
    fn intro_gate_without_persist_leaves_nothing_behind() {
        let mut gate = IntroGate::new();
        let start = t0();
        gate.set_play(true, start);
        gate.tick(start + CURTAIN);
        assert!(!gate.backdrop_visible());
    }

    #[test]
    fn curtain_scale_holds_then_expands() {
        let mut gate = IntroGate::new();
        let start = t0();
        gate.set_play(true, start);

        assert_eq!(gate.curtain_scale(start + CURTAIN.mul_f32(0.3)), 0.7);
        let late = gate.curtain_scale(start + CURTAIN.mul_f32(0.9));
        assert!(late > 0.7 && late <= 1.0);
    }

    #[test]
    fn shell_fires_entered_once_per_open_cycle() {
        let mut shell = OverlayShell::new();
        let start = t0();
        shell.set_open(true, start);

        assert_eq!(shell.tick(start + SHELL_FADE), Some(ShellEvent::Entered));
        // Property: a second completion in the same cycle is suppressed.
        assert_eq!(shell.tick(start + SHELL_FADE * 2), None);

        // Reopen rearms the guard.
        shell.set_open(false, start + SHELL_FADE * 2);
        shell.set_open(true, start + SHELL_FADE * 3);
        assert_eq!(
            shell.tick(start + SHELL_FADE * 4),
            Some(ShellEvent::Entered)
        );
    }

    #[test]
    fn shell_panel_out_reports_once() {
        let mut shell = OverlayShell::new();
        let start = t0();
        shell.set_open(true, start);
        shell.tick(start + SHELL_FADE);

        shell.set_closing_stage(ClosingStage::PanelOut, start + SHELL_FADE);
        let end = start + SHELL_FADE + PANEL_OUT;
        assert_eq!(shell.tick(end), Some(ShellEvent::PanelOutDone));
        assert_eq!(shell.tick(end + PANEL_OUT), None);
    }

    #[test]
    fn shell_slide_out_leaves_panel_static() {
        let mut shell = OverlayShell::new();
        let start = t0();
        shell.set_open(true, start);
        shell.tick(start + SHELL_FADE);

        shell.set_closing_stage(ClosingStage::SlideOut, start + SHELL_FADE);
        let late = start + SHELL_FADE + PANEL_OUT;
        assert_eq!(shell.tick(late), None);
        assert_eq!(shell.panel_scale(late), 1.0);
        assert_eq!(shell.panel_offset_frac(late), 0.0);
    }

    #[test]
    fn shell_panel_keyframes_shrink_then_fall() {
        let mut shell = OverlayShell::new();
        let start = t0();
        shell.set_open(true, start);
        shell.tick(start + SHELL_FADE);
        shell.set_closing_stage(ClosingStage::PanelOut, start);

        let mid = start + PANEL_OUT.mul_f32(0.5);
        assert!((shell.panel_scale(mid) - 0.7).abs() < 0.01);
        assert_eq!(shell.panel_offset_frac(mid), 0.0);

        let late = start + PANEL_OUT.mul_f32(0.95);
        assert!((shell.panel_scale(late) - 0.7).abs() < 0.01);
        assert!(shell.panel_offset_frac(late) > 0.0);
        assert!(shell.panel_alpha(late) < 1.0);
    }

    #[test]
    fn closed_shell_has_no_alpha() {
        let shell = OverlayShell::new();
        assert_eq!(shell.fade_alpha(t0()), 0.0);
        assert!(!shell.is_animating());
    }

    #[test]
    fn ease_functions_hit_their_endpoints() {
        for ease in [ease_in, ease_out, ease_in_out] {
            assert!((ease(0.0)).abs() < f32::EPSILON);
            assert!((ease(1.0) - 1.0).abs() < f32::EPSILON);
        }
    }
}
