// SPDX-License-Identifier: MPL-2.0
//! Overlay phase controller.
//!
//! The gallery overlay is a choreography of three views (category chooser,
//! marquee strip, search panel) behind a shared shell with its own entrance
//! and dismissal animations. This module owns that choreography as a pure
//! state machine: the application layer feeds it [`Event`]s (button presses
//! and animation completions) and renders from its accessors.
//!
//! Animation completions arrive asynchronously, so a completion can land
//! after the controller has already moved on. Every completion handler is
//! guarded by the flag that was set when the corresponding animation was
//! requested (`closing_choose`, `closing_search`, `search_exit_target`); a
//! completion that arrives out of context is a no-op.

use crate::gallery::Group;
use std::collections::VecDeque;

/// Which view is conceptually active. Exactly one phase at a time;
/// `Idle` means the overlay is fully closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Overlay entrance in flight; advances to [`Controller::next_after_overlay_in`]
    /// when the shell reports `EntranceDone`.
    OverlayIn,
    Choose,
    MarqueeIntro,
    Marquee,
    SearchIntro,
    Search,
}

/// The shell's own dismissal sequence, independent of [`Phase`].
///
/// Only two walks are legal: `Idle → SlideOut → PanelOut → Idle` (marquee and
/// search close through the strip/panel slide first) and
/// `Idle → PanelOut → Idle` (search exit completion continues straight into
/// the panel exit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClosingStage {
    #[default]
    Idle,
    SlideOut,
    PanelOut,
}

/// Externally visible mode, driving the mode-switcher highlight. Tracks what
/// the user last asked for, not the animation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    Marquee,
    Search,
}

/// Where a search exit is headed. Recorded when the exit is requested so the
/// completion handler can branch after the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchExit {
    Grid,
    Choose,
}

/// Phase to advance to once the overlay entrance finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayTarget {
    #[default]
    Choose,
    SearchIntro,
}

impl From<OverlayTarget> for Phase {
    fn from(target: OverlayTarget) -> Self {
        match target {
            OverlayTarget::Choose => Phase::Choose,
            OverlayTarget::SearchIntro => Phase::SearchIntro,
        }
    }
}

/// Everything that can happen to the overlay: user intents and animation
/// completions, one tagged union.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Marquee mode button.
    OpenMarquee,
    /// Search mode button.
    OpenSearch,
    /// Grid mode button.
    CloseOverlay,
    /// Escape key or an in-view close affordance. Same behavior as
    /// [`Event::CloseOverlay`].
    RequestClose,
    /// A category was picked in the chooser.
    Pick(Group),
    /// The shell's entrance fade finished.
    EntranceDone,
    /// The shell's panel exit finished.
    PanelOutDone,
    /// The chooser's exit fade finished.
    ChooserExitDone,
    /// The search panel's exit fade finished.
    SearchExitDone,
    /// The marquee strip finished sliding out.
    MarqueeSlideOutDone,
    /// The marquee intro curtain finished.
    MarqueeIntroDone,
    /// The search intro curtain finished.
    SearchIntroDone,
}

/// An action the controller wants applied on the next event-queue turn
/// rather than synchronously. See [`Controller::take_pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    /// Begin the search panel's exit fade. Deferred so the search intro's
    /// completion path resolves before the exit starts.
    BeginSearchExit,
}

/// The overlay phase state machine.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    mode: ViewMode,
    open: bool,
    phase: Phase,
    closing_stage: ClosingStage,
    selected_group: Option<Group>,
    closing_choose: bool,
    closing_search: bool,
    search_exit_target: Option<SearchExit>,
    next_after_overlay_in: OverlayTarget,
    search_curtain_on: bool,
    marquee_curtain_on: bool,
    pending: VecDeque<Pending>,
}

impl Controller {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one event. Synchronous; any deferred follow-up is queued and
    /// must be drained via [`Controller::take_pending`].
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::OpenMarquee => self.open_marquee(),
            Event::OpenSearch => self.open_search(),
            Event::CloseOverlay | Event::RequestClose => self.close_overlay(),
            Event::Pick(group) => self.pick(group),
            Event::EntranceDone => self.entrance_done(),
            Event::PanelOutDone => self.full_reset(),
            Event::ChooserExitDone => self.chooser_exit_done(),
            Event::SearchExitDone => self.search_exit_done(),
            Event::MarqueeSlideOutDone => self.marquee_slide_out_done(),
            Event::MarqueeIntroDone => self.marquee_intro_done(),
            Event::SearchIntroDone => self.search_intro_done(),
        }
        self.debug_assert_invariants();
    }

    /// Takes the oldest deferred action, if any. The application layer
    /// re-posts it through the runtime's message queue, so its ordering
    /// against newer user events is the queue order: explicit FIFO, not
    /// scheduler timing.
    pub fn take_pending(&mut self) -> Option<Pending> {
        self.pending.pop_front()
    }

    /// Applies a previously deferred action. A pending search exit only
    /// applies if the controller is still in `Search` with a recorded exit
    /// target; a superseding `OpenSearch`/`CloseOverlay` clears the target
    /// and the action degrades to a no-op.
    pub fn apply_pending(&mut self, pending: Pending) {
        match pending {
            Pending::BeginSearchExit => {
                if self.phase == Phase::Search && self.search_exit_target.is_some() {
                    self.closing_search = true;
                }
            }
        }
        self.debug_assert_invariants();
    }

    // --- user intents -----------------------------------------------------

    fn open_marquee(&mut self) {
        if self.phase == Phase::Search {
            // Exit search toward the chooser; the exit completion advances
            // the phase once the fade is done.
            self.mode = ViewMode::Marquee;
            self.search_exit_target = Some(SearchExit::Choose);
            self.closing_stage = ClosingStage::Idle;
            self.closing_search = true;
            return;
        }
        if self.phase == Phase::SearchIntro {
            // The intro curtain is still playing. Settle into `Search` first
            // so the curtain's completion resolves normally, and begin the
            // exit on the next queue turn.
            self.mode = ViewMode::Marquee;
            self.search_exit_target = Some(SearchExit::Choose);
            self.closing_stage = ClosingStage::Idle;
            self.phase = Phase::Search;
            self.pending.push_back(Pending::BeginSearchExit);
            return;
        }
        if !self.open {
            self.mode = ViewMode::Marquee;
            self.open = true;
            self.closing_stage = ClosingStage::Idle;
            self.selected_group = None;
            self.closing_choose = false;
            self.closing_search = false;
            self.search_exit_target = None;
            self.marquee_curtain_on = false;
            self.next_after_overlay_in = OverlayTarget::Choose;
            self.phase = Phase::OverlayIn;
        } else {
            self.mode = ViewMode::Marquee;
            self.closing_stage = ClosingStage::Idle;
            self.closing_choose = false;
            self.closing_search = false;
            self.search_exit_target = None;
            self.marquee_curtain_on = false;
            self.phase = Phase::Choose;
        }
    }

    fn open_search(&mut self) {
        // Search always shows its persistent backdrop after the curtain.
        self.search_curtain_on = true;
        self.marquee_curtain_on = false;
        if !self.open {
            self.mode = ViewMode::Search;
            self.open = true;
            self.closing_stage = ClosingStage::Idle;
            self.selected_group = None;
            self.closing_choose = false;
            self.closing_search = false;
            self.search_exit_target = None;
            self.next_after_overlay_in = OverlayTarget::SearchIntro;
            self.phase = Phase::OverlayIn;
        } else {
            self.mode = ViewMode::Search;
            self.closing_stage = ClosingStage::Idle;
            self.closing_choose = false;
            self.closing_search = false;
            self.search_exit_target = None;
            self.phase = Phase::SearchIntro;
        }
    }

    fn close_overlay(&mut self) {
        if !self.open {
            self.mode = ViewMode::Grid;
            return;
        }
        if self.phase == Phase::Choose {
            // The chooser's own fade is enough; no shell-level animation.
            self.mode = ViewMode::Grid;
            self.marquee_curtain_on = false;
            self.closing_choose = true;
            return;
        }
        if self.phase == Phase::Search {
            // Closing straight to the grid should look like the whole panel
            // leaving: start the shell dismissal while the panel fades.
            self.mode = ViewMode::Grid;
            self.search_curtain_on = false;
            self.search_exit_target = Some(SearchExit::Grid);
            self.closing_search = true;
            self.closing_stage = ClosingStage::SlideOut;
            return;
        }
        self.mode = ViewMode::Grid;
        self.marquee_curtain_on = false;
        self.closing_stage = ClosingStage::SlideOut;
    }

    fn pick(&mut self, group: Group) {
        self.selected_group = Some(group);
        self.marquee_curtain_on = true;
        self.phase = Phase::MarqueeIntro;
    }

    // --- animation completions --------------------------------------------

    fn entrance_done(&mut self) {
        // Ignore late or duplicate entrance reports once past `OverlayIn`.
        if self.phase == Phase::OverlayIn {
            self.phase = self.next_after_overlay_in.into();
        }
    }

    fn chooser_exit_done(&mut self) {
        if !self.closing_choose {
            return;
        }
        self.open = false;
        self.closing_stage = ClosingStage::Idle;
        self.phase = Phase::Idle;
        self.selected_group = None;
        self.closing_choose = false;
        self.next_after_overlay_in = OverlayTarget::Choose;
    }

    fn search_exit_done(&mut self) {
        if !self.closing_search {
            return;
        }
        match self.search_exit_target {
            Some(SearchExit::Grid) => {
                self.search_curtain_on = false;
                self.closing_search = false;
                self.search_exit_target = None;
                self.closing_stage = ClosingStage::PanelOut;
            }
            Some(SearchExit::Choose) => {
                self.search_curtain_on = false;
                self.closing_search = false;
                self.search_exit_target = None;
                self.closing_stage = ClosingStage::Idle;
                self.phase = Phase::Choose;
            }
            None => {}
        }
    }

    fn marquee_slide_out_done(&mut self) {
        // The strip only slides while the shell is in `SlideOut`.
        if self.closing_stage == ClosingStage::SlideOut {
            self.closing_stage = ClosingStage::PanelOut;
        }
    }

    fn marquee_intro_done(&mut self) {
        if self.phase == Phase::MarqueeIntro {
            self.phase = Phase::Marquee;
        }
    }

    fn search_intro_done(&mut self) {
        if self.phase == Phase::SearchIntro {
            self.phase = Phase::Search;
        }
    }

    fn full_reset(&mut self) {
        self.open = false;
        self.closing_stage = ClosingStage::Idle;
        self.phase = Phase::Idle;
        self.selected_group = None;
        self.closing_choose = false;
        self.closing_search = false;
        self.search_exit_target = None;
        self.search_curtain_on = false;
        self.marquee_curtain_on = false;
    }

    // --- accessors --------------------------------------------------------

    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn closing_stage(&self) -> ClosingStage {
        self.closing_stage
    }

    #[must_use]
    pub fn selected_group(&self) -> Option<&Group> {
        self.selected_group.as_ref()
    }

    #[must_use]
    pub fn closing_choose(&self) -> bool {
        self.closing_choose
    }

    #[must_use]
    pub fn closing_search(&self) -> bool {
        self.closing_search
    }

    #[must_use]
    pub fn search_exit_target(&self) -> Option<SearchExit> {
        self.search_exit_target
    }

    #[must_use]
    pub fn search_curtain_on(&self) -> bool {
        self.search_curtain_on
    }

    #[must_use]
    pub fn marquee_curtain_on(&self) -> bool {
        self.marquee_curtain_on
    }

    #[must_use]
    pub fn next_after_overlay_in(&self) -> OverlayTarget {
        self.next_after_overlay_in
    }

    /// Whether the chooser view should be mounted.
    #[must_use]
    pub fn chooser_shown(&self) -> bool {
        self.phase == Phase::Choose && !self.closing_choose
    }

    /// Whether the marquee strip should be mounted.
    #[must_use]
    pub fn marquee_shown(&self) -> bool {
        self.phase == Phase::Marquee
    }

    /// Whether the search panel should be mounted.
    #[must_use]
    pub fn search_shown(&self) -> bool {
        self.phase == Phase::Search && !self.closing_search
    }

    /// Closing intent passed down to the marquee strip.
    #[must_use]
    pub fn marquee_closing(&self) -> bool {
        self.closing_stage != ClosingStage::Idle
    }

    #[cfg(debug_assertions)]
    fn debug_assert_invariants(&self) {
        debug_assert_eq!(
            self.open,
            self.phase != Phase::Idle,
            "overlay open state must mirror phase"
        );
        debug_assert!(
            !(self.closing_choose && self.closing_search),
            "at most one exit in flight"
        );
        if matches!(self.phase, Phase::MarqueeIntro | Phase::Marquee) {
            debug_assert!(
                self.selected_group.is_some(),
                "marquee phases require a selected group"
            );
        }
    }

    #[cfg(not(debug_assertions))]
    fn debug_assert_invariants(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn group(id: &str) -> Group {
        Group::new(id, PathBuf::from(format!("{id}/cover.jpg")), 4)
    }

    fn drain_pending(controller: &mut Controller) {
        while let Some(pending) = controller.take_pending() {
            controller.apply_pending(pending);
        }
    }

    fn assert_fully_reset(controller: &Controller) {
        assert!(!controller.is_open());
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(controller.closing_stage(), ClosingStage::Idle);
        assert!(controller.selected_group().is_none());
        assert!(!controller.closing_choose());
        assert!(!controller.closing_search());
        assert!(controller.search_exit_target().is_none());
    }

    #[test]
    fn new_controller_is_idle_and_closed() {
        let controller = Controller::new();
        assert_fully_reset(&controller);
        assert_eq!(controller.mode(), ViewMode::Grid);
    }

    #[test]
    fn cold_open_to_marquee() {
        let mut controller = Controller::new();

        controller.apply(Event::OpenMarquee);
        assert!(controller.is_open());
        assert_eq!(controller.phase(), Phase::OverlayIn);
        assert_eq!(controller.next_after_overlay_in(), OverlayTarget::Choose);
        assert_eq!(controller.mode(), ViewMode::Marquee);

        controller.apply(Event::EntranceDone);
        assert_eq!(controller.phase(), Phase::Choose);

        controller.apply(Event::Pick(group("g1")));
        assert_eq!(controller.phase(), Phase::MarqueeIntro);
        assert_eq!(controller.selected_group().map(|g| g.id.as_str()), Some("g1"));
        assert!(controller.marquee_curtain_on());

        controller.apply(Event::MarqueeIntroDone);
        assert_eq!(controller.phase(), Phase::Marquee);
    }

    #[test]
    fn close_from_marquee_goes_through_slide_out_then_panel_out() {
        let mut controller = Controller::new();
        controller.apply(Event::OpenMarquee);
        controller.apply(Event::EntranceDone);
        controller.apply(Event::Pick(group("g1")));
        controller.apply(Event::MarqueeIntroDone);

        controller.apply(Event::CloseOverlay);
        assert_eq!(controller.closing_stage(), ClosingStage::SlideOut);
        assert_eq!(controller.mode(), ViewMode::Grid);
        // Still open until the dismissal completes.
        assert!(controller.is_open());

        controller.apply(Event::MarqueeSlideOutDone);
        assert_eq!(controller.closing_stage(), ClosingStage::PanelOut);

        controller.apply(Event::PanelOutDone);
        assert_fully_reset(&controller);
        assert!(!controller.search_curtain_on());
        assert!(!controller.marquee_curtain_on());
    }

    #[test]
    fn search_over_marquee_then_back_to_choose() {
        let mut controller = Controller::new();
        controller.apply(Event::OpenMarquee);
        controller.apply(Event::EntranceDone);
        controller.apply(Event::Pick(group("g1")));
        controller.apply(Event::MarqueeIntroDone);

        controller.apply(Event::OpenSearch);
        assert_eq!(controller.phase(), Phase::SearchIntro);
        assert!(controller.search_curtain_on());
        assert!(!controller.marquee_curtain_on());

        controller.apply(Event::SearchIntroDone);
        assert_eq!(controller.phase(), Phase::Search);

        controller.apply(Event::OpenMarquee);
        assert_eq!(controller.search_exit_target(), Some(SearchExit::Choose));
        assert!(controller.closing_search());
        assert_eq!(controller.closing_stage(), ClosingStage::Idle);

        controller.apply(Event::SearchExitDone);
        assert_eq!(controller.phase(), Phase::Choose);
        assert!(!controller.closing_search());
        assert!(controller.search_exit_target().is_none());
        assert!(!controller.search_curtain_on());
    }

    #[test]
    fn close_directly_from_chooser_skips_shell_animation() {
        let mut controller = Controller::new();
        controller.apply(Event::OpenMarquee);
        controller.apply(Event::EntranceDone);

        controller.apply(Event::CloseOverlay);
        assert!(controller.closing_choose());
        assert_eq!(controller.closing_stage(), ClosingStage::Idle);
        assert!(!controller.chooser_shown());

        controller.apply(Event::ChooserExitDone);
        assert_fully_reset(&controller);
    }

    #[test]
    fn close_from_search_runs_shell_and_panel_concurrently() {
        let mut controller = Controller::new();
        controller.apply(Event::OpenSearch);
        controller.apply(Event::EntranceDone);
        assert_eq!(controller.phase(), Phase::SearchIntro);
        controller.apply(Event::SearchIntroDone);

        controller.apply(Event::CloseOverlay);
        assert_eq!(controller.search_exit_target(), Some(SearchExit::Grid));
        assert!(controller.closing_search());
        assert_eq!(controller.closing_stage(), ClosingStage::SlideOut);
        assert!(!controller.search_curtain_on());

        controller.apply(Event::SearchExitDone);
        assert_eq!(controller.closing_stage(), ClosingStage::PanelOut);

        controller.apply(Event::PanelOutDone);
        assert_fully_reset(&controller);
    }

    #[test]
    fn open_marquee_during_search_intro_defers_the_exit() {
        let mut controller = Controller::new();
        controller.apply(Event::OpenSearch);
        controller.apply(Event::EntranceDone);
        assert_eq!(controller.phase(), Phase::SearchIntro);

        controller.apply(Event::OpenMarquee);
        // Settled into Search synchronously; the exit starts on the next turn.
        assert_eq!(controller.phase(), Phase::Search);
        assert_eq!(controller.search_exit_target(), Some(SearchExit::Choose));
        assert!(!controller.closing_search());

        drain_pending(&mut controller);
        assert!(controller.closing_search());

        controller.apply(Event::SearchExitDone);
        assert_eq!(controller.phase(), Phase::Choose);
    }

    #[test]
    fn pending_search_exit_superseded_by_open_search_is_a_no_op() {
        let mut controller = Controller::new();
        controller.apply(Event::OpenSearch);
        controller.apply(Event::EntranceDone);
        controller.apply(Event::OpenMarquee);
        let pending = controller.take_pending().expect("deferred exit queued");

        // The user re-opens search before the deferred action runs.
        controller.apply(Event::OpenSearch);
        controller.apply_pending(pending);
        assert!(!controller.closing_search());
        assert_eq!(controller.phase(), Phase::SearchIntro);
    }

    #[test]
    fn pending_search_exit_superseded_by_close_is_a_no_op() {
        let mut controller = Controller::new();
        controller.apply(Event::OpenSearch);
        controller.apply(Event::EntranceDone);
        controller.apply(Event::OpenMarquee);
        let pending = controller.take_pending().expect("deferred exit queued");

        controller.apply(Event::CloseOverlay);
        // Close-from-search path took over: it owns the exit now.
        assert_eq!(controller.search_exit_target(), Some(SearchExit::Grid));
        let was_closing = controller.closing_search();
        controller.apply_pending(pending);
        assert_eq!(controller.closing_search(), was_closing);
    }

    #[test]
    fn entrance_done_is_ignored_outside_overlay_in() {
        let mut controller = Controller::new();
        controller.apply(Event::OpenMarquee);
        controller.apply(Event::EntranceDone);
        assert_eq!(controller.phase(), Phase::Choose);

        // A duplicate completion must not re-run the advance.
        controller.apply(Event::Pick(group("g1")));
        controller.apply(Event::EntranceDone);
        assert_eq!(controller.phase(), Phase::MarqueeIntro);
    }

    #[test]
    fn stale_chooser_exit_is_a_no_op() {
        let mut controller = Controller::new();
        controller.apply(Event::OpenMarquee);
        controller.apply(Event::EntranceDone);

        // No exit was requested; a stray completion must change nothing.
        controller.apply(Event::ChooserExitDone);
        assert!(controller.is_open());
        assert_eq!(controller.phase(), Phase::Choose);
    }

    #[test]
    fn stale_search_exit_is_a_no_op() {
        let mut controller = Controller::new();
        controller.apply(Event::OpenSearch);
        controller.apply(Event::EntranceDone);
        controller.apply(Event::SearchIntroDone);

        controller.apply(Event::SearchExitDone);
        assert!(controller.is_open());
        assert_eq!(controller.phase(), Phase::Search);
    }

    #[test]
    fn slide_out_done_is_ignored_unless_sliding() {
        let mut controller = Controller::new();
        controller.apply(Event::OpenMarquee);
        controller.apply(Event::EntranceDone);

        controller.apply(Event::MarqueeSlideOutDone);
        assert_eq!(controller.closing_stage(), ClosingStage::Idle);
        assert!(controller.is_open());
    }

    #[test]
    fn close_while_closed_only_resets_mode() {
        let mut controller = Controller::new();
        controller.apply(Event::OpenMarquee);
        controller.apply(Event::CloseOverlay); // from OverlayIn: shell slide
        controller.apply(Event::PanelOutDone); // force the reset
        assert_fully_reset(&controller);

        controller.apply(Event::CloseOverlay);
        assert_eq!(controller.mode(), ViewMode::Grid);
        assert_fully_reset(&controller);
    }

    #[test]
    fn open_marquee_while_in_marquee_returns_to_chooser() {
        let mut controller = Controller::new();
        controller.apply(Event::OpenMarquee);
        controller.apply(Event::EntranceDone);
        controller.apply(Event::Pick(group("g1")));
        controller.apply(Event::MarqueeIntroDone);

        controller.apply(Event::OpenMarquee);
        assert_eq!(controller.phase(), Phase::Choose);
        assert!(!controller.marquee_curtain_on());
        // The selection survives until a full close.
        assert!(controller.selected_group().is_some());
    }

    #[test]
    fn request_close_behaves_like_close_overlay() {
        let mut controller = Controller::new();
        controller.apply(Event::OpenMarquee);
        controller.apply(Event::EntranceDone);
        controller.apply(Event::RequestClose);
        assert!(controller.closing_choose());
    }

    #[test]
    fn reopening_after_full_close_starts_clean() {
        let mut controller = Controller::new();
        controller.apply(Event::OpenMarquee);
        controller.apply(Event::EntranceDone);
        controller.apply(Event::Pick(group("g1")));
        controller.apply(Event::MarqueeIntroDone);
        controller.apply(Event::CloseOverlay);
        controller.apply(Event::MarqueeSlideOutDone);
        controller.apply(Event::PanelOutDone);

        controller.apply(Event::OpenSearch);
        assert_eq!(controller.phase(), Phase::OverlayIn);
        assert_eq!(controller.next_after_overlay_in(), OverlayTarget::SearchIntro);
        assert!(controller.selected_group().is_none());
    }

    #[test]
    fn open_search_from_chooser_overlays_directly() {
        let mut controller = Controller::new();
        controller.apply(Event::OpenMarquee);
        controller.apply(Event::EntranceDone);

        controller.apply(Event::OpenSearch);
        assert_eq!(controller.phase(), Phase::SearchIntro);
        assert!(controller.search_curtain_on());
        assert_eq!(controller.closing_stage(), ClosingStage::Idle);
    }

    #[test]
    fn close_during_marquee_intro_resolves_after_intro() {
        let mut controller = Controller::new();
        controller.apply(Event::OpenMarquee);
        controller.apply(Event::EntranceDone);
        controller.apply(Event::Pick(group("g1")));

        controller.apply(Event::CloseOverlay);
        assert_eq!(controller.closing_stage(), ClosingStage::SlideOut);
        assert_eq!(controller.phase(), Phase::MarqueeIntro);

        // The curtain finishes, the strip mounts already-closing, slides out,
        // and the dismissal completes.
        controller.apply(Event::MarqueeIntroDone);
        assert_eq!(controller.phase(), Phase::Marquee);
        assert!(controller.marquee_closing());
        controller.apply(Event::MarqueeSlideOutDone);
        controller.apply(Event::PanelOutDone);
        assert_fully_reset(&controller);
    }

    #[test]
    fn exits_never_overlap() {
        let mut controller = Controller::new();
        let script = [
            Event::OpenMarquee,
            Event::EntranceDone,
            Event::OpenSearch,
            Event::SearchIntroDone,
            Event::OpenMarquee,
            Event::CloseOverlay,
            Event::SearchExitDone,
            Event::OpenSearch,
            Event::SearchIntroDone,
            Event::CloseOverlay,
            Event::SearchExitDone,
            Event::PanelOutDone,
        ];
        for event in script {
            controller.apply(event);
            assert!(!(controller.closing_choose() && controller.closing_search()));
            assert_eq!(controller.is_open(), controller.phase() != Phase::Idle);
        }
    }

    #[test]
    fn marquee_phases_always_have_a_group() {
        let mut controller = Controller::new();
        let script = [
            Event::OpenMarquee,
            Event::EntranceDone,
            Event::Pick(group("g1")),
            Event::MarqueeIntroDone,
            Event::OpenSearch,
            Event::SearchIntroDone,
            Event::OpenMarquee,
            Event::SearchExitDone,
            Event::Pick(group("g2")),
            Event::MarqueeIntroDone,
        ];
        for event in script {
            controller.apply(event);
            if matches!(controller.phase(), Phase::MarqueeIntro | Phase::Marquee) {
                assert!(controller.selected_group().is_some());
            }
        }
        assert_eq!(controller.selected_group().map(|g| g.id.as_str()), Some("g2"));
    }
}
