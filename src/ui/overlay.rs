// SPDX-License-Identifier: MPL-2.0
//! Overlay wiring: binds the phase controller to its animation primitives.
//!
//! The controller decides *what* should be visible; the primitives animate
//! *how* it appears. After every controller change, [`Overlay::sync`] pushes
//! the controller's derived flags into the shell, the stage fades, and the
//! intro gates, and each tick polls the primitives and feeds their completion
//! reports back into the controller. The application layer only ever talks to
//! this type.

use crate::gallery::controller::{Controller, Event, Pending, Phase};
use crate::ui::transitions::{
    IntroEvent, IntroGate, OverlayShell, ShellEvent, StageEvent, StageFade,
};
use std::time::Instant;

/// Exit offset that pushes the chooser and search views fully off-screen at
/// the default window size.
const OFFSCREEN_EXIT: f32 = 780.0;
/// The marquee stage only nudges down as it fades; the strip itself handles
/// the big slide-out.
const MARQUEE_EXIT: f32 = 8.0;

/// The overlay: phase controller plus its shell, fades, and curtains.
#[derive(Debug)]
pub struct Overlay {
    controller: Controller,
    shell: OverlayShell,
    chooser_fade: StageFade,
    marquee_fade: StageFade,
    search_fade: StageFade,
    marquee_gate: IntroGate,
    search_gate: IntroGate,
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Overlay {
    #[must_use]
    pub fn new() -> Self {
        Self {
            controller: Controller::new(),
            shell: OverlayShell::new(),
            chooser_fade: StageFade::new(OFFSCREEN_EXIT),
            marquee_fade: StageFade::new(MARQUEE_EXIT),
            search_fade: StageFade::new(OFFSCREEN_EXIT),
            marquee_gate: IntroGate::new(),
            search_gate: IntroGate::new(),
        }
    }

    /// Applies a controller event and re-syncs the primitives. Returns any
    /// deferred actions; the caller re-posts them through its message queue
    /// so their ordering against newer events stays explicit.
    pub fn handle(&mut self, event: Event, now: Instant) -> Vec<Pending> {
        self.controller.apply(event);
        self.sync(now);
        self.drain_pending()
    }

    /// Applies a previously deferred action.
    pub fn apply_pending(&mut self, pending: Pending, now: Instant) {
        self.controller.apply_pending(pending);
        self.sync(now);
    }

    /// Polls every primitive once and feeds completions back into the
    /// controller. Call once per animation frame.
    pub fn tick(&mut self, now: Instant) -> Vec<Pending> {
        let mut completions = Vec::new();

        match self.shell.tick(now) {
            Some(ShellEvent::Entered) => completions.push(Event::EntranceDone),
            Some(ShellEvent::PanelOutDone) => completions.push(Event::PanelOutDone),
            None => {}
        }
        if let Some(StageEvent::ExitComplete) = self.chooser_fade.tick(now) {
            completions.push(Event::ChooserExitDone);
        }
        if let Some(StageEvent::ExitComplete) = self.search_fade.tick(now) {
            completions.push(Event::SearchExitDone);
        }
        // The marquee stage exit reports nothing; the strip's own slide-out
        // drives the dismissal instead.
        let _ = self.marquee_fade.tick(now);
        if let Some(IntroEvent::Done) = self.marquee_gate.tick(now) {
            completions.push(Event::MarqueeIntroDone);
        }
        if let Some(IntroEvent::Done) = self.search_gate.tick(now) {
            completions.push(Event::SearchIntroDone);
        }

        let mut pendings = Vec::new();
        for event in completions {
            pendings.extend(self.handle(event, now));
        }
        pendings
    }

    /// Pushes the controller's derived visibility flags into the primitives.
    fn sync(&mut self, now: Instant) {
        let c = &self.controller;

        self.shell.set_open(c.is_open(), now);
        self.shell.set_closing_stage(c.closing_stage(), now);

        self.chooser_fade.set_show(c.chooser_shown(), now);
        self.marquee_fade.set_show(c.marquee_shown(), now);
        self.search_fade.set_show(c.search_shown(), now);

        self.marquee_gate.set_persist_backdrop(c.marquee_curtain_on());
        self.search_gate.set_persist_backdrop(c.search_curtain_on());
        self.marquee_gate
            .set_play(c.phase() == Phase::MarqueeIntro, now);
        self.search_gate
            .set_play(c.phase() == Phase::SearchIntro, now);

        // A full close unmounts the shell, which takes every child with it:
        // fades stop without reporting and the gates rearm for the next
        // cycle's curtains.
        if !c.is_open() {
            self.chooser_fade.hide_now();
            self.marquee_fade.hide_now();
            self.search_fade.hide_now();
            self.marquee_gate.reset();
            self.search_gate.reset();
        }
    }

    fn drain_pending(&mut self) -> Vec<Pending> {
        let mut pendings = Vec::new();
        while let Some(pending) = self.controller.take_pending() {
            pendings.push(pending);
        }
        pendings
    }

    /// Whether any primitive still needs animation frames.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.shell.is_animating()
            || self.chooser_fade.is_animating()
            || self.marquee_fade.is_animating()
            || self.search_fade.is_animating()
            || self.marquee_gate.is_running()
            || self.search_gate.is_running()
    }

    #[must_use]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    #[must_use]
    pub fn shell(&self) -> &OverlayShell {
        &self.shell
    }

    #[must_use]
    pub fn chooser_fade(&self) -> &StageFade {
        &self.chooser_fade
    }

    #[must_use]
    pub fn marquee_fade(&self) -> &StageFade {
        &self.marquee_fade
    }

    #[must_use]
    pub fn search_fade(&self) -> &StageFade {
        &self.search_fade
    }

    #[must_use]
    pub fn marquee_gate(&self) -> &IntroGate {
        &self.marquee_gate
    }

    #[must_use]
    pub fn search_gate(&self) -> &IntroGate {
        &self.search_gate
    }
}
