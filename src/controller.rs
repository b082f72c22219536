//! Session lifecycle
//!
//! The controller owns the world, the active profile, the RNG and the frame
//! scheduler. Input intents and frame callbacks come in; ticks, rendering,
//! sounds and best-score writes go out.
//!
//! ```text
//! Idle --flap--> Running <--pause--> Paused
//!                   |
//!               collision
//!                   v
//!               Terminal --flap/restart--> Running
//! ```
//! Mode and viewport changes re-seed everything.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{SoundEffect, SoundSink};
use crate::input::Intent;
use crate::persistence::{BestScore, KeyValueStore};
use crate::platform::FrameScheduler;
use crate::renderer::{Renderer, Surface};
use crate::sim::{Mode, Profile, SessionPhase, TickEvents, Viewport, WorldState, tick};

pub struct GameController<S, K, A>
where
    S: FrameScheduler,
    K: KeyValueStore,
    A: SoundSink,
{
    world: WorldState,
    profile: Profile,
    rng: Pcg32,
    best: BestScore<K>,
    audio: A,
    scheduler: S,
    /// Guards the one-shot terminal side effects
    terminal_announced: bool,
    /// Best score at session start, for the once-per-session new-best log
    session_start_best: u64,
}

impl<S, K, A> GameController<S, K, A>
where
    S: FrameScheduler,
    K: KeyValueStore,
    A: SoundSink,
{
    /// Build an idle session. Reads the stored best score once.
    pub fn new(mode: Mode, viewport: Viewport, seed: u64, store: K, audio: A, scheduler: S) -> Self {
        let profile = Profile::compute(mode, viewport);
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = WorldState::new(&profile, &mut rng);
        let best = BestScore::load(store);
        let session_start_best = best.value();

        log::info!(
            "Session ready: mode={} viewport={}x{} seed={}",
            mode.as_str(),
            profile.viewport.width,
            profile.viewport.height,
            seed
        );

        Self {
            world,
            profile,
            rng,
            best,
            audio,
            scheduler,
            terminal_announced: false,
            session_start_best,
        }
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn mode(&self) -> Mode {
        self.profile.mode
    }

    pub fn best_score(&self) -> u64 {
        self.best.value()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Apply a player intent
    pub fn handle(&mut self, intent: Intent) {
        match intent {
            Intent::Flap => self.flap(),
            Intent::TogglePause => self.toggle_pause(),
            Intent::Restart => self.restart(),
            Intent::ChangeMode(mode) => self.set_mode(mode),
        }
    }

    fn flap(&mut self) {
        match self.world.phase {
            SessionPhase::Idle => {
                self.world.phase = SessionPhase::Running;
                self.world.entity.flap(self.profile.flap_impulse);
                self.audio.play(SoundEffect::Flap);
                self.scheduler.resume();
                log::info!("Session started");
            }
            // A paused flap primes the velocity for the next resumed tick
            SessionPhase::Running | SessionPhase::Paused => {
                self.world.entity.flap(self.profile.flap_impulse);
                self.audio.play(SoundEffect::Flap);
            }
            SessionPhase::Terminal => self.restart(),
        }
    }

    fn toggle_pause(&mut self) {
        match self.world.phase {
            SessionPhase::Running => {
                self.world.phase = SessionPhase::Paused;
                self.scheduler.suspend();
            }
            SessionPhase::Paused => {
                self.world.phase = SessionPhase::Running;
                self.scheduler.resume();
            }
            SessionPhase::Idle | SessionPhase::Terminal => {}
        }
    }

    /// Pause a running session without toggling, e.g. when the tab hides
    pub fn auto_pause(&mut self) {
        if self.world.phase == SessionPhase::Running {
            self.toggle_pause();
            log::info!("Auto-paused");
        }
    }

    /// Start a fresh running session with the current profile
    pub fn restart(&mut self) {
        self.reseed(SessionPhase::Running);
        log::info!("Session restarted (mode={})", self.profile.mode.as_str());
    }

    /// Switch difficulty. Always a full reset into a running session.
    pub fn set_mode(&mut self, mode: Mode) {
        self.profile = Profile::compute(mode, self.profile.viewport);
        self.reseed(SessionPhase::Running);
        log::info!("Mode changed to {}", mode.as_str());
    }

    /// React to a host resize. An unchanged viewport is a no-op; otherwise
    /// the profile is recomputed and the session re-seeded, staying idle if
    /// it had not started yet.
    pub fn resize(&mut self, viewport: Viewport) {
        let viewport = viewport.normalized();
        if viewport == self.profile.viewport {
            return;
        }
        self.profile = Profile::compute(self.profile.mode, viewport);
        let phase = if self.world.phase == SessionPhase::Idle {
            SessionPhase::Idle
        } else {
            SessionPhase::Running
        };
        self.reseed(phase);
        log::info!("Viewport changed to {}x{}", viewport.width, viewport.height);
    }

    fn reseed(&mut self, phase: SessionPhase) {
        // Tear down the old loop before touching state
        self.scheduler.suspend();
        self.world.reset(&self.profile, &mut self.rng, phase);
        self.terminal_announced = false;
        self.session_start_best = self.best.value();
        if phase == SessionPhase::Running {
            self.scheduler.resume();
        }
    }

    /// One scheduled frame: advance the simulation and fire side effects
    pub fn frame(&mut self) -> TickEvents {
        let mut best = self.best.value();
        let events = tick(&mut self.world, &self.profile, &mut self.rng, &mut best);

        if events.scored > 0 {
            self.audio.play(SoundEffect::Score);
        }
        if events.best_raised {
            let first_this_session = self.best.value() <= self.session_start_best;
            self.best.offer(best);
            if first_this_session {
                log::info!("New best score!");
            }
        }
        if events.terminal {
            self.on_terminal();
        }

        events
    }

    fn on_terminal(&mut self) {
        if self.terminal_announced {
            return;
        }
        self.terminal_announced = true;
        self.scheduler.suspend();
        self.audio.play(SoundEffect::GameOver);
        log::info!(
            "Game over: score={} best={}",
            self.world.score,
            self.best.value()
        );
    }

    /// Draw the current state. Safe in any phase and while suspended.
    pub fn render<Su: Surface>(&self, renderer: &mut Renderer, surface: &mut Su) {
        renderer.best_score = self.best.value();
        renderer.render(&self.world, &self.profile, surface);
    }
}
