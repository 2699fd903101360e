//! Simulate-and-render loop
//!
//! Rendering happens every iteration; physics advances on its own fixed
//! schedule (`next_update`), so display rate and simulation rate are
//! independent.

use std::collections::VecDeque;

use crate::platform::Clock;
use crate::renderer::{Renderer, render_frame};
use crate::settings::Settings;
use crate::sim::{InputEvent, NearestNeighborQuery, QueryResult, SimulationState, apply_event, tick};

/// Source of input events, polled once per iteration
pub trait InputSource {
    /// Append pending events to `events`, oldest first
    fn poll(&mut self, events: &mut VecDeque<InputEvent>);
}

impl<F> InputSource for F
where
    F: FnMut(&mut VecDeque<InputEvent>),
{
    fn poll(&mut self, events: &mut VecDeque<InputEvent>) {
        self(events)
    }
}

/// Running counters for the loop
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Completed loop iterations
    pub frames: u64,
    /// Physics ticks run
    pub ticks: u64,
    /// Times the tick schedule was resynced after falling behind
    pub resyncs: u64,
    /// Neighbors drawn in the last frame (0 without a query)
    pub neighbors: usize,
    /// Enclosing radius drawn in the last frame
    pub max_dist: f32,
}

/// The simulation loop: owns the state, the query scratch and the schedule
pub struct App {
    state: SimulationState,
    settings: Settings,
    query: NearestNeighborQuery,
    /// The last render drew the query overlay
    drawn: bool,
    events: VecDeque<InputEvent>,
    last_update: f64,
    next_update: f64,
    stats: FrameStats,
}

impl App {
    /// Create the app with a freshly generated cloud; `start` is the clock
    /// reading the first tick is scheduled from
    pub fn new(settings: Settings, start: f64) -> Self {
        let settings = settings.validated();
        let state = SimulationState::new(&settings);
        log::info!(
            "Generated {} points (seed {:#x}, {} Hz physics)",
            state.points.len(),
            settings.seed,
            settings.tick_hz
        );
        Self::with_state(state, settings, start)
    }

    /// Run the loop over an existing state
    pub fn with_state(state: SimulationState, settings: Settings, start: f64) -> Self {
        let settings = settings.validated();
        let period = settings.tick_period();
        Self {
            state,
            settings,
            query: NearestNeighborQuery::new(),
            drawn: false,
            events: VecDeque::new(),
            last_update: start,
            next_update: start + period,
            stats: FrameStats::default(),
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Result drawn by the last render, if it drew a query overlay
    pub fn last_query(&self) -> Option<&QueryResult> {
        self.drawn.then(|| self.query.result())
    }

    /// Time of the last physics tick
    pub fn last_update(&self) -> f64 {
        self.last_update
    }

    /// Time the next physics tick is due
    pub fn next_update(&self) -> f64 {
        self.next_update
    }

    pub fn is_running(&self) -> bool {
        !self.state.close_requested
    }

    /// Queue an event for the next drain
    pub fn push_event(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Apply every queued event in arrival order
    pub fn drain_events(&mut self) {
        while let Some(event) = self.events.pop_front() {
            apply_event(&mut self.state, event);
        }
    }

    /// Draw the current state (query overlay only when a location is set)
    pub fn render<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        let result = match self.state.query.location {
            Some(location) => {
                let result = self.query.query(&self.state.points, location, self.state.k());
                self.stats.neighbors = result.len();
                self.stats.max_dist = result.max_dist;
                Some(result)
            }
            None => {
                self.stats.neighbors = 0;
                self.stats.max_dist = 0.0;
                None
            }
        };
        self.drawn = result.is_some();

        render_frame(
            renderer,
            &self.state.viewport,
            &self.state.points,
            result,
            self.settings.point_size,
        );
    }

    /// Run any physics ticks due at `now`
    ///
    /// At most `max_substeps` ticks run per call; if the schedule is still
    /// behind afterwards it restarts from `now`.
    pub fn update(&mut self, now: f64) {
        let period = self.settings.tick_period();

        let mut substeps = 0;
        while now >= self.next_update && substeps < self.settings.max_substeps {
            tick(&mut self.state);
            self.last_update = now;
            self.next_update += period;
            self.stats.ticks += 1;
            substeps += 1;
        }

        if now >= self.next_update {
            log::debug!(
                "Physics {:.3}s behind after {} ticks, resyncing",
                now - self.next_update,
                substeps
            );
            self.next_update = now + period;
            self.stats.resyncs += 1;
        }
    }

    /// One loop iteration: render, poll input, then advance physics
    pub fn frame<C, I, R>(&mut self, clock: &C, input: &mut I, renderer: &mut R)
    where
        C: Clock + ?Sized,
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        self.render(renderer);

        input.poll(&mut self.events);
        self.drain_events();

        self.update(clock.now());

        self.stats.frames += 1;
        log::trace!(
            "frame {} ticks {} k {} neighbors {}",
            self.stats.frames,
            self.stats.ticks,
            self.state.k(),
            self.stats.neighbors
        );
    }

    /// Loop until a close request arrives
    pub fn run<C, I, R>(&mut self, clock: &C, input: &mut I, renderer: &mut R) -> FrameStats
    where
        C: Clock + ?Sized,
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        while self.is_running() {
            self.frame(clock, input, renderer);
        }
        log::info!(
            "Closed after {} frames, {} ticks ({} resyncs)",
            self.stats.frames,
            self.stats.ticks,
            self.stats.resyncs
        );
        self.stats
    }
}
