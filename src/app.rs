//! Watchface lifecycle
//!
//! `Uninitialized -> Running -> Terminated`. The host event loop calls
//! [`App::init`] once, feeds time readings to [`App::handle_time`] and
//! redraws with [`App::render`] whenever a tick was dispatched.

use chrono::NaiveDateTime;
use embedded_graphics::draw_target::DrawTarget;

use crate::{
    clock::ClockSource,
    resources::{self, ResourceProvider},
    tick::{TickTimerService, TimeUnits},
    ui::{ColorMode, WatchFace, Window},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppState {
    Uninitialized,
    Running,
    Terminated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Window load could not acquire a resource
    Resource(resources::Error),
    /// Operation not allowed in the current state
    InvalidState(AppState),
}

impl From<resources::Error> for Error {
    fn from(err: resources::Error) -> Self {
        Self::Resource(err)
    }
}

/// Owns the window, the watchface and everything the watchface talks to
pub struct App<F, R, C> {
    face: F,
    resources: R,
    clock: C,
    window: Option<Window>,
    ticks: TickTimerService,
    state: AppState,
}

impl<F, R, C> App<F, R, C>
where
    F: WatchFace,
    R: ResourceProvider,
    C: ClockSource,
{
    pub fn new(face: F, resources: R, clock: C) -> Self {
        Self {
            face,
            resources,
            clock,
            window: None,
            ticks: TickTimerService::new(),
            state: AppState::Uninitialized,
        }
    }

    /// Create and push the window, show the time right away and subscribe
    /// to minute ticks.
    ///
    /// A failed window load releases whatever was acquired and leaves the
    /// app terminated.
    pub fn init(&mut self) -> Result<(), Error> {
        if self.state != AppState::Uninitialized {
            return Err(Error::InvalidState(self.state));
        }
        info!("Initializing watchface");

        let mut window = Window::new();
        if let Err(err) = window.load(&mut self.face, &mut self.resources) {
            warn!("Window load failed: {}", err);
            window.unload(&mut self.face, &mut self.resources);
            self.state = AppState::Terminated;
            return Err(err.into());
        }
        self.window = Some(window);

        // Make sure the time is displayed from the start
        self.face.on_tick(&self.clock, TimeUnits::ALL);

        self.ticks.subscribe(TimeUnits::MINUTE, self.clock.now());
        self.state = AppState::Running;

        info!("Initialization finished");
        Ok(())
    }

    /// Feed a time reading, dispatching a tick when a minute passed.
    ///
    /// Returns whether the window needs to be redrawn.
    pub fn handle_time(&mut self, now: NaiveDateTime) -> bool {
        if self.state != AppState::Running {
            return false;
        }

        match self.ticks.poll(now) {
            Some(units) => {
                debug!("Tick");
                self.face.on_tick(&self.clock, units);
                true
            }
            None => false,
        }
    }

    /// [`Self::handle_time`] with a fresh reading from the clock
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        self.handle_time(now)
    }

    /// Draw the window, if there is one
    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        match &self.window {
            Some(window) => window.render(&self.face, target),
            None => Ok(()),
        }
    }

    /// Unsubscribe and destroy the window, releasing every resource
    pub fn deinit(&mut self) -> Result<(), Error> {
        if self.state != AppState::Running {
            return Err(Error::InvalidState(self.state));
        }

        self.ticks.unsubscribe();
        if let Some(mut window) = self.window.take() {
            window.unload(&mut self.face, &mut self.resources);
        }
        self.state = AppState::Terminated;

        info!("Watchface terminated");
        Ok(())
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn face(&self) -> &F {
        &self.face
    }

    pub fn resources(&self) -> &R {
        &self.resources
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}
