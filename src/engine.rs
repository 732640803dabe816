//! The game loop.
//!
//! The host calls [`Engine::frame`] every time it can present a frame and
//! passes a monotonic timestamp; the engine works out the delta time, ticks
//! the session, renders it and tells the host whether to keep going.

use std::collections::VecDeque;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::compute::{init_state, reset_session, restart, tick};
use crate::entities::{Direction, GameStatus, Rules, Session};
use crate::error::GameError;
use crate::render::{render_frame, Surface};
use crate::resources::{LoadStatus, Resources};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for sprites.
    Loading,
    Running,
    /// Frozen until a click restarts the session.
    GameOver,
}

/// What the host should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    NextFrame,
    Halt,
}

pub struct Engine<H, R> {
    phase: Phase,
    state: Session,
    sprites: Resources<H>,
    rng: R,
    last_time: Duration,
    inputs: VecDeque<Direction>,
}

impl<H: Send + 'static, R: Rng> Engine<H, R> {
    pub fn new(rules: Rules, sprites: Resources<H>, mut rng: R) -> Self {
        let state = init_state(rules, &mut rng);
        Self {
            phase: Phase::Loading,
            state,
            sprites,
            rng,
            last_time: Duration::ZERO,
            inputs: VecDeque::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &Session {
        &self.state
    }

    /// Direct access for hosts and tests that need to stage a scenario.
    pub fn state_mut(&mut self) -> &mut Session {
        &mut self.state
    }

    /// A key was released.  `None` stands for a key that maps to no direction.
    pub fn key_up(&mut self, input: Option<Direction>) {
        match input {
            Some(direction) if self.phase == Phase::Running => self.inputs.push_back(direction),
            Some(direction) => debug!(?direction, phase = ?self.phase, "dropping input"),
            None => debug!("ignoring key with no direction"),
        }
    }

    /// A pointer click.  Restarts the session when the game is over; returns
    /// whether the host should resume scheduling frames.
    pub fn click(&mut self, now: Duration) -> bool {
        if self.phase != Phase::GameOver {
            return false;
        }
        self.state = restart(&self.state, &mut self.rng);
        self.inputs.clear();
        self.last_time = now;
        self.phase = Phase::Running;
        true
    }

    /// Run one iteration of the loop at host time `now`.
    pub fn frame<S>(&mut self, now: Duration, surface: &mut S) -> Result<Schedule, GameError>
    where
        S: Surface<Handle = H>,
    {
        match self.phase {
            Phase::Loading => {
                if self.sprites.poll()? == LoadStatus::Pending {
                    return Ok(Schedule::NextFrame);
                }
                info!("sprites ready, starting game loop");
                self.state = reset_session(&self.state, &mut self.rng);
                self.last_time = now;
                self.phase = Phase::Running;
                self.step(now, surface)
            }
            Phase::Running => self.step(now, surface),
            Phase::GameOver => Ok(Schedule::Halt),
        }
    }

    fn step<S>(&mut self, now: Duration, surface: &mut S) -> Result<Schedule, GameError>
    where
        S: Surface<Handle = H>,
    {
        let dt = now.saturating_sub(self.last_time);
        let input = self.inputs.pop_front();
        self.state = tick(&self.state, input, dt, &mut self.rng);
        render_frame(surface, &self.sprites, &self.state)?;
        self.last_time = now;

        if self.state.status == GameStatus::GameOver {
            info!(
                level = self.state.level,
                high_score = self.state.high_score,
                "loop halted"
            );
            self.phase = Phase::GameOver;
            self.inputs.clear();
            return Ok(Schedule::Halt);
        }
        Ok(Schedule::NextFrame)
    }
}
