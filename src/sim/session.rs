//! Game session state machine
//!
//! Owns every piece of mutable game state. Each call to [`Session::step`]
//! drains the frame's input in order, advances the simulation once and leaves
//! the session ready for [`Session::snapshot`].

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionMasks, PipePart};
use super::field::ObstacleField;
use super::obstacle::{Obstacle, Rect};
use super::player::Bird;
use super::rng::{RandomSource, RngState};
use crate::consts::*;
use crate::ground_threshold;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Bird bobbing on the title screen, waiting for the first flap
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended, frozen until a restart flap
    GameOver,
}

/// Discrete per-frame input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Start, flap or restart depending on state
    Flap,
    /// Leave the game
    Quit,
}

/// Physical keys the input collaborator may forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Up,
    W,
    Escape,
    WindowClose,
    Other,
}

impl InputEvent {
    /// Default bindings: Space/Up/W flap, Escape or closing the window quits
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Space | Key::Up | Key::W => Some(InputEvent::Flap),
            Key::Escape | Key::WindowClose => Some(InputEvent::Quit),
            Key::Other => None,
        }
    }
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Pipe(PipePart),
    Ground,
}

/// Notifications for the presentation and audio collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Flapped,
    Scored { score: u32 },
    Crashed { cause: CrashCause, score: u32 },
    Restarted,
    Quit,
}

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Bird pose for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirdPose {
    pub pos: Vec2,
    pub angle: f32,
    pub frame: usize,
    pub alive: bool,
}

/// Obstacle pose for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePose {
    pub center_x: f32,
    pub gap_center_y: f32,
    pub gap_size: f32,
    pub passed: bool,
    pub top: Rect,
    pub bottom: Rect,
}

impl From<&Obstacle> for ObstaclePose {
    fn from(o: &Obstacle) -> Self {
        Self {
            center_x: o.center_x,
            gap_center_y: o.gap_center_y,
            gap_size: o.gap_size,
            passed: o.passed,
            top: o.top_rect(),
            bottom: o.bottom_rect(),
        }
    }
}

/// Read-only view of a completed frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: SessionState,
    pub bird: BirdPose,
    pub obstacles: Vec<ObstaclePose>,
    pub score: u32,
    pub scroll_offset: f32,
    pub ticks: u64,
    /// Banner text for the current state (empty while playing)
    pub status: String,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session<R = Pcg32> {
    pub tuning: Tuning,
    pub state: SessionState,
    pub bird: Bird,
    pub field: ObstacleField,
    pub score: u32,
    /// Cosmetic ground scroll phase (px)
    pub scroll_offset: f32,
    /// Seconds since the session was created
    pub clock: f32,
    /// Frames stepped
    pub ticks: u64,
    terminated: bool,
    events: Vec<GameEvent>,
    masks: CollisionMasks,
    rng: R,
}

impl Session<Pcg32> {
    /// New session with default tuning and a seeded generator
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(tuning, RngState::new(seed).to_rng())
    }
}

impl<R: RandomSource> Session<R> {
    /// New idle session drawing gap positions from `rng`
    pub fn with_rng(tuning: Tuning, mut rng: R) -> Self {
        let field = ObstacleField::new(&tuning, &mut rng);
        Self {
            tuning,
            state: SessionState::Idle,
            bird: Bird::new(),
            field,
            score: 0,
            scroll_offset: 0.0,
            clock: 0.0,
            ticks: 0,
            terminated: false,
            events: Vec::new(),
            masks: CollisionMasks::new(),
            rng,
        }
    }

    /// Fresh bird, single fresh obstacle, zero score and spawn timer
    ///
    /// The cosmetic `clock` and `scroll_offset` carry over.
    pub fn reset(&mut self) {
        self.bird = Bird::new();
        self.field = ObstacleField::new(&self.tuning, &mut self.rng);
        self.score = 0;
    }

    /// Whether a Quit has been processed
    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Events raised during the most recent step
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Advance one frame
    ///
    /// Input is applied strictly in order before any physics. A Quit ends
    /// processing immediately, so anything after it in the same frame is
    /// ignored.
    ///
    /// # Panics
    /// If `dt` is negative or NaN; callers clamp the clock upstream.
    pub fn step(&mut self, dt: f32, input: &[InputEvent]) -> Flow {
        assert!(dt >= 0.0, "frame dt must be non-negative, got {dt}");
        if self.terminated {
            return Flow::Exit;
        }
        self.events.clear();

        for event in input {
            match event {
                InputEvent::Quit => {
                    log::info!("Quit requested (state {:?}, score {})", self.state, self.score);
                    self.terminated = true;
                    self.events.push(GameEvent::Quit);
                    return Flow::Exit;
                }
                InputEvent::Flap => self.handle_flap(),
            }
        }

        self.ticks += 1;
        self.clock += dt;

        match self.state {
            SessionState::Idle => {
                self.bird.idle_animate(dt);
                self.bird.idle_bob(self.clock, &self.tuning);
            }
            SessionState::Playing => self.update_playing(dt),
            SessionState::GameOver => {}
        }

        Flow::Continue
    }

    fn handle_flap(&mut self) {
        match self.state {
            SessionState::Idle => {
                log::info!("Run started");
                self.state = SessionState::Playing;
                self.events.push(GameEvent::Started);
                self.flap();
            }
            SessionState::Playing => self.flap(),
            SessionState::GameOver => {
                log::info!("Restarting after score {}", self.score);
                self.reset();
                self.state = SessionState::Playing;
                self.events.push(GameEvent::Restarted);
            }
        }
    }

    fn flap(&mut self) {
        self.bird.flap(&self.tuning);
        self.events.push(GameEvent::Flapped);
    }

    fn update_playing(&mut self, dt: f32) {
        self.bird.integrate(dt, &self.tuning);
        self.field.tick(dt, &self.tuning, &mut self.rng);
        self.scroll_offset += -self.tuning.pipe_speed * SCROLL_FACTOR * dt;

        // Mark, score and collide in field order; the first hit ends the tick
        // and leaves later obstacles untouched
        let player_x = self.bird.pos.x;
        let silhouette = self.bird.silhouette(&self.masks.bird);
        let mut hit = None;
        for obstacle in &mut self.field.obstacles {
            if obstacle.check_and_mark_passed(player_x) {
                self.score += 1;
                self.events.push(GameEvent::Scored { score: self.score });
            }
            if let Some((part, point)) = self.masks.bird_obstacle_collision(&silhouette, obstacle) {
                log::debug!("Pipe contact at {:?}", point);
                hit = Some(part);
                break;
            }
        }
        if let Some(part) = hit {
            self.crash(CrashCause::Pipe(part));
            return;
        }

        if self.bird.top() < -CEILING_ALLOWANCE {
            self.bird.set_top(-CEILING_ALLOWANCE);
            self.bird.vel_y = 0.0;
        }

        let ground = ground_threshold();
        if self.bird.top() >= ground {
            self.bird.set_top(ground);
            self.bird.vel_y = 0.0;
            self.crash(CrashCause::Ground);
        }
    }

    fn crash(&mut self, cause: CrashCause) {
        log::info!("Crashed ({:?}) with score {}", cause, self.score);
        self.state = SessionState::GameOver;
        self.bird.alive = false;
        self.events.push(GameEvent::Crashed {
            cause,
            score: self.score,
        });
    }

    /// Banner text for the presentation layer
    pub fn status_text(&self) -> &'static str {
        match self.state {
            SessionState::Idle => "Press SPACE to start",
            SessionState::Playing => "",
            SessionState::GameOver => "Game Over - SPACE to retry",
        }
    }

    /// Everything the presentation layer needs to draw this frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            bird: BirdPose {
                pos: self.bird.pos,
                angle: self.bird.angle,
                frame: self.bird.frame_index(),
                alive: self.bird.alive,
            },
            obstacles: self.field.iter().map(ObstaclePose::from).collect(),
            score: self.score,
            scroll_offset: self.scroll_offset,
            ticks: self.ticks,
            status: self.status_text().to_string(),
        }
    }
}
