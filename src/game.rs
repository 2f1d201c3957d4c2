//! Owned game context
//!
//! `MazeGame` is built once by `setup` and then driven by two event streams:
//! key-down events nudging the ball and collision-start events checking for
//! the win. Both run on the same event loop, so no locking is involved.

use glam::Vec2;

use crate::engine::{CollisionPair, Label, PhysicsWorld};
use crate::error::Result;
use crate::input::{KeyMap, nudge};
use crate::maze::{MazeRng, Passages, generate, project, validate};
use crate::settings::Settings;

pub struct MazeGame<W: PhysicsWorld> {
    world: W,
    ball: W::Handle,
    passages: Passages,
    keys: KeyMap,
    ball_step: f32,
    win_gravity: f32,
    won: bool,
}

impl<W: PhysicsWorld> MazeGame<W> {
    /// Generate a maze, register its bodies with `world` and switch gravity off.
    /// `viewport` is only consulted by window-fitting play areas.
    pub fn setup<R: MazeRng + ?Sized>(
        mut world: W,
        settings: &Settings,
        viewport: (f32, f32),
        rng: &mut R,
    ) -> Result<Self> {
        let cell = settings.validate(viewport)?;
        let passages = generate(settings.rows, settings.cols, rng)?;
        if let Err(e) = validate(&passages) {
            log::error!("Generated maze is not perfect: {}", e);
        }

        let layout = project(&passages, cell, &settings.projection_style());
        world.set_gravity(Vec2::ZERO);
        world.add_all(&layout.walls);
        world.add(&layout.goal);
        let ball = world.add(&layout.ball);

        log::info!(
            "Maze ready: {}x{} cells of {:.1}x{:.1}, {} walls",
            settings.rows,
            settings.cols,
            cell.width,
            cell.height,
            layout.walls.len()
        );

        Ok(Self {
            world,
            ball,
            passages,
            keys: settings.keys.clone(),
            ball_step: settings.ball_step,
            win_gravity: settings.win_gravity,
            won: false,
        })
    }

    /// Nudge the ball if `key` is mapped. Returns whether the key was used.
    pub fn on_key_down(&mut self, key: &str) -> bool {
        let Some(dir) = self.keys.direction(key) else {
            return false;
        };
        let velocity = self.world.velocity(self.ball);
        self.world
            .set_velocity(self.ball, nudge(velocity, dir, self.ball_step));
        true
    }

    /// Check collision pairs for ball-goal contact. Returns true if any pair
    /// triggered the win transition on this call.
    pub fn on_collision_start(&mut self, pairs: &[CollisionPair]) -> bool {
        let mut triggered = false;
        for pair in pairs {
            if pair.is_between(Label::Ball, Label::Goal) {
                self.collapse();
                triggered = true;
            }
        }
        triggered
    }

    /// Enable gravity and release every wall. Safe to repeat.
    fn collapse(&mut self) {
        if !self.won {
            log::info!("Goal reached, collapsing maze");
        }
        self.won = true;

        let gravity = self.world.gravity();
        self.world
            .set_gravity(Vec2::new(gravity.x, self.win_gravity));
        for wall in self.world.bodies_labeled(Label::Wall) {
            self.world.set_static(wall, false);
        }
    }

    pub fn has_won(&self) -> bool {
        self.won
    }

    pub fn ball(&self) -> W::Handle {
        self.ball
    }

    pub fn passages(&self) -> &Passages {
        &self.passages
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }
}
