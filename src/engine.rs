//! Contract with the external physics/rendering engine
//!
//! The engine owns every body for its whole lifetime. This crate only
//! describes bodies, registers them, and nudges a few of their properties
//! from event callbacks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Body labels the game logic cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Wall,
    Goal,
    Ball,
    /// Any body this crate did not create
    Other,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Wall => "wall",
            Label::Goal => "goal",
            Label::Ball => "ball",
            Label::Other => "other",
        }
    }

    /// Unknown engine labels (e.g. "Rectangle Body") map to `Other`
    pub fn from_str(s: &str) -> Self {
        match s {
            "wall" => Label::Wall,
            "goal" => Label::Goal,
            "ball" => Label::Ball,
            _ => Label::Other,
        }
    }
}

/// Collision primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle { width: f32, height: f32 },
    Circle { radius: f32 },
}

/// Visual hints forwarded to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStyle {
    pub fill: String,
}

/// Everything needed to create one body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub center: Vec2,
    pub shape: Shape,
    pub label: Label,
    pub is_static: bool,
    /// Matter.js group: a shared negative group never collides, a shared
    /// positive group always does
    pub collision_group: Option<i32>,
    pub render: Option<RenderStyle>,
}

impl BodySpec {
    pub fn rectangle(center: Vec2, width: f32, height: f32, label: Label) -> Self {
        Self {
            center,
            shape: Shape::Rectangle { width, height },
            label,
            is_static: false,
            collision_group: None,
            render: None,
        }
    }

    pub fn circle(center: Vec2, radius: f32, label: Label) -> Self {
        Self {
            center,
            shape: Shape::Circle { radius },
            label,
            is_static: false,
            collision_group: None,
            render: None,
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_group(mut self, group: i32) -> Self {
        self.collision_group = Some(group);
        self
    }

    pub fn with_fill(mut self, fill: Option<&str>) -> Self {
        self.render = fill.map(|fill| RenderStyle {
            fill: fill.to_string(),
        });
        self
    }
}

/// Two bodies that started touching this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub a: Label,
    pub b: Label,
}

impl CollisionPair {
    pub fn new(a: Label, b: Label) -> Self {
        Self { a, b }
    }

    /// True when the pair is exactly {x, y}, in either order
    pub fn is_between(&self, x: Label, y: Label) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

/// The world container and body mutators exposed by the engine
pub trait PhysicsWorld {
    /// Engine-side body reference, only meaningful to the world that issued it
    type Handle: Copy + Eq + std::fmt::Debug;

    /// Register a body for simulation and rendering
    fn add(&mut self, spec: &BodySpec) -> Self::Handle;

    fn velocity(&self, body: Self::Handle) -> Vec2;

    fn set_velocity(&mut self, body: Self::Handle, velocity: Vec2);

    fn is_static(&self, body: Self::Handle) -> bool;

    fn set_static(&mut self, body: Self::Handle, is_static: bool);

    fn gravity(&self) -> Vec2;

    fn set_gravity(&mut self, gravity: Vec2);

    /// Every registered body carrying `label`, in registration order
    fn bodies_labeled(&self, label: Label) -> Vec<Self::Handle>;

    /// Register several bodies, preserving order
    fn add_all(&mut self, specs: &[BodySpec]) -> Vec<Self::Handle> {
        specs.iter().map(|spec| self.add(spec)).collect()
    }
}

/// A body held by `HeadlessWorld`
#[derive(Debug, Clone)]
pub struct HeadlessBody {
    pub spec: BodySpec,
    pub velocity: Vec2,
    pub is_static: bool,
}

/// In-memory world that stores bodies and flags without simulating them.
/// Used by the native binary and by tests.
#[derive(Debug, Clone, Default)]
pub struct HeadlessWorld {
    bodies: Vec<HeadlessBody>,
    gravity: Vec2,
}

impl HeadlessWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bodies(&self) -> &[HeadlessBody] {
        &self.bodies
    }

    pub fn body(&self, handle: usize) -> &HeadlessBody {
        &self.bodies[handle]
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl PhysicsWorld for HeadlessWorld {
    type Handle = usize;

    fn add(&mut self, spec: &BodySpec) -> usize {
        self.bodies.push(HeadlessBody {
            spec: spec.clone(),
            velocity: Vec2::ZERO,
            is_static: spec.is_static,
        });
        self.bodies.len() - 1
    }

    fn velocity(&self, body: usize) -> Vec2 {
        self.bodies[body].velocity
    }

    fn set_velocity(&mut self, body: usize, velocity: Vec2) {
        self.bodies[body].velocity = velocity;
    }

    fn is_static(&self, body: usize) -> bool {
        self.bodies[body].is_static
    }

    fn set_static(&mut self, body: usize, is_static: bool) {
        self.bodies[body].is_static = is_static;
    }

    fn gravity(&self) -> Vec2 {
        self.gravity
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn bodies_labeled(&self, label: Label) -> Vec<usize> {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| b.spec.label == label)
            .map(|(i, _)| i)
            .collect()
    }
}
