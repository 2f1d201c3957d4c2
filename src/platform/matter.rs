//! Matter.js backed `PhysicsWorld`
//!
//! Expects the global `Matter` object (matter-js loaded via a script tag).
//! Each world owns its engine and a JS array of its bodies; handles are
//! indices into that array.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::engine::{BodySpec, CollisionPair, Label, PhysicsWorld, Shape};

#[wasm_bindgen(inline_js = "
    export function matter_create(width, height, wireframes) {
        const { Engine, Render, Runner } = Matter;
        const engine = Engine.create();
        const render = Render.create({
            element: document.body,
            engine: engine,
            options: { wireframes: wireframes, width: width, height: height }
        });
        Render.run(render);
        Runner.run(Runner.create(), engine);
        return { engine: engine, bodies: [] };
    }

    function options(label, isStatic, group, fill) {
        const opts = { label: label, isStatic: isStatic };
        if (group !== undefined) {
            opts.collisionFilter = { group: group };
        }
        if (fill !== undefined) {
            opts.render = { fillStyle: fill };
        }
        return opts;
    }

    function register(world, body) {
        Matter.World.add(world.engine.world, body);
        world.bodies.push(body);
        return world.bodies.length - 1;
    }

    export function matter_add_rectangle(world, x, y, w, h, label, isStatic, group, fill) {
        return register(world, Matter.Bodies.rectangle(x, y, w, h, options(label, isStatic, group, fill)));
    }

    export function matter_add_circle(world, x, y, r, label, isStatic, group, fill) {
        return register(world, Matter.Bodies.circle(x, y, r, options(label, isStatic, group, fill)));
    }

    export function matter_velocity_x(world, id) { return world.bodies[id].velocity.x; }
    export function matter_velocity_y(world, id) { return world.bodies[id].velocity.y; }

    export function matter_set_velocity(world, id, x, y) {
        Matter.Body.setVelocity(world.bodies[id], { x: x, y: y });
    }

    export function matter_is_static(world, id) { return world.bodies[id].isStatic; }

    export function matter_set_static(world, id, isStatic) {
        Matter.Body.setStatic(world.bodies[id], isStatic);
    }

    export function matter_gravity_x(world) { return world.engine.world.gravity.x; }
    export function matter_gravity_y(world) { return world.engine.world.gravity.y; }

    export function matter_set_gravity(world, x, y) {
        world.engine.world.gravity.x = x;
        world.engine.world.gravity.y = y;
    }

    export function matter_on_collision_start(world, callback) {
        Matter.Events.on(world.engine, 'collisionStart', (event) => {
            callback(event.pairs.map((pair) => [pair.bodyA.label, pair.bodyB.label]));
        });
    }
")]
extern "C" {
    fn matter_create(width: f32, height: f32, wireframes: bool) -> JsValue;
    fn matter_add_rectangle(
        world: &JsValue,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        label: &str,
        is_static: bool,
        group: Option<i32>,
        fill: Option<String>,
    ) -> u32;
    fn matter_add_circle(
        world: &JsValue,
        x: f32,
        y: f32,
        r: f32,
        label: &str,
        is_static: bool,
        group: Option<i32>,
        fill: Option<String>,
    ) -> u32;
    fn matter_velocity_x(world: &JsValue, id: u32) -> f32;
    fn matter_velocity_y(world: &JsValue, id: u32) -> f32;
    fn matter_set_velocity(world: &JsValue, id: u32, x: f32, y: f32);
    fn matter_is_static(world: &JsValue, id: u32) -> bool;
    fn matter_set_static(world: &JsValue, id: u32, is_static: bool);
    fn matter_gravity_x(world: &JsValue) -> f32;
    fn matter_gravity_y(world: &JsValue) -> f32;
    fn matter_set_gravity(world: &JsValue, x: f32, y: f32);
    fn matter_on_collision_start(world: &JsValue, callback: &Closure<dyn FnMut(js_sys::Array)>);
}

/// One Matter.js engine with its renderer and runner
pub struct MatterWorld {
    /// JS `{ engine, bodies }` owned by this world
    inner: JsValue,
    /// Label of each registered body, indexed by handle
    labels: Vec<Label>,
}

impl MatterWorld {
    /// Create the engine and start rendering and stepping it
    pub fn new(width: f32, height: f32, wireframes: bool) -> Self {
        let inner = matter_create(width, height, wireframes);
        log::info!("Matter.js world created ({}x{})", width, height);
        Self {
            inner,
            labels: Vec::new(),
        }
    }

    /// Forward collision-start events to `handler`. The closure lives for
    /// the rest of the page.
    pub fn on_collision_start(&self, mut handler: impl FnMut(&[CollisionPair]) + 'static) {
        let closure = Closure::<dyn FnMut(js_sys::Array)>::new(move |pairs: js_sys::Array| {
            let pairs: Vec<CollisionPair> = pairs.iter().map(pair_from_js).collect();
            handler(&pairs);
        });
        matter_on_collision_start(&self.inner, &closure);
        closure.forget();
    }
}

/// `[labelA, labelB]` from JS into a pair
fn pair_from_js(value: JsValue) -> CollisionPair {
    let pair = js_sys::Array::from(&value);
    let label = |i: u32| {
        pair.get(i)
            .as_string()
            .map_or(Label::Other, |s| Label::from_str(&s))
    };
    CollisionPair::new(label(0), label(1))
}

impl PhysicsWorld for MatterWorld {
    type Handle = u32;

    fn add(&mut self, spec: &BodySpec) -> u32 {
        let label = spec.label.as_str();
        let fill = spec.render.as_ref().map(|r| r.fill.clone());
        let id = match spec.shape {
            Shape::Rectangle { width, height } => matter_add_rectangle(
                &self.inner,
                spec.center.x,
                spec.center.y,
                width,
                height,
                label,
                spec.is_static,
                spec.collision_group,
                fill,
            ),
            Shape::Circle { radius } => matter_add_circle(
                &self.inner,
                spec.center.x,
                spec.center.y,
                radius,
                label,
                spec.is_static,
                spec.collision_group,
                fill,
            ),
        };
        debug_assert_eq!(id as usize, self.labels.len());
        self.labels.push(spec.label);
        id
    }

    fn velocity(&self, body: u32) -> Vec2 {
        Vec2::new(
            matter_velocity_x(&self.inner, body),
            matter_velocity_y(&self.inner, body),
        )
    }

    fn set_velocity(&mut self, body: u32, velocity: Vec2) {
        matter_set_velocity(&self.inner, body, velocity.x, velocity.y);
    }

    fn is_static(&self, body: u32) -> bool {
        matter_is_static(&self.inner, body)
    }

    fn set_static(&mut self, body: u32, is_static: bool) {
        matter_set_static(&self.inner, body, is_static);
    }

    fn gravity(&self) -> Vec2 {
        Vec2::new(matter_gravity_x(&self.inner), matter_gravity_y(&self.inner))
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        matter_set_gravity(&self.inner, gravity.x, gravity.y);
    }

    fn bodies_labeled(&self, label: Label) -> Vec<u32> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == label)
            .map(|(i, _)| i as u32)
            .collect()
    }
}
