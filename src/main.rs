//! Ball Maze entry point
//!
//! On the web this wires Matter.js and DOM events to the game. Natively it
//! generates a seeded maze against a headless world and prints it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use ball_maze::platform::MatterWorld;
    use ball_maze::{MazeGame, MazePreset, Result, Settings};

    type Game = Rc<RefCell<MazeGame<MatterWorld>>>;

    pub fn run() -> Result<()> {
        let window = web_sys::window().expect("no window");

        let preset = window
            .location()
            .search()
            .ok()
            .and_then(|search| MazePreset::from_query(&search))
            .unwrap_or_default();
        let settings = Settings::load(preset);

        let viewport = (
            window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32,
            window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32,
        );
        settings.validate(viewport)?;
        let (width, height) = settings.play_area.resolve(viewport);

        let seed = js_sys::Date::now() as u64;
        let mut rng = Pcg32::seed_from_u64(seed);
        log::info!("Generating {} maze with seed: {}", preset.as_str(), seed);

        let world = MatterWorld::new(width, height, settings.wireframes);
        let game = Rc::new(RefCell::new(MazeGame::setup(world, &settings, viewport, &mut rng)?));

        setup_collision_handler(game.clone());
        setup_keyboard(game);

        log::info!("Ball Maze running!");
        Ok(())
    }

    fn setup_keyboard(game: Game) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if game.borrow_mut().on_key_down(&event.key()) {
                // Keep arrow keys from scrolling the page
                event.prevent_default();
            }
        });
        let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_collision_handler(game: Game) {
        let handler_game = game.clone();
        let shown = RefCell::new(false);
        game.borrow().world().on_collision_start(move |pairs| {
            let won = handler_game.borrow_mut().on_collision_start(pairs);
            if won && !shown.replace(true) {
                show_winner();
            }
        });
    }

    /// Reveal the `.winner` banner
    fn show_winner() {
        let banner = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector(".winner").ok().flatten());
        if let Some(el) = banner {
            let _ = el.class_list().remove_1("hidden");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    log::info!("Ball Maze starting...");
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ball_maze::engine::{HeadlessWorld, Label, PhysicsWorld};
    use ball_maze::{MazeGame, MazePreset, Settings};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    env_logger::init();
    log::info!("Ball Maze (native) starting...");
    log::info!("Native mode has no renderer - run with `trunk serve` for the web version");

    // ball-maze [seed] [rows] [cols]
    let args: Vec<String> = std::env::args().skip(1).collect();
    let arg = |i: usize| args.get(i).and_then(|a| a.parse::<u64>().ok());

    let mut settings = Settings::load(MazePreset::Classic);
    let seed = arg(0).unwrap_or(0);
    if let Some(rows) = arg(1) {
        settings.rows = rows as usize;
    }
    if let Some(cols) = arg(2) {
        settings.cols = cols as usize;
    }

    let mut rng = Pcg32::seed_from_u64(seed);
    match MazeGame::setup(HeadlessWorld::new(), &settings, (0.0, 0.0), &mut rng) {
        Ok(game) => {
            let world = game.world();
            log::info!(
                "Seed {}: {} walls, {} bodies total",
                seed,
                world.bodies_labeled(Label::Wall).len(),
                world.len()
            );
            print!("{}", game.passages());
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
