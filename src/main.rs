//! Shipherd is a small deterministic agent game without a window.
//!
//! A handful of ships share a 2d world with a pool of food. Each frame
//! every ship looks for the most valuable food inside its detection
//! radius and steers toward it, slowing down smoothly as it gets close.
//! Ships that see nothing drift around on a self-correlated random
//! walk. Eating food is worth points and a little extra bulk.
//!
//! Two ships that collide merge into one, pooling their points, and
//! every twenty seconds the food respawns and the ship with the fewest
//! points is eliminated. Competition runs until one ship is left, after
//! which it keeps eating in peace forever.
//!
//! Everything random flows through a single seeded generator, so two
//! runs with the same seed play out identically. The interesting code
//! is `App::update()` in the app module; this file just drives it.

mod app;
mod config;
mod food;
mod select;
mod ship;
mod vecmath;

use app::App;

fn main() {
    // try to restore previous state, if it exists.
    let oa = std::fs::File::open("savestate")
        .ok()
        .map(|f| App::new_from(f, "report".into()).ok())
        .flatten();
    if oa.is_some() {
        println!("loading from savestate")
    };
    // otherwise build a new simulation.
    let mut app = oa.unwrap_or_else(|| {
        App::new(
            1234,
            [config::SIM_WIDTH, config::SIM_HEIGHT],
            "report".into(),
        )
    });

    // optional first argument: number of fixed steps to run.
    // the default is an hour of simulated time.
    let steps: u64 = std::env::args()
        .nth(1)
        .map(|s| s.parse().expect("steps must be a number"))
        .unwrap_or(60 * 60 * 60);

    for _ in 0..steps {
        app.update(config::STEP_SIZE);
    }
    app.report();

    println!("exiting gracefully, saving state");
    let mut f = std::fs::File::create("savestate").unwrap();
    app.write_into(&mut f).unwrap();
    println!("goodbye!");
}
