//! Flappy Gate entry point
//!
//! The browser build is driven from JS through `flappy_gate::web`. Natively
//! this runs headless autopilot games and logs the results.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_gate::{Autopilot, HighScore, Session, Tuning};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Flappy Gate (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    let runs: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);
    let frame_cap: u32 = 60 * 60 * 2;

    let tuning = Tuning::load();
    let pilot = Autopilot::default();
    let mut session = Session::new(tuning, HighScore::load());

    for run in 0..runs {
        session.start(seed.wrapping_add(run));
        let mut frames = 0;
        while session.world().is_running() && frames < frame_cap {
            if pilot.decide(session.world()) {
                session.request_flap();
            }
            session.frame();
            frames += 1;
        }

        match session.final_score() {
            Some(score) => println!("run {}: crashed after {} frames, score {}", run, frames, score),
            None => println!(
                "run {}: still flying after {} frames, score {}",
                run,
                frames,
                session.score()
            ),
        }

        if session.world().is_running() {
            // Abandon the run so the next one can start
            session = Session::new(tuning, HighScore::new(session.high_score()));
        } else {
            session.restart();
        }
    }

    println!("high score: {}", session.high_score());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is flappy_gate::web::wasm_start, this is just to satisfy the compiler
}
