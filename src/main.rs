//! Ghost Leg demo entry point
//!
//! Plays one full round against a sample restaurant list, stepping each
//! reveal at the fixed timestep the way a renderer would.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use ghost_leg::sim::{Session, SessionPhase};
    use ghost_leg::{LadderSettings, Prize, SelectionHistory};

    env_logger::init();

    let seed = std::env::var("GHOST_LEG_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(20240612);
    let settings = std::env::var("GHOST_LEG_SETTINGS")
        .map(|p| LadderSettings::load(&PathBuf::from(p)))
        .unwrap_or_default();
    log::info!("Ghost Leg starting (seed {})", seed);

    let pool = vec![
        Prize::new("kimbap", "Kimbap Heaven"),
        Prize::new("ramen", "Ramen Alley"),
        Prize::new("pho", "Pho Saigon"),
        Prize::new("tacos", "Taqueria Sol"),
        Prize::new("curry", "Curry House"),
    ];

    let mut session = match Session::new(settings, pool, seed) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Bad settings: {e}");
            return;
        }
    };

    let result = play_round(&mut session);

    if let Err(e) = result {
        eprintln!("Round failed: {e}");
        return;
    }
    debug_assert_eq!(session.phase(), SessionPhase::Result);

    for event in session.drain_events() {
        log::debug!("{:?}", event);
    }

    println!("Lunch is decided:");
    for a in session.assignments() {
        println!("  {:<10} -> {}", a.player.name, a.prize.name);
    }

    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0);
    match session.selection_record(timestamp) {
        Ok(record) => {
            match serde_json::to_string_pretty(&record) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("Could not encode record: {e}"),
            }
            let path = std::env::var("GHOST_LEG_HISTORY")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir().join("ghost_leg_history.json"));
            let mut history = SelectionHistory::load(&path);
            history.add(record);
            if let Err(e) = history.save(&path) {
                eprintln!("Could not save history to {}: {e}", path.display());
            }
            println!("{} round(s) in history at {}", history.len(), path.display());
        }
        Err(e) => eprintln!("No record: {e}"),
    }
}

/// Configure, pick prizes and play every column with a full reveal
#[cfg(not(target_arch = "wasm32"))]
fn play_round(session: &mut ghost_leg::sim::Session) -> Result<(), ghost_leg::LadderError> {
    use ghost_leg::consts::REVEAL_DT;
    use ghost_leg::sim::RevealAnimation;

    session.configure_players(&["Mina", "Jun", "", "Dana"])?;
    session.select_random_prizes()?;

    let columns = session.ladder().map(|l| l.columns()).unwrap_or(0);
    for start in 0..columns {
        let traversal = session.play(start)?;
        if let Some(ladder) = session.ladder() {
            let mut anim =
                RevealAnimation::new(traversal.waypoints(ladder), session.settings().reveal_speed);
            let mut frames = 0;
            while !anim.is_finished() {
                anim.step_frame(REVEAL_DT);
                frames += 1;
            }
            log::debug!("Column {} revealed in {} frames", start, frames);
        }
        session.finish_animation()?;
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The engine is consumed as a library on the web
}
