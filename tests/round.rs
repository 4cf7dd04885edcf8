//! Full rounds driven through the public API

use ghost_leg::sim::{
    Ladder, RevealAnimation, Rung, Session, SessionEvent, SessionPhase, resolve_path,
};
use ghost_leg::{LadderError, LadderSettings, Prize, SelectionHistory};

fn restaurants() -> Vec<Prize> {
    vec![
        Prize::new("bibim", "Bibimbap Bar"),
        Prize::new("udon", "Udon Stop"),
        Prize::new("salad", "Green Bowl"),
        Prize::new("burger", "Burger Barn"),
    ]
}

#[test]
fn test_full_round_with_reveals() {
    let mut session = Session::new(LadderSettings::default(), restaurants(), 777).unwrap();
    session.configure_players(&["Ann", "Bo", "Cy"]).unwrap();
    session.select_prizes(&["udon", "salad", "burger"]).unwrap();

    let mut order = vec![2, 0, 1];
    while let Some(start) = order.pop() {
        let traversal = session.play(start).unwrap();
        let ladder = session.ladder().unwrap();
        let points = traversal.waypoints(ladder);

        // Renderer replays the path at its own pace
        let mut anim = RevealAnimation::new(points.clone(), session.settings().reveal_speed);
        let mut frames = 0;
        while !anim.is_finished() && frames < 10_000 {
            anim.step_frame(1.0 / 30.0);
            frames += 1;
        }
        assert!(anim.is_finished());
        assert_eq!(anim.pen(), *points.last().unwrap());
        assert_eq!(anim.pen().x, traversal.terminal as f32);

        session.finish_animation().unwrap();
    }

    assert_eq!(session.phase(), SessionPhase::Result);
    let results = session.assignments();
    let names: Vec<_> = results.iter().map(|a| a.player.name.as_str()).collect();
    assert_eq!(names, vec!["Ann", "Bo", "Cy"]);

    let mut won: Vec<_> = results.iter().map(|a| a.prize.id.as_str()).collect();
    won.sort();
    assert_eq!(won, vec!["burger", "salad", "udon"]);

    let events = session.drain_events();
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, SessionEvent::PathFinished { .. }))
            .count(),
        3
    );
    assert_eq!(events.last(), Some(&SessionEvent::AllRevealed));

    let mut history = SelectionHistory::new();
    history.add(session.selection_record(1.0).unwrap());
    assert_eq!(history.times_won("udon"), 1);
}

#[test]
fn test_rejections_leave_state_untouched() {
    let mut session = Session::new(LadderSettings::default(), restaurants(), 3).unwrap();
    assert!(matches!(
        session.play(0),
        Err(LadderError::WrongPhase { .. })
    ));
    assert!(matches!(
        session.reveal_all(),
        Err(LadderError::WrongPhase { .. })
    ));

    session.configure_players(&["a", "b"]).unwrap();
    assert!(session.select_prizes(&["bibim"]).is_err());
    session.select_prizes(&["bibim", "udon"]).unwrap();

    let ladder = session.ladder().cloned();
    session.play(0).unwrap();
    assert_eq!(session.play(1), Err(LadderError::AnimationInProgress));
    assert_eq!(session.ladder().cloned(), ladder);
    assert_eq!(session.remaining(), vec![1]);
}

#[test]
fn test_hand_built_ladder_scenario() {
    let prizes = restaurants()[..3].to_vec();
    let ladder = Ladder::from_parts(
        3,
        vec![Rung::new(2.0, 1), Rung::new(1.0, 0)],
        prizes.clone(),
        0.0,
        3.0,
    )
    .unwrap();

    let terminals: Vec<_> = (0..3)
        .map(|s| resolve_path(&ladder, s).unwrap().terminal)
        .collect();
    assert_eq!(terminals, vec![2, 0, 1]);
    assert_eq!(ladder.prize_at(2), Some(&prizes[2]));

    let json = serde_json::to_string(&ladder).unwrap();
    let restored: Ladder = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.permutation(), ladder.permutation());
}

#[test]
fn test_new_ladder_rerolls_and_reset_returns_to_setup() {
    let mut session = Session::new(LadderSettings::default(), restaurants(), 11).unwrap();
    session.configure_players(&["a", "b", "c", "d"]).unwrap();
    session.select_random_prizes().unwrap();
    session.reveal_all().unwrap();

    session.new_ladder().unwrap();
    assert_eq!(session.phase(), SessionPhase::Ready);
    assert!(session.assignments().is_empty());

    session.reset_game();
    assert_eq!(session.phase(), SessionPhase::Setup);
    assert!(session.ladder().is_none());
}

#[test]
fn test_history_accumulates_across_rounds_on_disk() {
    let path = std::env::temp_dir().join(format!("ghost_leg_rounds_{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    for seed in [1u64, 2] {
        let mut session = Session::new(LadderSettings::default(), restaurants(), seed).unwrap();
        session.configure_players(&["a", "b"]).unwrap();
        session.select_random_prizes().unwrap();
        session.reveal_all().unwrap();

        let mut history = SelectionHistory::load(&path);
        history.add(session.selection_record(seed as f64).unwrap());
        history.save(&path).unwrap();
    }

    let history = SelectionHistory::load(&path);
    assert_eq!(history.len(), 2);
    assert_eq!(history.latest().map(|r| r.seed), Some(2));
    let _ = std::fs::remove_file(&path);
}
