//! Training driver, observers and opponents working together

use std::{
    io::Write,
    sync::{Arc, Mutex},
};

use menace::{
    MenaceAgent, MenaceConfig, Outcome,
    pipeline::{
        DefensiveOpponent, FirstAvailableOpponent, GameRecord, MetricsObserver, Observer,
        RandomOpponent, ReportObserver, Snapshot, TrainingConfig, TrainingPipeline,
        TrainingResult,
    },
};
use tempfile::tempdir;

#[derive(Clone, Default)]
struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Observer for EventLog {
    fn on_training_start(&mut self, total_games: usize) -> menace::Result<()> {
        self.0.lock().unwrap().push(format!("start {total_games}"));
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, _record: &GameRecord) -> menace::Result<()> {
        self.0.lock().unwrap().push(format!("game {game_num}"));
        Ok(())
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) -> menace::Result<()> {
        self.0.lock().unwrap().push(format!("snapshot {}", snapshot.games));
        Ok(())
    }

    fn on_training_end(&mut self) -> menace::Result<()> {
        self.0.lock().unwrap().push("end".to_string());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn agent(seed: u64) -> MenaceAgent {
    MenaceAgent::seeded(MenaceConfig::default(), seed).unwrap()
}

#[test]
fn observers_see_events_in_order() {
    let log = EventLog::default();
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        num_games: 5,
        report_every: 2,
    })
    .with_observer(Box::new(log.clone()));

    pipeline
        .run(&mut agent(1), &mut FirstAvailableOpponent::new())
        .unwrap();

    assert_eq!(
        log.events(),
        vec![
            "start 5",
            "game 0",
            "game 1",
            "snapshot 2",
            "game 2",
            "game 3",
            "snapshot 4",
            "game 4",
            "snapshot 5",
            "end",
        ]
    );
}

#[test]
fn report_observer_prints_one_line_per_snapshot() {
    let buffer = SharedBuffer::default();
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        num_games: 1000,
        report_every: 250,
    })
    .with_observer(Box::new(ReportObserver::new(buffer.clone())));

    let result = pipeline
        .run(&mut agent(2), &mut RandomOpponent::seeded(3))
        .unwrap();

    let text = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("250 games: win "));
    assert!(lines[3].starts_with("1000 games: win "));

    let totals = result.totals;
    assert_eq!(
        lines[3],
        format!(
            "1000 games: win {:.3}, draw {:.3}, loss {:.3}",
            totals.win_rate, totals.draw_rate, totals.loss_rate
        )
    );
}

#[test]
fn final_snapshot_matches_totals() {
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        num_games: 130,
        report_every: 50,
    });

    let result = pipeline
        .run(&mut agent(4), &mut DefensiveOpponent::seeded(5))
        .unwrap();

    let games: Vec<usize> = result.snapshots.iter().map(|s| s.games).collect();
    assert_eq!(games, vec![50, 100, 130]);
    assert_eq!(result.snapshots.last(), Some(&result.totals));

    let totals = result.totals;
    assert_eq!(totals.wins + totals.draws + totals.losses, 130);
    assert!((totals.win_rate + totals.draw_rate + totals.loss_rate - 1.0).abs() < 1e-9);
}

#[test]
fn metrics_observer_tracks_game_lengths() {
    let mut metrics = MetricsObserver::new();
    let mut agent = agent(6);
    let mut opponent = RandomOpponent::seeded(7);

    for game_num in 0..50 {
        let record = menace::pipeline::play_game(&mut agent, &mut opponent).unwrap();
        agent.update(&record.history, record.outcome);
        metrics.on_game_end(game_num, &record).unwrap();
    }

    let summary = metrics.summary();
    assert_eq!(summary.total_games, 50);
    assert!(summary.avg_game_length >= 5.0 && summary.avg_game_length <= 9.0);
}

#[test]
fn first_available_opponent_is_eventually_beaten() {
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        num_games: 500,
        report_every: 100,
    });

    let mut agent = agent(8);
    let mut opponent = FirstAvailableOpponent::new();
    pipeline.run(&mut agent, &mut opponent).unwrap();

    let wins = (0..20)
        .filter(|_| {
            let record = menace::pipeline::play_game(&mut agent, &mut opponent).unwrap();
            record.outcome == Outcome::AgentWin
        })
        .count();
    assert!(wins >= 12, "won {wins} of 20");
}

#[test]
fn result_saves_as_json() {
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        num_games: 20,
        report_every: 10,
    });
    let result = pipeline
        .run(&mut agent(9), &mut RandomOpponent::seeded(10))
        .unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("result.json");
    result.save(&path).unwrap();

    let loaded = TrainingResult::load(&path).unwrap();
    assert_eq!(loaded.totals.games, 20);
    assert_eq!(loaded.totals.wins, result.totals.wins);
    assert_eq!(loaded.totals.losses, result.totals.losses);
    assert_eq!(loaded.snapshots.len(), 2);
}
