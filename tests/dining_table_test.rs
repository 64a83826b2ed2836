use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use sync_sims::config::TableConfig;
use sync_sims::framework::mock::ScriptedPacing;
use sync_sims::framework::{ConfigError, DurationRange, Event, EventLog, RandomPacing, SimulationError};
use sync_sims::lifecycle::DiningTable;

fn table_config(names: &[&str], thinking: DurationRange, eating: DurationRange) -> TableConfig {
    TableConfig {
        philosophers: names.iter().map(|n| n.to_string()).collect(),
        thinking,
        eating,
    }
}

const FIVE: [&str; 5] = ["Kant", "Hume", "Descartes", "Locke", "Leibniz"];

/// Replays the log, checking fork exclusivity, the acquisition protocol, the eating
/// bound and the absence of the all-hold-one circular wait. Returns meals per philosopher.
fn check_dining_log(events: &[Event], seats: usize) -> HashMap<String, usize> {
    let mut fork_holder: HashMap<usize, &str> = HashMap::new();
    let mut holding: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut eating: HashSet<&str> = HashSet::new();
    let mut meals: HashMap<String, usize> = HashMap::new();

    for (i, event) in events.iter().enumerate() {
        match event {
            Event::PhilosopherThinking { philosopher } => {
                assert!(
                    holding.get(philosopher.as_str()).map_or(true, Vec::is_empty),
                    "#{i}: {philosopher} thinks while holding forks"
                );
            }
            Event::PhilosopherHungry { .. } => {}
            Event::PickedUpFork { philosopher, fork } => {
                assert!(*fork < seats, "#{i}: no fork {fork}");
                if let Some(other) = fork_holder.insert(*fork, philosopher) {
                    panic!("#{i}: fork {fork} held by {other} and {philosopher}");
                }
                let forks = holding.entry(philosopher).or_default();
                forks.push(*fork);
                assert!(forks.len() <= 2, "#{i}: {philosopher} holds three forks");

                let with_forks = holding.values().filter(|f| !f.is_empty()).count();
                assert!(with_forks < seats, "#{i}: more than N-1 philosophers past the waiter");
                let holding_one = holding.values().filter(|f| f.len() == 1).count();
                assert!(holding_one < seats, "#{i}: everybody holds exactly one fork");
            }
            Event::PhilosopherEating { philosopher } => {
                assert_eq!(
                    holding.get(philosopher.as_str()).map(Vec::len),
                    Some(2),
                    "#{i}: {philosopher} eats without both forks"
                );
                eating.insert(philosopher);
                assert!(eating.len() < seats, "#{i}: all {seats} eating at once");
            }
            Event::PhilosopherDoneEating { philosopher } => {
                assert!(eating.remove(philosopher.as_str()), "#{i}");
                *meals.entry(philosopher.clone()).or_default() += 1;
            }
            Event::PutDownFork { philosopher, fork } => {
                assert_eq!(fork_holder.remove(fork), Some(philosopher.as_str()), "#{i}");
                let forks = holding.entry(philosopher).or_default();
                // Reverse order of acquisition: the most recent fork goes down first.
                assert_eq!(forks.pop(), Some(*fork), "#{i}: {philosopher} released out of order");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
    meals
}

/// Identical fixed timings make every philosopher hungry at the same instant,
/// the worst case for circular wait.
#[tokio::test(start_paused = true)]
async fn synchronized_hunger_never_deadlocks() {
    let config = table_config(
        &FIVE,
        DurationRange::from_millis(10, 10),
        DurationRange::from_millis(10, 10),
    );
    let (log, mut events) = EventLog::channel();
    let table = DiningTable::seat(config, Arc::new(ScriptedPacing::new()), log)
        .expect("Failed to seat philosophers");
    assert_eq!(table.seats(), 5);
    assert_eq!(table.waiter().capacity(), 4);

    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(7)).await;
        assert!(table.waiter().held() <= 4);
    }
    table.shutdown().await.expect("Failed to clear the table");

    let meals = check_dining_log(&events.drain(), 5);
    for name in FIVE {
        let eaten = meals.get(name).copied().unwrap_or(0);
        assert!(eaten >= 5, "{name} starved: {eaten} meals");
    }
}

/// Everyone turns hungry at once: four get past the waiter, the fifth waits for a permit.
#[tokio::test(start_paused = true)]
async fn waiter_holds_back_the_last_philosopher() {
    let config = table_config(
        &FIVE,
        DurationRange::from_millis(10, 10),
        DurationRange::from_millis(100, 100),
    );
    let (log, mut events) = EventLog::channel();
    let table = DiningTable::seat(config, Arc::new(ScriptedPacing::new()), log).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(table.waiter().held(), 4);
    table.shutdown().await.unwrap();

    let log = events.drain();
    check_dining_log(&log, 5);
    let hungry = log
        .iter()
        .filter(|e| matches!(e, Event::PhilosopherHungry { .. }))
        .count();
    let eating = log
        .iter()
        .filter(|e| matches!(e, Event::PhilosopherEating { .. }))
        .count();
    assert_eq!(hungry, 5);
    // Depends on which four got the permits and in what order they reached for forks.
    assert!((1..=2).contains(&eating), "{eating} eating");
}

/// Random timings on a multi-threaded runtime, several rounds and ring sizes.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn random_interleavings_keep_invariants() {
    for names in [&FIVE[..], &FIVE[..2], &FIVE[..3]] {
        let seats = names.len();
        let config = table_config(
            names,
            DurationRange::from_millis(0, 2),
            DurationRange::from_millis(0, 2),
        );
        let (log, mut events) = EventLog::channel();
        let table = DiningTable::seat(config, Arc::new(RandomPacing), log).unwrap();

        for _ in 0..60 {
            tokio::time::sleep(Duration::from_millis(5)).await;
            assert!(table.waiter().held() < seats);
        }
        tokio::time::timeout(Duration::from_secs(10), table.shutdown())
            .await
            .expect("Philosophers did not stop")
            .unwrap();

        let meals = check_dining_log(&events.drain(), seats);
        for name in names {
            assert!(meals.get(*name).copied().unwrap_or(0) > 0, "{name} never ate");
        }
    }
}

#[tokio::test(start_paused = true)]
async fn shutdown_releases_everything() {
    let config = table_config(
        &FIVE,
        DurationRange::from_millis(0, 0),
        DurationRange::from_secs(3600, 3600),
    );
    let (log, mut events) = EventLog::channel();
    let table = DiningTable::seat(config, Arc::new(ScriptedPacing::new()), log).unwrap();
    let forks: Vec<_> = table.forks().to_vec();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(forks.iter().any(|f| f.is_held()));

    table.shutdown().await.expect("Blocked philosophers must still stop");
    assert!(forks.iter().all(|f| !f.is_held()));

    // Interrupted meals still end in the log, forks put down in reverse order.
    let log = events.drain();
    check_dining_log(&log, 5);
    let count = |pred: fn(&Event) -> bool| log.iter().filter(|e| pred(e)).count();
    assert_eq!(
        count(|e| matches!(e, Event::PickedUpFork { .. })),
        count(|e| matches!(e, Event::PutDownFork { .. }))
    );
    assert_eq!(
        count(|e| matches!(e, Event::PhilosopherEating { .. })),
        count(|e| matches!(e, Event::PhilosopherDoneEating { .. }))
    );
}

/// Stops a busy table at random points, many times. Neighbours that have not yet seen the
/// stop keep picking up forks the stopped ones let go of; the log must stay consistent.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stopping_mid_meal_keeps_the_log_consistent() {
    for round in 0..40u64 {
        let config = table_config(
            &FIVE[..3],
            DurationRange::from_millis(0, 1),
            DurationRange::from_millis(0, 2),
        );
        let (log, mut events) = EventLog::channel();
        let table = DiningTable::seat(config, Arc::new(RandomPacing), log).unwrap();

        tokio::time::sleep(Duration::from_millis(3 + round % 7)).await;
        tokio::time::timeout(Duration::from_secs(10), table.shutdown())
            .await
            .expect("Philosophers did not stop")
            .unwrap();

        check_dining_log(&events.drain(), 3);
    }
}

#[test]
fn invalid_tables_are_rejected() {
    let range = DurationRange::from_millis(1, 1);

    let (log, _events) = EventLog::channel();
    let result = DiningTable::seat(table_config(&["Kant"], range, range), Arc::new(RandomPacing), log);
    assert!(matches!(
        result,
        Err(SimulationError::Config(ConfigError::RingTooSmall(1)))
    ));

    let (log, _events) = EventLog::channel();
    let result = DiningTable::seat(table_config(&[], range, range), Arc::new(RandomPacing), log);
    assert!(matches!(
        result,
        Err(SimulationError::Config(ConfigError::RingTooSmall(0)))
    ));
}
