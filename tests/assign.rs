//! Integration tests for conflict-aware slot assignment and the retrying pipeline.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use round_robin_schedule::{
    assign_times, assign_times_seeded, generate_schedule_with_retries, round_robin, time_slots,
    trim_slots, CompetitionConfig, Competitor, CompetitorConfig, GroupConfig, Infeasible, Match,
    Player, PlayerId, SlotConfig, Team, TimeSlot, WindowConfig,
};
use std::collections::HashSet;

fn player(id: u32, name: &str) -> Player {
    Player::new(PlayerId(id), name)
}

fn singles(n: u32) -> Vec<Competitor> {
    (0..n).map(|i| player(i, &format!("P{i}")).into()).collect()
}

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 9, 7)
        .unwrap()
        .and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
}

fn slot(court: u32, h: u32, m: u32) -> TimeSlot {
    TimeSlot::new(court, at(h, m), at(h, m) + chrono::Duration::minutes(30))
}

/// 2 starts on 3 courts plus 6 starts on a single court: 12 slots, at most 3 simultaneous.
fn twelve_slots() -> Vec<TimeSlot> {
    time_slots(&SlotConfig {
        dates: vec![NaiveDate::from_ymd_opt(2024, 9, 7).unwrap()],
        windows: vec![
            WindowConfig::new(
                NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            ),
            WindowConfig::new(
                NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            )
            .with_courts(vec![10]),
        ],
        match_minutes: 30,
        courts: vec![10, 11, 12],
    })
}

/// Every match has a slot, no slot is used twice, nobody plays twice at one start.
fn assert_valid(matches: &[Match], expected: usize) {
    assert_eq!(matches.len(), expected);
    let slots: Vec<&TimeSlot> = matches
        .iter()
        .map(|m| m.time.as_ref().expect("every match is assigned"))
        .collect();
    let distinct: HashSet<&TimeSlot> = slots.iter().copied().collect();
    assert_eq!(distinct.len(), matches.len(), "slots are pairwise distinct");

    for (i, a) in matches.iter().enumerate() {
        for b in &matches[i + 1..] {
            if slots_simultaneous(a, b) {
                assert!(
                    a.players().is_disjoint(&b.players()),
                    "double booking at {:?}",
                    a.time
                );
            }
        }
    }
}

fn slots_simultaneous(a: &Match, b: &Match) -> bool {
    match (&a.time, &b.time) {
        (Some(x), Some(y)) => x.is_simultaneous(y),
        _ => false,
    }
}

#[test]
fn more_matches_than_slots_is_infeasible_for_every_seed() {
    let matches = round_robin(&singles(5), "G");
    let slots: Vec<TimeSlot> = (0..5).map(|i| slot(10, 11 + i, 0)).collect();
    for seed in 0..50 {
        let result = assign_times_seeded(matches.clone(), slots.clone(), seed);
        assert_eq!(
            result,
            Err(Infeasible::NotEnoughSlots {
                matches: 10,
                slots: 5
            })
        );
        assert!(!result.unwrap_err().is_retryable());
    }
}

#[test]
fn not_enough_slots_is_detected_before_shuffling() {
    let matches = round_robin(&singles(4), "G");
    let mut rng = StdRng::seed_from_u64(7);
    let mut untouched = rng.clone();
    assert!(assign_times(matches, vec![slot(1, 11, 0)], &mut rng).is_err());
    assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
}

#[test]
fn five_players_fit_into_twelve_slots_for_some_seed() {
    let matches = round_robin(&singles(5), "Group1 Singles");
    let slots = twelve_slots();
    assert_eq!(slots.len(), 12);

    let mut successes = 0;
    for seed in 0..200 {
        if let Ok(assigned) = assign_times_seeded(matches.clone(), slots.clone(), seed) {
            assert_valid(&assigned, 10);
            successes += 1;
        }
    }
    assert!(successes > 0, "no seed produced a schedule");
}

#[test]
fn every_successful_assignment_is_conflict_free() {
    // Two groups sharing the slot pool: up to 3 simultaneous matches across 10 players.
    let mut matches = round_robin(&singles(5), "A");
    let others: Vec<Competitor> = (5..10).map(|i| player(i, &format!("P{i}")).into()).collect();
    matches.extend(round_robin(&others, "B"));
    let slots: Vec<TimeSlot> = (0..8)
        .flat_map(|i| (1..=3).map(move |court| slot(court, 9 + i, 0)))
        .collect();

    for seed in 0..100 {
        match assign_times_seeded(matches.clone(), slots.clone(), seed) {
            Ok(assigned) => assert_valid(&assigned, 20),
            Err(e) => assert!(e.is_retryable(), "unexpected {e:?}"),
        }
    }
}

#[test]
fn team_member_outside_other_rosters_causes_no_false_conflict() {
    let (a, b, c, d, e, x) = (
        player(0, "A"),
        player(1, "B"),
        player(2, "C"),
        player(3, "D"),
        player(4, "E"),
        player(5, "X"),
    );
    let matches = vec![
        Match::new(b.into(), c.into(), "Singles"),
        Match::new(
            Team::new(a, x).unwrap().into(),
            Team::new(d, e).unwrap().into(),
            "Doubles",
        ),
    ];
    let slots = vec![slot(1, 11, 0), slot(2, 11, 0)];
    for seed in 0..20 {
        let assigned = assign_times_seeded(matches.clone(), slots.clone(), seed).unwrap();
        assert_valid(&assigned, 2);
    }
}

#[test]
fn shared_player_at_single_start_is_a_dead_end() {
    let (a, b, c) = (player(0, "A"), player(1, "B"), player(2, "C"));
    let matches = vec![
        Match::new(a.clone().into(), b.into(), "G"),
        Match::new(a.into(), c.into(), "G"),
    ];
    let slots = vec![slot(1, 11, 0), slot(2, 11, 0)];
    for seed in 0..20 {
        let err = assign_times_seeded(matches.clone(), slots.clone(), seed).unwrap_err();
        assert_eq!(
            err,
            Infeasible::DeadEnd {
                start: at(11, 0),
                unassigned: 1
            }
        );
        assert!(err.is_retryable());
    }
}

#[test]
fn same_seed_gives_same_schedule() {
    let matches = round_robin(&singles(5), "G");
    let slots = twelve_slots();
    assert_eq!(
        assign_times_seeded(matches.clone(), slots.clone(), 99),
        assign_times_seeded(matches, slots, 99)
    );
}

#[test]
fn nothing_to_assign_succeeds() {
    assert_eq!(assign_times_seeded(vec![], vec![], 1), Ok(vec![]));
    assert_eq!(assign_times_seeded(vec![], vec![slot(1, 11, 0)], 1), Ok(vec![]));
}

#[test]
fn trimming_spreads_over_start_instants() {
    let pool: Vec<TimeSlot> = (0..4)
        .flat_map(|i| (1..=3).map(move |court| slot(court, 11 + i, 0)))
        .collect();
    let kept = trim_slots(pool.clone(), 6);
    assert_eq!(kept.len(), 6);

    let first_courts: Vec<&TimeSlot> = kept.iter().filter(|s| s.court == 1).collect();
    assert_eq!(first_courts.len(), 4, "every start keeps its first court");
    let seconds: Vec<(u32, NaiveDateTime)> = kept
        .iter()
        .filter(|s| s.court == 2)
        .map(|s| (s.court, s.start))
        .collect();
    assert_eq!(seconds, vec![(2, at(11, 0)), (2, at(12, 0))]);
    assert!(kept.iter().all(|s| s.court != 3));

    assert_eq!(trim_slots(pool.clone(), 12), pool);
    assert_eq!(trim_slots(pool.clone(), 6), kept);
}

#[test]
fn embedded_configuration_schedules_on_first_attempt() {
    let competition = CompetitionConfig::embedded().unwrap().build().unwrap();
    for seed in [1, 42, 2024] {
        let schedule = generate_schedule_with_retries(&competition, seed, 1).unwrap();
        assert_eq!(schedule.seed, seed);
        assert_eq!(schedule.attempts, 1);
        assert_valid(&schedule.matches, 20);
    }
}

fn triangle_on_three_courts() -> CompetitionConfig {
    CompetitionConfig {
        groups: vec![GroupConfig {
            name: "Triangle".to_string(),
            competitors: ["A", "B", "C"]
                .iter()
                .map(|n| CompetitorConfig::Player(n.to_string()))
                .collect(),
        }],
        slots: SlotConfig {
            dates: vec![NaiveDate::from_ymd_opt(2024, 9, 7).unwrap()],
            windows: vec![WindowConfig::new(
                NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
            )],
            match_minutes: 30,
            courts: vec![1, 2, 3],
        },
    }
}

#[test]
fn retries_give_up_after_max_attempts() {
    let competition = triangle_on_three_courts().build().unwrap();
    let err = generate_schedule_with_retries(&competition, 3, 5).unwrap_err();
    assert_eq!(
        err,
        Infeasible::DeadEnd {
            start: at(11, 0),
            unassigned: 2
        }
    );
}

#[test]
fn structural_infeasibility_is_not_retried() {
    let mut config = triangle_on_three_courts();
    config.slots.courts = vec![1, 2];
    let competition = config.build().unwrap();
    assert_eq!(
        generate_schedule_with_retries(&competition, 3, 5).unwrap_err(),
        Infeasible::NotEnoughSlots {
            matches: 3,
            slots: 2
        }
    );
}

#[test]
fn retries_find_a_schedule_for_a_tight_pool() {
    // 5 players, 10 matches, 5 starts with 2 courts each: every start must host two matches.
    let config = CompetitionConfig {
        groups: vec![GroupConfig {
            name: "Tight".to_string(),
            competitors: ["A", "B", "C", "D", "E"]
                .iter()
                .map(|n| CompetitorConfig::Player(n.to_string()))
                .collect(),
        }],
        slots: SlotConfig {
            dates: vec![NaiveDate::from_ymd_opt(2024, 9, 7).unwrap()],
            windows: vec![WindowConfig::new(
                NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(13, 30, 0).unwrap(),
            )],
            match_minutes: 30,
            courts: vec![1, 2],
        },
    };
    let competition = config.build().unwrap();
    let schedule = generate_schedule_with_retries(&competition, 11, 500).unwrap();
    assert!(schedule.attempts >= 1);
    assert_valid(&schedule.matches, 10);

    let again = generate_schedule_with_retries(&competition, schedule.seed, 1).unwrap();
    assert_eq!(again.matches, schedule.matches);
}
