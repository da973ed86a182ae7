//! Property-based tests for the allocation engine.
//!
//! - Property 1: Ledger invariants hold after every pass
//! - Property 2: Conservation of allocated amounts
//! - Property 3: Counterparts are consumed strictly in order
//! - Property 4: The pass is deterministic

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use super::engine::AllocationEngine;
use crate::ledger::{Donation, Project};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

/// Strategy to generate an open project, possibly partially funded.
fn open_project(id: i32) -> impl Strategy<Value = Project> {
    (1i64..1_000)
        .prop_flat_map(|capacity| (Just(capacity), 0..capacity))
        .prop_map(move |(capacity, allocated)| {
            let mut project = Project::new(
                id,
                format!("Project {id}"),
                "Generated",
                capacity,
                base_time() + TimeDelta::seconds(i64::from(id)),
            );
            project.ledger.allocated = allocated;
            project
        })
}

/// Strategy to generate an ordered pool of open projects.
fn project_pool() -> impl Strategy<Value = Vec<Project>> {
    (0usize..8).prop_flat_map(|len| {
        (0..len)
            .map(|i| open_project(i32::try_from(i).unwrap_or(0)))
            .collect::<Vec<_>>()
    })
}

/// Strategy to generate a fresh donation.
fn new_donation() -> impl Strategy<Value = Donation> {
    (1i64..3_000).prop_map(|capacity| {
        Donation::new(1_000, Uuid::nil(), None, capacity, base_time() + TimeDelta::days(1))
    })
}

fn now() -> DateTime<Utc> {
    base_time() + TimeDelta::days(2)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property 1: every entry satisfies the ledger invariants after the pass.
    #[test]
    fn prop_invariants_hold(mut donation in new_donation(), mut pool in project_pool()) {
        AllocationEngine::allocate(&mut donation, &mut pool, now()).unwrap();

        prop_assert!(donation.ledger.check_invariants().is_ok());
        for project in &pool {
            prop_assert!(project.ledger.check_invariants().is_ok());
        }
    }

    /// Property 2: what the new entry gained is exactly what the pool absorbed.
    #[test]
    fn prop_conservation(mut donation in new_donation(), mut pool in project_pool()) {
        let before: i64 = pool.iter().map(|p| p.ledger.allocated).sum();

        let outcome = AllocationEngine::allocate(&mut donation, &mut pool, now()).unwrap();

        let after: i64 = pool.iter().map(|p| p.ledger.allocated).sum();
        prop_assert_eq!(outcome.total_allocated(), donation.ledger.allocated);
        prop_assert_eq!(after - before, donation.ledger.allocated);
    }

    /// Property 3: touched counterparts form a prefix, every touched one
    /// except the last is closed, and the rest are unchanged.
    #[test]
    fn prop_ordered_consumption(mut donation in new_donation(), mut pool in project_pool()) {
        let original = pool.clone();

        let outcome = AllocationEngine::allocate(&mut donation, &mut pool, now()).unwrap();

        let touched: Vec<usize> = outcome.touched().collect();
        let expected: Vec<usize> = (0..touched.len()).collect();
        prop_assert_eq!(&touched, &expected);

        if let Some((_, earlier)) = touched.split_last() {
            for index in earlier {
                prop_assert!(pool[*index].ledger.closed);
            }
        }
        prop_assert_eq!(&pool[touched.len()..], &original[touched.len()..]);

        // Either the donation is satisfied or the whole pool was used up.
        if donation.ledger.is_open() {
            prop_assert!(pool.iter().all(|p| p.ledger.closed));
            prop_assert!(!outcome.entry_closed);
        } else {
            prop_assert!(outcome.entry_closed);
            prop_assert_eq!(donation.ledger.closed_at, Some(now()));
        }
    }

    /// Property 4: the same input always produces the same result.
    #[test]
    fn prop_deterministic(donation in new_donation(), pool in project_pool()) {
        let mut first_donation = donation.clone();
        let mut first_pool = pool.clone();
        let mut second_donation = donation;
        let mut second_pool = pool;

        let first = AllocationEngine::allocate(&mut first_donation, &mut first_pool, now()).unwrap();
        let second = AllocationEngine::allocate(&mut second_donation, &mut second_pool, now()).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(first_donation, second_donation);
        prop_assert_eq!(first_pool, second_pool);
    }
}
