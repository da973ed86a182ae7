//! Greedy allocation of a new entry against the open counterpart pool.
//!
//! The pass walks the open counterparts oldest first and moves as much as
//! possible into each one:
//! 1. `need` is what the new entry still has to give or absorb
//! 2. `room` is what the current counterpart still has to absorb or give
//! 3. `min(need, room)` is added to both running totals
//! 4. A counterpart that fills up is closed and the pass moves on
//! 5. When the new entry fills up it is closed and the pass stops, even if
//!    more open counterparts follow
//!
//! Committed amounts are never redistributed, so the order of the supplied
//! counterparts is the only fairness mechanism.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::AllocationError;
use super::pairing::Pairing;
use crate::ledger::{LedgerEntry, close};

/// Amount moved between the new entry and one counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Position of the counterpart in the supplied open set.
    pub counterpart_index: usize,
    /// Amount added to both running totals.
    pub amount: i64,
    /// Whether the counterpart was closed by this transfer.
    pub counterpart_closed: bool,
}

/// Result of one allocation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationOutcome {
    /// Direction of the pass.
    pub pairing: Pairing,
    /// Transfers in the order they were made.
    pub transfers: Vec<Transfer>,
    /// Whether the new entry was closed by the pass.
    pub entry_closed: bool,
}

impl AllocationOutcome {
    fn new(pairing: Pairing) -> Self {
        Self {
            pairing,
            transfers: Vec::new(),
            entry_closed: false,
        }
    }

    /// Total amount moved during the pass.
    #[must_use]
    pub fn total_allocated(&self) -> i64 {
        self.transfers.iter().map(|t| t.amount).sum()
    }

    /// Positions of the counterparts that were touched, in order.
    pub fn touched(&self) -> impl Iterator<Item = usize> + '_ {
        self.transfers.iter().map(|t| t.counterpart_index)
    }

    /// Number of counterparts closed by the pass.
    #[must_use]
    pub fn closed_counterparts(&self) -> usize {
        self.transfers
            .iter()
            .filter(|t| t.counterpart_closed)
            .count()
    }

    /// Returns true if nothing was moved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }
}

/// Allocation engine for matching donations and projects.
///
/// This service contains pure business logic with no database dependencies.
/// Callers supply the open counterparts (oldest first) and persist every
/// touched entry together with the new one.
pub struct AllocationEngine;

impl AllocationEngine {
    /// Runs one greedy pass of `entry` against `counterparts`.
    ///
    /// Counterparts are mutated in place; the ones that were not reached are
    /// left untouched. Every closure performed by the pass is stamped with
    /// `now`.
    ///
    /// # Arguments
    ///
    /// * `entry` - The freshly created entry, still open
    /// * `counterparts` - Open entries of the other kind, ordered by creation time
    /// * `now` - Timestamp for closures
    ///
    /// # Errors
    ///
    /// Returns `AllocationError` if the new entry or any counterpart breaks a
    /// precondition. Preconditions are checked before anything is mutated.
    pub fn allocate<E: LedgerEntry>(
        entry: &mut E,
        counterparts: &mut [E::Counterpart],
        now: DateTime<Utc>,
    ) -> Result<AllocationOutcome, AllocationError> {
        Self::check_preconditions(entry, counterparts)?;

        let mut outcome = AllocationOutcome::new(Pairing::of::<E>());

        for (counterpart_index, counterpart) in counterparts.iter_mut().enumerate() {
            let need = entry.ledger().remaining();
            let room = counterpart.ledger().remaining();
            let amount = need.min(room);

            entry.ledger_mut().allocated += amount;
            counterpart.ledger_mut().allocated += amount;

            match need.cmp(&room) {
                Ordering::Greater => {
                    close(counterpart.ledger_mut(), now)?;
                    outcome.transfers.push(Transfer {
                        counterpart_index,
                        amount,
                        counterpart_closed: true,
                    });
                }
                Ordering::Less => {
                    close(entry.ledger_mut(), now)?;
                    outcome.transfers.push(Transfer {
                        counterpart_index,
                        amount,
                        counterpart_closed: false,
                    });
                    outcome.entry_closed = true;
                    break;
                }
                Ordering::Equal => {
                    close(counterpart.ledger_mut(), now)?;
                    close(entry.ledger_mut(), now)?;
                    outcome.transfers.push(Transfer {
                        counterpart_index,
                        amount,
                        counterpart_closed: true,
                    });
                    outcome.entry_closed = true;
                    break;
                }
            }
        }

        Ok(outcome)
    }

    fn check_preconditions<E: LedgerEntry>(
        entry: &E,
        counterparts: &[E::Counterpart],
    ) -> Result<(), AllocationError> {
        let fields = entry.ledger();
        fields
            .check_invariants()
            .map_err(AllocationError::InvalidEntry)?;
        if fields.closed {
            return Err(AllocationError::EntryClosed);
        }

        for (index, counterpart) in counterparts.iter().enumerate() {
            let fields = counterpart.ledger();
            fields
                .check_invariants()
                .map_err(|source| AllocationError::InvalidCounterpart { index, source })?;
            if fields.closed {
                return Err(AllocationError::CounterpartClosed { index });
            }
        }

        Ok(())
    }
}
