//! Closure policy: the single open-to-closed transition.

use chrono::{DateTime, Utc};

use super::entry::LedgerFields;
use super::error::LedgerError;

/// Closes a fully allocated entry.
///
/// Sets `closed_at` and the `closed` flag. Closing is one-way: nothing in the
/// core reopens an entry.
///
/// # Errors
///
/// Returns `LedgerError::AlreadyClosed` if the entry was closed before, or
/// `LedgerError::NotFullyAllocated` if `allocated` has not reached `capacity`.
pub fn close(fields: &mut LedgerFields, now: DateTime<Utc>) -> Result<(), LedgerError> {
    if fields.closed {
        return Err(LedgerError::AlreadyClosed);
    }
    if fields.allocated != fields.capacity {
        return Err(LedgerError::NotFullyAllocated {
            allocated: fields.allocated,
            capacity: fields.capacity,
        });
    }

    fields.closed_at = Some(now);
    fields.closed = true;
    Ok(())
}
