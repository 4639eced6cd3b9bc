//! The capacity ledger: conditional occupancy updates on events and
//! tracks.
//!
//! `try_reserve` is a single conditional `UPDATE` -- the check and the
//! increment happen in one statement, so concurrent reservations against
//! the same unit serialize on the row lock and the last slot is handed
//! out exactly once. No read-modify-write in application code.

use sqlx::PgPool;

use gather_core::capacity::{AdmissionUnit, Occupancy};

/// Provides atomic occupancy accounting for admission units.
pub struct LedgerRepo;

impl LedgerRepo {
    /// Atomically reserve `delta` slots on a unit.
    ///
    /// Returns `Ok(true)` when the reservation was applied, `Ok(false)`
    /// when the row exists but the unit is full (or does not exist --
    /// callers distinguish via [`occupancy_of`](Self::occupancy_of)).
    pub async fn try_reserve(
        pool: &PgPool,
        unit: AdmissionUnit,
        delta: i32,
    ) -> Result<bool, sqlx::Error> {
        let query = match unit {
            AdmissionUnit::Event(_) => {
                "UPDATE events
                 SET occupancy = occupancy + $2, updated_at = now()
                 WHERE id = $1
                   AND (capacity IS NULL OR occupancy + $2 <= capacity)"
            }
            AdmissionUnit::Track(_) => {
                "UPDATE tracks
                 SET occupancy = occupancy + $2
                 WHERE id = $1
                   AND (capacity IS NULL OR occupancy + $2 <= capacity)"
            }
        };
        let result = sqlx::query(query)
            .bind(unit.id())
            .bind(delta)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Release `delta` slots on a unit. Floors at zero; releasing on a
    /// missing unit is a no-op.
    pub async fn release(
        pool: &PgPool,
        unit: AdmissionUnit,
        delta: i32,
    ) -> Result<(), sqlx::Error> {
        let query = match unit {
            AdmissionUnit::Event(_) => {
                "UPDATE events
                 SET occupancy = GREATEST(occupancy - $2, 0), updated_at = now()
                 WHERE id = $1"
            }
            AdmissionUnit::Track(_) => {
                "UPDATE tracks
                 SET occupancy = GREATEST(occupancy - $2, 0)
                 WHERE id = $1"
            }
        };
        sqlx::query(query)
            .bind(unit.id())
            .bind(delta)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Read the occupancy snapshot of a unit, or `None` when it does not
    /// exist.
    pub async fn occupancy_of(
        pool: &PgPool,
        unit: AdmissionUnit,
    ) -> Result<Option<Occupancy>, sqlx::Error> {
        let query = match unit {
            AdmissionUnit::Event(_) => "SELECT occupancy, capacity FROM events WHERE id = $1",
            AdmissionUnit::Track(_) => "SELECT occupancy, capacity FROM tracks WHERE id = $1",
        };
        let row: Option<(i32, Option<i32>)> = sqlx::query_as(query)
            .bind(unit.id())
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|(current, max)| Occupancy { current, max }))
    }
}
