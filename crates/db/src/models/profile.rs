//! Row model for the `attendee_profiles` table.

use sqlx::FromRow;

use gather_core::model::AttendeeProfile;
use gather_core::types::{Timestamp, UserId};

/// A row from the `attendee_profiles` table.
#[derive(Debug, Clone, FromRow)]
pub struct AttendeeProfileRow {
    pub user_id: UserId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub shirt_size: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub accessibility_needs: Option<String>,
    pub updated_at: Timestamp,
}

impl From<AttendeeProfileRow> for AttendeeProfile {
    fn from(row: AttendeeProfileRow) -> Self {
        AttendeeProfile {
            user_id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            email: row.email,
            shirt_size: row.shirt_size,
            dietary_restrictions: row.dietary_restrictions,
            accessibility_needs: row.accessibility_needs,
            updated_at: Some(row.updated_at),
        }
    }
}
