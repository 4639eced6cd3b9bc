//! Repository for the `attendee_profiles` table.

use sqlx::PgPool;

use gather_core::model::AttendeeProfile;
use gather_core::types::UserId;

use crate::models::profile::AttendeeProfileRow;

/// Column list for attendee_profiles queries.
const PROFILE_COLUMNS: &str = "user_id, first_name, last_name, phone, email, \
    shirt_size, dietary_restrictions, accessibility_needs, updated_at";

/// Provides upsert and lookup operations for attendee profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert or update a user's profile, returning the stored row.
    pub async fn upsert(
        pool: &PgPool,
        profile: &AttendeeProfile,
    ) -> Result<AttendeeProfileRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendee_profiles
                (user_id, first_name, last_name, phone, email,
                 shirt_size, dietary_restrictions, accessibility_needs)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (user_id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                phone = EXCLUDED.phone,
                email = EXCLUDED.email,
                shirt_size = EXCLUDED.shirt_size,
                dietary_restrictions = EXCLUDED.dietary_restrictions,
                accessibility_needs = EXCLUDED.accessibility_needs,
                updated_at = now()
             RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, AttendeeProfileRow>(&query)
            .bind(profile.user_id)
            .bind(&profile.first_name)
            .bind(&profile.last_name)
            .bind(&profile.phone)
            .bind(&profile.email)
            .bind(&profile.shirt_size)
            .bind(&profile.dietary_restrictions)
            .bind(&profile.accessibility_needs)
            .fetch_one(pool)
            .await
    }

    /// Find a user's profile.
    pub async fn find(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Option<AttendeeProfileRow>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM attendee_profiles WHERE user_id = $1");
        sqlx::query_as::<_, AttendeeProfileRow>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
