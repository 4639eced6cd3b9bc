//! Attendee profile handlers.
//!
//! The profile is what the eligibility gate inspects; the response
//! includes the current completeness so clients can show exactly which
//! fields still block admission.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use gather_core::eligibility::{self, ProfileCompleteness};
use gather_core::model::AttendeeProfile;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for the profile upsert endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub shirt_size: Option<String>,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub accessibility_needs: Option<String>,
}

/// Profile payload with its completeness summary.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: AttendeeProfile,
    pub completeness: ProfileCompleteness,
}

/// PUT /api/v1/profile
///
/// Upsert the caller's profile.
pub async fn upsert_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let profile = state
        .store
        .upsert_profile(AttendeeProfile {
            user_id: auth.user_id,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            email: input.email,
            shirt_size: input.shirt_size,
            dietary_restrictions: input.dietary_restrictions,
            accessibility_needs: input.accessibility_needs,
            updated_at: None,
        })
        .await?;

    let completeness = eligibility::completeness(&profile);
    Ok(Json(DataResponse {
        data: ProfileResponse {
            profile,
            completeness,
        },
    }))
}

/// GET /api/v1/profile
///
/// The caller's profile (empty fields when none is stored yet) with its
/// completeness summary.
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let profile = state
        .store
        .find_profile(auth.user_id)
        .await?
        .unwrap_or_else(|| AttendeeProfile {
            user_id: auth.user_id,
            ..AttendeeProfile::default()
        });

    let completeness = eligibility::completeness(&profile);
    Ok(Json(DataResponse {
        data: ProfileResponse {
            profile,
            completeness,
        },
    }))
}
