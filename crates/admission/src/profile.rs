//! Profile-completeness collaborator.
//!
//! The eligibility rule itself lives in `gather_core::eligibility`; this
//! module is the async seam that fetches the numbers for a user.

use std::sync::Arc;

use async_trait::async_trait;

use gather_core::eligibility::{self, ProfileCompleteness};
use gather_core::error::AdmissionError;
use gather_core::model::AttendeeProfile;
use gather_core::types::UserId;

use crate::store::AdmissionStore;

/// External collaborator that reports how complete a user's profile is.
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    async fn completeness(&self, user_id: UserId) -> Result<ProfileCompleteness, AdmissionError>;
}

/// [`ProfileDirectory`] that reads profiles from the admission store.
///
/// A user with no stored profile row is treated as a fully empty profile:
/// every required field missing.
pub struct StoreProfileDirectory {
    store: Arc<dyn AdmissionStore>,
}

impl StoreProfileDirectory {
    pub fn new(store: Arc<dyn AdmissionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileDirectory for StoreProfileDirectory {
    async fn completeness(&self, user_id: UserId) -> Result<ProfileCompleteness, AdmissionError> {
        let profile = self
            .store
            .find_profile(user_id)
            .await?
            .unwrap_or_else(|| AttendeeProfile {
                user_id,
                ..AttendeeProfile::default()
            });
        Ok(eligibility::completeness(&profile))
    }
}
