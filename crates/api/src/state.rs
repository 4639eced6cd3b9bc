use std::sync::Arc;

use gather_admission::{Admissions, AdmissionStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The admission orchestrator (RSVP lifecycle, capacity, waitlist).
    pub admissions: Arc<Admissions>,
    /// The persistence collaborator; organizer and profile endpoints go
    /// straight to the store.
    pub store: Arc<dyn AdmissionStore>,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
}
