pub mod activity_repo;
pub mod event_repo;
pub mod ledger_repo;
pub mod profile_repo;
pub mod rsvp_repo;
pub mod track_repo;

pub use activity_repo::ActivityRepo;
pub use event_repo::EventRepo;
pub use ledger_repo::LedgerRepo;
pub use profile_repo::ProfileRepo;
pub use rsvp_repo::RsvpRepo;
pub use track_repo::TrackRepo;
