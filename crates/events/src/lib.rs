//! Gather notification infrastructure.
//!
//! The admission engine treats notification delivery as a fire-and-forget
//! external collaborator: an ATTENDING transition publishes onto the
//! [`NotificationBus`] and moves on. Delivery problems are the
//! subscriber's concern and can never roll back an admission decision.

pub mod bus;

pub use bus::{Notification, NotificationBus};
