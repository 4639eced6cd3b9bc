//! Concurrency properties of the capacity ledger: for any number of
//! racing confirmations, admissions never exceed capacity and every
//! loser gets a typed `AtCapacity` rejection.

mod common;

use std::sync::Arc;

use common::{admissions, create_event, create_track, seed_user};
use gather_core::capacity::AdmissionUnit;
use gather_core::error::AdmissionError;
use gather_core::status::RsvpStatus;
use gather_core::transitions::AdmissionIntent;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn track_capacity_is_never_oversold() {
    let store = Arc::new(gather_admission::MemoryStore::new());
    let svc = Arc::new(admissions(store.clone()));

    let event = create_event(&store, None, true).await;
    let track = create_track(&store, event.id, None, "Workshop", Some(3)).await;

    let mut users = Vec::new();
    for _ in 0..10 {
        let user_id = seed_user(&store).await;
        svc.request_admission(user_id, event.id, AdmissionIntent::Attend, 1)
            .await
            .unwrap();
        users.push(user_id);
    }

    let mut handles = Vec::new();
    for user_id in users {
        let svc = Arc::clone(&svc);
        let track_id = track.id;
        let event_id = event.id;
        handles.push(tokio::spawn(async move {
            svc.confirm_track(user_id, event_id, track_id, false).await
        }));
    }

    let mut admitted = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(rsvp) => {
                assert_eq!(rsvp.status, RsvpStatus::Attending);
                admitted += 1;
            }
            Err(AdmissionError::AtCapacity { .. }) => rejected += 1,
            Err(other) => panic!("unexpected rejection: {other}"),
        }
    }

    assert_eq!(admitted, 3);
    assert_eq!(rejected, 7);

    let occ = svc.occupancy(AdmissionUnit::Track(track.id)).await.unwrap();
    assert_eq!(occ.current, 3);
    assert_eq!(occ.max, Some(3));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn last_slot_has_exactly_one_winner() {
    let store = Arc::new(gather_admission::MemoryStore::new());
    let svc = Arc::new(admissions(store.clone()));

    let event = create_event(&store, None, true).await;
    let track = create_track(&store, event.id, None, "Workshop", Some(1)).await;

    let user_a = seed_user(&store).await;
    let user_b = seed_user(&store).await;
    for user_id in [user_a, user_b] {
        svc.request_admission(user_id, event.id, AdmissionIntent::Attend, 1)
            .await
            .unwrap();
    }

    let a = {
        let svc = Arc::clone(&svc);
        let (event_id, track_id) = (event.id, track.id);
        tokio::spawn(async move { svc.confirm_track(user_a, event_id, track_id, false).await })
    };
    let b = {
        let svc = Arc::clone(&svc);
        let (event_id, track_id) = (event.id, track.id);
        tokio::spawn(async move { svc.confirm_track(user_b, event_id, track_id, false).await })
    };

    let results = [a.await.unwrap(), b.await.unwrap()];
    let winners = results.iter().filter(|r| r.is_ok()).count();
    let losers = results
        .iter()
        .filter(|r| matches!(r, Err(AdmissionError::AtCapacity { .. })))
        .count();

    assert_eq!(winners, 1);
    assert_eq!(losers, 1);
    assert_eq!(
        svc.occupancy(AdmissionUnit::Track(track.id)).await.unwrap().current,
        1
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn event_capacity_holds_under_concurrent_direct_rsvps() {
    let store = Arc::new(gather_admission::MemoryStore::new());
    let svc = Arc::new(admissions(store.clone()));

    let event = create_event(&store, Some(5), false).await;

    let mut users = Vec::new();
    for _ in 0..20 {
        users.push(seed_user(&store).await);
    }

    let mut handles = Vec::new();
    for user_id in users {
        let svc = Arc::clone(&svc);
        let event_id = event.id;
        handles.push(tokio::spawn(async move {
            svc.request_admission(user_id, event_id, AdmissionIntent::Attend, 1)
                .await
        }));
    }

    let mut admitted = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            admitted += 1;
        }
    }

    assert_eq!(admitted, 5);
    let occ = svc.occupancy(AdmissionUnit::Event(event.id)).await.unwrap();
    assert_eq!(occ.current, 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn churn_of_cancellations_and_confirmations_balances_out() {
    let store = Arc::new(gather_admission::MemoryStore::new());
    let svc = Arc::new(admissions(store.clone()));

    let event = create_event(&store, None, true).await;
    let track = create_track(&store, event.id, None, "Workshop", Some(4)).await;

    let mut users = Vec::new();
    for _ in 0..8 {
        let user_id = seed_user(&store).await;
        svc.request_admission(user_id, event.id, AdmissionIntent::Attend, 1)
            .await
            .unwrap();
        users.push(user_id);
    }

    // Everyone repeatedly confirms and cancels; the ledger must end
    // consistent with the surviving ATTENDING rows.
    let mut handles = Vec::new();
    for user_id in users.clone() {
        let svc = Arc::clone(&svc);
        let (event_id, track_id) = (event.id, track.id);
        handles.push(tokio::spawn(async move {
            for _ in 0..5 {
                let _ = svc.confirm_track(user_id, event_id, track_id, false).await;
                let _ = svc.cancel(user_id, event_id).await;
                let _ = svc
                    .request_admission(user_id, event_id, AdmissionIntent::Attend, 1)
                    .await;
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let mut attending = 0;
    for user_id in users {
        let rsvp = svc.rsvp_of(user_id, event.id).await.unwrap().unwrap();
        if rsvp.status == RsvpStatus::Attending {
            attending += 1;
        }
    }

    let occ = svc.occupancy(AdmissionUnit::Track(track.id)).await.unwrap();
    assert_eq!(occ.current, attending);
    assert!(occ.current <= 4);
}
