//! Concurrent access: one negotiator shared between tasks.
//!
//! The negotiator does no locking of its own; these tests wrap it in a
//! caller-owned mutex and check that every task sees the same decision.

use std::sync::Arc;
use tokio::sync::{Barrier, Mutex};

use protocol_negotiation::{BinaryFilter, Negotiator, ProtocolSpec};

// ─── Helpers ───────────────────────────────────────────────────────────────

fn versioned(version: &str, binary: bool) -> ProtocolSpec {
    ProtocolSpec::new().with_version(version).with_binary(binary)
}

fn seeded() -> Arc<Mutex<Negotiator>> {
    let mut n = Negotiator::new();
    n.register("bar", versioned("0.80.9", false))
        .register("bar", versioned("13.23.0", false))
        .register("foo", versioned("1.80.8", true))
        .register("bar", versioned("2.80.8", true));
    Arc::new(Mutex::new(n))
}

// ─── Tests ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_concurrent_selectors_agree() {
    let shared = seeded();
    let barrier = Arc::new(Barrier::new(8));
    let mut handles = vec![];

    for task in 0..8u32 {
        let shared = shared.clone();
        let barrier = barrier.clone();

        handles.push(tokio::spawn(async move {
            barrier.wait().await;

            let boost = task % 2 == 0;
            let n = shared.lock().await;
            let id = n
                .select(["bar@13.23.0", "bar:b@2.80.8", "foo@1310.8.9"], boost)
                .map(|p| p.id().to_string());
            (boost, id)
        }));
    }

    for handle in handles {
        let (boost, id) = handle.await.unwrap();
        let expected = if boost { "bar:b@2.80.8" } else { "bar@13.23.0" };
        assert_eq!(id.as_deref(), Some(expected));
    }
}

#[tokio::test]
async fn test_concurrent_registration() {
    let shared = Arc::new(Mutex::new(Negotiator::new()));
    let mut handles = vec![];

    for task in 0..10u32 {
        let shared = shared.clone();
        handles.push(tokio::spawn(async move {
            let version = format!("{task}.0.0");
            shared
                .lock()
                .await
                .register("proto", versioned(&version, false))
                // Same id from every task: overwritten, never duplicated.
                .register("common", versioned("1.0.0", false));
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    let n = shared.lock().await;
    assert_eq!(n.len(), 11);
    assert_eq!(n.available(BinaryFilter::Unset).len(), 11);
    assert_eq!(n.select_best(false).unwrap().id(), "proto@9.0.0");
}

#[tokio::test]
async fn test_destroy_races_once() {
    let shared = seeded();
    let barrier = Arc::new(Barrier::new(4));
    let mut handles = vec![];

    for _ in 0..4 {
        let shared = shared.clone();
        let barrier = barrier.clone();
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            shared.lock().await.destroy()
        }));
    }

    let mut first = 0;
    for handle in handles {
        if handle.await.unwrap() {
            first += 1;
        }
    }
    assert_eq!(first, 1, "Exactly one destroy should report success");
    assert!(shared.lock().await.select_best(true).is_none());
}
