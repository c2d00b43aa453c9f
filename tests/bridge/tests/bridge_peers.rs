//! Two endpoints agreeing on a protocol from an advertised id list.
//!
//! The client advertises its ids as a JSON array, standing in for whatever
//! channel the real handshake uses; the server selects from it.

use protocol_negotiation::{BinaryFilter, Negotiator, ProtocolSpec};

fn endpoint(protocols: &[(&str, &str, bool)]) -> Negotiator {
    let mut n = Negotiator::new();
    for (name, version, binary) in protocols {
        n.register(
            *name,
            ProtocolSpec::new()
                .with_version(*version)
                .with_binary(*binary),
        );
    }
    n
}

fn advertise(n: &Negotiator, filter: BinaryFilter) -> String {
    serde_json::to_string(&n.available(filter)).unwrap()
}

fn receive(wire: &str) -> Vec<String> {
    serde_json::from_str(wire).unwrap()
}

#[test]
fn test_server_picks_best_shared_protocol() {
    let client = endpoint(&[
        ("primus", "1.0.0", false),
        ("primus", "1.2.0", false),
        ("primus", "1.2.0", true),
    ]);
    let server = endpoint(&[
        ("primus", "1.0.0", false),
        ("primus", "1.2.0", true),
        ("primus", "2.0.0", false),
    ]);

    let text_only = receive(&advertise(&client, BinaryFilter::Exclude));
    let text = server.select(&text_only, false).unwrap();
    assert_eq!(text.id(), "primus@1.0.0");

    let everything = receive(&advertise(&client, BinaryFilter::Unset));
    let binary = server.select(&everything, true).unwrap();
    assert_eq!(binary.id(), "primus:b@1.2.0");
}

#[test]
fn test_both_sides_reach_same_decision() {
    let shared = [
        ("engine", "0.9.0", false),
        ("engine", "1.4.2", false),
        ("engine", "1.1.0", true),
    ];
    let a = endpoint(&shared);
    let b = endpoint(&shared);

    for boost in [false, true] {
        let from_a = b.select(receive(&advertise(&a, BinaryFilter::Unset)), boost);
        let from_b = a.select(receive(&advertise(&b, BinaryFilter::Unset)), boost);
        assert_eq!(from_a.map(|p| p.id()), from_b.map(|p| p.id()));
    }
}

#[test]
fn test_text_only_client() {
    let client = endpoint(&[("rpc", "3.0.0", false), ("rpc", "4.0.0", true)]);
    let server = endpoint(&[("rpc", "3.0.0", false), ("rpc", "4.0.0", true)]);

    let offered = receive(&advertise(&client, BinaryFilter::Exclude));
    assert_eq!(offered, vec!["rpc@3.0.0"]);
    assert_eq!(server.select(&offered, true).unwrap().id(), "rpc@3.0.0");
}

#[test]
fn test_no_overlap() {
    let client = endpoint(&[("a", "1.0.0", false)]);
    let server = endpoint(&[("b", "1.0.0", false)]);

    let offered = receive(&advertise(&client, BinaryFilter::Unset));
    assert!(server.select(&offered, true).is_none());
}
