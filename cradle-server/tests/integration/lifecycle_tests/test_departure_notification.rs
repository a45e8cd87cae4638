use cradle_core::{Envelope, Role};

use crate::integration::init_tracing;
use crate::utils::{TestPeer, test_lifecycle};

#[tokio::test]
async fn test_every_remaining_peer_hears_peer_left_once() {
    init_tracing();

    let (lifecycle, registry) = test_lifecycle();
    let mut peers = vec![TestPeer::joined(&lifecycle, "baby", Role::Broadcaster)];
    for _ in 0..4 {
        peers.push(TestPeer::joined(&lifecycle, "baby", Role::Viewer));
    }
    for peer in &mut peers {
        peer.drain();
    }

    let mut leaving = peers.remove(2);
    let notified = leaving.close();

    assert_eq!(notified, peers.len());
    for peer in &mut peers {
        assert_eq!(peer.expect_one(), Envelope::peer_left(leaving.id()));
    }
    leaving.expect_nothing();

    let remaining = registry.all_peers("baby");
    assert_eq!(remaining.len(), 4);
    assert!(remaining.iter().all(|p| p.id() != leaving.id()));
}

#[tokio::test]
async fn test_broadcaster_departure_reaches_viewers() {
    init_tracing();

    let (lifecycle, registry) = test_lifecycle();
    let mut b = TestPeer::joined(&lifecycle, "baby", Role::Broadcaster);
    let mut v = TestPeer::joined(&lifecycle, "baby", Role::Viewer);
    b.drain();

    b.close();

    assert_eq!(v.expect_one(), Envelope::peer_left(b.id()));
    assert!(registry.pool("baby", Role::Broadcaster).is_empty());
}

#[tokio::test]
async fn test_unjoined_departure_is_silent() {
    init_tracing();

    let (lifecycle, _registry) = test_lifecycle();
    let mut b = TestPeer::joined(&lifecycle, "baby", Role::Broadcaster);
    let mut lurker = TestPeer::connect(&lifecycle);

    assert_eq!(lurker.close(), 0);
    b.expect_nothing();
}

#[tokio::test]
async fn test_last_peer_leaves_an_empty_room_behind() {
    init_tracing();

    let (lifecycle, registry) = test_lifecycle();
    let mut v = TestPeer::joined(&lifecycle, "baby", Role::Viewer);

    assert_eq!(v.close(), 0);

    let room = registry.room("baby").expect("rooms are kept when empty");
    assert!(room.is_empty());
}

#[tokio::test]
async fn test_departure_does_not_reach_other_rooms() {
    init_tracing();

    let (lifecycle, _registry) = test_lifecycle();
    let mut here = TestPeer::joined(&lifecycle, "baby", Role::Broadcaster);
    let mut there = TestPeer::joined(&lifecycle, "nursery", Role::Broadcaster);
    let mut v = TestPeer::joined(&lifecycle, "baby", Role::Viewer);
    here.drain();

    v.close();

    assert_eq!(here.expect_one(), Envelope::peer_left(v.id()));
    there.expect_nothing();
}
