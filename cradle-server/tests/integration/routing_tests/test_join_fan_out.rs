use cradle_core::{Envelope, Role};

use crate::integration::init_tracing;
use crate::utils::{TestPeer, test_lifecycle};

#[tokio::test]
async fn test_viewer_join_reaches_every_broadcaster_once() {
    init_tracing();

    let (lifecycle, _registry) = test_lifecycle();
    let mut b1 = TestPeer::joined(&lifecycle, "baby", Role::Broadcaster);
    let mut b2 = TestPeer::joined(&lifecycle, "baby", Role::Broadcaster);
    let mut v_old = TestPeer::joined(&lifecycle, "baby", Role::Viewer);
    b1.drain();
    b2.drain();

    let v_new = TestPeer::joined(&lifecycle, "baby", Role::Viewer);

    assert_eq!(b1.expect_one(), Envelope::viewer_joined(v_new.id()));
    assert_eq!(b2.expect_one(), Envelope::viewer_joined(v_new.id()));
    v_old.expect_nothing();
}

#[tokio::test]
async fn test_broadcaster_join_announces_nothing() {
    init_tracing();

    let (lifecycle, registry) = test_lifecycle();
    let mut v = TestPeer::joined(&lifecycle, "baby", Role::Viewer);
    let mut b = TestPeer::joined(&lifecycle, "baby", Role::Broadcaster);

    v.expect_nothing();
    b.expect_nothing();

    let room = registry.room("baby").expect("room should exist");
    assert_eq!(room.count(Role::Broadcaster), 1);
    assert_eq!(room.count(Role::Viewer), 1);
}

#[tokio::test]
async fn test_viewer_join_does_not_leak_across_rooms() {
    init_tracing();

    let (lifecycle, _registry) = test_lifecycle();
    let mut other_room = TestPeer::joined(&lifecycle, "nursery", Role::Broadcaster);
    let mut same_name_other_case = TestPeer::joined(&lifecycle, "Baby", Role::Broadcaster);

    TestPeer::joined(&lifecycle, "baby", Role::Viewer);

    other_room.expect_nothing();
    same_name_other_case.expect_nothing();
}
