use cradle_core::{Envelope, Role};
use cradle_server::ConnectionState;

use crate::integration::init_tracing;
use crate::utils::{TestPeer, test_lifecycle};

#[tokio::test]
async fn test_double_close_notifies_once() {
    init_tracing();

    let (lifecycle, registry) = test_lifecycle();
    let mut b = TestPeer::joined(&lifecycle, "baby", Role::Broadcaster);
    let mut v = TestPeer::joined(&lifecycle, "baby", Role::Viewer);
    b.drain();

    v.close();
    assert_eq!(v.close(), 0);

    assert_eq!(b.expect_one(), Envelope::peer_left(v.id()));
    assert_eq!(v.session().state(), &ConnectionState::Closed);
    assert_eq!(registry.all_peers("baby").len(), 1);
}

#[tokio::test]
async fn test_removing_absent_peer_keeps_members() {
    init_tracing();

    let (lifecycle, registry) = test_lifecycle();
    let b = TestPeer::joined(&lifecycle, "baby", Role::Broadcaster);
    let v = TestPeer::joined(&lifecycle, "baby", Role::Viewer);
    let stranger = TestPeer::joined(&lifecycle, "nursery", Role::Viewer);

    assert!(!registry.remove_peer("baby", Role::Viewer, &stranger.id()));
    assert!(!registry.remove_peer("baby", Role::Broadcaster, &v.id()));
    assert!(!registry.remove_peer("ghost", Role::Viewer, &v.id()));

    let members = registry.all_peers("baby");
    assert_eq!(members.len(), 2);
    assert!(registry.find("baby", &b.id()).is_some());
    assert!(registry.find("baby", &v.id()).is_some());
}
