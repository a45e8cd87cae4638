mod peer_handle;

pub use peer_handle::*;
