//! Kubernetes pod feed: client construction, `Pod` decoding and watch demultiplexing.

pub mod client;
pub mod demux;
pub mod feed;
pub mod mapping;

pub use client::{ClientOptions, connect};
pub use demux::PodEventDemux;
pub use feed::{KubeLifecycleFeed, WatchScope};
pub use mapping::{DecodeError, decode_pod};
