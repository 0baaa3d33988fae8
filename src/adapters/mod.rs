//! Adapter implementations for the port traits.
//!
//! Live adapters touch the real world; recording adapters wrap a live
//! adapter and capture every interaction to a cassette; replaying
//! adapters serve recorded interactions back without side effects.

pub mod live;
pub mod recording;
pub mod replaying;
