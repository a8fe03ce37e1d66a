//! The `(Pickle, UnPickle)` serialization contract.
//!
//! The core never re-interprets the bytes a codec produces; it only stores
//! them (normal-tier files, favored-tier snapshots) and hands them back.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::QueueError;

/// A deterministic, total, round-trip-exact (de)serializer for `T`.
///
/// "Total on well-formed inputs" means `decode` must succeed for every byte
/// string previously produced by `encode` on the same codec; it may fail in
/// any other way it likes (corrupt file, truncated write) by returning
/// `QueueError::Codec`.
pub trait SeedCodec<T> {
    fn encode(&self, value: &T) -> Vec<u8>;
    fn decode(&self, bytes: &[u8]) -> Result<T, QueueError>;
}

/// The default codec: `bincode`'s fixed-width binary encoding over `serde`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl<T> SeedCodec<T> for BincodeCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &T) -> Vec<u8> {
        bincode::serialize(value).expect("bincode serialization of seed state is infallible")
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, QueueError> {
        bincode::deserialize(bytes).map_err(|e| QueueError::Codec(e.to_string()))
    }
}
