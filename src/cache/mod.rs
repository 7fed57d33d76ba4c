//! Cache Module
//!
//! The cache-aside core: serialization codec, expiration policy, and the
//! typed façade over the byte-oriented store.

pub mod codec;
mod facade;
mod policy;


// Re-export public types
pub use facade::CacheAside;
pub use policy::{CacheEntryPolicy, DEFAULT_ABSOLUTE_EXPIRATION, DEFAULT_SLIDING_EXPIRATION};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
