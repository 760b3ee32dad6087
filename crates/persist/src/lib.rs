//! Durability layer for `proximadb` indexes.
//!
//! Two formats live here:
//!
//! - [`codec`]: the native binary dump. Compact little-endian layout with a
//!   magic tag, a format version, the full index configuration, every live
//!   (id, vector) pair, and a CRC32 trailer.
//! - [`snapshot`]: a portable JSON snapshot carrying the same observable
//!   state. Slower and larger, but readable without this crate.
//!
//! Both formats store vectors only. Graph structure is rebuilt by
//! reinserting entries in stored order.

#![warn(missing_docs)]

pub mod codec;
pub mod snapshot;

pub use codec::{read_index, write_index, IndexFile, DUMP_FORMAT_VERSION, DUMP_MAGIC};
pub use snapshot::{Snapshot, SnapshotEntry};
