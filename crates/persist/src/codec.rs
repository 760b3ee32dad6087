//! Binary dump format for a full index state.
//!
//! Layout (little-endian):
//!
//! ```text
//! magic        [u8; 4]   "PXIX"
//! version      u16       DUMP_FORMAT_VERSION
//! index type   u8
//! method       u8
//! dims         u16
//! reserved     u16       zero
//! ef_search    u32       zero for FLAT
//! ef_construct u32       zero for FLAT
//! max_degree   u32       zero for FLAT
//! count        u64
//! entries      count x (id u64, dims x f32)
//! crc32        u32       over everything after the magic
//! ```
//!
//! The dump stores vectors only; graph topology is rebuilt on load by
//! re-inserting every entry in stored (ascending-id) order, which with the
//! engine's fixed level seed reproduces an equivalent graph.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use proxima_core::{DistanceMethod, Error, GraphContext, IndexType, Result};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Magic prefix of a dump file.
pub const DUMP_MAGIC: [u8; 4] = *b"PXIX";

/// Current dump format version.
pub const DUMP_FORMAT_VERSION: u16 = 1;

/// Parsed contents of a dump file.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexFile {
    /// Index algorithm family.
    pub index_type: IndexType,
    /// Distance method.
    pub method: DistanceMethod,
    /// Dimensionality.
    pub dims: u16,
    /// Tuning context (None for FLAT).
    pub context: Option<GraphContext>,
    /// Live entries in stored order.
    pub entries: Vec<(u64, Vec<f32>)>,
}

/// Serialize an index's full state to `path`.
///
/// `entries` must iterate in a deterministic order; the store's
/// ascending-id iteration satisfies this.
///
/// # Errors
/// - `FileIo` on any write failure
pub fn write_index<'a>(
    path: &Path,
    index_type: IndexType,
    method: DistanceMethod,
    dims: u16,
    context: Option<GraphContext>,
    entries: impl Iterator<Item = (u64, &'a [f32])>,
) -> Result<()> {
    let mut payload: Vec<u8> = Vec::new();
    payload.write_u16::<LittleEndian>(DUMP_FORMAT_VERSION)?;
    payload.write_u8(index_type.to_byte())?;
    payload.write_u8(method.to_byte())?;
    payload.write_u16::<LittleEndian>(dims)?;
    payload.write_u16::<LittleEndian>(0)?; // reserved
    let ctx = context.unwrap_or(GraphContext {
        ef_search: 0,
        ef_construct: 0,
        max_degree: 0,
    });
    payload.write_u32::<LittleEndian>(ctx.ef_search as u32)?;
    payload.write_u32::<LittleEndian>(ctx.ef_construct as u32)?;
    payload.write_u32::<LittleEndian>(ctx.max_degree as u32)?;

    let mut count: u64 = 0;
    let mut body: Vec<u8> = Vec::new();
    for (id, vector) in entries {
        body.write_u64::<LittleEndian>(id)?;
        for v in vector {
            body.write_f32::<LittleEndian>(*v)?;
        }
        count += 1;
    }
    payload.write_u64::<LittleEndian>(count)?;
    payload.extend_from_slice(&body);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&payload);
    let crc = hasher.finalize();

    let mut file: Vec<u8> = Vec::with_capacity(4 + payload.len() + 4);
    file.extend_from_slice(&DUMP_MAGIC);
    file.extend_from_slice(&payload);
    file.extend_from_slice(&crc.to_le_bytes());

    fs::write(path, &file)?;
    debug!(path = %path.display(), count, "index dumped");
    Ok(())
}

/// Read and validate a dump file.
///
/// # Errors
/// - `FileIo` if the file cannot be read
/// - `InvalidFile` on bad magic, unknown version/enum bytes, checksum
///   mismatch, or truncation
pub fn read_index(path: &Path) -> Result<IndexFile> {
    let bytes = fs::read(path)?;
    if bytes.len() < 4 + 2 + 1 + 1 + 2 + 2 + 12 + 8 + 4 {
        return Err(Error::InvalidFile("file too short".into()));
    }
    if bytes[..4] != DUMP_MAGIC {
        return Err(Error::InvalidFile("bad magic".into()));
    }

    let payload = &bytes[4..bytes.len() - 4];
    let mut crc_bytes = [0u8; 4];
    crc_bytes.copy_from_slice(&bytes[bytes.len() - 4..]);
    let stored_crc = u32::from_le_bytes(crc_bytes);
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(payload);
    if hasher.finalize() != stored_crc {
        return Err(Error::InvalidFile("checksum mismatch".into()));
    }

    let mut cursor = Cursor::new(payload);
    let version = cursor
        .read_u16::<LittleEndian>()
        .map_err(|_| Error::InvalidFile("truncated header".into()))?;
    if version != DUMP_FORMAT_VERSION {
        return Err(Error::InvalidFile(format!(
            "unsupported format version {}",
            version
        )));
    }
    let type_byte = cursor
        .read_u8()
        .map_err(|_| Error::InvalidFile("truncated header".into()))?;
    let index_type = IndexType::from_byte(type_byte)
        .ok_or_else(|| Error::InvalidFile(format!("unknown index type byte {}", type_byte)))?;
    let method_byte = cursor
        .read_u8()
        .map_err(|_| Error::InvalidFile("truncated header".into()))?;
    let method = DistanceMethod::from_byte(method_byte)
        .ok_or_else(|| Error::InvalidFile(format!("unknown method byte {}", method_byte)))?;
    let dims = cursor
        .read_u16::<LittleEndian>()
        .map_err(|_| Error::InvalidFile("truncated header".into()))?;
    if dims == 0 {
        return Err(Error::InvalidFile("zero dims".into()));
    }
    let _reserved = cursor
        .read_u16::<LittleEndian>()
        .map_err(|_| Error::InvalidFile("truncated header".into()))?;
    let ef_search = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| Error::InvalidFile("truncated header".into()))?;
    let ef_construct = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| Error::InvalidFile("truncated header".into()))?;
    let max_degree = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| Error::InvalidFile("truncated header".into()))?;
    let count = cursor
        .read_u64::<LittleEndian>()
        .map_err(|_| Error::InvalidFile("truncated header".into()))?;

    let context = if index_type.requires_context() {
        let ctx = GraphContext::new(ef_search as usize, ef_construct as usize, max_degree as usize);
        ctx.validate()
            .map_err(|_| Error::InvalidFile("invalid graph context".into()))?;
        Some(ctx)
    } else {
        None
    };

    let remaining = payload.len() as u64 - cursor.position();
    let entry_size = 8 + dims as u64 * 4;
    if remaining != count.checked_mul(entry_size).ok_or_else(|| {
        Error::InvalidFile("entry count overflow".into())
    })? {
        return Err(Error::InvalidFile(format!(
            "body size mismatch: {} bytes for {} entries of {}",
            remaining, count, entry_size
        )));
    }

    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let id = cursor
            .read_u64::<LittleEndian>()
            .map_err(|_| Error::InvalidFile("truncated entry".into()))?;
        let mut vector = Vec::with_capacity(dims as usize);
        for _ in 0..dims {
            vector.push(
                cursor
                    .read_f32::<LittleEndian>()
                    .map_err(|_| Error::InvalidFile("truncated entry".into()))?,
            );
        }
        entries.push((id, vector));
    }

    debug!(path = %path.display(), count, "index file read");
    Ok(IndexFile {
        index_type,
        method,
        dims,
        context,
        entries,
    })
}
