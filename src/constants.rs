//! Format constants and limits.

// ============================================================================
// Limits
// ============================================================================

/// Maximum nesting depth accepted by the decoder, encoder and key-path
/// operations. Deeper input fails with a depth error instead of exhausting
/// the stack.
pub const MAX_DEPTH: usize = 64;

// ============================================================================
// Metainfo layout (BEP-3)
// ============================================================================

/// Length of a SHA1 digest in bytes (info hash and per-piece hash).
pub const SHA1_LEN: usize = 20;

/// Key of the info dictionary inside a torrent's root dictionary.
pub const INFO_KEY: &str = "info";

/// Key of the announce-list tiers ([BEP-12](http://bittorrent.org/beps/bep_0012.html)).
pub const ANNOUNCE_LIST_KEY: &str = "announce-list";

/// Separator used when rendering and parsing key-paths on the command line.
pub const KEY_PATH_SEPARATOR: char = '/';
