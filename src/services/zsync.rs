//! zsync rolling-checksum primitive.
//!
//! When an instance enables `zsync_hashes`, the hashing subsystem emits a
//! 4-byte rsum per block so zsync clients can match local data against the
//! mirror. This is the zsync 0.6 flavor of the checksum: two 16-bit halves,
//! a plain byte sum and a position-weighted sum, both wrapping, serialized
//! big-endian.

/// Block lengths zsync can work with must divide evenly into this.
///
/// Instance validation enforces that `chunk_size` is a multiple of this
/// value whenever `zsync_hashes` is enabled.
pub const ZSYNC_BLOCK_ALIGNMENT: i64 = 4096;

/// Computes the zsync 0.6 rsum digest of one block.
///
/// Returns the two wrapping 16-bit halves in network byte order: the byte
/// sum first, then the weighted sum where the first byte of the block
/// carries the full block length as its weight and the last byte carries 1.
#[allow(clippy::cast_possible_truncation)]
pub fn rsum06(block: &[u8]) -> [u8; 4] {
    let mut a: u16 = 0;
    let mut b: u16 = 0;
    // All arithmetic is mod 2^16, the length included.
    let mut weight = block.len() as u16;

    for &byte in block {
        let value = u16::from(byte);
        a = a.wrapping_add(value);
        b = b.wrapping_add(weight.wrapping_mul(value));
        weight = weight.wrapping_sub(1);
    }

    let [a_hi, a_lo] = a.to_be_bytes();
    let [b_hi, b_lo] = b.to_be_bytes();
    [a_hi, a_lo, b_hi, b_lo]
}
