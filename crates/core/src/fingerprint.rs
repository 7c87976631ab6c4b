/// Compute the album fingerprint stored in `Albums.AlbumHash`.
///
/// Layout of the 64-bit value:
/// - bits 48..64: `(year << 4) + month`. The month is added, not or-ed, so a
///   month of 16 or more carries into the year bits.
/// - bits 0..48: the name folded into 64 bits by xor-ing each UTF-16 unit at
///   a shift of `(i * 8) % 64`, then masked to 48 bits.
///
/// Rendered as the high and low 32-bit halves in lowercase hex, each without
/// padding, so the token can be shorter than 16 characters.
pub fn album_fingerprint(name: &str, month: i32, year: i32) -> String {
    // Sign-extending casts keep negative inputs on the same bit pattern as a
    // 64-bit two's complement widening.
    let packed = ((year as i64 as u64) << 4).wrapping_add(month as i64 as u64);
    let mut hash = packed << 48;

    hash |= fold_name(name) & 0x0000_ffff_ffff_ffff;

    let high = (hash >> 32) as u32;
    let low = (hash & 0xffff_ffff) as u32;
    format!("{high:x}{low:x}")
}

/// Fold a string into 64 bits with 8-bit rotating placement.
/// Units whose indices differ by a multiple of 8 share a slot and can cancel.
fn fold_name(name: &str) -> u64 {
    let mut folded = 0u64;
    let mut shift = 0u32;
    for unit in name.encode_utf16() {
        folded ^= u64::from(unit) << shift;
        shift = (shift + 8) % 64;
    }
    folded
}
