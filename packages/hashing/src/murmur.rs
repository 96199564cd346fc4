//! MurmurHash3 x86 32-bit
//!
//! Supplies the low half of the 64-bit beansdb key hash.

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

#[inline]
fn mix_block(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^ (h >> 16)
}

/// MurmurHash3_x86_32 of `data` with `seed`
#[must_use]
pub fn murmur3_32(data: &[u8], seed: u32) -> u32 {
    let mut blocks = data.chunks_exact(4);
    let mut h = seed;

    for block in blocks.by_ref() {
        let k = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        h ^= mix_block(k);
        h = h.rotate_left(13).wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let tail = blocks.remainder();
    if !tail.is_empty() {
        let k = tail
            .iter()
            .enumerate()
            .fold(0u32, |k, (i, &b)| k ^ (u32::from(b) << (8 * i)));
        h ^= mix_block(k);
    }

    // Lengths past u32::MAX wrap, as in the reference implementation.
    h ^= data.len() as u32;
    fmix32(h)
}

/// Seed-0 murmur3 as an unsigned value
#[must_use]
pub fn murmur(data: &[u8]) -> u32 {
    murmur3_32(data, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(murmur(b""), 0);
        assert_eq!(murmur(b"hello"), 0x248b_fa47);
        assert_eq!(murmur(b"foo") as i32, -156_908_512);
    }

    #[test]
    fn seed_changes_output() {
        assert_ne!(murmur3_32(b"hello", 0), murmur3_32(b"hello", 1));
        assert_eq!(murmur3_32(b"", 1), 0x514e_28b7);
    }

    #[test]
    fn every_tail_length_is_mixed() {
        let data = b"abcdefg";
        let hashes: Vec<u32> = (0..=data.len()).map(|n| murmur(&data[..n])).collect();
        for (i, a) in hashes.iter().enumerate() {
            for b in &hashes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
