//! # Keccak-p[1600, 24]
//!
//! The permutation underneath every hash, MAC and keystream in this crate.
//! It works on 25 lanes of 64 bits; the byte form reads the 200-byte state as
//! little-endian lanes and writes it back the same way.
//!
//! Each round applies θ, ρ, π, χ and ι. ρ and π are fused into a single walk
//! over the lanes driven by [`ROTATION_OFFSETS`] and [`PI_LANES`], the compact
//! formulation used by most small Keccak implementations.
//!
//! The three tables below are bit-exact FIPS 202 constants. A single flipped
//! bit in any of them silently changes every output.

use crate::config::{KECCAK_ROUNDS, STATE_BYTES, STATE_LANES};

/// ι round constants, one per round.
pub const ROUND_CONSTANTS: [u64; KECCAK_ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808a,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808b,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008a,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000a,
    0x0000_0000_8000_808b,
    0x8000_0000_0000_008b,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800a,
    0x8000_0000_8000_000a,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// ρ rotation amounts, in the order the π walk visits the lanes.
pub const ROTATION_OFFSETS: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// π destination lane for each step of the walk starting from lane 1.
pub const PI_LANES: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Apply Keccak-f[1600] (all 24 rounds) to the lane representation.
pub fn keccak_f1600(lanes: &mut [u64; STATE_LANES]) {
    let mut column = [0u64; 5];

    for round_constant in ROUND_CONSTANTS {
        // θ
        for (x, parity) in column.iter_mut().enumerate() {
            *parity = lanes[x] ^ lanes[x + 5] ^ lanes[x + 10] ^ lanes[x + 15] ^ lanes[x + 20];
        }
        for x in 0..5 {
            let t = column[(x + 4) % 5] ^ column[(x + 1) % 5].rotate_left(1);
            for y in (0..STATE_LANES).step_by(5) {
                lanes[y + x] ^= t;
            }
        }

        // ρ and π
        let mut carried = lanes[1];
        for (&dest, &offset) in PI_LANES.iter().zip(ROTATION_OFFSETS.iter()) {
            let displaced = lanes[dest];
            lanes[dest] = carried.rotate_left(offset);
            carried = displaced;
        }

        // χ
        for y in (0..STATE_LANES).step_by(5) {
            column.copy_from_slice(&lanes[y..y + 5]);
            for x in 0..5 {
                lanes[y + x] ^= !column[(x + 1) % 5] & column[(x + 2) % 5];
            }
        }

        // ι
        lanes[0] ^= round_constant;
    }
}

/// Apply Keccak-p[1600, 24] in place to a 200-byte state.
///
/// Pure function of the state: the same 200 bytes in always give the same
/// 200 bytes out.
pub fn keccak_p1600(state: &mut [u8; STATE_BYTES]) {
    let mut lanes = [0u64; STATE_LANES];
    for (lane, chunk) in lanes.iter_mut().zip(state.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *lane = u64::from_le_bytes(word);
    }

    keccak_f1600(&mut lanes);

    for (chunk, lane) in state.chunks_exact_mut(8).zip(lanes.iter()) {
        chunk.copy_from_slice(&lane.to_le_bytes());
    }
}
