//! # Protocol Configuration & Constants
//!
//! Every magic number in the stack lives here. If you're hardcoding a
//! constant somewhere else, you're doing it wrong.
//!
//! Most of these are not tunable in any meaningful sense: the Keccak tables
//! and sizes are fixed by FIPS 202, the encodings by NIST SP 800-185, and the
//! curve by the E521 definition. Change one and every cryptogram ever written
//! stops decrypting.

// ---------------------------------------------------------------------------
// Keccak / Sponge
// ---------------------------------------------------------------------------

/// Width of the Keccak-p[1600] state in bytes.
pub const STATE_BYTES: usize = 200;

/// Number of 64-bit lanes in the state (5 x 5).
pub const STATE_LANES: usize = 25;

/// Rounds of Keccak-p[1600, n_r]. We run the full Keccak-f, i.e. 24.
pub const KECCAK_ROUNDS: usize = 24;

/// Capacity in bytes for the 256-bit security level (c = 512 bits).
pub const CAPACITY_BYTES: usize = 64;

/// Rate in bytes for SHAKE256 / cSHAKE256 / KMACXOF256: 1088 bits.
/// Every sponge this crate builds uses it, whatever the requested output
/// length.
pub const RATE_BYTES: usize = STATE_BYTES - CAPACITY_BYTES;

/// Domain suffix for cSHAKE (and therefore KMAC): `00` plus the first pad bit.
pub const CSHAKE_SUFFIX: u8 = 0x04;

/// Domain suffix for plain SHAKE: `1111` plus the first pad bit.
pub const SHAKE_SUFFIX: u8 = 0x1F;

/// Final padding bit, XORed into the last byte of the rate window.
pub const PAD_FINAL_BIT: u8 = 0x80;

/// Function-name string that turns cSHAKE256 into KMAC.
pub const KMAC_FUNCTION_NAME: &[u8] = b"KMAC";

// ---------------------------------------------------------------------------
// Protocol lengths
// ---------------------------------------------------------------------------

/// Random salt `z` of a symmetric cryptogram: 512 bits.
pub const SALT_BYTES: usize = 64;

/// Ephemeral nonce drawn for public-key encryption: 512 bits.
pub const NONCE_BYTES: usize = 64;

/// Authentication tags, digests, MACs and signature challenges: 512 bits.
pub const TAG_BITS: usize = 512;

/// [`TAG_BITS`] in bytes.
pub const TAG_BYTES: usize = TAG_BITS / 8;

/// Output of the `ke || ka` key derivation: two 512-bit keys.
pub const KEY_PAIR_BITS: usize = 1024;

/// Length of each of `ke` and `ka`.
pub const SUBKEY_BYTES: usize = KEY_PAIR_BITS / 16;

// ---------------------------------------------------------------------------
// Customization strings
// ---------------------------------------------------------------------------

/// Plain hash: `KMACXOF256("", m, 512, "D")`.
pub const CUSTOM_DIGEST: &[u8] = b"D";

/// MAC tag and Schnorr challenge: `KMACXOF256(k, m, 512, "T")`.
pub const CUSTOM_TAG: &[u8] = b"T";

/// Private scalar derivation from a passphrase.
pub const CUSTOM_KEYGEN: &[u8] = b"K";

/// Deterministic Schnorr nonce derivation.
pub const CUSTOM_NONCE: &[u8] = b"N";

/// Symmetric `ke || ka` derivation.
pub const CUSTOM_SYM_KDF: &[u8] = b"S";

/// Symmetric keystream.
pub const CUSTOM_SYM_ENC: &[u8] = b"SKE";

/// Symmetric authentication tag.
pub const CUSTOM_SYM_AUTH: &[u8] = b"SKA";

/// Public-key `ke || ka` derivation.
pub const CUSTOM_PK_KDF: &[u8] = b"P";

/// Public-key keystream.
pub const CUSTOM_PK_ENC: &[u8] = b"PKE";

/// Public-key authentication tag.
pub const CUSTOM_PK_AUTH: &[u8] = b"PKA";

// ---------------------------------------------------------------------------
// E521
// ---------------------------------------------------------------------------

/// `p = 2^P_EXPONENT - 1`, the Mersenne prime defining the base field.
pub const P_EXPONENT: usize = 521;

/// Magnitude of the curve coefficient: `d = -CURVE_D_MAGNITUDE`.
pub const CURVE_D_MAGNITUDE: u32 = 376_014;

/// `r = 2^R_EXPONENT - R_OFFSET` is the prime order of the base point.
pub const R_EXPONENT: usize = 519;

/// Decimal offset subtracted from `2^519` to get `r`.
pub const R_OFFSET_DECIMAL: &str =
    "337554763258501705789107630418782636071904961214051226618635150085779108655765";

/// Number of points on E521 is `COFACTOR * r`.
pub const COFACTOR: u32 = 4;

/// x-coordinate of the canonical generator `G`.
pub const BASE_POINT_X: u32 = 4;

/// Crate version, assembled at compile time.
pub const PROTOCOL_VERSION: &str = env!("CARGO_PKG_VERSION");
