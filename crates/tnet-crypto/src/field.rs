//! # Field Helpers
//!
//! The proof system's native field is the BN254 scalar field. Witness values
//! in this stack are small non-negative integers (token counts, card codes,
//! ranks); these helpers coerce them into and out of field elements and
//! provide the hex exchange encoding for roots and proof blobs.

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use tnet_core::error::TnetError;

/// The BN254 scalar field — every constraint in the stack is over this field.
pub use ark_bn254::Fr;

/// Recover a small integer from a field element.
///
/// Only meaningful for values known to fit 64 bits (token counts, card
/// codes, scores); the caller is responsible for having range-bounded the
/// element first. Higher limbs are ignored.
pub fn fr_to_u64(value: &Fr) -> u64 {
    use ark_ff::PrimeField;
    value.into_bigint().0[0]
}

/// Hex-encode a field element (compressed little-endian form).
pub fn fr_to_hex(value: &Fr) -> String {
    let mut bytes = Vec::new();
    // Serialization into a Vec cannot fail.
    let _ = value.serialize_compressed(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a field element from its hex exchange encoding.
pub fn fr_from_hex(hex: &str) -> Result<Fr, TnetError> {
    let hex = hex.trim();
    if hex.len() % 2 != 0 {
        return Err(TnetError::Serialization(format!(
            "odd-length hex field element: {} chars",
            hex.len()
        )));
    }
    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for i in (0..hex.len()).step_by(2) {
        let byte = u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|e| TnetError::Serialization(format!("invalid hex at {i}: {e}")))?;
        bytes.push(byte);
    }
    Fr::deserialize_compressed(&bytes[..])
        .map_err(|e| TnetError::Serialization(format!("invalid field element: {e}")))
}
