use rabe_bn::Fr;
use sha3::{
    Digest,
    Sha3_256
};
use error::BswabeError;
use std::ops::Mul;

/// Deterministic hash of an attribute name onto the group generated by
/// `g`, i.e. [`rabe-bn::G1`] or [`rabe-bn::G2`]. Binds key and ciphertext
/// material to the exact attribute string; no normalization is applied.
pub fn sha3_hash<T: Mul<Fr, Output = T>>(g: T, attribute: &str) -> Result<T, BswabeError> {
    let mut hasher = Sha3_256::new();
    hasher.update(attribute.as_bytes());
    match Fr::from_slice(&hasher.finalize()) {
        Ok(fr) => Ok(g * fr),
        Err(e) => Err(e.into())
    }
}
