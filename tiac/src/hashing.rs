//! Deterministic maps from bytes into the groups and the scalar field.

use ark_ec::AffineRepr;
use ark_ff::PrimeField;
use ark_std::vec::Vec;
use digest::Digest;

/// Hashes bytes to a group element using try-and-increment: the digest of
/// `bytes` is interpreted as a candidate point and a little-endian counter
/// is appended until the interpretation succeeds. The result is multiplied
/// by the cofactor to land in the prime-order subgroup.
pub fn group_elem_from_try_and_incr<G: AffineRepr, D: Digest>(bytes: &[u8]) -> G::Group {
    let mut hash = D::digest(bytes);
    let mut g = G::from_random_bytes(&hash);
    let mut j = 1u64;
    while g.is_none() {
        let mut seeded = Vec::with_capacity(bytes.len() + 8);
        seeded.extend_from_slice(bytes);
        seeded.extend_from_slice(&j.to_le_bytes());
        hash = D::digest(&seeded);
        g = G::from_random_bytes(&hash);
        j += 1;
    }
    g.unwrap().mul_by_cofactor_to_group()
}

/// Digests bytes and interprets the digest as a big-endian integer reduced
/// into the scalar field.
pub fn field_elem_from_digest<F: PrimeField, D: Digest>(bytes: &[u8]) -> F {
    F::from_be_bytes_mod_order(&D::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::{Bls12_381, Fr};
    use ark_ec::pairing::Pairing;
    use ark_ff::Zero;
    use sha2::Sha512;

    type G1 = <Bls12_381 as Pairing>::G1Affine;

    #[test]
    fn hash_to_group_is_deterministic_and_input_sensitive() {
        let a = group_elem_from_try_and_incr::<G1, Sha512>(b"input");
        let b = group_elem_from_try_and_incr::<G1, Sha512>(b"input");
        let c = group_elem_from_try_and_incr::<G1, Sha512>(b"inpuu");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(!a.is_zero());
    }

    #[test]
    fn hash_to_field_is_deterministic_and_input_sensitive() {
        let a: Fr = field_elem_from_digest::<_, Sha512>(b"input");
        let b: Fr = field_elem_from_digest::<_, Sha512>(b"input");
        let c: Fr = field_elem_from_digest::<_, Sha512>(b"inpuu");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
