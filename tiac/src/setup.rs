//! Pairing generators shared by every participant.

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{rand::RngCore, UniformRand};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::serde_utils::ArkObjectBytes;

/// Public parameters of the scheme: two independent generators of G1 and
/// one of G2. Created once, then shared read-only; the prime subgroup
/// order is the pairing engine's scalar field modulus.
///
/// `h1` is the second Pedersen base: its discrete log with respect to `g1`
/// must stay unknown, which sampling both uniformly guarantees.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct SignatureParams<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub g1: E::G1Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub h1: E::G1Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub g2: E::G2Affine,
}

impl<E: Pairing> SignatureParams<E> {
    /// Samples fresh uniform generators.
    pub fn generate<R: RngCore>(rng: &mut R) -> Self {
        let g1 = E::G1::rand(rng).into_affine();
        let g2 = E::G2::rand(rng).into_affine();
        let mut h1 = E::G1::rand(rng).into_affine();
        while h1.is_zero() || h1 == g1 {
            h1 = E::G1::rand(rng).into_affine();
        }

        Self { g1, h1, g2 }
    }

    /// Returns `true` if no generator is the identity and the two G1 bases
    /// are distinct. Deserialized parameters must pass this before use.
    pub fn is_valid(&self) -> bool {
        !self.g1.is_zero() && !self.h1.is_zero() && !self.g2.is_zero() && self.g1 != self.h1
    }
}
