//! Client-side preparation of a blind-signing request.

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{rand::RngCore, vec::Vec, UniformRand};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use sha2::Sha512;
use zeroize::Zeroize;

use crate::{
    error::CredentialError, hashing::group_elem_from_try_and_incr, proof::RepresentationProof,
    serde_utils::ArkObjectBytes, setup::SignatureParams,
};

/// What the client sends to every authority: the identity commitment
/// `com_i = g1*o_i + h1*did`, the derived base point `h = H_G1(com_i)`,
/// the message commitment `com = g1*o + h*did`, and the proof that both
/// commitments open to the same DID.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct BlindSignRequest<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub com_i: E::G1Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub h: E::G1Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub com: E::G1Affine,
    pub proof: RepresentationProof<E::ScalarField>,
}

impl<E: Pairing> BlindSignRequest<E> {
    /// Builds the request for `did`. Returns the blinding factor `o`,
    /// which the client must keep private: it is needed for unblinding
    /// and presentation. The commitment randomness `o_i` is consumed by
    /// the proof and never leaves this function.
    pub fn new<R: RngCore>(
        rng: &mut R,
        params: &SignatureParams<E>,
        did: &E::ScalarField,
    ) -> Result<(Self, E::ScalarField), CredentialError> {
        let mut o_i = E::ScalarField::rand(rng);
        let o = E::ScalarField::rand(rng);

        let com_i = (params.g1.mul_bigint(o_i.into_bigint())
            + params.h1.mul_bigint(did.into_bigint()))
        .into_affine();
        let h = derive_base_point::<E>(&com_i)?;
        let com =
            (params.g1.mul_bigint(o.into_bigint()) + h.mul_bigint(did.into_bigint())).into_affine();

        let proof =
            RepresentationProof::new_for_issuance(rng, params, &h, &com, &com_i, &o_i, did, &o)?;
        o_i.zeroize();

        Ok((
            Self {
                com_i,
                h,
                com,
                proof,
            },
            o,
        ))
    }

    /// Re-derives the base point from `com_i` and checks the request's
    /// `h` against it. Every handoff re-validates this binding.
    pub fn check_base_point(&self) -> Result<(), CredentialError> {
        if derive_base_point::<E>(&self.com_i)? == self.h {
            Ok(())
        } else {
            Err(CredentialError::HashMismatch)
        }
    }
}

/// `H_G1` over the canonical encoding of the identity commitment.
pub(crate) fn derive_base_point<E: Pairing>(
    com_i: &E::G1Affine,
) -> Result<E::G1Affine, CredentialError> {
    let mut bytes = Vec::new();
    com_i.serialize_compressed(&mut bytes)?;
    Ok(group_elem_from_try_and_incr::<E::G1Affine, Sha512>(&bytes).into_affine())
}
