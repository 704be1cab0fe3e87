//! Proof that a blind-signing request is well-formed: knowledge of
//! `(o_i, did, o)` such that `com_i = g1*o_i + h1*did` and
//! `com = g1*o + h*did`.

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalSerialize, SerializationError};
use ark_std::{rand::RngCore, vec::Vec, UniformRand};
use sha2::Sha512;

use crate::{
    error::CredentialError, hashing::field_elem_from_digest, proof::RepresentationProof,
    setup::SignatureParams,
};

impl<F: PrimeField> RepresentationProof<F> {
    /// Client side of the issuance statement.
    pub fn new_for_issuance<E: Pairing<ScalarField = F>, R: RngCore>(
        rng: &mut R,
        params: &SignatureParams<E>,
        h: &E::G1Affine,
        com: &E::G1Affine,
        com_i: &E::G1Affine,
        o_i: &F,
        did: &F,
        o: &F,
    ) -> Result<Self, CredentialError> {
        let r1 = F::rand(rng);
        let r2 = F::rand(rng);
        let r3 = F::rand(rng);

        let com_i_t = (params.g1.mul_bigint(r1.into_bigint())
            + params.h1.mul_bigint(r2.into_bigint()))
        .into_affine();
        let com_t =
            (params.g1.mul_bigint(r3.into_bigint()) + h.mul_bigint(r2.into_bigint())).into_affine();

        let c = challenge(params, h, com, &com_t, com_i, &com_i_t)?;

        Ok(Self {
            c,
            s1: r1 - c * o_i,
            s2: r2 - c * did,
            s3: r3 - c * o,
        })
    }

    /// Authority side: reconstructs the prover's commitments from the
    /// responses and recomputes the challenge.
    pub fn verify_issuance<E: Pairing<ScalarField = F>>(
        &self,
        params: &SignatureParams<E>,
        h: &E::G1Affine,
        com: &E::G1Affine,
        com_i: &E::G1Affine,
    ) -> Result<(), CredentialError> {
        let com_i_t = (params.g1.mul_bigint(self.s1.into_bigint())
            + params.h1.mul_bigint(self.s2.into_bigint())
            + com_i.mul_bigint(self.c.into_bigint()))
        .into_affine();
        let com_t = (params.g1.mul_bigint(self.s3.into_bigint())
            + h.mul_bigint(self.s2.into_bigint())
            + com.mul_bigint(self.c.into_bigint()))
        .into_affine();

        let c = challenge(params, h, com, &com_t, com_i, &com_i_t)?;
        if c == self.c {
            Ok(())
        } else {
            Err(CredentialError::KorRejected)
        }
    }
}

/// `H(g1 || h || h1 || com || com' || com_i || com_i')` reduced into the
/// scalar field. One code path for prover and verifier.
fn challenge<E: Pairing>(
    params: &SignatureParams<E>,
    h: &E::G1Affine,
    com: &E::G1Affine,
    com_t: &E::G1Affine,
    com_i: &E::G1Affine,
    com_i_t: &E::G1Affine,
) -> Result<E::ScalarField, SerializationError> {
    let mut bytes = Vec::new();
    params.g1.serialize_compressed(&mut bytes)?;
    h.serialize_compressed(&mut bytes)?;
    params.h1.serialize_compressed(&mut bytes)?;
    com.serialize_compressed(&mut bytes)?;
    com_t.serialize_compressed(&mut bytes)?;
    com_i.serialize_compressed(&mut bytes)?;
    com_i_t.serialize_compressed(&mut bytes)?;

    Ok(field_elem_from_digest::<_, Sha512>(&bytes))
}
