//! Credential presentation: re-randomization plus a proof of
//! representation binding the DID.

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::{One, PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use ark_std::{rand::RngCore, vec::Vec, UniformRand};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use sha2::Sha512;

use crate::{
    dkg::MasterVerificationKey,
    error::CredentialError,
    hashing::field_elem_from_digest,
    proof::RepresentationProof,
    serde_utils::ArkObjectBytes,
    setup::SignatureParams,
    signature::aggregated::Credential,
};

/// What the holder shows to a verifier: the re-randomized signature
/// `σ' = (h*r', s*r' + h*r'*r)`, the binding element
/// `k = α2 + β2*did + g2*r`, and the proof of knowledge of
/// `(r, did, o)` tying `k` to the issuance commitment.
///
/// The verifier additionally needs the issuance commitment `com` and the
/// credential's base point `h`; those travel with the presentation
/// context, not inside it, so that `σ'` and `k` alone stay unlinkable
/// between showings.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct Presentation<E: Pairing> {
    pub sigma: Credential<E>,
    #[serde_as(as = "ArkObjectBytes")]
    pub k: E::G2Affine,
    pub proof: RepresentationProof<E::ScalarField>,
}

impl<E: Pairing> Presentation<E> {
    /// Re-randomizes `credential` and proves the representation of `k`
    /// and `com`. The randomizers never leave this function; `o` is the
    /// blinding returned by the blind-signing request.
    pub fn new<R: RngCore>(
        rng: &mut R,
        credential: &Credential<E>,
        com: &E::G1Affine,
        mvk: &MasterVerificationKey<E>,
        params: &SignatureParams<E>,
        did: &E::ScalarField,
        o: &E::ScalarField,
    ) -> Result<Self, CredentialError> {
        let r = E::ScalarField::rand(rng);
        let r_prime = E::ScalarField::rand(rng);

        // s'' = s*r' + h''*r with h'' = h*r', so h''*r = h*(r'*r)
        let h_rand = credential.h.mul_bigint(r_prime.into_bigint());
        let s_rand = credential.s.mul_bigint(r_prime.into_bigint())
            + credential.h.mul_bigint((r_prime * r).into_bigint());
        let k = (mvk.alpha2.into_group()
            + mvk.beta2.mul_bigint(did.into_bigint())
            + params.g2.mul_bigint(r.into_bigint()))
        .into_affine();

        let rho1 = E::ScalarField::rand(rng);
        let rho2 = E::ScalarField::rand(rng);
        let rho3 = E::ScalarField::rand(rng);

        let k_t = (params.g2.mul_bigint(rho1.into_bigint())
            + mvk.alpha2
            + mvk.beta2.mul_bigint(rho2.into_bigint()))
        .into_affine();
        let com_t = (params.g1.mul_bigint(rho3.into_bigint())
            + credential.h.mul_bigint(rho2.into_bigint()))
        .into_affine();

        let c = challenge(params, &credential.h, com, &com_t, &k, &k_t)?;

        Ok(Self {
            sigma: Credential {
                h: h_rand.into_affine(),
                s: s_rand.into_affine(),
            },
            k,
            proof: RepresentationProof {
                c,
                s1: rho1 - c * r,
                s2: rho2 - c * did,
                s3: rho3 - c * o,
            },
        })
    }

    /// The full verifier: the pairing equation `e(h'', k) == e(s'', g2)`
    /// over the re-randomized signature, then the proof of
    /// representation against the issuance commitment `com` and the
    /// credential's base point `h`.
    pub fn verify(
        &self,
        com: &E::G1Affine,
        h: &E::G1Affine,
        mvk: &MasterVerificationKey<E>,
        params: &SignatureParams<E>,
    ) -> Result<(), CredentialError> {
        if self.sigma.h.is_zero() || self.sigma.s.is_zero() {
            return Err(CredentialError::ZeroSignature);
        }
        let paired = E::multi_pairing(
            [self.sigma.h.into_group(), -self.sigma.s.into_group()],
            [self.k.into_group(), params.g2.into_group()],
        );
        if !paired.is_zero() {
            return Err(CredentialError::PairingCheckFailed);
        }

        let RepresentationProof { c, s1, s2, s3 } = &self.proof;
        let one_minus_c = E::ScalarField::one() - c;

        let k_t = (params.g2.mul_bigint(s1.into_bigint())
            + mvk.alpha2.mul_bigint(one_minus_c.into_bigint())
            + self.k.mul_bigint(c.into_bigint())
            + mvk.beta2.mul_bigint(s2.into_bigint()))
        .into_affine();
        let com_t = (params.g1.mul_bigint(s3.into_bigint())
            + h.mul_bigint(s2.into_bigint())
            + com.mul_bigint(c.into_bigint()))
        .into_affine();

        if challenge(params, h, com, &com_t, &self.k, &k_t)? == *c {
            Ok(())
        } else {
            Err(CredentialError::KorRejected)
        }
    }
}

/// `H(g1 || g2 || h || com || com' || k || k')` reduced into the scalar
/// field. One code path for prover and verifier.
fn challenge<E: Pairing>(
    params: &SignatureParams<E>,
    h: &E::G1Affine,
    com: &E::G1Affine,
    com_t: &E::G1Affine,
    k: &E::G2Affine,
    k_t: &E::G2Affine,
) -> Result<E::ScalarField, SerializationError> {
    let mut bytes = Vec::new();
    params.g1.serialize_compressed(&mut bytes)?;
    params.g2.serialize_compressed(&mut bytes)?;
    h.serialize_compressed(&mut bytes)?;
    com.serialize_compressed(&mut bytes)?;
    com_t.serialize_compressed(&mut bytes)?;
    k.serialize_compressed(&mut bytes)?;
    k_t.serialize_compressed(&mut bytes)?;

    Ok(field_elem_from_digest::<_, Sha512>(&bytes))
}
