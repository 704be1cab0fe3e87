//! Key material derived from the qualified set's commitments and shares.

use ark_ec::{pairing::Pairing, CurveGroup, VariableBaseMSM};
use ark_ff::{PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::vec::Vec;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    dkg::{dealing::Commitments, share::Share, ParticipantId},
    error::DkgError,
    helpers::powers,
    serde_utils::ArkObjectBytes,
};

/// Master verification key `(α2, β2, β1) = (g2*F(0), g2*G(0), g1*G(0))`
/// where `F` and `G` are the sums of the qualified authorities'
/// polynomials.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct MasterVerificationKey<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub alpha2: E::G2Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub beta2: E::G2Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub beta1: E::G1Affine,
}

impl<E: Pairing> MasterVerificationKey<E> {
    /// Aggregates the constant-term commitments of every qualified
    /// authority.
    pub fn new(qualified: &[Commitments<E>]) -> Result<Self, DkgError> {
        if qualified.is_empty() {
            return Err(DkgError::NoContributions);
        }
        let alpha2 = qualified
            .iter()
            .fold(E::G2::zero(), |acc, c| acc + c.v_x[0]);
        let beta2 = qualified
            .iter()
            .fold(E::G2::zero(), |acc, c| acc + c.v_y[0]);
        let beta1 = qualified
            .iter()
            .fold(E::G1::zero(), |acc, c| acc + c.v_y_prime[0]);

        Ok(Self {
            alpha2: alpha2.into_affine(),
            beta2: beta2.into_affine(),
            beta1: beta1.into_affine(),
        })
    }
}

/// One authority's signing key `(x_i, y_i) = (F(i), G(i))`, the sums of
/// the qualified dealings received by participant `i`.
#[serde_as]
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Zeroize,
    ZeroizeOnDrop,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
)]
pub struct SigningKeyShare<F: PrimeField> {
    #[zeroize(skip)]
    pub id: ParticipantId,
    #[serde_as(as = "ArkObjectBytes")]
    pub x: F,
    #[serde_as(as = "ArkObjectBytes")]
    pub y: F,
}

impl<F: PrimeField> SigningKeyShare<F> {
    /// Sums the verified shares received from every qualified authority.
    /// All shares must be addressed to `id`.
    pub fn new(id: ParticipantId, qualified_shares: &[Share<F>]) -> Result<Self, DkgError> {
        if id == 0 {
            return Err(DkgError::ParticipantIdCantBeZero);
        }
        if qualified_shares.is_empty() {
            return Err(DkgError::NoContributions);
        }
        let (mut x, mut y) = (F::zero(), F::zero());
        for share in qualified_shares {
            if share.id != id {
                return Err(DkgError::UnequalParticipantAndShareId(id, share.id));
            }
            x += share.f;
            y += share.g;
        }

        Ok(Self { id, x, y })
    }
}

/// One authority's public verification key
/// `(vk1, vk2, vk3) = (g2*F(i), g2*G(i), g1*G(i))`, computed from the
/// qualified set's commitments alone.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct VerificationKeyShare<E: Pairing> {
    pub id: ParticipantId,
    #[serde_as(as = "ArkObjectBytes")]
    pub vk1: E::G2Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub vk2: E::G2Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub vk3: E::G1Affine,
}

impl<E: Pairing> VerificationKeyShare<E> {
    /// Evaluates every qualified authority's committed polynomials at `id`
    /// in the exponent and multiplies the results.
    pub fn new(
        id: ParticipantId,
        qualified: &[Commitments<E>],
        threshold: ParticipantId,
    ) -> Result<Self, DkgError> {
        if id == 0 {
            return Err(DkgError::ParticipantIdCantBeZero);
        }
        if qualified.is_empty() {
            return Err(DkgError::NoContributions);
        }
        let id_powers = powers(&E::ScalarField::from(id as u64), threshold as usize + 1);

        let (mut vk1, mut vk2) = (E::G2::zero(), E::G2::zero());
        let mut vk3 = E::G1::zero();
        for comms in qualified {
            if !comms.supports_threshold(threshold) {
                return Err(DkgError::InvalidCommitmentLength {
                    received: comms.v_x.len(),
                    expected: threshold as usize + 1,
                });
            }
            vk1 += E::G2::msm_unchecked(&comms.v_x, &id_powers);
            vk2 += E::G2::msm_unchecked(&comms.v_y, &id_powers);
            vk3 += E::G1::msm_unchecked(&comms.v_y_prime, &id_powers);
        }

        Ok(Self {
            id,
            vk1: vk1.into_affine(),
            vk2: vk2.into_affine(),
            vk3: vk3.into_affine(),
        })
    }
}

/// Everything one authority holds after key generation.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct AuthorityKeys<E: Pairing> {
    pub signing: SigningKeyShare<E::ScalarField>,
    pub verification: VerificationKeyShare<E>,
}
