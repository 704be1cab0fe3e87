//! Private shares and their verification against the dealer's commitments.

use ark_ec::{pairing::Pairing, AffineRepr, VariableBaseMSM};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    dkg::{dealing::Commitments, ParticipantId},
    error::DkgError,
    helpers::powers,
    serde_utils::ArkObjectBytes,
    setup::SignatureParams,
};

/// The private dealing from one authority to participant `id`:
/// `(F(id), G(id))`.
#[serde_as]
#[derive(
    Default,
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
pub struct Share<F: PrimeField> {
    #[zeroize(skip)]
    pub id: ParticipantId,
    #[zeroize(skip)]
    pub threshold: ParticipantId,
    #[serde_as(as = "ArkObjectBytes")]
    pub f: F,
    #[serde_as(as = "ArkObjectBytes")]
    pub g: F,
}

impl<F: PrimeField> Share<F> {
    /// Executed by the receiving participant: checks all three relations
    ///
    /// - `g2 * F(id) == \sum_{j} V_x[j] * id^j`
    /// - `g2 * G(id) == \sum_{j} V_y[j] * id^j`
    /// - `g1 * G(id) == \sum_{j} V_y'[j] * id^j`
    ///
    /// against the dealer's published commitments.
    pub fn verify<E: Pairing<ScalarField = F>>(
        &self,
        commitments: &Commitments<E>,
        params: &SignatureParams<E>,
    ) -> Result<(), DkgError> {
        if self.id == 0 {
            return Err(DkgError::ParticipantIdCantBeZero);
        }
        if !commitments.supports_threshold(self.threshold) {
            return Err(DkgError::InvalidCommitmentLength {
                received: commitments.v_x.len(),
                expected: self.threshold as usize + 1,
            });
        }
        let id_powers = powers(&F::from(self.id as u64), self.threshold as usize + 1);

        if E::G2::msm_unchecked(&commitments.v_x, &id_powers)
            != params.g2.mul_bigint(self.f.into_bigint())
        {
            return Err(DkgError::InvalidShare);
        }
        if E::G2::msm_unchecked(&commitments.v_y, &id_powers)
            != params.g2.mul_bigint(self.g.into_bigint())
        {
            return Err(DkgError::InvalidShare);
        }
        if E::G1::msm_unchecked(&commitments.v_y_prime, &id_powers)
            != params.g1.mul_bigint(self.g.into_bigint())
        {
            return Err(DkgError::InvalidShare);
        }
        Ok(())
    }
}
