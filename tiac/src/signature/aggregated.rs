//! Threshold aggregation of unblinded signature fragments.

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::{PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::vec::Vec;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{
    dkg::{MasterVerificationKey, ParticipantId},
    error::CredentialError,
    helpers::lagrange_basis_at_0_for_all,
    serde_utils::ArkObjectBytes,
    setup::SignatureParams,
    signature::partial::PartialSignature,
};

/// The aggregated credential `(h, s = h*(F(0) + G(0)*did))`, obtained by
/// Lagrange interpolation of the fragments' exponents at zero.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct Credential<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub h: E::G1Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub s: E::G1Affine,
}

impl<E: Pairing> Credential<E> {
    /// Interpolates at least `threshold + 1` fragments. All fragments
    /// must share the request's base point; the interpolation runs over
    /// the issuers' key evaluation points, so the fragment order does not
    /// matter as long as each stays paired with its issuer id.
    pub fn aggregate(
        partials: &[PartialSignature<E>],
        threshold: ParticipantId,
    ) -> Result<Self, CredentialError> {
        let expected = threshold as usize + 1;
        if partials.len() < expected {
            return Err(CredentialError::InsufficientShares {
                received: partials.len(),
                expected,
            });
        }
        let h = partials[0].h;
        for p in partials {
            if p.h != h {
                return Err(CredentialError::MismatchedBasePoint(p.issuer));
            }
        }

        let ids = partials.iter().map(|p| p.issuer).collect::<Vec<_>>();
        for (idx, id) in ids.iter().enumerate() {
            if ids[..idx].contains(id) {
                return Err(CredentialError::DuplicateIssuer(*id));
            }
        }
        let basis = lagrange_basis_at_0_for_all::<E::ScalarField>(ids)?
            .into_iter()
            .map(|l| l.into_bigint())
            .collect::<Vec<_>>();
        let fragments = partials.iter().map(|p| p.s).collect::<Vec<_>>();
        let s = E::G1::msm_bigint(&fragments, &basis).into_affine();

        Ok(Self { h, s })
    }

    /// Checks `e(h, α2 + β2*did) == e(s, g2)`. The presentation protocol
    /// makes this check in zero knowledge; this direct form is for the
    /// holder's own sanity checking.
    pub fn verify(
        &self,
        mvk: &MasterVerificationKey<E>,
        did: &E::ScalarField,
        params: &SignatureParams<E>,
    ) -> Result<(), CredentialError> {
        if self.h.is_zero() || self.s.is_zero() {
            return Err(CredentialError::ZeroSignature);
        }
        let check = E::multi_pairing(
            [self.h.into_group(), -self.s.into_group()],
            [
                mvk.alpha2.into_group() + mvk.beta2.mul_bigint(did.into_bigint()),
                params.g2.into_group(),
            ],
        );
        if check.is_zero() {
            Ok(())
        } else {
            Err(CredentialError::PairingCheckFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dkg::trusted_dealer,
        signature::{blind::BlindSignature, request::BlindSignRequest},
    };
    use ark_bls12_381::{Bls12_381, Fr};
    use ark_std::{
        rand::{rngs::StdRng, SeedableRng},
        UniformRand,
    };

    fn issue_partials(
        rng: &mut StdRng,
        threshold: u16,
        total: u16,
    ) -> (
        SignatureParams<Bls12_381>,
        MasterVerificationKey<Bls12_381>,
        Fr,
        Vec<PartialSignature<Bls12_381>>,
    ) {
        let params = SignatureParams::<Bls12_381>::generate(rng);
        let (mvk, keys) = trusted_dealer::keygen(rng, threshold, total, &params).unwrap();
        let did = Fr::rand(rng);

        let (request, o) = BlindSignRequest::new(rng, &params, &did).unwrap();
        let partials = keys
            .iter()
            .map(|k| {
                let blind = BlindSignature::new(&request, &k.signing, &params).unwrap();
                PartialSignature::new(&blind, &request, &k.verification, &did, &o, &params).unwrap()
            })
            .collect();

        (params, mvk, did, partials)
    }

    #[test]
    fn aggregate_of_enough_fragments_verifies() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let (params, mvk, did, partials) = issue_partials(&mut rng, 2, 5);

        let credential = Credential::aggregate(&partials[0..3], 2).unwrap();
        credential.verify(&mvk, &did, &params).unwrap();

        // A different subset produces the same credential
        let other = Credential::aggregate(&partials[2..5], 2).unwrap();
        assert_eq!(credential, other);
    }

    #[test]
    fn aggregation_is_order_invariant() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let (_, _, _, partials) = issue_partials(&mut rng, 2, 5);

        let forward = Credential::aggregate(&partials[0..3], 2).unwrap();
        let mut shuffled = partials[0..3].to_vec();
        shuffled.reverse();
        let backward = Credential::aggregate(&shuffled, 2).unwrap();

        assert_eq!(forward.s, backward.s);
    }

    #[test]
    fn too_few_fragments_are_refused() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let (_, _, _, partials) = issue_partials(&mut rng, 2, 5);

        assert!(matches!(
            Credential::aggregate(&partials[0..2], 2),
            Err(CredentialError::InsufficientShares {
                received: 2,
                expected: 3
            })
        ));
    }

    #[test]
    fn interpolating_at_the_wrong_points_breaks_the_credential() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let (params, mvk, did, partials) = issue_partials(&mut rng, 2, 5);

        // Shift every issuer id down by one, as if the committee had been
        // indexed from zero: interpolation then runs over the wrong
        // evaluation points and the pairing check must fail.
        let mut shifted = partials[1..4].to_vec();
        for p in &mut shifted {
            p.issuer -= 1;
        }
        let credential = Credential::aggregate(&shifted, 2).unwrap();
        assert!(matches!(
            credential.verify(&mvk, &did, &params),
            Err(CredentialError::PairingCheckFailed)
        ));
    }

    #[test]
    fn mismatched_base_points_are_refused() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let (params, _, _, partials) = issue_partials(&mut rng, 2, 5);

        let mut broken = partials[0..3].to_vec();
        broken[1].h = params.g1;
        assert!(matches!(
            Credential::aggregate(&broken, 2),
            Err(CredentialError::MismatchedBasePoint(_))
        ));
    }
}
