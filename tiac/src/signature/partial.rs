//! Client-side unblinding of a partial blind signature.

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::{PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{
    dkg::{ParticipantId, VerificationKeyShare},
    error::CredentialError,
    serde_utils::ArkObjectBytes,
    setup::SignatureParams,
    signature::{blind::BlindSignature, request::BlindSignRequest},
};

/// An unblinded signature fragment `(h, s_m = h*(x_m + y_m*did))` from
/// authority `issuer`, already pairing-checked against its verification
/// key.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct PartialSignature<E: Pairing> {
    pub issuer: ParticipantId,
    #[serde_as(as = "ArkObjectBytes")]
    pub h: E::G1Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub s: E::G1Affine,
}

impl<E: Pairing> PartialSignature<E> {
    /// Strips the blinding mask `vk3 * o` off `cm` and checks
    /// `e(h, vk1 + vk2*did) == e(s_m, g2)` before accepting the fragment.
    pub fn new(
        blind_signature: &BlindSignature<E>,
        request: &BlindSignRequest<E>,
        verification_key: &VerificationKeyShare<E>,
        did: &E::ScalarField,
        o: &E::ScalarField,
        params: &SignatureParams<E>,
    ) -> Result<Self, CredentialError> {
        request.check_base_point()?;

        let s = (blind_signature.cm.into_group()
            - verification_key.vk3.mul_bigint(o.into_bigint()))
        .into_affine();

        let expected = verification_key.vk1.into_group()
            + verification_key.vk2.mul_bigint(did.into_bigint());
        let check = E::multi_pairing(
            [blind_signature.h.into_group(), -s.into_group()],
            [expected, params.g2.into_group()],
        );
        if !check.is_zero() {
            return Err(CredentialError::UnblindCheckFailed);
        }

        Ok(Self {
            issuer: blind_signature.issuer,
            h: blind_signature.h,
            s,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dkg::trusted_dealer;
    use ark_bls12_381::{Bls12_381, Fr};
    use ark_std::{
        rand::{rngs::StdRng, SeedableRng},
        UniformRand,
    };

    #[test]
    fn unblinding_strips_the_mask_and_passes_the_pairing_check() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let params = SignatureParams::<Bls12_381>::generate(&mut rng);
        let (_, keys) = trusted_dealer::keygen(&mut rng, 1, 2, &params).unwrap();
        let did = Fr::rand(&mut rng);

        let (request, o) = BlindSignRequest::new(&mut rng, &params, &did).unwrap();
        let blind_sig = BlindSignature::new(&request, &keys[0].signing, &params).unwrap();
        let partial = PartialSignature::new(
            &blind_sig,
            &request,
            &keys[0].verification,
            &did,
            &o,
            &params,
        )
        .unwrap();

        assert_eq!(
            partial.s.into_group(),
            request
                .h
                .mul_bigint((keys[0].signing.x + keys[0].signing.y * did).into_bigint())
        );
    }

    #[test]
    fn corrupted_fragment_fails_the_pairing_check() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let params = SignatureParams::<Bls12_381>::generate(&mut rng);
        let (_, keys) = trusted_dealer::keygen(&mut rng, 1, 2, &params).unwrap();
        let did = Fr::rand(&mut rng);

        let (request, o) = BlindSignRequest::new(&mut rng, &params, &did).unwrap();
        let mut blind_sig = BlindSignature::new(&request, &keys[0].signing, &params).unwrap();
        blind_sig.cm = (blind_sig.cm.into_group() + params.g1).into_affine();

        assert!(matches!(
            PartialSignature::new(
                &blind_sig,
                &request,
                &keys[0].verification,
                &did,
                &o,
                &params,
            ),
            Err(CredentialError::UnblindCheckFailed)
        ));
    }

    #[test]
    fn wrong_authority_key_fails_the_pairing_check() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let params = SignatureParams::<Bls12_381>::generate(&mut rng);
        let (_, keys) = trusted_dealer::keygen(&mut rng, 1, 2, &params).unwrap();
        let did = Fr::rand(&mut rng);

        let (request, o) = BlindSignRequest::new(&mut rng, &params, &did).unwrap();
        let blind_sig = BlindSignature::new(&request, &keys[0].signing, &params).unwrap();

        assert!(matches!(
            PartialSignature::new(
                &blind_sig,
                &request,
                &keys[1].verification,
                &did,
                &o,
                &params,
            ),
            Err(CredentialError::UnblindCheckFailed)
        ));
    }
}
