//! Per-authority partial blind signing.

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{
    dkg::{ParticipantId, SigningKeyShare},
    error::CredentialError,
    serde_utils::ArkObjectBytes,
    setup::SignatureParams,
    signature::request::BlindSignRequest,
};

/// A partial blind signature `(h, cm = h*x_m + com*y_m)` from authority
/// `issuer`. `cm` is still masked by the client's blinding of `com`.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct BlindSignature<E: Pairing> {
    pub issuer: ParticipantId,
    #[serde_as(as = "ArkObjectBytes")]
    pub h: E::G1Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub cm: E::G1Affine,
}

impl<E: Pairing> BlindSignature<E> {
    /// Signs a request after checking its proof of representation and the
    /// base-point binding. Both failures are terminal: a request that
    /// fails here is malformed or forged, never retryable.
    pub fn new(
        request: &BlindSignRequest<E>,
        signing_key: &SigningKeyShare<E::ScalarField>,
        params: &SignatureParams<E>,
    ) -> Result<Self, CredentialError> {
        request
            .proof
            .verify_issuance(params, &request.h, &request.com, &request.com_i)?;
        request.check_base_point()?;

        let cm = (request.h.mul_bigint(signing_key.x.into_bigint())
            + request.com.mul_bigint(signing_key.y.into_bigint()))
        .into_affine();

        Ok(Self {
            issuer: signing_key.id,
            h: request.h,
            cm,
        })
    }
}
