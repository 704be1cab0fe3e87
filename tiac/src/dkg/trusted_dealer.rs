//! Dealer-based key generation.
//!
//! A single trusted dealer samples the master polynomial pair and hands
//! every authority its key material directly. Produces exactly the key
//! shapes of the distributed protocol (it is the qualified-set-of-one
//! case), so the rest of the pipeline cannot tell the difference. Meant
//! for tests, benchmarks and single-operator deployments.

use ark_ec::pairing::Pairing;
use ark_std::{cfg_into_iter, rand::RngCore, vec::Vec};

use crate::{
    dkg::{
        dealing::{Commitments, Polynomials},
        keys::{AuthorityKeys, MasterVerificationKey, SigningKeyShare, VerificationKeyShare},
        ParticipantId,
    },
    error::DkgError,
    setup::SignatureParams,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Deals key material for `total` authorities with reconstruction
/// possible from any `threshold + 1` of them.
pub fn keygen<R: RngCore, E: Pairing>(
    rng: &mut R,
    threshold: ParticipantId,
    total: ParticipantId,
    params: &SignatureParams<E>,
) -> Result<(MasterVerificationKey<E>, Vec<AuthorityKeys<E>>), DkgError> {
    if threshold < 1 || total <= threshold {
        return Err(DkgError::InvalidThresholdOrTotal(threshold, total));
    }

    let polynomials = Polynomials::<E::ScalarField>::rand(rng, threshold);
    let commitments = Commitments::new(&polynomials, params);
    let mvk = MasterVerificationKey::new(core::slice::from_ref(&commitments))?;

    let shares = (1..=total)
        .map(|i| polynomials.share_for(i, threshold))
        .collect::<Result<Vec<_>, _>>()?;

    let authority_keys = cfg_into_iter!(shares)
        .map(|share| {
            let id = share.id;
            Ok(AuthorityKeys {
                signing: SigningKeyShare::new(id, core::slice::from_ref(&share))?,
                verification: VerificationKeyShare::new(
                    id,
                    core::slice::from_ref(&commitments),
                    threshold,
                )?,
            })
        })
        .collect::<Result<Vec<_>, DkgError>>()?;

    Ok((mvk, authority_keys))
}
