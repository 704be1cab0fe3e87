//! Decentralized identifiers bound to a secret scalar.

use alloc::string::{String, ToString};
use ark_ff::PrimeField;
use ark_std::{rand::RngCore, vec::Vec, UniformRand};
use digest::Digest;
use sha2::Sha512;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CredentialError;

/// A holder identity: the secret scalar `x` and the public identifier
/// `sha512_hex(user_id || decimal(x))`.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Did<F: PrimeField> {
    pub x: F,
    #[zeroize(skip)]
    pub did: String,
}

impl<F: PrimeField> Did<F> {
    /// Derives a fresh identity for `user_id`.
    pub fn new<R: RngCore>(rng: &mut R, user_id: &str) -> Self {
        let x = F::rand(rng);
        // Field elements display as their canonical decimal representative
        let x_decimal = x.to_string();

        let mut input = Vec::with_capacity(user_id.len() + x_decimal.len());
        input.extend_from_slice(user_id.as_bytes());
        input.extend_from_slice(x_decimal.as_bytes());

        let did = hex::encode(Sha512::digest(&input));

        Self { x, did }
    }

    /// The identifier re-interpreted as a scalar.
    pub fn as_scalar(&self) -> Result<F, CredentialError> {
        did_to_scalar(&self.did)
    }
}

/// Re-interprets a DID hex string as a big-endian integer reduced into the
/// scalar field.
pub fn did_to_scalar<F: PrimeField>(did: &str) -> Result<F, CredentialError> {
    let bytes = hex::decode(did).map_err(|_| CredentialError::InvalidDidHex)?;
    Ok(F::from_be_bytes_mod_order(&bytes))
}
