//! Threshold-issued anonymous credentials over a bilinear pairing.
//!
//! A committee of `n` authorities jointly holds a Pointcheval-Sanders style
//! signing key, dealt through a Pedersen DKG with Feldman commitments. A
//! holder identified by a DID obtains partial blind signatures from any
//! `threshold + 1` authorities, unblinds and aggregates them into a single
//! credential by Lagrange interpolation in the exponent, and later presents
//! a re-randomized version of it together with a proof of representation.
//!
//! The pipeline, in dependency order:
//!
//! 1. [`SignatureParams`] - pairing generators, shared by everyone.
//! 2. [`dkg`] - distributed (or dealer-based) key generation.
//! 3. [`BlindSignRequest::new`] - client-side blinding and issuance proof.
//! 4. [`BlindSignature::new`] - per-authority partial blind signature.
//! 5. [`PartialSignature::new`] - client-side unblinding and sanity check.
//! 6. [`Credential::aggregate`] - Lagrange aggregation at zero.
//! 7. [`Presentation::new`] / [`Presentation::verify`] - showing the
//!    credential without revealing the signature or the DID.
//!
//! Everything is a pure function over immutable values; the host picks the
//! executor and the transport.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod did;
pub mod dkg;
pub mod error;
pub mod hashing;
pub mod helpers;
pub mod proof;
pub mod serde_utils;
pub mod setup;
pub mod signature;

#[cfg(test)]
mod tests;

pub use did::Did;
pub use error::{CredentialError, DkgError};
pub use proof::{Presentation, RepresentationProof};
pub use setup::SignatureParams;
pub use signature::{BlindSignRequest, BlindSignature, Credential, PartialSignature};
