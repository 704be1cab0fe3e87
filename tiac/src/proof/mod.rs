//! Non-interactive proofs of representation (Fiat-Shamir over SHA-512).
//!
//! Two statements are proven over the scheme's lifetime:
//!
//! - at issuance, that the two commitments in a blind-signing request open
//!   to the same DID ([`issuance`]);
//! - at presentation, that the element `k` and the issuance commitment
//!   bind the same DID and blinding ([`presentation`]).
//!
//! Both use the short-proof variant of the Schnorr protocol: the prover
//! sends the challenge and responses, the verifier reconstructs the
//! commitments and recomputes the challenge.

pub mod issuance;
pub mod presentation;

pub use presentation::Presentation;

use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::serde_utils::ArkObjectBytes;

/// A proof of representation for a three-witness product-of-powers
/// statement: the challenge and one response per witness. All four
/// scalars are public once published.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct RepresentationProof<F: PrimeField> {
    #[serde_as(as = "ArkObjectBytes")]
    pub c: F,
    #[serde_as(as = "ArkObjectBytes")]
    pub s1: F,
    #[serde_as(as = "ArkObjectBytes")]
    pub s2: F,
    #[serde_as(as = "ArkObjectBytes")]
    pub s3: F,
}
