//! Key generation for the authority committee.
//!
//! Each authority deals two random degree-`threshold` polynomials and
//! publishes Feldman-style commitments to their coefficients; private
//! evaluations are exchanged as shares and checked against the
//! commitments. The key material of the qualified set is aggregated into
//! the master verification key and per-authority signing/verification
//! keys. A dealer-based path ([`trusted_dealer::keygen`]) produces the
//! same key shapes from a single pair of polynomials.
//!
//! Participant ids are 1-based throughout: evaluating a dealing polynomial
//! at 0 would reveal its secret.

pub mod dealing;
pub mod keys;
pub mod share;
pub mod trusted_dealer;

pub use dealing::{Commitments, Polynomials};
pub use keys::{AuthorityKeys, MasterVerificationKey, SigningKeyShare, VerificationKeyShare};
pub use share::Share;

/// ParticipantId must be greater than 0
pub type ParticipantId = u16;
