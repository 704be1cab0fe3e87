use ark_serialize::SerializationError;

use crate::dkg::ParticipantId;

/// An error originated from key generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DkgError {
    InvalidThresholdOrTotal(ParticipantId, ParticipantId),
    InvalidShare,
    ParticipantIdCantBeZero,
    UnequalParticipantAndShareId(ParticipantId, ParticipantId),
    InvalidCommitmentLength { received: usize, expected: usize },
    NoContributions,
}

/// An error originated from the issuance or presentation pipeline.
///
/// Every variant is terminal: a failed proof, hash binding or pairing check
/// cannot be retried with the same inputs.
#[derive(Debug)]
pub enum CredentialError {
    /// A recomputed Fiat-Shamir challenge did not match the proof.
    KorRejected,
    /// The request's base point is not the hash of its commitment.
    HashMismatch,
    /// An authority's base point differs from the one the request fixed.
    MismatchedBasePoint(ParticipantId),
    /// The unblinded fragment failed the pairing sanity check.
    UnblindCheckFailed,
    /// The final verifier pairing equation did not hold.
    PairingCheckFailed,
    /// Fewer partial signatures than interpolation requires.
    InsufficientShares { received: usize, expected: usize },
    /// Two fragments claim the same issuer; interpolation needs distinct
    /// evaluation points.
    DuplicateIssuer(ParticipantId),
    /// A signature with a zero element can never be valid.
    ZeroSignature,
    /// The DID string is not valid hex.
    InvalidDidHex,
    Dkg(DkgError),
    Serialization(SerializationError),
}

impl From<DkgError> for CredentialError {
    fn from(e: DkgError) -> Self {
        Self::Dkg(e)
    }
}

impl From<SerializationError> for CredentialError {
    fn from(e: SerializationError) -> Self {
        Self::Serialization(e)
    }
}
