//! Per-authority polynomial dealing and coefficient commitments.

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_poly::{univariate::DensePolynomial, DenseUVPolynomial, Polynomial};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{cfg_iter, rand::RngCore, vec::Vec, UniformRand};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::Zeroize;

use crate::{
    dkg::{share::Share, ParticipantId},
    error::DkgError,
    serde_utils::ArkObjectBytes,
    setup::SignatureParams,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The two secret polynomials `F` and `G` held by one authority, each of
/// degree `threshold` (`threshold + 1` coefficients). `F(0)` and `G(0)`
/// are the authority's contributions to the master secret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomials<F: PrimeField> {
    pub(crate) f: DensePolynomial<F>,
    pub(crate) g: DensePolynomial<F>,
}

impl<F: PrimeField> Polynomials<F> {
    /// Samples the polynomial pair with uniform coefficients.
    pub fn rand<R: RngCore>(rng: &mut R, threshold: ParticipantId) -> Self {
        let mut sample = || {
            DensePolynomial::from_coefficients_vec(
                (0..=threshold).map(|_| F::rand(rng)).collect(),
            )
        };
        let f = sample();
        let g = sample();

        Self { f, g }
    }

    /// Reconstructs the pair from raw coefficient vectors (constant term
    /// first), as exchanged over the wire.
    pub fn from_coefficients(f: Vec<F>, g: Vec<F>) -> Self {
        Self {
            f: DensePolynomial::from_coefficients_vec(f),
            g: DensePolynomial::from_coefficients_vec(g),
        }
    }

    /// The private share for participant `i`: `(F(i), G(i))`.
    pub fn share_for(
        &self,
        i: ParticipantId,
        threshold: ParticipantId,
    ) -> Result<Share<F>, DkgError> {
        if i == 0 {
            return Err(DkgError::ParticipantIdCantBeZero);
        }
        let x = F::from(i as u64);
        Ok(Share {
            id: i,
            threshold,
            f: self.f.evaluate(&x),
            g: self.g.evaluate(&x),
        })
    }

    /// Coefficients of `F`, constant term first.
    pub fn f_coefficients(&self) -> &[F] {
        &self.f.coeffs
    }

    /// Coefficients of `G`, constant term first.
    pub fn g_coefficients(&self) -> &[F] {
        &self.g.coeffs
    }
}

impl<F: PrimeField> Zeroize for Polynomials<F> {
    fn zeroize(&mut self) {
        self.f.coeffs.zeroize();
        self.g.coeffs.zeroize();
    }
}

impl<F: PrimeField> Drop for Polynomials<F> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Commitments to one authority's polynomial coefficients:
/// `V_x[j] = g2 * F[j]`, `V_y[j] = g2 * G[j]`, `V_y'[j] = g1 * G[j]`.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct Commitments<E: Pairing> {
    #[serde_as(as = "Vec<ArkObjectBytes>")]
    pub v_x: Vec<E::G2Affine>,
    #[serde_as(as = "Vec<ArkObjectBytes>")]
    pub v_y: Vec<E::G2Affine>,
    #[serde_as(as = "Vec<ArkObjectBytes>")]
    pub v_y_prime: Vec<E::G1Affine>,
}

impl<E: Pairing> Commitments<E> {
    /// Commits to the coefficients of both polynomials.
    pub fn new(polynomials: &Polynomials<E::ScalarField>, params: &SignatureParams<E>) -> Self {
        Self {
            v_x: commit_to_poly(&polynomials.f, &params.g2),
            v_y: commit_to_poly(&polynomials.g, &params.g2),
            v_y_prime: commit_to_poly(&polynomials.g, &params.g1),
        }
    }

    /// All three commitment vectors must cover `threshold + 1`
    /// coefficients.
    pub fn supports_threshold(&self, threshold: ParticipantId) -> bool {
        let expected = threshold as usize + 1;
        self.v_x.len() == expected
            && self.v_y.len() == expected
            && self.v_y_prime.len() == expected
    }
}

pub(crate) fn commit_to_poly<G: AffineRepr>(
    poly: &DensePolynomial<G::ScalarField>,
    ck: &G,
) -> Vec<G> {
    G::Group::normalize_batch(
        &cfg_iter!(poly.coeffs)
            .map(|i| ck.mul_bigint(i.into_bigint()))
            .collect::<Vec<_>>(),
    )
}
