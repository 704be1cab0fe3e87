use ark_ff::PrimeField;
use ark_std::{cfg_into_iter, cfg_iter, vec::Vec};

use crate::{dkg::ParticipantId, error::DkgError};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// `[1, x, x^2, ..., x^{n-1}]`
pub fn powers<F: PrimeField>(x: &F, n: usize) -> Vec<F> {
    let mut out = Vec::with_capacity(n);
    if n > 0 {
        out.push(F::one());
    }
    for i in 1..n {
        out.push(out[i - 1] * x);
    }
    out
}

/// Return the Lagrange basis polynomial at x = 0 given the `x` coordinates
/// `(x_coords[0]) * (x_coords[1]) * ... / ((x_coords[0] - i) * (x_coords[1] - i) * ...)`
/// Assumes all `x` coordinates are distinct and appropriate number of coordinates are provided
pub fn lagrange_basis_at_0<F: PrimeField>(
    x_coords: &[ParticipantId],
    i: ParticipantId,
) -> Result<F, DkgError> {
    let mut numerator = F::one();
    let mut denominator = F::one();
    let i_f = F::from(i as u64);
    for x in x_coords {
        // Evaluation points are never 0 since the basis is evaluated at 0
        if *x == 0 {
            return Err(DkgError::ParticipantIdCantBeZero);
        }
        if *x == i {
            continue;
        }
        let x = F::from(*x as u64);
        numerator *= x;
        denominator *= x - i_f;
    }
    denominator.inverse_in_place().unwrap();
    Ok(numerator * denominator)
}

/// Return the Lagrange basis polynomial at x = 0 for each of the given `x`
/// coordinates. Faster than doing multiple calls to `lagrange_basis_at_0`
pub fn lagrange_basis_at_0_for_all<F: PrimeField>(
    x_coords: Vec<ParticipantId>,
) -> Result<Vec<F>, DkgError> {
    let x = cfg_into_iter!(x_coords.as_slice())
        .map(|x| F::from(*x as u64))
        .collect::<Vec<_>>();
    if cfg_iter!(x).any(|x_i| x_i.is_zero()) {
        return Err(DkgError::ParticipantIdCantBeZero);
    }

    // Product of all `x`, i.e. \prod_{i}(x_i)
    let product = cfg_iter!(x).product::<F>();

    let r = cfg_into_iter!(x.clone())
        .map(move |i| {
            let mut denominator = cfg_iter!(x)
                .filter(|&j| &i != j)
                .map(|&j| j - i)
                .product::<F>();
            denominator.inverse_in_place().unwrap();

            // The numerator is the product of all `x` except `x_i`
            let numerator = product * i.inverse().unwrap();

            denominator * numerator
        })
        .collect::<Vec<_>>();
    Ok(r)
}
