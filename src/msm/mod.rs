use ark_ff::{BigInteger, One, PrimeField, Zero};
use ark_std::cfg_into_iter;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::group::MsmGroup;
use crate::utils::errors::MsmError;

mod bdlo12;
mod bos_coster;
pub mod fixed_base;
pub mod wnaf;

use wnaf::opt_window_wnaf_exp;

/// Strategy used to evaluate `sum_i scalars[i] * bases[i]`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MultiExpMethod {
    /// Per-pair windowed exponentiation, summed. The baseline the other
    /// strategies are tested against.
    Naive,
    /// Per-pair evaluation through the group's own scalar multiplication,
    /// for callers whose scalars don't profit from wNAF recoding.
    NaivePlain,
    /// Bucketed Pippenger variant; the default for uniformly distributed
    /// scalars.
    Bdlo12,
    /// Heap-based greedy reduction; wins when scalar magnitudes are
    /// highly non-uniform.
    BosCoster,
}

/// Computes `sum_i scalars[i] * bases[i]` with the chosen strategy,
/// optionally split into `chunks` independent pieces. Pieces are summed
/// sequentially in index order, so the result does not depend on how the
/// pieces were scheduled.
#[tracing::instrument(skip_all)]
pub fn multi_exp<G: MsmGroup>(
    bases: &[G],
    scalars: &[G::Scalar],
    method: MultiExpMethod,
    chunks: usize,
) -> Result<G, MsmError> {
    if bases.len() != scalars.len() {
        return Err(MsmError::LengthMismatch(bases.len(), scalars.len()));
    }

    let length = bases.len();
    if chunks <= 1 || length < chunks {
        return Ok(multi_exp_inner(bases, scalars, method));
    }

    let piece_len = length / chunks;
    let partials: Vec<G> = cfg_into_iter!(0..chunks)
        .map(|i| {
            let start = i * piece_len;
            let end = if i == chunks - 1 { length } else { start + piece_len };
            multi_exp_inner(&bases[start..end], &scalars[start..end], method)
        })
        .collect();

    Ok(partials.into_iter().sum())
}

/// [`multi_exp`] preceded by a single filtering pass: pairs with a zero
/// scalar are dropped, pairs with a unit scalar are added straight into
/// an accumulator, and only the rest is handed to the chosen strategy.
/// Rearranging the additions is sound because the group is abelian.
#[tracing::instrument(skip_all)]
pub fn multi_exp_with_mixed_addition<G: MsmGroup>(
    bases: &[G],
    scalars: &[G::Scalar],
    method: MultiExpMethod,
    chunks: usize,
) -> Result<G, MsmError> {
    if bases.len() != scalars.len() {
        return Err(MsmError::LengthMismatch(bases.len(), scalars.len()));
    }

    let zero = G::Scalar::zero();
    let one = G::Scalar::one();

    let mut acc = G::zero();
    let mut nontrivial_scalars = Vec::new();
    let mut nontrivial_bases = Vec::new();
    for (scalar, base) in scalars.iter().zip(bases) {
        if *scalar == zero {
            continue;
        } else if *scalar == one {
            #[cfg(feature = "mixed-addition")]
            {
                acc = acc.mixed_add(base);
            }
            #[cfg(not(feature = "mixed-addition"))]
            {
                acc += base;
            }
        } else {
            nontrivial_scalars.push(*scalar);
            nontrivial_bases.push(*base);
        }
    }

    Ok(acc + multi_exp(&nontrivial_bases, &nontrivial_scalars, method, chunks)?)
}

/// Normalizes every element of `vec` in place. Non-identity elements go
/// through the group's batched conversion (one inversion for the whole
/// batch); identities are replaced by the canonical special identity.
pub fn batch_to_special<G: MsmGroup>(vec: &mut [G]) {
    let mut non_zeros: Vec<G> = vec.iter().filter(|el| !el.is_zero()).copied().collect();
    G::batch_to_special_all_non_zeros(&mut non_zeros);

    let special_zero = {
        let mut zero = G::zero();
        zero.to_special();
        zero
    };

    let mut normalized = non_zeros.into_iter();
    for el in vec.iter_mut() {
        if el.is_zero() {
            *el = special_zero;
        } else {
            *el = normalized.next().unwrap();
        }
    }
    debug_assert!(normalized.next().is_none());
}

fn multi_exp_inner<G: MsmGroup>(bases: &[G], scalars: &[G::Scalar], method: MultiExpMethod) -> G {
    match method {
        MultiExpMethod::Naive => naive(bases, scalars),
        MultiExpMethod::NaivePlain => naive_plain(bases, scalars),
        MultiExpMethod::Bdlo12 => bdlo12::multi_exp_inner(bases, scalars),
        MultiExpMethod::BosCoster => bos_coster::multi_exp_inner(bases, scalars),
    }
}

fn naive<G: MsmGroup>(bases: &[G], scalars: &[G::Scalar]) -> G {
    bases
        .iter()
        .zip(scalars)
        .map(|(base, scalar)| {
            let repr = scalar.into_bigint();
            let bits = repr.num_bits() as usize;
            opt_window_wnaf_exp(base, &repr, bits)
        })
        .sum()
}

fn naive_plain<G: MsmGroup>(bases: &[G], scalars: &[G::Scalar]) -> G {
    bases
        .iter()
        .zip(scalars)
        .map(|(base, scalar)| base.scalar_mul(scalar))
        .sum()
}
