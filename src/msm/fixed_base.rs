use ark_ff::{BigInteger, PrimeField};
use ark_std::cfg_into_iter;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::group::MsmGroup;

#[cfg(feature = "lowmem")]
const DEFAULT_EXP_WINDOW: usize = 14;
#[cfg(not(feature = "lowmem"))]
const DEFAULT_EXP_WINDOW: usize = 17;

/// Window width recommended for exponentiating `num_scalars` scalars
/// against one fixed base: the widest window whose (non-zero) threshold
/// in the group's empirical table is covered by `num_scalars`.
pub fn get_exp_window_size<G: MsmGroup>(num_scalars: usize) -> usize {
    let table = G::fixed_base_exp_window_table();
    if table.is_empty() {
        return DEFAULT_EXP_WINDOW;
    }

    let mut window = 1;
    for (i, threshold) in table.iter().enumerate().rev() {
        if *threshold != 0 && *threshold <= num_scalars {
            window = i + 1;
            break;
        }
    }

    #[cfg(feature = "lowmem")]
    let window = window.min(14);
    window
}

/// Precomputes `table[outer][inner] = inner * 2^(outer * window) * g` for
/// scalars of up to `scalar_size` bits. The top chunk only needs
/// `2^(scalar_size - (outer_count - 1) * window)` entries; indices past
/// that are never consulted and never built.
pub fn get_window_table<G: MsmGroup>(scalar_size: usize, window: usize, g: &G) -> Vec<Vec<G>> {
    debug_assert!(scalar_size >= 1 && window >= 1);
    let in_window = 1usize << window;
    let outerc = scalar_size.div_ceil(window);
    let last_in_window = 1usize << (scalar_size - (outerc - 1) * window);

    let mut table = Vec::with_capacity(outerc);
    let mut g_outer = *g;
    for outer in 0..outerc {
        let cur_in_window = if outer == outerc - 1 {
            last_in_window
        } else {
            in_window
        };

        let mut row = Vec::with_capacity(cur_in_window);
        let mut g_inner = G::zero();
        for _ in 0..cur_in_window {
            row.push(g_inner);
            g_inner += &g_outer;
        }
        #[cfg(feature = "mixed-addition")]
        crate::msm::batch_to_special(&mut row);
        table.push(row);

        for _ in 0..window {
            g_outer = g_outer.dbl();
        }
    }
    table
}

/// Looks up and sums one table entry per `window`-bit chunk of `scalar`.
/// The accumulator starts from `table[0][0]`, which is the identity by
/// construction, so no emptiness branch is needed.
pub fn windowed_exp<G: MsmGroup>(
    scalar_size: usize,
    window: usize,
    table: &[Vec<G>],
    scalar: &G::Scalar,
) -> G {
    let outerc = scalar_size.div_ceil(window);
    debug_assert!(outerc <= table.len());
    let repr = scalar.into_bigint();

    let mut res = table[0][0];
    for (outer, row) in table.iter().enumerate().take(outerc) {
        let mut inner = 0usize;
        for i in 0..window {
            let bit = outer * window + i;
            if bit < scalar_size && repr.get_bit(bit) {
                inner |= 1 << i;
            }
        }
        #[cfg(feature = "mixed-addition")]
        {
            res = res.mixed_add(&row[inner]);
        }
        #[cfg(not(feature = "mixed-addition"))]
        {
            res += &row[inner];
        }
    }
    res
}

/// [`windowed_exp`] over a vector of scalars; embarrassingly parallel.
#[tracing::instrument(skip_all, name = "batch_exp")]
pub fn batch_exp<G: MsmGroup>(
    scalar_size: usize,
    window: usize,
    table: &[Vec<G>],
    scalars: &[G::Scalar],
) -> Vec<G> {
    cfg_into_iter!(scalars)
        .map(|scalar| windowed_exp(scalar_size, window, table, scalar))
        .collect()
}

/// [`batch_exp`] with every scalar pre-multiplied by `coeff`.
#[tracing::instrument(skip_all, name = "batch_exp_with_coeff")]
pub fn batch_exp_with_coeff<G: MsmGroup>(
    scalar_size: usize,
    window: usize,
    table: &[Vec<G>],
    coeff: &G::Scalar,
    scalars: &[G::Scalar],
) -> Vec<G> {
    cfg_into_iter!(scalars)
        .map(|scalar| windowed_exp(scalar_size, window, table, &(*coeff * scalar)))
        .collect()
}
