use ark_ff::{BigInteger, PrimeField};

use crate::group::MsmGroup;

/// Expands `scalar` into signed windowed non-adjacent form: a digit
/// vector `d` with `scalar = sum_j d[j] * 2^j`, every non-zero digit odd
/// with `|d[j]| < 2^window`, and at least `window` zeros between
/// consecutive non-zero digits.
pub fn find_wnaf<B: BigInteger>(window: usize, scalar: &B) -> Vec<i64> {
    debug_assert!(window >= 1 && window + 1 < 64);

    let mut digits = Vec::with_capacity(scalar.num_bits() as usize + 1);
    let mut c = *scalar;
    while !c.is_zero() {
        let digit = if c.is_odd() {
            let mask = (1u64 << (window + 1)) - 1;
            let mut u = (c.as_ref()[0] & mask) as i64;
            if u > 1 << window {
                u -= 1 << (window + 1);
            }
            if u > 0 {
                c.sub_with_borrow(&B::from(u as u64));
            } else {
                c.add_with_carry(&B::from(u.unsigned_abs()));
            }
            u
        } else {
            0
        };
        digits.push(digit);
        c.div2();
    }
    digits
}

/// Single-base exponentiation over the width-`window` wNAF expansion of
/// `scalar`, using a table of the odd multiples `(2i + 1) * base`.
pub fn fixed_window_wnaf_exp<G: MsmGroup>(
    window: usize,
    base: &G,
    scalar: &<G::Scalar as PrimeField>::BigInt,
) -> G {
    let digits = find_wnaf(window, scalar);

    let mut table = Vec::with_capacity(1 << (window - 1));
    let twice = base.dbl();
    let mut multiple = *base;
    for _ in 0..(1usize << (window - 1)) {
        table.push(multiple);
        multiple += &twice;
    }

    let mut res = G::zero();
    let mut seen_nonzero = false;
    for digit in digits.iter().rev() {
        if seen_nonzero {
            res = res.dbl();
        }
        if *digit != 0 {
            seen_nonzero = true;
            if *digit > 0 {
                res += &table[*digit as usize / 2];
            } else {
                res -= &table[digit.unsigned_abs() as usize / 2];
            }
        }
    }
    res
}

/// Picks the widest wNAF window whose break-even threshold fits
/// `scalar_bits` and evaluates `scalar * base` with it. Falls back to the
/// group's generic double-and-add when the scalar is below every
/// threshold.
pub fn opt_window_wnaf_exp<G: MsmGroup>(
    base: &G,
    scalar: &<G::Scalar as PrimeField>::BigInt,
    scalar_bits: usize,
) -> G {
    let mut best = 0;
    for (i, threshold) in G::wnaf_window_table().iter().enumerate().rev() {
        if scalar_bits >= *threshold {
            best = i + 1;
            break;
        }
    }
    if best > 0 {
        fixed_window_wnaf_exp(best, base, scalar)
    } else {
        base.mul_bigint(scalar)
    }
}
