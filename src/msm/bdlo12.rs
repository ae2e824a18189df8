use ark_ff::{BigInteger, PrimeField};
use ark_std::{cfg_iter, log2};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::group::MsmGroup;

/// Bucketed windowed MSM after the 2012 Bernstein-Doumen-Lange-Oosterwijk
/// analysis. Scalars are converted to their wide-integer form once, then
/// each `c`-bit window is swept from the most significant down, sorting
/// bases into `2^c` buckets and collapsing them with a descending running
/// sum (`2 * (2^c - 1)` additions instead of per-bucket multiplications).
#[tracing::instrument(skip_all, name = "multi_exp_bdlo12")]
pub(crate) fn multi_exp_inner<G: MsmGroup>(bases: &[G], scalars: &[G::Scalar]) -> G {
    debug_assert_eq!(bases.len(), scalars.len());
    if bases.is_empty() {
        return G::zero();
    }

    let log2_length = log2(bases.len()) as isize;
    let c = (log2_length - (log2_length / 3 - 2)) as usize;

    let bigints: Vec<<G::Scalar as PrimeField>::BigInt> =
        cfg_iter!(scalars).map(|s| s.into_bigint()).collect();
    let num_bits = bigints.iter().map(|b| b.num_bits() as usize).max().unwrap();
    let num_groups = num_bits.div_ceil(c);

    let mut result = G::zero();
    let mut result_nonzero = false;

    for k in (0..num_groups).rev() {
        if result_nonzero {
            for _ in 0..c {
                result = result.dbl();
            }
        }

        let mut buckets = vec![G::zero(); 1 << c];
        let mut bucket_nonzero = vec![false; 1 << c];

        for (base, repr) in bases.iter().zip(&bigints) {
            let mut id = 0usize;
            for j in 0..c {
                let bit = k * c + j;
                if bit < num_bits && repr.get_bit(bit) {
                    id |= 1 << j;
                }
            }
            if id == 0 {
                continue;
            }
            if bucket_nonzero[id] {
                #[cfg(feature = "mixed-addition")]
                {
                    buckets[id] = buckets[id].mixed_add(base);
                }
                #[cfg(not(feature = "mixed-addition"))]
                {
                    buckets[id] += base;
                }
            } else {
                buckets[id] = *base;
                bucket_nonzero[id] = true;
            }
        }

        #[cfg(feature = "mixed-addition")]
        crate::msm::batch_to_special(&mut buckets);

        // sum_id id * buckets[id], by keeping a suffix sum running while
        // walking the bucket indices down.
        let mut running_sum = G::zero();
        let mut running_sum_nonzero = false;
        for id in (1..buckets.len()).rev() {
            if bucket_nonzero[id] {
                if running_sum_nonzero {
                    #[cfg(feature = "mixed-addition")]
                    {
                        running_sum = running_sum.mixed_add(&buckets[id]);
                    }
                    #[cfg(not(feature = "mixed-addition"))]
                    {
                        running_sum += &buckets[id];
                    }
                } else {
                    running_sum = buckets[id];
                    running_sum_nonzero = true;
                }
            }
            if running_sum_nonzero {
                if result_nonzero {
                    result += &running_sum;
                } else {
                    result = running_sum;
                    result_nonzero = true;
                }
            }
        }
    }
    result
}
