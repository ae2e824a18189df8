use ark_ff::{BigInteger, PrimeField};

use crate::group::MsmGroup;
use crate::msm::wnaf::opt_window_wnaf_exp;

/// Heap node pairing a base index with the scalar amount still to be
/// applied to that base. The index is stable: `bases[idx]` is only ever
/// mutated, never moved, while nodes migrate through the heap.
#[derive(Clone, Copy)]
struct OrderedExponent<B: BigInteger> {
    idx: usize,
    residual: B,
}

/// Greedy MSM that repeatedly replaces the two largest pairs
/// `(a, A), (b, B)` with `(a - b, A), (b, B + A)`, tracked in a max-heap
/// keyed by residual scalar. Wins over the bucketed method when scalar
/// magnitudes are highly non-uniform.
#[tracing::instrument(skip_all, name = "multi_exp_bos_coster")]
pub(crate) fn multi_exp_inner<G: MsmGroup>(bases: &[G], scalars: &[G::Scalar]) -> G {
    debug_assert_eq!(bases.len(), scalars.len());
    if bases.is_empty() {
        return G::zero();
    }

    let mut g: Vec<G> = bases.to_vec();
    let mut heap: Vec<OrderedExponent<<G::Scalar as PrimeField>::BigInt>> = scalars
        .iter()
        .enumerate()
        .map(|(idx, scalar)| OrderedExponent {
            idx,
            residual: scalar.into_bigint(),
        })
        .collect();

    // Pad to odd length so every internal node of the heap has both
    // children and the root peek below needs no bounds checks.
    if heap.len() % 2 == 0 {
        g.push(G::zero());
        heap.push(OrderedExponent {
            idx: g.len() - 1,
            residual: <G::Scalar as PrimeField>::BigInt::from(0u64),
        });
    }

    if heap.len() == 1 {
        let a = &heap[0];
        let a_bits = a.residual.num_bits() as usize;
        if a_bits == 0 {
            return G::zero();
        }
        return opt_window_wnaf_exp(&g[a.idx], &a.residual, a_bits);
    }

    build_heap(&mut heap);

    let mut result = G::zero();
    loop {
        let a_bits = heap[0].residual.num_bits() as usize;
        if a_bits == 0 {
            break;
        }

        let b_pos = if heap[2].residual > heap[1].residual { 2 } else { 1 };
        let b_bits = heap[b_pos].residual.num_bits() as usize;

        if b_bits == 0 {
            // Everything below the root is exhausted; finish the root
            // with a windowed exponentiation and stop.
            let a = &heap[0];
            result += &opt_window_wnaf_exp(&g[a.idx], &a.residual, a_bits);
            break;
        }

        let limit = (a_bits - b_bits).min(20);
        if b_bits < 1 << limit {
            // The root dwarfs the rest of the heap: reducing it one
            // subtraction at a time costs more than exponentiating it
            // outright.
            let a = &heap[0];
            result += &opt_window_wnaf_exp(&g[a.idx], &a.residual, a_bits);
            heap[0].residual = <G::Scalar as PrimeField>::BigInt::from(0u64);
        } else {
            // One reduction step: a.r -= b.r, g[b] += g[a]. The root of a
            // max-heap of non-negative residuals guarantees a.r >= b.r.
            let b_residual = heap[b_pos].residual;
            let borrow = heap[0].residual.sub_with_borrow(&b_residual);
            debug_assert!(!borrow);

            let addend = g[heap[0].idx];
            g[heap[b_pos].idx] += &addend;
        }

        restore_root(&mut heap);
    }
    result
}

fn sift_down<B: BigInteger>(heap: &mut [OrderedExponent<B>], mut pos: usize) {
    loop {
        let left = 2 * pos + 1;
        if left >= heap.len() {
            break;
        }
        let right = left + 1;
        let child = if right < heap.len() && heap[right].residual > heap[left].residual {
            right
        } else {
            left
        };
        if heap[child].residual > heap[pos].residual {
            heap.swap(pos, child);
            pos = child;
        } else {
            break;
        }
    }
}

fn build_heap<B: BigInteger>(heap: &mut [OrderedExponent<B>]) {
    for pos in (0..heap.len() / 2).rev() {
        sift_down(heap, pos);
    }
}

/// Re-establishes the heap invariant after the root's residual changed:
/// walk the root down to a leaf, always promoting the larger child, then
/// sift the displaced node back up to where it belongs.
fn restore_root<B: BigInteger>(heap: &mut [OrderedExponent<B>]) {
    let len = heap.len();
    let mut pos = 0;
    loop {
        let left = 2 * pos + 1;
        if left >= len {
            break;
        }
        let right = left + 1;
        let child = if right < len && heap[right].residual > heap[left].residual {
            right
        } else {
            left
        };
        heap.swap(pos, child);
        pos = child;
    }
    while pos > 0 {
        let parent = (pos - 1) / 2;
        if heap[pos].residual > heap[parent].residual {
            heap.swap(pos, parent);
            pos = parent;
        } else {
            break;
        }
    }
}
