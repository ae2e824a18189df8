use core::fmt::Debug;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use ark_ff::PrimeField;
use ark_std::Zero;

pub mod short_weierstrass;

/// The group contract consumed by every exponentiation routine in this
/// crate. Implementors are additive abelian groups (in practice
/// prime-order subgroups of elliptic curves) whose elements are cheap to
/// copy; the algorithms never inspect the representation beyond the
/// operations listed here.
pub trait MsmGroup:
    'static
    + Sized
    + Copy
    + Eq
    + Debug
    + Send
    + Sync
    + Zero
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + Sum<Self>
{
    /// The scalar field acting on the group. `Scalar::BigInt` doubles as
    /// the wide-integer representation used by the windowed algorithms.
    type Scalar: PrimeField;

    /// `self + self`, possibly cheaper than the general addition.
    fn dbl(&self) -> Self;

    /// `self + other` under the precondition `other.is_special()`.
    /// Must agree with `+` on every input, including the identity on
    /// either side and `other == self`.
    fn mixed_add(&self, other: &Self) -> Self;

    /// Whether the element is in the canonical form accepted by
    /// [`mixed_add`](Self::mixed_add). The identity is always special.
    fn is_special(&self) -> bool;

    /// Normalizes the element in place. Idempotent; preserves equality.
    fn to_special(&mut self);

    /// Normalizes a slice of non-identity elements with a single batched
    /// inversion. Passing an identity element is a contract violation.
    fn batch_to_special_all_non_zeros(elems: &mut [Self]);

    /// The group's own generic scalar multiplication.
    fn scalar_mul(&self, scalar: &Self::Scalar) -> Self;

    /// Generic double-and-add on the wide-integer representation; the
    /// fallback when no wNAF window applies.
    fn mul_bigint(&self, scalar: &<Self::Scalar as PrimeField>::BigInt) -> Self;

    /// Ascending scalar-bit thresholds: entry `w - 1` holds the smallest
    /// scalar size (in bits) at which a width-`w` wNAF beats width
    /// `w - 1`. Empirical; tunes throughput only.
    fn wnaf_window_table() -> &'static [usize];

    /// Ascending scalar-count thresholds for the fixed-base window
    /// selection. A zero entry means the window is never optimal and is
    /// skipped.
    fn fixed_base_exp_window_table() -> &'static [usize];
}
