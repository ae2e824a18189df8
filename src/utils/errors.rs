use core::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MsmError {
    #[error("Invalid input length, expected length {0} but got {1}")]
    LengthMismatch(usize, usize),
}
