pub mod group;
pub mod msm;
pub mod utils;

pub use group::MsmGroup;
pub use msm::{batch_to_special, multi_exp, multi_exp_with_mixed_addition, MultiExpMethod};
pub use utils::errors::MsmError;
