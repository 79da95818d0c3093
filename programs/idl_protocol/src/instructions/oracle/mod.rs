pub mod commit_resolution;
pub mod deposit_bond;
pub mod dispute_resolution;
pub mod finalize_resolution;
pub mod reveal_resolution;
pub mod withdraw_bond;

pub use commit_resolution::*;
pub use deposit_bond::*;
pub use dispute_resolution::*;
pub use finalize_resolution::*;
pub use reveal_resolution::*;
pub use withdraw_bond::*;
