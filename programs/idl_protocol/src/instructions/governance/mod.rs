pub mod authority;
pub mod insurance;
pub mod pause;
pub mod tvl_cap;

pub use authority::*;
pub use insurance::*;
pub use pause::*;
pub use tvl_cap::*;
