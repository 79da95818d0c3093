pub mod cancel_market;
pub mod claim_refund;
pub mod create_market;

pub use cancel_market::*;
pub use claim_refund::*;
pub use create_market::*;
