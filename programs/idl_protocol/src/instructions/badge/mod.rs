pub mod issue_badge;
pub mod revoke_badge;

pub use issue_badge::*;
pub use revoke_badge::*;
