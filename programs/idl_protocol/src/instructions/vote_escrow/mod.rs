pub mod extend;
pub mod lock;
pub mod unlock;

pub use extend::*;
pub use lock::*;
pub use unlock::*;
