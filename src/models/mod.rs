pub mod common;
pub mod inventory;
pub mod order;
pub mod pagination;
pub mod points;

pub use common::*;
pub use inventory::*;
pub use order::*;
pub use pagination::*;
pub use points::*;
