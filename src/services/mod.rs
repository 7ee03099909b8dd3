pub mod draw_engine;
pub mod inventory_ledger;
pub mod inventory_service;
pub mod order_service;
pub mod order_state;
pub mod points_ledger;
pub mod points_service;
pub mod transaction;

pub use draw_engine::*;
pub use inventory_ledger::*;
pub use inventory_service::*;
pub use order_service::*;
pub use order_state::*;
pub use points_ledger::*;
pub use points_service::*;
pub use transaction::*;
