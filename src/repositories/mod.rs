//! 每个实体一个仓储，方法对 `ConnectionTrait` 泛型，
//! 既可直接作用于连接池，也可在事务 (`DatabaseTransaction`) 内调用。

pub mod catalog_repository;
pub mod inventory_repository;
pub mod order_repository;
pub mod points_repository;
pub mod user_repository;

pub use catalog_repository::CatalogRepository;
pub use inventory_repository::InventoryRepository;
pub use order_repository::{OrderRepository, StatusUpdate};
pub use points_repository::PointsHistoryRepository;
pub use user_repository::UserRepository;
