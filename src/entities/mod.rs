pub mod blind_box_items;
pub mod blind_box_series;
pub mod orders;
pub mod points_history;
pub mod user_inventory;
pub mod users;

pub use blind_box_items as item_entity;
pub use blind_box_items::Rarity;
pub use blind_box_series as series_entity;
pub use orders as order_entity;
pub use orders::{DrawResult, DrawnItem, OrderStatus, PaymentMethod};
pub use points_history as points_history_entity;
pub use points_history::PointsTransactionType;
pub use user_inventory as inventory_entity;
pub use users as user_entity;
