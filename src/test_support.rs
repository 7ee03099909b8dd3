//! 测试用内存 SQLite: 单连接 (`:memory:` 每个连接都是独立的库)，表结构与迁移一致

use crate::entities::{Rarity, item_entity as items, series_entity as series, user_entity as users};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Set};

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        points INTEGER NOT NULL DEFAULT 0 CHECK (points >= 0),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE blind_box_series (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        description TEXT,
        category TEXT NOT NULL,
        cover_image TEXT,
        price INTEGER NOT NULL,
        sold_count INTEGER NOT NULL DEFAULT 0,
        is_active BOOLEAN NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE blind_box_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        series_id INTEGER NOT NULL REFERENCES blind_box_series (id),
        name TEXT NOT NULL,
        description TEXT,
        image TEXT,
        rarity TEXT NOT NULL,
        drop_weight_bp INTEGER NOT NULL,
        obtained_count INTEGER NOT NULL DEFAULT 0,
        is_active BOOLEAN NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        order_number TEXT NOT NULL UNIQUE,
        user_id INTEGER NOT NULL REFERENCES users (id),
        series_id INTEGER NOT NULL REFERENCES blind_box_series (id),
        quantity INTEGER NOT NULL CHECK (quantity >= 1),
        unit_price INTEGER NOT NULL,
        total_amount INTEGER NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        payment_method TEXT,
        result_items TEXT,
        remarks TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        paid_at TEXT,
        completed_at TEXT
    )"#,
    r#"CREATE TABLE user_inventory (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users (id),
        item_id INTEGER NOT NULL REFERENCES blind_box_items (id),
        quantity INTEGER NOT NULL DEFAULT 1,
        is_displayed BOOLEAN NOT NULL DEFAULT 0,
        is_favorite BOOLEAN NOT NULL DEFAULT 0,
        obtain_method TEXT,
        obtained_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )"#,
    "CREATE UNIQUE INDEX idx_user_inventory_user_item ON user_inventory (user_id, item_id)",
    r#"CREATE TABLE points_history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users (id),
        transaction_type TEXT NOT NULL,
        amount INTEGER NOT NULL,
        balance_after INTEGER NOT NULL,
        description TEXT NOT NULL,
        related_order_id INTEGER,
        created_at TEXT NOT NULL
    )"#,
    "CREATE INDEX idx_points_history_user_created ON points_history (user_id, created_at)",
];

pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    for ddl in SCHEMA {
        db.execute_unprepared(ddl).await.unwrap();
    }
    db
}

pub async fn create_user(db: &DatabaseConnection, username: &str, points: i64) -> users::Model {
    let now = Utc::now();
    users::ActiveModel {
        username: Set(username.to_string()),
        points: Set(points),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn create_series(db: &DatabaseConnection, name: &str, price: i64) -> series::Model {
    let now = Utc::now();
    series::ActiveModel {
        name: Set(name.to_string()),
        description: Set(None),
        category: Set("test".to_string()),
        cover_image: Set(None),
        price: Set(price),
        sold_count: Set(0),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn create_item(
    db: &DatabaseConnection,
    series_id: i64,
    name: &str,
    rarity: Rarity,
    drop_weight_bp: i64,
) -> items::Model {
    let now = Utc::now();
    items::ActiveModel {
        series_id: Set(series_id),
        name: Set(name.to_string()),
        description: Set(None),
        image: Set(None),
        rarity: Set(rarity),
        drop_weight_bp: Set(drop_weight_bp),
        obtained_count: Set(0),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

/// 40 / 30 / 20 / 10 的四款系列
pub async fn create_standard_series(
    db: &DatabaseConnection,
    price: i64,
) -> (series::Model, Vec<items::Model>) {
    let series = create_series(db, "Pixel Heroes", price).await;
    let mut list = Vec::new();
    for (name, rarity, weight) in [
        ("Hero", Rarity::Common, 4000),
        ("Mage", Rarity::Rare, 3000),
        ("Dragon Knight", Rarity::Epic, 2000),
        ("Mythic Hero", Rarity::Legendary, 1000),
    ] {
        list.push(create_item(db, series.id, name, rarity, weight).await);
    }
    (series, list)
}
