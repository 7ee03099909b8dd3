use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 初始化演示用盲盒系列
/// - Pixel Heroes 售价 99 积分
/// - 权重 (basis points): Hero 40% / Mage 30% / Dragon Knight 20% / Mythic Hero 10%
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        let backend = manager.get_database_backend();

        let series_sql = r#"
INSERT INTO blind_box_series (name, description, category, cover_image, price, is_active)
VALUES
 ('Pixel Heroes', 'Classic 8-bit pixel heroes', 'game', NULL, 99, TRUE)
ON CONFLICT (name) DO NOTHING;
"#;
        conn.execute(Statement::from_string(backend, series_sql.to_string()))
            .await?;

        let items_sql = r#"
INSERT INTO blind_box_items (series_id, name, description, rarity, drop_weight_bp, is_active)
SELECT s.id, v.name, v.description, v.rarity, v.drop_weight_bp, TRUE
FROM blind_box_series s
CROSS JOIN (VALUES
 ('Hero', 'A brave warrior with a holy sword', 'common', 4000),
 ('Mage', 'A mysterious master of magic', 'rare', 3000),
 ('Dragon Knight', 'A legendary knight riding a dragon', 'epic', 2000),
 ('Mythic Hero', 'The strongest hero of legend', 'legendary', 1000)
) AS v(name, description, rarity, drop_weight_bp)
WHERE s.name = 'Pixel Heroes'
  AND NOT EXISTS (SELECT 1 FROM blind_box_items i WHERE i.series_id = s.id);
"#;
        conn.execute(Statement::from_string(backend, items_sql.to_string()))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        let backend = manager.get_database_backend();
        let sql = r#"
DELETE FROM blind_box_items
WHERE series_id IN (SELECT id FROM blind_box_series WHERE name = 'Pixel Heroes');
DELETE FROM blind_box_series WHERE name = 'Pixel Heroes';
"#;
        conn.execute_unprepared(sql).await?;
        Ok(())
    }
}
