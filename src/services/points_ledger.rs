use crate::entities::{PointsTransactionType, points_history_entity as points};
use crate::error::{AppError, AppResult};
use crate::repositories::{PointsHistoryRepository, UserRepository};
use chrono::Utc;
use sea_orm::{ConnectionTrait, Set};

/// 积分账本
///
/// 余额变动与流水追加必须在同一连接 / 事务上执行，
/// 流水中的 `balance_after` 即本次变动后的余额。
pub struct PointsLedger;

impl PointsLedger {
    /// 扣减积分并追加一条 spend 流水 (amount 记为负数)
    pub async fn record_spend<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        amount: i64,
        description: &str,
        related_order_id: Option<i64>,
    ) -> AppResult<points::Model> {
        Self::ensure_positive(amount)?;

        if !UserRepository::debit_if_sufficient(conn, user_id, amount).await? {
            return match UserRepository::balance(conn, user_id).await? {
                None => Err(AppError::NotFound("User not found".into())),
                Some(available) => Err(AppError::InsufficientFunds {
                    required: amount,
                    available,
                }),
            };
        }

        Self::append(
            conn,
            user_id,
            PointsTransactionType::Spend,
            -amount,
            description,
            related_order_id,
        )
        .await
    }

    /// 增加积分并追加一条 earn 流水
    pub async fn record_earn<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        amount: i64,
        description: &str,
    ) -> AppResult<points::Model> {
        Self::ensure_positive(amount)?;

        if !UserRepository::credit(conn, user_id, amount).await? {
            return Err(AppError::NotFound("User not found".into()));
        }

        Self::append(
            conn,
            user_id,
            PointsTransactionType::Earn,
            amount,
            description,
            None,
        )
        .await
    }

    fn ensure_positive(amount: i64) -> AppResult<()> {
        if amount <= 0 {
            return Err(AppError::ValidationError(
                "Points amount must be positive".into(),
            ));
        }
        Ok(())
    }

    async fn append<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        transaction_type: PointsTransactionType,
        amount: i64,
        description: &str,
        related_order_id: Option<i64>,
    ) -> AppResult<points::Model> {
        let balance_after = UserRepository::balance(conn, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        let entry = points::ActiveModel {
            user_id: Set(user_id),
            transaction_type: Set(transaction_type),
            amount: Set(amount),
            balance_after: Set(balance_after),
            description: Set(description.to_string()),
            related_order_id: Set(related_order_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        Ok(PointsHistoryRepository::append(conn, entry).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn test_spend_snapshots_balance() {
        let db = test_support::setup_db().await;
        let user = test_support::create_user(&db, "alice", 500).await;

        let entry = PointsLedger::record_spend(&db, user.id, 198, "Blind box purchase: Pixel Heroes", Some(7))
            .await
            .unwrap();

        assert_eq!(entry.amount, -198);
        assert_eq!(entry.balance_after, 302);
        assert_eq!(entry.transaction_type, PointsTransactionType::Spend);
        assert_eq!(entry.related_order_id, Some(7));
        assert_eq!(UserRepository::balance(&db, user.id).await.unwrap(), Some(302));
    }

    #[tokio::test]
    async fn test_spend_insufficient_leaves_no_entry() {
        let db = test_support::setup_db().await;
        let user = test_support::create_user(&db, "bob", 50).await;

        let err = PointsLedger::record_spend(&db, user.id, 99, "purchase", None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::InsufficientFunds {
                required: 99,
                available: 50
            }
        ));

        let (entries, total) = PointsHistoryRepository::list_by_user(&db, user.id, 0, 20)
            .await
            .unwrap();
        assert!(entries.is_empty());
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_unknown_user_and_invalid_amount() {
        let db = test_support::setup_db().await;

        let err = PointsLedger::record_spend(&db, 404, 10, "purchase", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = PointsLedger::record_earn(&db, 404, 10, "reward").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let user = test_support::create_user(&db, "carol", 10).await;
        let err = PointsLedger::record_earn(&db, user.id, 0, "reward").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_earn_appends_entry() {
        let db = test_support::setup_db().await;
        let user = test_support::create_user(&db, "dave", 10).await;

        let entry = PointsLedger::record_earn(&db, user.id, 90, "Top up").await.unwrap();
        assert_eq!(entry.amount, 90);
        assert_eq!(entry.balance_after, 100);
        assert_eq!(entry.transaction_type, PointsTransactionType::Earn);
    }
}
