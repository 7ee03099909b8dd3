use crate::error::{AppError, AppResult};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionError, TransactionTrait};
use std::future::Future;
use std::pin::Pin;

pub type BoundaryFuture<'c, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'c>>;

/// 原子边界: 回调内的所有写入要么全部提交，要么全部回滚
///
/// - 回调返回业务拒绝 (InvalidState / InsufficientFunds 等) 时回滚并原样返回
/// - 其他失败 (数据库错误、提交失败、连接失败) 回滚后统一为 `TransactionFailure`，
///   底层原因只写日志
///
/// 注意：回调内只能使用传入的 `txn`，不要再访问连接池。
#[derive(Clone)]
pub struct TransactionCoordinator {
    pool: DatabaseConnection,
}

impl TransactionCoordinator {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn run<F, T>(&self, boundary: &str, callback: F) -> AppResult<T>
    where
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoundaryFuture<'c, T> + Send,
        T: Send,
    {
        match self.pool.transaction::<F, T, AppError>(callback).await {
            Ok(value) => Ok(value),
            Err(TransactionError::Transaction(err)) if err.is_domain_rejection() => {
                log::info!("Transaction {boundary} rolled back: {err}");
                Err(err)
            }
            Err(TransactionError::Transaction(err)) => {
                log::error!("Transaction {boundary} failed and was rolled back: {err}");
                Err(AppError::TransactionFailure)
            }
            Err(TransactionError::Connection(err)) => {
                log::error!("Transaction {boundary} could not complete: {err}");
                Err(AppError::TransactionFailure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::user_entity as users;
    use crate::repositories::UserRepository;
    use crate::test_support;
    use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, PaginatorTrait, Set};

    #[tokio::test]
    async fn test_commit_on_success() {
        let db = test_support::setup_db().await;
        let coordinator = TransactionCoordinator::new(db.clone());
        let user = test_support::create_user(&db, "alice", 100).await;

        let user_id = user.id;
        let ok = coordinator
            .run("credit", move |txn| {
                Box::pin(async move {
                    Ok::<_, AppError>(UserRepository::credit(txn, user_id, 50).await?)
                })
            })
            .await
            .unwrap();

        assert!(ok);
        let balance = UserRepository::balance(&db, user.id).await.unwrap();
        assert_eq!(balance, Some(150));
    }

    #[tokio::test]
    async fn test_failure_rolls_back_and_surfaces_transaction_failure() {
        let db = test_support::setup_db().await;
        let coordinator = TransactionCoordinator::new(db.clone());
        let user = test_support::create_user(&db, "bob", 100).await;

        let user_id = user.id;
        let err = coordinator
            .run::<_, ()>("debit_then_fail", move |txn| {
                Box::pin(async move {
                    UserRepository::debit_if_sufficient(txn, user_id, 40).await?;
                    let now = chrono::Utc::now();
                    users::ActiveModel {
                        username: Set("carol".into()),
                        points: Set(0),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    Err::<(), _>(AppError::DatabaseError(DbErr::Custom("disk full".into())))
                })
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::TransactionFailure));
        assert_eq!(UserRepository::balance(&db, user.id).await.unwrap(), Some(100));
        assert_eq!(users::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_domain_rejection_passes_through() {
        let db = test_support::setup_db().await;
        let coordinator = TransactionCoordinator::new(db.clone());
        let user = test_support::create_user(&db, "dave", 10).await;

        let user_id = user.id;
        let err = coordinator
            .run::<_, ()>("debit", move |txn| {
                Box::pin(async move {
                    UserRepository::credit(txn, user_id, 5).await?;
                    Err::<(), _>(AppError::InsufficientFunds {
                        required: 100,
                        available: 15,
                    })
                })
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InsufficientFunds { .. }));
        assert_eq!(UserRepository::balance(&db, user.id).await.unwrap(), Some(10));
    }
}
