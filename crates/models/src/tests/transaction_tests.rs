use super::{new_fine, new_user, setup_test_db};
use crate::{fine, user};
use anyhow::Result;
use sea_orm::{EntityTrait, TransactionTrait};
use uuid::Uuid;

/// Test basic transaction commit
#[tokio::test]
async fn test_transaction_commit() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, Uuid::new_v4(), new_user("tx-commit")).await?;

    let txn = db.begin().await?;
    let created = fine::create(&txn, new_fine(u.id, "FN-TX-1")).await?;
    txn.commit().await?;

    let found = fine::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());
    Ok(())
}

/// Test transaction rollback
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, Uuid::new_v4(), new_user("tx-rollback")).await?;

    let txn = db.begin().await?;
    let created = fine::create(&txn, new_fine(u.id, "FN-TX-2")).await?;
    txn.rollback().await?;

    let found = fine::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_none());
    Ok(())
}
