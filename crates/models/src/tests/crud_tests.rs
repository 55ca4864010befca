use crate::db::in_memory;
use crate::product;
use sea_orm::{EntityTrait, QueryOrder};
use anyhow::Result;

/// Test product create / read / delete at the entity level
#[tokio::test]
async fn test_product_crud() -> Result<()> {
    let db = in_memory().await?;

    let created = product::create(&db, "Lamp", "Desk lamp", 19.99).await?;
    assert_eq!(created.name, "Lamp");
    assert_eq!(created.description, "Desk lamp");
    assert_eq!(created.price, 19.99);
    assert!(created.id > 0);

    let found = product::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found, Some(created.clone()));

    product::Entity::delete_by_id(created.id).exec(&db).await?;
    let gone = product::Entity::find_by_id(created.id).one(&db).await?;
    assert!(gone.is_none());
    Ok(())
}

/// Identifiers grow with insertion order and are not reused after delete
#[tokio::test]
async fn test_identifiers_monotonic_and_not_reused() -> Result<()> {
    let db = in_memory().await?;

    let first = product::create(&db, "A", "a", 1.0).await?;
    let second = product::create(&db, "B", "b", 2.0).await?;
    assert!(second.id > first.id);

    product::Entity::delete_by_id(second.id).exec(&db).await?;
    let third = product::create(&db, "C", "c", 3.0).await?;
    assert!(third.id > second.id, "id {} was reused", third.id);

    let ids: Vec<i32> = product::Entity::find()
        .order_by_asc(product::Column::Id)
        .all(&db)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![first.id, third.id]);
    Ok(())
}

/// Conversion to the wire type keeps every field
#[tokio::test]
async fn test_into_wire_product() -> Result<()> {
    let db = in_memory().await?;
    let m = product::create(&db, "X", "Y", 1.5).await?;
    let wire: common::Product = m.clone().into();
    assert_eq!(wire.id, m.id);
    assert_eq!(wire.name, "X");
    assert_eq!(wire.description, "Y");
    assert_eq!(wire.price, 1.5);
    Ok(())
}
