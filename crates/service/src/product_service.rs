use common::ProductInput;
use models::product;
use sea_orm::{sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::errors::ServiceError;

/// All products in insertion order.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>, ServiceError> {
    product::Entity::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Create a product.
pub async fn create_product(db: &DatabaseConnection, input: &ProductInput) -> Result<product::Model, ServiceError> {
    Ok(product::create(db, &input.name, &input.description, input.price).await?)
}

/// Overwrite the mutable fields of product `id`.
///
/// No existence check: the number of rows touched is returned, `0` when `id`
/// is unknown.
pub async fn update_product(db: &DatabaseConnection, id: i32, input: &ProductInput) -> Result<u64, ServiceError> {
    let res = product::Entity::update_many()
        .col_expr(product::Column::Name, Expr::value(input.name.clone()))
        .col_expr(product::Column::Price, Expr::value(input.price))
        .col_expr(product::Column::Description, Expr::value(input.description.clone()))
        .filter(product::Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

/// Delete product `id`; returns the number of rows removed.
pub async fn delete_product(db: &DatabaseConnection, id: i32) -> Result<u64, ServiceError> {
    let res = product::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn input(name: &str, description: &str, price: f64) -> ProductInput {
        ProductInput { name: name.into(), description: description.into(), price }
    }

    #[tokio::test]
    async fn product_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert!(list_products(&db).await?.is_empty());

        let created = create_product(&db, &input("X", "Y", 1.5)).await?;
        let listed = list_products(&db).await?;
        assert_eq!(listed, vec![created.clone()]);

        let touched = update_product(&db, created.id, &input("X2", "Y", 1.5)).await?;
        assert_eq!(touched, 1);
        let after = list_products(&db).await?;
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].id, created.id);
        assert_eq!(after[0].name, "X2");
        assert_eq!(after[0].description, "Y");
        assert_eq!(after[0].price, 1.5);

        assert_eq!(delete_product(&db, created.id).await?, 1);
        assert!(list_products(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id_are_noops() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let kept = create_product(&db, &input("Keep", "me", 2.0)).await?;

        assert_eq!(update_product(&db, kept.id + 100, &input("Other", "thing", 9.0)).await?, 0);
        assert_eq!(delete_product(&db, kept.id + 100).await?, 0);

        assert_eq!(list_products(&db).await?, vec![kept]);
        Ok(())
    }

    #[tokio::test]
    async fn list_is_in_insertion_order() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let names = ["c", "a", "b"];
        for n in names {
            create_product(&db, &input(n, "d", 1.0)).await?;
        }
        let listed: Vec<String> = list_products(&db).await?.into_iter().map(|p| p.name).collect();
        assert_eq!(listed, names);
        Ok(())
    }
}
