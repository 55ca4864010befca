use async_trait::async_trait;
use common::{Product, ProductInput};
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;

/// Storage seam used by the HTTP layer.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, ServiceError>;
    async fn create(&self, input: &ProductInput) -> Result<Product, ServiceError>;
    /// Returns the number of rows overwritten.
    async fn update(&self, id: i32, input: &ProductInput) -> Result<u64, ServiceError>;
    /// Returns the number of rows removed.
    async fn delete(&self, id: i32) -> Result<u64, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        let rows = crate::product_service::list_products(&self.db).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn create(&self, input: &ProductInput) -> Result<Product, ServiceError> {
        crate::product_service::create_product(&self.db, input).await.map(Product::from)
    }

    async fn update(&self, id: i32, input: &ProductInput) -> Result<u64, ServiceError> {
        crate::product_service::update_product(&self.db, id, input).await
    }

    async fn delete(&self, id: i32) -> Result<u64, ServiceError> {
        crate::product_service::delete_product(&self.db, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn repository_round_trip() -> Result<(), anyhow::Error> {
        let repo = SeaOrmProductRepository::new(get_db().await?);
        let input = ProductInput { name: "X".into(), description: "Y".into(), price: 1.5 };

        let created = repo.create(&input).await?;
        assert_eq!(created.name, "X");
        assert_eq!(repo.list().await?, vec![created.clone()]);

        let changed = ProductInput { name: "X2".into(), ..input };
        assert_eq!(repo.update(created.id, &changed).await?, 1);
        assert_eq!(repo.list().await?, vec![created.with_input(&changed)]);

        assert_eq!(repo.delete(created.id).await?, 1);
        assert_eq!(repo.delete(created.id).await?, 0);
        Ok(())
    }
}
