use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, to_bson},
    options::IndexOptions,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::data::is_duplicate_key;
use crate::domain::error::DomainError;
use crate::domain::product::Product;
use crate::presentation::dto::UpdateProductRequest;

/// Conditions combined with AND semantics; absent fields are not applied.
/// `price_below` is the strict `< value` lookup, `price_at_most` the `<= value`
/// form used by the combined filter endpoint.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub featured: Option<bool>,
    pub price_below: Option<f64>,
    pub price_at_most: Option<f64>,
    pub rating_above: Option<f64>,
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: Product) -> Result<Product, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError>;
    async fn find_all(&self) -> Result<Vec<Product>, DomainError>;
    async fn find_filtered(&self, filter: ProductFilter) -> Result<Vec<Product>, DomainError>;
    async fn update(
        &self,
        id: Uuid,
        update: UpdateProductRequest,
    ) -> Result<Option<Product>, DomainError>;
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Product>("products"),
        }
    }

    pub async fn init_indexes(&self) -> Result<(), DomainError> {
        let index = IndexModel::builder()
            .keys(doc! { "productId": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_product_id_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(featured) = filter.featured {
            doc.insert("featured", featured);
        }
        if let Some(value) = filter.price_below {
            doc.insert("price", doc! { "$lt": value });
        }
        if let Some(value) = filter.price_at_most {
            doc.insert("price", doc! { "$lte": value });
        }
        if let Some(value) = filter.rating_above {
            // Documents without a rating never match, same as the $gt operator.
            doc.insert("rating", doc! { "$gt": value });
        }

        doc
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    async fn create(&self, product: Product) -> Result<Product, DomainError> {
        self.collection.insert_one(&product).await.map_err(|e| {
            if is_duplicate_key(&e) {
                DomainError::DuplicateProductId(product.product_id.clone())
            } else {
                error!("failed to create product: {}", e);
                DomainError::from(e)
            }
        })?;

        info!(id = %product.id, product_id = %product.product_id, "product created");
        Ok(product)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        self.collection
            .find_one(Self::id_filter(id))
            .await
            .map_err(|e| {
                error!("failed to find product {}: {}", id, e);
                DomainError::from(e)
            })
    }

    async fn find_all(&self) -> Result<Vec<Product>, DomainError> {
        let cursor = self.collection.find(doc! {}).await.map_err(|e| {
            error!("failed to list products: {}", e);
            DomainError::from(e)
        })?;
        cursor.try_collect().await.map_err(DomainError::from)
    }

    async fn find_filtered(&self, filter: ProductFilter) -> Result<Vec<Product>, DomainError> {
        let cursor = self
            .collection
            .find(Self::build_filter(&filter))
            .await
            .map_err(|e| {
                error!("failed to query products: {}", e);
                DomainError::from(e)
            })?;
        cursor.try_collect().await.map_err(DomainError::from)
    }

    async fn update(
        &self,
        id: Uuid,
        update: UpdateProductRequest,
    ) -> Result<Option<Product>, DomainError> {
        let filter = Self::id_filter(id);
        let Some(mut product) = self.collection.find_one(filter.clone()).await? else {
            return Ok(None);
        };

        product.apply_update(update);

        self.collection
            .replace_one(filter, &product)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    DomainError::DuplicateProductId(product.product_id.clone())
                } else {
                    error!("failed to update product {}: {}", id, e);
                    DomainError::from(e)
                }
            })?;

        info!(id = %id, "product updated");
        Ok(Some(product))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = self
            .collection
            .delete_one(Self::id_filter(id))
            .await
            .map_err(|e| {
                error!("failed to delete product {}: {}", id, e);
                DomainError::from(e)
            })?;

        if result.deleted_count == 0 {
            return Err(DomainError::ProductNotFound(id));
        }

        info!(id = %id, "product deleted");
        Ok(())
    }
}
