use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::product_repository::{ProductFilter, ProductRepository};
use crate::domain::error::DomainError;
use crate::domain::product::Product;
use crate::presentation::dto::{CreateProductRequest, UpdateProductRequest};

#[derive(Clone)]
pub struct ProductService<R: ProductRepository + 'static> {
    repo: Arc<R>,
}

impl<R> ProductService<R>
where
    R: ProductRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ProductNotFound(id))
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        self.repo.find_all().await
    }

    pub async fn list_filtered(&self, filter: ProductFilter) -> Result<Vec<Product>, DomainError> {
        self.repo.find_filtered(filter).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProductRequest) -> Result<Product, DomainError> {
        self.repo.create(Product::new(input)).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        id: Uuid,
        update: UpdateProductRequest,
    ) -> Result<Product, DomainError> {
        match self.repo.update(id, update).await? {
            Some(product) => Ok(product),
            None => Err(DomainError::ProductNotFound(id)),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct InMemoryProductRepository {
        products: Mutex<Vec<Product>>,
    }

    impl InMemoryProductRepository {
        fn new() -> Self {
            Self {
                products: Mutex::new(Vec::new()),
            }
        }

        fn count(&self) -> usize {
            self.products.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ProductRepository for InMemoryProductRepository {
        async fn create(&self, product: Product) -> Result<Product, DomainError> {
            let mut products = self.products.lock().unwrap();
            if products.iter().any(|p| p.product_id == product.product_id) {
                return Err(DomainError::DuplicateProductId(product.product_id.clone()));
            }
            products.push(product.clone());
            Ok(product)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
            Ok(self
                .products
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned())
        }

        async fn find_all(&self) -> Result<Vec<Product>, DomainError> {
            Ok(self.products.lock().unwrap().clone())
        }

        async fn find_filtered(&self, filter: ProductFilter) -> Result<Vec<Product>, DomainError> {
            // Same comparison semantics as the document store, including
            // missing ratings never matching the exclusive lower bound.
            Ok(self
                .products
                .lock()
                .unwrap()
                .iter()
                .filter(|p| filter.featured.is_none_or(|f| p.featured == f))
                .filter(|p| filter.price_below.is_none_or(|v| p.price < v))
                .filter(|p| filter.price_at_most.is_none_or(|v| p.price <= v))
                .filter(|p| {
                    filter
                        .rating_above
                        .is_none_or(|v| p.rating.is_some_and(|r| r > v))
                })
                .cloned()
                .collect())
        }

        async fn update(
            &self,
            id: Uuid,
            update: UpdateProductRequest,
        ) -> Result<Option<Product>, DomainError> {
            let mut products = self.products.lock().unwrap();
            let Some(product) = products.iter_mut().find(|p| p.id == id) else {
                return Ok(None);
            };
            product.apply_update(update);
            Ok(Some(product.clone()))
        }

        async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
            let mut products = self.products.lock().unwrap();
            let before = products.len();
            products.retain(|p| p.id != id);
            if products.len() == before {
                return Err(DomainError::ProductNotFound(id));
            }
            Ok(())
        }
    }

    fn service() -> ProductService<InMemoryProductRepository> {
        ProductService::new(Arc::new(InMemoryProductRepository::new()))
    }

    fn create_request(product_id: &str, price: f64, rating: f64, featured: bool) -> CreateProductRequest {
        CreateProductRequest {
            product_id: product_id.into(),
            name: format!("product {}", product_id),
            price,
            featured,
            rating: Some(rating),
            company: "acme".into(),
        }
    }

    #[tokio::test]
    async fn created_product_round_trips_through_get() {
        let service = service();

        let created = service
            .create_product(create_request("p-1", 10.0, 4.0, true))
            .await
            .unwrap();
        let fetched = service.get_product(created.id).await.unwrap();

        assert_eq!(fetched.product_id, "p-1");
        assert_eq!(fetched.name, "product p-1");
        assert_eq!(fetched.price, 10.0);
        assert_eq!(fetched.rating, Some(4.0));
        assert!(fetched.featured);
        assert_eq!(fetched.company, "acme");
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn duplicate_product_id_is_rejected() {
        let service = service();

        service
            .create_product(create_request("p-1", 10.0, 4.0, true))
            .await
            .unwrap();
        let err = service
            .create_product(create_request("p-1", 20.0, 2.0, false))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::DuplicateProductId(_)));
        assert_eq!(service.repo.count(), 1);
    }

    #[tokio::test]
    async fn update_of_missing_product_is_not_found_and_creates_nothing() {
        let service = service();

        let err = service
            .update_product(
                Uuid::new_v4(),
                UpdateProductRequest {
                    price: Some(99.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::ProductNotFound(_)));
        assert_eq!(service.repo.count(), 0);
    }

    #[tokio::test]
    async fn partial_update_replaces_only_given_fields() {
        let service = service();

        let created = service
            .create_product(create_request("p-1", 10.0, 4.0, true))
            .await
            .unwrap();
        let updated = service
            .update_product(
                created.id,
                UpdateProductRequest {
                    price: Some(12.5),
                    featured: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, 12.5);
        assert!(!updated.featured);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.rating, created.rating);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn deleting_a_missing_product_is_not_found_every_time() {
        let service = service();

        let created = service
            .create_product(create_request("p-1", 10.0, 4.0, true))
            .await
            .unwrap();

        service.delete_product(created.id).await.unwrap();
        let first = service.delete_product(created.id).await.unwrap_err();
        let second = service.delete_product(created.id).await.unwrap_err();

        assert!(matches!(first, DomainError::ProductNotFound(_)));
        assert!(matches!(second, DomainError::ProductNotFound(_)));
    }

    async fn seeded_service() -> ProductService<InMemoryProductRepository> {
        let service = service();
        // A: price 10, rating 4, featured. B: price 20, rating 2, not featured.
        service
            .create_product(create_request("a", 10.0, 4.0, true))
            .await
            .unwrap();
        service
            .create_product(create_request("b", 20.0, 2.0, false))
            .await
            .unwrap();
        service
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.product_id.as_str()).collect()
    }

    #[tokio::test]
    async fn price_ceiling_filter_keeps_cheaper_product() {
        let service = seeded_service().await;
        let found = service
            .list_filtered(ProductFilter {
                price_at_most: Some(15.0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(ids(&found), ["a"]);
    }

    #[tokio::test]
    async fn rating_floor_filter_keeps_higher_rated_product() {
        let service = seeded_service().await;
        let found = service
            .list_filtered(ProductFilter {
                rating_above: Some(3.0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(ids(&found), ["a"]);
    }

    #[tokio::test]
    async fn featured_filter_keeps_featured_product() {
        let service = seeded_service().await;
        let found = service
            .list_filtered(ProductFilter {
                featured: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(ids(&found), ["a"]);
    }

    #[tokio::test]
    async fn combined_filters_use_and_semantics() {
        let service = seeded_service().await;
        // A fails featured=false, B fails price<=15.
        let found = service
            .list_filtered(ProductFilter {
                price_at_most: Some(15.0),
                featured: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn strict_price_bound_excludes_equal_price() {
        let service = seeded_service().await;
        let found = service
            .list_filtered(ProductFilter {
                price_below: Some(10.0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn unrated_products_never_match_a_rating_floor() {
        let service = service();
        let mut request = create_request("c", 5.0, 0.0, false);
        request.rating = None;
        service.create_product(request).await.unwrap();

        let found = service
            .list_filtered(ProductFilter {
                rating_above: Some(0.0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(found.is_empty());
    }
}
