//! Test repositories — mock `ProductRepository` and `RatingRepository`
//! implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use catalog_core::clock::Clock;
use catalog_core::context::RequestContext;
use catalog_core::error::DomainError;
use catalog_core::repository::{NewRating, Product, ProductRepository, Rating, RatingRepository};

use crate::clock::FixedClock;

/// Builds a product fixture stamped with `FixedClock::standard()`.
#[must_use]
pub fn product(id: i64, name: &str) -> Product {
    Product {
        id,
        name: name.to_owned(),
        description: None,
        price_cents: 1_999,
        created_at: FixedClock::standard().now(),
    }
}

/// Builds a rating fixture stamped with `FixedClock::standard()`.
#[must_use]
pub fn rating(id: i64, product_id: i64, score: i32, review: &str) -> Rating {
    Rating {
        id,
        product_id,
        rating: score,
        review: review.to_owned(),
        created_at: FixedClock::standard().now(),
    }
}

/// A product repository over a fixed list that records every lookup.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: Vec<Product>,
    get_all_calls: Mutex<usize>,
    find_by_id_calls: Mutex<Vec<i64>>,
}

impl InMemoryProductRepository {
    /// Create a repository that serves `products` in the given order.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    /// Number of `get_all` calls received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn get_all_calls(&self) -> usize {
        *self.get_all_calls.lock().unwrap()
    }

    /// IDs passed to `find_by_id`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn find_by_id_calls(&self) -> Vec<i64> {
        self.find_by_id_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_all(&self, _ctx: &RequestContext) -> Result<Vec<Product>, DomainError> {
        *self.get_all_calls.lock().unwrap() += 1;
        Ok(self.products.clone())
    }

    async fn find_by_id(&self, _ctx: &RequestContext, id: i64) -> Result<Product, DomainError> {
        self.find_by_id_calls.lock().unwrap().push(id);
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(DomainError::NotFound {
                entity: "product",
                id,
            })
    }
}

/// A product repository that always returns a persistence error.
#[derive(Debug)]
pub struct FailingProductRepository;

#[async_trait]
impl ProductRepository for FailingProductRepository {
    async fn get_all(&self, _ctx: &RequestContext) -> Result<Vec<Product>, DomainError> {
        Err(DomainError::Persistence("connection refused".into()))
    }

    async fn find_by_id(&self, _ctx: &RequestContext, _id: i64) -> Result<Product, DomainError> {
        Err(DomainError::Persistence("connection refused".into()))
    }
}

#[derive(Debug)]
struct RatingState {
    ratings: Vec<Rating>,
    next_id: i64,
    lookups_by_product: Vec<i64>,
    created: Vec<(RequestContext, NewRating)>,
    lookups_by_id: Vec<i64>,
}

/// A rating repository backed by a vector. `create` assigns sequential IDs
/// and stamps `created_at` from the configured clock, so `find_by_id` returns
/// fields the caller did not supply. Every call is recorded.
#[derive(Debug)]
pub struct InMemoryRatingRepository {
    clock: FixedClock,
    state: Mutex<RatingState>,
}

impl InMemoryRatingRepository {
    /// Create an empty repository whose generated IDs start at 1.
    #[must_use]
    pub fn new(clock: FixedClock) -> Self {
        Self::with_ratings(clock, Vec::new())
    }

    /// Create a repository seeded with `ratings`. Generated IDs continue
    /// after the largest seeded ID.
    #[must_use]
    pub fn with_ratings(clock: FixedClock, ratings: Vec<Rating>) -> Self {
        let next_id = ratings.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            clock,
            state: Mutex::new(RatingState {
                ratings,
                next_id,
                lookups_by_product: Vec::new(),
                created: Vec::new(),
                lookups_by_id: Vec::new(),
            }),
        }
    }

    /// Product IDs passed to `get_all_by_product_id`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn get_all_by_product_id_calls(&self) -> Vec<i64> {
        self.state.lock().unwrap().lookups_by_product.clone()
    }

    /// Ratings passed to `create`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn create_calls(&self) -> Vec<NewRating> {
        self.state
            .lock()
            .unwrap()
            .created
            .iter()
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// Contexts passed to `create`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn create_contexts(&self) -> Vec<RequestContext> {
        self.state
            .lock()
            .unwrap()
            .created
            .iter()
            .map(|(ctx, _)| *ctx)
            .collect()
    }

    /// IDs passed to `find_by_id`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn find_by_id_calls(&self) -> Vec<i64> {
        self.state.lock().unwrap().lookups_by_id.clone()
    }
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn get_all_by_product_id(
        &self,
        _ctx: &RequestContext,
        product_id: i64,
    ) -> Result<Vec<Rating>, DomainError> {
        let mut state = self.state.lock().unwrap();
        state.lookups_by_product.push(product_id);
        Ok(state
            .ratings
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn create(&self, ctx: &RequestContext, rating: &NewRating) -> Result<i64, DomainError> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.created.push((*ctx, rating.clone()));
        state.ratings.push(Rating {
            id,
            product_id: rating.product_id,
            rating: rating.rating,
            review: rating.review.clone(),
            created_at: self.clock.now(),
        });
        Ok(id)
    }

    async fn find_by_id(&self, _ctx: &RequestContext, id: i64) -> Result<Rating, DomainError> {
        let mut state = self.state.lock().unwrap();
        state.lookups_by_id.push(id);
        state
            .ratings
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(DomainError::NotFound { entity: "rating", id })
    }
}

/// A rating repository that always returns a persistence error, counting
/// `create` attempts.
#[derive(Debug, Default)]
pub struct FailingRatingRepository {
    create_attempts: Mutex<usize>,
}

impl FailingRatingRepository {
    /// Create a failing repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `create` calls received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn create_attempts(&self) -> usize {
        *self.create_attempts.lock().unwrap()
    }
}

#[async_trait]
impl RatingRepository for FailingRatingRepository {
    async fn get_all_by_product_id(
        &self,
        _ctx: &RequestContext,
        _product_id: i64,
    ) -> Result<Vec<Rating>, DomainError> {
        Err(DomainError::Persistence("connection refused".into()))
    }

    async fn create(&self, _ctx: &RequestContext, _rating: &NewRating) -> Result<i64, DomainError> {
        *self.create_attempts.lock().unwrap() += 1;
        Err(DomainError::Persistence("connection refused".into()))
    }

    async fn find_by_id(&self, _ctx: &RequestContext, _id: i64) -> Result<Rating, DomainError> {
        Err(DomainError::Persistence("connection refused".into()))
    }
}

/// A rating repository whose writes succeed but whose reads fail, so the
/// re-read after `create` breaks.
#[derive(Debug, Default)]
pub struct UnreadableRatingRepository {
    created: Mutex<Vec<NewRating>>,
    find_by_id_calls: Mutex<Vec<i64>>,
}

impl UnreadableRatingRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ratings accepted by `create`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn created(&self) -> Vec<NewRating> {
        self.created.lock().unwrap().clone()
    }

    /// Ids passed to `find_by_id`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn find_by_id_calls(&self) -> Vec<i64> {
        self.find_by_id_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RatingRepository for UnreadableRatingRepository {
    async fn get_all_by_product_id(
        &self,
        _ctx: &RequestContext,
        _product_id: i64,
    ) -> Result<Vec<Rating>, DomainError> {
        Err(DomainError::Persistence("read replica unavailable".into()))
    }

    async fn create(&self, _ctx: &RequestContext, rating: &NewRating) -> Result<i64, DomainError> {
        let mut created = self.created.lock().unwrap();
        created.push(rating.clone());
        Ok(i64::try_from(created.len()).unwrap_or(i64::MAX))
    }

    async fn find_by_id(&self, _ctx: &RequestContext, id: i64) -> Result<Rating, DomainError> {
        self.find_by_id_calls.lock().unwrap().push(id);
        Err(DomainError::Persistence("read replica unavailable".into()))
    }
}
