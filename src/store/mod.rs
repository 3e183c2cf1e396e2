//! In-memory domain collections with write-through persistence.
//!
//! Every mutation re-serializes the touched collection before returning and
//! then notifies registered observers. Operations addressing an id that does
//! not exist are silent no-ops.

pub mod stats;

use chrono::Utc;
use log::debug;
use uuid::Uuid;

use crate::db::persistent::{BOOKINGS_KEY, CART_KEY, FAVORITES_KEY, OFFERS_KEY, WORKERS_KEY};
use crate::db::PersistentStore;
use crate::models::{
    average_rating, cart_total, Booking, BookingStatus, CartItem, NewBooking, NewOffer, NewReview,
    Offer, Review, Worker, WorkerDraft, WorkerId, DEFAULT_REVIEWER_IMAGE,
};

pub use stats::{dashboard_stats, DashboardStats};

#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    WorkerAdded(WorkerId),
    WorkerUpdated(WorkerId),
    WorkerDeleted(WorkerId),
    ReviewAdded { worker_id: WorkerId, review_id: i64 },
    FavoriteToggled { worker_id: WorkerId, favorite: bool },
    BookingAdded(i64),
    BookingCancelled(i64),
    OfferAdded(String),
    OfferDeleted(String),
    CartItemAdded(WorkerId),
    CartItemRejected(WorkerId),
    CartItemRemoved(WorkerId),
    CartCleared,
}

pub type Observer = Box<dyn Fn(&StoreEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddToCart {
    Added,
    AlreadyInCart,
}

pub struct DomainStore {
    persistence: PersistentStore,
    workers: Vec<Worker>,
    favorites: Vec<WorkerId>,
    bookings: Vec<Booking>,
    offers: Vec<Offer>,
    cart: Vec<CartItem>,
    observers: Vec<Observer>,
    last_id: i64,
}

impl DomainStore {
    /// Rehydrates every collection. `fallback` fills in missing coordinates.
    pub fn open(persistence: PersistentStore, fallback: (f64, f64)) -> Self {
        let workers = persistence.load_workers(fallback);
        let favorites: Vec<WorkerId> = persistence.load(FAVORITES_KEY, Vec::new());
        let bookings: Vec<Booking> = persistence.load(BOOKINGS_KEY, Vec::new());
        let offers: Vec<Offer> = persistence.load(OFFERS_KEY, Vec::new());
        let cart: Vec<CartItem> = persistence.load(CART_KEY, Vec::new());

        let last_id = workers
            .iter()
            .map(|w| w.id)
            .chain(workers.iter().flat_map(|w| w.reviews.iter().map(|r| r.id)))
            .chain(bookings.iter().map(|b| b.id))
            .max()
            .unwrap_or(0);

        debug!(
            "Store opened: {} workers, {} favorites, {} bookings, {} offers, {} cart items",
            workers.len(),
            favorites.len(),
            bookings.len(),
            offers.len(),
            cart.len()
        );

        DomainStore {
            persistence,
            workers,
            favorites,
            bookings,
            offers,
            cart,
            observers: Vec::new(),
            last_id,
        }
    }

    pub fn subscribe(&mut self, observer: impl Fn(&StoreEvent) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&self, event: StoreEvent) {
        for observer in &self.observers {
            observer(&event);
        }
    }

    /// Time-derived id, bumped past the last one handed out so two calls in
    /// the same millisecond never collide.
    fn next_id(&mut self) -> i64 {
        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    fn save_workers(&self) {
        self.persistence.save(WORKERS_KEY, &self.workers);
    }

    // ---------------------------------------------------------------- workers

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn get_worker(&self, id: WorkerId) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }

    /// Newest workers come first.
    pub fn add_worker(&mut self, draft: WorkerDraft) -> WorkerId {
        let id = self.next_id();
        let worker = draft.into_worker(id, Utc::now());
        self.workers.insert(0, worker);
        self.save_workers();
        self.emit(StoreEvent::WorkerAdded(id));
        id
    }

    /// Replaces the worker with the same id in place.
    pub fn update_worker(&mut self, worker: Worker) -> bool {
        let Some(slot) = self.workers.iter_mut().find(|w| w.id == worker.id) else {
            return false;
        };
        let id = worker.id;
        *slot = Worker {
            distance: 0.0,
            updated_at: Some(Utc::now()),
            ..worker
        };
        self.save_workers();
        self.emit(StoreEvent::WorkerUpdated(id));
        true
    }

    pub fn toggle_verified(&mut self, id: WorkerId) -> Option<bool> {
        let mut worker = self.get_worker(id)?.clone();
        worker.verified = !worker.verified;
        let verified = worker.verified;
        self.update_worker(worker);
        Some(verified)
    }

    pub fn toggle_featured(&mut self, id: WorkerId) -> Option<bool> {
        let mut worker = self.get_worker(id)?.clone();
        worker.featured = !worker.featured;
        let featured = worker.featured;
        self.update_worker(worker);
        Some(featured)
    }

    /// Bookings, favorites and cart lines referencing the worker are left alone.
    pub fn delete_worker(&mut self, id: WorkerId) -> bool {
        let before = self.workers.len();
        self.workers.retain(|w| w.id != id);
        if self.workers.len() == before {
            return false;
        }
        self.save_workers();
        self.emit(StoreEvent::WorkerDeleted(id));
        true
    }

    /// Prepends the review and recomputes `rating` and `review_count`.
    pub fn add_review(&mut self, worker_id: WorkerId, review: NewReview) -> Option<Review> {
        self.get_worker(worker_id)?;
        let review_id = self.next_id();
        let worker = self.workers.iter_mut().find(|w| w.id == worker_id)?;

        let review = Review {
            id: review_id,
            user_name: review.user_name,
            user_image: DEFAULT_REVIEWER_IMAGE.to_string(),
            rating: review.rating,
            comment: review.comment,
            media_url: review.media_url,
            date: Some(Utc::now().format("%Y-%m-%d").to_string()),
        };
        worker.reviews.insert(0, review.clone());
        worker.review_count = worker.reviews.len() as u32;
        worker.rating = average_rating(&worker.reviews).unwrap_or(worker.rating);

        self.save_workers();
        self.emit(StoreEvent::ReviewAdded { worker_id, review_id });
        Some(review)
    }

    // -------------------------------------------------------------- favorites

    pub fn favorites(&self) -> &[WorkerId] {
        &self.favorites
    }

    pub fn is_favorite(&self, id: WorkerId) -> bool {
        self.favorites.contains(&id)
    }

    /// Returns whether the worker is a favorite afterwards.
    pub fn toggle_favorite(&mut self, id: WorkerId) -> bool {
        let favorite = if self.is_favorite(id) {
            self.favorites.retain(|f| *f != id);
            false
        } else {
            self.favorites.push(id);
            true
        };
        self.persistence.save(FAVORITES_KEY, &self.favorites);
        self.emit(StoreEvent::FavoriteToggled { worker_id: id, favorite });
        favorite
    }

    // --------------------------------------------------------------- bookings

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn add_booking(&mut self, booking: NewBooking) -> Booking {
        let booking = Booking {
            id: self.next_id(),
            worker_id: booking.worker_id,
            worker_name: booking.worker_name,
            service: booking.service,
            date: booking.date,
            customer_name: booking.customer_name,
            status: BookingStatus::Pending,
        };
        self.bookings.push(booking.clone());
        self.persistence.save(BOOKINGS_KEY, &self.bookings);
        self.emit(StoreEvent::BookingAdded(booking.id));
        booking
    }

    /// Moves a live booking to `cancelled`. Terminal bookings are returned
    /// unchanged; `None` only when the id is unknown.
    pub fn cancel_booking(&mut self, id: i64) -> Option<Booking> {
        let booking = self.bookings.iter_mut().find(|b| b.id == id)?;
        if booking.status.is_terminal() {
            return Some(booking.clone());
        }
        booking.status = BookingStatus::Cancelled;
        let cancelled = booking.clone();
        self.persistence.save(BOOKINGS_KEY, &self.bookings);
        self.emit(StoreEvent::BookingCancelled(id));
        Some(cancelled)
    }

    // ----------------------------------------------------------------- offers

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn add_offer(&mut self, offer: NewOffer) -> Offer {
        let offer = Offer {
            id: Uuid::new_v4().to_string(),
            title: offer.title,
            description: offer.description,
            offer_type: offer.offer_type,
            value: offer.value,
            valid_till: offer.valid_till,
        };
        self.offers.push(offer.clone());
        self.persistence.save(OFFERS_KEY, &self.offers);
        self.emit(StoreEvent::OfferAdded(offer.id.clone()));
        offer
    }

    pub fn delete_offer(&mut self, id: &str) -> bool {
        let before = self.offers.len();
        self.offers.retain(|o| o.id != id);
        if self.offers.len() == before {
            return false;
        }
        self.persistence.save(OFFERS_KEY, &self.offers);
        self.emit(StoreEvent::OfferDeleted(id.to_string()));
        true
    }

    // ------------------------------------------------------------------- cart

    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    pub fn cart_total(&self) -> f64 {
        cart_total(&self.cart)
    }

    pub fn add_to_cart(&mut self, item: CartItem) -> AddToCart {
        if self.cart.iter().any(|i| i.worker_id == item.worker_id) {
            self.emit(StoreEvent::CartItemRejected(item.worker_id));
            return AddToCart::AlreadyInCart;
        }
        let worker_id = item.worker_id;
        self.cart.push(item);
        self.persistence.save(CART_KEY, &self.cart);
        self.emit(StoreEvent::CartItemAdded(worker_id));
        AddToCart::Added
    }

    pub fn remove_from_cart(&mut self, worker_id: WorkerId) -> bool {
        let before = self.cart.len();
        self.cart.retain(|i| i.worker_id != worker_id);
        if self.cart.len() == before {
            return false;
        }
        self.persistence.save(CART_KEY, &self.cart);
        self.emit(StoreEvent::CartItemRemoved(worker_id));
        true
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persistence.save(CART_KEY, &self.cart);
        self.emit(StoreEvent::CartCleared);
    }
}
