use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use crate::models::{
    Appointment, InsertAppointment, InsertOrder, InsertProduct, InsertService, InsertUser, Order,
    Product, Service, UpdateProduct, User,
};

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations. This is the
/// core of the Repository Abstraction pattern, allowing the handlers to
/// interact with the data layer without knowing the specific implementation
/// (in-memory, SQL-backed, etc.).
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Repository>`) safely shareable and usable across Axum's
/// asynchronous task boundaries.
///
/// Identity rules: every entity id is assigned monotonically by the store and
/// never reused, even after a delete. There are no transactions and no joins;
/// callers compose data themselves (order items are a serialized snapshot,
/// not live references).
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Users ---
    async fn get_user(&self, id: i32) -> Option<User>;
    async fn get_user_by_username(&self, username: &str) -> Option<User>;
    // Enforces username uniqueness: returns None when the name is taken.
    // Callers supply `password` already hashed; the store never sees a raw credential.
    async fn create_user(&self, req: InsertUser) -> Option<User>;

    // --- Products ---
    // Optional category filter, exact match, case-sensitive as given.
    async fn get_products(&self, category: Option<String>) -> Vec<Product>;
    async fn get_product(&self, id: i32) -> Option<Product>;
    async fn create_product(&self, req: InsertProduct) -> Product;
    // Partial update: only Some fields are merged. None result means the id is unknown.
    async fn update_product(&self, id: i32, req: UpdateProduct) -> Option<Product>;
    // Physical delete; the only entity that supports one.
    async fn delete_product(&self, id: i32) -> bool;

    // --- Services ---
    async fn get_services(&self) -> Vec<Service>;
    async fn create_service(&self, req: InsertService) -> Service;

    // --- Appointments ---
    async fn get_appointments(&self) -> Vec<Appointment>;
    // New appointments always start in the 'pending' status.
    async fn create_appointment(&self, req: InsertAppointment) -> Appointment;

    // --- Orders ---
    async fn get_orders(&self) -> Vec<Order>;
    // `user_id` is the resolved session principal; any client-supplied value
    // in the payload is discarded in its favor.
    async fn create_order(&self, req: InsertOrder, user_id: Option<i32>) -> Order;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer access across the
/// application state.
pub type RepositoryState = Arc<dyn Repository>;

/// Tables
///
/// The raw table data behind the in-memory store. `BTreeMap` keeps iteration
/// in id order, so listings come back in insertion order without a separate
/// sort. Each table has its own id counter; counters only ever grow.
#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    products: BTreeMap<i32, Product>,
    services: BTreeMap<i32, Service>,
    appointments: BTreeMap<i32, Appointment>,
    orders: BTreeMap<i32, Order>,

    last_user_id: i32,
    last_product_id: i32,
    last_service_id: i32,
    last_appointment_id: i32,
    last_order_id: i32,
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// MemoryRepository
///
/// The concrete implementation of the `Repository` trait, backed by a single
/// `RwLock` over the in-process tables. Requests are serialized only by this
/// lock; the policy is last-write-wins, and a read followed by a write (e.g.
/// update-by-id racing a delete of the same id) is not atomic beyond the
/// individual lock scopes.
#[derive(Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn get_user(&self, id: i32) -> Option<User> {
        self.tables
            .read()
            .expect("store lock poisoned")
            .users
            .get(&id)
            .cloned()
    }

    async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.tables
            .read()
            .expect("store lock poisoned")
            .users
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    /// create_user
    ///
    /// The uniqueness check and the insert happen under one write lock, so two
    /// concurrent registrations of the same username cannot both succeed.
    async fn create_user(&self, req: InsertUser) -> Option<User> {
        let mut tables = self.tables.write().expect("store lock poisoned");
        if tables.users.values().any(|user| user.username == req.username) {
            return None;
        }
        let id = next_id(&mut tables.last_user_id);
        let user = User {
            id,
            username: req.username,
            password: req.password,
            name: req.name,
            role: req.role,
            created_at: Utc::now(),
        };
        tables.users.insert(id, user.clone());
        Some(user)
    }

    /// get_products
    ///
    /// Exact-match category filtering; no filter returns the full catalog.
    async fn get_products(&self, category: Option<String>) -> Vec<Product> {
        let tables = self.tables.read().expect("store lock poisoned");
        tables
            .products
            .values()
            .filter(|product| {
                category
                    .as_deref()
                    .is_none_or(|wanted| product.category == wanted)
            })
            .cloned()
            .collect()
    }

    async fn get_product(&self, id: i32) -> Option<Product> {
        self.tables
            .read()
            .expect("store lock poisoned")
            .products
            .get(&id)
            .cloned()
    }

    async fn create_product(&self, req: InsertProduct) -> Product {
        let mut tables = self.tables.write().expect("store lock poisoned");
        let id = next_id(&mut tables.last_product_id);
        let product = Product {
            id,
            name: req.name,
            description: req.description,
            price: req.price,
            category: req.category,
            image_url: req.image_url,
        };
        tables.products.insert(id, product.clone());
        product
    }

    /// update_product
    ///
    /// Field-wise merge of the partial payload, the in-memory analogue of a
    /// COALESCE update. Returns None for an unknown id.
    async fn update_product(&self, id: i32, req: UpdateProduct) -> Option<Product> {
        let mut tables = self.tables.write().expect("store lock poisoned");
        let product = tables.products.get_mut(&id)?;
        if let Some(name) = req.name {
            product.name = name;
        }
        if let Some(description) = req.description {
            product.description = description;
        }
        if let Some(price) = req.price {
            product.price = price;
        }
        if let Some(category) = req.category {
            product.category = category;
        }
        if let Some(image_url) = req.image_url {
            product.image_url = image_url;
        }
        Some(product.clone())
    }

    async fn delete_product(&self, id: i32) -> bool {
        self.tables
            .write()
            .expect("store lock poisoned")
            .products
            .remove(&id)
            .is_some()
    }

    async fn get_services(&self) -> Vec<Service> {
        self.tables
            .read()
            .expect("store lock poisoned")
            .services
            .values()
            .cloned()
            .collect()
    }

    async fn create_service(&self, req: InsertService) -> Service {
        let mut tables = self.tables.write().expect("store lock poisoned");
        let id = next_id(&mut tables.last_service_id);
        let service = Service {
            id,
            name: req.name,
            description: req.description,
            price: req.price,
            duration: req.duration,
            image_url: req.image_url,
        };
        tables.services.insert(id, service.clone());
        service
    }

    async fn get_appointments(&self) -> Vec<Appointment> {
        self.tables
            .read()
            .expect("store lock poisoned")
            .appointments
            .values()
            .cloned()
            .collect()
    }

    async fn create_appointment(&self, req: InsertAppointment) -> Appointment {
        let mut tables = self.tables.write().expect("store lock poisoned");
        let id = next_id(&mut tables.last_appointment_id);
        let appointment = Appointment {
            id,
            customer_name: req.customer_name,
            contact_phone: req.contact_phone,
            pet_name: req.pet_name,
            service_name: req.service_name,
            date: req.date,
            status: "pending".to_string(),
            created_at: Utc::now(),
        };
        tables.appointments.insert(id, appointment.clone());
        appointment
    }

    async fn get_orders(&self) -> Vec<Order> {
        self.tables
            .read()
            .expect("store lock poisoned")
            .orders
            .values()
            .cloned()
            .collect()
    }

    /// create_order
    ///
    /// Stores the items snapshot verbatim; the client-facing cart shape is
    /// frozen here and never re-derived from the product table.
    async fn create_order(&self, req: InsertOrder, user_id: Option<i32>) -> Order {
        let mut tables = self.tables.write().expect("store lock poisoned");
        let id = next_id(&mut tables.last_order_id);
        let order = Order {
            id,
            customer_name: req.customer_name,
            user_id,
            total: req.total,
            status: "pending".to_string(),
            items: req.items,
            created_at: Utc::now(),
        };
        tables.orders.insert(id, order.clone());
        order
    }
}
