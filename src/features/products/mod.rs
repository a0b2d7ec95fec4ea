//! Products listed under CHILD categories.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/products` | List a product owned by the caller |
//! | PUT | `/api/products/{id}` | Update a product (owner only, versioned) |
//! | GET | `/api/products/{id}` | Get product by id |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use services::{ProductCategoryGate, ProductService};
