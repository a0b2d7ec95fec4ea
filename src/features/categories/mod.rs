//! Category hierarchy and attribute schemas.
//!
//! Categories form a PARENT -> SUB -> CHILD tree. Only CHILD categories carry an
//! attribute schema, and only CHILD categories may hold products.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/categories` | Create a category (admin) |
//! | GET | `/api/categories` | List categories (`?type=`, `?tree=true`) |
//! | GET | `/api/categories/{id}` | Get category by id |
//! | GET | `/api/categories/{id}/children` | List direct children |
//! | POST | `/api/categories/{id}/attributes/validate` | Check attribute values against the schema |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod validation;

pub use services::CategoryService;
