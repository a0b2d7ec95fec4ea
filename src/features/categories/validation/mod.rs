//! Category hierarchy and attribute-schema rules.
//!
//! - [`resolve_category_type`] classifies a category from its structure.
//! - [`creation`] holds one creation handler per category type plus the
//!   registry that dispatches to them.
//! - [`attribute`] holds one value validator per attribute type, their
//!   registry, and the validator that checks product attributes against a
//!   category schema.

pub mod attribute;
pub mod creation;
mod type_resolver;

pub use attribute::{AttributeValidatorRegistry, CategoryAttributeValidator};
pub use creation::CategoryHandlerRegistry;
pub use type_resolver::resolve_category_type;
