mod attribute;
mod category;

pub use attribute::{AttributeDefinition, AttributeSchema, AttributeType, AttributeValues};
pub use category::{Category, CategoryType};
