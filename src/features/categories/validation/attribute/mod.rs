mod category_attribute_validator;
mod registry;
pub mod validators;

pub use category_attribute_validator::CategoryAttributeValidator;
pub use registry::AttributeValidatorRegistry;
