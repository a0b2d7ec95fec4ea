mod category_gate;
mod product_service;

pub use category_gate::ProductCategoryGate;
pub use product_service::ProductService;
