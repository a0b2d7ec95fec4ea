mod handlers;
mod registry;

pub use registry::CategoryHandlerRegistry;
