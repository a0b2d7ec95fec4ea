use std::collections::HashMap;
use std::sync::Arc;

use super::handlers::{
    CategoryCreationHandler, ChildCategoryCreationHandler, ParentCategoryCreationHandler,
    SubCategoryCreationHandler,
};
use crate::core::error::{AppError, Result};
use crate::features::categories::models::CategoryType;
use crate::features::categories::store::CategoryStore;

/// Immutable lookup from category type to its creation handler
pub struct CategoryHandlerRegistry {
    handlers: HashMap<CategoryType, Arc<dyn CategoryCreationHandler>>,
}

impl CategoryHandlerRegistry {
    pub fn new(handlers: Vec<Arc<dyn CategoryCreationHandler>>) -> Self {
        let handlers = handlers
            .into_iter()
            .map(|h| (h.category_type(), h))
            .collect();
        Self { handlers }
    }

    /// One handler per [`CategoryType`], all sharing `store`
    pub fn standard(store: Arc<dyn CategoryStore>) -> Self {
        Self::new(vec![
            Arc::new(ParentCategoryCreationHandler::new(Arc::clone(&store))),
            Arc::new(SubCategoryCreationHandler::new(Arc::clone(&store))),
            Arc::new(ChildCategoryCreationHandler::new(store)),
        ])
    }

    pub fn get_handler(&self, category_type: CategoryType) -> Result<Arc<dyn CategoryCreationHandler>> {
        self.handlers.get(&category_type).cloned().ok_or_else(|| {
            tracing::error!("No creation handler registered for {}", category_type);
            AppError::CategoryType("No category creation handler.".to_string())
        })
    }
}
