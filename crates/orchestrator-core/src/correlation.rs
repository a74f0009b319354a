//! Correlation id threaded through a single search invocation so that every
//! per-indexer log line can be tied back to the request that caused it.

use std::cell::RefCell;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CorrelationContext {
    pub id: Uuid,
    pub operation: String,
}

impl CorrelationContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            operation: operation.into(),
        }
    }
}

thread_local! {
    static CURRENT: RefCell<Option<CorrelationContext>> = RefCell::new(None);
}

pub fn set_current_context(ctx: CorrelationContext) {
    CURRENT.with(|c| *c.borrow_mut() = Some(ctx));
}

pub fn current_context() -> Option<CorrelationContext> {
    CURRENT.with(|c| c.borrow().clone())
}

pub fn clear_current_context() {
    CURRENT.with(|c| *c.borrow_mut() = None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_current_context() {
        clear_current_context();
        assert!(current_context().is_none());
        set_current_context(CorrelationContext::new("search"));
        assert_eq!(current_context().unwrap().operation, "search");
        clear_current_context();
    }
}
