use std::sync::Arc;

pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn debug(&self, message: &str);
    fn error(&self, message: &str);
    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync>;
}
