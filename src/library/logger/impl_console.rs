use crate::library::logger::interface::Logger;
use chrono::Local;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LoggerConsole {
    namespace: Option<String>,
    verbosity: u8,
}

impl LoggerConsole {
    pub fn new(verbosity: u8) -> Self {
        Self {
            namespace: None,
            verbosity,
        }
    }

    fn format_line(&self, level: &str, message: &str) -> String {
        let formatted = Local::now().format("%Y-%m-%d %I:%M:%S%.3f %p");
        match &self.namespace {
            Some(namespace) => format!("[{}] {} {}: {}", formatted, level, namespace, message),
            None => format!("[{}] {} {}", formatted, level, message),
        }
    }
}

impl Logger for LoggerConsole {
    fn info(&self, message: &str) {
        println!("{}", self.format_line("INFO", message));
    }

    fn debug(&self, message: &str) {
        if self.verbosity > 0 {
            println!("{}", self.format_line("DEBUG", message));
        }
    }

    fn error(&self, message: &str) {
        eprintln!("{}", self.format_line("ERROR", message));
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        let new_namespace = match &self.namespace {
            Some(current) => format!("{}:{}", current, namespace),
            None => namespace.to_string(),
        };

        Arc::new(LoggerConsole {
            namespace: Some(new_namespace),
            verbosity: self.verbosity,
        })
    }
}
