use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum DeletionOutcome {
    Deleted,
    Failed(String),
}

/// Per-file outcomes of one delete request, in request order.
#[derive(Debug, Default)]
pub struct DeletionReport {
    pub succeeded: usize,
    pub errors: Vec<String>,
    pub outcomes: Vec<(String, DeletionOutcome)>,
}

impl DeletionReport {
    pub fn record<E: Display>(&mut self, path: String, result: Result<(), E>) {
        let outcome = match result {
            Ok(()) => {
                self.succeeded += 1;
                DeletionOutcome::Deleted
            }
            Err(e) => {
                let reason = e.to_string();
                self.errors
                    .push(format!("Error deleting file {}: {}", path, reason));
                DeletionOutcome::Failed(reason)
            }
        };
        self.outcomes.push((path, outcome));
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
