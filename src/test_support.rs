//! In-memory `LifeExecutor` for unit tests

use std::sync::{Arc, Mutex};

use may_postgres::types::ToSql;
use may_postgres::Row;

use crate::executor::{LifeError, LifeExecutor};

/// Records every statement and its parameters instead of talking to a database
///
/// Clones share the same log. `query_all` returns no rows since `Row` cannot be built
/// outside `may_postgres`.
#[derive(Clone, Default)]
pub(crate) struct RecordingExecutor {
    statements: Arc<Mutex<Vec<String>>>,
    params: Arc<Mutex<Vec<Vec<String>>>>,
    fail_on: Arc<Mutex<Option<String>>>,
    affected: Arc<Mutex<u64>>,
}

impl RecordingExecutor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fail any statement containing `needle`
    pub(crate) fn fail_when_contains(&self, needle: &str) {
        *self.fail_on.lock().unwrap() = Some(needle.to_string());
    }

    /// Row count reported by `execute`
    pub(crate) fn set_affected(&self, rows: u64) {
        *self.affected.lock().unwrap() = rows;
    }

    pub(crate) fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    /// Debug rendering of the parameters of each statement
    pub(crate) fn params(&self) -> Vec<Vec<String>> {
        self.params.lock().unwrap().clone()
    }

    fn record(&self, query: &str, params: &[&dyn ToSql]) -> Result<(), LifeError> {
        self.statements.lock().unwrap().push(query.to_string());
        self.params
            .lock()
            .unwrap()
            .push(params.iter().map(|p| format!("{:?}", p)).collect());
        match self.fail_on.lock().unwrap().as_deref() {
            Some(needle) if query.contains(needle) => Err(LifeError::QueryError(format!(
                "RecordingExecutor: refusing statement containing '{}'",
                needle
            ))),
            _ => Ok(()),
        }
    }
}

impl LifeExecutor for RecordingExecutor {
    fn execute(&self, query: &str, params: &[&dyn ToSql]) -> Result<u64, LifeError> {
        self.record(query, params)?;
        Ok(*self.affected.lock().unwrap())
    }

    fn query_one(&self, query: &str, params: &[&dyn ToSql]) -> Result<Row, LifeError> {
        self.record(query, params)?;
        Err(LifeError::QueryError(
            "RecordingExecutor: no rows available".to_string(),
        ))
    }

    fn query_all(&self, query: &str, params: &[&dyn ToSql]) -> Result<Vec<Row>, LifeError> {
        self.record(query, params)?;
        Ok(vec![])
    }
}
