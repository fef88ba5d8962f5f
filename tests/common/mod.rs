#![allow(dead_code)]
use log::LevelFilter;
use sqlmod::{Connection, Error, Result, ResultSet, RowLabeled, StatementError, Value};
use std::{
    collections::VecDeque,
    env,
    sync::{Arc, Mutex},
};

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Run `f` with logging turned off, for calls expected to log errors.
pub fn silent<T>(f: impl FnOnce() -> T) -> T {
    let level = log::max_level();
    log::set_max_level(LevelFilter::Off);
    let result = f();
    log::set_max_level(level);
    result
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Query(String),
    Parameterized(String, Vec<Value>),
    Prepared(String, Vec<Value>),
    Prepare(String, String),
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    results: VecDeque<Result<ResultSet>>,
    failing: Vec<String>,
}

/// In memory connection: records every call and answers with the scripted results, in order.
///
/// Clones share the same state, keep one to inspect the calls once the other is moved into a
/// `Database`. `BEGIN`, `COMMIT` and `ROLLBACK` never consume a scripted result.
#[derive(Clone, Default)]
pub struct RecordingConnection {
    state: Arc<Mutex<State>>,
}

impl RecordingConnection {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push_result(&self, result: ResultSet) -> &Self {
        self.state.lock().unwrap().results.push_back(Ok(result));
        self
    }
    pub fn push_error(&self, message: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .results
            .push_back(Err(Error::msg(message.to_owned())));
        self
    }
    /// Every call whose statement text or name is `sql` fails.
    pub fn fail_on(&self, sql: &str) -> &Self {
        self.state.lock().unwrap().failing.push(sql.to_owned());
        self
    }
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }
    /// Text of the unparameterized queries.
    pub fn queries(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Query(sql) => Some(sql),
                _ => None,
            })
            .collect()
    }
    pub fn clear(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    fn record(&self, call: Call, key: &str) -> Result<ResultSet> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing.iter().any(|v| v == key) {
            return Err(Error::msg(format!("`{key}` failed")));
        }
        if matches!(key, "BEGIN" | "COMMIT" | "ROLLBACK") {
            return Ok(ResultSet::empty());
        }
        state
            .results
            .pop_front()
            .unwrap_or_else(|| Ok(ResultSet::empty()))
    }
}

impl Connection for RecordingConnection {
    fn query(&mut self, sql: &str) -> Result<ResultSet> {
        self.record(Call::Query(sql.into()), sql)
    }
    fn execute_parameterized(&mut self, sql: &str, args: &[Value]) -> Result<ResultSet> {
        self.record(Call::Parameterized(sql.into(), args.to_vec()), sql)
    }
    fn execute_prepared(&mut self, name: &str, args: &[Value]) -> Result<ResultSet> {
        self.record(Call::Prepared(name.into(), args.to_vec()), name)
    }
    fn prepare(&mut self, name: &str, sql: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Prepare(name.into(), sql.into()));
        if state.failing.iter().any(|v| v == name || v == sql) {
            return Err(Error::msg(format!("Preparing `{name}` failed")));
        }
        Ok(())
    }
}

pub fn text(value: &str) -> Value {
    Value::Varchar(Some(value.into()))
}

pub fn rows(rows: &[&[(&str, Value)]]) -> ResultSet {
    rows.iter()
        .map(|row| row.iter().cloned().collect::<RowLabeled>())
        .collect()
}

pub fn error_kind(error: &Error) -> StatementError {
    StatementError::find(error)
        .cloned()
        .unwrap_or_else(|| panic!("Expected a StatementError, got: {error:#}"))
}
