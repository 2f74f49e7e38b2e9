//! Behavioral tests for the deferred-connection facade, driven through a
//! counting mock driver.

use std::cell::RefCell;
use std::rc::Rc;

use hdbconnect_lazy::{
    ConnectionInfo, Driver, DriverConnection, DriverErrorDetails, LazyConnection, LazyHdbError,
    Result, available_drivers,
};

/// Shared ledger of everything the driver was asked to do.
#[derive(Debug, Default, Clone)]
struct Recorder(Rc<RefCell<Ledger>>);

#[derive(Debug, Default)]
struct Ledger {
    connect_attempts: usize,
    calls: Vec<String>,
}

impl Recorder {
    fn attempts(&self) -> usize {
        self.0.borrow().connect_attempts
    }

    fn calls(&self) -> Vec<String> {
        self.0.borrow().calls.clone()
    }
}

#[derive(Debug)]
struct MockDriver {
    recorder: Recorder,
    refuse: bool,
}

impl MockDriver {
    fn accepting(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
            refuse: false,
        }
    }

    fn refusing(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
            refuse: true,
        }
    }
}

impl Driver for MockDriver {
    const NAME: &'static str = "mock";

    type Conn = MockConnection;

    fn connect(&self, info: &ConnectionInfo) -> Result<MockConnection> {
        self.recorder.0.borrow_mut().connect_attempts += 1;
        if self.refuse {
            return Err(LazyHdbError::connection(format!(
                "refused credentials for {}",
                info.url()
            )));
        }
        Ok(MockConnection {
            recorder: self.recorder.clone(),
            in_transaction: false,
            last_error: None,
        })
    }
}

#[derive(Debug)]
struct MockConnection {
    recorder: Recorder,
    in_transaction: bool,
    last_error: Option<DriverErrorDetails>,
}

impl MockConnection {
    fn log(&self, call: impl Into<String>) {
        self.recorder.0.borrow_mut().calls.push(call.into());
    }
}

impl DriverConnection for MockConnection {
    type Statement = String;
    type Rows = Vec<(i32, String)>;

    fn begin_transaction(&mut self) -> Result<()> {
        self.log("begin");
        self.in_transaction = true;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.log("commit");
        self.in_transaction = false;
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.log("rollback");
        self.in_transaction = false;
        Ok(())
    }

    fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    fn execute(&mut self, sql: &str) -> Result<u64> {
        self.log(format!("execute:{sql}"));
        if sql.contains("missing") {
            let details = DriverErrorDetails::new(Some(259), "invalid table name: missing");
            self.last_error = Some(details.clone());
            return Err(LazyHdbError::driver_with_code(
                details.code(),
                details.message(),
            ));
        }
        Ok(3)
    }

    fn query(&mut self, sql: &str) -> Result<Vec<(i32, String)>> {
        self.log(format!("query:{sql}"));
        Ok(vec![(1, "one".to_owned()), (2, "two".to_owned())])
    }

    fn prepare(&mut self, sql: &str) -> Result<String> {
        self.log(format!("prepare:{sql}"));
        Ok(sql.to_owned())
    }

    fn last_insert_id(&mut self) -> Result<Option<i64>> {
        self.log("last_insert_id");
        Ok(Some(42))
    }

    fn last_error(&self) -> Option<&DriverErrorDetails> {
        self.last_error.as_ref()
    }
}

fn lazy(recorder: &Recorder) -> LazyConnection<MockDriver> {
    LazyConnection::with_driver(
        MockDriver::accepting(recorder),
        ConnectionInfo::new("mock://db"),
    )
}

fn lazy_refused(recorder: &Recorder) -> LazyConnection<MockDriver> {
    LazyConnection::with_driver(
        MockDriver::refusing(recorder),
        ConnectionInfo::new("mock://db"),
    )
}

#[test]
fn construction_alone_makes_no_connection() {
    let recorder = Recorder::default();
    let db = lazy(&recorder);

    assert!(!db.is_connected());
    assert_eq!(recorder.attempts(), 0);
    assert!(recorder.calls().is_empty());
}

#[test]
fn two_operations_share_one_connection() {
    let recorder = Recorder::default();
    let mut db = lazy(&recorder);

    assert_eq!(db.execute("UPDATE t SET x = 1").unwrap(), 3);
    assert_eq!(db.query("SELECT * FROM t").unwrap().len(), 2);
    assert_eq!(recorder.attempts(), 1);
    assert!(db.is_connected());
}

#[test]
fn static_reads_never_connect() {
    let recorder = Recorder::default();
    let db = lazy(&recorder);

    assert_eq!(db.url(), "mock://db");
    assert_eq!(db.info().username(), None);
    assert!(!db.is_connected());
    assert_eq!(available_drivers(), ["hana"]);
    assert_eq!(recorder.attempts(), 0);
}

#[test]
fn prepare_then_execute_delegates_in_order() {
    let recorder = Recorder::default();
    let mut db = lazy(&recorder);

    let statement = db.prepare("INSERT INTO t VALUES (?)").unwrap();
    let affected = db.execute("INSERT INTO t VALUES (1)").unwrap();

    assert_eq!(recorder.attempts(), 1);
    assert_eq!(statement, "INSERT INTO t VALUES (?)");
    assert_eq!(affected, 3);
    assert_eq!(
        recorder.calls(),
        [
            "prepare:INSERT INTO t VALUES (?)",
            "execute:INSERT INTO t VALUES (1)",
        ]
    );
}

#[test]
fn lazy_results_match_a_direct_connection() {
    let direct_recorder = Recorder::default();
    let mut direct = MockDriver::accepting(&direct_recorder)
        .connect(&ConnectionInfo::new("mock://db"))
        .unwrap();

    let lazy_recorder = Recorder::default();
    let mut db = lazy(&lazy_recorder);

    assert_eq!(
        direct.query("SELECT * FROM t").unwrap(),
        db.query("SELECT * FROM t").unwrap()
    );
    assert_eq!(
        direct.execute("UPDATE t SET x = 1").unwrap(),
        db.execute("UPDATE t SET x = 1").unwrap()
    );
    assert_eq!(
        direct.last_insert_id().unwrap(),
        db.last_insert_id().unwrap()
    );
}

#[test]
fn failed_connect_surfaces_at_first_use_and_latches() {
    let recorder = Recorder::default();
    let mut db = lazy_refused(&recorder);

    let first = db.begin_transaction().unwrap_err();
    assert!(first.is_connection());
    assert!(first.message().contains("refused credentials"));
    assert_eq!(recorder.attempts(), 1);

    // The second call fails fast without a second attempt.
    let second = db.execute("SELECT 1").unwrap_err();
    assert!(second.is_connection());
    assert!(second.message().contains("previously failed"));
    assert_eq!(recorder.attempts(), 1);
    assert!(!db.is_connected());
}

#[test]
fn failed_connect_starts_no_transaction() {
    let recorder = Recorder::default();
    let mut db = lazy_refused(&recorder);

    assert!(db.begin_transaction().is_err());
    // The driver connection was never built, so nothing was delegated.
    assert!(recorder.calls().is_empty());
}

#[test]
fn transaction_state_is_delegated() {
    let recorder = Recorder::default();
    let mut db = lazy(&recorder);

    assert!(!db.in_transaction().unwrap());
    db.begin_transaction().unwrap();
    assert!(db.in_transaction().unwrap());
    db.commit().unwrap();
    assert!(!db.in_transaction().unwrap());

    db.begin_transaction().unwrap();
    db.rollback().unwrap();
    assert!(!db.in_transaction().unwrap());

    assert_eq!(recorder.attempts(), 1);
    assert_eq!(
        recorder.calls(),
        ["begin", "commit", "begin", "rollback"]
    );
}

#[test]
fn driver_errors_pass_through_and_are_queryable() {
    let recorder = Recorder::default();
    let mut db = lazy(&recorder);

    assert_eq!(db.last_error_code().unwrap(), None);

    let err = db.execute("DELETE FROM missing").unwrap_err();
    assert!(err.is_driver());
    assert_eq!(err.driver_code(), Some(259));

    assert_eq!(db.last_error_code().unwrap(), Some(259));
    let details = db.last_error().unwrap().unwrap();
    assert_eq!(details.message(), "invalid table name: missing");

    // A failed operation does not disturb the established connection.
    assert_eq!(recorder.attempts(), 1);
    assert!(db.is_connected());
}

#[test]
fn last_insert_id_is_forwarded() {
    let recorder = Recorder::default();
    let mut db = lazy(&recorder);

    assert_eq!(db.last_insert_id().unwrap(), Some(42));
    assert_eq!(recorder.attempts(), 1);
}
