use std::sync::{Arc, Mutex};

use salary_dashboard::LoadError;
use salary_dashboard::ingestion::{
    CompositeObserver, DataSource, LoadContext, LoadObserver, LoadOptions, LoadSeverity, LoadStats,
    load_dataset,
};
use salary_dashboard::salary::{load_salaries, salary_schema};
use salary_dashboard::types::{DataType, Field, Schema};

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<usize>>,
    failures: Mutex<Vec<LoadSeverity>>,
    alerts: Mutex<Vec<LoadSeverity>>,
}

impl LoadObserver for RecordingObserver {
    fn on_success(&self, _ctx: &LoadContext, stats: LoadStats) {
        self.successes.lock().unwrap().push(stats.rows);
    }

    fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options_with(obs: Arc<RecordingObserver>, alert_at_or_above: LoadSeverity) -> LoadOptions {
    LoadOptions {
        observer: Some(obs),
        alert_at_or_above,
        ..Default::default()
    }
}

fn fixture() -> DataSource {
    DataSource::Path("tests/fixtures/salaries.csv".into())
}

#[test]
fn observer_receives_success_with_row_count() {
    let obs = Arc::new(RecordingObserver::default());
    let ds = load_salaries(&fixture(), &options_with(obs.clone(), LoadSeverity::Critical)).unwrap();

    assert_eq!(ds.row_count(), 6);
    assert_eq!(obs.successes.lock().unwrap().clone(), vec![6]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());
    let source = DataSource::Path("tests/fixtures/does_not_exist.csv".into());

    let _ = load_dataset(&source, &salary_schema(), &options_with(obs.clone(), LoadSeverity::Critical))
        .unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_schema_error() {
    let obs = Arc::new(RecordingObserver::default());
    let schema = Schema::new(vec![Field::new("definitely_missing", DataType::Utf8)]);

    let _ = load_dataset(&fixture(), &schema, &options_with(obs.clone(), LoadSeverity::Critical))
        .unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn lower_threshold_alerts_on_parse_errors() {
    let obs = Arc::new(RecordingObserver::default());
    let source = DataSource::Path("tests/fixtures/bad_usd.csv".into());

    let _ = load_salaries(&source, &options_with(obs.clone(), LoadSeverity::Error)).unwrap_err();

    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Error]);
}

#[test]
fn composite_observer_fans_out() {
    let a = Arc::new(RecordingObserver::default());
    let b = Arc::new(RecordingObserver::default());
    let a_dyn: Arc<dyn LoadObserver> = a.clone();
    let b_dyn: Arc<dyn LoadObserver> = b.clone();
    let composite = CompositeObserver::new(vec![a_dyn, b_dyn]);
    let opts = LoadOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    load_salaries(&fixture(), &opts).unwrap();

    assert_eq!(a.successes.lock().unwrap().clone(), vec![6]);
    assert_eq!(b.successes.lock().unwrap().clone(), vec![6]);
}

#[test]
fn unreachable_url_fails_immediately_as_critical() {
    let obs = Arc::new(RecordingObserver::default());
    // Port 9 on loopback: nothing listens, so the connection is refused.
    let source = DataSource::Url("http://127.0.0.1:9/salaries.csv".to_string());

    let err = load_salaries(&source, &options_with(obs.clone(), LoadSeverity::Critical)).unwrap_err();

    assert!(matches!(err, LoadError::Http(_)));
    assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
}
