// domain-sweep-lib/tests/integration.rs

//! End-to-end sweeps through the public API with a scripted resolver.

use async_trait::async_trait;
use domain_sweep_lib::{
    write_report, DomainSweeper, LookupOutcome, Resolve, SweepConfig, SweepError,
};
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::{NamedTempFile, TempDir};

/// Resolver scripted by domain name, counting every call.
struct ScriptedResolver {
    outcomes: HashMap<String, LookupOutcome>,
    calls: Mutex<HashMap<String, usize>>,
}

impl ScriptedResolver {
    fn new(outcomes: &[(&str, LookupOutcome)]) -> Self {
        Self {
            outcomes: outcomes
                .iter()
                .map(|(d, o)| (d.to_string(), o.clone()))
                .collect(),
            calls: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl Resolve for ScriptedResolver {
    async fn resolve(&self, domain: &str) -> LookupOutcome {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(domain.to_string())
            .or_insert(0) += 1;
        self.outcomes
            .get(domain)
            .cloned()
            .unwrap_or(LookupOutcome::Taken)
    }
}

fn input_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create input file");
    write!(file, "{}", lines.join("\n")).expect("write input file");
    file
}

#[tokio::test]
async fn test_end_to_end_sweep() {
    let input = input_file(&[
        "example.com",
        "invalid..domain",
        "",
        "zz-totally-unlikely-9f8x.com",
    ]);
    let out_dir = TempDir::new().expect("output dir");

    let resolver = Arc::new(ScriptedResolver::new(&[
        ("example.com", LookupOutcome::Taken),
        ("zz-totally-unlikely-9f8x.com", LookupOutcome::Available),
    ]));
    let sweeper = DomainSweeper::with_resolver(
        SweepConfig::default().with_workers(2),
        Arc::clone(&resolver) as Arc<dyn Resolve>,
    );

    let report = sweeper
        .run(input.path().to_str().unwrap())
        .await
        .expect("sweep succeeds");

    // Validator accepted two lines, rejected one, skipped the blank
    assert_eq!(report.checked, 2);
    assert_eq!(report.rejected_lines, 1);
    assert_eq!(report.available_count, 1);
    assert_eq!(report.taken, 1);
    assert_eq!(report.errors, 0);
    assert_eq!(report.available, vec!["zz-totally-unlikely-9f8x.com"]);

    // Both valid domains looked up exactly once
    let calls = resolver.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 2);
    assert!(calls.values().all(|&n| n == 1));

    // The written report carries the header counts and the available body
    let path = write_report(&report, out_dir.path()).expect("write report");
    let content = std::fs::read_to_string(&path).expect("read report");
    assert!(content.contains("# Checked: 2, Available: 1, Errors: 0"));
    assert!(content.contains("zz-totally-unlikely-9f8x.com\n"));
    assert!(!content.contains("example.com\n"));
}

#[tokio::test]
async fn test_empty_input_is_fatal_and_writes_nothing() {
    let input = input_file(&[]);
    let out_dir = TempDir::new().expect("output dir");

    let sweeper = DomainSweeper::with_resolver(
        SweepConfig::default(),
        Arc::new(ScriptedResolver::new(&[])) as Arc<dyn Resolve>,
    );

    let err = sweeper
        .run(input.path().to_str().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, SweepError::NoValidDomains { .. }));
    assert!(err.is_load_failure());

    // No report file was created
    assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_lookup_failures_never_fail_the_run() {
    // Even when every single lookup fails (timeouts, refused connections),
    // the sweep completes with an Ok report; failures exist only as the
    // error counter, never as a SweepError.
    let input = input_file(&["one.com", "two.com", "three.com"]);
    let out_dir = TempDir::new().expect("output dir");

    let sweeper = DomainSweeper::with_resolver(
        SweepConfig::default().with_workers(2),
        Arc::new(ScriptedResolver::new(&[
            ("one.com", LookupOutcome::LookupError("lookup timed out".into())),
            ("two.com", LookupOutcome::LookupError("connection refused".into())),
            ("three.com", LookupOutcome::LookupError("servfail".into())),
        ])) as Arc<dyn Resolve>,
    );

    let report = sweeper
        .run(input.path().to_str().unwrap())
        .await
        .expect("sweep succeeds despite failed lookups");

    assert_eq!(report.checked, 3);
    assert_eq!(report.errors, 3);
    assert_eq!(report.available_count, 0);
    assert!(report.available.is_empty());

    // The report is still written, with an empty available body
    let path = write_report(&report, out_dir.path()).expect("write report");
    let content = std::fs::read_to_string(&path).expect("read report");
    assert!(content.contains("# Checked: 3, Available: 0, Errors: 3"));
}

#[tokio::test]
async fn test_worker_counts_agree_on_results() {
    let mut lines = Vec::new();
    let mut script = Vec::new();
    let mut owned = Vec::new();
    for i in 0..30 {
        owned.push(format!("candidate-{i}.com"));
    }
    for (i, domain) in owned.iter().enumerate() {
        lines.push(domain.as_str());
        let outcome = match i % 3 {
            0 => LookupOutcome::Available,
            1 => LookupOutcome::Taken,
            _ => LookupOutcome::LookupError("simulated".into()),
        };
        script.push((domain.as_str(), outcome));
    }
    let input = input_file(&lines);

    let mut memberships = Vec::new();
    for workers in [1, 2, 8, 32] {
        let sweeper = DomainSweeper::with_resolver(
            SweepConfig::default().with_workers(workers),
            Arc::new(ScriptedResolver::new(&script)) as Arc<dyn Resolve>,
        );
        let report = sweeper
            .run(input.path().to_str().unwrap())
            .await
            .expect("sweep succeeds");

        assert_eq!(report.checked, 30, "workers={workers}");
        assert_eq!(report.available_count, 10, "workers={workers}");
        assert_eq!(report.taken, 10, "workers={workers}");
        assert_eq!(report.errors, 10, "workers={workers}");
        assert_eq!(
            report.checked,
            report.available_count + report.taken + report.errors
        );

        let mut available = report.available.clone();
        available.sort();
        memberships.push(available);
    }

    // Membership identical regardless of worker count; order may differ
    assert!(memberships.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn test_report_serializes_to_json() {
    let input = input_file(&["example.com"]);
    let sweeper = DomainSweeper::with_resolver(
        SweepConfig::default().with_workers(1),
        Arc::new(ScriptedResolver::new(&[(
            "example.com",
            LookupOutcome::Available,
        )])) as Arc<dyn Resolve>,
    );

    let report = sweeper
        .run(input.path().to_str().unwrap())
        .await
        .expect("sweep succeeds");
    let json = serde_json::to_string_pretty(&report).expect("serialize");

    assert!(json.contains("\"checked\": 1"));
    assert!(json.contains("\"available_count\": 1"));
    assert!(json.contains("example.com"));
}
