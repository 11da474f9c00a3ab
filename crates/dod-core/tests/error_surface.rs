use dod_core::errors::{DodError, ErrorInfo};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("num_points", "100")
        .with_context("reason", "example")
}

#[test]
fn compile_error_surface() {
    let err = DodError::Compile(sample_info("compile-exit", "compiler exited non-zero"));
    assert_eq!(err.info().code, "compile-exit");
    assert_eq!(err.family(), "Compile");
    assert!(err.info().context.contains_key("num_points"));
}

#[test]
fn run_error_surface() {
    let err = DodError::Run(sample_info("run-exit", "benchmark exited non-zero"));
    assert_eq!(err.info().code, "run-exit");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn parse_error_is_distinct_from_run() {
    let parse = DodError::Parse(sample_info("parse-missing", "no aos line"));
    let run = DodError::Run(sample_info("parse-missing", "no aos line"));
    assert_ne!(parse, run);
    assert_eq!(parse.family(), "Parse");
}

#[test]
fn display_includes_context_and_hint() {
    let err = DodError::Persist(
        ErrorInfo::new("persist-open", "failed to open table")
            .with_context("path", "last_expt.csv")
            .with_hint("permission denied"),
    );
    let rendered = err.to_string();
    assert_eq!(
        rendered,
        "persist error: failed to open table (code: persist-open) | context: [path=last_expt.csv] | hint: permission denied"
    );
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = DodError::Config(ErrorInfo::new("plan-empty", "no points"));
    let value = serde_json::to_value(&err).expect("json");
    assert_eq!(value["family"], "Config");
    assert_eq!(value["detail"]["code"], "plan-empty");
    assert!(value["detail"].get("hint").is_none());
}

#[test]
fn display_omits_empty_context_and_hint() {
    let err = DodError::Run(ErrorInfo::new("run-exit", "benchmark exited with failure"));
    assert_eq!(
        err.to_string(),
        "run error: benchmark exited with failure (code: run-exit)"
    );
    let info = ErrorInfo::new("run-exit", "x")
        .with_context("exit", "1")
        .with_context("command", "dod.exe 10")
        .with_context("exit", "3");
    assert_eq!(info.to_string(), "x (code: run-exit) | context: [command=dod.exe 10, exit=3]");
}
