// tests/supervisor.rs

mod common;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use launch_resolver::exec::{ProcessExit, ProcessSupervisor, RealSupervisor, write_params_file};
use launch_resolver::fs::mock::MockFileSystem;
use launch_resolver::launch::{
    LaunchResolver, NodeTemplate, ResolvedProcessSpec, declared_arguments,
};
use launch_resolver::package::FixedPackageLocator;
use launch_resolver_test_utils::builders::{ParamsFileBuilder, detector_locator, param_file_args};
use launch_resolver_test_utils::recording_supervisor::RecordingSupervisor;

type TestResult = Result<(), Box<dyn Error>>;

fn resolve_with(template: NodeTemplate) -> ResolvedProcessSpec {
    let fs = MockFileSystem::new();
    ParamsFileBuilder::detector("model.onnx", "model.engine")
        .param("score_threshold", "0.35")
        .add_to(&fs, "/cfg/params.yaml");
    let locator = detector_locator("/opt/pkg");
    LaunchResolver::with_template(&locator, &fs, template, declared_arguments())
        .resolve(&param_file_args("/cfg/params.yaml"))
        .expect("resolution should succeed")
}

fn resolved_spec() -> ResolvedProcessSpec {
    resolve_with(NodeTemplate::yolo_racecar_detector())
}

/// Detector spec pointing at a stand-in executable from `/bin`.
fn spec_running(executable: &str) -> ResolvedProcessSpec {
    let mut template = NodeTemplate::yolo_racecar_detector();
    template.executable = executable.to_string();
    resolve_with(template)
}

/// Detector spec running `/bin/sh -c <script>`; the ROS arguments that follow
/// become the script's positional parameters and are ignored.
fn spec_running_script(script: &str) -> ResolvedProcessSpec {
    let mut template = NodeTemplate::yolo_racecar_detector();
    template.executable = "sh".to_string();
    template.arguments = vec!["-c".to_string(), script.to_string()];
    resolve_with(template)
}

#[tokio::test]
async fn supervisor_receives_spec_unmodified() -> TestResult {
    with_timeout(async {
        init_tracing();

        let spec = resolved_spec();
        let expected = spec.clone();

        let launched = Arc::new(Mutex::new(Vec::new()));
        let mut supervisor = RecordingSupervisor::new(Arc::clone(&launched));
        let exit = supervisor.launch(spec).await?;

        assert_eq!(exit, ProcessExit::Exited(0));
        let launched = launched.lock().unwrap();
        assert_eq!(launched.len(), 1);
        assert_eq!(launched[0], expected);
        Ok::<_, Box<dyn Error>>(())
    })
    .await
}

#[tokio::test]
async fn supervisor_exit_is_reported() -> TestResult {
    with_timeout(async {
        init_tracing();

        let launched = Arc::new(Mutex::new(Vec::new()));
        let mut supervisor =
            RecordingSupervisor::new(launched).with_exit(ProcessExit::Exited(2));
        let exit = supervisor.launch(resolved_spec()).await?;

        assert!(!exit.success());
        assert_eq!(exit.code(), 2);
        Ok::<_, Box<dyn Error>>(())
    })
    .await
}

#[test]
fn params_file_contains_resolved_parameters() -> TestResult {
    init_tracing();

    let spec = resolved_spec();
    let file = write_params_file(&spec)?;

    let text = std::fs::read_to_string(file.path())?;
    let parsed: serde_yaml::Value = serde_yaml::from_str(&text)?;
    let block = &parsed["/yolo_racecar_detector_node"]["ros__parameters"];

    assert_eq!(
        block["onnx_model_path"].as_str(),
        Some("/opt/pkg/config/yolo_perception/model.onnx")
    );
    assert_eq!(
        block["trt_engine_path"].as_str(),
        Some("/opt/pkg/config/yolo_perception/model.engine")
    );
    assert_eq!(block["score_threshold"].as_f64(), Some(0.35));

    let path = file.path().to_path_buf();
    drop(file);
    assert!(!path.exists());
    Ok(())
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn real_supervisor_reports_success() -> TestResult {
    with_timeout(async {
        init_tracing();

        // `true` ignores the ROS arguments and exits 0.
        let locator = FixedPackageLocator::new().with_lib_dir("yolo_racecar_detector", "/bin");
        let spec = spec_running("true");

        let mut supervisor = RealSupervisor::new(Arc::new(locator));
        let exit = supervisor.launch(spec).await?;

        assert_eq!(exit, ProcessExit::Exited(0));
        Ok::<_, Box<dyn Error>>(())
    })
    .await
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn real_supervisor_reports_failure_code() -> TestResult {
    with_timeout(async {
        init_tracing();

        let locator = FixedPackageLocator::new().with_lib_dir("yolo_racecar_detector", "/bin");
        let spec = spec_running("false");

        let mut supervisor = RealSupervisor::new(Arc::new(locator));
        let exit = supervisor.launch(spec).await?;

        assert_eq!(exit, ProcessExit::Exited(1));
        Ok::<_, Box<dyn Error>>(())
    })
    .await
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn real_supervisor_kills_node_when_stopped() -> TestResult {
    with_timeout(async {
        init_tracing();

        let locator = FixedPackageLocator::new().with_lib_dir("yolo_racecar_detector", "/bin");
        let spec = spec_running_script("exec sleep 30");

        let supervisor = RealSupervisor::new(Arc::new(locator));
        let started = Instant::now();
        let exit = supervisor
            .launch_until(spec, tokio::time::sleep(Duration::from_millis(200)))
            .await?;

        assert_eq!(exit, ProcessExit::Interrupted);
        assert_eq!(exit.code(), 130);
        assert!(started.elapsed() < Duration::from_secs(5));
        Ok::<_, Box<dyn Error>>(())
    })
    .await
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn real_supervisor_ignores_stop_after_node_exits() -> TestResult {
    with_timeout(async {
        init_tracing();

        let locator = FixedPackageLocator::new().with_lib_dir("yolo_racecar_detector", "/bin");
        let spec = spec_running_script("exit 3");

        let supervisor = RealSupervisor::new(Arc::new(locator));
        let exit = supervisor
            .launch_until(spec, std::future::pending::<()>())
            .await?;

        assert_eq!(exit, ProcessExit::Exited(3));
        Ok::<_, Box<dyn Error>>(())
    })
    .await
}

#[tokio::test]
async fn real_supervisor_fails_for_unknown_package() -> TestResult {
    with_timeout(async {
        init_tracing();

        let mut supervisor = RealSupervisor::new(Arc::new(FixedPackageLocator::new()));
        let err = supervisor.launch(resolved_spec()).await.unwrap_err();

        assert!(err.to_string().contains("yolo_racecar_detector"));
        Ok::<_, Box<dyn Error>>(())
    })
    .await
}
