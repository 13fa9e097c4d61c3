use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use podgrid_core::{ExecutorInfo, Pod, PodgridConfig};
use podgrid_scheduler::{OfferDetails, OfferFit, OfferSnapshot, PodTask, TaskFactory};
use serde::Serialize;
use tracing::info;

/// Verdict printed by `podgrid match`.
#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub pod: String,
    pub offer: String,
    pub accepted: bool,
    pub reason: String,
    pub required_ports: Vec<u64>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<PodgridConfig> {
    match path {
        Some(path) => PodgridConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(PodgridConfig::default()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn load_task(
    config: &PodgridConfig,
    pod_path: &Path,
    executor: ExecutorInfo,
) -> anyhow::Result<PodTask> {
    let pod: Pod = read_json(pod_path)?;
    let task = TaskFactory::new(config).new_pod_task(Arc::new(pod), executor)?;
    info!(task_id = %task.id(), key = %task.key(), "task created");
    Ok(task)
}

fn describe_fit(fit: &OfferFit) -> String {
    match fit {
        OfferFit::Accepted => "offer satisfies ports and resource floors".to_string(),
        OfferFit::UnsatisfiedPorts(ports) => {
            let list: Vec<String> = ports.iter().map(u64::to_string).collect();
            format!("{} port(s) could not be allocated: {}", ports.len(), list.join(", "))
        }
        OfferFit::InsufficientResources { cpus, mem } => {
            format!("not enough resources: cpus {cpus}, mem {mem}")
        }
    }
}

pub fn match_report(task: &PodTask, offer: &OfferDetails) -> MatchReport {
    let fit = task.evaluate_offer(offer);
    MatchReport {
        pod: task.pod().name.clone(),
        offer: offer.id.clone(),
        accepted: fit.is_accepted(),
        reason: describe_fit(&fit),
        required_ports: task.ports().into_iter().collect(),
    }
}

pub fn evaluate(
    config: &PodgridConfig,
    pod_path: &Path,
    offer_path: &Path,
    format: &str,
) -> anyhow::Result<()> {
    let task = load_task(config, pod_path, ExecutorInfo::default())?;
    let offer: OfferDetails = read_json(offer_path)?;
    let report = match_report(&task, &offer);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            let verdict = if report.accepted { "✓ accepted" } else { "✗ rejected" };
            println!("{verdict}: pod {} on offer {}", report.pod, report.offer);
            println!("  {}", report.reason);
        }
    }

    Ok(())
}

/// Build a task, bind it to the offer, and return the launch descriptor JSON.
pub fn bind_descriptor(
    config: &PodgridConfig,
    pod_path: &Path,
    offer_path: &Path,
    executor_id: &str,
) -> anyhow::Result<String> {
    let mut task = load_task(config, pod_path, ExecutorInfo::new(executor_id))?;
    let details: OfferDetails = read_json(offer_path)?;

    let fit = task.evaluate_offer(&details);
    if !fit.is_accepted() {
        anyhow::bail!("offer {} rejected: {}", details.id, describe_fit(&fit));
    }

    let offer = OfferSnapshot::new(details).into_ref();
    task.fill_task_info(&offer)?;
    info!(task_id = %task.id(), offer = ?task.offer_id(), "task bound");

    Ok(serde_json::to_string_pretty(&task.task_info())?)
}

pub fn bind(
    config: &PodgridConfig,
    pod_path: &Path,
    offer_path: &Path,
    executor_id: &str,
) -> anyhow::Result<()> {
    println!("{}", bind_descriptor(config, pod_path, offer_path, executor_id)?);
    Ok(())
}

pub fn show_config(config: &PodgridConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const POD: &str = r#"{
        "name": "web",
        "namespace": "default",
        "spec": { "containers": [
            { "name": "nginx", "ports": [
                { "containerPort": 80, "hostPort": 8005 },
                { "containerPort": 9090, "hostPort": 0 }
            ]}
        ]}
    }"#;

    fn offer_json(cpus: f64, begin: u64, end: u64) -> String {
        format!(
            r#"{{
                "id": "offer-1",
                "agent_id": "slave-1",
                "hostname": "node-1",
                "resources": [
                    {{ "name": "cpus", "scalar": {cpus} }},
                    {{ "name": "mem", "scalar": 256.0 }},
                    {{ "name": "ports", "ranges": [{{ "begin": {begin}, "end": {end} }}] }}
                ]
            }}"#
        )
    }

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn report_accepts_fitting_offer() {
        let dir = tempfile::tempdir().unwrap();
        let pod = write(dir.path(), "pod.json", POD);
        let config = PodgridConfig::default();

        let task = load_task(&config, &pod, ExecutorInfo::default()).unwrap();
        let offer: OfferDetails = serde_json::from_str(&offer_json(1.0, 8000, 8010)).unwrap();
        let report = match_report(&task, &offer);

        assert!(report.accepted);
        assert_eq!(report.required_ports, vec![8005]);
    }

    #[test]
    fn report_explains_missing_ports() {
        let dir = tempfile::tempdir().unwrap();
        let pod = write(dir.path(), "pod.json", POD);

        let task = load_task(&PodgridConfig::default(), &pod, ExecutorInfo::default()).unwrap();
        let offer: OfferDetails = serde_json::from_str(&offer_json(1.0, 9000, 9100)).unwrap();
        let report = match_report(&task, &offer);

        assert!(!report.accepted);
        assert!(report.reason.contains("8005"));
    }

    #[test]
    fn bind_emits_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let pod = write(dir.path(), "pod.json", POD);
        let offer = write(dir.path(), "offer.json", &offer_json(1.0, 8000, 8010));

        let json = bind_descriptor(&PodgridConfig::default(), &pod, &offer, "exec-7").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "PodTask");
        assert_eq!(value["agent_id"], "slave-1");
        assert_eq!(value["executor"]["executor_id"], "exec-7");
        assert_eq!(value["resources"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn bind_refuses_small_offer() {
        let dir = tempfile::tempdir().unwrap();
        let pod = write(dir.path(), "pod.json", POD);
        let offer = write(dir.path(), "offer.json", &offer_json(0.1, 8000, 8010));

        let err = bind_descriptor(&PodgridConfig::default(), &pod, &offer, "e").unwrap_err();
        assert!(err.to_string().contains("not enough resources"));
    }

    #[test]
    fn config_file_overrides_floors() {
        let dir = tempfile::tempdir().unwrap();
        let pod = write(dir.path(), "pod.json", POD);
        let offer = write(dir.path(), "offer.json", &offer_json(1.0, 8000, 8010));
        let config_path = write(dir.path(), "podgrid.toml", "[floors]\ncpus = 2.0\n");

        let config = load_config(Some(&config_path)).unwrap();
        assert!(bind_descriptor(&config, &pod, &offer, "e").is_err());
    }

    #[test]
    fn fixtures_bind_cleanly() {
        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../tests/fixtures");
        let config = load_config(Some(&fixtures.join("podgrid.toml"))).unwrap();

        let json = bind_descriptor(
            &config,
            &fixtures.join("pod.json"),
            &fixtures.join("offer.json"),
            "k8sm-executor",
        )
        .unwrap();
        let info: podgrid_scheduler::TaskInfo = serde_json::from_str(&json).unwrap();

        assert_eq!(info.agent_id.as_deref(), Some("20150105-221536-16842879-5050-3127-S0"));
        let ports = info.resources.iter().find(|r| r.name == "ports").unwrap();
        assert_eq!(ports.as_ranges().len(), 2);
    }

    #[test]
    fn missing_pod_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_task(
            &PodgridConfig::default(),
            &dir.path().join("nope.json"),
            ExecutorInfo::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }
}
