//! Kubernetes manifest rendering.
//!
//! Pure text rendering of one unit into a Job plus its PodGroup. The group
//! annotation and PodGroup share the Job's name so group-scheduling plugins
//! can gang the replicas.

use crate::job::JobUnit;

/// Render the Job + PodGroup manifest for one unit.
#[must_use]
pub fn render(unit: &JobUnit) -> String {
    let name = unit.name();
    let replicas = unit.replica_count;
    let gpu = unit.gpu_per_replica;
    let image = &unit.image;
    let scheduler = &unit.scheduler_name;
    let running = unit.running_time;

    format!(
        r#"apiVersion: batch/v1
kind: Job
metadata:
  name: {name}
spec:
  backoffLimit: 1
  completions: {replicas}
  parallelism: {replicas}
  ttlSecondsAfterFinished: 10
  template:
    metadata:
      annotations:
        scheduling.k8s.io/group-name: {name}
    spec:
      containers:
      - image: {image}
        imagePullPolicy: IfNotPresent
        name: cuda-vector-add
        command: ["/bin/sh","-c"]
        args: ["sleep {running}"]
        resources:
          limits:
            nvidia.com/gpu: {gpu}
      restartPolicy: Never
      schedulerName: {scheduler}
---
apiVersion: scheduling.incubator.k8s.io/v1alpha1
kind: PodGroup
metadata:
  name: {name}
spec:
  minMember: {replicas}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> JobUnit {
        JobUnit {
            index: 3,
            partition: "philly".to_string(),
            image: "example.com/cuda-vector-add".to_string(),
            scheduler_name: "volcano".to_string(),
            replica_count: 2,
            gpu_per_replica: 8,
            start_time: 0,
            running_time: 300,
        }
    }

    #[test]
    fn test_render_job_fields() {
        let yaml = render(&unit());
        assert!(yaml.contains("name: job-dispatcher-test-philly-3"));
        assert!(yaml.contains("completions: 2"));
        assert!(yaml.contains("parallelism: 2"));
        assert!(yaml.contains("nvidia.com/gpu: 8"));
        assert!(yaml.contains(r#"args: ["sleep 300"]"#));
        assert!(yaml.contains("image: example.com/cuda-vector-add"));
        assert!(yaml.contains("schedulerName: volcano"));
    }

    #[test]
    fn test_render_pod_group() {
        let yaml = render(&unit());
        assert!(yaml.contains("kind: PodGroup"));
        assert!(yaml.contains("minMember: 2"));
        assert!(
            yaml.contains("scheduling.k8s.io/group-name: job-dispatcher-test-philly-3"),
            "pod template must carry the group annotation"
        );
    }

    #[test]
    fn test_render_separates_documents() {
        let yaml = render(&unit());
        assert_eq!(yaml.matches("\n---\n").count(), 1);
    }
}
