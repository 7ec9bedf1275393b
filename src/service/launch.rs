//! Launch request assembly.
//!
//! Pure data assembly apart from reading the two artifact descriptors, the
//! optional classpath file, and writing the optional config snapshot.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::DeployConfig;
use crate::domain::{
    ArtifactKind, ArtifactVisibility, LaunchSpec, ResourceRequest, StagedArtifact,
};
use crate::error::LaunchError;

/// Expanded by the resource manager to the container log directory at
/// launch time; never substituted by this system.
pub const LOG_DIR_PLACEHOLDER: &str = "<LOG_DIR>";

/// Expanded by the resource manager to the container working directory.
pub const PWD_PLACEHOLDER: &str = "{{PWD}}";

/// Config snapshot written for the supervisor when an external classpath
/// file is supplied.
const CONFIG_SNAPSHOT_NAME: &str = "ext-manager-conf.toml";

/// Capability requested for the supervisor container itself. The per-node
/// memory/vcores travel on the command line; the supervisor requests those
/// per node once it is up.
const SUPERVISOR_RESOURCES: ResourceRequest = ResourceRequest {
    memory_mb: 128,
    vcores: 1,
};

/// Assemble the submission descriptor for one deployment run.
pub fn build_launch_spec(config: &DeployConfig) -> Result<LaunchSpec, LaunchError> {
    let package = stage_artifact("package", &config.package, ArtifactKind::File)?;
    let archive = stage_artifact("archive", &config.archive, ArtifactKind::Archive)?;

    let conf_snapshot = match &config.ext_classpath {
        Some(_) => Some(write_config_snapshot(config)?),
        None => None,
    };

    let mut command = vec![
        format!("-nodes={}", config.nodes),
        format!("-memory={}", config.memory_mb),
        format!("-virtualCores={}", config.vcores),
        format!("-zkHost={}", config.zk_host),
        format!("-port={}", config.port),
        format!("-archive={}", config.archive.display()),
    ];
    if let Some(snapshot) = &conf_snapshot {
        command.push(format!("-conf={}", snapshot.display()));
    }
    if let Some(home) = &config.hdfs_home {
        command.push(format!("-hdfs_home={home}"));
    }
    command.push(format!("1>{LOG_DIR_PLACEHOLDER}/stdout"));
    command.push(format!("2>{LOG_DIR_PLACEHOLDER}/stderr"));

    let mut staged_artifacts = BTreeMap::new();
    staged_artifacts.insert("supervisor".to_string(), package);
    staged_artifacts.insert("workload".to_string(), archive);

    let mut environment = BTreeMap::new();
    environment.insert("CLASSPATH".to_string(), build_classpath(config)?);

    debug!(command = %command.join(" "), "assembled launch command");

    Ok(LaunchSpec {
        command,
        resources: SUPERVISOR_RESOURCES,
        staged_artifacts,
        environment,
        queue: config.queue.clone(),
        app_name: config.app_name.clone(),
    })
}

/// Resolve size and mtime of a required local artifact for staging.
fn stage_artifact(
    role: &'static str,
    path: &Path,
    kind: ArtifactKind,
) -> Result<StagedArtifact, LaunchError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            return Err(LaunchError::ArtifactMissing {
                role,
                path: path.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(LaunchError::ArtifactUnreadable {
                role,
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if !metadata.is_file() {
        return Err(LaunchError::ArtifactMissing {
            role,
            path: path.to_path_buf(),
        });
    }

    let timestamp_ms = metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map_or(0, |d| d.as_millis() as u64);

    Ok(StagedArtifact {
        location: path.to_path_buf(),
        size: metadata.len(),
        timestamp_ms,
        kind,
        visibility: ArtifactVisibility::Application,
    })
}

/// Merge the manager's default classpath entries with the optional external
/// classpath file and the working-directory wildcard.
fn build_classpath(config: &DeployConfig) -> Result<String, LaunchError> {
    let mut entries: Vec<String> = config
        .manager_classpath
        .iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect();

    if let Some(path) = &config.ext_classpath {
        entries.extend(read_classpath_entries(path)?);
    }

    entries.push(format!("{PWD_PLACEHOLDER}/*"));
    Ok(entries.join(":"))
}

/// Read extra classpath entries, one per line, trimmed, empties dropped.
fn read_classpath_entries(path: &Path) -> Result<Vec<String>, LaunchError> {
    let content = fs::read_to_string(path).map_err(|source| LaunchError::ClasspathFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Serialize the resolved configuration for the supervisor to pick up.
fn write_config_snapshot(config: &DeployConfig) -> Result<PathBuf, LaunchError> {
    let path = config.work_dir.join(CONFIG_SNAPSHOT_NAME);
    let rendered = toml::to_string_pretty(config).map_err(|e| LaunchError::ConfigSnapshot {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    fs::write(&path, rendered).map_err(|source| LaunchError::ConfigSnapshot {
        path: path.clone(),
        reason: source.to_string(),
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn classpath_file_entries_are_trimmed_and_non_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "/opt/lib/a.jar\n\n  /opt/lib/b.jar  \n").unwrap();

        let entries = read_classpath_entries(file.path()).unwrap();
        assert_eq!(entries, vec!["/opt/lib/a.jar", "/opt/lib/b.jar"]);
    }

    #[test]
    fn missing_classpath_file_is_an_error() {
        let err = read_classpath_entries(Path::new("/nonexistent/classpath.txt")).unwrap_err();
        assert!(matches!(err, LaunchError::ClasspathFile { .. }));
    }

    #[test]
    fn missing_artifact_is_reported_with_role() {
        let err = stage_artifact("package", Path::new("/nonexistent/app.bin"), ArtifactKind::File)
            .unwrap_err();
        assert!(matches!(
            err,
            LaunchError::ArtifactMissing { role: "package", .. }
        ));
    }

    #[test]
    fn staged_artifact_resolves_size() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"payload").unwrap();

        let artifact = stage_artifact("archive", file.path(), ArtifactKind::Archive).unwrap();
        assert_eq!(artifact.size, 7);
        assert_eq!(artifact.kind, ArtifactKind::Archive);
        assert_eq!(artifact.visibility, ArtifactVisibility::Application);
    }
}
