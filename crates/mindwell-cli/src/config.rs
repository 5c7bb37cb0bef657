use std::path::{Path, PathBuf};

use mindwell_interventions::clock::{ClockConfig, DEFAULT_TARGET_SECONDS};
use mindwell_interventions::schedule::{Phase, PhaseSchedule};
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MindwellConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub breathing: BreathingConfig,
    /// Reject clock misuse instead of ignoring it. Added in v1.
    #[serde(default)]
    pub strict_timer: bool,
    /// Log risk alerts raised by completed screenings.
    #[serde(default = "default_true")]
    pub log_alerts: bool,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingConfig {
    pub phases: Vec<Phase>,
    pub target_seconds: u32,
}

fn default_true() -> bool {
    true
}

impl Default for MindwellConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            breathing: BreathingConfig {
                phases: PhaseSchedule::box_breathing().phases().to_vec(),
                target_seconds: DEFAULT_TARGET_SECONDS,
            },
            strict_timer: false,
            log_alerts: true,
            created_at: jiff::Timestamp::now(),
        }
    }
}

impl MindwellConfig {
    /// Build the breathing clock settings, letting `target_override` (from a
    /// flag or `MINDWELL_TARGET_SECONDS`) replace the configured target.
    pub fn clock_config(&self, target_override: Option<u32>) -> eyre::Result<ClockConfig> {
        let schedule = PhaseSchedule::new(self.breathing.phases.clone())?;
        let target = target_override.unwrap_or(self.breathing.target_seconds);
        Ok(ClockConfig::new(schedule, target)?.strict(self.strict_timer))
    }
}

pub fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.mindwell.cli"))
}

pub fn has_config_in(dir: &Path) -> bool {
    dir.join(CONFIG_FILE).exists()
}

/// Load the config from the user's config directory, falling back to
/// defaults when none has been written yet.
pub fn load_config() -> eyre::Result<MindwellConfig> {
    let dir = config_dir()?;
    if !has_config_in(&dir) {
        tracing::debug!(dir = %dir.display(), "no config found, using defaults");
        return Ok(MindwellConfig::default());
    }
    load_config_from(&dir)
}

pub fn load_config_from(dir: &Path) -> eyre::Result<MindwellConfig> {
    let path = dir.join(CONFIG_FILE);
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = match json.get("config_version") {
        None => 0,
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| eyre::eyre!("invalid config_version {v} in {}", path.display()))?,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: MindwellConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update mindwell."
        ));
    }

    // v0 -> v1: add strict_timer (off)
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("strict_timer")
            .or_insert(serde_json::Value::Bool(false));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 -> v1 (added strict_timer)");
    }

    Ok(json)
}

pub fn save_config(config: &MindwellConfig) -> eyre::Result<PathBuf> {
    save_config_to(&config_dir()?, config)
}

pub fn save_config_to(dir: &Path, config: &MindwellConfig) -> eyre::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(path)
}
