//! Toml-backed preset storage at the platform config directory.
//!
//! The file at `~/.config/solcal/presets.toml` holds the saved anchor
//! presets, the active selection, and optional flag-rule overrides. It is
//! the CLI's implementation of the core's `PresetStore` seam.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use solcal_core::{AnchorPreset, FlagRules, PresetStore, SolcalError, SolcalResult};

const PRESETS_FILE: &str = "presets.toml";

/// On-disk shape of one preset. The start date is kept as a plain
/// `YYYY-MM-DD` string so a hand-edited file fails loudly on load rather
/// than deserializing into a nonsense date.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PresetRecord {
    id: String,
    name: String,
    start_date: String,
}

/// Optional `[rules]` table overriding the default flag rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RulesSection {
    sabbath_interval: Option<u8>,
    new_moon_day: Option<u8>,
    /// Feast days as `"M-D"` strings, e.g. `"1-14"`.
    #[serde(default)]
    feast_days: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PresetsFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    active: Option<String>,
    #[serde(default, rename = "preset")]
    presets: Vec<PresetRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rules: Option<RulesSection>,
}

/// Preset store persisted as pretty-printed toml.
#[derive(Debug)]
pub struct TomlPresetStore {
    path: PathBuf,
    file: PresetsFile,
}

impl TomlPresetStore {
    /// Opens the store at the default config location, creating nothing
    /// until the first write.
    pub fn open_default() -> SolcalResult<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open(path: PathBuf) -> SolcalResult<Self> {
        let file = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| SolcalError::Store(format!("could not read {}: {e}", path.display())))?;
            toml::from_str(&content)
                .map_err(|e| SolcalError::Store(format!("could not parse {}: {e}", path.display())))?
        } else {
            PresetsFile::default()
        };
        Ok(TomlPresetStore { path, file })
    }

    fn default_path() -> SolcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SolcalError::Store("could not determine config directory".into()))?
            .join("solcal");
        Ok(config_dir.join(PRESETS_FILE))
    }

    /// Id of the preset that was active at the end of the last session.
    pub fn active_id(&self) -> Option<String> {
        self.file.active.clone()
    }

    /// Persists the active selection.
    pub fn set_active(&mut self, id: &str) -> SolcalResult<()> {
        self.file.active = Some(id.to_string());
        self.write()
    }

    /// Flag rules from the `[rules]` table, or the defaults.
    pub fn rules(&self) -> SolcalResult<FlagRules> {
        let mut rules = FlagRules::default();
        let Some(section) = &self.file.rules else {
            return Ok(rules);
        };

        if let Some(interval) = section.sabbath_interval {
            rules.sabbath_interval = interval;
        }
        if let Some(day) = section.new_moon_day {
            rules.new_moon_day = day;
        }
        rules.feast_days = section
            .feast_days
            .iter()
            .map(|s| parse_feast_day(s))
            .collect::<SolcalResult<_>>()?;
        Ok(rules)
    }

    fn write(&self) -> SolcalResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SolcalError::Store(format!("could not create {}: {e}", parent.display()))
            })?;
        }

        let content = toml::to_string_pretty(&self.file)
            .map_err(|e| SolcalError::Store(e.to_string()))?;

        // Write-then-rename so a crash never leaves a truncated file.
        let temp = self.path.with_extension("toml.tmp");
        std::fs::write(&temp, content)
            .map_err(|e| SolcalError::Store(format!("could not write {}: {e}", temp.display())))?;
        std::fs::rename(&temp, &self.path)
            .map_err(|e| SolcalError::Store(format!("could not write {}: {e}", self.path.display())))?;
        Ok(())
    }
}

impl PresetStore for TomlPresetStore {
    fn load(&self) -> SolcalResult<Vec<AnchorPreset>> {
        self.file
            .presets
            .iter()
            .map(|record| {
                let start_date =
                    solcal_core::parse_gregorian(&record.start_date).map_err(|_| {
                        SolcalError::InvalidAnchor {
                            name: record.name.clone(),
                            reason: format!("bad start date '{}'", record.start_date),
                        }
                    })?;
                Ok(AnchorPreset {
                    id: record.id.clone(),
                    name: record.name.clone(),
                    start_date,
                })
            })
            .collect()
    }

    fn save(&mut self, preset: &AnchorPreset) -> SolcalResult<()> {
        let record = PresetRecord {
            id: preset.id.clone(),
            name: preset.name.clone(),
            start_date: preset.start_date.format("%Y-%m-%d").to_string(),
        };
        match self.file.presets.iter_mut().find(|r| r.id == preset.id) {
            Some(existing) => *existing = record,
            None => self.file.presets.push(record),
        }
        self.write()
    }

    fn remove(&mut self, id: &str) -> SolcalResult<()> {
        self.file.presets.retain(|r| r.id != id);
        if self.file.active.as_deref() == Some(id) {
            self.file.active = None;
        }
        self.write()
    }
}

fn parse_feast_day(s: &str) -> SolcalResult<(u8, u8)> {
    let parse = || -> Option<(u8, u8)> {
        let (m, d) = s.split_once('-')?;
        Some((m.parse().ok()?, d.parse().ok()?))
    };
    parse().ok_or_else(|| {
        SolcalError::Store(format!("bad feast day '{s}' in rules (expected \"M-D\")"))
    })
}
