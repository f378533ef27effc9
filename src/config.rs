//! Optional JSON startup configuration.
//!
//! ```json
//! { "initial": { "Blur Kernel": 5 }, "cadence_ms": 30, "panel_row_height": 18 }
//! ```
//!
//! Every field is optional. The file only seeds startup state; nothing is
//! ever written back.
use crate::error::{Result, TunerError};
use crate::params::ParameterStore;
use log::warn;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TunerConfig {
    /// Initial slider positions keyed by control label.
    pub initial: BTreeMap<String, i32>,
    /// Overrides the mode's per-tick wait bound.
    pub cadence_ms: Option<u64>,
    /// Height of one trackbar row in the window, in pixels.
    pub panel_row_height: usize,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            initial: BTreeMap::new(),
            cadence_ms: None,
            panel_row_height: 18,
        }
    }
}

impl TunerConfig {
    pub fn cadence(&self) -> Option<Duration> {
        self.cadence_ms.map(Duration::from_millis)
    }

    /// Seed `store` with the configured initial values.
    ///
    /// Values are clamped into their slider range; unknown labels are
    /// logged and skipped.
    pub fn apply_initial(&self, store: &mut ParameterStore) {
        for (name, &value) in &self.initial {
            if store.set(name, value).is_none() {
                warn!("config: ignoring unknown control '{name}'");
            }
        }
    }
}

pub fn load_config(path: &Path) -> Result<TunerConfig> {
    let data = fs::read_to_string(path).map_err(|source| TunerError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&data).map_err(|source| TunerError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_config(data: &str) -> std::result::Result<TunerConfig, serde_json::Error> {
    serde_json::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::spec::edge;
    use std::io::Write;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = parse_config("{}").unwrap();
        assert_eq!(cfg, TunerConfig::default());
        assert_eq!(cfg.cadence(), None);
    }

    #[test]
    fn initial_values_are_clamped_and_unknown_names_skipped() {
        let cfg = parse_config(
            r#"{ "initial": { "Blur Kernel": 99, "Min Threshold": 12, "bogus": 1 }, "cadence_ms": 5 }"#,
        )
        .unwrap();
        let mut store = ParameterStore::new(edge::spec());
        cfg.apply_initial(&mut store);
        assert_eq!(store.snapshot().values, vec![12, 150, 31]);
        assert_eq!(cfg.cadence(), Some(Duration::from_millis(5)));
    }

    #[test]
    fn load_reports_parse_errors_with_the_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, TunerError::ConfigParse { .. }));

        let missing = load_config(Path::new("no/such/config.json")).unwrap_err();
        assert!(matches!(missing, TunerError::ConfigRead { .. }));
    }
}
