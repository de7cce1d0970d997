use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareSettings {
    /// Instance records reserved up front in the preparation scratch.
    #[serde(default = "PrepareSettings::default_record_capacity")]
    pub record_capacity: usize,
    /// Batches reserved up front per render group.
    #[serde(default = "PrepareSettings::default_batch_capacity")]
    pub batch_capacity: usize,
    /// Slots reserved up front in the packed instance buffer.
    #[serde(default = "PrepareSettings::default_record_capacity")]
    pub instance_capacity: usize,
    #[serde(default = "PrepareSettings::default_lod_enabled")]
    pub lod_enabled: bool,
    /// Multiplier on LOD switch distances. Squared before it is applied to
    /// the squared thresholds.
    #[serde(default = "PrepareSettings::default_lod_distance_scale")]
    pub lod_distance_scale: f32,
}

impl Default for PrepareSettings {
    fn default() -> Self {
        Self {
            record_capacity: Self::default_record_capacity(),
            batch_capacity: Self::default_batch_capacity(),
            instance_capacity: Self::default_record_capacity(),
            lod_enabled: Self::default_lod_enabled(),
            lod_distance_scale: Self::default_lod_distance_scale(),
        }
    }
}

impl PrepareSettings {
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Self {
        use std::fs;

        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(settings) => {
                    info!("Loaded prepare settings from {:?}", path);
                    settings
                }
                Err(err) => {
                    warn!(
                        "Failed to parse {:?} ({}). Falling back to default prepare settings.",
                        path, err
                    );
                    PrepareSettings::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "Prepare settings file {:?} not found. Using default settings.",
                    path
                );
                PrepareSettings::default()
            }
            Err(err) => {
                warn!(
                    "Failed to read {:?} ({}). Falling back to default prepare settings.",
                    path, err
                );
                PrepareSettings::default()
            }
        }
    }

    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<PrepareSettings>(contents).map(Self::validate)
    }

    /// Upper bound for the record and instance capacities.
    pub const MAX_RECORD_CAPACITY: usize = 1 << 20;
    /// Upper bound for the per-group batch capacity.
    pub const MAX_BATCH_CAPACITY: usize = 1 << 16;

    pub fn validate(mut self) -> Self {
        clamp_capacity(
            "record_capacity",
            &mut self.record_capacity,
            Self::MAX_RECORD_CAPACITY,
        );
        clamp_capacity(
            "batch_capacity",
            &mut self.batch_capacity,
            Self::MAX_BATCH_CAPACITY,
        );
        clamp_capacity(
            "instance_capacity",
            &mut self.instance_capacity,
            Self::MAX_RECORD_CAPACITY,
        );

        if !self.lod_distance_scale.is_finite() || self.lod_distance_scale <= 0.0 {
            warn!(
                "LOD distance scale must be a positive number (got {}). Using {} instead.",
                self.lod_distance_scale,
                Self::default_lod_distance_scale()
            );
            self.lod_distance_scale = Self::default_lod_distance_scale();
        }

        self
    }

    /// Factor applied to squared LOD thresholds.
    pub fn lod_threshold_factor(&self) -> f32 {
        self.lod_distance_scale * self.lod_distance_scale
    }

    const fn default_record_capacity() -> usize {
        4096
    }

    const fn default_batch_capacity() -> usize {
        256
    }

    const fn default_lod_enabled() -> bool {
        true
    }

    const fn default_lod_distance_scale() -> f32 {
        1.0
    }
}

fn clamp_capacity(name: &str, value: &mut usize, max: usize) {
    if *value > max {
        warn!(
            "Prepare setting {} is too large (got {}). Using {} instead.",
            name, value, max
        );
        *value = max;
    }
}
