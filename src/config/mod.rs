//! Fusion pipeline configuration.
//!
//! All knobs the core reads are carried in an explicit [`FusionConfig`] value
//! handed to the scheduler and reconstruction-loop constructors; there are no
//! process-wide configuration reads.
//!
//! Sections map one-to-one onto the configuration surface consumed from the
//! host application: streaming, ordering, throttling, and the global
//! integration/tracking switches.

mod defaults;
mod error;

use std::path::Path;

use nalgebra::Vector4;
use serde::{Deserialize, Serialize};

use crate::tracking::IcpIterationParams;

pub use error::{ConfigError, Result};

/// Host/device chunk-streaming settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StreamingSection {
    /// Whether chunk streaming runs at all.
    #[serde(default = "defaults::streaming_enabled")]
    pub enabled: bool,

    /// Adaptive mode: stream only when device heap pressure demands it.
    #[serde(default)]
    pub adaptive: bool,

    /// Free-block count below which adaptive streaming kicks in.
    #[serde(default = "defaults::streaming_threshold")]
    pub threshold: u32,

    /// Streaming radius around the active region (meters).
    #[serde(default = "defaults::streaming_radius")]
    pub radius: f32,

    /// Camera-space reference point marking the map's center of interest.
    #[serde(default = "defaults::reference_point")]
    pub reference_point: [f32; 3],
}

impl StreamingSection {
    /// Reference point as a homogeneous column vector (w = 1).
    #[inline]
    pub fn reference_point_h(&self) -> Vector4<f32> {
        let [x, y, z] = self.reference_point;
        Vector4::new(x, y, z, 1.0)
    }
}

impl Default for StreamingSection {
    fn default() -> Self {
        Self {
            enabled: defaults::streaming_enabled(),
            adaptive: false,
            threshold: defaults::streaming_threshold(),
            radius: defaults::streaming_radius(),
            reference_point: defaults::reference_point(),
        }
    }
}

/// Batch ordering policy. The modes are mutually exclusive; `naive_reorder`
/// wins when both are set. With neither set, requests run in arrival order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OrderingSection {
    /// Sort each batch by sensor id before execution.
    #[serde(default)]
    pub naive_reorder: bool,

    /// Greedy nearest-neighbor ordering against the last integrated pose.
    #[serde(default)]
    pub smart_reorder: bool,
}

/// Heat-based frame skipping.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThrottleSection {
    /// Whether hot chunks cause candidate frames to be dropped.
    #[serde(default)]
    pub skip_frame_enabled: bool,

    /// Heat above which a candidate is dropped (while others remain pending).
    #[serde(default = "defaults::skip_threshold")]
    pub skip_threshold: f32,
}

impl Default for ThrottleSection {
    fn default() -> Self {
        Self {
            skip_frame_enabled: false,
            skip_threshold: defaults::skip_threshold(),
        }
    }
}

/// Global pipeline switches.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntegrationSection {
    /// Whether depth frames are fused into the map.
    #[serde(default = "defaults::enabled")]
    pub integration_enabled: bool,

    /// Whether ICP tracking runs on the live path.
    #[serde(default = "defaults::enabled")]
    pub tracking_enabled: bool,
}

impl Default for IntegrationSection {
    fn default() -> Self {
        Self {
            integration_enabled: defaults::enabled(),
            tracking_enabled: defaults::enabled(),
        }
    }
}

/// Scheduler variant selection.
///
/// Static configuration, not a runtime decision: the host picks the variant
/// that matches its sensor mode when the pipeline is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerKind {
    /// Every request executes in arrival order; the newest is retained.
    /// For frames carrying ground-truth trajectories that must all apply.
    PassThrough,
    /// Reordering and heat throttling over multi-sensor batches.
    #[default]
    BatchWithThrottling,
}

/// Full fusion configuration loaded from YAML.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FusionConfig {
    /// Scheduler variant for the batched path.
    #[serde(default)]
    pub scheduler: SchedulerKind,

    /// Chunk streaming settings.
    #[serde(default)]
    pub streaming: StreamingSection,

    /// Batch ordering policy.
    #[serde(default)]
    pub ordering: OrderingSection,

    /// Heat throttling settings.
    #[serde(default)]
    pub throttle: ThrottleSection,

    /// Global integration/tracking switches.
    #[serde(default)]
    pub integration: IntegrationSection,

    /// ICP iteration parameters for the live tracking path.
    #[serde(default)]
    pub icp: IcpIterationParams,
}

impl FusionConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from the default config path (`configs/fusion.yaml`), falling
    /// back to defaults when the file does not exist.
    pub fn load_default() -> Result<Self> {
        let path = Path::new("configs/fusion.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate value ranges common to both execution paths.
    pub fn validate(&self) -> Result<()> {
        if self.streaming.radius <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "streaming.radius must be > 0".to_string(),
            ));
        }

        if self.throttle.skip_threshold < 0.0 {
            return Err(ConfigError::InvalidValue(
                "throttle.skip_threshold must be >= 0".to_string(),
            ));
        }

        if self.streaming.reference_point.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::InvalidValue(
                "streaming.reference_point must be finite".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate for use with a batch scheduler.
    ///
    /// Batch execution has no compaction-only fallback, so integration must
    /// be enabled.
    pub fn validate_for_batch(&self) -> Result<()> {
        self.validate()?;
        if !self.integration.integration_enabled {
            return Err(ConfigError::BatchWithoutIntegration);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FusionConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.validate_for_batch().is_ok());
        assert!(config.streaming.enabled);
        assert!(!config.ordering.naive_reorder);
        assert!(!config.throttle.skip_frame_enabled);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
throttle:
  skip_frame_enabled: true
  skip_threshold: 2.0
ordering:
  smart_reorder: true
"#;
        let config = FusionConfig::from_yaml(yaml).unwrap();
        assert!(config.throttle.skip_frame_enabled);
        assert!((config.throttle.skip_threshold - 2.0).abs() < 1e-6);
        assert!(config.ordering.smart_reorder);
        // Untouched sections keep their defaults.
        assert!(config.streaming.enabled);
        assert_eq!(config.streaming.threshold, 20_000);
        assert!(config.integration.integration_enabled);
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = FusionConfig::default();
        config.ordering.naive_reorder = true;
        config.streaming.radius = 8.0;

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = FusionConfig::from_yaml(&yaml).unwrap();
        assert!(parsed.ordering.naive_reorder);
        assert!((parsed.streaming.radius - 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = FusionConfig::default();
        config.streaming.radius = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));

        let mut config = FusionConfig::default();
        config.throttle.skip_threshold = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_batch_requires_integration() {
        let mut config = FusionConfig::default();
        config.integration.integration_enabled = false;
        // Fine for the single-frame path (compactify fallback exists)...
        assert!(config.validate().is_ok());
        // ...fatal for the batch path.
        assert!(matches!(
            config.validate_for_batch(),
            Err(ConfigError::BatchWithoutIntegration)
        ));
    }

    #[test]
    fn test_shipped_config_parses() {
        let config = FusionConfig::load(Path::new("configs/fusion.yaml")).unwrap();
        assert_eq!(config.scheduler, SchedulerKind::BatchWithThrottling);
        assert!(config.ordering.smart_reorder);
        assert!(config.throttle.skip_frame_enabled);
    }

    #[test]
    fn test_reference_point_homogeneous() {
        let section = StreamingSection::default();
        let h = section.reference_point_h();
        assert_eq!(h.w, 1.0);
        assert_eq!(h.z, 3.0);
    }
}
