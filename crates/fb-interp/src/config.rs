use fb_core::Extrapolation;
use serde::{Deserialize, Serialize};

/// Bank resolution and boundary handling.
///
/// `divisions` is the number of kernels per unit offset (the vertical axis
/// in 2D); `divisions_h` is only read by 2D banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpolatorConfig {
    pub divisions: usize,
    pub divisions_h: usize,
    pub extrapolation: Extrapolation,
}

impl Default for InterpolatorConfig {
    fn default() -> Self {
        Self {
            divisions: 128,
            divisions_h: 128,
            extrapolation: Extrapolation::ByLastValue,
        }
    }
}

#[cfg(test)]
mod tests {
    use fb_core::Extrapolation;

    use super::InterpolatorConfig;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: InterpolatorConfig =
            serde_json::from_str(r#"{ "divisions": 64, "extrapolation": "cyclic" }"#)
                .expect("valid config");
        assert_eq!(cfg.divisions, 64);
        assert_eq!(cfg.divisions_h, 128);
        assert_eq!(cfg.extrapolation, Extrapolation::Cyclic);
    }
}
