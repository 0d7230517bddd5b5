//! Output verification implementation

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ports::ProbePort;

/// Outcome of comparing the output's duration with the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationCheck {
    /// Sum of the retained spans, seconds
    pub expected: f64,
    /// Duration probed from the output, if probing worked
    pub measured: Option<f64>,
    pub tolerance: f64,
    pub within_tolerance: bool,
    /// Why the check did not pass
    pub warning: Option<String>,
}

/// Probes the stitched output and checks its length
pub struct OutputVerifier {
    probe_port: Arc<dyn ProbePort>,
    tolerance: f64,
}

impl OutputVerifier {
    /// Create a new verifier
    pub fn new(probe_port: Arc<dyn ProbePort>, tolerance: f64) -> Self {
        Self {
            probe_port,
            tolerance,
        }
    }

    /// Compare the output's duration with `expected` seconds
    ///
    /// A mismatch or probe failure is reported, never raised.
    pub fn verify(&self, output_path: &Path, expected: f64) -> DurationCheck {
        info!("Verifying output duration: {}", output_path.display());

        let (measured, warning) = match self.probe_port.probe_duration(output_path) {
            Ok(measured) => {
                let delta = (measured - expected).abs();
                let warning = (delta > self.tolerance).then(|| {
                    format!(
                        "output is {:.3}s long, expected {:.3}s (off by {:.3}s)",
                        measured, expected, delta
                    )
                });
                (Some(measured), warning)
            }
            Err(e) => (None, Some(format!("could not probe output: {}", e))),
        };

        match &warning {
            Some(message) => warn!("Verification warning: {}", message),
            None => info!("Verification passed"),
        }

        DurationCheck {
            expected,
            measured,
            tolerance: self.tolerance,
            within_tolerance: warning.is_none(),
            warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockProbeAdapter;

    #[test]
    fn test_within_tolerance() {
        let probe = Arc::new(MockProbeAdapter::new().with_duration("out.avi", 900.2));
        let check = OutputVerifier::new(probe, 0.5).verify(Path::new("out.avi"), 900.0);
        assert!(check.within_tolerance);
        assert_eq!(check.measured, Some(900.2));
        assert!(check.warning.is_none());
    }

    #[test]
    fn test_mismatch_is_a_warning() {
        let probe = Arc::new(MockProbeAdapter::new().with_duration("out.avi", 600.0));
        let check = OutputVerifier::new(probe, 0.5).verify(Path::new("out.avi"), 900.0);
        assert!(!check.within_tolerance);
        assert!(check.warning.unwrap().contains("expected 900.000s"));
    }

    #[test]
    fn test_probe_failure_is_a_warning() {
        let probe = Arc::new(MockProbeAdapter::new());
        let check = OutputVerifier::new(probe, 0.5).verify(Path::new("out.avi"), 900.0);
        assert!(!check.within_tolerance);
        assert_eq!(check.measured, None);
    }
}
