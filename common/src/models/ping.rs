use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResult {
    pub host: String,
    pub alive: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
    /// RTT of every echo reply, in milliseconds, in arrival order.
    pub times: Vec<f64>,
    /// Percentage in `0.0..=100.0`.
    pub packet_loss: f64,
    pub error: Option<String>,
}

impl PingResult {
    /// Builds a result from the samples a ping run produced.
    ///
    /// `alive` follows the samples, not the exit code: a run cut short that
    /// still captured replies is alive.
    pub fn from_samples(host: impl Into<String>, times: Vec<f64>, packet_loss: f64) -> Self {
        let (min, max, avg) = aggregate(&times);
        Self {
            host: host.into(),
            alive: !times.is_empty(),
            min,
            max,
            avg,
            times,
            packet_loss: packet_loss.clamp(0.0, 100.0),
            error: None,
        }
    }

    pub fn failed(host: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            alive: false,
            min: None,
            max: None,
            avg: None,
            times: Vec::new(),
            packet_loss: 100.0,
            error: Some(error.into()),
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

fn aggregate(times: &[f64]) -> (Option<f64>, Option<f64>, Option<f64>) {
    if times.is_empty() {
        return (None, None, None);
    }
    let min = times.iter().copied().fold(f64::INFINITY, f64::min);
    let max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = times.iter().sum::<f64>() / times.len() as f64;
    (Some(min), Some(max), Some(round3(avg)))
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_samples_should_compute_aggregates() {
        let result = PingResult::from_samples("10.0.0.1", vec![12.0, 10.0, 14.0], 25.0);
        assert!(result.alive);
        assert_eq!(result.min, Some(10.0));
        assert_eq!(result.max, Some(14.0));
        assert_eq!(result.avg, Some(12.0));
        assert_eq!(result.packet_loss, 25.0);
    }

    #[test]
    fn from_samples_should_mark_empty_run_unreachable() {
        let result = PingResult::from_samples("10.0.0.1", vec![], 100.0);
        assert!(!result.alive);
        assert_eq!(result.avg, None);
    }

    #[test]
    fn ping_result_should_serialize_camel_case() {
        let json = serde_json::to_value(PingResult::failed("h", "boom")).unwrap();
        assert_eq!(json["packetLoss"], 100.0);
        assert_eq!(json["error"], "boom");
    }
}
