use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const RISK_CHART: &str = "risk";
pub const EXERCISE_CHART: &str = "exercise";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Radar,
}

/// One dataset as handed to the browser's chart library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub max: f64,
    /// Bumped on every dataset update so the page can skip stale redraws.
    pub revision: u64,
}

impl Chart {
    fn new(kind: ChartKind, title: &str, labels: &[&str], max: f64) -> Self {
        Self {
            kind,
            title: title.to_string(),
            labels: labels.iter().map(|label| label.to_string()).collect(),
            values: vec![0.0; labels.len()],
            max,
            revision: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    UnknownChart(String),
    LengthMismatch { chart: String, expected: usize, got: usize },
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::UnknownChart(name) => write!(f, "unknown chart '{name}'"),
            ChartError::LengthMismatch { chart, expected, got } => {
                write!(f, "chart '{chart}' expects {expected} values, got {got}")
            }
        }
    }
}

impl std::error::Error for ChartError {}

/// The two charts of the page, created once per session.
#[derive(Debug, Clone, Serialize)]
pub struct ChartRegistry {
    charts: BTreeMap<&'static str, Chart>,
}

impl Default for ChartRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRegistry {
    pub fn new() -> Self {
        let mut charts = BTreeMap::new();
        charts.insert(
            RISK_CHART,
            Chart::new(
                ChartKind::Bar,
                "Risk reduction (%)",
                &["Lung cancer", "Heart disease", "Stroke", "Respiratory disease"],
                100.0,
            ),
        );
        charts.insert(
            EXERCISE_CHART,
            Chart::new(
                ChartKind::Radar,
                "Improvement (0-100)",
                &["Cardiovascular", "Mental", "Metabolic", "Musculoskeletal", "Respiratory"],
                100.0,
            ),
        );
        Self { charts }
    }

    pub fn get(&self, name: &str) -> Option<&Chart> {
        self.charts.get(name)
    }

    pub fn update_dataset(&mut self, name: &str, values: Vec<f64>) -> Result<&Chart, ChartError> {
        let chart = self
            .charts
            .get_mut(name)
            .ok_or_else(|| ChartError::UnknownChart(name.to_string()))?;

        if values.len() != chart.labels.len() {
            return Err(ChartError::LengthMismatch {
                chart: name.to_string(),
                expected: chart.labels.len(),
                got: values.len(),
            });
        }

        chart.values = values;
        chart.revision += 1;
        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_starts_with_zeroed_charts() {
        let registry = ChartRegistry::new();
        let risk = registry.get(RISK_CHART).unwrap();
        assert_eq!(risk.kind, ChartKind::Bar);
        assert_eq!(risk.values, vec![0.0; 4]);
        let radar = registry.get(EXERCISE_CHART).unwrap();
        assert_eq!(radar.kind, ChartKind::Radar);
        assert_eq!(radar.values.len(), 5);
    }

    #[test]
    fn update_replaces_values_and_bumps_revision() {
        let mut registry = ChartRegistry::new();
        let chart = registry
            .update_dataset(RISK_CHART, vec![40.0, 30.0, 25.0, 35.0])
            .unwrap();
        assert_eq!(chart.revision, 1);
        assert_eq!(chart.values[3], 35.0);
    }

    #[test]
    fn update_rejects_bad_requests() {
        let mut registry = ChartRegistry::new();
        assert_eq!(
            registry.update_dataset("pie", vec![]).unwrap_err(),
            ChartError::UnknownChart("pie".to_string())
        );
        assert!(matches!(
            registry.update_dataset(EXERCISE_CHART, vec![1.0; 4]),
            Err(ChartError::LengthMismatch { expected: 5, got: 4, .. })
        ));
        assert_eq!(registry.get(EXERCISE_CHART).unwrap().revision, 0);
    }
}
