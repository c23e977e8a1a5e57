use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Applied lamp voltage as a percentage of nominal (100 = full brightness).
///
/// Schedules written by older pipelines quote the numbers, so both `80` and
/// `"80"` are accepted.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(try_from = "RawVoltage")]
pub struct Voltage(pub f64);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVoltage {
    Number(f64),
    Text(String),
}

impl TryFrom<RawVoltage> for Voltage {
    type Error = String;

    fn try_from(raw: RawVoltage) -> Result<Self, Self::Error> {
        let value = match raw {
            RawVoltage::Number(value) => value,
            RawVoltage::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("voltage '{text}' is not a number"))?,
        };
        if value.is_finite() {
            Ok(Voltage(value))
        } else {
            Err(format!("voltage {value} is not finite"))
        }
    }
}

impl Voltage {
    pub fn percent(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Voltage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Voltage per hour of day for one edge. Hour keys are `"0"`..`"23"` in the file.
pub type HourlyVoltage = BTreeMap<u32, Voltage>;

/// Per-edge, per-hour dimming schedule: source -> destination -> hour -> voltage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct VoltageSchedule {
    sources: BTreeMap<String, BTreeMap<String, HourlyVoltage>>,
}

impl VoltageSchedule {
    /// Every scheduled edge as `(source, destination, hours)`, in key order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &HourlyVoltage)> {
        self.sources.iter().flat_map(|(source, targets)| {
            targets
                .iter()
                .map(move |(target, hours)| (source.as_str(), target.as_str(), hours))
        })
    }

    /// Hourly voltages of `source -> target`, if scheduled
    pub fn hours_for(&self, source: &str, target: &str) -> Option<&HourlyVoltage> {
        self.sources.get(source)?.get(target)
    }

    pub fn edge_count(&self) -> usize {
        self.sources.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count() == 0
    }

    /// Set the voltage of one edge-hour, creating the edge when needed
    pub fn insert(&mut self, source: &str, target: &str, hour: u32, voltage: f64) {
        self.sources
            .entry(source.to_string())
            .or_default()
            .entry(target.to_string())
            .or_default()
            .insert(hour, Voltage(voltage));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_numeric_voltages() {
        let schedule: VoltageSchedule =
            serde_json::from_str(r#"{"A1": {"A2": {"19": 100, "20": 50.5}}}"#).unwrap();

        let hours = schedule.hours_for("A1", "A2").unwrap();
        assert_eq!(hours.get(&19), Some(&Voltage(100.0)));
        assert_eq!(hours.get(&20), Some(&Voltage(50.5)));
        assert_eq!(schedule.edge_count(), 1);
    }

    #[test]
    fn test_schedule_quoted_voltages() {
        let schedule: VoltageSchedule =
            serde_json::from_str(r#"{"A1": {"A2": {"19": "100", "20": " 50 "}}}"#).unwrap();

        let hours = schedule.hours_for("A1", "A2").unwrap();
        assert_eq!(hours[&19].percent(), 100.0);
        assert_eq!(hours[&20].percent(), 50.0);
    }

    #[test]
    fn test_schedule_rejects_non_numeric_voltage() {
        let result: Result<VoltageSchedule, _> =
            serde_json::from_str(r#"{"A1": {"A2": {"19": "bright"}}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_schedule_rejects_non_numeric_hour() {
        let result: Result<VoltageSchedule, _> =
            serde_json::from_str(r#"{"A1": {"A2": {"evening": 80}}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_schedule_edges_iterate_in_key_order() {
        let schedule: VoltageSchedule = serde_json::from_str(
            r#"{"B1": {"B2": {}}, "A1": {"A3": {}, "A2": {}}}"#,
        )
        .unwrap();

        let edges: Vec<(&str, &str)> = schedule.edges().map(|(s, t, _)| (s, t)).collect();
        assert_eq!(edges, vec![("A1", "A2"), ("A1", "A3"), ("B1", "B2")]);
    }

    #[test]
    fn test_schedule_insert() {
        let mut schedule = VoltageSchedule::default();
        assert!(schedule.is_empty());

        schedule.insert("A1", "A2", 19, 80.0);
        schedule.insert("A1", "A2", 20, 60.0);
        schedule.insert("A1", "B1", 19, 100.0);

        assert_eq!(schedule.edge_count(), 2);
        assert_eq!(schedule.hours_for("A1", "A2").unwrap().len(), 2);
        assert!(schedule.hours_for("B1", "A1").is_none());
    }
}
