mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use predicates::str::{contains, starts_with};

    use std::fs;
    use std::path::Path;
    use std::process::Command;
    use tempfile::TempDir;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "streetgrid";

    const CITY: &str = r#"{
        "total_streetlights": 2,
        "road_stats": {"A1-A2": {"streetlights": 2, "length_km": 1.0}}
    }"#;

    const SCHEDULE: &str = r#"{"A1": {"A2": {"19": 100, "20": 50}}}"#;

    const GRID: &str = r#"{
        "nodes": [
            {"id": "A1", "zone": "residential", "traffic_light": true, "traffic_light_delay": 30},
            {"id": "A2", "zone": "residential", "traffic_light": false},
            {"id": "B1", "zone": "park", "traffic_light": false}
        ],
        "edges": [
            {"source": "A1", "target": "A2", "road_type": "major", "distance": 0.5, "capacity": 800},
            {"source": "A1", "target": "B1", "road_type": "minor", "distance": 0.4, "capacity": 300, "streetlights": 1},
            {"source": "A2", "target": "A1", "road_type": "major", "distance": 0.5, "capacity": 800}
        ]
    }"#;

    fn traffic_json() -> String {
        let vehicles: Vec<String> = (0..24).map(|h| (h * 10).to_string()).collect();
        let pedestrians = vec!["1"; 24].join(",");
        format!(
            r#"{{
                "A1-A2": {{"vehicles": [{v}], "pedestrians": [{p}]}},
                "A2-A1": {{"vehicles": [{v}], "pedestrians": [{p}]}},
                "B1-A1": {{"vehicles": [{v}], "pedestrians": [{p}]}}
            }}"#,
            v = vehicles.join(","),
            p = pedestrians
        )
    }

    fn write(dir: &Path, name: &str, content: &str) -> std::io::Result<()> {
        fs::write(dir.join(name), content)
    }

    /// Temporary data directory with every input document
    fn data_dir() -> Result<TempDir, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), "city_analysis.json", CITY)?;
        write(dir.path(), "smoothed_voltage_schedule.json", SCHEDULE)?;
        write(dir.path(), "city_grid.json", GRID)?;
        write(dir.path(), "traffic_data.json", &traffic_json())?;
        Ok(dir)
    }

    fn command(dir: &TempDir) -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.current_dir(dir.path()).arg("--no-config");
        Ok(cmd)
    }

    #[test]
    fn test_report__end_to_end() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;

        cmd.assert()
            .success()
            .stdout(starts_with("City reports 2 streetlights.\n"))
            .stdout(contains("Schedule covers 2 streetlights (matched).\n\n"))
            .stdout(contains("City area estimate: 0.0000 km² (0.00 m²)"))
            .stdout(contains("🔋 Baseline (100% voltage): 2.40 kWh"))
            .stdout(contains("🌙 After optimization:    0.25 kWh"))
            .stdout(contains(
                "💾 You saved 2.15 kWh (89.6% reduction) in one night!",
            ));
        Ok(())
    }

    #[test]
    fn test_report__explicit_subcommand_and_data_dir() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("report")
            .arg("--no-config")
            .arg("--data-dir")
            .arg(dir.path());

        cmd.assert().success().stdout(contains("0.25 kWh"));
        Ok(())
    }

    #[test]
    fn test_report__missing_edges_warning() -> TestResult {
        let dir = data_dir()?;
        write(
            dir.path(),
            "smoothed_voltage_schedule.json",
            r#"{"A1": {"A2": {"19": 100}}, "C1": {"C2": {"19": 80}}}"#,
        )?;
        let mut cmd = command(&dir)?;

        cmd.assert()
            .success()
            .stdout(contains("Warning: 1 edges not in city data:\n  - C1-C2\n"));
        Ok(())
    }

    #[test]
    fn test_report__strict_fails_on_missing_edges() -> TestResult {
        let dir = data_dir()?;
        write(
            dir.path(),
            "smoothed_voltage_schedule.json",
            r#"{"A1": {"A2": {"19": 100}}, "C1": {"C2": {"19": 80}}}"#,
        )?;
        let mut cmd = command(&dir)?;
        cmd.arg("--strict");

        cmd.assert()
            .failure()
            .code(1)
            .stdout(contains("City reports 2 streetlights."));
        Ok(())
    }

    #[test]
    fn test_report__strict_passes_when_complete() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.arg("--strict");

        cmd.assert().success();
        Ok(())
    }

    #[test]
    fn test_report__missing_city_file() -> TestResult {
        let dir = data_dir()?;
        fs::remove_file(dir.path().join("city_analysis.json"))?;
        let mut cmd = command(&dir)?;

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("Error: File not found: city_analysis.json"));
        Ok(())
    }

    #[test]
    fn test_report__malformed_schedule() -> TestResult {
        let dir = data_dir()?;
        write(dir.path(), "smoothed_voltage_schedule.json", "{not json")?;
        let mut cmd = command(&dir)?;

        cmd.assert()
            .failure()
            .stderr(contains("Error: Invalid JSON in"));
        Ok(())
    }

    #[test]
    fn test_report__json_format() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.arg("--format").arg("json");

        let output = cmd.output()?;
        assert!(output.status.success());
        let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(value["verification"]["total_scheduled"], 2);
        assert!((value["baseline_kwh"].as_f64().unwrap_or_default() - 2.4).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_report__minimal_format() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.arg("--format").arg("minimal");

        cmd.assert()
            .success()
            .stdout(contains("optimized_kwh=0.25"))
            .stdout(contains("percent_saved=89.6"));
        Ok(())
    }

    #[test]
    fn test_report__custom_power_and_hours() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.args(["--power-kw", "0.2", "--active-hours", "19,20"]);

        // 2 lamps * 0.2 kW * 2 hours, and 0.4 + 0.1 after dimming
        cmd.assert()
            .success()
            .stdout(contains("Baseline (100% voltage): 0.80 kWh"))
            .stdout(contains("After optimization:    0.50 kWh"));
        Ok(())
    }

    #[test]
    fn test_report__invalid_active_hours() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.args(["--active-hours", "19,24"]);

        cmd.assert().failure().stderr(contains("Error:"));
        Ok(())
    }

    #[test]
    fn test_report__config_file() -> TestResult {
        let dir = data_dir()?;
        let config = dir.path().join("custom.toml");
        fs::write(&config, "power_kw = 0.2\noutput_format = \"minimal\"\n")?;
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.current_dir(dir.path()).arg("--config").arg(&config);

        cmd.assert()
            .success()
            .stdout(contains("baseline_kwh=4.80"));
        Ok(())
    }

    #[test]
    fn test_report__invalid_config_file() -> TestResult {
        let dir = data_dir()?;
        let config = dir.path().join("broken.toml");
        fs::write(&config, "power_kw = [")?;
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.current_dir(dir.path()).arg("--config").arg(&config);

        cmd.assert()
            .failure()
            .stderr(contains("Invalid TOML in config file"));
        Ok(())
    }

    #[test]
    fn test_dashboard__overview() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.arg("dashboard");

        cmd.assert()
            .success()
            .stdout(contains("Residential: 2 roads"))
            .stdout(contains("Park: 1 roads"))
            .stdout(contains("Industrial: 0 roads"));
        Ok(())
    }

    #[test]
    fn test_dashboard__zone_and_road() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.args(["dashboard", "--zone", "residential", "--road", "A1-A2"]);

        cmd.assert()
            .success()
            .stdout(contains("Residential Zone: Hourly Traffic"))
            .stdout(contains("Roads: A1-A2, A2-A1"))
            .stdout(contains("A1-A2: Nightly Traffic"))
            .stdout(contains("Voltage Profile for A1-A2"))
            .stdout(contains("Some voltage data is missing for road 'A1-A2'."));
        Ok(())
    }

    #[test]
    fn test_dashboard__road_without_voltage_data() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.args(["dashboard", "--zone", "park", "--road", "B1-A1"]);

        cmd.assert()
            .success()
            .stdout(contains("Voltage data for road 'B1-A1' not found."));
        Ok(())
    }

    #[test]
    fn test_dashboard__zone_without_roads() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.args(["dashboard", "--zone", "industrial"]);

        cmd.assert()
            .success()
            .stdout(contains("No roads found for this zone."));
        Ok(())
    }

    #[test]
    fn test_dashboard__road_outside_zone() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.args(["dashboard", "--zone", "park", "--road", "A1-A2"]);

        cmd.assert()
            .failure()
            .stderr(contains("Road 'A1-A2' is not in zone 'park'"));
        Ok(())
    }

    #[test]
    fn test_dashboard__html() -> TestResult {
        let dir = data_dir()?;
        let html = dir.path().join("dashboard.html");
        let mut cmd = command(&dir)?;
        cmd.arg("dashboard").arg("--html").arg(&html);

        cmd.assert()
            .success()
            .stdout(contains("HTML dashboard generated"));

        let content = fs::read_to_string(&html)?;
        assert!(content.contains("Smart City Traffic &amp; Voltage Dashboard"));
        assert!(content.contains("residential"));
        Ok(())
    }

    #[test]
    fn test_grid__node_details() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.args(["grid", "--node", "A1"]);

        cmd.assert()
            .success()
            .stdout(contains("📍 Node: A1"))
            .stdout(contains("Zone: residential"))
            .stdout(contains("Traffic Light: Yes"))
            .stdout(contains("Traffic Light Delay: 30s"))
            .stdout(contains(
                "→ A2: major road, 0.5 km, Capacity: 800, Streetlights: 2",
            ))
            .stdout(contains(
                "→ B1: minor road, 0.4 km, Capacity: 300, Streetlights: 1",
            ));
        Ok(())
    }

    #[test]
    fn test_grid__node_details_without_city_file() -> TestResult {
        let dir = data_dir()?;
        fs::remove_file(dir.path().join("city_analysis.json"))?;
        let mut cmd = command(&dir)?;
        cmd.args(["grid", "--node", "A1"]);

        cmd.assert()
            .success()
            .stdout(contains("→ A2: major road, 0.5 km, Capacity: 800, Streetlights: 0"));
        Ok(())
    }

    #[test]
    fn test_grid__unknown_node() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.args(["grid", "--node", "Z9"]);

        cmd.assert()
            .failure()
            .stderr(contains("Unknown grid node 'Z9'"));
        Ok(())
    }

    #[test]
    fn test_grid__summary_and_html() -> TestResult {
        let dir = data_dir()?;
        let mut cmd = command(&dir)?;
        cmd.arg("grid");
        cmd.assert()
            .success()
            .stdout(contains("3 intersections, 3 roads (2×2)"));

        let html = dir.path().join("grid.html");
        let mut cmd = command(&dir)?;
        cmd.arg("grid").arg("--html").arg(&html);
        cmd.assert().success().stdout(contains("Grid map generated"));

        let content = fs::read_to_string(&html)?;
        assert!(content.contains("<svg"));
        assert!(content.contains(r#"data-node="B1""#));
        Ok(())
    }

    #[test]
    fn test_completion_generate() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.args(["completion-generate", "bash"]);

        cmd.assert().success().stdout(contains("streetgrid"));
        Ok(())
    }

    #[test]
    fn test_invalid_format() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.args(["--format", "xml"]);

        cmd.assert().failure().stderr(contains("invalid value 'xml'"));
        Ok(())
    }
}
