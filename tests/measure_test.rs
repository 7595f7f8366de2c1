//! Histograms, recorders, temperature scans and YAML configuration.

use ising::config::ScanConfig;
use ising::exact::ExactDistribution;
use ising::measure::{scan_temperatures, temperature_grid};
use ising::{
    CodeHistogram, Dynamics, IsingError, IsingModel, Observable, Recorder, ScanSpec, SimConfig,
};

use approx::assert_relative_eq;

#[test]
fn histogram_counts() {
    let hist: CodeHistogram = [1u64, 1, 2, 3, 1].into_iter().collect();
    assert_eq!(hist.total(), 5);
    assert_eq!(hist.distinct(), 3);
    assert_eq!(hist.count(1), 3);
    assert_eq!(hist.count(7), 0);
    assert_relative_eq!(hist.frequency(1), 0.6);
    assert_relative_eq!(hist.max_fraction(), 0.6);
    // ties broken by code
    assert_eq!(hist.dominant(2), vec![(1, 3), (2, 1)]);
    assert_eq!(hist.empirical_pmf(3), vec![0.0, 0.6, 0.2]);

    let empty = CodeHistogram::new();
    assert_eq!(empty.max_fraction(), 0.0);
    assert_eq!(empty.frequency(0), 0.0);
}

#[test]
fn histogram_against_exact() {
    let exact = ExactDistribution::compute(1, 1.0, 1.0).unwrap();
    let mut hist = CodeHistogram::new();
    hist.extend([0, 0, 0, 0]);
    assert_relative_eq!(hist.total_variation_distance(&exact), 0.5);

    hist.extend([1, 1, 1, 1]);
    assert_relative_eq!(hist.total_variation_distance(&exact), 0.0);

    let rows = hist.compare(&exact);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].code, 1);
    assert_relative_eq!(rows[1].simulated, 0.5);
    assert_relative_eq!(rows[1].theoretical, 0.5);
}

#[test]
fn recorder_tracks_both_series() {
    let mut model = IsingModel::with_seed(3, 1.0, 2.5, 8).unwrap();
    let rec = Recorder::sample(&mut model, 100);
    assert_eq!(rec.len(), 100);
    assert_eq!(rec.encodings.len(), 100);
    assert_eq!(rec.series(Observable::Energy), rec.energies);
    assert_eq!(rec.series(Observable::Encoding)[99], rec.encodings[99] as f64);
    assert_eq!(rec.histogram().total(), 100);

    // too large to encode: energies only
    let mut big = IsingModel::with_seed(10, 1.0, 2.5, 8).unwrap();
    let rec = Recorder::sample(&mut big, 5);
    assert_eq!(rec.len(), 5);
    assert!(rec.encodings.is_empty());
}

#[test]
fn temperature_grid_is_inclusive() {
    assert_eq!(temperature_grid(1.0, 2.0, 4), vec![1.0, 1.25, 1.5, 1.75, 2.0]);
    assert_eq!(temperature_grid(3.0, 5.0, 0), vec![3.0]);
}

fn small_scan() -> ScanSpec {
    ScanSpec {
        dim: 2,
        coupling: 1.0,
        temperatures: vec![1.0, 2.0, 5.0],
        warmup: 10,
        sweeps: 400,
        dynamics: Dynamics::Heatbath,
        observable: Observable::Encoding,
        seed: 2024,
    }
}

#[test]
fn scan_keeps_temperature_order_and_is_reproducible() {
    let spec = small_scan();
    let a = scan_temperatures(&spec).unwrap();
    let b = scan_temperatures(&spec).unwrap();
    assert_eq!(a.len(), 3);
    for (p, q) in a.iter().zip(&b) {
        assert_eq!(p.temperature, q.temperature);
        assert_eq!(p.mean_energy.to_bits(), q.mean_energy.to_bits());
        assert_eq!(p.autocorrelation_time.to_bits(), q.autocorrelation_time.to_bits());
    }
    let temps: Vec<f64> = a.iter().map(|p| p.temperature).collect();
    assert_eq!(temps, spec.temperatures);

    // hotter means higher energy on average
    assert!(a[0].mean_energy < a[2].mean_energy);
    assert!(a.iter().all(|p| p.energy_std >= 0.0));
}

#[test]
fn scan_rejects_bad_specs() {
    let spec = ScanSpec { dim: 9, ..small_scan() };
    assert!(matches!(
        scan_temperatures(&spec),
        Err(IsingError::EncodingOverflow { bits: 81, .. })
    ));

    let spec = ScanSpec { dim: 9, sweeps: 20, observable: Observable::Energy, ..small_scan() };
    assert_eq!(scan_temperatures(&spec).unwrap().len(), 3);

    let spec = ScanSpec { sweeps: 0, ..small_scan() };
    assert_eq!(scan_temperatures(&spec).unwrap_err(), IsingError::EmptySeries);

    let spec = ScanSpec { temperatures: vec![1.0, 0.0], ..small_scan() };
    assert!(matches!(
        scan_temperatures(&spec),
        Err(IsingError::InvalidTemperature { .. })
    ));
}

#[test]
fn observable_names() {
    assert_eq!("energy".parse::<Observable>().unwrap(), Observable::Energy);
    assert_eq!("Encoding".parse::<Observable>().unwrap(), Observable::Encoding);
    assert!(matches!("magnetization".parse::<Observable>(), Err(IsingError::Config { .. })));
}

#[test]
fn config_file_round_trip() {
    let cfg = SimConfig {
        dim: 4,
        temperature: 1.75,
        dynamics: Dynamics::Metropolis,
        seed: Some(77),
        scan: Some(ScanConfig { steps: 10, ..ScanConfig::default() }),
        ..SimConfig::default()
    };
    let path = std::env::temp_dir().join(format!("ising_cfg_{}.yaml", std::process::id()));
    std::fs::write(&path, cfg.to_yaml().unwrap()).unwrap();
    let loaded = SimConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.dim, 4);
    assert_eq!(loaded.temperature, 1.75);
    assert_eq!(loaded.dynamics, Dynamics::Metropolis);
    assert_eq!(loaded.seed, Some(77));
    assert_eq!(loaded.scan_spec(77).temperatures.len(), 11);
    assert!(loaded.validate().is_ok());

    assert!(matches!(
        SimConfig::load("/nonexistent/ising.yaml"),
        Err(IsingError::Config { .. })
    ));
    assert!(matches!(SimConfig::from_yaml_str("dim: [1"), Err(IsingError::Config { .. })));

    // zero recorded sweeps is refused before anything runs
    let cfg = SimConfig::from_yaml_str("sweeps: 0").unwrap();
    assert!(matches!(cfg.validate(), Err(IsingError::Config { .. })));
}
