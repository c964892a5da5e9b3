use hawkdove::config::Config;
use hawkdove::error::{ConfigError, SimError};
use hawkdove::run_simulation;

#[test]
fn pure_model_records_every_generation() {
    let cfg = Config::pure(10, 1.0, 0.5, 0.01, 10, 0.5, 1);
    let table = run_simulation(cfg, 1).expect("failed to run simulation");

    assert_eq!(table.n_rows(), 10);
    assert_eq!(table.generation, (1..=10).collect::<Vec<_>>());
    assert!(table.freq_hawk.iter().all(|f| (0.0..=1.0).contains(f)));
    assert_eq!(table.freq_hawk, table.mean_p_hawk_mixed);
    assert!(table.sd_p_hawk_mixed.iter().all(|&var| var == 0.0));
}

#[test]
fn mixed_model_long_run() {
    let cfg = Config::new(1000, 1.0, 2.0, 0.01, 10_000, 0.05, 10, false, 0.05);
    let table = run_simulation(cfg, 2).expect("failed to run simulation");

    assert_eq!(table.n_rows(), 1000);
    assert!(
        table
            .generation
            .iter()
            .enumerate()
            .all(|(i_row, &generation)| generation == 10 * (i_row + 1))
    );
    assert!(
        table
            .mean_p_hawk_mixed
            .iter()
            .all(|p| (0.0..=1.0).contains(p))
    );
    assert!(table.sd_p_hawk_mixed.iter().all(|&var| var >= -1e-12));
}

#[test]
fn runs_are_reproducible() {
    let cfg = Config::new(50, 1.0, 2.0, 0.1, 100, 0.5, 5, false, 0.1);
    let table_a = run_simulation(cfg.clone(), 3).expect("failed to run simulation");
    let table_b = run_simulation(cfg, 3).expect("failed to run simulation");
    assert_eq!(table_a, table_b);
}

#[test]
fn minimal_population_runs() {
    let cfg = Config::pure(2, 1.0, 0.5, 0.01, 5, 0.5, 1);
    let table = run_simulation(cfg, 4).expect("failed to run simulation");
    assert_eq!(table.n_rows(), 5);
}

#[test]
fn invalid_interval_is_rejected() {
    let cfg = Config::pure(10, 1.0, 0.5, 0.01, 10, 0.5, 10);
    assert_eq!(
        run_simulation(cfg, 5),
        Err(SimError::Configuration(
            ConfigError::OutputIntervalTooLarge {
                output_nth_generation: 10,
                max_time: 10
            }
        ))
    );
}

#[test]
fn huge_payoffs_are_rejected() {
    let cfg = Config::pure(10, 1e308, 1e308, 0.0, 5, 0.5, 1);
    assert!(matches!(
        run_simulation(cfg, 1),
        Err(SimError::Configuration(ConfigError::PayoffOverflow { .. }))
    ));
}
