use crate::config::Config;
use crate::engine::Engine;
use crate::stats::OutputTable;
use anyhow::{Context, Result};
use glob::glob;
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use rmp_serde::{decode, encode};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

/// Everything written for one replicate run.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunOutput {
    /// Seed the run's generator was built from.
    pub seed: u64,
    /// Recorded statistics.
    pub table: OutputTable,
}

/// Simulation directory with a `config.toml` and one `run-NNNN` directory
/// per replicate.
pub struct Manager {
    sim_dir: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(sim_dir: P) -> Result<Self> {
        let sim_dir = sim_dir.as_ref().to_path_buf();

        let cfg =
            Config::from_file(sim_dir.join("config.toml")).context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self { sim_dir, cfg })
    }

    /// Run a new replicate in the next free run directory.
    pub fn create_run(&self) -> Result<()> {
        let run_idx = self.count_run_dirs().context("failed to count run dirs")?;

        let run_dir = self.run_dir(run_idx);
        fs::create_dir_all(&run_dir).with_context(|| format!("failed to create {run_dir:?}"))?;
        log::info!("created {run_dir:?}");

        // Replicates of a seeded simulation share the seed but not the stream.
        let seed = match self.cfg.seed {
            Some(seed) => seed,
            None => rand::rng().random(),
        };
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        rng.set_stream(run_idx as u64);
        log::info!("using seed {seed} on stream {run_idx}");

        let engine = Engine::generate_initial_condition(self.cfg.clone(), rng)
            .context("failed to generate initial condition")?;
        let series = engine.run().context("failed to run simulation")?;

        let output = RunOutput {
            seed,
            table: OutputTable::from(series.as_slice()),
        };
        let output_file = self.output_file(run_idx);
        write_output(&output_file, &output)
            .with_context(|| format!("failed to write {output_file:?}"))?;
        log::info!("wrote {output_file:?}");

        Ok(())
    }

    /// Print the table of a finished run to standard output.
    pub fn print_run(&self, run_idx: usize) -> Result<()> {
        let output_file = self.output_file(run_idx);
        let output = read_output(&output_file)
            .with_context(|| format!("failed to read {output_file:?}"))?;

        let stdout = std::io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        write_table(&mut writer, &output.table).context("failed to write table")?;
        writer.flush().context("failed to flush writer stream")?;

        Ok(())
    }

    /// Remove every run directory.
    pub fn clean_sim(&self) -> Result<()> {
        for run_dir in self.run_dirs().context("failed to list run dirs")? {
            fs::remove_dir_all(&run_dir)
                .with_context(|| format!("failed to remove {run_dir:?}"))?;
            log::info!("removed {run_dir:?}");
        }
        Ok(())
    }

    fn run_dirs(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.sim_dir.join("run-*");
        let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;
        let run_dirs = glob(pattern)
            .context("failed to glob run dirs")?
            .filter_map(Result::ok)
            .filter(|p| p.is_dir())
            .collect();
        Ok(run_dirs)
    }

    fn count_run_dirs(&self) -> Result<usize> {
        Ok(self.run_dirs()?.len())
    }

    fn run_dir(&self, run_idx: usize) -> PathBuf {
        self.sim_dir.join(format!("run-{run_idx:04}"))
    }

    fn output_file(&self, run_idx: usize) -> PathBuf {
        self.run_dir(run_idx).join("output.msgpack")
    }
}

fn write_output(file: &Path, output: &RunOutput) -> Result<()> {
    let file = File::create(file).context("failed to create file")?;
    let mut writer = BufWriter::new(file);
    encode::write_named(&mut writer, output).context("failed to serialize output")?;
    writer.flush().context("failed to flush writer stream")?;
    Ok(())
}

fn read_output(file: &Path) -> Result<RunOutput> {
    let file = File::open(file).context("failed to open file")?;
    let reader = BufReader::new(file);
    let output = decode::from_read(reader).context("failed to deserialize output")?;
    Ok(output)
}

fn write_table<W: Write>(writer: &mut W, table: &OutputTable) -> Result<()> {
    writeln!(writer, "#{}", OutputTable::COLUMNS.join(" "))?;
    for i_row in 0..table.n_rows() {
        writeln!(
            writer,
            "{:>10} {:016.14} {:016.14} {:016.14}",
            table.generation[i_row],
            table.freq_hawk[i_row],
            table.mean_p_hawk_mixed[i_row],
            table.sd_p_hawk_mixed[i_row]
        )?;
    }
    Ok(())
}
