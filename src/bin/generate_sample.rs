use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

/// Write a synthetic `time,value` series to try the labeler on.
#[derive(Debug, Parser)]
#[command(name = "generate-sample", about)]
struct Args {
    /// Output CSV path.
    #[arg(default_value = "sample_series.csv")]
    output: PathBuf,

    /// Number of rows.
    #[arg(long, default_value_t = 2000)]
    rows: usize,

    /// Noise seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Serialize)]
struct Row {
    time: f64,
    value: f64,
    sensor: &'static str,
}

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Slow oscillation with a few bursts worth labeling.
fn signal(t: f64) -> f64 {
    let bursts = [(20.0, 1.5, 4.0), (55.0, 3.0, -3.0), (80.0, 0.8, 6.0)];
    let base = (t / 8.0).sin();
    base + bursts
        .iter()
        .map(|&(mu, sigma, amp)| gaussian(t, mu, sigma, amp))
        .sum::<f64>()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let span = 100.0;
    for i in 0..args.rows {
        let time = i as f64 * span / args.rows.max(1) as f64;
        let row = Row {
            time: (time * 1000.0).round() / 1000.0,
            value: signal(time) + rng.gauss(0.0, 0.1),
            sensor: if time < span / 2.0 { "left" } else { "right" },
        };
        writer.serialize(&row).context("writing sample row")?;
    }
    writer.flush().context("flushing sample CSV")?;

    log::info!("wrote {} rows to {}", args.rows, args.output.display());
    println!("Wrote {} rows to {}", args.rows, args.output.display());
    Ok(())
}
