use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

/// Product names; a few of them are restricted palindromes.
const PRODUCTS: [&str; 8] = [
    "Apple", "Banana", "ADA", "Orange", "ANNA", "Kiwi", "NAVAN", "Mango",
];

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Write a deterministic sales table for trying out the explorer"
)]
struct Args {
    #[arg(long, default_value_t = 200)]
    rows: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value = "sample_sales.csv")]
    output: PathBuf,
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

    /// Uniform integer in `lo..hi`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo)
    }
}

/// ISO date `day` days after 2025-01-01, ignoring leap years.
fn iso_date(day: usize) -> String {
    const MONTH_DAYS: [usize; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let year = 2025 + day / 365;
    let mut rest = day % 365;
    let mut month = 0;
    while rest >= MONTH_DAYS[month] {
        rest -= MONTH_DAYS[month];
        month += 1;
    }
    format!("{year}-{:02}-{:02}", month + 1, rest + 1)
}

/// One line of the generated file.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SaleRecord {
    date: String,
    product: &'static str,
    /// Roughly one row in twenty has no quantity recorded.
    quantity: Option<u64>,
    price: String,
}

fn sample_row(rng: &mut SimpleRng, day: usize) -> SaleRecord {
    let product = PRODUCTS[rng.range(0, PRODUCTS.len() as u64) as usize];
    let quantity = if rng.next_f64() < 0.05 {
        None
    } else {
        Some(rng.range(1, 50))
    };
    SaleRecord {
        date: iso_date(day),
        product,
        quantity,
        price: format!("{:.2}", 0.5 + rng.next_f64() * 2.5),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for day in 0..args.rows {
        writer.serialize(sample_row(&mut rng, day))?;
    }
    writer.flush()?;

    log::info!("Wrote {} rows to {}", args.rows, args.output.display());
    println!("Wrote {} rows to {}", args.rows, args.output.display());
    Ok(())
}
