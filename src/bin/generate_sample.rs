//! Writes `sample_salaries.csv` for running the dashboard offline:
//!
//! ```text
//! cargo run --bin generate_sample
//! SALARY_DASHBOARD_SOURCE=sample_salaries.csv cargo run
//! ```

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (role, base salary in USD)
const ROLES: [(&str, f64); 12] = [
    ("Data Scientist", 140_000.0),
    ("Data Engineer", 135_000.0),
    ("Data Analyst", 95_000.0),
    ("Machine Learning Engineer", 160_000.0),
    ("Research Scientist", 170_000.0),
    ("Analytics Engineer", 125_000.0),
    ("BI Developer", 90_000.0),
    ("Data Architect", 155_000.0),
    ("Data Manager", 130_000.0),
    ("Head of Data", 190_000.0),
    ("AI Engineer", 165_000.0),
    ("Applied Scientist", 175_000.0),
];

/// (seniority, salary multiplier)
const SENIORITIES: [(&str, f64); 4] = [
    ("junior", 0.55),
    ("pleno", 0.8),
    ("senior", 1.0),
    ("executivo", 1.4),
];

/// (ISO3 country, salary multiplier)
const COUNTRIES: [(&str, f64); 8] = [
    ("USA", 1.0),
    ("CAN", 0.8),
    ("GBR", 0.7),
    ("DEU", 0.7),
    ("ESP", 0.5),
    ("BRA", 0.3),
    ("IND", 0.25),
    ("AUS", 0.75),
];

const CONTRACTS: [&str; 4] = ["integral", "parcial", "contrato", "freelancer"];
const COMPANY_SIZES: [&str; 3] = ["pequena", "media", "grande"];
const REMOTE: [&str; 3] = ["presencial", "hibrido", "remoto"];
const YEARS: [i32; 5] = [2020, 2021, 2022, 2023, 2024];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_salaries.csv";
    let mut writer = csv::Writer::from_path(output_path)?;

    writer.write_record([
        "ano",
        "senioridade",
        "contrato",
        "tamanho_empresa",
        "cargo",
        "usd",
        "remoto",
        "residencia_iso3",
    ])?;

    let n_rows = 2_000;
    for _ in 0..n_rows {
        let &(role, base) = rng.pick(&ROLES);
        let &(seniority, sen_factor) = rng.pick(&SENIORITIES);
        let &(country, country_factor) = rng.pick(&COUNTRIES);
        let year = *rng.pick(&YEARS);
        // Salaries drift up ~4% a year.
        let drift = 1.0 + 0.04 * (year - YEARS[0]) as f64;
        let mean = base * sen_factor * country_factor * drift;
        let usd = rng.gauss(mean, mean * 0.15).max(5_000.0).round();

        // A few rows without a country of residence.
        let country = if rng.next_f64() < 0.02 { "" } else { country };

        writer.write_record([
            year.to_string().as_str(),
            seniority,
            *rng.pick(&CONTRACTS),
            *rng.pick(&COMPANY_SIZES),
            role,
            usd.to_string().as_str(),
            *rng.pick(&REMOTE),
            country,
        ])?;
    }
    writer.flush()?;

    println!("Wrote {n_rows} salary records to {output_path}");
    Ok(())
}
