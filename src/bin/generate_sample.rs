use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const REGION_COLUMN: &str = "Location of residence at the time of admission";
const FIRST_YEAR: i64 = 2012;
const N_YEARS: usize = 10;

/// Region name, students in the first year, yearly growth rate.
const REGIONS: [(&str, f64, f64); 14] = [
    ("Newfoundland and Labrador, origin", 1_150.0, 0.010),
    ("Prince Edward Island, origin", 240.0, 0.015),
    ("Nova Scotia, origin", 2_050.0, 0.012),
    ("New Brunswick, origin", 1_420.0, 0.008),
    ("Quebec, origin", 9_800.0, 0.020),
    ("Ontario, origin", 512_000.0, 0.018),
    ("Manitoba, origin", 1_900.0, 0.011),
    ("Saskatchewan, origin", 1_300.0, 0.009),
    ("Alberta, origin", 6_400.0, 0.025),
    ("British Columbia, origin", 7_900.0, 0.030),
    ("Yukon, origin", 95.0, 0.005),
    ("Northwest Territories, origin", 130.0, 0.004),
    ("Nunavut, origin", 60.0, 0.006),
    ("Outside Canada, origin", 48_000.0, 0.080),
];

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

    /// Uniform jitter in `[-spread, spread]`.
    fn jitter(&mut self, spread: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * spread
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let years: Vec<i64> = (0..N_YEARS as i64).map(|i| FIRST_YEAR + i).collect();

    // counts[region][year]
    let counts: Vec<Vec<i64>> = REGIONS
        .iter()
        .map(|&(_, base, growth)| {
            years
                .iter()
                .enumerate()
                .map(|(i, _)| {
                    let trend = base * (1.0 + growth).powi(i as i32);
                    (trend * (1.0 + rng.jitter(0.04))).round().max(0.0) as i64
                })
                .collect()
        })
        .collect();

    // ---- CSV ----
    let csv_path = "assets/number_of_undergrads_graduates_in_ontario.csv";
    std::fs::create_dir_all("assets").expect("Failed to create assets directory");
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");

    let mut header = vec![REGION_COLUMN.to_string()];
    header.extend(years.iter().map(|y| y.to_string()));
    writer.write_record(&header).expect("Failed to write CSV header");

    for ((name, _, _), row) in REGIONS.iter().zip(&counts) {
        let mut record = vec![name.to_string()];
        record.extend(row.iter().map(|c| c.to_string()));
        writer.write_record(&record).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");

    // ---- Parquet ----
    let mut fields = vec![Field::new(REGION_COLUMN, DataType::Utf8, false)];
    fields.extend(
        years
            .iter()
            .map(|y| Field::new(y.to_string(), DataType::Int64, false)),
    );
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<ArrayRef> = vec![Arc::new(StringArray::from(
        REGIONS.iter().map(|(name, _, _)| *name).collect::<Vec<_>>(),
    ))];
    for i in 0..years.len() {
        columns.push(Arc::new(Int64Array::from(
            counts.iter().map(|row| row[i]).collect::<Vec<_>>(),
        )));
    }

    let batch = RecordBatch::try_new(schema.clone(), columns)
        .expect("Failed to create RecordBatch");

    let parquet_path = "assets/number_of_undergrads_graduates_in_ontario.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {} regions × {} years to {csv_path} and {parquet_path}",
        REGIONS.len(),
        years.len()
    );
}
