use std::collections::BTreeMap;

use portfolio_lens::data::columns::{index_to_label, label_to_index};
use portfolio_lens::data::layout::{SheetLayout, DEFAULT_SHEET_NAME};
use serde_json::{json, Value as JsonValue};

const TAGS: [&str; 8] = [
    "Command and Energy Management",
    "Controls & Power Mgmt",
    "Distribution",
    "Energy Conversion",
    "Energy Source",
    "Energy Storage",
    "Power Generation",
    "Power Tools & Analytics",
];

const STATUSES: [&str; 5] = [
    "Success",
    "Success past 5years",
    "None Yet",
    "Cancelled",
    "Ongoing",
];

const TOPICS: [&str; 6] = [
    "Hybrid bus architecture",
    "Pulsed load buffering",
    "Solid-state breaker",
    "Thermal-aware converter",
    "Fuel cell integration",
    "Predictive power scheduling",
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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

fn cell(value: JsonValue) -> JsonValue {
    let kind = match &value {
        JsonValue::Number(_) => "n",
        JsonValue::Bool(_) => "b",
        _ => "s",
    };
    json!({ "t": kind, "v": value })
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let layout = SheetLayout::default();
    let mut cells: BTreeMap<String, JsonValue> = BTreeMap::new();
    let mut put = |col: &str, row: u32, value: JsonValue| {
        cells.insert(format!("{col}{row}"), cell(value));
    };

    // ---- Header row ----
    put(&layout.include_column, 1, json!("Include"));
    put(&layout.start_year_column, 1, json!("Start Year"));
    put(&layout.project_name_column, 1, json!("Project"));
    put(&layout.funding_column, 1, json!("Funding ($M)"));

    let tag_cols = layout.tag_columns.columns();
    for (col, tag) in tag_cols.iter().zip(TAGS) {
        put(col, 1, json!(tag));
    }
    let lead_cols = layout.project_leads.columns();
    for (i, col) in lead_cols.iter().enumerate() {
        put(col, 1, json!(format!("Lead {}", i + 1)));
    }
    let transition_cols = layout.transition_tags.columns();
    for (i, col) in transition_cols.iter().enumerate() {
        put(col, 1, json!(format!("Transition {}", i + 1)));
    }
    let status_cols = layout.status.columns();
    for (col, status) in status_cols.iter().zip(STATUSES) {
        put(col, 1, json!(status));
    }
    let partner_cols = layout.transition_partners.columns();
    for (i, col) in partner_cols.iter().enumerate() {
        put(col, 1, json!(format!("Partner {}", i + 1)));
    }

    // ---- Data rows ----
    let n_projects: u32 = 60;
    for row in 2..=n_projects + 1 {
        let year = 2012 + rng.below(10) as i64;
        let topic = TOPICS[rng.below(TOPICS.len())];
        put(&layout.include_column, row, json!(if rng.chance(0.9) { "x" } else { "" }));
        put(&layout.start_year_column, row, json!(year));
        put(
            &layout.project_name_column,
            row,
            json!(format!("{:02}ZZ-{:02}: {topic} (PRJ) [{year}-{}]", year % 100, row, year + 4)),
        );
        let funding = (rng.next_f64() * 12.0 * 100.0).round() / 100.0;
        put(&layout.funding_column, row, json!(funding));

        for col in &tag_cols {
            if rng.chance(0.3) {
                put(col, row, json!(1));
            }
        }
        put(&lead_cols[rng.below(lead_cols.len())], row, json!(1));
        if rng.chance(0.2) {
            put(&lead_cols[rng.below(lead_cols.len())], row, json!(1));
        }
        for col in &transition_cols {
            if rng.chance(0.25) {
                put(col, row, json!(1));
            }
        }
        put(&status_cols[rng.below(status_cols.len())], row, json!(1));
        for col in &partner_cols {
            if rng.chance(0.1) {
                put(col, row, json!(1));
            }
        }
    }

    let last_col = partner_cols.last().map(|c| label_to_index(c)).unwrap_or(1);

    let mut sheet = serde_json::Map::new();
    sheet.insert(
        "!ref".to_string(),
        json!(format!("A1:{}{}", index_to_label(last_col), n_projects + 1)),
    );
    sheet.extend(cells);

    let mut sheets = serde_json::Map::new();
    sheets.insert(DEFAULT_SHEET_NAME.to_string(), JsonValue::Object(sheet));
    let workbook = json!({
        "SheetNames": [DEFAULT_SHEET_NAME],
        "Sheets": sheets,
    });

    let output_path = "sample_workbook.json";
    let text = serde_json::to_string_pretty(&workbook).expect("Failed to serialise workbook");
    std::fs::write(output_path, text).expect("Failed to write output file");

    println!("Wrote {n_projects} projects to {output_path}");
}
