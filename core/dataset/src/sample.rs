//! FILENAME: core/dataset/src/sample.rs
//! PURPOSE: Seeded synthetic sales data.
//! CONTEXT: The fallback and demo data source. Generation is driven by a
//! fixed-seed StdRng so repeated runs with the same config produce
//! value-for-value identical tables — tests depend on that.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::schema;
use crate::table::DataTable;
use crate::value::DataValue;

/// Parameters for the synthetic generator. Ranges are half-open
/// `[low, high)`. Defaults mirror the stock demo dataset: one year of 2023
/// with 5–14 transactions per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SampleConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rows_per_day: (u32, u32),
    pub sales_range: (u32, u32),
    pub quantity_range: (u32, u32),
    pub categories: Vec<String>,
    pub products: Vec<String>,
    pub regions: Vec<String>,
    pub customer_types: Vec<String>,
    pub payment_methods: Vec<String>,
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        SampleConfig {
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap_or_default(),
            rows_per_day: (5, 15),
            sales_range: (100, 5000),
            quantity_range: (1, 10),
            categories: to_strings(&["电子产品", "服装", "食品", "家居", "图书"]),
            products: to_strings(&[
                "iPhone", "MacBook", "T恤", "牛仔裤", "面包", "牛奶", "沙发", "台灯",
                "小说", "教材",
            ]),
            regions: to_strings(&["北京", "上海", "广州", "深圳", "杭州"]),
            customer_types: to_strings(&["个人", "企业", "VIP"]),
            payment_methods: to_strings(&["信用卡", "支付宝", "微信", "现金"]),
            seed: 42,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Generates a synthetic sales table. For each day in the configured range
/// a random number of records is emitted, each drawing category, product,
/// amount, quantity, region, customer type, and payment method in that
/// fixed order (the draw order matters for reproducibility).
pub fn generate_sample(config: &SampleConfig) -> DataTable {
    let mut table = DataTable::new(to_strings(&[
        schema::DATE,
        schema::CATEGORY,
        schema::PRODUCT,
        schema::SALE_AMOUNT,
        schema::QUANTITY,
        schema::REGION,
        schema::CUSTOMER_TYPE,
        schema::PAYMENT_METHOD,
    ]));

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut date = config.start_date;
    while date <= config.end_date {
        let rows = sample_range(&mut rng, config.rows_per_day);
        for _ in 0..rows {
            let category = pick(&mut rng, &config.categories);
            let product = pick(&mut rng, &config.products);
            let amount = sample_range(&mut rng, config.sales_range) as f64;
            let quantity = sample_range(&mut rng, config.quantity_range) as f64;
            let region = pick(&mut rng, &config.regions);
            let customer = pick(&mut rng, &config.customer_types);
            let payment = pick(&mut rng, &config.payment_methods);

            table.push_row(vec![
                DataValue::Date(date),
                category,
                product,
                DataValue::Number(amount),
                DataValue::Number(quantity),
                region,
                customer,
                payment,
            ]);
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    table
}

/// Uniform draw from `[low, high)`; degenerate ranges collapse to `low`.
fn sample_range(rng: &mut StdRng, (low, high): (u32, u32)) -> u32 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

fn pick(rng: &mut StdRng, items: &[String]) -> DataValue {
    match items.choose(rng) {
        Some(item) => DataValue::Text(item.clone()),
        None => DataValue::Empty,
    }
}
