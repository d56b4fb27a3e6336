//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for dashboard integration tests.

use chrono::NaiveDate;
use dashboard::{DashboardConfig, DashboardSession, DataSource};
use dataset::{schema, DataTable, DataValue};
use persistence::UploadedFile;

// ============================================================================
// FIXTURES
// ============================================================================

/// The three-order walkthrough dataset: two 北京 electronics orders in
/// January 2023 and one 上海 clothing order in February. Small enough
/// to verify every aggregate by hand.
pub struct OrdersFixture;

impl OrdersFixture {
    pub fn rows() -> Vec<(&'static str, &'static str, &'static str, f64)> {
        vec![
            ("2023-01-05", "北京", "电子产品", 1000.0),
            ("2023-02-10", "上海", "服装", 500.0),
            ("2023-01-20", "北京", "电子产品", 2000.0),
        ]
    }

    pub fn csv() -> String {
        let mut out = String::from("日期,地区,产品类别,销售额\n");
        for (date, region, category, amount) in Self::rows() {
            out.push_str(&format!("{},{},{},{}\n", date, region, category, amount));
        }
        out
    }

    pub fn upload() -> UploadedFile {
        UploadedFile::new("orders.csv", Self::csv().into_bytes())
    }

    pub fn source() -> DataSource {
        DataSource::Upload(Self::upload())
    }
}

/// A fixture covering the full column set, so every standard view has
/// its columns.
pub struct CatalogFixture;

type CatalogRow =
    (&'static str, &'static str, &'static str, f64, f64, &'static str, &'static str, &'static str);

impl CatalogFixture {
    pub fn rows() -> Vec<CatalogRow> {
        vec![
            ("2023-01-05", "电子产品", "iPhone", 1000.0, 2.0, "北京", "个人", "支付宝"),
            ("2023-01-20", "电子产品", "MacBook", 2000.0, 1.0, "北京", "企业", "信用卡"),
            ("2023-02-10", "服装", "T恤", 500.0, 5.0, "上海", "个人", "微信"),
            ("2023-03-15", "食品", "面包", 50.0, 10.0, "广州", "VIP", "现金"),
        ]
    }

    /// The raw (un-preprocessed) table, cells typed the way an upload
    /// parser would type them.
    pub fn table() -> DataTable {
        let mut table = DataTable::new(vec![
            schema::DATE.to_string(),
            schema::CATEGORY.to_string(),
            schema::PRODUCT.to_string(),
            schema::SALE_AMOUNT.to_string(),
            schema::QUANTITY.to_string(),
            schema::REGION.to_string(),
            schema::CUSTOMER_TYPE.to_string(),
            schema::PAYMENT_METHOD.to_string(),
        ]);
        for (date, category, product, amount, quantity, region, customer, payment) in Self::rows()
        {
            table.push_row(vec![
                DataValue::Text(date.to_string()),
                DataValue::Text(category.to_string()),
                DataValue::Text(product.to_string()),
                DataValue::Number(amount),
                DataValue::Number(quantity),
                DataValue::Text(region.to_string()),
                DataValue::Text(customer.to_string()),
                DataValue::Text(payment.to_string()),
            ]);
        }
        table
    }

    pub fn csv() -> String {
        let mut out = String::from("日期,产品类别,产品名称,销售额,数量,地区,客户类型,支付方式\n");
        for (date, category, product, amount, quantity, region, customer, payment) in Self::rows()
        {
            out.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                date, category, product, amount, quantity, region, customer, payment
            ));
        }
        out
    }

    pub fn source() -> DataSource {
        DataSource::Upload(UploadedFile::new("catalog.csv", Self::csv().into_bytes()))
    }
}

// ============================================================================
// SESSION HELPERS
// ============================================================================

/// A session with the orders fixture loaded through the upload path.
pub fn session_with_orders() -> DashboardSession {
    let mut session = DashboardSession::new(DashboardConfig::default());
    session.load(&OrdersFixture::source());
    session
}

/// A session with the full-schema catalog fixture loaded.
pub fn session_with_catalog() -> DashboardSession {
    let mut session = DashboardSession::new(DashboardConfig::default());
    session.load(&CatalogFixture::source());
    session
}

pub fn date(text: &str) -> NaiveDate {
    text.parse().unwrap()
}
