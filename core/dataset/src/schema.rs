//! FILENAME: core/dataset/src/schema.rs
//! Column names understood by the pipeline. The data format ships Chinese
//! headers; every component addresses columns through these constants.

// ============================================================================
// SOURCE COLUMNS
// ============================================================================

/// Transaction date. Required.
pub const DATE: &str = "日期";
/// Sale amount. Required.
pub const SALE_AMOUNT: &str = "销售额";
/// Product category.
pub const CATEGORY: &str = "产品类别";
/// Product name.
pub const PRODUCT: &str = "产品名称";
/// Quantity sold.
pub const QUANTITY: &str = "数量";
/// Sales region.
pub const REGION: &str = "地区";
/// Customer type.
pub const CUSTOMER_TYPE: &str = "客户类型";
/// Payment method.
pub const PAYMENT_METHOD: &str = "支付方式";

/// Columns a dataset must carry to validate.
pub const REQUIRED_COLUMNS: &[&str] = &[DATE, SALE_AMOUNT];

/// Columns the views use when present; absence disables the dependent view.
pub const OPTIONAL_COLUMNS: &[&str] = &[
    CATEGORY,
    PRODUCT,
    QUANTITY,
    REGION,
    CUSTOMER_TYPE,
    PAYMENT_METHOD,
];

// ============================================================================
// DERIVED COLUMNS (written by the preprocessor)
// ============================================================================

/// Month label, e.g. "2023-06".
pub const MONTH: &str = "月份";
/// Quarter label, e.g. "2023Q1".
pub const QUARTER: &str = "季度";
/// Calendar year as a number.
pub const YEAR: &str = "年份";
/// English weekday name, e.g. "Monday".
pub const WEEKDAY: &str = "星期";

/// Derived calendar columns in the order the preprocessor appends them.
pub const DERIVED_COLUMNS: &[&str] = &[MONTH, QUARTER, YEAR, WEEKDAY];

// ============================================================================
// UPLOAD FORMATS
// ============================================================================

/// File extensions accepted by the upload path.
pub const SUPPORTED_FILE_TYPES: &[&str] = &["csv", "xlsx", "xls"];
