use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const REQUEST_TYPE_FIELD: &str = "request_type_title";
pub const DESCRIPTION_FIELD: &str = "description";
pub const GEOM_FIELD: &str = "geom";
pub const LATITUDE_FIELD: &str = "latitude";
pub const LONGITUDE_FIELD: &str = "longitude";

/// 輸入表必須包含的欄位
pub const REQUIRED_COLUMNS: [&str; 3] = [REQUEST_TYPE_FIELD, DESCRIPTION_FIELD, GEOM_FIELD];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

/// 欄位順序與列一起保存，輸出時照原順序寫回
#[derive(Debug, Clone)]
pub struct IssueTable {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub table: IssueTable,
    pub matched_rows: usize,
    pub dropped_rows: usize,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: String,
    pub rows: usize,
}
