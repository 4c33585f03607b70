use crate::core::{ConfigProvider, IssueTable, Pipeline, Record, Storage, TransformResult};
use crate::domain::model::{LATITUDE_FIELD, LONGITUDE_FIELD, REQUIRED_COLUMNS};
use crate::domain::services;
use crate::utils::error::{EtlError, Result};
use std::collections::HashMap;

pub struct PotholePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> PotholePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PotholePipeline<S, C> {
    async fn extract(&self) -> Result<IssueTable> {
        tracing::info!("🚀 Loading issue reports from: {}", self.config.input_file());

        let raw = self.storage.read_file(self.config.input_file()).await?;
        if raw.is_empty() {
            return Err(EtlError::ProcessingError {
                message: format!("input file '{}' is empty", self.config.input_file()),
            });
        }

        let mut reader = csv::Reader::from_reader(raw.as_slice());

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        for required in REQUIRED_COLUMNS {
            if !columns.iter().any(|column| column == required) {
                return Err(EtlError::MissingColumnError {
                    column: required.to_string(),
                });
            }
        }

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let mut data = HashMap::new();
            for (column, cell) in columns.iter().zip(row.iter()) {
                // 空欄位視為缺值
                let value = if cell.is_empty() {
                    serde_json::Value::Null
                } else {
                    serde_json::Value::String(cell.to_string())
                };
                data.insert(column.clone(), value);
            }
            records.push(Record { data });
        }

        tracing::info!("📊 Loaded {} rows ({} columns)", records.len(), columns.len());
        Ok(IssueTable { columns, records })
    }

    async fn transform(&self, table: IssueTable) -> Result<TransformResult> {
        let total_rows = table.records.len();
        tracing::info!("🔧 Filtering {} rows for pothole reports", total_rows);

        // 過濾：分類或描述提到 pothole 的列，順序不變
        let matched: Vec<Record> = table
            .records
            .into_iter()
            .filter(services::mentions_pothole)
            .collect();
        let matched_rows = matched.len();

        // 解碼 geom 並捨棄沒有座標的列
        let mut cleaned = Vec::with_capacity(matched.len());
        let mut dropped_rows = 0usize;
        for mut record in matched {
            match services::extract_coordinates(&record) {
                Some((latitude, longitude)) => {
                    record
                        .data
                        .insert(LATITUDE_FIELD.to_string(), coordinate_value(latitude));
                    record
                        .data
                        .insert(LONGITUDE_FIELD.to_string(), coordinate_value(longitude));
                    cleaned.push(record);
                }
                None => dropped_rows += 1,
            }
        }

        // 座標欄已存在就覆寫原欄位，位置不變
        let mut columns = table.columns;
        for field in [LATITUDE_FIELD, LONGITUDE_FIELD] {
            if !columns.iter().any(|column| column == field) {
                columns.push(field.to_string());
            }
        }

        tracing::info!(
            "🕳️ Matched {} pothole rows out of {}, dropped {} without usable geometry",
            matched_rows,
            total_rows,
            dropped_rows
        );

        Ok(TransformResult {
            table: IssueTable {
                columns,
                records: cleaned,
            },
            matched_rows,
            dropped_rows,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        tracing::debug!("Rendering {} cleaned rows", result.table.records.len());

        let csv_data = render_csv(&result.table)?;
        self.storage
            .write_file(self.config.csv_output(), &csv_data)
            .await?;

        let json_data = render_json(&result.table)?;
        self.storage
            .write_file(self.config.json_output(), &json_data)
            .await?;

        tracing::info!(
            "💾 Wrote {} and {} ({} rows each)",
            self.config.csv_output(),
            self.config.json_output(),
            result.table.records.len()
        );

        Ok(self.config.data_dir().to_string())
    }
}

fn coordinate_value(value: f64) -> serde_json::Value {
    serde_json::Number::from_f64(value)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

fn cell_text(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(serde_json::Value::Number(number)) => number.to_string(),
        Some(serde_json::Value::Bool(flag)) => flag.to_string(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn render_csv(table: &IssueTable) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.columns)?;

    for record in &table.records {
        let row: Vec<String> = table
            .columns
            .iter()
            .map(|column| cell_text(record.data.get(column)))
            .collect();
        writer.write_record(&row)?;
    }

    writer.into_inner().map_err(|e| EtlError::ProcessingError {
        message: format!("CSV buffer flush failed: {}", e),
    })
}

fn render_json(table: &IssueTable) -> Result<Vec<u8>> {
    let mut rows = Vec::with_capacity(table.records.len());
    for record in &table.records {
        // 照欄位順序組 JSON 物件
        let mut object = serde_json::Map::new();
        for column in &table.columns {
            let value = record
                .data
                .get(column)
                .cloned()
                .unwrap_or(serde_json::Value::Null);
            object.insert(column.clone(), value);
        }
        rows.push(serde_json::Value::Object(object));
    }

    Ok(serde_json::to_vec_pretty(&rows)?)
}
