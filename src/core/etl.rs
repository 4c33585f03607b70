use crate::core::Pipeline;
use crate::domain::model::RunReport;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunReport> {
        println!("Starting pothole clean-up...");

        // Extract
        println!("Loading data...");
        let table = self.pipeline.extract().await?;
        println!("Loaded {} rows", table.records.len());
        self.monitor.log_stats("Extract");

        // Transform
        println!("Filtering and decoding...");
        let result = self.pipeline.transform(table).await?;
        println!("Retained {} cleaned rows", result.table.records.len());
        self.monitor.log_stats("Transform");

        // Load
        println!("Writing outputs...");
        let rows = result.table.records.len();
        let output_path = self.pipeline.load(result).await?;
        println!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");

        self.monitor.log_final_stats();

        Ok(RunReport { output_path, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{IssueTable, Record, TransformResult};
    use crate::utils::error::EtlError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MockPipeline {
        rows: usize,
        fail_extract: bool,
    }

    #[async_trait]
    impl Pipeline for MockPipeline {
        async fn extract(&self) -> Result<IssueTable> {
            if self.fail_extract {
                return Err(EtlError::ProcessingError {
                    message: "boom".to_string(),
                });
            }
            let records = (0..self.rows)
                .map(|_| Record {
                    data: HashMap::new(),
                })
                .collect();
            Ok(IssueTable {
                columns: vec!["geom".to_string()],
                records,
            })
        }

        async fn transform(&self, table: IssueTable) -> Result<TransformResult> {
            let matched_rows = table.records.len();
            Ok(TransformResult {
                table,
                matched_rows,
                dropped_rows: 0,
            })
        }

        async fn load(&self, _result: TransformResult) -> Result<String> {
            Ok("mock-output".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_reports_retained_rows_and_output_path() {
        let engine = EtlEngine::new(MockPipeline {
            rows: 3,
            fail_extract: false,
        });

        let report = engine.run().await.unwrap();
        assert_eq!(report.rows, 3);
        assert_eq!(report.output_path, "mock-output");
    }

    #[tokio::test]
    async fn test_run_propagates_stage_errors() {
        let engine = EtlEngine::new_with_monitoring(
            MockPipeline {
                rows: 0,
                fail_extract: true,
            },
            false,
        );

        let result = engine.run().await;
        assert!(matches!(result, Err(EtlError::ProcessingError { .. })));
    }
}
