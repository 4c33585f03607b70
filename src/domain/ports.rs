use crate::domain::model::{IssueTable, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn input_file(&self) -> &str;
    fn csv_output(&self) -> &str;
    fn json_output(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<IssueTable>;
    async fn transform(&self, table: IssueTable) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
