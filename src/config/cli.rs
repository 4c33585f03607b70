use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// 檔案都相對於 data_dir 讀寫，輸入與輸出放同一個目錄
#[derive(Debug, Clone)]
pub struct LocalStorage {
    data_dir: String,
}

impl LocalStorage {
    pub fn new(data_dir: String) -> Self {
        Self { data_dir }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.data_dir).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.data_dir).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
