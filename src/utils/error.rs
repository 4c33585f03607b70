use thiserror::Error;

/// 錯誤嚴重程度，main 依此決定退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// 錯誤分類，僅用於日誌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Data,
    Io,
}

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Required column '{column}' not found in input header")]
    MissingColumnError { column: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::CsvError(_)
            | EtlError::SerializationError(_)
            | EtlError::MissingColumnError { .. }
            | EtlError::ProcessingError { .. } => ErrorCategory::Data,
            EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::IoError(_) => ErrorSeverity::Critical,
            EtlError::CsvError(_)
            | EtlError::SerializationError(_)
            | EtlError::MissingColumnError { .. }
            | EtlError::ProcessingError { .. } => ErrorSeverity::High,
            EtlError::InvalidConfigValueError { .. } => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::CsvError(_) => {
                "Check that the input file is a well-formed CSV with a header row".to_string()
            }
            EtlError::IoError(_) => {
                "Check that the data directory exists and is readable/writable".to_string()
            }
            EtlError::SerializationError(_) => {
                "Inspect the cleaned rows for values that cannot be represented as JSON"
                    .to_string()
            }
            EtlError::MissingColumnError { column } => format!(
                "Verify the export contains a '{}' column (request_type_title, description and geom are required)",
                column
            ),
            EtlError::ProcessingError { .. } => {
                "Re-export the source dataset and run the tool again".to_string()
            }
            EtlError::InvalidConfigValueError { field, .. } => {
                format!("Adjust the value of '{}' and run again (see --help)", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::CsvError(e) => format!("The input CSV could not be parsed: {}", e),
            EtlError::IoError(e) => format!("A file operation failed: {}", e),
            EtlError::SerializationError(e) => format!("Writing the JSON output failed: {}", e),
            EtlError::MissingColumnError { column } => {
                format!("The input file has no '{}' column", column)
            }
            EtlError::ProcessingError { message } => {
                format!("The dataset could not be processed: {}", message)
            }
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration problem with '{}': {}", field, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
