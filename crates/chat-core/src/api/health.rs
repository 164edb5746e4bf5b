//! Health API
//!
//! Liveness endpoint for the HTTP server and the fuller diagnostics behind
//! `chat-api doctor`.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::config::Config;
use crate::storage::Database;

/// Health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    pub message: Option<String>,
}

/// Health status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Warning,
    Error,
}

/// Overall system health report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub overall_status: HealthStatus,
    pub checks: Vec<HealthCheck>,
    pub timestamp: String,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub database: HealthStatus,
}

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.service.database().health_check().await {
        Ok(()) => HealthStatus::Ok,
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            HealthStatus::Error
        }
    };

    let (code, status) = if database == HealthStatus::Ok {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            service: state.service_name.to_string(),
            database,
        }),
    )
}

/// Run all health checks (doctor command)
pub async fn doctor(config: &Config) -> HealthReport {
    let checks = vec![check_config(config), check_database(config).await];
    let overall_status = checks
        .iter()
        .map(|c| c.status)
        .max()
        .unwrap_or(HealthStatus::Ok);

    HealthReport {
        overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}

/// Check configuration values
fn check_config(config: &Config) -> HealthCheck {
    match config.validate().and_then(|()| config.bind_addr()) {
        Ok(addr) => HealthCheck {
            name: "Configuration".to_string(),
            status: HealthStatus::Ok,
            message: Some(format!("Valid, binding {}", addr)),
        },
        Err(e) => HealthCheck {
            name: "Configuration".to_string(),
            status: HealthStatus::Error,
            message: Some(format!("{:#}", e)),
        },
    }
}

/// Check database connection and schema version
async fn check_database(config: &Config) -> HealthCheck {
    let db_config = config.database_config();

    if !db_config.is_in_memory() && !db_config.path.exists() {
        return HealthCheck {
            name: "Database".to_string(),
            status: HealthStatus::Warning,
            message: Some(format!(
                "Does not exist at {} (will be created)",
                db_config.path.display()
            )),
        };
    }

    let db = match Database::new(db_config.no_migrate()).await {
        Ok(db) => db,
        Err(e) => {
            return HealthCheck {
                name: "Database".to_string(),
                status: HealthStatus::Error,
                message: Some(format!("Connection failed: {:#}", e)),
            };
        }
    };

    let check = match db.migration_status().await {
        Ok(status) if status.needs_migration => HealthCheck {
            name: "Database".to_string(),
            status: HealthStatus::Warning,
            message: Some(format!(
                "Schema at v{}, v{} available (run `chat-api migrate`)",
                status.current_version, status.target_version
            )),
        },
        Ok(status) => HealthCheck {
            name: "Database".to_string(),
            status: HealthStatus::Ok,
            message: Some(format!(
                "Connected at {}, schema v{}",
                db.path().display(),
                status.current_version
            )),
        },
        Err(e) => HealthCheck {
            name: "Database".to_string(),
            status: HealthStatus::Error,
            message: Some(format!("Query failed: {:#}", e)),
        },
    };

    db.close().await;
    check
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DatabaseConfig;

    #[tokio::test]
    async fn test_doctor_missing_database_is_warning() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.database.path = dir.path().join("absent.db");

        let report = doctor(&config).await;
        assert_eq!(report.overall_status, HealthStatus::Warning);
        assert_eq!(report.checks.len(), 2);
        assert_eq!(report.checks[0].status, HealthStatus::Ok);
        assert!(!config.database.path.exists(), "doctor must not create the file");
    }

    #[tokio::test]
    async fn test_doctor_migrated_database_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.db");
        Database::new(DatabaseConfig::with_path(&path))
            .await
            .unwrap()
            .close()
            .await;

        let mut config = Config::default();
        config.database.path = path;

        let report = doctor(&config).await;
        assert_eq!(report.overall_status, HealthStatus::Ok);
    }

    #[tokio::test]
    async fn test_doctor_bad_config_is_error() {
        let mut config = Config::default();
        config.database.path = ":memory:".into();
        config.logging.level = "loud".to_string();

        let report = doctor(&config).await;
        assert_eq!(report.overall_status, HealthStatus::Error);
    }

    #[test]
    fn test_health_status_ordering() {
        assert!(HealthStatus::Error > HealthStatus::Warning);
        assert!(HealthStatus::Warning > HealthStatus::Ok);
        assert_eq!(
            serde_json::to_string(&HealthStatus::Warning).unwrap(),
            "\"warning\""
        );
    }
}
