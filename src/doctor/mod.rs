//! Doctor command for service diagnostics
//!
//! Checks configuration, the knowledge source and the generation backend.

use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{Config, Provider};
use crate::generation::GenerationBackend;
use crate::knowledge::KnowledgeBase;

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug, Clone)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

impl HealthCheck {
    fn new(name: &str, status: HealthStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
        }
    }
}

/// Where the knowledge base comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeSource {
    File(PathBuf),
    Builtin,
}

/// Collected results of a diagnostics run
#[derive(Debug, Clone)]
pub struct DoctorReport {
    pub checks: Vec<HealthCheck>,
}

impl DoctorReport {
    /// True unless some check failed; warnings are tolerated
    pub fn is_healthy(&self) -> bool {
        !self
            .checks
            .iter()
            .any(|check| matches!(check.status, HealthStatus::Fail(_)))
    }

    /// Print a colored summary to stdout
    pub fn print(&self) {
        println!("\n{}\n", "Mindbridge diagnostics".bold());
        for check in &self.checks {
            match &check.status {
                HealthStatus::Pass => println!("  {} {}", "✓".green(), check.name),
                HealthStatus::Warn(msg) => {
                    println!("  {} {}: {}", "!".yellow(), check.name, msg.yellow())
                }
                HealthStatus::Fail(msg) => {
                    println!("  {} {}: {}", "✗".red(), check.name, msg.red())
                }
            }
        }
        println!();
    }
}

/// Doctor diagnostics system
pub struct Doctor {
    config: Config,
    knowledge: KnowledgeSource,
    backend: Arc<dyn GenerationBackend>,
}

impl Doctor {
    pub fn new(config: Config, knowledge: KnowledgeSource, backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            config,
            knowledge,
            backend,
        }
    }

    /// Run all health checks
    pub async fn run_checks(&self) -> DoctorReport {
        let mut checks = vec![
            self.check_config(),
            self.check_knowledge(),
        ];
        if let Some(check) = self.check_api_key() {
            checks.push(check);
        }
        checks.push(self.check_backend().await);

        DoctorReport { checks }
    }

    fn check_config(&self) -> HealthCheck {
        match self.config.validate() {
            Ok(()) => HealthCheck::new("Configuration", HealthStatus::Pass),
            Err(e) => HealthCheck::new("Configuration", HealthStatus::Fail(e.to_string())),
        }
    }

    fn check_knowledge(&self) -> HealthCheck {
        let path = match &self.knowledge {
            KnowledgeSource::Builtin => {
                return HealthCheck::new("Knowledge Base", HealthStatus::Pass);
            }
            KnowledgeSource::File(path) => path,
        };

        // A broken source is not fatal for the service, so it only warns
        match KnowledgeBase::try_load(path) {
            Ok(base) if base.is_empty() => HealthCheck::new(
                "Knowledge Base",
                HealthStatus::Warn(format!("{} has no entries", path.display())),
            ),
            Ok(_) => HealthCheck::new("Knowledge Base", HealthStatus::Pass),
            Err(e) => HealthCheck::new(
                "Knowledge Base",
                HealthStatus::Warn(format!(
                    "{} unusable, queries will run without context: {}",
                    path.display(),
                    e
                )),
            ),
        }
    }

    fn check_api_key(&self) -> Option<HealthCheck> {
        if self.config.generation.provider != Provider::OpenAi {
            return None;
        }
        let env = &self.config.generation.api_key_env;
        let status = match std::env::var(env) {
            Ok(key) if !key.is_empty() => HealthStatus::Pass,
            _ => HealthStatus::Warn(format!("{} is not set", env)),
        };
        Some(HealthCheck::new("API Key", status))
    }

    async fn check_backend(&self) -> HealthCheck {
        let name = format!("Generation Backend ({})", self.backend.name());
        if self.backend.health_check().await {
            HealthCheck::new(&name, HealthStatus::Pass)
        } else {
            HealthCheck::new(
                &name,
                HealthStatus::Warn(format!(
                    "{} not reachable, replies will use the fallback text",
                    self.config.generation.effective_base_url()
                )),
            )
        }
    }
}
