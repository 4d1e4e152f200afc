//! Mindbridge - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;

use mindbridge::{
    bridge::RagBridge,
    cli::{init_logging, Args, Commands},
    config::Config,
    doctor::{Doctor, KnowledgeSource},
    generation::build_backend,
    knowledge::KnowledgeBase,
    rag::{ComposerSettings, RagService, ResponseComposer},
    server,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbosity());

    let mut config = Config::load(args.config.clone()).context("Failed to load configuration")?;
    args.apply_overrides(&mut config);

    match &args.command {
        Commands::Config { init } => run_config(&args, &config, *init),
        Commands::Doctor => run_doctor(&args, config).await,
        Commands::Remote { message, url } => run_remote(message, url).await,
        Commands::Ask { message } => {
            config.validate().context("Invalid configuration")?;
            let service = build_service(&args, &config)?;
            run_ask(&service, message).await
        }
        Commands::Serve { .. } => {
            config.validate().context("Invalid configuration")?;
            let service = build_service(&args, &config)?;
            server::serve(service, &config.bind_address()).await
        }
    }
}

fn knowledge_source(args: &Args, config: &Config) -> KnowledgeSource {
    if args.builtin_knowledge {
        KnowledgeSource::Builtin
    } else {
        KnowledgeSource::File(config.knowledge_path())
    }
}

/// Wire knowledge, backend and composer into a service
fn build_service(args: &Args, config: &Config) -> Result<RagService> {
    let knowledge = match knowledge_source(args, config) {
        KnowledgeSource::Builtin => KnowledgeBase::builtin(),
        KnowledgeSource::File(path) => KnowledgeBase::load(&path),
    };

    let backend = build_backend(&config.generation).context("Failed to build generation backend")?;
    let composer = ResponseComposer::new(backend, ComposerSettings::from(&config.generation));

    Ok(RagService::new(Arc::new(knowledge), composer))
}

async fn run_ask(service: &RagService, message: &str) -> Result<()> {
    let response = service.query(message).await?;
    if response.distress_detected {
        eprintln!(
            "{}",
            "Distress detected: please contact a crisis line or emergency services if you are in danger."
                .red()
                .bold()
        );
    }
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn run_remote(message: &str, url: &str) -> Result<()> {
    let bridge = RagBridge::new(url)?;
    let reply = bridge.query(message).await;
    if reply.fallback {
        eprintln!("{}", format!("Service at {} unavailable, answered locally", url).yellow());
    }
    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}

async fn run_doctor(args: &Args, config: Config) -> Result<()> {
    let backend = build_backend(&config.generation).context("Failed to build generation backend")?;
    let source = knowledge_source(args, &config);
    let doctor = Doctor::new(config, source, backend);

    let report = doctor.run_checks().await;
    report.print();

    std::process::exit(if report.is_healthy() { 0 } else { 1 });
}

fn run_config(args: &Args, config: &Config, init: bool) -> Result<()> {
    let path = args.config.clone().or_else(Config::default_path);

    if init {
        let path = path.context("Cannot determine config file location")?;
        config.save(&path).context("Failed to write configuration")?;
        println!("{} {}", "Wrote".green(), path.display());
        return Ok(());
    }

    if let Some(path) = path {
        println!("{} {}", "Config file:".bold(), path.display());
    }
    println!("{}", config.to_toml()?);
    Ok(())
}
