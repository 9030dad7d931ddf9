//! CLI entrypoint for Copilot Research
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use research_application::{
    PlanPublisher, ResearchConfig, RunResearchInput, RunResearchUseCase, RunResult,
};
use research_domain::Query;
use research_infrastructure::{
    ConfigLoader, JsonlRunLogger, MarkdownPlanPublisher, OpenAiCompatGateway,
    build_agent_registry,
};
use research_presentation::{
    Cli, ConsoleFormatter, OutputFormat, ProgressReporter, ResearchRepl,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting Copilot Research");

    if cli.show_config {
        print_config_sources();
        return Ok(());
    }

    // Load and validate configuration
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?
    };
    file_config
        .validate()
        .context("invalid configuration")?;

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiCompatGateway::from_config(&file_config.gateway));
    // Shared client for the retrieval agents; its request timeout matches
    // the per-agent deadline so adapters respect it natively.
    let http_client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(
            file_config.run.agent_timeout_seconds,
        ))
        .build()
        .context("failed to build HTTP client")?;
    let registry = Arc::new(
        build_agent_registry(&file_config, &http_client)
            .context("failed to build agent registry")?,
    );
    let publisher: Arc<dyn PlanPublisher> =
        Arc::new(MarkdownPlanPublisher::new(&file_config.publish.out_dir));

    let research_config = ResearchConfig::new(file_config.run.to_params()).with_plan(cli.plan);

    let mut use_case = RunResearchUseCase::new(gateway, registry, research_config);
    if let Some(run_log) = &file_config.logging.run_log {
        use_case = use_case.with_logger(Arc::new(JsonlRunLogger::new(run_log)));
    }

    // Chat mode
    if cli.chat {
        let mut repl = ResearchRepl::new(use_case)
            .with_progress(!cli.quiet)
            .with_publisher(Arc::clone(&publisher));
        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };
    let query = Query::try_new(question)?;

    let mut input = RunResearchInput::new(query, Default::default());
    if cli.plan {
        input = input.with_plan();
    }

    // Execute with or without progress reporting
    let output = if cli.quiet {
        use_case.execute(input).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    };

    match output.result {
        RunResult::NeedsClarification(request) => {
            println!("{}", request.message);
            println!("(re-run with a more specific question, or use --chat to answer follow-ups)");
        }
        RunResult::Answered { response, plan } => {
            let formatted = match cli.output {
                OutputFormat::Full => ConsoleFormatter::format(&response),
                OutputFormat::Answer => ConsoleFormatter::format_answer_only(&response),
                OutputFormat::Json => ConsoleFormatter::format_json(&response),
            };
            println!("{}", formatted);

            if let Some(plan_result) = plan {
                let plan = plan_result.context("study plan stage failed")?;
                if !matches!(cli.output, OutputFormat::Json) {
                    println!("{}", ConsoleFormatter::format_plan(&plan));
                }
                let published = publisher.publish(&plan).await?;
                println!("Plan published to {}", published.location);
            }
        }
    }

    Ok(())
}

fn print_config_sources() {
    println!("Configuration sources (in priority order):");

    if let Some(path) = ConfigLoader::project_config_path() {
        println!("  [FOUND] Project: {}", path.display());
    } else {
        println!("  [     ] Project: ./research.toml or ./.research.toml");
    }

    if let Some(path) = ConfigLoader::global_config_path() {
        if path.exists() {
            println!("  [FOUND] Global:  {}", path.display());
        } else {
            println!("  [     ] Global:  {}", path.display());
        }
    }

    println!("  [     ] Default: built-in defaults");
}
