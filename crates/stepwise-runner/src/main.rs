use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use stepwise_core::{render_mermaid, Analyzer, OpenAiAnalyzer};
use stepwise_types::{Analysis, AnalysisData, SuccessEnvelope};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_PROBLEM: &str = "Build a machine learning model for customer churn prediction";

/// Output style for the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Steps followed by the Mermaid diagram
    Text,
    /// The same success envelope the HTTP API returns
    Json,
}

/// Break a problem into dependent steps and print them as a Mermaid flowchart.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Problem to analyze
    #[arg(default_value = DEFAULT_PROBLEM)]
    problem: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let analyzer = OpenAiAnalyzer::from_env().context("Failed to configure analyzer")?;
    info!("Analyzing problem with model {}", analyzer.config().model);

    let analysis = analyzer
        .analyze(&cli.problem)
        .await
        .context("Analysis failed")?;
    let diagram = render_mermaid(&analysis.steps);

    match cli.format {
        OutputFormat::Text => print_text(&analysis, &diagram),
        OutputFormat::Json => {
            let envelope = SuccessEnvelope::new(AnalysisData::new(analysis, diagram));
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
    }

    Ok(())
}

fn print_text(analysis: &Analysis, diagram: &str) {
    println!("Summary: {}", analysis.summary);
    println!("\nSteps:");
    for (index, step) in analysis.steps.iter().enumerate() {
        println!("  {}. [{}] {}", index + 1, step.id, step.title);
        println!("     {}", step.description);
        if !step.dependencies.is_empty() {
            println!("     depends on: {}", step.dependencies.join(", "));
        }
    }
    println!("\nMermaid:\n{diagram}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["stepwise-runner"]);
        assert_eq!(cli.problem, DEFAULT_PROBLEM);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_json_format_and_problem() {
        let cli = Cli::parse_from(["stepwise-runner", "Plan a move", "--format", "json"]);
        assert_eq!(cli.problem, "Plan a move");
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
