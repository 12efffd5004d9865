use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use strategist::{
    load_outcome_file, load_request_file, render_summary, write_json, FounderStage, Stage,
    StageName, Strategist, StrategistConfig, StrategyRequest,
};

#[derive(Parser)]
#[command(name = "strategist")]
#[command(author, version, about = "Startup strategy generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the research stages and synthesize a strategy
    Generate {
        #[command(flatten)]
        request: RequestArgs,

        /// Output file for the strategy (JSON)
        #[arg(short, long, default_value = "startup_strategy.json")]
        output: PathBuf,

        /// Synthesis template file
        #[arg(long, default_value = "strategist_master_prompt.txt")]
        template: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the summary of a saved strategy
    Show {
        /// Strategy file written by `generate`
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the eight stage prompts for a request without calling any model
    Prompts {
        #[command(flatten)]
        request: RequestArgs,
    },
}

#[derive(Args)]
struct RequestArgs {
    /// Request file (JSON); replaces the individual flags
    #[arg(short, long, conflicts_with_all = ["niche", "stage", "geo", "founder_profile", "constraints", "goals"])]
    input: Option<PathBuf>,

    /// The business niche or idea
    #[arg(long)]
    niche: Option<String>,

    /// idea | discovery | MVP | PMF | scale
    #[arg(long)]
    stage: Option<String>,

    /// Target geography
    #[arg(long)]
    geo: Option<String>,

    /// Skills, network, unfair advantages
    #[arg(long)]
    founder_profile: Option<String>,

    /// Budget, timeline, compliance, hiring limits
    #[arg(long)]
    constraints: Option<String>,

    /// 12-week goals
    #[arg(long)]
    goals: Option<String>,
}

impl RequestArgs {
    fn into_request(self) -> Result<StrategyRequest> {
        if let Some(path) = self.input {
            return load_request_file(&path).context("Failed to load request");
        }

        let stage: FounderStage = match self.stage {
            Some(stage) => stage.parse()?,
            None => anyhow::bail!("--stage is required (idea | discovery | MVP | PMF | scale)"),
        };
        let request = StrategyRequest::new(
            self.niche.unwrap_or_default(),
            stage,
            self.geo.unwrap_or_default(),
            self.founder_profile.unwrap_or_default(),
            self.constraints.unwrap_or_default(),
            self.goals.unwrap_or_default(),
        )?;
        Ok(request)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            request,
            output,
            template,
            verbose,
        } => {
            setup_logging(verbose);
            generate(request.into_request()?, output, template).await
        }
        Commands::Show { input } => {
            setup_logging(false);
            let outcome = load_outcome_file(&input)?;
            print!("{}", render_summary(&outcome));
            Ok(())
        }
        Commands::Prompts { request } => {
            setup_logging(false);
            print_prompts(&request.into_request()?)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn generate(request: StrategyRequest, output: PathBuf, template: PathBuf) -> Result<()> {
    let config = StrategistConfig {
        template_path: template,
        ..Default::default()
    };
    let strategist = Strategist::from_env(config)?;

    let outcome = strategist.generate(&request).await;
    print!("{}", render_summary(&outcome));

    write_json(&outcome, &output)?;
    info!("Strategy saved to {:?}", output);

    if let Some(error) = outcome.error() {
        anyhow::bail!("Strategy generation failed: {}", error.error);
    }
    Ok(())
}

fn print_prompts(request: &StrategyRequest) -> Result<()> {
    for name in StageName::ALL {
        let stage = Stage::for_name(name);
        println!("## {} ({:?})", name, stage.default_provider);
        println!("{}", stage.render_prompt(request)?);
    }
    Ok(())
}
