use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use taskrank::config::Config;
use taskrank::core::task::Task;
use taskrank::payload::{AnalysisRequest, AnalysisResponse};
use taskrank::{rlog, rlog_error, Analysis, Error, PriorityEngine, Result, Strategy};

/// Exit status when the batch contains a dependency cycle.
const CYCLE_EXIT: u8 = 2;

/// taskrank - order tasks by priority while respecting their dependencies
#[derive(Parser, Debug)]
#[command(name = "taskrank")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    TASKRANK_DEBUG=1     Enable debug logging (alternative to --debug)")]
pub struct Cli {
    /// Enable debug logging (writes to ~/.taskrank/taskrank.log)
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Order a batch of tasks with a strategy
    Analyze {
        /// JSON file holding {"Tasks": [...], "analyseType": "..."} or a bare task array
        file: PathBuf,

        /// Strategy name (overrides the request's analyseType)
        #[arg(long, short = 's')]
        strategy: Option<String>,

        /// Score as of this date instead of today (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,

        /// Print the JSON response instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Show the top Smart Balance recommendations
    Suggest {
        file: PathBuf,

        /// How many tasks to show (default from config)
        #[arg(long, short = 'n')]
        limit: Option<usize>,

        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,

        #[arg(long)]
        json: bool,
    },

    /// List the available strategies
    Strategies,

    /// Show the configuration, or update it when any option is given
    Config {
        /// Strategy used when neither the command line nor the request names one
        #[arg(long)]
        default_strategy: Option<String>,

        /// Default number of tasks shown by `suggest`
        #[arg(long)]
        limit: Option<usize>,

        /// Fail on dependency ids that name no task in the batch
        #[arg(long)]
        strict: Option<bool>,
    },
}

fn parse_date(raw: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    taskrank::log::init(cli.debug);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            rlog_error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode> {
    let config = Config::load()?;

    match command {
        Command::Analyze {
            file,
            strategy,
            today,
            json,
        } => {
            let request = AnalysisRequest::load(&file)?;
            let name = strategy
                .or(request.analyse_type)
                .unwrap_or_else(|| config.default_strategy.clone());
            rlog!(
                "analyze file={} strategy={:?} tasks={}",
                file.display(),
                name,
                request.tasks.len()
            );

            let engine = engine(&config, today);
            rlog!("scoring as of {}", engine.today());
            let analysis = engine.analyse_named(request.tasks, &name)?;
            report(analysis, Some(Strategy::from_name(&name)), json)
        }
        Command::Suggest {
            file,
            limit,
            today,
            json,
        } => {
            let request = AnalysisRequest::load(&file)?;
            let limit = limit.unwrap_or(config.recommendation_limit);
            rlog!(
                "suggest file={} limit={} tasks={}",
                file.display(),
                limit,
                request.tasks.len()
            );

            let engine = engine(&config, today);
            rlog!("scoring as of {}", engine.today());
            let analysis = engine.recommend(request.tasks, limit)?;
            report(analysis, None, json)
        }
        Command::Strategies => {
            let default = config.strategy();
            for strategy in Strategy::ALL {
                let marker = if strategy == default { " (default)" } else { "" };
                println!(
                    "{:<16} {}{}",
                    strategy.name(),
                    strategy.description(),
                    marker
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Config {
            default_strategy,
            limit,
            strict,
        } => {
            let mut config = config;
            let changed = default_strategy.is_some() || limit.is_some() || strict.is_some();
            if let Some(name) = default_strategy {
                let strategy = Strategy::parse(&name).ok_or_else(|| {
                    Error::Validation(format!("unknown strategy {:?}", name))
                })?;
                config.default_strategy = strategy.name().to_string();
            }
            if let Some(limit) = limit {
                config.recommendation_limit = limit;
            }
            if let Some(strict) = strict {
                config.strict_dependencies = strict;
            }
            if changed {
                config.validate()?;
                config.save()?;
                rlog!("config updated");
            }

            println!("{:<21} {}", "config", Config::config_path()?.display());
            println!("{:<21} {}", "default_strategy", config.default_strategy);
            println!("{:<21} {}", "recommendation_limit", config.recommendation_limit);
            println!("{:<21} {}", "strict_dependencies", config.strict_dependencies);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn engine(config: &Config, today: Option<NaiveDate>) -> PriorityEngine {
    today
        .map(PriorityEngine::new)
        .unwrap_or_else(PriorityEngine::for_today)
        .strict_dependencies(config.strict_dependencies)
}

fn report(analysis: Analysis, strategy: Option<Strategy>, json: bool) -> Result<ExitCode> {
    let code = if analysis.is_cycle() {
        ExitCode::from(CYCLE_EXIT)
    } else {
        ExitCode::SUCCESS
    };

    if json {
        let response = AnalysisResponse::from(analysis);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(code);
    }

    match analysis {
        Analysis::Cycle(cycle) => eprintln!("{}", cycle),
        Analysis::Ordered(tasks) => {
            if let Some(strategy) = strategy {
                println!("{} ({})", strategy.name(), strategy.description());
            }
            if tasks.is_empty() {
                println!("No tasks");
            }
            for (rank, task) in tasks.iter().enumerate() {
                print_task(rank + 1, task);
            }
        }
    }
    Ok(code)
}

fn print_task(rank: usize, task: &Task) {
    let score = task
        .score
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("{:>3}. [{}] {}  score={}", rank, task.id, task.title, score);
    if let Some(remarks) = &task.remarks {
        println!("     {}", remarks);
    }
}
