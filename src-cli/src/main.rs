use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rqa_core::config::{self, RenderConfig};
use rqa_core::error::AppError;
use rqa_core::eval::{Experiment, Scorecard};
use rqa_core::models::{ChatAppResponse, FeedbackResponse};
use rqa_core::stream::replay_ndjson;
use rqa_render::{
    compose_followup_email, parse_answer_to_html, render_feedback, source_entries, strip_citations,
    ContentRouteResolver, SourceEntry,
};
use serde::Serialize;

mod cli;
use cli::{Cli, Commands};

#[derive(Debug, Serialize)]
struct FeedbackOutput<'a> {
    id: &'a str,
    feedback: &'a str,
    good: bool,
    question: &'a str,
    comment: &'a str,
    html: String,
    citations: Vec<String>,
}

#[derive(Debug, Serialize)]
struct RenderOutput<'a> {
    html: &'a str,
    citations: &'a [String],
    sources: Vec<SourceEntry>,
}

fn read_all(path: Option<&PathBuf>) -> Result<String, AppError> {
    match path {
        Some(p) => fs::read_to_string(p)
            .map_err(|e| AppError::io("Failed to read input file", &p.display().to_string(), &e)),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| AppError::io("Failed to read stdin", "-", &e))?;
            Ok(buf)
        }
    }
}

fn write_out(s: &str) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(s.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| AppError::io("Failed to write output", "-", &e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string(value).map_err(|e| {
        AppError::new("OUTPUT_SERIALIZE_FAILED", "Failed to serialize output")
            .with_details(e.to_string())
    })
}

fn load_config(explicit: Option<&PathBuf>) -> Result<RenderConfig, AppError> {
    let cwd = std::env::current_dir()
        .map_err(|e| AppError::io("Failed to resolve working directory", ".", &e))?;
    let (cfg, source) = config::load(explicit.map(|p| p.as_path()), &cwd)?;
    match source {
        Some(p) => log::debug!("using config {}", p.display()),
        None => log::debug!("using built-in config"),
    }
    Ok(cfg)
}

fn run(cli: Cli) -> Result<(), AppError> {
    let cfg = load_config(cli.config.as_ref())?;
    let delims = cfg.delimiters;

    match cli.command {
        Commands::Render {
            file,
            streaming,
            json,
            response,
        } => {
            let input = read_all(file.as_ref())?;
            let text = if response {
                ChatAppResponse::from_json(&input)?.answer_text()?.to_string()
            } else {
                input
            };
            let result = parse_answer_to_html(&text, streaming, delims);
            if json {
                let resolver = ContentRouteResolver::new(&cfg.content_base);
                let out = RenderOutput {
                    html: &result.html,
                    citations: &result.citations,
                    sources: source_entries(&result, &resolver),
                };
                write_out(&format!("{}\n", to_json(&out)?))
            } else {
                write_out(&format!("{}\n", result.html))
            }
        }
        Commands::Strip { file } => {
            let text = read_all(file.as_ref())?;
            write_out(&strip_citations(&text, delims))
        }
        Commands::Replay { file } => {
            let body = read_all(file.as_ref())?;
            let mut frames: Vec<String> = Vec::new();
            let stream = replay_ndjson(&body, |s| {
                frames.push(parse_answer_to_html(s.text(), s.is_streaming(), delims).html);
            })?;
            frames.push(parse_answer_to_html(stream.text(), stream.is_streaming(), delims).html);

            let mut out = String::new();
            for frame in &frames {
                out.push_str(&to_json(frame)?);
                out.push('\n');
            }
            write_out(&out)
        }
        Commands::Email { question, file } => {
            let text = read_all(file.as_ref())?;
            let mail = compose_followup_email(&question, &text, &cfg.email, delims);
            write_out(&format!("{}\n", mail.mailto))
        }
        Commands::Feedback { file } => {
            let raw = read_all(file.as_ref())?;
            let list = FeedbackResponse::from_json(&raw)?;
            let mut out = String::new();
            for entry in &list.feedbacks {
                let rendered = render_feedback(entry, delims)?;
                out.push_str(&to_json(&FeedbackOutput {
                    id: &entry.id,
                    feedback: &entry.feedback,
                    good: entry.is_good(),
                    question: &entry.question,
                    comment: &entry.comment,
                    html: rendered.html,
                    citations: rendered.citations,
                })?);
                out.push('\n');
            }
            write_out(&out)
        }
        Commands::Eval { file, name } => {
            let raw = read_all(file.as_ref())?;
            let experiment = Experiment::from_json(&raw)?;
            let mut out = Scorecard::from_summary(name, &experiment.summary).to_markdown();
            let flagged = experiment.flagged(cfg.low_score_threshold);
            out.push_str(&format!(
                "\nSamples needing attention: {}/{}\n",
                flagged.len(),
                experiment.eval_results.len()
            ));
            for sample in flagged {
                out.push_str(&format!(
                    "- {} (groundedness={}, relevance={}, coherence={})\n",
                    sample.question,
                    sample.groundedness_score,
                    sample.relevance_score,
                    sample.coherence_score
                ));
            }
            write_out(&out)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
