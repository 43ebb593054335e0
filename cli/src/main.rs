//! restyle CLI - randomized document styling tool

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use restyle::{
    BatchEvent, BatchRunner, DocumentStatus, FormatRegistry, LexiconClassifier, PartOfSpeech,
    RuleSet, StyleOptions, StyleRule, TokenClassifier,
};

#[derive(Parser)]
#[command(name = "restyle")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Apply randomized styling rules to headings and parts of speech", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Style documents and write <name>_styled copies
    Run {
        /// Input documents (.md, .markdown, .txt, .json)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "styled")]
        output: PathBuf,

        /// Rule, e.g. "bold 50% of heading" (repeatable)
        #[arg(short, long, value_name = "RULE")]
        rule: Vec<String>,

        /// JSON rule file
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Seed for reproducible output
        #[arg(long, env = "RESTYLE_SEED")]
        seed: Option<u64>,

        /// Maximum number of documents processed in parallel
        #[arg(short, long, env = "RESTYLE_JOBS")]
        jobs: Option<usize>,

        /// Per-paragraph classification timeout in seconds
        #[arg(long, value_name = "SECS")]
        classify_timeout: Option<f64>,

        /// Refuse paragraphs longer than this many characters
        #[arg(long, value_name = "CHARS")]
        max_paragraph_chars: Option<usize>,

        /// Write a JSON batch report
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Validate and describe a rule set
    Rules {
        /// Rule, e.g. "italic 20% of verb" (repeatable)
        #[arg(short, long, value_name = "RULE")]
        rule: Vec<String>,

        /// JSON rule file
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Save the combined rule set as JSON
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,
    },

    /// Show a document's text, one line per paragraph
    Preview {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show how the classifier tags a text
    Tag {
        /// Text to classify
        #[arg(value_name = "TEXT")]
        text: String,

        /// Output tokens as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run {
            files,
            output,
            rule,
            rules,
            seed,
            jobs,
            classify_timeout,
            max_paragraph_chars,
            report,
        }) => {
            let options = RunOptions {
                seed,
                jobs,
                classify_timeout,
                max_paragraph_chars,
            };
            match cmd_run(
                &files,
                &output,
                &rule,
                rules.as_deref(),
                options,
                report.as_deref(),
            ) {
                Ok(true) => Ok(()),
                Ok(false) => std::process::exit(2),
                Err(e) => Err(e),
            }
        }
        Some(Commands::Rules { rule, rules, save }) => {
            cmd_rules(&rule, rules.as_deref(), save.as_deref())
        }
        Some(Commands::Preview { input }) => cmd_preview(&input),
        Some(Commands::Tag { text, json }) => cmd_tag(&text, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!(
                "{}",
                "Usage: restyle run <FILE>... --rule \"bold 50% of heading\"".yellow()
            );
            println!("       restyle --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Styling flags of the `run` command.
struct RunOptions {
    seed: Option<u64>,
    jobs: Option<usize>,
    classify_timeout: Option<f64>,
    max_paragraph_chars: Option<usize>,
}

impl RunOptions {
    fn to_style_options(&self) -> Result<StyleOptions, Box<dyn std::error::Error>> {
        let mut options = StyleOptions::new();
        if let Some(seed) = self.seed {
            options = options.with_seed(seed);
        }
        if let Some(jobs) = self.jobs {
            options = options.with_max_jobs(jobs);
        }
        if let Some(secs) = self.classify_timeout {
            let timeout = Duration::try_from_secs_f64(secs)
                .map_err(|e| format!("Invalid classify timeout {}: {}", secs, e))?;
            options = options.with_classify_timeout(timeout);
        }
        if let Some(chars) = self.max_paragraph_chars {
            options = options.with_max_paragraph_chars(chars);
        }
        Ok(options)
    }
}

/// Combine a rule file (first) with inline rules (appended in order).
fn load_rules(
    inline: &[String],
    file: Option<&Path>,
) -> Result<RuleSet, Box<dyn std::error::Error>> {
    let mut rules = match file {
        Some(path) => {
            let rules = RuleSet::load(path)?;
            log::debug!("Loaded {} rules from {}", rules.len(), path.display());
            rules
        }
        None => RuleSet::new(),
    };

    for text in inline {
        rules.push(text.parse::<StyleRule>()?);
    }

    if rules.is_empty() {
        return Err("No rules given; use --rule or --rules".into());
    }
    Ok(rules)
}

fn cmd_run(
    files: &[PathBuf],
    output: &Path,
    inline_rules: &[String],
    rules_file: Option<&Path>,
    run_options: RunOptions,
    report_path: Option<&Path>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let rules = load_rules(inline_rules, rules_file)?;
    let options = run_options.to_style_options()?;

    println!(
        "{} {} documents with {} rules",
        "Styling".cyan().bold(),
        files.len(),
        rules.len()
    );
    for description in rules.descriptions() {
        println!("  {} {}", "•".dimmed(), description);
    }

    let runner =
        BatchRunner::new(Arc::new(LexiconClassifier::new()), output).with_options(options);
    let handle = runner.start(files.to_vec(), rules.snapshot())?;

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}")?
            .progress_chars("#>-"),
    );

    let mut finished = 0;
    let mut total = files.len();
    for event in handle.events().iter() {
        match event {
            BatchEvent::Started { total: count } => {
                total = count;
                pb.set_message(format!("0/{} documents", total));
            }
            BatchEvent::DocumentFinished { .. } => {
                finished += 1;
                pb.set_message(format!("{}/{} documents", finished, total));
            }
            BatchEvent::Progress(percent) => pb.set_position(u64::from(percent)),
            BatchEvent::Completed(_) => {}
        }
    }

    let report = handle.join()?;
    pb.finish_with_message("Done!");

    println!("\n{}", "Results:".green().bold());
    for outcome in &report.outcomes {
        let source = outcome.source.display();
        match &outcome.status {
            DocumentStatus::Styled { output, stats } => println!(
                "  {} {} -> {} ({} headings, {} tokens styled)",
                "✓".green(),
                source,
                output.display(),
                stats.headings_styled,
                stats.tokens_styled
            ),
            DocumentStatus::Failed { kind, message } => {
                println!("  {} {} [{}] {}", "✗".red(), source, kind, message)
            }
            DocumentStatus::Cancelled => println!("  {} {} cancelled", "-".yellow(), source),
        }
    }

    let summary = report.summary;
    println!(
        "\n{} {} styled, {} failed",
        "Done!".green().bold(),
        summary.succeeded,
        summary.failed
    );

    if let Some(path) = report_path {
        report.save(path)?;
        println!("{} {}", "Report saved to".green(), path.display());
    }

    Ok(summary.failed == 0)
}

fn cmd_rules(
    inline_rules: &[String],
    rules_file: Option<&Path>,
    save: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let rules = load_rules(inline_rules, rules_file)?;

    println!("{}", "Rules".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (i, description) in rules.descriptions().iter().enumerate() {
        println!("{:>3}. {}", i + 1, description);
    }

    if let Some(path) = save {
        rules.save(path)?;
        println!("{} {}", "Saved to".green(), path.display());
    }

    Ok(())
}

fn cmd_preview(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let registry = FormatRegistry::with_defaults();
    let doc = registry.load(input)?;

    for paragraph in &doc.paragraphs {
        match paragraph.heading_level() {
            Some(level) => println!(
                "{} {}",
                "#".repeat(usize::from(level)).cyan(),
                paragraph.plain_text().trim_start().bold()
            ),
            None => println!("{}", paragraph.plain_text()),
        }
    }

    Ok(())
}

fn cmd_tag(text: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let classifier = LexiconClassifier::new();
    let tokens = classifier.classify(text)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(());
    }

    for token in tokens.iter().filter(|t| t.category != PartOfSpeech::Space) {
        println!("{:<24} {}", token.text, token.category.as_str().cyan());
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "restyle".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Randomized document styling tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/restyle".dimmed());
    println!("License: MIT");
}
