use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

use regroup::config::Config;
use regroup::notify::HttpDispatcher;
use regroup::roster::Roster;
use regroup::verification::HttpVerifier;
use regroup::Selection;

const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_INPUT: i32 = 5;

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SelectionArgs {
    /// Select students by id (repeatable)
    #[arg(long = "id", value_name = "ID")]
    ids: Vec<String>,

    /// Select every student currently in a section (repeatable)
    #[arg(long = "section", value_name = "LABEL")]
    sections: Vec<String>,

    /// Select the whole roster
    #[arg(long)]
    all: bool,
}

impl SelectionArgs {
    fn to_selection(&self) -> Selection {
        if self.all {
            Selection::All
        } else if !self.ids.is_empty() {
            Selection::Ids(self.ids.clone())
        } else {
            Selection::Sections(self.sections.clone())
        }
    }
}

#[derive(Args, Debug)]
struct AllocateArgs {
    /// Roster CSV (Name, CGPA, PracticeCount, Email, optional Section/Id)
    input: PathBuf,

    /// Number of sections. allocate falls back to config, then to the roster's
    /// own count; reevaluate keeps the roster's own count
    #[arg(short, long, allow_hyphen_values = true)]
    sections: Option<i64>,

    /// Write the allocated roster as CSV to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print CSV to stdout instead of the table
    #[arg(long)]
    csv: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score the roster and allocate it into balanced sections
    Allocate(AllocateArgs),
    /// Rescore and reallocate an allocated roster after verification
    /// corrections, keeping its section count unless -s is given
    Reevaluate(AllocateArgs),
    /// Re-verify practice counts for selected students (no rescoring)
    Verify {
        input: PathBuf,

        #[command(flatten)]
        select: SelectionArgs,

        /// Write the corrected roster here (defaults to CSV on stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Email selected students their section details
    Notify {
        input: PathBuf,

        #[command(flatten)]
        select: SelectionArgs,

        /// Message template file (placeholders: {cgpa}, {current_section}, ...)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Print rendered messages instead of sending
        #[arg(long)]
        dry_run: bool,
    },
    /// Show total and per-section counts
    Summary { input: PathBuf },
    /// Write a config file
    Init {
        /// Skip the questions and write defaults
        #[arg(long)]
        defaults: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "regroup")]
#[command(about = "Rebalance student sections by weighted CGPA and practice score", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/regroup/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "regroup=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn load_roster_or_exit(path: &Path, verbose: bool) -> Roster {
    match regroup::roster::read_roster(path) {
        Ok(roster) => {
            if verbose {
                eprintln!("Loaded {} students from {}", roster.len(), path.display());
            }
            roster
        }
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}

fn write_roster_or_exit(roster: &Roster, output: Option<&Path>) {
    let result = match output {
        Some(path) => regroup::roster::export_roster(path, roster),
        None => regroup::roster::write_csv(roster, std::io::stdout().lock()),
    };
    if let Err(e) = result {
        eprintln!("Export error: {:#}", e);
        std::process::exit(EXIT_INPUT);
    }
}

fn run_allocate(args: AllocateArgs, config: &Config, verbose: bool, reevaluating: bool) {
    let start_time = Instant::now();
    let roster = load_roster_or_exit(&args.input, verbose);
    let scoring = config.effective_scoring();

    let result = if reevaluating {
        regroup::reevaluate_allocated(&roster, &scoring, args.sections)
    } else {
        let section_count = args
            .sections
            .or(config.sections)
            .unwrap_or_else(|| regroup::pipeline::inferred_section_count(&roster));
        regroup::reevaluate(&roster, &scoring, section_count)
    };

    let (allocated, allocation) = match result {
        Ok(result) => result,
        Err(e @ regroup::Error::Unallocated) => {
            eprintln!("{}: {}", args.input.display(), e);
            std::process::exit(EXIT_INPUT);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if verbose {
        eprintln!("{}", regroup::output::format_allocation(&allocation));
    }

    if args.csv {
        write_roster_or_exit(&allocated, None);
    } else {
        let use_colors = regroup::output::should_use_colors();
        if verbose {
            for student in &allocated {
                let breakdown = regroup::scoring::explain(student, &scoring);
                println!(
                    "{}",
                    regroup::output::format_student_detail(student, &breakdown, use_colors)
                );
                println!();
            }
        } else {
            println!("{}", regroup::output::format_roster_table(&allocated, use_colors));
        }
        println!();
        println!(
            "{}",
            regroup::output::format_summary(&regroup::summarize(&allocated), use_colors)
        );
    }

    if let Some(ref path) = args.output {
        write_roster_or_exit(&allocated, Some(path));
        if verbose {
            eprintln!("Wrote {}", path.display());
        }
    }

    if verbose {
        eprintln!("Total: {} students in {:?}", allocated.len(), start_time.elapsed());
    }
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+); already
    // installed is fine
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { defaults, force } = cli.command {
        if let Err(e) = regroup::config::run_init_wizard(config_path.as_deref(), defaults, force) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match regroup::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = regroup::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    match cli.command {
        Commands::Allocate(args) => run_allocate(args, &config, cli.verbose, false),
        Commands::Reevaluate(args) => run_allocate(args, &config, cli.verbose, true),
        Commands::Verify {
            input,
            select,
            output,
        } => {
            let roster = load_roster_or_exit(&input, cli.verbose);
            let verifier = HttpVerifier::new(config.verify_endpoint());
            // Validated above
            let timeout = config.verify_timeout().unwrap_or_default();

            if cli.verbose {
                eprintln!("Verifying against {}", verifier.endpoint());
            }

            let selection = select.to_selection();
            match regroup::verify_selected(&verifier, &roster, &selection, timeout).await {
                Ok((updated, corrected)) => {
                    let checked = updated
                        .iter()
                        .filter(|s| selection.matches(s) && !s.id.is_empty());
                    // Report goes to stdout only when stdout is not carrying the CSV
                    if output.is_some() {
                        let use_colors = regroup::output::should_use_colors();
                        println!("{}", regroup::output::format_verification(checked, use_colors));
                    } else {
                        eprintln!("{}", regroup::output::format_verification(checked, false));
                    }
                    eprintln!(
                        "{} practice count(s) corrected. Run `regroup reevaluate` to rescore.",
                        corrected
                    );
                    write_roster_or_exit(&updated, output.as_deref());
                }
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_NETWORK);
                }
            }
        }
        Commands::Notify {
            input,
            select,
            template,
            dry_run,
        } => {
            let roster = load_roster_or_exit(&input, cli.verbose);
            let selection = select.to_selection();

            let template_text = match template {
                Some(path) => match std::fs::read_to_string(&path) {
                    Ok(text) => text,
                    Err(e) => {
                        eprintln!("Failed to read template {}: {}", path.display(), e);
                        std::process::exit(EXIT_INPUT);
                    }
                },
                None => config.dispatch_template().to_string(),
            };
            let subject = config.dispatch_subject();

            if dry_run {
                let messages = regroup::notify::compose(
                    roster.iter().filter(|s| selection.matches(s)),
                    &template_text,
                    subject,
                );
                for message in &messages {
                    println!("To: {}\nSubject: {}\n\n{}\n", message.to, message.subject, message.body);
                }
                eprintln!("{} message(s) rendered (dry run)", messages.len());
            } else {
                let dispatcher = HttpDispatcher::new(config.dispatch_endpoint());
                let timeout = config.dispatch_timeout().unwrap_or_default();
                match regroup::dispatch_selected(
                    &dispatcher,
                    &roster,
                    &selection,
                    &template_text,
                    subject,
                    timeout,
                )
                .await
                {
                    Ok(sent) => println!("Sent {} message(s).", sent),
                    Err(e) => {
                        eprintln!("{}", e);
                        std::process::exit(EXIT_NETWORK);
                    }
                }
            }
        }
        Commands::Summary { input } => {
            let roster = load_roster_or_exit(&input, cli.verbose);
            let use_colors = regroup::output::should_use_colors();
            println!(
                "{}",
                regroup::output::format_summary(&regroup::summarize(&roster), use_colors)
            );
        }
        Commands::Init { .. } => unreachable!("handled before config load"),
    }

    std::process::exit(EXIT_SUCCESS);
}
