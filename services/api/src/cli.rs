use crate::demo::{run_demo, DemoArgs};
use crate::infra::{parse_status, parse_status_filter, read_text, Stores};
use crate::server;
use clap::{Args, Parser, Subcommand};
use recruit_ai::config::{AppConfig, TelemetryConfig};
use recruit_ai::error::AppError;
use recruit_ai::settings::SettingsUpdate;
use recruit_ai::telemetry;
use recruit_ai::workflows::candidates::{
    Candidate, CandidateDraft, CandidateFilter, CandidateId, CandidateStatus, StatusFilter,
};
use recruit_ai::workflows::interviews::{
    InterviewAnalysisRequest, InterviewRequest, InterviewReview, InterviewType,
};
use recruit_ai::workflows::screening::{describe_cutoff, ScreeningOutcome, ScreeningRequest};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Recruitment Pipeline",
    about = "Track candidates, screen resumes, and schedule interviews from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Add, list, and move candidates through the pipeline
    Candidates {
        #[command(subcommand)]
        command: CandidatesCommand,
    },
    /// Show or change the screening settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
    /// Analyze a candidate's resume and record the verdict
    Screen(ScreenArgs),
    /// Schedule and list interviews
    Interviews {
        #[command(subcommand)]
        command: InterviewsCommand,
    },
    /// Run an end-to-end demo against in-memory storage
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum CandidatesCommand {
    /// Register a new candidate in the `new` stage
    Add(AddArgs),
    /// List candidates, optionally filtered, as a table or CSV
    List(ListArgs),
    /// Move a candidate to another pipeline stage
    Status {
        id: String,
        #[arg(value_parser = parse_status)]
        status: CandidateStatus,
    },
    /// Print one candidate as JSON
    Show { id: String },
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    /// Role applied for
    #[arg(long, alias = "role")]
    position: String,
    #[arg(long)]
    phone: Option<String>,
    /// Plain-text resume to attach
    #[arg(long)]
    resume_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Case-insensitive text matched against name, email, and position
    #[arg(long)]
    search: Option<String>,
    /// Stage name or `all`
    #[arg(long, value_parser = parse_status_filter)]
    status: Option<StatusFilter>,
    /// Write CSV to this path instead of printing a table (`-` for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Print the current settings with the API key hidden
    Show,
    /// Change one or more settings; unspecified fields keep their current value
    Set(SetArgs),
}

#[derive(Args, Debug)]
struct SetArgs {
    /// Minimum score for selection: 45 to 95 in steps of 5
    #[arg(long, allow_negative_numbers = true)]
    cutoff: Option<i64>,
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long)]
    auto_email: Option<bool>,
}

#[derive(Args, Debug)]
struct ScreenArgs {
    id: String,
    /// Resume text to analyze instead of the stored one
    #[arg(long)]
    resume_file: Option<PathBuf>,
    /// Custom requirement; repeat to build the list
    #[arg(long = "require")]
    requirements: Vec<String>,
    /// Write the analysis report as JSON into this directory
    #[arg(long)]
    export: Option<PathBuf>,
    /// Send the result e-mail regardless of the auto-email setting
    #[arg(long)]
    email: bool,
}

#[derive(Subcommand, Debug)]
enum InterviewsCommand {
    /// Book an interview slot
    Schedule(ScheduleArgs),
    /// List booked interviews
    List {
        /// Only interviews for this candidate e-mail
        #[arg(long)]
        email: Option<String>,
    },
    /// Score an interview transcript against the cutoff
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[arg(long)]
    name: String,
    /// Plain-text transcript, one `Speaker: text` turn per line
    #[arg(long)]
    transcript_file: PathBuf,
    /// Topic the answers should cover; repeat to build the list
    #[arg(long = "topic")]
    topics: Vec<String>,
}

#[derive(Args, Debug)]
struct ScheduleArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    /// YYYY-MM-DD
    #[arg(long)]
    date: String,
    /// HH:MM
    #[arg(long)]
    time: String,
    #[arg(long = "type", default_value = "video")]
    kind: InterviewType,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    interviewer: Option<String>,
    #[arg(long)]
    interviewer_email: Option<String>,
    #[arg(long)]
    position: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
        Command::Candidates { command } => candidates(&open_stores()?, command),
        Command::Settings { command } => settings(&open_stores()?, command),
        Command::Screen(args) => screen(&open_stores()?, args),
        Command::Interviews { command } => interviews(&open_stores()?, command),
    }
}

/// One-shot commands log warnings only, on stderr, unless `RUST_LOG` says otherwise.
fn open_stores() -> Result<Stores, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&TelemetryConfig {
        log_level: "warn".to_string(),
    })?;
    Stores::from_config(&config.storage)
}

fn candidates(stores: &Stores, command: CandidatesCommand) -> Result<(), AppError> {
    match command {
        CandidatesCommand::Add(args) => {
            let mut draft = CandidateDraft::new(args.name, args.email, args.position);
            if let Some(phone) = args.phone {
                draft = draft.with_phone(phone);
            }
            if let Some(path) = args.resume_file {
                draft = draft.with_resume_text(read_text(&path)?);
            }
            let candidate = stores.candidates.create(draft)?;
            println!("Added {} ({}) as {}", candidate.name, candidate.id, candidate.status);
        }
        CandidatesCommand::List(args) => {
            let filter = CandidateFilter {
                search_text: args.search,
                status: args.status.unwrap_or_default(),
            };
            match args.csv {
                Some(path) if path.as_os_str() == "-" => {
                    stores.candidates.export_csv(&filter, std::io::stdout().lock())?;
                }
                Some(path) => {
                    let file = std::fs::File::create(&path)?;
                    let rows = stores.candidates.export_csv(&filter, file)?;
                    println!("Wrote {rows} candidates to {}", path.display());
                }
                None => print_table(&stores.candidates.list(&filter)),
            }
        }
        CandidatesCommand::Status { id, status } => {
            let candidate = stores.candidates.update_status(&CandidateId(id), status)?;
            println!("{} is now {}", candidate.name, candidate.status);
        }
        CandidatesCommand::Show { id } => {
            let candidate = stores.candidates.get(&CandidateId(id))?;
            println!("{}", serde_json::to_string_pretty(&candidate)?);
        }
    }
    Ok(())
}

fn settings(stores: &Stores, command: SettingsCommand) -> Result<(), AppError> {
    let shown = match command {
        SettingsCommand::Show => stores.settings.load(),
        SettingsCommand::Set(args) => stores.settings.update(SettingsUpdate {
            api_key: args.api_key,
            cutoff_score: args.cutoff,
            auto_email: args.auto_email,
        })?,
    };

    println!(
        "cutoff score: {} ({} selectivity)",
        shown.cutoff_score,
        describe_cutoff(i32::from(shown.cutoff_score))
    );
    println!("auto e-mail:  {}", if shown.auto_email { "on" } else { "off" });
    println!(
        "api key:      {}",
        if shown.has_api_key() { "configured" } else { "not set" }
    );
    if let Some(updated_at) = shown.updated_at {
        println!("updated at:   {}", updated_at.to_rfc3339());
    }
    Ok(())
}

fn screen(stores: &Stores, args: ScreenArgs) -> Result<(), AppError> {
    let resume_text = args.resume_file.as_deref().map(read_text).transpose()?;
    let outcome = stores.screening.screen(
        &CandidateId(args.id),
        ScreeningRequest {
            resume_text,
            role_requirements: args.requirements,
            notify: args.email.then_some(true),
        },
    )?;
    print_outcome(&outcome);

    if let Some(dir) = args.export {
        let report = outcome.report();
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(report.file_name());
        std::fs::write(&path, report.to_json_pretty()?)?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}

fn interviews(stores: &Stores, command: InterviewsCommand) -> Result<(), AppError> {
    match command {
        InterviewsCommand::Schedule(args) => {
            let interview = stores.interviews.schedule(InterviewRequest {
                interview_type: args.kind,
                location: args.location,
                interviewer_name: args.interviewer,
                interviewer_email: args.interviewer_email,
                position: args.position,
                notes: args.notes,
                ..InterviewRequest::new(args.name, args.email, args.date, args.time)
            })?;
            println!(
                "Interview scheduled for {} on {} at {} ({})",
                interview.candidate_name,
                interview.interview_date,
                interview.interview_time,
                interview.interview_type
            );
        }
        InterviewsCommand::Analyze(args) => {
            let transcript = read_text(&args.transcript_file)?;
            let request =
                InterviewAnalysisRequest::new(args.name, transcript).with_topics(args.topics);
            print_review(&stores.reviewer.review(&request)?);
        }
        InterviewsCommand::List { email } => {
            let booked = stores.interviews.list(email.as_deref());
            if booked.is_empty() {
                println!("No interviews scheduled.");
            }
            for interview in booked {
                println!(
                    "{} {}  {:<24} {:<10} {}",
                    interview.interview_date,
                    interview.interview_time,
                    interview.candidate_name,
                    interview.interview_type,
                    interview.interviewer_name.as_deref().unwrap_or("-")
                );
            }
        }
    }
    Ok(())
}

pub(crate) fn print_table(candidates: &[Candidate]) {
    if candidates.is_empty() {
        println!("No candidates match.");
        return;
    }
    for candidate in candidates {
        println!(
            "{:<36}  {:<24} {:<22} {:<10} {}",
            candidate.id,
            candidate.name,
            candidate.position,
            candidate.status,
            candidate
                .score
                .map(|score| score.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }
}

pub(crate) fn print_outcome(outcome: &ScreeningOutcome) {
    let analysis = &outcome.analysis;
    println!(
        "{}: {} / 100 ({}), cutoff {} -> {}",
        outcome.candidate.name,
        analysis.overall_score,
        outcome.category.label(),
        analysis.cutoff_score,
        if analysis.selected { "shortlisted" } else { "not selected" }
    );
    for strength in &analysis.strengths {
        println!("  + {strength}");
    }
    for gap in &analysis.improvement_areas {
        println!("  - {gap}");
    }
    if let Some(email) = &outcome.email {
        println!("  e-mail: {}", email.message);
    }
}

pub(crate) fn print_review(review: &InterviewReview) {
    let analysis = &review.analysis;
    println!(
        "Interview: {} / 100 ({}), cutoff {} -> {}",
        analysis.overall_score,
        review.verdict.category.label(),
        review.verdict.cutoff,
        if review.verdict.selected { "advance" } else { "do not advance" }
    );
    println!(
        "  technical {}  communication {}  confidence {:.0}%",
        analysis.technical_score,
        analysis.communication_score,
        analysis.confidence * 100.0
    );
    for insight in &analysis.key_insights {
        println!("  * {insight}");
    }
    println!("  {}", analysis.summary);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_list_filters() {
        let cli = Cli::try_parse_from([
            "recruit-ai-api",
            "candidates",
            "list",
            "--search",
            "ada",
            "--status",
            "screening",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Candidates {
                command: CandidatesCommand::List(args),
            }) => {
                assert_eq!(args.search.as_deref(), Some("ada"));
                assert_eq!(args.status, Some(StatusFilter::Only(CandidateStatus::Screening)));
                assert!(args.csv.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_interview_type_and_repeated_requirements() {
        let cli = Cli::try_parse_from([
            "recruit-ai-api",
            "interviews",
            "schedule",
            "--name",
            "Ada",
            "--email",
            "ada@x.com",
            "--date",
            "2025-03-14",
            "--time",
            "10:00",
            "--type",
            "in-person",
        ])
        .expect("parses");
        assert!(matches!(
            cli.command,
            Some(Command::Interviews {
                command: InterviewsCommand::Schedule(ScheduleArgs {
                    kind: InterviewType::InPerson,
                    ..
                })
            })
        ));

        let cli = Cli::try_parse_from([
            "recruit-ai-api",
            "screen",
            "cand-1",
            "--require",
            "Rust",
            "--require",
            "Kafka",
            "--email",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Screen(args)) => {
                assert_eq!(args.requirements, ["Rust", "Kafka"]);
                assert!(args.email);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_transcript_analysis_and_wide_cutoff() {
        let cli = Cli::try_parse_from([
            "recruit-ai-api",
            "interviews",
            "analyze",
            "--name",
            "Ada",
            "--transcript-file",
            "call.txt",
            "--topic",
            "Rust",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Interviews {
                command: InterviewsCommand::Analyze(args),
            }) => {
                assert_eq!(args.transcript_file, PathBuf::from("call.txt"));
                assert_eq!(args.topics, ["Rust"]);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["recruit-ai-api", "settings", "set", "--cutoff", "300"])
            .expect("range is checked by the settings store");
        assert!(matches!(
            cli.command,
            Some(Command::Settings {
                command: SettingsCommand::Set(SetArgs {
                    cutoff: Some(300),
                    ..
                })
            })
        ));
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(Cli::try_parse_from(["recruit-ai-api", "candidates", "status", "c1", "archived"]).is_err());
    }
}
