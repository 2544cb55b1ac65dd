use crate::cli::{print_outcome, print_review, print_table};
use crate::infra::Stores;
use chrono::{Duration, Local};
use clap::Args;
use recruit_ai::error::AppError;
use recruit_ai::settings::{Settings, DEFAULT_CUTOFF_SCORE};
use recruit_ai::storage::MemoryStore;
use recruit_ai::workflows::candidates::{CandidateDraft, CandidateFilter, CandidateStatus};
use recruit_ai::workflows::interviews::{
    InterviewAnalysisRequest, InterviewRequest, InterviewType,
};
use recruit_ai::workflows::screening::{describe_cutoff, ScreeningOutcome, ScreeningRequest};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Cutoff score for the demo run (45 to 95 in steps of 5).
    #[arg(long)]
    pub(crate) cutoff: Option<u8>,
    /// Log the shortlisted / rejected e-mails for every screened candidate.
    #[arg(long)]
    pub(crate) auto_email: bool,
    /// Write each analysis report as JSON into this directory.
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
}

struct DemoCandidate {
    name: &'static str,
    email: &'static str,
    position: &'static str,
    resume: &'static str,
}

const DEMO_CANDIDATES: [DemoCandidate; 3] = [
    DemoCandidate {
        name: "Priya Raman",
        email: "priya.raman@example.com",
        position: "Data Engineer",
        resume: "Data engineer building ETL pipelines in Python and SQL. Python tooling for \
                 Airflow DAGs, SQL models in DBT, Kafka ingestion into Snowflake and BigQuery. \
                 Apache Spark jobs on AWS Glue; Spark tuning; Kafka consumers; Airflow on GCP. \
                 Data warehousing on Redshift and Snowflake, DBT tests, ETL pipelines monitoring.",
    },
    DemoCandidate {
        name: "Marcus Chen",
        email: "marcus.chen@example.com",
        position: "DevOps Engineer",
        resume: "Ran Kubernetes clusters with Helm and Terraform on AWS. Docker images, \
                 Jenkins CI/CD, Prometheus alerts and Grafana dashboards. Kubernetes upgrades.",
    },
    DemoCandidate {
        name: "Lena Novak",
        email: "lena.novak@example.com",
        position: "Frontend Engineer",
        resume: "Marketing website maintenance with HTML5 and a little JavaScript.",
    },
];

const DEMO_TRANSCRIPT: &str = "\
Interviewer: Walk me through your current pipeline work.
Candidate: I own the Airflow DAGs that load Kafka topics into Snowflake, plus the DBT models on top.
Interviewer: How do you keep a backfill from double counting?
Candidate: I think we basically rely on merge keys in DBT and idempotent partitions in Spark.
Interviewer: Tell me about a time a pipeline failed in production.
Candidate: A schema change broke ingestion, so I added contract tests and we have not had a repeat since.
Interviewer: Do you have any questions for us?
Candidate: How large is the data platform team today?";

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        cutoff,
        auto_email,
        export,
    } = args;

    let backend = Arc::new(MemoryStore::new());
    let stores = Stores::open(backend.clone());

    let settings = stores.settings.save(Settings {
        cutoff_score: cutoff.unwrap_or(DEFAULT_CUTOFF_SCORE),
        auto_email,
        ..Settings::default()
    })?;
    println!("Recruitment pipeline demo");
    println!(
        "Cutoff {} ({} selectivity), auto e-mail {}",
        settings.cutoff_score,
        describe_cutoff(i32::from(settings.cutoff_score)),
        if settings.auto_email { "on" } else { "off" }
    );

    println!("\nIntake");
    let mut created = Vec::new();
    for demo in &DEMO_CANDIDATES {
        let candidate = stores.candidates.create(
            CandidateDraft::new(demo.name, demo.email, demo.position).with_resume_text(demo.resume),
        )?;
        println!("- {} applied for {}", candidate.name, candidate.position);
        created.push(candidate);
    }

    println!("\nScreening");
    let mut outcomes: Vec<ScreeningOutcome> = Vec::new();
    for candidate in &created {
        let outcome = stores
            .screening
            .screen(&candidate.id, ScreeningRequest::default())?;
        print_outcome(&outcome);
        if let Some(dir) = &export {
            let report = outcome.report();
            std::fs::create_dir_all(dir)?;
            std::fs::write(dir.join(report.file_name()), report.to_json_pretty()?)?;
        }
        outcomes.push(outcome);
    }

    let top = outcomes
        .iter()
        .filter(|outcome| outcome.analysis.selected)
        .max_by_key(|outcome| outcome.analysis.overall_score);
    if let Some(outcome) = top {
        let candidate = stores
            .candidates
            .update_status(&outcome.candidate.id, CandidateStatus::Interview)?;
        let day = (Local::now().date_naive() + Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();
        let interview = stores.interviews.schedule(InterviewRequest {
            interview_type: InterviewType::Video,
            interviewer_name: Some("Hiring Manager".to_string()),
            position: Some(candidate.position.clone()),
            ..InterviewRequest::new(&candidate.name, &candidate.email, day, "10:00")
        })?;
        println!(
            "\nInterview booked for {} on {} at {}",
            interview.candidate_name, interview.interview_date, interview.interview_time
        );

        let review = stores.reviewer.review(
            &InterviewAnalysisRequest::new(&candidate.name, DEMO_TRANSCRIPT)
                .with_topics(["Airflow", "Kafka", "DBT", "Spark"]),
        )?;
        print_review(&review);
    } else {
        println!("\nNobody cleared the cutoff; no interviews booked.");
    }

    let dashboard = stores.dashboard();
    let summary = &dashboard.pipeline;
    println!(
        "\nPipeline ({} candidates, average score {}, {} interviews scheduled)",
        summary.total,
        summary
            .average_score
            .map(|score| score.to_string())
            .unwrap_or_else(|| "-".to_string()),
        dashboard.interviews_scheduled
    );
    for stage in summary.stages.iter().filter(|stage| stage.count > 0) {
        println!("- {:<10} {}", stage.status, stage.count);
    }

    println!();
    print_table(&stores.candidates.list(&CandidateFilter::all()));

    println!("\nCSV export");
    stores
        .candidates
        .export_csv(&CandidateFilter::all(), std::io::stdout().lock())?;

    println!("\nStored records: {}", backend.keys().join(", "));
    Ok(())
}
