use crate::infra::{build_orchestrator, build_service, read_json, verifier_label};
use candidate_verifier::config::{AppConfig, VerificationConfig};
use candidate_verifier::error::AppError;
use candidate_verifier::workflows::candidate::{
    validate_answers, validate_candidate, AdditionalAnswers, CandidateData, FieldId,
    FieldVerificationResult, VerificationReport, VerificationResult, VerificationRules,
    QUESTIONS,
};
use chrono::Utc;
use clap::Args;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

#[derive(Args, Debug)]
pub(crate) struct VerifyArgs {
    /// Candidate JSON file using the API field names (fullName, email, ...)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Verification rules JSON file. Defaults to the built-in rules.
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Questionnaire answers JSON file keyed by question id
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    /// Directory to write the verification report into
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
    /// Pass successful fields through the simulated external checks
    #[arg(long)]
    pub(crate) simulate: bool,
    /// Seed for the simulated checks, for reproducible runs
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Pass successful fields through the simulated external checks
    #[arg(long)]
    pub(crate) simulate: bool,
    /// Seed for the simulated checks, for reproducible runs
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

fn verification_config(simulate: bool, seed: Option<u64>) -> Result<VerificationConfig, AppError> {
    let mut config = AppConfig::load()?.verification;
    if simulate {
        config.simulate_external_checks = true;
    }
    if seed.is_some() {
        config.rng_seed = seed;
    }
    Ok(config)
}

pub(crate) async fn run_verify(args: VerifyArgs) -> Result<(), AppError> {
    let VerifyArgs {
        input,
        rules,
        answers,
        export,
        simulate,
        seed,
    } = args;

    let config = verification_config(simulate, seed)?;
    let candidate: CandidateData = read_json(&input)?;
    validate_candidate(&candidate)?;

    let rules: VerificationRules = match rules {
        Some(path) => read_json(&path)?,
        None => VerificationRules::default(),
    };
    let answers: AdditionalAnswers = match answers {
        Some(path) => {
            let answers = read_json(&path)?;
            validate_answers(&answers)?;
            answers
        }
        None => AdditionalAnswers::new(),
    };

    println!("Verifying {} ({})", candidate.full_name, verifier_label(&config));

    let orchestrator = build_orchestrator(&config);
    let (progress, mut updates) = mpsc::channel(FieldId::VERIFICATION_ORDER.len());
    let printer = async move {
        while let Some(field) = updates.recv().await {
            render_field(&field);
        }
    };
    let (outcome, ()) = tokio::join!(
        orchestrator.verify_streaming(&candidate, &rules, progress),
        printer
    );
    let result = outcome?;
    render_summary(&result);

    if let Some(dir) = export {
        let report = VerificationReport::new(candidate, result, answers, Utc::now());
        let path = export_report(&report, &dir)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = verification_config(args.simulate, args.seed)?;
    let service = build_service(&config);
    let candidate = reference_candidate();

    println!("Candidate verification demo ({})", verifier_label(&config));
    validate_candidate(&candidate)?;
    let result = service.verify(&candidate, None).await?;
    for field in &result.field_results {
        render_field(field);
    }
    render_summary(&result);

    println!("\nFollow-up questionnaire");
    let answers = demo_answers();
    for question in QUESTIONS.iter() {
        let answer = answers
            .get(question.id)
            .map(String::as_str)
            .unwrap_or("(skipped)");
        println!("- {}: {}", question.label, answer);
    }
    validate_answers(&answers)?;

    let saved = service.save(candidate.clone(), result.clone(), answers.clone())?;
    println!("\nSaved application {} -> {}", saved.id, saved.status);
    println!("  {} application(s) on file", service.list()?.len());

    let report = VerificationReport::new(candidate, result, answers, saved.timestamp);
    println!("  Report file: {}", report.file_name());

    Ok(())
}

fn export_report(report: &VerificationReport, dir: &Path) -> Result<PathBuf, AppError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(report.file_name());
    std::fs::write(&path, report.to_json_pretty()?)?;
    Ok(path)
}

fn render_field(field: &FieldVerificationResult) {
    println!(
        "  [{:<7}] {:<16} {:>3}  {}",
        field.status.label(),
        field.field_name,
        field.score,
        field.message
    );
    if let Some(details) = &field.details {
        println!("            {}", details);
    }
}

fn render_summary(result: &VerificationResult) {
    println!(
        "\nOverall: {} ({}/100)\n{}",
        result.status, result.overall_score, result.summary
    );
}

fn reference_candidate() -> CandidateData {
    CandidateData {
        full_name: "Jane Doe".to_string(),
        email: "jane@gmail.com".to_string(),
        phone: "+15551234567".to_string(),
        experience: 5,
        skills: "JavaScript, React, Node.js, TypeScript".to_string(),
        education: "Bachelor's Degree".to_string(),
        current_company: Some("Acme Corp".to_string()),
        linkedin_url: Some("https://www.linkedin.com/in/janedoe".to_string()),
        address: "123 Main St, Springfield, IL 62704".to_string(),
    }
}

fn demo_answers() -> AdditionalAnswers {
    [
        ("availability", "2 weeks notice"),
        ("salaryExpectation", "$110,000 - $125,000 per year"),
        ("workLocation", "Hybrid"),
        ("workSchedule", "Full-time"),
        ("motivation", "I enjoy building hiring tools that respect candidates' time"),
    ]
    .into_iter()
    .map(|(id, answer)| (id.to_string(), answer.to_string()))
    .collect()
}
