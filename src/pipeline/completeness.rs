use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use crate::frameworks::defs::{frameworks, FrameworkDef};
use crate::input::corpus::{scan_corpus, CorpusScan};
use crate::input::json::value_at;
use crate::input::InputError;
use crate::report::ensure_out_dir;

#[derive(Debug, Clone)]
pub struct CheckParams {
    pub input_dir: PathBuf,
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    MissingFile,
    MissingField,
    ReadError,
}

impl IssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::MissingFile => "missing_file",
            IssueKind::MissingField => "missing_field",
            IssueKind::ReadError => "read_error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CaseIssue {
    pub preacher: String,
    pub sermon_id: String,
    pub framework: &'static str,
    pub kind: IssueKind,
    pub field: String,
    pub detail: String,
}

enum FileState<'a> {
    Loaded(&'a Value),
    Unreadable(&'a str),
}

pub fn run_check(params: &CheckParams) -> Result<usize, InputError> {
    let scan = scan_corpus(&params.input_dir)?;
    if scan.analyses.is_empty() && scan.read_errors.is_empty() {
        return Err(InputError::MissingInput(format!(
            "no analysis files found in {}",
            params.input_dir.display()
        )));
    }

    let issues = collect_issues(&scan);

    ensure_out_dir(&params.out_dir)?;
    let report_path = params.out_dir.join("incomplete_cases.tsv");
    write_issue_table(&issues, &report_path)?;
    info!("wrote {} ({} issues)", report_path.display(), issues.len());

    print_summary(&scan, &issues);
    Ok(issues.len())
}

// Sermons are grouped on the run-qualified id, so an A and a B scoring of the
// same sermon are checked as separate cases.
pub fn collect_issues(scan: &CorpusScan) -> Vec<CaseIssue> {
    let mut sermons: BTreeMap<(&str, &str), BTreeMap<&'static str, FileState>> = BTreeMap::new();
    for analysis in &scan.analyses {
        sermons
            .entry((&analysis.name.preacher, &analysis.name.raw_sermon_id))
            .or_default()
            .entry(analysis.name.framework.id)
            .or_insert(FileState::Loaded(&analysis.data));
    }
    for error in &scan.read_errors {
        sermons
            .entry((&error.name.preacher, &error.name.raw_sermon_id))
            .or_default()
            .entry(error.name.framework.id)
            .or_insert(FileState::Unreadable(&error.detail));
    }

    let mut issues = Vec::new();
    for ((preacher, sermon_id), states) in &sermons {
        for framework in frameworks() {
            match states.get(framework.id) {
                None => issues.push(CaseIssue {
                    preacher: preacher.to_string(),
                    sermon_id: sermon_id.to_string(),
                    framework: framework.id,
                    kind: IssueKind::MissingFile,
                    field: String::new(),
                    detail: format!("no {} analysis file for this sermon", framework.id),
                }),
                Some(FileState::Unreadable(detail)) => issues.push(CaseIssue {
                    preacher: preacher.to_string(),
                    sermon_id: sermon_id.to_string(),
                    framework: framework.id,
                    kind: IssueKind::ReadError,
                    field: String::new(),
                    detail: detail.to_string(),
                }),
                Some(FileState::Loaded(data)) => {
                    check_fields(framework, data, preacher, sermon_id, &mut issues);
                }
            }
        }
    }
    issues
}

fn check_fields(
    framework: &FrameworkDef,
    data: &Value,
    preacher: &str,
    sermon_id: &str,
    issues: &mut Vec<CaseIssue>,
) {
    for (path, display) in framework.critical {
        if field_missing(data, path) {
            issues.push(CaseIssue {
                preacher: preacher.to_string(),
                sermon_id: sermon_id.to_string(),
                framework: framework.id,
                kind: IssueKind::MissingField,
                field: (*display).to_string(),
                detail: format!("{path} is missing or empty"),
            });
        }
    }
    if framework.id == "dekker" && !has_dekker_criterion(data) {
        issues.push(CaseIssue {
            preacher: preacher.to_string(),
            sermon_id: sermon_id.to_string(),
            framework: framework.id,
            kind: IssueKind::MissingField,
            field: "criterion scores".to_string(),
            detail: "analysis_per_criterion has no scored criterion".to_string(),
        });
    }
}

fn field_missing(data: &Value, path: &str) -> bool {
    match value_at(data, path) {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(_) => false,
    }
}

fn has_dekker_criterion(data: &Value) -> bool {
    value_at(data, "analysis_per_criterion")
        .and_then(Value::as_object)
        .is_some_and(|criteria| {
            criteria
                .values()
                .any(|entry| !field_missing(entry, "score_1_to_10"))
        })
}

fn write_issue_table(issues: &[CaseIssue], path: &Path) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "preacher\tsermon_id\tframework\tissue\tfield\tdetail")?;
    for issue in issues {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            issue.preacher,
            issue.sermon_id,
            issue.framework,
            issue.kind.as_str(),
            issue.field,
            issue.detail
        )?;
    }
    out.flush()
}

fn print_summary(scan: &CorpusScan, issues: &[CaseIssue]) {
    let sermons: BTreeSet<(&str, &str)> = scan
        .analyses
        .iter()
        .map(|a| (a.name.preacher.as_str(), a.name.raw_sermon_id.as_str()))
        .chain(
            scan.read_errors
                .iter()
                .map(|e| (e.name.preacher.as_str(), e.name.raw_sermon_id.as_str())),
        )
        .collect();
    let affected: BTreeSet<(&str, &str)> = issues
        .iter()
        .map(|issue| (issue.preacher.as_str(), issue.sermon_id.as_str()))
        .collect();
    let count_kind = |kind: IssueKind| issues.iter().filter(|issue| issue.kind == kind).count();

    println!("Completeness check");
    println!("==================");
    println!("Sermons checked: {}", sermons.len());
    println!(
        "Issues: {} (missing_file {}, missing_field {}, read_error {})",
        issues.len(),
        count_kind(IssueKind::MissingFile),
        count_kind(IssueKind::MissingField),
        count_kind(IssueKind::ReadError)
    );
    println!("Sermons affected: {}", affected.len());

    if issues.is_empty() {
        println!();
        println!("All cases complete.");
        return;
    }

    let mut per_preacher: BTreeMap<&str, usize> = BTreeMap::new();
    for issue in issues {
        *per_preacher.entry(issue.preacher.as_str()).or_default() += 1;
    }
    println!();
    println!("Issues per preacher:");
    for (preacher, count) in per_preacher {
        println!("  {preacher}: {count}");
    }

    println!();
    println!(
        "{:<15} {:<12} {:<18} {:<15} {}",
        "preacher", "sermon_id", "framework", "issue", "detail"
    );
    println!("{}", "-".repeat(90));
    for issue in issues {
        println!(
            "{:<15} {:<12} {:<18} {:<15} {}",
            issue.preacher,
            issue.sermon_id,
            issue.framework,
            issue.kind.as_str(),
            issue.detail
        );
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/completeness.rs"]
mod tests;
