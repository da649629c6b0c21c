use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::input::filename::{ParsedName, parse_analysis_filename};
use crate::input::json::load_analysis_json;
use crate::input::InputError;

#[derive(Debug, Clone)]
pub struct LoadedAnalysis {
    pub name: ParsedName,
    pub file_name: String,
    pub data: Value,
}

#[derive(Debug, Clone)]
pub struct ReadIssue {
    pub name: ParsedName,
    pub file_name: String,
    pub detail: String,
}

#[derive(Debug, Default)]
pub struct CorpusScan {
    pub analyses: Vec<LoadedAnalysis>,
    pub read_errors: Vec<ReadIssue>,
    pub n_files: usize,
    pub n_skipped: usize,
}

pub fn scan_corpus(input_dir: &Path) -> Result<CorpusScan, InputError> {
    if !input_dir.is_dir() {
        return Err(InputError::MissingInput(format!(
            "input directory {} not found",
            input_dir.display()
        )));
    }

    let mut file_names: Vec<String> = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".json") || name.ends_with(".json.gz") {
            file_names.push(name);
        }
    }
    // stable ordering
    file_names.sort();

    let mut scan = CorpusScan::default();
    for file_name in file_names {
        scan.n_files += 1;
        let Some(name) = parse_analysis_filename(&file_name) else {
            debug!("skipping unrecognized file name: {file_name}");
            scan.n_skipped += 1;
            continue;
        };
        match load_analysis_json(&input_dir.join(&file_name)) {
            Ok(Some(data)) => scan.analyses.push(LoadedAnalysis {
                name,
                file_name,
                data,
            }),
            Ok(None) => {
                warn!("skipping non-object payload: {file_name}");
                scan.n_skipped += 1;
            }
            Err(err) => {
                warn!("unreadable analysis file: {file_name}: {err}");
                scan.read_errors.push(ReadIssue {
                    name,
                    file_name,
                    detail: err.to_string(),
                });
            }
        }
    }

    info!(
        "scanned {}: {} json files, {} loaded, {} skipped, {} unreadable",
        input_dir.display(),
        scan.n_files,
        scan.analyses.len(),
        scan.n_skipped,
        scan.read_errors.len()
    );
    Ok(scan)
}
