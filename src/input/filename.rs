use crate::frameworks::defs::{FrameworkDef, frameworks};

const SKIP_PATTERNS: &[&str] = &["statistics", "violin_data", "file_index", ".raw"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunLabel {
    A,
    B,
}

impl RunLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            RunLabel::A => "A",
            RunLabel::B => "B",
        }
    }

    pub fn parse(s: &str) -> Option<RunLabel> {
        match s {
            "A" => Some(RunLabel::A),
            "B" => Some(RunLabel::B),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedName {
    pub preacher: String,
    pub sermon_id: String,
    pub raw_sermon_id: String,
    pub run: RunLabel,
    pub framework: &'static FrameworkDef,
}

impl ParsedName {
    pub fn sermon_key(&self) -> String {
        format!("{}_{}", self.preacher, self.raw_sermon_id)
    }
}

pub fn parse_analysis_filename(file_name: &str) -> Option<ParsedName> {
    let stem = file_name
        .strip_suffix(".json.gz")
        .or_else(|| file_name.strip_suffix(".json"))?;
    if SKIP_PATTERNS.iter().any(|pat| file_name.contains(pat)) {
        return None;
    }
    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() < 3 {
        return None;
    }

    // The framework id is the longest known suffix of the stem; everything
    // between the first token and the framework is the sermon id.
    let (idx, framework) = (1..parts.len())
        .find_map(|i| match_framework_suffix(&parts[i..]).map(|fw| (i, fw)))?;
    if idx < 2 {
        return None;
    }

    let preacher = parts[0].to_string();
    let raw_sermon_id = parts[1..idx].join("_");
    let (sermon_id, run) = split_run(&raw_sermon_id);
    Some(ParsedName {
        preacher,
        sermon_id,
        raw_sermon_id,
        run,
        framework,
    })
}

fn match_framework_suffix(tokens: &[&str]) -> Option<&'static FrameworkDef> {
    frameworks()
        .iter()
        .find(|fw| fw.id.split('_').eq(tokens.iter().copied()))
}

fn split_run(raw: &str) -> (String, RunLabel) {
    if let Some(base) = raw.strip_suffix("_B") {
        (base.to_string(), RunLabel::B)
    } else if let Some(base) = raw.strip_suffix("_A") {
        (base.to_string(), RunLabel::A)
    } else {
        (raw.to_string(), RunLabel::A)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/filename.rs"]
mod tests;
