pub mod defs;
pub mod extract;

pub use defs::{FrameworkDef, MetricDef, find_framework, frameworks};
pub use extract::extract_metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricScope {
    Both,
    SummaryOnly,
    DetailedOnly,
}

pub fn composite_column(framework_id: &str) -> String {
    format!("{framework_id}.overall")
}

pub fn composite_columns() -> Vec<String> {
    frameworks().iter().map(|fw| composite_column(fw.id)).collect()
}

pub fn metric_scope(column: &str) -> MetricScope {
    let Some((fw_id, metric)) = column.split_once('.') else {
        return MetricScope::Both;
    };
    let Some(fw) = defs::find_framework(fw_id) else {
        return MetricScope::Both;
    };
    if metric == "overall" {
        return MetricScope::Both;
    }
    if let Some(def) = fw.metrics.iter().find(|m| m.name == metric) {
        return def.scope;
    }
    // Dynamic criterion columns: dekker criteria belong to both scopes,
    // esthetiek per-criterion columns only to the detailed scope.
    match fw.id {
        "esthetiek" => MetricScope::DetailedOnly,
        _ => MetricScope::Both,
    }
}

pub fn in_scope(column: &str, detailed: bool) -> bool {
    match metric_scope(column) {
        MetricScope::Both => true,
        MetricScope::SummaryOnly => !detailed,
        MetricScope::DetailedOnly => detailed,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/frameworks/tests.rs"]
mod tests;
