use std::fmt;

use serde::{Deserialize, Serialize};

use crate::report::ResultTable;

/// Ratio statistics for one (build mode, component count) group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    #[serde(rename = "static")]
    pub is_static: bool,
    pub num_components: u64,
    pub runs: usize,
    pub mean_ratio: f64,
    pub min_ratio: f64,
    pub max_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TableSummary {
    pub rows: usize,
    pub groups: Vec<GroupSummary>,
}

/// Groups rows by build mode and component count, in first-seen order.
pub fn summarize(table: &ResultTable) -> TableSummary {
    let mut groups: Vec<(GroupSummary, f64)> = Vec::new();
    for row in &table.rows {
        let existing = groups.iter_mut().find(|(group, _)| {
            group.is_static == row.is_static && group.num_components == row.num_components
        });
        match existing {
            Some((group, sum)) => {
                group.runs += 1;
                group.min_ratio = group.min_ratio.min(row.aos_soa);
                group.max_ratio = group.max_ratio.max(row.aos_soa);
                *sum += row.aos_soa;
            }
            None => groups.push((
                GroupSummary {
                    is_static: row.is_static,
                    num_components: row.num_components,
                    runs: 1,
                    mean_ratio: 0.0,
                    min_ratio: row.aos_soa,
                    max_ratio: row.aos_soa,
                },
                row.aos_soa,
            )),
        }
    }
    TableSummary {
        rows: table.len(),
        groups: groups
            .into_iter()
            .map(|(mut group, sum)| {
                group.mean_ratio = sum / group.runs as f64;
                group
            })
            .collect(),
    }
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<8} {:>10} {:>5} {:>10} {:>10} {:>10}",
            "mode", "components", "runs", "mean", "min", "max"
        )?;
        for group in &self.groups {
            let mode = if group.is_static { "static" } else { "dynamic" };
            writeln!(
                f,
                "{:<8} {:>10} {:>5} {:>10.4} {:>10.4} {:>10.4}",
                mode,
                group.num_components,
                group.runs,
                group.mean_ratio,
                group.min_ratio,
                group.max_ratio
            )?;
        }
        write!(f, "{} rows", self.rows)
    }
}
