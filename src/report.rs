//! Report Formatter
//! Fixed-width text table of the per-feature statistics.

use crate::stats::StatsTable;

const REPORT_WIDTH: usize = 65;
const REPORT_TITLE: &str = "BANKNOTE ANALYSIS REPORT";

pub struct ReportFormatter;

impl ReportFormatter {
    /// Render the report text, one line per feature.
    pub fn render(stats: &StatsTable) -> String {
        let banner = "=".repeat(REPORT_WIDTH);
        let rule = "-".repeat(REPORT_WIDTH);

        let mut lines = vec![
            String::new(),
            banner.clone(),
            REPORT_TITLE.to_string(),
            banner.clone(),
            format!(
                "{:<12} | {:>10} | {:>10} | {:>10} | {:>10}",
                "Feature", "Minimum", "Maximum", "Average", "Median"
            ),
            rule,
        ];
        lines.extend(stats.iter().map(|feature| {
            format!(
                "{:<12} | {:>10.2} | {:>10.2} | {:>10.2} | {:>10.2}",
                feature.name, feature.min, feature.max, feature.mean, feature.median
            )
        }));
        lines.push(banner);

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Print the report to stdout.
    pub fn print(stats: &StatsTable) {
        print!("{}", Self::render(stats));
    }
}
