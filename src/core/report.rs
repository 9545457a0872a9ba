use crate::domain::model::WaybackResult;
use chrono::{NaiveDateTime, SecondsFormat, Timelike};
use std::collections::BTreeMap;

const BANNER: &str = "====================================================";
const NO_RESULTS: &str = "No archived URLs found for the configured patterns.";
const CDX_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

const REPORT_STYLE: &str = "body{font-family:Arial,sans-serif;background:#020617;color:#e5e7eb;padding:20px}\
h1,h2{color:#fbbf24}table{border-collapse:collapse;width:100%;margin-bottom:24px}\
th,td{border:1px solid #1f2937;padding:6px 8px;font-size:13px}th{background:#0f172a}\
a{color:#93c5fd}";

/// 依服務分組；BTreeMap 保證鍵依位元組順序排列，組內保留原本順序
pub fn group_by_service(results: &[WaybackResult]) -> BTreeMap<&str, Vec<&WaybackResult>> {
    let mut groups: BTreeMap<&str, Vec<&WaybackResult>> = BTreeMap::new();
    for result in results {
        groups.entry(result.service.as_str()).or_default().push(result);
    }
    groups
}

/// Turns a 14-digit CDX timestamp into RFC 3339 UTC. Anything else, leap
/// seconds included, comes back untouched.
pub fn format_archive_date(raw: &str) -> String {
    if raw.len() != 14 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_string();
    }

    match NaiveDateTime::parse_from_str(raw, CDX_TIMESTAMP_FORMAT) {
        // chrono 以 nanosecond >= 1e9 表示第 60 秒
        Ok(dt) if dt.nanosecond() < 1_000_000_000 => {
            dt.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true)
        }
        _ => raw.to_string(),
    }
}

pub fn render_text(domain: &str, results: &[WaybackResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", BANNER));
    out.push_str(&format!(" Wayback Services Hunting for domain: {}\n", domain));
    out.push_str(&format!("{}\n", BANNER));

    if results.is_empty() {
        out.push_str(NO_RESULTS);
        out.push('\n');
        return out;
    }

    for (service, entries) in group_by_service(results) {
        out.push_str(&format!("\n[{}]\n", service));
        for r in entries {
            if r.date.is_empty() {
                out.push_str(&format!("{}\n", r.url));
            } else {
                out.push_str(&format!("{} {}\n", format_archive_date(&r.date), r.url));
            }
        }
    }

    out
}

/// 產生 HTML 報告；`generated_at` 由呼叫端提供，內容本身不依賴當下時間
pub fn render_html(domain: &str, results: &[WaybackResult], generated_at: &str) -> String {
    let domain = escape_html(domain);
    let mut b = String::new();

    b.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\"><title>Wayback Services Hunting - ");
    b.push_str(&domain);
    b.push_str("</title><style>");
    b.push_str(REPORT_STYLE);
    b.push_str("</style></head><body>");

    b.push_str("<h1>Wayback Services Hunting - ");
    b.push_str(&domain);
    b.push_str("</h1><p>Generated at ");
    b.push_str(&escape_html(generated_at));
    b.push_str("</p>");

    if results.is_empty() {
        b.push_str("<p>");
        b.push_str(NO_RESULTS);
        b.push_str("</p></body></html>");
        return b;
    }

    for (service, entries) in group_by_service(results) {
        b.push_str("<h2>");
        b.push_str(&escape_html(service));
        b.push_str("</h2>");
        b.push_str("<table><thead><tr><th>Date</th><th>Archived URL</th></tr></thead><tbody>");
        for r in entries {
            let url = escape_html(&r.url);
            b.push_str("<tr><td>");
            if r.date.is_empty() {
                b.push('-');
            } else {
                b.push_str(&escape_html(&format_archive_date(&r.date)));
            }
            b.push_str("</td><td><a href=\"");
            b.push_str(&url);
            b.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
            b.push_str(&url);
            b.push_str("</a></td></tr>");
        }
        b.push_str("</tbody></table>");
    }

    b.push_str("</body></html>");
    b
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn sanitize_filename(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

/// `wayback-<domain>-<YYYYMMDD-HHMMSS>.html`
pub fn report_filename(domain: &str, stamp: &str) -> String {
    format!("wayback-{}-{}.html", sanitize_filename(domain), stamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(service: &str, url: &str, date: &str) -> WaybackResult {
        WaybackResult {
            service: service.to_string(),
            url: url.to_string(),
            date: date.to_string(),
        }
    }

    fn sample() -> Vec<WaybackResult> {
        vec![
            result("slack_files", "https://files.slack.com/x/example.com.pdf", "20190101000000"),
            result("github_repos", "https://github.com/acme/example.com", "20210615120000"),
            result("slack_files", "https://files.slack.com/y/example.com.png", ""),
            result("aws_s3_bucket", "https://example.com.s3.amazonaws.com/a", "2021"),
        ]
    }

    #[test]
    fn test_format_archive_date() {
        assert_eq!(format_archive_date("20210615120000"), "2021-06-15T12:00:00Z");
        assert_eq!(format_archive_date("2021061512000"), "2021061512000");
        assert_eq!(format_archive_date("202106151200001"), "202106151200001");
        assert_eq!(format_archive_date("20211315120000"), "20211315120000");
        assert_eq!(format_archive_date("20211231235960"), "20211231235960");
        assert_eq!(format_archive_date("2021-06-15T12:0"), "2021-06-15T12:0");
        assert_eq!(format_archive_date(""), "");
    }

    #[test]
    fn test_grouping_is_a_sorted_partition() {
        let results = sample();
        let groups = group_by_service(&results);

        let keys: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["aws_s3_bucket", "github_repos", "slack_files"]);

        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, results.len());
        for r in &results {
            let members = &groups[r.service.as_str()];
            assert_eq!(members.iter().filter(|m| **m == r).count(), 1);
        }

        let slack: Vec<&str> = groups["slack_files"].iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            slack,
            vec![
                "https://files.slack.com/x/example.com.pdf",
                "https://files.slack.com/y/example.com.png"
            ]
        );
    }

    #[test]
    fn test_render_text() {
        let text = render_text("example.com", &sample());

        assert!(text.contains("Wayback Services Hunting for domain: example.com"));
        assert!(text.contains("[github_repos]\n2021-06-15T12:00:00Z https://github.com/acme/example.com\n"));
        assert!(text.contains("\nhttps://files.slack.com/y/example.com.png\n"));
        assert!(text.contains("2021 https://example.com.s3.amazonaws.com/a"));
        let aws = text.find("[aws_s3_bucket]").unwrap();
        let github = text.find("[github_repos]").unwrap();
        let slack = text.find("[slack_files]").unwrap();
        assert!(aws < github && github < slack);
    }

    #[test]
    fn test_render_text_without_results() {
        let text = render_text("example.com", &[]);
        assert!(text.contains(NO_RESULTS));
        assert!(!text.contains('['));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let results = sample();
        assert_eq!(render_text("example.com", &results), render_text("example.com", &results));
        assert_eq!(
            render_html("example.com", &results, "2024-01-01T00:00:00Z"),
            render_html("example.com", &results, "2024-01-01T00:00:00Z")
        );
    }

    #[test]
    fn test_render_html_escapes_external_text() {
        let results = vec![result(
            "github_repos",
            "https://github.com/a?x=1&y=\"<script>'",
            "20210615120000",
        )];
        let html = render_html("<evil>.com", &results, "now");

        assert!(html.contains("<title>Wayback Services Hunting - &lt;evil&gt;.com</title>"));
        assert!(html.contains(
            "<a href=\"https://github.com/a?x=1&amp;y=&quot;&lt;script&gt;&#39;\" target=\"_blank\" rel=\"noopener noreferrer\">"
        ));
        assert!(html.contains("<td>2021-06-15T12:00:00Z</td>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_render_html_one_table_per_service() {
        let html = render_html("example.com", &sample(), "now");
        assert_eq!(html.matches("<table>").count(), 3);
        assert!(html.contains("<td>-</td>"));
        assert!(html.ends_with("</body></html>"));
    }

    #[test]
    fn test_render_html_without_results() {
        let html = render_html("example.com", &[], "now");
        assert!(html.contains(NO_RESULTS));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"&<>"'"#), "&amp;&lt;&gt;&quot;&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("a/b:c*d"), "a_b_c_d");
        assert_eq!(sanitize_filename(r#" x\y?"<>|z "#), "x_y_____z");
    }

    #[test]
    fn test_report_filename() {
        assert_eq!(
            report_filename("example.com/app", "20240101-120000"),
            "wayback-example.com_app-20240101-120000.html"
        );
    }
}
