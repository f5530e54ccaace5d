//! Plain-text reports for terminal output.

use crate::depsdev::System;
use crate::types::{CodeContext, ExaResult, PackageInfo, VersionDetail};

/// Number of versions listed by `--all-versions`.
pub const RECENT_VERSIONS: usize = 10;

fn push_result(out: &mut Vec<String>, result: &ExaResult, with_date: bool) {
    out.push(format!(
        "## {}",
        result.title.as_deref().unwrap_or("Untitled")
    ));
    out.push(format!("URL: {}", result.url.as_deref().unwrap_or("")));
    if with_date {
        if let Some(date) = result.published_date.as_deref().filter(|d| !d.is_empty()) {
            out.push(format!("Date: {}", date));
        }
    }
    if let Some(text) = result.text.as_deref().filter(|t| !t.is_empty()) {
        out.push(format!("\n{}", text));
    }
    out.push(String::new());
}

/// Exa search hits: title, URL, date and text per result.
pub fn search_results(results: &[ExaResult]) -> String {
    if results.is_empty() {
        return "No results found".to_string();
    }
    let mut out = Vec::new();
    for result in results {
        push_result(&mut out, result, true);
    }
    out.join("\n")
}

/// Exa extracted contents: like search results, without dates.
pub fn contents_results(results: &[ExaResult]) -> String {
    if results.is_empty() {
        return "No content extracted".to_string();
    }
    let mut out = Vec::new();
    for result in results {
        push_result(&mut out, result, false);
    }
    out.join("\n")
}

/// Exa code context with a sources/tokens footer.
pub fn code_context(ctx: &CodeContext) -> String {
    if ctx.response.is_empty() {
        return "No code examples found".to_string();
    }
    if ctx.results_count > 0 || ctx.output_tokens > 0 {
        format!(
            "{}\n---\nSources: {} | Tokens: {}",
            ctx.response, ctx.results_count, ctx.output_tokens
        )
    } else {
        ctx.response.clone()
    }
}

/// deps.dev package summary, optionally with the most recent versions.
pub fn package_report(info: &PackageInfo, system: System, requested: &str, all_versions: bool) -> String {
    let name = info.package_key.name.as_deref().unwrap_or(requested);
    let mut out = vec![
        format!("Package: {}", name),
        format!("System: {}", system.as_api_str()),
    ];

    match info
        .default_version()
        .and_then(|v| v.version_key.version.as_deref())
    {
        Some(version) => out.push(format!("Latest: {}", version)),
        None => out.push("Latest: (no default version found)".to_string()),
    }

    if all_versions {
        out.push("\nVersions:".to_string());
        for v in info.recent_versions(RECENT_VERSIONS) {
            let version = v.version_key.version.as_deref().unwrap_or("unknown");
            let marker = if v.is_default { " (default)" } else { "" };
            out.push(format!("  {}{}", version, marker));
        }
    }

    out.join("\n")
}

/// deps.dev single-version details.
pub fn version_report(
    detail: &VersionDetail,
    system: System,
    requested_package: &str,
    requested_version: &str,
) -> String {
    let key = &detail.version_key;
    let mut out = vec![
        format!("Package: {}", key.name.as_deref().unwrap_or(requested_package)),
        format!("Version: {}", key.version.as_deref().unwrap_or(requested_version)),
        format!("System: {}", system.as_api_str()),
        format!("Published: {}", detail.published_at.as_deref().unwrap_or("unknown")),
        format!("Default: {}", detail.is_default),
    ];

    if !detail.licenses.is_empty() {
        out.push(format!("Licenses: {}", detail.licenses.join(", ")));
    }
    if !detail.advisory_keys.is_empty() {
        out.push(format!(
            "Advisories: {} security advisory(ies)",
            detail.advisory_keys.len()
        ));
    }

    out.join("\n")
}
