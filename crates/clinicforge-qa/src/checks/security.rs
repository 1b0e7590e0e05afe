//! Category 6: security.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde_json::Value;

use crate::command;
use crate::fsutil;
use crate::types::{CheckOutcome, NamedCheck};

const ENV_FILES: &[&str] = &[".env", ".env.local", ".env.production"];
const SECURITY_HEADERS: &[&str] = &[
    "X-Frame-Options",
    "X-Content-Type-Options",
    "X-XSS-Protection",
    "Referrer-Policy",
];

/// High-severity vulnerabilities tolerated before the audit check warns.
const MAX_HIGH_VULNERABILITIES: u64 = 2;

pub async fn checks(project: &Path) -> Vec<NamedCheck> {
    vec![
        NamedCheck::new(
            "Dependencies vulnerability scan",
            dependency_vulnerabilities(project).await,
        ),
        NamedCheck::new("Environment variables", environment_security(project)),
        NamedCheck::new("HTTP headers", security_headers(project)),
        NamedCheck::new("Input sanitization", input_sanitization(project)),
        NamedCheck::new("Content Security Policy", csp(project)),
    ]
}

/// `npm audit` exits non-zero when vulnerabilities exist, so stdout is
/// parsed regardless of the exit status.
async fn dependency_vulnerabilities(project: &Path) -> CheckOutcome {
    let args = ["audit", "--audit-level=moderate", "--json"];
    let output = match command::run("npm", &args, project).await {
        Ok(out) => out,
        Err(err) => return CheckOutcome::error(format!("Dependency vulnerability scan failed: {err}")),
    };

    let Ok(audit) = serde_json::from_str::<Value>(&output.stdout) else {
        return CheckOutcome::error("Could not parse dependency audit results");
    };
    let vulnerabilities = &audit["metadata"]["vulnerabilities"];
    let critical = vulnerabilities["critical"].as_u64().unwrap_or(0);
    let high = vulnerabilities["high"].as_u64().unwrap_or(0);
    let moderate = vulnerabilities["moderate"].as_u64().unwrap_or(0);

    if critical > 0 {
        CheckOutcome::fail(format!("{critical} critical vulnerabilities found"))
            .with_recommendation("Run npm audit fix immediately")
    } else if high > MAX_HIGH_VULNERABILITIES {
        CheckOutcome::warning(format!("{high} high-severity vulnerabilities found"))
            .with_recommendation("Review and fix high-severity vulnerabilities")
    } else if moderate > 0 {
        CheckOutcome::info(format!("{moderate} moderate vulnerabilities found"))
            .with_recommendation("Consider updating vulnerable dependencies")
    } else {
        CheckOutcome::pass("No known vulnerabilities in dependencies")
    }
}

fn environment_security(project: &Path) -> CheckOutcome {
    let sensitive: [(Regex, &str); 3] = [
        (
            Regex::new(r"(?i)password\s*=\s*[^#\n]").expect("valid password regex"),
            "Password in environment file",
        ),
        (
            Regex::new(r"(?i)secret\s*=\s*[^#\n]").expect("valid secret regex"),
            "Secret in environment file",
        ),
        (
            Regex::new(r"(?i)api_key\s*=\s*[^#\n]").expect("valid api key regex"),
            "API key in environment file",
        ),
    ];
    let gitignore = fs::read_to_string(project.join(".gitignore")).ok();

    let mut issues = Vec::new();
    for env_file in ENV_FILES {
        let Ok(content) = fs::read_to_string(project.join(env_file)) else {
            continue;
        };
        for (pattern, message) in &sensitive {
            if pattern.is_match(&content) {
                issues.push(format!("{env_file}: {message}"));
            }
        }
        match &gitignore {
            Some(gitignore) if gitignore.contains(env_file) => {}
            Some(_) => issues.push(format!("{env_file}: Not in .gitignore")),
            None => issues.push(".gitignore file not found".to_owned()),
        }
    }

    if issues.is_empty() {
        CheckOutcome::pass("Environment security is properly configured")
    } else {
        CheckOutcome::warning(format!("{} environment security issues found", issues.len()))
            .with_details(issues)
    }
}

fn security_headers(project: &Path) -> CheckOutcome {
    let Ok(content) = fs::read_to_string(project.join("next.config.js")) else {
        return CheckOutcome::warning("Could not analyze security headers configuration");
    };

    let found = SECURITY_HEADERS
        .iter()
        .filter(|h| content.contains(*h))
        .count();

    if found == SECURITY_HEADERS.len() {
        CheckOutcome::pass("All security headers are configured")
    } else if found > 0 {
        CheckOutcome::warning(format!(
            "{found}/{} security headers configured",
            SECURITY_HEADERS.len()
        ))
        .with_recommendation("Configure remaining security headers in next.config.js")
    } else {
        CheckOutcome::warning("No security headers configured")
            .with_recommendation("Add security headers to next.config.js")
    }
}

fn input_sanitization(project: &Path) -> CheckOutcome {
    let form_re = Regex::new(r"<form|<input|onChange|onSubmit").expect("valid form regex");
    let sanitize_re = Regex::new(r"sanitize|validate|escape|trim").expect("valid sanitize regex");

    let mut forms = 0usize;
    let mut sanitization = 0usize;
    for file in fsutil::component_files(project) {
        let Ok(content) = fs::read_to_string(&file) else {
            continue;
        };
        forms += form_re.find_iter(&content).count();
        sanitization += sanitize_re.find_iter(&content).count();
    }

    if forms == 0 {
        CheckOutcome::info("No forms found to validate input sanitization")
    } else if sanitization > 0 {
        CheckOutcome::pass("Input sanitization patterns detected")
    } else {
        CheckOutcome::warning("Forms found but no input sanitization detected")
            .with_recommendation("Implement input validation and sanitization")
    }
}

fn csp(project: &Path) -> CheckOutcome {
    let Ok(content) = fs::read_to_string(project.join("next.config.js")) else {
        return CheckOutcome::warning("Could not analyze CSP configuration");
    };
    if content.contains("Content-Security-Policy") {
        CheckOutcome::pass("Content Security Policy is configured")
    } else {
        CheckOutcome::info("Content Security Policy not configured")
            .with_recommendation("Consider implementing CSP for enhanced security")
    }
}
