//! Category 1: code quality.
//!
//! Tool-backed checks (tsc, eslint, prettier) degrade to `error` when the
//! tool cannot be spawned; static scans work on file contents alone.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::command;
use crate::types::{CheckOutcome, NamedCheck};

const MAX_ESLINT_WARNINGS: usize = 10;
const MAX_DETAIL_LINES: usize = 5;

/// Configuration files the template cannot ship without. Absence is a
/// hard failure, not a warning.
const REQUIRED_CONFIGS: &[(&str, &str)] = &[
    ("next.config.js", "Next.js configuration"),
    ("tailwind.config.js", "Tailwind CSS configuration"),
    ("tsconfig.json", "TypeScript configuration"),
    ("package.json", "Package configuration"),
];

pub async fn checks(project: &Path) -> Vec<NamedCheck> {
    vec![
        NamedCheck::new("TypeScript compilation", typescript_compilation(project).await),
        NamedCheck::new("ESLint validation", eslint(project).await),
        NamedCheck::new("Code formatting", formatting(project).await),
        NamedCheck::new("Import/export consistency", import_exports(project)),
        NamedCheck::new("Component structure", component_structure(project)),
        NamedCheck::new("Configuration files", configuration_files(project)),
    ]
}

async fn typescript_compilation(project: &Path) -> CheckOutcome {
    if !project.join("tsconfig.json").is_file() {
        return CheckOutcome::fail("TypeScript compilation errors found")
            .with_details(vec!["tsconfig.json not found".to_owned()]);
    }

    match command::run("npx", &["tsc", "--noEmit"], project).await {
        Ok(out) if out.success => CheckOutcome::pass("TypeScript compilation successful"),
        Ok(out) => {
            let mut detail = out.stdout;
            detail.truncate(500);
            CheckOutcome::fail("TypeScript compilation errors found")
                .with_details(vec![detail])
        }
        Err(err) => CheckOutcome::error(format!("Could not run TypeScript compiler: {err}")),
    }
}

async fn eslint(project: &Path) -> CheckOutcome {
    if !project.join(".eslintrc.json").is_file() {
        return CheckOutcome::warning("No ESLint configuration found")
            .with_recommendation("Add .eslintrc.json to enable lint checks");
    }

    let args = ["eslint", ".", "--ext", ".ts,.tsx", "--max-warnings", "10"];
    match command::run("npx", &args, project).await {
        Ok(out) if out.success => CheckOutcome::pass("ESLint validation passed"),
        Ok(out) => {
            let warnings = out.stdout.matches("warning").count();
            let errors = out.stdout.matches("error").count();
            if errors > 0 {
                CheckOutcome::fail(format!(
                    "ESLint found {errors} errors and {warnings} warnings"
                ))
            } else if warnings > MAX_ESLINT_WARNINGS {
                CheckOutcome::warning(format!(
                    "ESLint found {warnings} warnings (threshold: {MAX_ESLINT_WARNINGS})"
                ))
            } else {
                CheckOutcome::pass("ESLint validation passed with warnings")
            }
        }
        Err(err) => CheckOutcome::error(format!("Could not run ESLint: {err}")),
    }
}

async fn formatting(project: &Path) -> CheckOutcome {
    match command::run("npx", &["prettier", "--check", "."], project).await {
        Ok(out) if out.success => CheckOutcome::pass("Code formatting is consistent"),
        Ok(_) => CheckOutcome::warning("Code formatting inconsistencies found")
            .with_recommendation("Run npx prettier --write . to fix formatting"),
        Err(err) => CheckOutcome::error(format!("Could not run prettier: {err}")),
    }
}

fn import_exports(project: &Path) -> CheckOutcome {
    let component_dir = project.join("components");
    let Ok(entries) = fs::read_dir(&component_dir) else {
        return CheckOutcome::error("Could not analyze import/export structure");
    };

    let import_re =
        Regex::new(r"import\s+(?:\{([^}]*)\}|(\w+))\s+from").expect("valid import regex");
    let mut issues = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("tsx") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        let file = entry.file_name().to_string_lossy().into_owned();

        if !content.contains("export default") {
            issues.push(format!("{file}: Missing default export"));
        }

        for caps in import_re.captures_iter(&content) {
            let names = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            for name in names.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                // One occurrence means the import line itself is the only use.
                if content.matches(name).count() <= 1 {
                    issues.push(format!("{file}: Potentially unused import: {name}"));
                }
            }
        }
    }

    if issues.is_empty() {
        CheckOutcome::pass("Import/export structure is clean")
    } else {
        let count = issues.len();
        issues.truncate(MAX_DETAIL_LINES);
        CheckOutcome::warning(format!("Found {count} import/export issues")).with_details(issues)
    }
}

fn component_structure(project: &Path) -> CheckOutcome {
    let component_dir = project.join("components");
    let Ok(entries) = fs::read_dir(&component_dir) else {
        return CheckOutcome::error("Could not analyze component structure");
    };

    let mut issues = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("tsx") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        let file = entry.file_name().to_string_lossy().into_owned();

        if !content.contains("export default function") {
            issues.push(format!("{file}: Not using function component pattern"));
        }
        if content.contains("Props")
            && !content.contains("interface")
            && !content.contains("type")
        {
            issues.push(format!("{file}: Props not properly typed"));
        }
        if content.contains("<img") && !content.contains("alt=") {
            issues.push(format!("{file}: Images missing alt attributes"));
        }
        if content.contains("<button") && !content.contains("aria-") {
            issues.push(format!("{file}: Buttons missing accessibility attributes"));
        }
    }

    if issues.is_empty() {
        CheckOutcome::pass("Component structure is well-organized")
    } else {
        let count = issues.len();
        issues.truncate(MAX_DETAIL_LINES);
        CheckOutcome::warning(format!("Found {count} component structure issues"))
            .with_details(issues)
    }
}

fn configuration_files(project: &Path) -> CheckOutcome {
    let missing: Vec<&str> = REQUIRED_CONFIGS
        .iter()
        .filter(|(file, _)| !project.join(file).is_file())
        .map(|(_, description)| *description)
        .collect();

    if missing.is_empty() {
        CheckOutcome::pass("All required configuration files present")
    } else {
        CheckOutcome::fail(format!(
            "Missing configuration files: {}",
            missing.join(", ")
        ))
    }
}
