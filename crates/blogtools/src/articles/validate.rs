use super::load_articles_file;
use crate::prelude::{print, *};
use blogtools_core::article::{validate_collection, ArticleError};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, clap::Args, Clone)]
pub struct ValidateOptions {
    /// JSON file with the article collection
    #[arg(value_name = "PATH")]
    pub file: PathBuf,
}

pub fn run(options: ValidateOptions) -> Result<()> {
    let articles = load_articles_file(&options.file)?;
    let violations = validate_collection(&articles);

    print!("{}", format_report(articles.len(), &violations));

    if violations.is_empty() {
        Ok(())
    } else {
        Err(eyre!(
            "{} problem(s) found in {}",
            violations.len(),
            options.file.display()
        ))
    }
}

fn format_report(total: usize, violations: &[ArticleError]) -> String {
    if violations.is_empty() {
        return format!("{} {} articles checked\n", "OK".green().bold(), total);
    }

    let mut report = String::new();
    for violation in violations {
        report.push_str(&format!("{} {}\n", "error:".red().bold(), violation));
    }
    report
}
