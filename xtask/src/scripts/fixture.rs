use crate::cli::FixtureArgs;
use blogtools_core::article::{validate_collection, Article, ArticleStatus, LocalizedText};
use chrono::{Duration, TimeZone, Utc};
use color_eyre::eyre::{eyre, Result};
use std::fs;

const CATEGORIES: [&str; 4] = ["wallets", "exchanges", "defi", "scams"];
const TOPICS: [(&str, &str, &str); 5] = [
    ("metamask", "Cómo proteger MetaMask", "How to secure MetaMask"),
    ("ledger", "Configurar una Ledger", "Setting up a Ledger"),
    ("seed", "Guardar tu frase semilla", "Storing your seed phrase"),
    ("phishing", "Detectar phishing", "Spotting phishing"),
    ("2fa", "Activar 2FA en exchanges", "Enabling 2FA on exchanges"),
];

pub fn run(args: &FixtureArgs) -> Result<()> {
    let articles = sample_articles(args.count);

    let problems = validate_collection(&articles);
    if let Some(problem) = problems.first() {
        return Err(eyre!("generated an invalid collection: {problem}"));
    }

    if let Some(parent) = args.out.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&args.out, serde_json::to_string_pretty(&articles)?)?;

    println!("{} articles written to {}", articles.len(), args.out.display());
    Ok(())
}

/// Deterministic collection: every third article is featured, every seventh is a draft
fn sample_articles(count: usize) -> Vec<Article> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single();

    (1..=count)
        .map(|n| {
            let (tag, es, en) = TOPICS[n % TOPICS.len()];
            let created_at = start.unwrap_or_default() + Duration::days(n as i64);

            Article {
                slug: format!("{tag}-{n}"),
                title: LocalizedText::new(format!("{es} ({n})"), format!("{en} ({n})")),
                excerpt: LocalizedText::new(
                    format!("Guía práctica sobre {tag}."),
                    format!("A practical guide about {tag}."),
                ),
                content: LocalizedText::new(
                    format!("Contenido completo sobre {tag}."),
                    format!("Full content about {tag}."),
                ),
                category: CATEGORIES[n % CATEGORIES.len()].to_string(),
                tags: vec![tag.to_string(), "security".to_string()],
                featured: n % 3 == 0,
                author: "Security Team".to_string(),
                status: if n % 7 == 0 {
                    ArticleStatus::Draft
                } else {
                    ArticleStatus::Published
                },
                created_at,
                image: None,
                likes: (n as u64 * 7) % 50,
                shares: (n as u64 * 3) % 20,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_articles_are_valid() {
        let articles = sample_articles(30);
        assert_eq!(articles.len(), 30);
        assert!(validate_collection(&articles).is_empty());
    }

    #[test]
    fn test_sample_articles_mix() {
        let articles = sample_articles(21);
        assert_eq!(articles.iter().filter(|a| a.featured).count(), 7);
        assert_eq!(
            articles
                .iter()
                .filter(|a| a.status == ArticleStatus::Draft)
                .count(),
            3
        );
    }
}
