use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Scores at or above this are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Scores at or below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// The single classification rule, used for headlines, counts and the
    /// overall label alike.
    pub fn classify(score: f64) -> Self {
        if score >= POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

fn default_title() -> String {
    "No title".to_owned()
}

fn default_source() -> String {
    "Unknown".to_owned()
}

fn default_url() -> String {
    "#".to_owned()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default = "default_source")]
    pub source_name: String,
    #[serde(default, alias = "score")]
    pub sentiment_score: Option<f64>,
}

impl Article {
    /// A missing score counts as 0.
    pub fn score(&self) -> f64 {
        self.sentiment_score.unwrap_or_default()
    }
}

/// Article as shown beside the chart, tagged with its sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedArticle {
    #[serde(flatten)]
    pub article: Article,
    pub sentiment: Sentiment,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentSummary {
    pub average_score: f64,
    pub positive_count: usize,
    pub neutral_count: usize,
    pub negative_count: usize,
    pub overall_label: Sentiment,
}

impl SentimentSummary {
    pub fn total(&self) -> usize {
        self.positive_count + self.neutral_count + self.negative_count
    }
}

pub fn annotate(articles: &[Article]) -> Vec<AnnotatedArticle> {
    articles
        .iter()
        .map(|article| AnnotatedArticle {
            sentiment: Sentiment::classify(article.score()),
            article: article.clone(),
        })
        .collect()
}

/// Returns `None` for an empty list: no news is not neutral news.
pub fn summarize(articles: &[Article]) -> Option<SentimentSummary> {
    if articles.is_empty() {
        return None;
    }

    let mut summary = SentimentSummary {
        average_score: 0.0,
        positive_count: 0,
        neutral_count: 0,
        negative_count: 0,
        overall_label: Sentiment::Neutral,
    };
    let mut total = 0.0;

    for score in articles.iter().map(Article::score) {
        total += score;
        match Sentiment::classify(score) {
            Sentiment::Positive => summary.positive_count += 1,
            Sentiment::Neutral => summary.neutral_count += 1,
            Sentiment::Negative => summary.negative_count += 1,
        }
    }

    summary.average_score = total / articles.len() as f64;
    summary.overall_label = Sentiment::classify(summary.average_score);

    Some(summary)
}

#[cfg(test)]
mod tests {
    use super::{annotate, summarize, Article, Sentiment};

    fn article(score: Option<f64>) -> Article {
        Article {
            title: "Quarterly results".to_owned(),
            description: None,
            url: "https://example.com/a".to_owned(),
            published_at: None,
            source_name: "Wire".to_owned(),
            sentiment_score: score,
        }
    }

    fn articles(scores: &[f64]) -> Vec<Article> {
        scores.iter().map(|s| article(Some(*s))).collect()
    }

    #[test]
    fn unittest_classify_thresholds() {
        assert_eq!(Sentiment::classify(0.05), Sentiment::Positive);
        assert_eq!(Sentiment::classify(-0.05), Sentiment::Negative);
        assert_eq!(Sentiment::classify(0.0499), Sentiment::Neutral);
        assert_eq!(Sentiment::classify(-0.0499), Sentiment::Neutral);
    }

    #[test]
    fn unittest_mixed_scores_scenario() {
        let summary = summarize(&articles(&[0.3, 0.02, -0.2])).unwrap();

        assert_eq!(summary.positive_count, 1);
        assert_eq!(summary.neutral_count, 1);
        assert_eq!(summary.negative_count, 1);
        assert!((summary.average_score - 0.04).abs() < 1e-9);
        assert_eq!(summary.overall_label, Sentiment::Neutral);
    }

    #[test]
    fn unittest_counts_cover_every_article() {
        let scores = [0.9, -0.9, 0.0, 0.05, -0.05, 0.049, -0.3, 0.7];
        let summary = summarize(&articles(&scores)).unwrap();

        assert_eq!(summary.total(), scores.len());
        assert_eq!(summary.overall_label, Sentiment::Positive);
    }

    #[test]
    fn unittest_missing_score_counts_as_neutral_zero() {
        let list = vec![article(Some(0.4)), article(None)];
        let summary = summarize(&list).unwrap();

        assert_eq!(summary.neutral_count, 1);
        assert_eq!(summary.positive_count, 1);
        assert!((summary.average_score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn unittest_empty_list_has_no_summary() {
        assert!(summarize(&[]).is_none());
        assert!(annotate(&[]).is_empty());
    }

    #[test]
    fn unittest_annotation_matches_counts() {
        let list = articles(&[0.3, 0.02, -0.2, 0.05]);
        let summary = summarize(&list).unwrap();
        let tagged = annotate(&list);

        let positive = tagged
            .iter()
            .filter(|a| a.sentiment == Sentiment::Positive)
            .count();
        assert_eq!(positive, summary.positive_count);
        assert_eq!(tagged[1].sentiment, Sentiment::Neutral);
    }

    #[test]
    fn unittest_article_defaults_from_json() -> eyre::Result<()> {
        let article: Article = serde_json::from_str(r#"{"score": -0.4}"#)?;

        assert_eq!(article.title, "No title");
        assert_eq!(article.source_name, "Unknown");
        assert_eq!(article.url, "#");
        assert_eq!(article.sentiment_score, Some(-0.4));
        Ok(())
    }
}
