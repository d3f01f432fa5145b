use image::DynamicImage;
use rand::Rng;
use rand::seq::IndexedRandom;
use shared::Match;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Wall-clock budget for one classification call.
pub const DEFAULT_BUDGET: Duration = Duration::from_secs(10);

const LABELS: [&str; 8] = [
    "cat", "dog", "carrot", "tomato", "lettuce", "airplane", "rabbit", "phone",
];

// Normalized scores can land a hair above 1.0 in f32.
const SUM_SLACK: f32 = 1e-4;

#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("classifier backend failed: {0}")]
    Backend(String),
    #[error("classification took {elapsed:.2}s, over the {budget:.0}s budget")]
    BudgetExceeded { elapsed: f64, budget: f64 },
    #[error("classifier returned {0}")]
    InvalidOutput(&'static str),
}

/// The replaceable classification backend. The production binary wires in
/// [`RandomClassifier`]; tests inject doubles.
pub trait ImageClassifier: Send + Sync {
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Match>, ClassifyError>;
}

/// Stub backend: picks 2-3 labels with random scores normalized to sum to 1.
pub struct RandomClassifier;

impl ImageClassifier for RandomClassifier {
    fn classify(&self, _image: &DynamicImage) -> Result<Vec<Match>, ClassifyError> {
        let mut rng = rand::rng();
        let count: usize = rng.random_range(2..=3);
        let labels: Vec<&str> = LABELS.choose_multiple(&mut rng, count).copied().collect();
        let weights: Vec<f32> = labels
            .iter()
            .map(|_| rng.random_range(0.05f32..=1.0))
            .collect();
        let total: f32 = weights.iter().sum();

        Ok(labels
            .into_iter()
            .zip(weights)
            .map(|(name, weight)| Match {
                name: name.to_string(),
                score: weight / total,
            })
            .collect())
    }
}

/// Wraps the classification backend, enforcing the time budget and the
/// output-shape contract: a non-empty match list whose scores each lie in
/// (0, 1] and sum to at most 1.
#[derive(Clone)]
pub struct ClassificationAdapter {
    backend: Arc<dyn ImageClassifier>,
    budget: Duration,
}

impl ClassificationAdapter {
    pub fn new(backend: Arc<dyn ImageClassifier>, budget: Duration) -> Self {
        Self { backend, budget }
    }

    pub fn classify(&self, image: &DynamicImage) -> Result<Vec<Match>, ClassifyError> {
        let started = Instant::now();
        let matches = self.backend.classify(image)?;
        let elapsed = started.elapsed();

        // Post-hoc check only: a hanging backend is never interrupted.
        if elapsed > self.budget {
            return Err(ClassifyError::BudgetExceeded {
                elapsed: elapsed.as_secs_f64(),
                budget: self.budget.as_secs_f64(),
            });
        }

        validate_output(&matches)?;
        Ok(matches)
    }
}

fn validate_output(matches: &[Match]) -> Result<(), ClassifyError> {
    if matches.is_empty() {
        return Err(ClassifyError::InvalidOutput("no matches"));
    }
    let mut total = 0.0f32;
    for m in matches {
        if !(m.score > 0.0 && m.score <= 1.0) {
            return Err(ClassifyError::InvalidOutput("a score outside (0, 1]"));
        }
        total += m.score;
    }
    if total > 1.0 + SUM_SLACK {
        return Err(ClassifyError::InvalidOutput("scores summing above 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image() -> DynamicImage {
        DynamicImage::new_rgb8(2, 2)
    }

    struct FixedClassifier(Vec<Match>);

    impl ImageClassifier for FixedClassifier {
        fn classify(&self, _image: &DynamicImage) -> Result<Vec<Match>, ClassifyError> {
            Ok(self.0.clone())
        }
    }

    struct SlowClassifier(Duration);

    impl ImageClassifier for SlowClassifier {
        fn classify(&self, _image: &DynamicImage) -> Result<Vec<Match>, ClassifyError> {
            std::thread::sleep(self.0);
            Ok(vec![Match {
                name: "cat".into(),
                score: 0.9,
            }])
        }
    }

    #[test]
    fn stub_returns_two_or_three_normalized_matches() {
        let adapter = ClassificationAdapter::new(Arc::new(RandomClassifier), DEFAULT_BUDGET);
        for _ in 0..100 {
            let matches = adapter.classify(&test_image()).unwrap();
            assert!(matches.len() == 2 || matches.len() == 3);
            let total: f32 = matches.iter().map(|m| m.score).sum();
            assert!(total > 0.0 && total <= 1.0 + SUM_SLACK, "sum was {total}");
            for m in &matches {
                assert!(m.score > 0.0 && m.score <= 1.0, "score was {}", m.score);
            }
        }
    }

    #[test]
    fn empty_output_is_rejected() {
        let adapter = ClassificationAdapter::new(Arc::new(FixedClassifier(vec![])), DEFAULT_BUDGET);
        let err = adapter.classify(&test_image()).unwrap_err();
        assert!(matches!(err, ClassifyError::InvalidOutput(_)));
    }

    #[test]
    fn out_of_range_score_is_rejected() {
        let backend = FixedClassifier(vec![Match {
            name: "dog".into(),
            score: 1.4,
        }]);
        let adapter = ClassificationAdapter::new(Arc::new(backend), DEFAULT_BUDGET);
        assert!(matches!(
            adapter.classify(&test_image()),
            Err(ClassifyError::InvalidOutput(_))
        ));
    }

    #[test]
    fn oversummed_scores_are_rejected() {
        let backend = FixedClassifier(vec![
            Match {
                name: "dog".into(),
                score: 0.8,
            },
            Match {
                name: "cat".into(),
                score: 0.7,
            },
        ]);
        let adapter = ClassificationAdapter::new(Arc::new(backend), DEFAULT_BUDGET);
        assert!(matches!(
            adapter.classify(&test_image()),
            Err(ClassifyError::InvalidOutput(_))
        ));
    }

    #[test]
    fn budget_overrun_is_an_error() {
        let backend = SlowClassifier(Duration::from_millis(50));
        let adapter = ClassificationAdapter::new(Arc::new(backend), Duration::from_millis(5));
        assert!(matches!(
            adapter.classify(&test_image()),
            Err(ClassifyError::BudgetExceeded { .. })
        ));
    }

    #[test]
    fn slow_but_within_budget_passes() {
        let backend = SlowClassifier(Duration::from_millis(5));
        let adapter = ClassificationAdapter::new(Arc::new(backend), Duration::from_secs(1));
        assert!(adapter.classify(&test_image()).is_ok());
    }
}
