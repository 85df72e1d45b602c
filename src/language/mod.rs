pub mod core;
pub mod difficulty;
pub mod provider;

// Re-export the main types for convenience
pub use core::{load_arcade_levels, ArcadeLevel, WordPool};
pub use difficulty::Difficulty;
pub use provider::{FixedTexts, TextProvider, WordPoolProvider, DEFAULT_CHALLENGE_COUNT};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrated_functionality() {
        let pool = WordPool::load().unwrap();
        let mut provider = WordPoolProvider::new(&pool);

        let texts = provider.generate(Difficulty::from_name("unknown"), DEFAULT_CHALLENGE_COUNT);
        assert_eq!(texts.len(), DEFAULT_CHALLENGE_COUNT);

        let band = Difficulty::Medium.length_band();
        assert!(texts.iter().all(|t| band.contains(&t.chars().count())));
    }
}
