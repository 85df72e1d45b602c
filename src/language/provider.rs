use std::ops::Range;

use log::debug;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{Difficulty, WordPool};

/// Number of challenge texts generated per round
pub const DEFAULT_CHALLENGE_COUNT: usize = 10;

/// Source of challenge texts for a practice round
pub trait TextProvider {
    fn generate(&mut self, difficulty: Difficulty, count: usize) -> Vec<String>;
}

/// Random texts assembled from a word pool, sized to the tier's length band
pub struct WordPoolProvider<R: Rng = ThreadRng> {
    words: Vec<String>,
    rng: R,
}

impl WordPoolProvider<ThreadRng> {
    pub fn new(pool: &WordPool) -> Self {
        Self::with_rng(pool, rand::thread_rng())
    }
}

impl<R: Rng> WordPoolProvider<R> {
    pub fn with_rng(pool: &WordPool, rng: R) -> Self {
        Self {
            words: pool.words().into_iter().map(str::to_owned).collect(),
            rng,
        }
    }

    fn compose(&mut self, band: Range<usize>) -> String {
        let target = self.rng.gen_range(band.clone());
        let mut text = String::new();

        self.fill(&mut text, target, target);
        // very short targets can leave the text under the band's floor
        if text.chars().count() < band.start {
            self.fill(&mut text, band.start, band.end - 1);
        }
        text
    }

    /// Append random words that keep the text within `limit` chars until it
    /// reaches `goal` or no word fits any more
    fn fill(&mut self, text: &mut String, goal: usize, limit: usize) {
        loop {
            let len = text.chars().count();
            if len >= goal {
                break;
            }

            let separator = usize::from(!text.is_empty());
            let fitting = self
                .words
                .iter()
                .filter(|w| len + separator + w.chars().count() <= limit)
                .collect::<Vec<&String>>();

            let Some(word) = fitting.choose(&mut self.rng) else {
                break;
            };

            if separator == 1 {
                text.push(' ');
            }
            text.push_str(word);
        }
    }
}

impl<R: Rng> TextProvider for WordPoolProvider<R> {
    fn generate(&mut self, difficulty: Difficulty, count: usize) -> Vec<String> {
        debug!("generating {count} {difficulty} challenge texts");
        let band = difficulty.length_band();
        (0..count).map(|_| self.compose(band.clone())).collect()
    }
}

/// User supplied texts, served as-is whatever the tier or count
#[derive(Clone, Debug)]
pub struct FixedTexts {
    texts: Vec<String>,
}

impl FixedTexts {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
        }
    }
}

impl TextProvider for FixedTexts {
    fn generate(&mut self, _difficulty: Difficulty, _count: usize) -> Vec<String> {
        self.texts.clone()
    }
}
