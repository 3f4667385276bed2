use anyhow::{Context, Result, anyhow};
use game_types::Suggestion;
use rand::Rng;
use rand::seq::SliceRandom;
use std::path::Path;
use tracing::{info, warn};

use crate::alphabet;

const DEFAULT_BANK: &str = "\
# category: word, word, ...
حيوانات: فيل, زرافة, تمساح, أخطبوط, كنغر, بطريق, أسد, نمر, ذئب, ثعلب, أرنب, غزال, فهد, ضفدع, بومة, عقاب, صقر, غوريلا
دول: مصر, السعودية, المغرب, الإمارات, فلسطين, الجزائر, الأردن, لبنان, سوريا, الكويت, قطر, البحرين, عمان, اليمن, العراق, تونس, ليبيا, السودان
فواكه: تفاح, موز, برتقال, مانجو, بطيخ, فراولة, عنب, توت, كرز, خوخ, مشمش, تين, بلح, رمان, كيوي, أناناس, شمام, كمثرى
ألوان: أحمر, أزرق, أخضر, أصفر, برتقالي, بنفسجي, وردي, بني, رمادي, أبيض, أسود, ذهبي, فضي
أطعمة: خبز, أرز, لحم, دجاج, سمك, معكرونة, بيتزا, ساندويتش, سلطة, حساء, جبن, بيض, خضار, فلافل, شاورما
مهن: طبيب, مهندس, معلم, شرطي, طباخ, سائق, نجار, حداد, خياط, مزارع, صحفي, فنان, كاتب, طيار, محاسب
";

#[derive(Debug, Clone)]
pub struct WordCategory {
    pub name: String,
    pub words: Vec<String>,
}

/// Topical word suggestions for the word-master. Suggestions only help pick
/// a word; they go through the same validation as typed words.
#[derive(Debug, Clone)]
pub struct WordBank {
    categories: Vec<WordCategory>,
}

impl WordBank {
    /// Parse `category: word, word` lines. Blank lines and `#` comments are
    /// skipped, as are words that could never be submitted.
    pub fn from_word_list(word_list: &str) -> Self {
        let mut categories: Vec<WordCategory> = Vec::new();

        for line in word_list.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((name, words)) = line.split_once(':') else {
                warn!("Skipping word bank line without a category: {}", line);
                continue;
            };

            let words: Vec<String> = words
                .split(',')
                .map(str::trim)
                .filter(|word| !word.is_empty())
                .filter(|word| {
                    let valid = alphabet::validate_secret_word(word).is_ok();
                    if !valid {
                        warn!("Skipping unusable suggestion '{}'", word);
                    }
                    valid
                })
                .map(str::to_string)
                .collect();

            let name = name.trim();
            if name.is_empty() || words.is_empty() {
                continue;
            }

            match categories.iter_mut().find(|category| category.name == name) {
                Some(category) => category.words.extend(words),
                None => categories.push(WordCategory {
                    name: name.to_string(),
                    words,
                }),
            }
        }

        Self { categories }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading word bank {}", path.display()))?;

        let bank = Self::from_word_list(&contents);
        if bank.is_empty() {
            return Err(anyhow!("word bank {} has no usable words", path.display()));
        }

        info!(
            "Loaded {} suggestions in {} categories from {}",
            bank.word_count(),
            bank.categories.len(),
            path.display()
        );
        Ok(bank)
    }

    pub fn categories(&self) -> &[WordCategory] {
        &self.categories
    }

    pub fn word_count(&self) -> usize {
        self.categories.iter().map(|category| category.words.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.word_count() == 0
    }

    /// Pick `count` suggestions, each from a randomly chosen category.
    /// Repeats are possible, as with any independent draw.
    pub fn suggest<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Suggestion> {
        (0..count)
            .filter_map(|_| {
                let category = self.categories.choose(rng)?;
                let word = category.words.choose(rng)?;
                Some(Suggestion {
                    category: category.name.clone(),
                    word: word.clone(),
                })
            })
            .collect()
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::from_word_list(DEFAULT_BANK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_default_bank_has_all_categories() {
        let bank = WordBank::default();
        assert_eq!(bank.categories().len(), 6);
        assert_eq!(bank.categories()[0].name, "حيوانات");
        assert_eq!(bank.categories()[0].words.len(), 18);
    }

    #[test]
    fn test_default_bank_words_pass_validation() {
        for category in WordBank::default().categories() {
            for word in &category.words {
                assert!(alphabet::validate_secret_word(word).is_ok(), "{}", word);
            }
        }
    }

    #[test]
    fn test_comments_blank_lines_and_invalid_words() {
        let bank = WordBank::from_word_list(
            "# comment\n\nحيوانات: فيل, cat, , أسد\nbad line\nفارغ: dog\nحيوانات: نمر",
        );
        assert_eq!(bank.categories().len(), 1);
        assert_eq!(bank.categories()[0].words, vec!["فيل", "أسد", "نمر"]);
    }

    #[test]
    fn test_empty_bank_suggests_nothing() {
        let bank = WordBank::from_word_list("");
        let mut rng = StdRng::seed_from_u64(7);
        assert!(bank.is_empty());
        assert!(bank.suggest(3, &mut rng).is_empty());
    }

    #[test]
    fn test_suggestions_come_from_the_bank() {
        let bank = WordBank::default();
        let mut rng = StdRng::seed_from_u64(42);
        let suggestions = bank.suggest(3, &mut rng);
        assert_eq!(suggestions.len(), 3);
        for suggestion in suggestions {
            let category = bank
                .categories()
                .iter()
                .find(|category| category.name == suggestion.category)
                .expect("category exists");
            assert!(category.words.contains(&suggestion.word));
        }
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = WordBank::from_file("/definitely/not/here.txt");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("reading word bank"));
    }
}
