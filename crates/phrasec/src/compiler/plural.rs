//! Number-variation rules for plural axes.
//!
//! By default a plural axis has the buckets `*` and `_1`. A compiler
//! configured with a [`PluralRuleProvider`] instead enumerates every
//! CLDR bucket the provider covers, followed by `_1`.
//!
//! ICU plural rules are cached per thread per language, so repeated lookups
//! reuse the previously constructed `PluralRules`.

use std::cell::RefCell;

use icu_locale_core::{Locale, locale};
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};
use phrasec_semantics::NumberVariation;
use thiserror::Error;

/// Supplies the number buckets of one language.
pub trait PluralRuleProvider {
    /// Bucket for the count `n`.
    fn variation(&self, n: i64) -> NumberVariation;

    /// Bucket used for counts outside the covered set.
    fn fallback(&self) -> NumberVariation;

    /// Buckets this language distinguishes, in code order.
    fn covered_variations(&self) -> Vec<NumberVariation>;
}

/// A fixed rule table: a selector function restricted to covered buckets.
#[derive(Debug, Clone)]
pub struct NumberVariationTable {
    covered: Vec<NumberVariation>,
    fallback: NumberVariation,
    select: fn(i64) -> NumberVariation,
}

impl NumberVariationTable {
    pub fn new(
        covered: Vec<NumberVariation>,
        fallback: NumberVariation,
        select: fn(i64) -> NumberVariation,
    ) -> NumberVariationTable {
        NumberVariationTable {
            covered,
            fallback,
            select,
        }
    }

    /// English: `one` for 1, `other` otherwise.
    pub fn english() -> NumberVariationTable {
        NumberVariationTable::new(
            vec![NumberVariation::One, NumberVariation::Other],
            NumberVariation::Other,
            |n| {
                if n == 1 {
                    NumberVariation::One
                } else {
                    NumberVariation::Other
                }
            },
        )
    }
}

impl PluralRuleProvider for NumberVariationTable {
    fn variation(&self, n: i64) -> NumberVariation {
        let selected = (self.select)(n);
        if self.covered.contains(&selected) {
            selected
        } else {
            self.fallback
        }
    }

    fn fallback(&self) -> NumberVariation {
        self.fallback
    }

    fn covered_variations(&self) -> Vec<NumberVariation> {
        self.covered.clone()
    }
}

/// Supported language codes for ICU plural rules.
const SUPPORTED_LANGUAGES: &[&str] = &[
    "ar", "bn", "de", "el", "en", "es", "fa", "fr", "he", "hi", "id", "it", "ja", "ko", "nl", "pl",
    "pt", "ro", "ru", "th", "tr", "uk", "vi", "zh",
];

thread_local! {
    static PLURAL_RULES_CACHE: RefCell<Vec<(&'static str, PluralRules)>> = const { RefCell::new(Vec::new()) };
}

#[derive(Debug, Error)]
pub enum PluralRulesError {
    #[error("no plural rules for language '{language}'")]
    UnsupportedLanguage { language: String },

    #[error("failed to load plural rules for '{language}': {message}")]
    Data { language: String, message: String },
}

/// CLDR plural rules for one language, backed by ICU.
#[derive(Debug, Clone)]
pub struct IcuPluralRules {
    language: &'static str,
    covered: Vec<NumberVariation>,
}

impl IcuPluralRules {
    pub fn for_language(language: &str) -> Result<IcuPluralRules, PluralRulesError> {
        let Some(language) = SUPPORTED_LANGUAGES
            .iter()
            .find(|&&code| code == language)
            .copied()
        else {
            return Err(PluralRulesError::UnsupportedLanguage {
                language: language.to_string(),
            });
        };
        let mut covered = with_rules(language, |rules| {
            rules.categories().map(variation_of).collect::<Vec<_>>()
        })?;
        covered.sort();
        Ok(IcuPluralRules { language, covered })
    }

    pub fn language(&self) -> &str {
        self.language
    }
}

impl PluralRuleProvider for IcuPluralRules {
    fn variation(&self, n: i64) -> NumberVariation {
        // The language was loaded successfully in `for_language`.
        let selected = with_rules(self.language, |rules| variation_of(rules.category_for(n)))
            .unwrap_or(NumberVariation::Other);
        if self.covered.contains(&selected) {
            selected
        } else {
            self.fallback()
        }
    }

    fn fallback(&self) -> NumberVariation {
        NumberVariation::Other
    }

    fn covered_variations(&self) -> Vec<NumberVariation> {
        self.covered.clone()
    }
}

fn variation_of(category: PluralCategory) -> NumberVariation {
    match category {
        PluralCategory::Zero => NumberVariation::Zero,
        PluralCategory::One => NumberVariation::One,
        PluralCategory::Two => NumberVariation::Two,
        PluralCategory::Few => NumberVariation::Few,
        PluralCategory::Many => NumberVariation::Many,
        PluralCategory::Other => NumberVariation::Other,
    }
}

fn locale_for(language: &'static str) -> Locale {
    match language {
        "ar" => locale!("ar"),
        "bn" => locale!("bn"),
        "de" => locale!("de"),
        "el" => locale!("el"),
        "es" => locale!("es"),
        "fa" => locale!("fa"),
        "fr" => locale!("fr"),
        "he" => locale!("he"),
        "hi" => locale!("hi"),
        "id" => locale!("id"),
        "it" => locale!("it"),
        "ja" => locale!("ja"),
        "ko" => locale!("ko"),
        "nl" => locale!("nl"),
        "pl" => locale!("pl"),
        "pt" => locale!("pt"),
        "ro" => locale!("ro"),
        "ru" => locale!("ru"),
        "th" => locale!("th"),
        "tr" => locale!("tr"),
        "uk" => locale!("uk"),
        "vi" => locale!("vi"),
        "zh" => locale!("zh"),
        _ => locale!("en"),
    }
}

/// Run `f` against the cached rules for `language`, building them on first use.
fn with_rules<T>(
    language: &'static str,
    f: impl FnOnce(&PluralRules) -> T,
) -> Result<T, PluralRulesError> {
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some((_, rules)) = cache.iter().find(|(code, _)| *code == language) {
            return Ok(f(rules));
        }
        let rules = PluralRules::try_new(locale_for(language).into(), PluralRuleType::Cardinal.into())
            .map_err(|error| PluralRulesError::Data {
                language: language.to_string(),
                message: error.to_string(),
            })?;
        let result = f(&rules);
        cache.push((language, rules));
        Ok(result)
    })
}
