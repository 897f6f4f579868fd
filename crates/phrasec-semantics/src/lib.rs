//! Shared phrase-variation tables used by the compiler and payload consumers.
//!
//! This crate centralizes the fixed enumerations (gender constants, number
//! buckets, pronoun words, variation type codes) so that the payload writer
//! and anything reading payloads back agree on the same codes.

/// Map key used for "any gender" and "any number" branches.
pub const WILDCARD: &str = "*";

/// Map key of the singular bucket of a plural axis.
pub const EXACTLY_ONE: &str = "_1";

/// Token name given to a plural that does not declare one.
pub const DEFAULT_PLURAL_TOKEN: &str = "number";

/// Token name of the phrase-level `subject` gender axis.
pub const SUBJECT_TOKEN: &str = "__subject__";

/// Variation type codes written into runtime-arg descriptors (`type` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariationType {
    Gender,
    Number,
    Pronoun,
}

impl VariationType {
    /// Numeric code of this variation type.
    pub const fn code(self) -> u8 {
        match self {
            VariationType::Gender => 1,
            VariationType::Number => 2,
            VariationType::Pronoun => 3,
        }
    }

    /// Resolve a numeric code back to a variation type.
    pub const fn from_code(code: u8) -> Option<VariationType> {
        match code {
            1 => Some(VariationType::Gender),
            2 => Some(VariationType::Number),
            3 => Some(VariationType::Pronoun),
            _ => None,
        }
    }
}

/// CLDR plural bucket, with the numeric codes used as translated map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumberVariation {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl NumberVariation {
    pub const ALL: [NumberVariation; 6] = [
        NumberVariation::Zero,
        NumberVariation::One,
        NumberVariation::Two,
        NumberVariation::Few,
        NumberVariation::Many,
        NumberVariation::Other,
    ];

    pub const fn code(self) -> u8 {
        match self {
            NumberVariation::Zero => 16,
            NumberVariation::One => 4,
            NumberVariation::Two => 8,
            NumberVariation::Few => 20,
            NumberVariation::Many => 12,
            NumberVariation::Other => 24,
        }
    }

    pub const fn from_code(code: u8) -> Option<NumberVariation> {
        match code {
            16 => Some(NumberVariation::Zero),
            4 => Some(NumberVariation::One),
            8 => Some(NumberVariation::Two),
            20 => Some(NumberVariation::Few),
            12 => Some(NumberVariation::Many),
            24 => Some(NumberVariation::Other),
            _ => None,
        }
    }
}

/// Gender constants a runtime gender value may take.
///
/// Declaration order matters: pronoun candidate keys are discovered by
/// walking [`Gender::ALL`] front to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    NotAPerson,
    FemaleSingular,
    MaleSingular,
    FemaleSingularGuess,
    MaleSingularGuess,
    MixedUnknown,
    FemalePlural,
    MalePlural,
    NeuterPlural,
    UnknownSingular,
    UnknownPlural,
}

impl Gender {
    pub const ALL: [Gender; 11] = [
        Gender::NotAPerson,
        Gender::FemaleSingular,
        Gender::MaleSingular,
        Gender::FemaleSingularGuess,
        Gender::MaleSingularGuess,
        Gender::MixedUnknown,
        Gender::FemalePlural,
        Gender::MalePlural,
        Gender::NeuterPlural,
        Gender::UnknownSingular,
        Gender::UnknownPlural,
    ];

    pub const fn code(self) -> u8 {
        match self {
            Gender::NotAPerson => 0,
            Gender::FemaleSingular => 1,
            Gender::MaleSingular => 2,
            Gender::FemaleSingularGuess => 3,
            Gender::MaleSingularGuess => 4,
            Gender::MixedUnknown => 5,
            Gender::FemalePlural => 6,
            Gender::MalePlural => 7,
            Gender::NeuterPlural => 8,
            Gender::UnknownSingular => 9,
            Gender::UnknownPlural => 10,
        }
    }
}

/// How a pronoun is used in its sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PronounUsage {
    Object,
    Possessive,
    Reflexive,
    Subject,
}

/// Accepted pronoun usage names, sorted, for diagnostics.
pub const PRONOUN_USAGE_NAMES: &[&str] = &["object", "possessive", "reflexive", "subject"];

impl PronounUsage {
    pub fn from_name(name: &str) -> Option<PronounUsage> {
        match name {
            "object" => Some(PronounUsage::Object),
            "possessive" => Some(PronounUsage::Possessive),
            "reflexive" => Some(PronounUsage::Reflexive),
            "subject" => Some(PronounUsage::Subject),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PronounUsage::Object => "object",
            PronounUsage::Possessive => "possessive",
            PronounUsage::Reflexive => "reflexive",
            PronounUsage::Subject => "subject",
        }
    }

    /// Code passed to the runtime pronoun call.
    pub const fn code(self) -> u8 {
        match self {
            PronounUsage::Object => 0,
            PronounUsage::Possessive => 1,
            PronounUsage::Reflexive => 2,
            PronounUsage::Subject => 3,
        }
    }
}

/// The gender bucket a pronoun branch is keyed by.
///
/// Variants are ordered like their keys, `*` last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PronounGender {
    NotAPerson,
    Female,
    Male,
    Unknown,
}

impl PronounGender {
    /// Map key of this bucket in a pronoun axis.
    pub const fn key(self) -> &'static str {
        match self {
            PronounGender::NotAPerson => "0",
            PronounGender::Female => "1",
            PronounGender::Male => "2",
            PronounGender::Unknown => WILDCARD,
        }
    }

    pub fn from_key(key: &str) -> Option<PronounGender> {
        match key {
            "0" => Some(PronounGender::NotAPerson),
            "1" => Some(PronounGender::Female),
            "2" => Some(PronounGender::Male),
            WILDCARD => Some(PronounGender::Unknown),
            _ => None,
        }
    }
}

/// Collapse a gender constant into the bucket a pronoun usage distinguishes.
///
/// Only object and reflexive pronouns have a dedicated non-person form
/// ("this", "itself"); other usages fall back to the unknown bucket.
pub fn pronoun_gender(usage: PronounUsage, gender: Gender) -> PronounGender {
    match gender {
        Gender::NotAPerson => match usage {
            PronounUsage::Object | PronounUsage::Reflexive => PronounGender::NotAPerson,
            PronounUsage::Possessive | PronounUsage::Subject => PronounGender::Unknown,
        },
        Gender::FemaleSingular | Gender::FemaleSingularGuess => PronounGender::Female,
        Gender::MaleSingular | Gender::MaleSingularGuess => PronounGender::Male,
        Gender::MixedUnknown
        | Gender::FemalePlural
        | Gender::MalePlural
        | Gender::NeuterPlural
        | Gender::UnknownSingular
        | Gender::UnknownPlural => PronounGender::Unknown,
    }
}

/// Distinct pronoun buckets for a usage, in key order.
///
/// When `human` is set the non-person bucket is never produced.
pub fn pronoun_candidates(usage: PronounUsage, human: bool) -> Vec<PronounGender> {
    let mut candidates = Vec::new();
    for gender in Gender::ALL {
        if human && gender == Gender::NotAPerson {
            continue;
        }
        let bucket = pronoun_gender(usage, gender);
        if !candidates.contains(&bucket) {
            candidates.push(bucket);
        }
    }
    candidates.sort_unstable();
    candidates
}

/// English source word for a pronoun usage and bucket.
pub fn pronoun_word(usage: PronounUsage, gender: PronounGender) -> &'static str {
    match (usage, gender) {
        (PronounUsage::Object, PronounGender::NotAPerson) => "this",
        (PronounUsage::Object, PronounGender::Female) => "her",
        (PronounUsage::Object, PronounGender::Male) => "him",
        (PronounUsage::Object, PronounGender::Unknown) => "them",
        (PronounUsage::Possessive, PronounGender::Female) => "her",
        (PronounUsage::Possessive, PronounGender::Male) => "his",
        (PronounUsage::Possessive, PronounGender::NotAPerson | PronounGender::Unknown) => "their",
        (PronounUsage::Reflexive, PronounGender::NotAPerson) => "itself",
        (PronounUsage::Reflexive, PronounGender::Female) => "herself",
        (PronounUsage::Reflexive, PronounGender::Male) => "himself",
        (PronounUsage::Reflexive, PronounGender::Unknown) => "themselves",
        (PronounUsage::Subject, PronounGender::Female) => "she",
        (PronounUsage::Subject, PronounGender::Male) => "he",
        (PronounUsage::Subject, PronounGender::NotAPerson | PronounGender::Unknown) => "they",
    }
}
