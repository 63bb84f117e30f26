//! General-purpose lexicon polarity scorer for news summaries.
//!
//! Word weights live in `data/en-polarity.tsv` and are parsed once on first
//! use.

use std::collections::HashMap;
use std::sync::LazyLock;

use newsdigest_core::Sentiment;

/// Word polarity weights, keyed by lowercase word.
static LEXICON: LazyLock<HashMap<&'static str, f32>> =
    LazyLock::new(|| parse_lexicon(include_str!("../data/en-polarity.tsv")));

/// Words that flip and halve the polarity of the next scored word.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "nor", "without", "hardly", "barely", "scarcely", "none", "nothing",
    "nobody", "neither", "cannot",
];

/// Words that scale the polarity of the next scored word.
const INTENSIFIERS: &[(&str, f32)] = &[
    ("very", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("really", 1.2),
    ("massive", 1.3),
    ("massively", 1.3),
    ("hugely", 1.4),
    ("incredibly", 1.4),
    ("exceptionally", 1.4),
    ("utterly", 1.5),
    ("absolutely", 1.4),
    ("totally", 1.3),
    ("completely", 1.3),
    ("deeply", 1.3),
    ("greatly", 1.3),
    ("particularly", 1.2),
    ("especially", 1.2),
    ("seriously", 1.2),
    ("significantly", 1.2),
    ("substantially", 1.2),
    ("fairly", 0.8),
    ("somewhat", 0.7),
    ("mildly", 0.6),
    ("slightly", 0.5),
    ("marginally", 0.5),
];

/// Prefixes that negate a positive base word (`unhappy`, `disloyal`).
const NEGATING_PREFIXES: &[&str] = &["un", "dis", "non"];

/// Suffixes stripped to reach a listed base form, with their replacements.
/// Longer suffixes come first so `happiest` reaches `happy` before `happi`.
const SUFFIX_RULES: &[(&str, &[&str])] = &[
    ("iness", &["y"]),
    ("iest", &["y"]),
    ("ier", &["y"]),
    ("ied", &["y"]),
    ("ies", &["y"]),
    ("ily", &["y"]),
    ("bly", &["ble"]),
    ("ness", &[""]),
    ("est", &["", "e"]),
    ("ing", &["", "e"]),
    ("er", &["", "e"]),
    ("ed", &["", "e"]),
    ("ly", &[""]),
    ("es", &[""]),
    ("s", &[""]),
];

/// Shortest base form tried when stripping affixes.
const MIN_BASE_LEN: usize = 3;

/// Polarity of `text` in `[-1.0, 1.0]`.
///
/// Averages the weights of every lexicon word found, including inflected and
/// prefix-negated forms of listed words. A negator directly before a word
/// multiplies its weight by `-0.5`; intensifiers scale it. Modifiers apply to
/// the next scored word only and reset on any other word. Returns `0.0` for
/// empty or unknown text.
#[must_use]
pub fn polarity(text: &str) -> f32 {
    let mut total = 0.0_f32;
    let mut matched = 0_usize;
    let mut negate = false;
    let mut intensity = 1.0_f32;

    for raw in text.split_whitespace() {
        let word = normalize_word(raw);
        if word.is_empty() {
            continue;
        }

        if is_negator(&word) {
            negate = true;
            continue;
        }
        if let Some(factor) = intensifier(&word) {
            intensity *= factor;
            continue;
        }

        if let Some(weight) = lookup(&word) {
            let mut value = weight * intensity;
            if negate {
                value *= -0.5;
            }
            total += value.clamp(-1.0, 1.0);
            matched += 1;
        }
        negate = false;
        intensity = 1.0;
    }

    if matched == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let denom = matched as f32;
    (total / denom).clamp(-1.0, 1.0)
}

/// Label a summary by the sign of its [`polarity`].
#[must_use]
pub fn analyze_sentiment(text: &str) -> Sentiment {
    Sentiment::from_polarity(polarity(text))
}

/// `word<TAB>weight` lines; blank lines, `#` comments and lines that do not
/// parse are skipped.
fn parse_lexicon(source: &str) -> HashMap<&str, f32> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (word, weight) = line.split_once('\t')?;
            Some((word.trim(), weight.trim().parse::<f32>().ok()?))
        })
        .collect()
}

/// Lowercases `raw`, strips surrounding punctuation and a possessive `'s`.
fn normalize_word(raw: &str) -> String {
    let word = raw
        .replace('\u{2019}', "'")
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
        .trim_matches('\'')
        .to_lowercase();
    match word.strip_suffix("'s") {
        Some(stem) => stem.to_string(),
        None => word,
    }
}

fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word) || word.ends_with("n't")
}

fn intensifier(word: &str) -> Option<f32> {
    INTENSIFIERS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|&(_, factor)| factor)
}

/// Non-zero weight of `word`.
///
/// Tries the word itself, then its base forms, then a negating prefix over a
/// positive base. A zero-weight entry ends the search unscored.
fn lookup(word: &str) -> Option<f32> {
    let weight = listed(word).or_else(|| {
        NEGATING_PREFIXES.iter().find_map(|prefix| {
            let rest = word.strip_prefix(prefix)?;
            if rest.len() < MIN_BASE_LEN {
                return None;
            }
            listed(rest).filter(|base| *base > 0.0).map(|base| -base)
        })
    })?;
    (weight.abs() > f32::EPSILON).then_some(weight)
}

/// Weight of `word` or of the first listed base form it inflects.
fn listed(word: &str) -> Option<f32> {
    if let Some(&weight) = LEXICON.get(word) {
        return Some(weight);
    }
    base_forms(word)
        .iter()
        .find_map(|form| LEXICON.get(form.as_str()).copied())
}

/// Candidate base forms of `word`, most specific first.
fn base_forms(word: &str) -> Vec<String> {
    let mut forms = Vec::new();
    for (suffix, replacements) in SUFFIX_RULES {
        let Some(stem) = word.strip_suffix(suffix) else {
            continue;
        };
        for replacement in *replacements {
            forms.push(format!("{stem}{replacement}"));
        }
        // cutting -> cut, bigger -> big
        if let Some(undoubled) = undouble(stem) {
            forms.push(undoubled.to_string());
        }
    }
    forms.retain(|form| form.len() >= MIN_BASE_LEN);
    forms
}

fn undouble(stem: &str) -> Option<&str> {
    let mut chars = stem.chars().rev();
    let (last, prev) = (chars.next()?, chars.next()?);
    let doubled = last == prev && last.is_ascii_alphabetic() && !"aeiou".contains(last);
    doubled.then(|| &stem[..stem.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_file_is_well_formed() {
        let source = include_str!("../data/en-polarity.tsv");
        let entries = source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .count();
        // A shortfall means a malformed or duplicated line.
        assert_eq!(LEXICON.len(), entries);
        assert!(entries > 1000, "only {entries} entries");
        assert!(LEXICON.values().all(|w| (-1.0..=1.0).contains(w)));
        assert!(LEXICON.keys().all(|w| *w == w.to_lowercase() && !w.contains(' ')));
    }

    #[test]
    fn parse_lexicon_skips_comments_and_bad_lines() {
        let parsed = parse_lexicon("# header\n\ngood\t0.7\nbroken line\nbad\tx\nsad\t-0.5\n");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get("good"), Some(&0.7));
        assert_eq!(parsed.get("sad"), Some(&-0.5));
    }

    #[test]
    fn empty_string_is_neutral() {
        assert_eq!(polarity(""), 0.0);
        assert_eq!(analyze_sentiment("   "), Sentiment::Neutral);
    }

    #[test]
    fn unknown_text_is_neutral() {
        assert_eq!(polarity("the quick brown fox"), 0.0);
        assert_eq!(analyze_sentiment("the quick brown fox"), Sentiment::Neutral);
    }

    #[test]
    fn soaring_profits_are_positive() {
        assert_eq!(
            analyze_sentiment("Company profits soared this quarter"),
            Sentiment::Positive
        );
    }

    #[test]
    fn lawsuit_and_losses_are_negative() {
        assert_eq!(
            analyze_sentiment("Company faces massive lawsuit and losses"),
            Sentiment::Negative
        );
    }

    #[test]
    fn negation_flips_polarity() {
        assert!(polarity("results were good") > 0.0);
        assert!(polarity("results were not good") < 0.0);
        assert!(polarity("results weren't good") < 0.0);
    }

    #[test]
    fn negator_applies_to_next_scored_word_only() {
        // "not" is consumed by "bad"; "great" stays positive.
        let score = polarity("not bad, and a great quarter");
        assert!(score > 0.0, "expected positive score, got {score}");
    }

    #[test]
    fn intensifier_scales_weight() {
        assert!(polarity("very good") > polarity("good"));
        assert!(polarity("slightly good") < polarity("good"));
    }

    #[test]
    fn score_is_mean_of_matches() {
        // good (0.7) + bad (-0.7) → 0.0
        assert_eq!(polarity("good bad"), 0.0);
        assert_eq!(analyze_sentiment("good bad"), Sentiment::Neutral);
    }

    #[test]
    fn score_stays_in_range() {
        let score = polarity("extremely very excellent best wonderful");
        assert!(score <= 1.0 && score > 0.0, "got {score}");
        let score = polarity("extremely very terrible worst fraud");
        assert!(score >= -1.0 && score < 0.0, "got {score}");
    }

    #[test]
    fn punctuation_and_case_are_ignored() {
        assert!(polarity("GREAT!") > 0.0);
        assert!(polarity("(Lawsuit)") < 0.0);
    }

    #[test]
    fn everyday_news_vocabulary_is_scored() {
        assert_eq!(
            analyze_sentiment("Sales were disappointing this year"),
            Sentiment::Negative
        );
        assert_eq!(
            analyze_sentiment("Investors are worried about the merger"),
            Sentiment::Negative
        );
        assert_eq!(
            analyze_sentiment("Shares tumbled after the budget cut"),
            Sentiment::Negative
        );
        assert_eq!(
            analyze_sentiment("The stock jumped in early trading"),
            Sentiment::Positive
        );
    }

    #[test]
    fn comparatives_and_superlatives_follow_their_base() {
        assert!(polarity("The company posted higher revenue") > 0.0);
        assert!(polarity("The company posted lower revenue") < 0.0);
        assert!(polarity("happier") > 0.0);
        assert!(polarity("safest") > 0.0);
        assert!(polarity("stronger") > 0.0);
        assert!(polarity("weaker") < 0.0);
        assert!(polarity("lowest") < 0.0);
        assert_eq!(polarity("happiest"), polarity("happy"));
    }

    #[test]
    fn inflections_follow_their_base() {
        assert_eq!(polarity("jumped"), polarity("jump"));
        assert_eq!(polarity("cutting"), polarity("cut"));
        assert_eq!(polarity("banned"), polarity("ban"));
        assert_eq!(polarity("worries"), polarity("worry"));
        assert_eq!(polarity("terribly"), polarity("terrible"));
        assert!(polarity("struggling") < 0.0);
    }

    #[test]
    fn un_and_dis_prefixes_negate_positive_words() {
        assert_eq!(analyze_sentiment("Customers are unhappy with the service"), Sentiment::Negative);
        assert_eq!(polarity("unimpressive"), -polarity("impressive"));
        assert_eq!(polarity("disloyal"), -polarity("loyal"));
        assert!(polarity("uncompetitive") < 0.0);
        assert!(polarity("unhelpful") < 0.0);
    }

    #[test]
    fn prefixes_do_not_flip_unrelated_words() {
        // Listed un- words keep their own weight; a bare un/dis/non start is not
        // a negation.
        assert!(polarity("unbeaten") > 0.0);
        assert_eq!(polarity("union"), 0.0);
        assert_eq!(polarity("discount"), 0.0);
        assert_eq!(polarity("nonprofit"), 0.0);
    }

    #[test]
    fn zero_weight_entries_block_false_inflections() {
        assert_eq!(polarity("news"), 0.0);
        assert_eq!(polarity("goods"), 0.0);
        assert!(polarity("new") > 0.0);
        assert!(polarity("good") > 0.0);
    }

    #[test]
    fn possessive_is_stripped() {
        assert_eq!(polarity("Tesla's success"), polarity("success"));
        assert_eq!(polarity("Tesla\u{2019}s success"), polarity("success"));
    }

    #[test]
    fn scoring_is_deterministic() {
        let text = "Shares fell after the company reported strong growth but rising debt";
        assert_eq!(polarity(text), polarity(text));
    }
}
