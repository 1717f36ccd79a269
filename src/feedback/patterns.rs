//! Rule-based error detection.
//!
//! Each sentence is checked against two fixed tables, first hit wins:
//!
//! 1. [`COMMON_ERRORS`] — case-insensitive substrings with a known fix.
//! 2. [`GRAMMAR_RULES`] — regexes that flag a problem but cannot fix it
//!    (only consulted when the request is *detailed*).
//!
//! When no sentence is flagged at all, one sentence is picked at random and
//! reported as correct usage so the learner always sees an example.

use std::sync::OnceLock;

use rand::Rng;
use regex::{NoExpand, Regex};

use super::types::Correction;

/// Rule name of the "nothing wrong here" fallback correction.
pub const CORRECT_USAGE: &str = "Correct Usage";
/// Rule name shared by every spelling entry of [`COMMON_ERRORS`].
pub const SPELLING: &str = "Spelling";

const CORRECT_USAGE_EXPLANATION: &str =
    "This sentence is well-formed. Keep using structures like this one.";

// ---------------------------------------------------------------------------
// Common-error table
// ---------------------------------------------------------------------------

/// Broad category of a common error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Grammar,
    Spelling,
}

impl ErrorCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::Grammar => "Grammar",
            ErrorCategory::Spelling => "Spelling",
        }
    }
}

/// A frequent learner mistake with a mechanical fix.
pub struct CommonError {
    /// Lowercase pattern matched case-insensitively.
    pub pattern: &'static str,
    pub category: ErrorCategory,
    pub replacement: &'static str,
    pub rule: &'static str,
}

pub static COMMON_ERRORS: &[CommonError] = &[
    CommonError {
        pattern: " i ",
        category: ErrorCategory::Grammar,
        replacement: " I ",
        rule: "Capitalization",
    },
    CommonError {
        pattern: "your welcome",
        category: ErrorCategory::Grammar,
        replacement: "you're welcome",
        rule: "Possessive vs. Contraction",
    },
    CommonError {
        pattern: "its a ",
        category: ErrorCategory::Grammar,
        replacement: "it's a ",
        rule: "Possessive vs. Contraction",
    },
    CommonError {
        pattern: "could of",
        category: ErrorCategory::Grammar,
        replacement: "could have",
        rule: "Modal Verb Form",
    },
    CommonError {
        pattern: "should of",
        category: ErrorCategory::Grammar,
        replacement: "should have",
        rule: "Modal Verb Form",
    },
    CommonError {
        pattern: "more then",
        category: ErrorCategory::Grammar,
        replacement: "more than",
        rule: "Comparison",
    },
    CommonError {
        pattern: "alot",
        category: ErrorCategory::Spelling,
        replacement: "a lot",
        rule: SPELLING,
    },
    CommonError {
        pattern: "recieve",
        category: ErrorCategory::Spelling,
        replacement: "receive",
        rule: SPELLING,
    },
    CommonError {
        pattern: "definately",
        category: ErrorCategory::Spelling,
        replacement: "definitely",
        rule: SPELLING,
    },
    CommonError {
        pattern: "seperate",
        category: ErrorCategory::Spelling,
        replacement: "separate",
        rule: SPELLING,
    },
];

impl CommonError {
    fn explanation(&self) -> String {
        format!(
            "{} error: use \"{}\" instead of \"{}\".",
            self.category.label(),
            self.replacement.trim(),
            self.pattern.trim()
        )
    }

    /// Case-insensitive replacer: framing spaces in the pattern become word
    /// boundaries, so adjacent occurrences ("i i") are all rewritten.
    fn replacer(&self) -> String {
        let lead = if self.pattern.starts_with(' ') { r"\b" } else { "" };
        let tail = if self.pattern.ends_with(' ') { r"\b" } else { "" };
        format!("(?i){lead}{}{tail}", regex::escape(self.pattern.trim()))
    }
}

/// Case-insensitive replacers, one per [`COMMON_ERRORS`] entry.
fn common_error_regexes() -> &'static [Regex] {
    static REGEXES: OnceLock<Vec<Regex>> = OnceLock::new();
    REGEXES.get_or_init(|| {
        COMMON_ERRORS
            .iter()
            .map(|e| Regex::new(&e.replacer()).expect("escaped literal is a valid regex"))
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Grammar-rule table
// ---------------------------------------------------------------------------

/// A grammar rule detected by regex; reported without an automatic fix.
pub struct GrammarRule {
    pub name: &'static str,
    pub pattern: &'static str,
    pub explanation: &'static str,
}

pub static GRAMMAR_RULES: &[GrammarRule] = &[
    GrammarRule {
        name: "Subject-Verb Agreement",
        pattern: r"(?i)\b(he|she|it)\s+(have|do|are|were|go|like|want|need|don't)\b",
        explanation: "Third-person singular subjects take the -s verb form (he has, she goes, it doesn't).",
    },
    GrammarRule {
        name: "Article Usage",
        pattern: r"(?i)\ba\s+[aeiou]\w*",
        explanation: "Use \"an\" before words that start with a vowel sound.",
    },
    GrammarRule {
        name: "Capitalization",
        pattern: r"^[a-z]",
        explanation: "Start every sentence with a capital letter.",
    },
    GrammarRule {
        name: "Verb Tense Consistency",
        pattern: r"(?i)\b(yesterday|last\s+(night|week|month|year))\b.*\b(go|eat|see|buy|is|are|do|have)\b",
        explanation: "Past time expressions need past-tense verbs (went, ate, saw, was).",
    },
    GrammarRule {
        name: "Preposition Usage",
        pattern: r"(?i)\b(depends?\s+of|interested\s+(on|about)|married\s+with|arrived?\s+to)\b",
        explanation: "Check the preposition: depend on, interested in, married to, arrive at/in.",
    },
    GrammarRule {
        name: "Double Negative",
        pattern: r"(?i)\b(don't|doesn't|didn't|can't|won't|not)\s+(\w+\s+)?(nothing|nobody|nowhere|none|never)\b",
        explanation: "Avoid two negatives in one clause; use \"anything\", \"anybody\" or \"ever\" instead.",
    },
    GrammarRule {
        name: "Comma Splice",
        pattern: r"(?i),\s*(i|you|he|she|it|we|they)\s+(am|is|are|was|were|have|has|will|can)\b",
        explanation: "Two complete sentences joined by a comma: use a period, a semicolon, or a conjunction.",
    },
    GrammarRule {
        name: "Possessive Apostrophe",
        pattern: r"(?i)\b(it's|they're)\s+(own|name|tail|color|colour|house|car)\b",
        explanation: "Use the possessive form (its, their) before a noun, not the contraction.",
    },
];

fn grammar_rule_regexes() -> &'static [Regex] {
    static REGEXES: OnceLock<Vec<Regex>> = OnceLock::new();
    REGEXES.get_or_init(|| {
        GRAMMAR_RULES
            .iter()
            .map(|r| Regex::new(r.pattern).expect("grammar rule patterns are valid"))
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Produce at most one [`Correction`] per sentence, in sentence order.
///
/// `rng` only decides which sentence carries the correct-usage fallback.
pub fn match_errors<R: Rng + ?Sized>(
    sentences: &[String],
    detailed: bool,
    rng: &mut R,
) -> Vec<Correction> {
    let mut corrections: Vec<Correction> = sentences
        .iter()
        .filter_map(|sentence| match_sentence(sentence, detailed))
        .collect();

    if corrections.is_empty() && !sentences.is_empty() {
        let pick = &sentences[rng.gen_range(0..sentences.len())];
        log::debug!("feedback: no errors found, highlighting {pick:?} as correct usage");
        corrections.push(Correction {
            original: pick.clone(),
            corrected: pick.clone(),
            explanation: CORRECT_USAGE_EXPLANATION.to_string(),
            rule: Some(CORRECT_USAGE.to_string()),
        });
    }

    corrections
}

/// Check one sentence against both tables.
pub fn match_sentence(sentence: &str, detailed: bool) -> Option<Correction> {
    // Frame with spaces so word patterns such as " i " also hit at the edges.
    let framed = format!(" {sentence} ");
    let lowered = framed.to_lowercase();

    let common = COMMON_ERRORS
        .iter()
        .zip(common_error_regexes())
        .find(|(entry, _)| lowered.contains(entry.pattern));

    if let Some((entry, re)) = common {
        let corrected = re.replace_all(&framed, NoExpand(entry.replacement.trim()));
        return Some(Correction {
            original: sentence.to_string(),
            corrected: corrected.trim_end().to_string(),
            explanation: entry.explanation(),
            rule: Some(entry.rule.to_string()),
        });
    }

    if !detailed {
        return None;
    }

    GRAMMAR_RULES
        .iter()
        .zip(grammar_rule_regexes())
        .find(|(_, re)| re.is_match(sentence))
        .map(|(rule, _)| Correction {
            original: sentence.to_string(),
            corrected: sentence.to_string(),
            explanation: rule.explanation.to_string(),
            rule: Some(rule.name.to_string()),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sentences(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn tables_have_expected_sizes() {
        assert_eq!(COMMON_ERRORS.len(), 10);
        assert_eq!(GRAMMAR_RULES.len(), 8);
        assert_eq!(common_error_regexes().len(), COMMON_ERRORS.len());
        assert_eq!(grammar_rule_regexes().len(), GRAMMAR_RULES.len());
    }

    #[test]
    fn lowercase_i_is_capitalised() {
        let c = match_sentence("i like coffee", false).expect("flagged");
        assert_eq!(c.rule.as_deref(), Some("Capitalization"));
        assert!(c.corrected.contains(" I "));
        assert_eq!(c.original, "i like coffee");
    }

    #[test]
    fn repeated_lowercase_i_is_fully_capitalised() {
        let c = match_sentence("so i i think", false).expect("flagged");
        assert_eq!(c.corrected, " so I I think");
    }

    #[test]
    fn its_a_keeps_surrounding_spacing() {
        let c = match_sentence("Its a nice day", false).expect("flagged");
        assert_eq!(c.corrected, " it's a nice day");
    }

    #[test]
    fn your_welcome_is_fixed_case_insensitively() {
        let c = match_sentence("Your welcome to join", false).expect("flagged");
        assert_eq!(c.rule.as_deref(), Some("Possessive vs. Contraction"));
        assert!(c.corrected.contains("you're welcome"));
        assert!(c.explanation.starts_with("Grammar error"));
    }

    #[test]
    fn every_occurrence_is_replaced() {
        let c = match_sentence("We recieve mail and Recieve parcels", false).expect("flagged");
        assert_eq!(c.rule.as_deref(), Some(SPELLING));
        assert!(!c.corrected.to_lowercase().contains("recieve"));
        assert_eq!(c.corrected.matches("receive").count(), 2);
        assert!(c.explanation.starts_with("Spelling error"));
    }

    #[test]
    fn common_table_wins_over_grammar_rules() {
        // Starts lowercase (Capitalization rule) but "alot" is found first.
        let c = match_sentence("thanks alot", true).expect("flagged");
        assert_eq!(c.rule.as_deref(), Some(SPELLING));
    }

    #[test]
    fn grammar_rules_only_run_when_detailed() {
        assert!(match_sentence("He have a dog", false).is_none());

        let c = match_sentence("He have a dog", true).expect("flagged");
        assert_eq!(c.rule.as_deref(), Some("Subject-Verb Agreement"));
        assert_eq!(c.corrected, c.original);
    }

    #[test]
    fn each_grammar_rule_fires() {
        let cases = [
            ("She go to school every day", "Subject-Verb Agreement"),
            ("We ate a apple", "Article Usage"),
            ("the weather is nice", "Capitalization"),
            ("Yesterday we go to the park", "Verb Tense Consistency"),
            ("It depends of the weather", "Preposition Usage"),
            ("We don't need nothing", "Double Negative"),
            ("It was late, we were tired", "Comma Splice"),
            ("The dog wagged it's tail", "Possessive Apostrophe"),
        ];
        for (text, rule) in cases {
            let c = match_sentence(text, true).unwrap_or_else(|| panic!("{text} not flagged"));
            assert_eq!(c.rule.as_deref(), Some(rule), "{text}");
        }
    }

    #[test]
    fn one_correction_per_sentence_in_order() {
        let input = sentences(&["thanks alot", "Fine day", "We could of won"]);
        let found = match_errors(&input, false, &mut rng());
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].original, "thanks alot");
        assert_eq!(found[1].original, "We could of won");
        assert_eq!(found[1].rule.as_deref(), Some("Modal Verb Form"));
    }

    #[test]
    fn clean_text_gets_single_correct_usage_entry() {
        let input = sentences(&["The sky is blue", "Birds can fly"]);
        let found = match_errors(&input, true, &mut rng());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rule.as_deref(), Some(CORRECT_USAGE));
        assert_eq!(found[0].corrected, found[0].original);
        assert!(input.contains(&found[0].original));
    }

    #[test]
    fn no_sentences_no_corrections() {
        assert!(match_errors(&[], true, &mut rng()).is_empty());
    }
}
