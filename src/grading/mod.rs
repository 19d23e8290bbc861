//! Answer normalization and grading.
//!
//! Question banks store correct answers in heterogeneous shapes: bare letters
//! ("A"), punctuated letters ("A:" / "A."), or full option text. Everything is
//! normalized to a canonical set of letters keyed by option position (index 0
//! is 'A') before comparison. All functions here are pure and never fail:
//! malformed answer data degrades to an empty set or an incorrect verdict,
//! never an error. Grading must produce a boolean for every input shape a
//! bank can throw at it.

use std::collections::BTreeSet;

use log::warn;

use crate::models::AnswerSpec;

/// Display text used when no correct answer could be resolved.
const UNKNOWN_ANSWER: &str = "Unknown";

/// Outcome of grading one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub is_correct: bool,
    /// Human-readable rendering of the correct answer, for the result screen.
    pub correct_display: String,
}

fn letter_for_index(index: usize) -> char {
    (b'A' + index as u8) as char
}

fn index_for_letter(letter: char) -> usize {
    (letter as u8 - b'A') as usize
}

fn is_valid_letter(c: char, option_count: usize) -> bool {
    c.is_ascii_uppercase() && index_for_letter(c) < option_count
}

/// Normalize an answer spec to a canonical set of letters, e.g. {'A', 'C'}.
///
/// Per item, first match wins: leading letter within range, exact option
/// text, or a leading token like "A:" / "B." with the punctuation stripped.
/// Items matching none of the rules are dropped; an unresolvable spec yields
/// the empty set. Normalizing an already-normalized letter set is a no-op.
pub fn normalize_answer_letters(options: &[String], spec: &AnswerSpec) -> BTreeSet<char> {
    let mut letters = BTreeSet::new();

    for raw in spec.items() {
        let s = raw.trim();
        if s.is_empty() {
            continue;
        }

        // Leading letter, possibly followed by ':' or '.'.
        let first = s.chars().next().map(|c| c.to_ascii_uppercase());
        if let Some(c) = first {
            if is_valid_letter(c, options.len()) {
                letters.insert(c);
                continue;
            }
        }

        // Exact option text.
        if let Some(idx) = options.iter().position(|opt| opt.trim() == s) {
            letters.insert(letter_for_index(idx));
            continue;
        }

        // First whitespace token with trailing punctuation stripped.
        if let Some(token) = s.split_whitespace().next() {
            let token = token.trim_end_matches(['.', ':']).to_ascii_uppercase();
            let mut chars = token.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if is_valid_letter(c, options.len()) {
                    letters.insert(c);
                    continue;
                }
            }
        }

        warn!("answer item {:?} matches no option letter or text; ignoring", raw);
    }

    letters
}

/// Render a letter set for display: `"A. Enable X, C. Monitor Z"`.
///
/// Letters always come out in ascending order regardless of how the set was
/// built; out-of-range letters are emitted bare.
pub fn format_correct_answer(options: &[String], letters: &BTreeSet<char>) -> String {
    if letters.is_empty() {
        return UNKNOWN_ANSWER.to_string();
    }

    letters
        .iter()
        .map(|&letter| match options.get(index_for_letter(letter)) {
            Some(text) => format!("{}. {}", letter, text),
            None => letter.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Grade a letter selection against the stored answer spec.
///
/// Correctness is exact set equality; there is no partial credit, so both
/// extra and missing selections fail. When the spec resolves to no letters at
/// all (free-text answers not present among the options) the comparison falls
/// back to option text.
pub fn grade_selection(
    options: &[String],
    spec: &AnswerSpec,
    selected_letters: &BTreeSet<char>,
) -> Verdict {
    let correct_letters = normalize_answer_letters(options, spec);
    if !correct_letters.is_empty() {
        return Verdict {
            is_correct: *selected_letters == correct_letters,
            correct_display: format_correct_answer(options, &correct_letters),
        };
    }

    warn!("answer spec resolved to no letters; falling back to text comparison");

    let selected_texts: BTreeSet<&str> = selected_letters
        .iter()
        .filter_map(|&letter| options.get(index_for_letter(letter)))
        .map(|s| s.as_str())
        .collect();
    let correct_texts: BTreeSet<&str> = spec.items().iter().map(|s| s.as_str()).collect();

    let is_correct = selected_texts == correct_texts;

    // No letter rendering is possible here; show the raw values as stored.
    let correct_display = spec.items().to_vec().join(", ");

    Verdict {
        is_correct,
        correct_display,
    }
}

/// Grade a yes/no-multi submission.
///
/// The expected answers form an ordered sequence, one per statement, so this
/// is positional equality (trimmed, case-insensitive), unlike the set-based
/// standard path. The display never uses letters; yes/no tokens are not
/// indexed distractors.
pub fn grade_yes_no_multi(expected: &[String], selected: &[String]) -> Verdict {
    let canon = |s: &String| s.trim().to_lowercase();
    let is_correct = expected.len() == selected.len()
        && expected
            .iter()
            .map(canon)
            .eq(selected.iter().map(canon));

    Verdict {
        is_correct,
        correct_display: expected.to_vec().join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(opts: &[&str]) -> Vec<String> {
        opts.iter().map(|s| s.to_string()).collect()
    }

    fn letters(s: &str) -> BTreeSet<char> {
        s.chars().collect()
    }

    fn spec(items: &[&str]) -> AnswerSpec {
        AnswerSpec::from(items.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn normalize_accepts_letters_punctuation_and_texts() {
        let opts = options(&["Enable X", "Disable Y", "Monitor Z", "Audit W"]);

        assert_eq!(normalize_answer_letters(&opts, &spec(&["A", "B"])), letters("AB"));
        assert_eq!(normalize_answer_letters(&opts, &spec(&["A:", "B:"])), letters("AB"));
        assert_eq!(normalize_answer_letters(&opts, &spec(&["A.", "B."])), letters("AB"));
        assert_eq!(
            normalize_answer_letters(&opts, &spec(&["Enable X", "Monitor Z"])),
            letters("AC")
        );
    }

    #[test]
    fn leading_letter_rule_wins_over_text_match() {
        // "Disable Y" starts with 'D', a valid letter for four options, so
        // the leading-letter rule resolves it to D before the text rule can
        // map it to B. Resolution order is first match wins.
        let opts = options(&["Enable X", "Disable Y", "Monitor Z", "Audit W"]);
        assert_eq!(
            normalize_answer_letters(&opts, &spec(&["Disable Y"])),
            letters("D")
        );
    }

    #[test]
    fn normalize_single_letter_forms_are_equivalent() {
        let opts = options(&["one", "two", "three"]);
        for form in ["A", "A:", "A.", " A ", "a"] {
            assert_eq!(
                normalize_answer_letters(&opts, &AnswerSpec::from(form)),
                letters("A"),
                "form {:?}",
                form
            );
        }
    }

    #[test]
    fn normalize_exact_text_maps_to_position() {
        let opts = options(&["first", "second", "third"]);
        assert_eq!(
            normalize_answer_letters(&opts, &AnswerSpec::from("third")),
            letters("C")
        );
        // Option text comparison is trimmed on both sides.
        assert_eq!(
            normalize_answer_letters(&options(&["first ", " second"]), &AnswerSpec::from("second")),
            letters("B")
        );
    }

    #[test]
    fn normalize_empty_and_missing_yield_empty_set() {
        let opts = options(&["a", "b"]);
        assert!(normalize_answer_letters(&opts, &AnswerSpec::default()).is_empty());
        assert!(normalize_answer_letters(&opts, &spec(&[])).is_empty());
        assert!(normalize_answer_letters(&opts, &spec(&["", "  "])).is_empty());
    }

    #[test]
    fn normalize_drops_unmatched_items_silently() {
        let opts = options(&["one", "two"]);
        assert_eq!(
            normalize_answer_letters(&opts, &spec(&["A", "not an option", "Z"])),
            letters("A")
        );
    }

    #[test]
    fn normalize_rejects_letters_beyond_option_count() {
        let opts = options(&["one", "two"]);
        assert!(normalize_answer_letters(&opts, &AnswerSpec::from("C")).is_empty());
        assert_eq!(normalize_answer_letters(&opts, &AnswerSpec::from("B")), letters("B"));
    }

    #[test]
    fn normalize_is_idempotent() {
        let opts = options(&["w", "x", "y", "z"]);
        let first = normalize_answer_letters(&opts, &spec(&["B.", "d", "x"]));
        let as_spec = AnswerSpec::from(first.iter().map(|c| c.to_string()).collect::<Vec<_>>());
        assert_eq!(normalize_answer_letters(&opts, &as_spec), first);
    }

    #[test]
    fn normalize_collapses_duplicates() {
        let opts = options(&["one", "two"]);
        assert_eq!(
            normalize_answer_letters(&opts, &spec(&["A", "A:", "one"])),
            letters("A")
        );
    }

    #[test]
    fn format_empty_set_is_unknown() {
        assert_eq!(format_correct_answer(&options(&["a"]), &BTreeSet::new()), "Unknown");
    }

    #[test]
    fn format_emits_ascending_letters_with_text() {
        let opts = options(&["Enable X", "Disable Y", "Monitor Z"]);
        // BTreeSet iteration is ascending no matter the insertion order.
        let set: BTreeSet<char> = "CA".chars().collect();
        assert_eq!(
            format_correct_answer(&opts, &set),
            "A. Enable X, C. Monitor Z"
        );
    }

    #[test]
    fn format_out_of_range_letter_is_bare() {
        let opts = options(&["only"]);
        let set: BTreeSet<char> = "AD".chars().collect();
        assert_eq!(format_correct_answer(&opts, &set), "A. only, D");
    }

    #[test]
    fn grade_exact_match_succeeds() {
        let opts = options(&["Enable X", "Disable Y", "Monitor Z", "Audit W"]);
        let verdict = grade_selection(&opts, &spec(&["A", "B"]), &letters("AB"));
        assert!(verdict.is_correct);
        assert_eq!(verdict.correct_display, "A. Enable X, B. Disable Y");
    }

    #[test]
    fn grade_all_four_required_and_selected() {
        // Banks sometimes store options themselves as letter-like strings.
        let opts = options(&["A:", "B:", "C:", "D:"]);
        let verdict = grade_selection(&opts, &spec(&["A:", "B:", "C:", "D:"]), &letters("ABCD"));
        assert!(verdict.is_correct);
    }

    #[test]
    fn grade_missing_one_selection_fails() {
        let opts = options(&["Option 1", "Option 2", "Option 3", "Option 4"]);
        let verdict = grade_selection(&opts, &spec(&["A", "B", "C", "D"]), &letters("ABC"));
        assert!(!verdict.is_correct);
    }

    #[test]
    fn grade_extra_selection_fails() {
        let opts = options(&["Option 1", "Option 2", "Option 3"]);
        let verdict = grade_selection(&opts, &spec(&["A"]), &letters("AB"));
        assert!(!verdict.is_correct);
    }

    #[test]
    fn grade_falls_back_to_text_comparison() {
        // Free-text answers not present among the options resolve to no
        // letters, so grading compares mapped option texts instead.
        let opts = options(&["left", "right"]);
        let free_text = spec(&["neither of these"]);

        let verdict = grade_selection(&opts, &free_text, &BTreeSet::new());
        assert!(!verdict.is_correct);
        assert_eq!(verdict.correct_display, "neither of these");

        let verdict = grade_selection(&opts, &free_text, &letters("A"));
        assert!(!verdict.is_correct);
    }

    #[test]
    fn grade_empty_spec_with_empty_selection_is_vacuously_correct() {
        let opts = options(&["a", "b"]);
        let verdict = grade_selection(&opts, &AnswerSpec::default(), &BTreeSet::new());
        assert!(verdict.is_correct);
        assert_eq!(verdict.correct_display, "");
    }

    #[test]
    fn yes_no_multi_is_positional_and_case_insensitive() {
        let expected = vec!["Yes".to_string(), "No".to_string(), "Yes".to_string()];

        let selected = vec!["yes".to_string(), " no ".to_string(), "YES".to_string()];
        assert!(grade_yes_no_multi(&expected, &selected).is_correct);

        let reordered = vec!["no".to_string(), "yes".to_string(), "yes".to_string()];
        assert!(!grade_yes_no_multi(&expected, &reordered).is_correct);
    }

    #[test]
    fn yes_no_multi_length_mismatch_fails() {
        let expected = vec!["Yes".to_string(), "No".to_string()];
        let selected = vec!["Yes".to_string()];
        assert!(!grade_yes_no_multi(&expected, &selected).is_correct);
    }

    #[test]
    fn yes_no_multi_displays_raw_values() {
        let expected = vec!["Yes".to_string(), "No".to_string()];
        let verdict = grade_yes_no_multi(&expected, &[]);
        assert_eq!(verdict.correct_display, "Yes, No");
    }

    #[test]
    fn grading_is_deterministic() {
        let opts = options(&["one", "two", "three"]);
        let s = spec(&["A", "C"]);
        let sel = letters("AC");
        assert_eq!(grade_selection(&opts, &s, &sel), grade_selection(&opts, &s, &sel));
    }
}
