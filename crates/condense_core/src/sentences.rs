//! Heuristic sentence boundary detection.
//!
//! A boundary is one whitespace character directly after `.`, `?` or `!`.
//! Two look-behind rules suppress it:
//! - `x.y.` style abbreviations (word, period, word, terminator), e.g. `e.g.`, `U.S.`
//! - titles and initials made of one uppercase and one lowercase letter, e.g. `Dr.`, `Mr.`
//!
//! Anything else ending in a period (`Mrs.`, `etc.`) still splits. That is a
//! known limitation of the heuristic.

/// Splits `text` into trimmed, non-empty sentences in document order.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    for (pos, &(offset, ch)) in chars.iter().enumerate() {
        if !ch.is_whitespace() || !is_boundary(&chars, pos) {
            continue;
        }
        push_trimmed(&mut sentences, &text[start..offset]);
        start = offset + ch.len_utf8();
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn is_boundary(chars: &[(usize, char)], pos: usize) -> bool {
    let before = |back: usize| pos.checked_sub(back).map(|i| chars[i].1);

    if !matches!(before(1), Some('.' | '?' | '!')) {
        return false;
    }

    if let (Some(a), Some('.'), Some(b)) = (before(4), before(3), before(2)) {
        if is_word(a) && is_word(b) {
            return false;
        }
    }

    if let (Some(upper), Some(lower), Some('.')) = (before(3), before(2), before(1)) {
        if upper.is_ascii_uppercase() && lower.is_ascii_lowercase() {
            return false;
        }
    }

    true
}

fn is_word(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_title_abbreviation_inside_sentence() {
        let sentences = split_sentences("Dr. Smith went home. He was tired. It was late.");
        assert_eq!(
            sentences,
            vec!["Dr. Smith went home.", "He was tired.", "It was late."]
        );
    }

    #[test]
    fn question_and_exclamation_end_sentences() {
        let sentences = split_sentences("Is it late? Yes! Go home.");
        assert_eq!(sentences, vec!["Is it late?", "Yes!", "Go home."]);
    }

    #[test]
    fn dotted_abbreviations_do_not_split() {
        let sentences = split_sentences("Prices rose in the U.S. economy. Tea, e.g. green, fell.");
        assert_eq!(
            sentences,
            vec!["Prices rose in the U.S. economy.", "Tea, e.g. green, fell."]
        );
    }

    #[test]
    fn uncovered_abbreviations_still_split() {
        let sentences = split_sentences("Mrs. Jones left.");
        assert_eq!(sentences, vec!["Mrs.", "Jones left."]);
    }

    #[test]
    fn empty_and_blank_text_have_no_sentences() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n\t ").is_empty());
    }

    #[test]
    fn text_without_terminator_is_one_sentence() {
        assert_eq!(split_sentences("  no period here  "), vec!["no period here"]);
    }

    #[test]
    fn only_one_whitespace_is_consumed_per_boundary() {
        let sentences = split_sentences("One.\n\nTwo.  Three.");
        assert_eq!(sentences, vec!["One.", "Two.", "Three."]);
    }

    #[test]
    fn handles_multibyte_text() {
        let sentences = split_sentences("Привет мир. Как дела? Всё хорошо!");
        assert_eq!(sentences, vec!["Привет мир.", "Как дела?", "Всё хорошо!"]);
    }
}
