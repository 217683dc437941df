//! Line-by-line interleaving of an original text with its translation. This is
//! the one genuinely algorithmic piece of the notebook: everything else in the
//! crate shuffles the combined text this module produces. Keeping it a pure
//! function with no store or clipboard access means both the form flow and the
//! snapshot loader can call it without dragging in any environment.

use thiserror::Error;

/// The translated text ran out of lines before the original did. Each original
/// line needs a translation at the same index, so this is a hard error for the
/// single alignment call; callers recover by asking the user to fix the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("translated text has {translated} line(s) but the original has {original}")]
pub struct MisalignedInputError {
    /// Line count of the original text.
    pub original: usize,
    /// Line count of the translated text.
    pub translated: usize,
}

/// Interleave `original` and `translated` into one bilingual transcript.
///
/// Both inputs are split on `\n`, keeping interior empty lines and dropping
/// only the empty segment after a trailing newline. For every original line we
/// emit the original line, the translated line at the same index, and one
/// blank separator line. Extra trailing translated lines are dropped silently;
/// too few translated lines is a [`MisalignedInputError`] instead of an
/// out-of-range access.
///
/// `align("Hello\nWorld", "Bonjour\nMonde")` yields
/// `"Hello\nBonjour\n\nWorld\nMonde\n\n"`.
pub fn align(original: &str, translated: &str) -> Result<String, MisalignedInputError> {
    let original_lines: Vec<&str> = original.lines().collect();
    let translated_lines: Vec<&str> = translated.lines().collect();

    if translated_lines.len() < original_lines.len() {
        return Err(MisalignedInputError {
            original: original_lines.len(),
            translated: translated_lines.len(),
        });
    }

    let mut combined = String::with_capacity(original.len() + translated.len());
    for (index, line) in original_lines.iter().enumerate() {
        combined.push_str(line);
        combined.push('\n');
        combined.push_str(translated_lines[index]);
        combined.push('\n');
        combined.push('\n');
    }

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaves_matching_line_counts() {
        let combined = align("Hello\nWorld", "Bonjour\nMonde").unwrap();
        assert_eq!(combined, "Hello\nBonjour\n\nWorld\nMonde\n\n");
    }

    #[test]
    fn empty_inputs_yield_empty_output() {
        assert_eq!(align("", "").unwrap(), "");
    }

    #[test]
    fn trailing_newline_does_not_add_a_phantom_line() {
        let combined = align("Hello\n", "Bonjour\n").unwrap();
        assert_eq!(combined, "Hello\nBonjour\n\n");
    }

    #[test]
    fn interior_blank_lines_are_paired_like_any_other_line() {
        let combined = align("a\n\nb", "x\n\ny").unwrap();
        assert_eq!(combined, "a\nx\n\n\n\n\nb\ny\n\n");
    }

    #[test]
    fn extra_translated_lines_are_dropped() {
        let combined = align("one", "uno\ndos\ntres").unwrap();
        assert_eq!(combined, "one\nuno\n\n");
    }

    #[test]
    fn short_translation_is_a_misalignment_error() {
        let err = align("A\nB", "a").unwrap_err();
        assert_eq!(
            err,
            MisalignedInputError {
                original: 2,
                translated: 1
            }
        );
    }

    #[test]
    fn block_structure_holds_for_every_index() {
        let original = "first\nsecond\nthird";
        let translated = "premier\ndeuxieme\ntroisieme";
        let combined = align(original, translated).unwrap();

        let blocks: Vec<&str> = combined.split("\n\n").filter(|b| !b.is_empty()).collect();
        assert_eq!(blocks.len(), 3);
        for (i, block) in blocks.iter().enumerate() {
            let mut lines = block.lines();
            assert_eq!(lines.next(), original.lines().nth(i));
            assert_eq!(lines.next(), translated.lines().nth(i));
            assert_eq!(lines.next(), None);
        }
    }
}
