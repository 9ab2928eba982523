//! NC Line Classifier
//!
//! Splits program text into physical lines and decides, per line, whether it
//! is noise (blank, comment) or a candidate command. Candidate lines are
//! normalized into uppercase word tokens.

/// Classification of one physical line of an NC program
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedLine {
    /// Blank or comment-only line
    Skip,
    /// Uppercased tokens, split on whitespace and commas
    Tokens(Vec<String>),
}

/// Classify a single line of NC text
pub fn classify_line(line: &str) -> ClassifiedLine {
    let line = line.trim();

    if line.is_empty() || line.starts_with(';') || line.starts_with('(') {
        return ClassifiedLine::Skip;
    }

    let tokens = tokenize(&strip_comments(line));
    if tokens.is_empty() {
        ClassifiedLine::Skip
    } else {
        ClassifiedLine::Tokens(tokens)
    }
}

/// One physical line of a program with its classification
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramLine<'a> {
    /// 1-based line number
    pub number: usize,
    /// Line as written, for diagnostics
    pub text: &'a str,
    pub classified: ClassifiedLine,
}

/// Classify every line of a program
pub fn classify_program(text: &str) -> impl Iterator<Item = ProgramLine<'_>> {
    text.lines().enumerate().map(|(idx, line)| ProgramLine {
        number: idx + 1,
        text: line,
        classified: classify_line(line),
    })
}

/// Remove trailing `;` comments and `( ... )` spans from a command line
fn strip_comments(line: &str) -> String {
    let mut code = String::with_capacity(line.len());
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            // Rest of line is comment
            ';' => break,

            // Unterminated parentheses run to end of line
            '(' => {
                for inner in chars.by_ref() {
                    if inner == ')' {
                        break;
                    }
                }
                code.push(' ');
            }

            c => code.push(c),
        }
    }

    code
}

fn tokenize(code: &str) -> Vec<String> {
    code.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|word| !word.is_empty())
        .map(|word| word.to_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        match classify_line(line) {
            ClassifiedLine::Tokens(tokens) => tokens,
            ClassifiedLine::Skip => panic!("Expected tokens for {:?}", line),
        }
    }

    #[test]
    fn test_blank_and_comment_lines_skip() {
        assert_eq!(classify_line(""), ClassifiedLine::Skip);
        assert_eq!(classify_line("   \t "), ClassifiedLine::Skip);
        assert_eq!(classify_line("; header"), ClassifiedLine::Skip);
        assert_eq!(classify_line("  (SHEET-3670)"), ClassifiedLine::Skip);
    }

    #[test]
    fn test_tokens_are_uppercased() {
        assert_eq!(tokens("g01 x10.5 y-2"), vec!["G01", "X10.5", "Y-2"]);
    }

    #[test]
    fn test_commas_separate_tokens() {
        assert_eq!(tokens("G01,X10, Y20"), vec!["G01", "X10", "Y20"]);
    }

    #[test]
    fn test_inline_comments_removed() {
        assert_eq!(tokens("G01 X10 ; feed slowly"), vec!["G01", "X10"]);
        assert_eq!(tokens("G00 (lead in) X5 Y5"), vec!["G00", "X5", "Y5"]);
        assert_eq!(tokens("G00 X1 (never closed"), vec!["G00", "X1"]);
    }

    #[test]
    fn test_residue_after_comment_stripping() {
        assert_eq!(classify_line("% (program start)"), ClassifiedLine::Tokens(vec!["%".to_string()]));
        assert_eq!(classify_line(", ,"), ClassifiedLine::Skip);
    }

    #[test]
    fn test_program_line_numbers_are_physical() {
        let lines: Vec<_> = classify_program("; a\n\nG00 X1\r\nG01 X2").collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[0].classified, ClassifiedLine::Skip);
        assert_eq!(lines[1].classified, ClassifiedLine::Skip);
        assert_eq!(lines[2].number, 3);
        assert_eq!(lines[2].text, "G00 X1");
        assert_eq!(
            lines[3],
            ProgramLine {
                number: 4,
                text: "G01 X2",
                classified: ClassifiedLine::Tokens(vec!["G01".to_string(), "X2".to_string()]),
            }
        );
    }
}
