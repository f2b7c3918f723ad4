//! Small text helpers shared by the classifier, recoverer and assembler

/// Collapse internal whitespace runs to a single space and trim the ends
pub fn clean_line(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of alphabetic characters (any script)
pub fn letter_count(s: &str) -> usize {
    s.chars().filter(|c| c.is_alphabetic()).count()
}

/// True when `s` contains at least one alphabetic character
pub fn has_letter(s: &str) -> bool {
    s.chars().any(char::is_alphabetic)
}

/// Split a capture file into captures: blocks of non-blank lines separated
/// by one or more blank lines
pub fn split_captures(content: &str) -> Vec<Vec<String>> {
    let mut captures = Vec::new();
    let mut current = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                captures.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.to_string());
        }
    }
    if !current.is_empty() {
        captures.push(current);
    }

    captures
}
