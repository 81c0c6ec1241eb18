//! Text preprocessing for the synthetic voice.
//!
//! Answers come back lightly formatted (bold, bullets, the odd emoji). Local
//! engines read those symbols aloud, so they are stripped before speaking.

/// Strip markdown-ish formatting and emoji, producing plain speakable text.
///
/// Handles:
/// - Headers (`# …`) and blockquotes (`> …`) → text only
/// - Bullet / numbered list markers → removed
/// - Links `[text](url)` → text only
/// - Emphasis / code markers (`*`, `_`, `` ` ``, `~`) → removed
/// - Pictographic emoji → removed
/// - Runs of whitespace → single spaces
#[must_use]
pub fn clean_for_speech(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for line in text.lines() {
        let processed = strip_line_markdown(line);
        let processed = processed.trim();
        if processed.is_empty() {
            continue;
        }
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(processed);
    }

    collapse_whitespace(&result)
}

fn strip_line_markdown(line: &str) -> String {
    let mut s = line.trim_start();

    while let Some(rest) = s.strip_prefix('>') {
        s = rest.trim_start();
    }
    s = s.trim_start_matches('#').trim_start();
    s = strip_list_marker(s);

    strip_links(s)
        .chars()
        .filter(|&c| !matches!(c, '*' | '_' | '`' | '~' | '#') && !is_pictograph(c))
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    for marker in ["- ", "* ", "+ ", "• "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return rest;
        }
    }

    // Numbered: "1. " / "12) "
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return rest;
        }
    }
    line
}

/// `[text](url)` → `text`.
fn strip_links(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find("](") else {
            break;
        };
        let after_label = &after_open[close + 2..];
        let Some(end) = after_label.find(')') else {
            break;
        };
        result.push_str(&rest[..open]);
        result.push_str(&after_open[..close]);
        rest = &after_label[end + 1..];
    }

    result.push_str(rest);
    result
}

const fn is_pictograph(c: char) -> bool {
    matches!(c as u32,
        0x1F300..=0x1FAFF // emoji & pictographs
        | 0x2600..=0x27BF // misc symbols, dingbats
        | 0xFE0F          // variation selector
        | 0x200D          // zero-width joiner
    )
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_emphasis_and_headers() {
        assert_eq!(
            clean_for_speech("## Mars\n**Mars** is the _red_ planet!"),
            "Mars Mars is the red planet!"
        );
    }

    #[test]
    fn strips_list_markers() {
        assert_eq!(
            clean_for_speech("Fun facts:\n- It has two moons\n2. It has dust storms"),
            "Fun facts: It has two moons It has dust storms"
        );
    }

    #[test]
    fn keeps_link_text() {
        assert_eq!(
            clean_for_speech("See [NASA](https://nasa.gov) for more."),
            "See NASA for more."
        );
    }

    #[test]
    fn removes_emoji() {
        assert_eq!(
            clean_for_speech("Blast off! 🚀 Saturn has rings ✨"),
            "Blast off! Saturn has rings"
        );
    }

    #[test]
    fn keeps_plain_numbers() {
        assert_eq!(
            clean_for_speech("2024 was a great year for comets."),
            "2024 was a great year for comets."
        );
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(clean_for_speech("  \n **  ** \n"), "");
    }
}
