use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Truncates `text` to at most `max_width` terminal columns, appending an
/// ellipsis when anything was cut. Width-aware so wide glyphs do not overflow
/// the cell budget.
pub(crate) fn truncate_text(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    let budget = max_width - 1;
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > budget {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::truncate_text;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_text("breakfast", 21), "breakfast");
        assert_eq!(truncate_text("breakfast", 9), "breakfast");
    }

    #[test]
    fn long_text_gets_an_ellipsis_within_budget() {
        assert_eq!(truncate_text("slow-cooked stews", 8), "slow-co…");
        assert_eq!(truncate_text("ab", 1), "…");
    }

    #[test]
    fn wide_glyphs_count_their_columns() {
        // Each CJK glyph is two columns wide.
        assert_eq!(truncate_text("早餐食谱", 5), "早餐…");
        assert_eq!(truncate_text("早餐", 4), "早餐");
    }

    #[test]
    fn zero_budget_yields_nothing() {
        assert_eq!(truncate_text("breakfast", 0), "");
    }
}
