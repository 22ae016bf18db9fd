mod carousel;
mod help;
mod status_bar;

pub use carousel::CarouselWidget;
pub use help::HelpPopup;
pub use status_bar::StatusBarWidget;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate to at most `max_width` display columns, marking the cut with '…'
pub(crate) fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Aurora 1", 20), "Aurora 1");
        assert_eq!(truncate_to_width("Aurora 12", 6), "Auror…");
        assert_eq!(truncate_to_width("日本語テキスト", 7), "日本語…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
