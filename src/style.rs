//! Cell style: colors and text attributes, and the SGR sequence builder.

use std::fmt::Write as _;

use crate::color::Color;

/// Font weight, per spec: exactly one of normal, bold, or dim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Weight {
    /// No weight attribute.
    #[default]
    Normal,
    /// Bold (SGR 1).
    Bold,
    /// Dim/faint (SGR 2).
    Dim,
}

/// Style attributes for a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    /// Foreground color.
    pub fg: Option<Color>,
    /// Background color.
    pub bg: Option<Color>,
    /// Font weight.
    pub weight: Weight,
    /// Italic.
    pub italic: bool,
    /// Underline.
    pub underline: bool,
    /// Reverse video.
    pub reverse: bool,
}

impl Style {
    /// An empty style with no attributes (the default style).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground color.
    #[must_use]
    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Set the font weight.
    #[must_use]
    pub fn weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    /// Set italic.
    #[must_use]
    pub fn italic(mut self, val: bool) -> Self {
        self.italic = val;
        self
    }

    /// Set underline.
    #[must_use]
    pub fn underline(mut self, val: bool) -> Self {
        self.underline = val;
        self
    }

    /// Set reverse video.
    #[must_use]
    pub fn reverse(mut self, val: bool) -> Self {
        self.reverse = val;
        self
    }

    /// Returns true if this is the default style (no attributes set).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Build the SGR escape sequence that switches from `from` to `to`.
///
/// Emits only the attributes that differ; if nothing differs, returns an
/// empty string. If `to` is the default style and `from` was not, emits a
/// plain reset (`ESC [ 0 m`) rather than enumerating per-attribute resets —
/// simplest and matches how the terminal wire protocol table in the spec
/// treats "reset" (`ESC [ 0 m`).
pub fn build_sgr_sequence(from: &Style, to: &Style) -> String {
    if from == to {
        return String::new();
    }
    if to.is_empty() {
        return "\x1b[0m".to_string();
    }

    let mut params: Vec<u16> = Vec::new();
    match to.weight {
        Weight::Normal => {}
        Weight::Bold => params.push(1),
        Weight::Dim => params.push(2),
    }
    if to.italic {
        params.push(3);
    }
    if to.underline {
        params.push(4);
    }
    if to.reverse {
        params.push(7);
    }
    if let Some(fg) = to.fg {
        params.extend(fg.sgr_fg_params());
    }
    if let Some(bg) = to.bg {
        params.extend(bg.sgr_bg_params());
    }

    if params.is_empty() {
        return String::new();
    }

    let mut out = String::from("\x1b[");
    for (i, p) in params.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        let _ = write!(out, "{p}");
    }
    out.push('m');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::NamedColor;

    #[test]
    fn default_style_is_empty() {
        assert!(Style::default().is_empty());
    }

    #[test]
    fn same_style_no_sequence() {
        let s = Style::new().weight(Weight::Bold);
        assert_eq!(build_sgr_sequence(&s, &s), "");
    }

    #[test]
    fn to_default_emits_reset() {
        let bold = Style::new().weight(Weight::Bold);
        assert_eq!(build_sgr_sequence(&bold, &Style::default()), "\x1b[0m");
    }

    #[test]
    fn bold_and_fg() {
        let to = Style::new().weight(Weight::Bold).fg(Color::Named(NamedColor::Red));
        let seq = build_sgr_sequence(&Style::default(), &to);
        assert_eq!(seq, "\x1b[1;31m");
    }
}
