//! The subset of CSS values that canvas fill styles and fonts accept.
//!
//! Parsers return `None` for anything they do not understand, which the
//! surface treats as "keep the previous value".

use tiny_skia::ColorU8;

/// CSS pixels per inch.
const PX_PER_IN: f32 = 96.0;

/// Font size that `em` and `rem` are relative to.
const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// Font keywords that may precede the size in the shorthand.
const FONT_PREFIX_KEYWORDS: &[&str] = &[
    "normal", "italic", "oblique", "bold", "bolder", "lighter", "small-caps",
];

/// Parses a CSS color.
///
/// Supports `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()` and a few
/// keywords. Out-of-range components are clamped.
pub(super) fn parse_color(style: &str) -> Option<ColorU8> {
    let style = style.trim().to_ascii_lowercase();
    if let Some(hex) = style.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = style
        .strip_prefix("rgba(")
        .or_else(|| style.strip_prefix("rgb("))
    {
        return parse_rgb_function(args.strip_suffix(')')?);
    }
    match style.as_str() {
        "black" => Some(ColorU8::from_rgba(0, 0, 0, 255)),
        "white" => Some(ColorU8::from_rgba(255, 255, 255, 255)),
        "transparent" => Some(ColorU8::from_rgba(0, 0, 0, 0)),
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<ColorU8> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let mut digits = hex.chars().filter_map(|c| c.to_digit(16));
            let mut next = || digits.next().map(|d| d as u8 * 17);
            Some(ColorU8::from_rgba(next()?, next()?, next()?, 255))
        }
        6 => Some(ColorU8::from_rgba(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Some(ColorU8::from_rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_rgb_function(args: &str) -> Option<ColorU8> {
    let values = args
        .split(',')
        .map(|v| v.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<f64>>>()?;
    let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    let alpha = match values.len() {
        3 => 255,
        4 => (values[3].clamp(0.0, 1.0) * 255.0).round() as u8,
        _ => return None,
    };
    Some(ColorU8::from_rgba(
        channel(values[0]),
        channel(values[1]),
        channel(values[2]),
        alpha,
    ))
}

/// A parsed CSS font shorthand.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Font {
    /// The font size in CSS pixels.
    pub size_px: f32,
    /// Font families in order of preference, without quotes.
    pub families: Vec<String>,
}

/// Parses a CSS font shorthand such as `100pt "Lily Script One", serif`.
pub(super) fn parse_font(font: &str) -> Option<Font> {
    let mut rest = font.trim();
    let size_px = loop {
        let (token, tail) = split_token(rest);
        if token.is_empty() {
            return None;
        }
        rest = tail;
        let lowercase = token.to_ascii_lowercase();
        if FONT_PREFIX_KEYWORDS.contains(&lowercase.as_str()) || is_font_weight(&lowercase) {
            continue;
        }
        // Drop any `/line-height` suffix.
        let size = lowercase.split('/').next().unwrap_or_default();
        break parse_length(size)?;
    };

    let families: Vec<String> = rest
        .split(',')
        .map(|family| family.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|family| !family.is_empty())
        .map(str::to_string)
        .collect();
    if families.is_empty() {
        return None;
    }
    Some(Font { size_px, families })
}

fn split_token(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim_start()),
        None => (s, ""),
    }
}

fn is_font_weight(token: &str) -> bool {
    token.len() == 3 && token.ends_with("00") && token.parse::<u16>().is_ok()
}

/// Parses a CSS length into pixels.
fn parse_length(length: &str) -> Option<f32> {
    let split = length
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(length.len());
    let (number, unit) = length.split_at(split);
    let number: f32 = number.parse().ok()?;
    let px_per_unit = match unit {
        "px" => 1.0,
        "pt" => PX_PER_IN / 72.0,
        "pc" => PX_PER_IN / 6.0,
        "in" => PX_PER_IN,
        "cm" => PX_PER_IN / 2.54,
        "mm" => PX_PER_IN / 25.4,
        "em" | "rem" => DEFAULT_FONT_SIZE_PX,
        _ => return None,
    };
    Some(number * px_per_unit)
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) enum TextBaseline {
    Top,
    Hanging,
    Middle,
    #[default]
    Alphabetic,
    Ideographic,
    Bottom,
}

impl TextBaseline {
    pub fn parse(baseline: &str) -> Option<Self> {
        match baseline {
            "top" => Some(Self::Top),
            "hanging" => Some(Self::Hanging),
            "middle" => Some(Self::Middle),
            "alphabetic" => Some(Self::Alphabetic),
            "ideographic" => Some(Self::Ideographic),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

/// Horizontal text anchor.
///
/// Surfaces are always left-to-right, so `start` is `left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
}

impl TextAlign {
    pub fn parse(align: &str) -> Option<Self> {
        match align {
            "start" => Some(Self::Start),
            "end" => Some(Self::End),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "center" => Some(Self::Center),
            _ => None,
        }
    }

    /// Returns how far left of the anchor a run of `width` starts.
    pub fn offset(self, width: f32) -> f32 {
        match self {
            Self::Start | Self::Left => 0.0,
            Self::Center => width / 2.0,
            Self::End | Self::Right => width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(color: ColorU8) -> [u8; 4] {
        [color.red(), color.green(), color.blue(), color.alpha()]
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(parse_color("#FF00AB").map(rgba), Some([255, 0, 171, 255]));
        assert_eq!(parse_color("#fff").map(rgba), Some([255, 255, 255, 255]));
        assert_eq!(parse_color("#11223380").map(rgba), Some([17, 34, 51, 128]));
    }

    #[test]
    fn test_parse_rgba_function() {
        assert_eq!(parse_color("rgba(10,20,30,0.5)").map(rgba), Some([10, 20, 30, 128]));
        assert_eq!(parse_color("rgb(10, 20, 30)").map(rgba), Some([10, 20, 30, 255]));
        assert_eq!(parse_color("RGBA(1,2,3,1)").map(rgba), Some([1, 2, 3, 255]));
        // Malformed hex decodes to out-of-range components, which clamp.
        assert_eq!(parse_color("rgba(-17,300,0,2)").map(rgba), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_reject_invalid_colors() {
        for style in ["#", "#undefined", "#12345", "rgba(1,2)", "rgba(1,2,3,NaN)", "tomato", ""] {
            assert_eq!(parse_color(style), None, "{style}");
        }
    }

    #[test]
    fn test_parse_font() {
        assert_eq!(
            parse_font("100pt Georgia"),
            Some(Font {
                size_px: 100.0 * 96.0 / 72.0,
                families: vec!["Georgia".to_string()],
            })
        );
        assert_eq!(
            parse_font("bold 12px/1.5 \"Lily Script One\", serif"),
            Some(Font {
                size_px: 12.0,
                families: vec!["Lily Script One".to_string(), "serif".to_string()],
            })
        );
        assert_eq!(parse_font("10px sans-serif").map(|f| f.size_px), Some(10.0));
        assert_eq!(parse_font("2em Arial").map(|f| f.size_px), Some(32.0));
    }

    #[test]
    fn test_reject_invalid_fonts() {
        for font in ["", "Georgia", "100 Georgia", "100pt", "NaNpt undefined", "-5px Arial"] {
            assert_eq!(parse_font(font), None, "{font}");
        }
    }

    #[test]
    fn test_text_anchors() {
        assert_eq!(TextBaseline::parse("middle"), Some(TextBaseline::Middle));
        assert_eq!(TextBaseline::parse("center"), None);
        assert_eq!(TextAlign::parse("center").map(|a| a.offset(10.0)), Some(5.0));
        assert_eq!(TextAlign::End.offset(10.0), 10.0);
        assert_eq!(TextAlign::default().offset(10.0), 0.0);
    }
}
