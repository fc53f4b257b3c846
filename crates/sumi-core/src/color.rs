//! RGBA colors and the CSS color strings the studio accepts.
//!
//! Brush colors, the paper background and the seal shadows are all
//! specified as CSS strings (`#fefcf8`, `rgba(0,0,0,0.5)`), so parsing
//! lives next to the type. Built on `winnow` 0.7.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use winnow::ascii::multispace0;
use winnow::combinator::alt;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Same color with alpha multiplied by `factor` (clamped to [0, 1]).
    pub fn with_alpha_factor(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// 8-bit channels, rounded.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 | 4 => {
                let mut ch = [255u8; 4];
                for (slot, &b) in ch.iter_mut().zip(bytes) {
                    *slot = hex_val(b)? * 17;
                }
                Some(Self::from_rgba8(ch[0], ch[1], ch[2], ch[3]))
            }
            6 | 8 => {
                let mut ch = [255u8; 4];
                for (slot, pair) in ch.iter_mut().zip(bytes.chunks(2)) {
                    *slot = hex_val(pair[0])? << 4 | hex_val(pair[1])?;
                }
                Some(Self::from_rgba8(ch[0], ch[1], ch[2], ch[3]))
            }
            _ => None,
        }
    }

    /// Emit as shortest valid hex string (`#RRGGBB`, or `#RRGGBBAA` when translucent).
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// Parse a CSS color: hex, `rgb(r, g, b)`, `rgba(r, g, b, a)` or `transparent`.
    pub fn parse(input: &str) -> Option<Self> {
        let mut rest = input.trim();
        let color = alt((parse_hex_color, parse_rgb_function, parse_transparent))
            .parse_next(&mut rest)
            .ok()?;
        rest.trim().is_empty().then_some(color)
    }
}

// ─── CSS parsing ─────────────────────────────────────────────────────────

fn backtrack() -> ErrMode<ContextError> {
    ErrMode::Backtrack(ContextError::new())
}

fn parse_hex_color(input: &mut &str) -> ModalResult<Color> {
    let _ = '#'.parse_next(input)?;
    let hex_digits: &str = take_while(1..=8, |c: char| c.is_ascii_hexdigit()).parse_next(input)?;
    Color::from_hex(hex_digits).ok_or_else(backtrack)
}

fn parse_transparent(input: &mut &str) -> ModalResult<Color> {
    "transparent".value(Color::TRANSPARENT).parse_next(input)
}

/// `rgb(255, 0, 0)` / `rgba(0,0,0,0.5)`. Channels are 0–255, alpha 0–1.
fn parse_rgb_function(input: &mut &str) -> ModalResult<Color> {
    let has_alpha = alt(("rgba(".value(true), "rgb(".value(false))).parse_next(input)?;
    let r = parse_channel(input)?;
    separator(input)?;
    let g = parse_channel(input)?;
    separator(input)?;
    let b = parse_channel(input)?;
    let a = if has_alpha {
        separator(input)?;
        parse_number(input)?.clamp(0.0, 1.0)
    } else {
        1.0
    };
    let _ = multispace0.parse_next(input)?;
    let _ = ')'.parse_next(input)?;
    Ok(Color::rgba(r / 255.0, g / 255.0, b / 255.0, a))
}

fn parse_channel(input: &mut &str) -> ModalResult<f32> {
    let _ = multispace0.parse_next(input)?;
    Ok(parse_number(input)?.clamp(0.0, 255.0))
}

fn separator(input: &mut &str) -> ModalResult<()> {
    let _ = multispace0.parse_next(input)?;
    let _ = ','.parse_next(input)?;
    let _ = multispace0.parse_next(input)?;
    Ok(())
}

fn parse_number(input: &mut &str) -> ModalResult<f32> {
    let start = *input;
    if input.starts_with('-') {
        *input = &input[1..];
    }
    let _ = take_while(0.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    if input.starts_with('.') {
        *input = &input[1..];
        let _ = take_while(0.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    }
    let matched = &start[..start.len() - input.len()];
    matched.parse::<f32>().map_err(|_| backtrack())
}

// ─── Serde: colors travel as CSS strings ─────────────────────────────────

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.005
    }

    #[test]
    fn hex_forms() {
        let paper = Color::parse("#fefcf8").unwrap();
        assert_eq!(paper.to_rgba8(), [0xfe, 0xfc, 0xf8, 0xff]);

        let short = Color::parse("#f00").unwrap();
        assert_eq!(short.to_rgba8(), [255, 0, 0, 255]);

        let translucent = Color::parse("#00000080").unwrap();
        assert_eq!(translucent.to_rgba8()[3], 0x80);
    }

    #[test]
    fn rgba_function() {
        let shadow = Color::parse("rgba(255,255,255,0.7)").unwrap();
        assert!(approx(shadow.r, 1.0));
        assert!(approx(shadow.a, 0.7));

        let spaced = Color::parse("rgba( 0, 0, 0, .5 )").unwrap();
        assert!(approx(spaced.a, 0.5));

        let opaque = Color::parse("rgb(139, 69, 19)").unwrap();
        assert_eq!(opaque.to_hex(), "#8B4513");
    }

    #[test]
    fn transparent_keyword() {
        assert_eq!(Color::parse("transparent"), Some(Color::TRANSPARENT));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Color::parse("red"), None);
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("rgb(1,2)"), None);
        assert_eq!(Color::parse("#fff trailing"), None);
    }

    #[test]
    fn hex_output_is_shortest() {
        assert_eq!(Color::BLACK.to_hex(), "#000000");
        assert_eq!(Color::BLACK.with_alpha_factor(0.5).to_hex(), "#00000080");
    }

    #[test]
    fn serde_uses_css_strings() {
        let json = serde_json::to_string(&Color::parse("#cd5c5c").unwrap()).unwrap();
        assert_eq!(json, "\"#CD5C5C\"");
        let back: Color = serde_json::from_str("\"rgba(0,0,0,0.5)\"").unwrap();
        assert!(approx(back.a, 0.5));
    }
}
