//! Style declarations and unit conversion for host surfaces.
//!
//! Schema styles store identifier-style keys (`fontSize`) with unitless
//! numbers. Hosts expect hyphenated declarations (`font-size:18px`), so every
//! key is converted to kebab case and every length is suffixed with the host's
//! unit.

use std::fmt::{Display, Write};

use card_core::element::finite_or_zero;
use card_core::{StyleMap, StyleValue};
use indexmap::IndexMap;

/// Device-relative design width: `750rpx` spans the full screen.
pub const DESIGN_WIDTH: f64 = 750.0;

/// Keys treated as lengths by the pixel rule unless configured otherwise.
pub const DEFAULT_LENGTH_KEYS: [&str; 13] = [
    "fontSize",
    "lineHeight",
    "letterSpacing",
    "borderRadius",
    "padding",
    "margin",
    "top",
    "left",
    "right",
    "bottom",
    "gap",
    "width",
    "height",
];

/// Which numeric style keys carry a length unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LengthKeys {
    /// Every numeric value is a length.
    All,
    /// Only the listed keys; other numbers are emitted unitless.
    Only(Vec<String>),
}

impl LengthKeys {
    /// The web allow-list, [`DEFAULT_LENGTH_KEYS`].
    #[must_use]
    pub fn web_default() -> Self {
        Self::Only(DEFAULT_LENGTH_KEYS.iter().map(|k| (*k).to_string()).collect())
    }

    /// Whether numbers under `key` get a length unit.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(keys) => keys.iter().any(|k| k == key),
        }
    }
}

/// How a length in schema units becomes a host length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitRule {
    /// `{v}px`.
    Pixel,
    /// `{v / reference_width * 750}rpx`; pixel fallback when the reference is
    /// not positive.
    DeviceRelative {
        /// Width that maps onto [`DESIGN_WIDTH`].
        reference_width: f64,
    },
}

/// Formats style values for one host surface.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleFormatter {
    rule: UnitRule,
    length_keys: LengthKeys,
}

impl StyleFormatter {
    /// Create a formatter from a unit rule and length-key set.
    #[must_use]
    pub fn new(rule: UnitRule, length_keys: LengthKeys) -> Self {
        Self { rule, length_keys }
    }

    /// Pixel rule with the web allow-list.
    #[must_use]
    pub fn pixel() -> Self {
        Self::new(UnitRule::Pixel, LengthKeys::web_default())
    }

    /// Device-relative rule where every number is a length.
    #[must_use]
    pub fn device_relative(reference_width: f64) -> Self {
        Self::new(UnitRule::DeviceRelative { reference_width }, LengthKeys::All)
    }

    /// Convert a length, regardless of key classification.
    #[must_use]
    pub fn length(&self, value: f64) -> String {
        match self.rule {
            UnitRule::DeviceRelative { reference_width } if reference_width > 0.0 => {
                // Multiply first so whole-number ratios stay exact.
                format!(
                    "{}rpx",
                    format_number(value * DESIGN_WIDTH / reference_width)
                )
            }
            UnitRule::Pixel | UnitRule::DeviceRelative { .. } => {
                format!("{}px", format_number(value))
            }
        }
    }

    /// Whether numbers under `key` get a length unit.
    ///
    /// A device-relative rule without a usable reference falls back to the
    /// pixel rule, including its allow-list unless one was configured.
    #[must_use]
    pub fn is_length(&self, key: &str) -> bool {
        match (self.rule, &self.length_keys) {
            (UnitRule::DeviceRelative { reference_width }, LengthKeys::All)
                if reference_width.is_nan() || reference_width <= 0.0 =>
            {
                DEFAULT_LENGTH_KEYS.contains(&key)
            }
            (_, keys) => keys.contains(key),
        }
    }

    /// Format one style value under its schema key.
    #[must_use]
    pub fn value(&self, key: &str, value: &StyleValue) -> String {
        match value {
            StyleValue::Number(n) if self.is_length(key) => self.length(*n),
            StyleValue::Number(n) => format_number(*n),
            StyleValue::Text(text) => text.clone(),
        }
    }

    /// Format a whole style map into hyphenated declarations, keeping order.
    #[must_use]
    pub fn format(&self, style: &StyleMap) -> IndexMap<String, String> {
        style
            .iter()
            .map(|(key, value)| (to_kebab_case(key), self.value(key, value)))
            .collect()
    }
}

/// `fontSize` -> `font-size`.
#[must_use]
pub fn to_kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Shortest decimal form; integers print without a fraction.
#[must_use]
pub fn format_number(value: f64) -> String {
    let value = finite_or_zero(value);
    if value == 0.0 {
        // Covers -0 as well.
        return "0".to_string();
    }
    value.to_string()
}

/// Builder for a semicolon-joined `property:value` list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    buf: String,
}

impl Declarations {
    /// Start an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one declaration.
    pub fn push(&mut self, property: &str, value: impl Display) {
        if !self.buf.is_empty() {
            self.buf.push(';');
        }
        let _ = write!(self.buf, "{property}:{value}");
    }

    /// The joined declaration string.
    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(entries: &[(&str, StyleValue)]) -> StyleMap {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(to_kebab_case("fontSize"), "font-size");
        assert_eq!(to_kebab_case("borderTopLeftRadius"), "border-top-left-radius");
        assert_eq!(to_kebab_case("color"), "color");
        assert_eq!(to_kebab_case("WebkitLineClamp"), "-webkit-line-clamp");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(20.0), "20");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "0");
    }

    #[test]
    fn test_pixel_rule_allow_list() {
        let formatter = StyleFormatter::pixel();
        let out = formatter.format(&style(&[
            ("fontSize", 18.into()),
            ("fontWeight", 700.into()),
            ("borderRadius", "50%".into()),
        ]));
        let pairs: Vec<_> = out.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            pairs,
            [
                ("font-size", "18px"),
                ("font-weight", "700"),
                ("border-radius", "50%"),
            ]
        );
    }

    #[test]
    fn test_device_relative_rule() {
        let formatter = StyleFormatter::device_relative(375.0);
        assert_eq!(formatter.length(20.0), "40rpx");
        assert_eq!(formatter.value("fontWeight", &700.into()), "1400rpx");
        assert_eq!(formatter.value("color", &"#fff".into()), "#fff");
    }

    #[test]
    fn test_device_relative_custom_allow_list() {
        let formatter = StyleFormatter::new(
            UnitRule::DeviceRelative {
                reference_width: 750.0,
            },
            LengthKeys::web_default(),
        );
        assert_eq!(formatter.value("fontSize", &24.into()), "24rpx");
        assert_eq!(formatter.value("fontWeight", &600.into()), "600");
    }

    #[test]
    fn test_device_relative_falls_back_to_pixels() {
        let formatter = StyleFormatter::device_relative(0.0);
        assert_eq!(formatter.length(12.0), "12px");
        let negative = StyleFormatter::device_relative(-10.0);
        assert_eq!(negative.length(12.0), "12px");
    }

    #[test]
    fn test_pixel_fallback_keeps_unitless_numbers() {
        let formatter = StyleFormatter::device_relative(0.0);
        assert_eq!(formatter.value("fontSize", &12.into()), "12px");
        assert_eq!(formatter.value("fontWeight", &700.into()), "700");
        assert_eq!(formatter.value("opacity", &1.into()), "1");

        let configured = StyleFormatter::new(
            UnitRule::DeviceRelative {
                reference_width: f64::NAN,
            },
            LengthKeys::Only(vec!["opacity".to_string()]),
        );
        assert_eq!(configured.value("opacity", &1.into()), "1px");
        assert_eq!(configured.value("fontSize", &12.into()), "12");
    }

    #[test]
    fn test_declarations_join() {
        assert_eq!(Declarations::new().finish(), "");
        let mut decl = Declarations::new();
        decl.push("left", "10px");
        decl.push("z-index", 3);
        assert_eq!(decl.finish(), "left:10px;z-index:3");
    }
}
