use crate::error::{Error, Result};

/// RGB color parsed from a `#RRGGBB` hex string. Compared and hashed by its
/// channels; rendered (and serialized) back as uppercase `#RRGGBB`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
  red: u8,
  green: u8,
  blue: u8,
}

impl Color {
  pub const DEFAULT: Color = Color {
    red: 0x80,
    green: 0x80,
    blue: 0x80,
  };

  pub fn from_hex(hex: &str) -> Result<Self> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
      return Err(Error::InvalidArgument(format!(
        "color must be 6 hex digits with an optional leading '#', got: {:?}",
        hex
      )));
    }

    return Ok(Self {
      red: parse_channel("red", &digits[0..2])?,
      green: parse_channel("green", &digits[2..4])?,
      blue: parse_channel("blue", &digits[4..6])?,
    });
  }

  pub fn red(&self) -> u8 {
    self.red
  }

  pub fn green(&self) -> u8 {
    self.green
  }

  pub fn blue(&self) -> u8 {
    self.blue
  }
}

fn parse_channel(name: &str, digits: &str) -> Result<u8> {
  // from_str_radix alone is too lenient: it accepts a leading sign.
  if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
    return Err(Error::InvalidArgument(format!(
      "invalid {} channel: {:?}",
      name, digits
    )));
  }

  u8::from_str_radix(digits, 16)
    .map_err(|_| Error::InvalidArgument(format!("invalid {} channel: {:?}", name, digits)))
}

impl Default for Color {
  fn default() -> Self {
    Self::DEFAULT
  }
}

impl std::fmt::Display for Color {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
  }
}

impl From<Color> for String {
  fn from(color: Color) -> Self {
    color.to_string()
  }
}

impl TryFrom<String> for Color {
  type Error = Error;

  fn try_from(hex: String) -> Result<Self> {
    Color::from_hex(&hex)
  }
}
