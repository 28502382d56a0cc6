//! Per-pixel color merge functions.
//!
//! Every function takes `(dest, src)` straight-alpha pixels and returns the merged color. Only
//! the color channels of the result are meaningful; the compositing pipeline supplies alpha.

use crate::foundation::core::{Bgra8, YCbCr};
use crate::foundation::math::clamp_u8;

/// Resolved blend function pointer, looked up once per draw call.
pub type BlendFn = fn(Bgra8, Bgra8) -> Bgra8;

/// Closed set of blend modes.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Source color replaces destination color.
    #[default]
    Normal,
    /// `min(d + s, 255)`.
    Addition,
    /// `max(d - s, 0)`.
    Subtract,
    /// `d * s / 255`.
    Multiply,
    /// `d + s - d * s / 255`.
    Screen,
    /// Multiply or screen depending on the destination channel.
    Overlay,
    /// `max(d, s)`.
    Lighten,
    /// `min(d, s)`.
    Darken,
    /// Source luma with destination chroma.
    Luminosity,
    /// Destination luma with source chroma.
    Color,
    /// `max(d + s - 255, 0)`.
    LinearBurn,
    /// `clamp(d + 2s - 255)`.
    LinearLight,
    /// `|d - s|`.
    Difference,
    /// `d + s - 2ds / 255`.
    Exclusion,
    /// `255 * d / s`, saturating.
    Divide,
    /// Brightens the destination by the inverse of the source.
    ColorDodge,
    /// Darkens the destination by the source.
    ColorBurn,
    /// `255` when `d + s >= 255`, otherwise `0`.
    HardMix,
    /// Bitwise `d & s`.
    And,
    /// Bitwise `!(d & s)`.
    Nand,
    /// Bitwise `d | s`.
    Or,
    /// Bitwise `!(d | s)`.
    Nor,
    /// Bitwise `d ^ s`.
    Xor,
    /// Bitwise `!(d ^ s)`.
    Xnor,
    /// Bitwise `!d | s`.
    Implication,
    /// Bitwise `d & !s`.
    NotImplication,
    /// Bitwise `d | !s`.
    Converse,
    /// Bitwise `!d & s`.
    NotConverse,
}

impl BlendMode {
    /// Every mode, in id order.
    pub const ALL: [BlendMode; 28] = [
        Self::Normal,
        Self::Addition,
        Self::Subtract,
        Self::Multiply,
        Self::Screen,
        Self::Overlay,
        Self::Lighten,
        Self::Darken,
        Self::Luminosity,
        Self::Color,
        Self::LinearBurn,
        Self::LinearLight,
        Self::Difference,
        Self::Exclusion,
        Self::Divide,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::HardMix,
        Self::And,
        Self::Nand,
        Self::Or,
        Self::Nor,
        Self::Xor,
        Self::Xnor,
        Self::Implication,
        Self::NotImplication,
        Self::Converse,
        Self::NotConverse,
    ];

    /// Resolve a numeric selector. Unknown ids fall back to [`BlendMode::Normal`].
    pub fn from_id(id: i64) -> Self {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(Self::Normal)
    }

    /// Numeric selector of this mode (inverse of [`BlendMode::from_id`]).
    pub fn id(self) -> i64 {
        self as i64
    }

    /// Resolve a display name (exact, case-sensitive). Unmatched names fall back to
    /// [`BlendMode::Normal`].
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == name)
            .unwrap_or(Self::Normal)
    }

    /// Display name accepted by [`BlendMode::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Addition => "Addition",
            Self::Subtract => "Subtract",
            Self::Multiply => "Multiply",
            Self::Screen => "Screen",
            Self::Overlay => "Overlay",
            Self::Lighten => "Lighten",
            Self::Darken => "Darken",
            Self::Luminosity => "Luminosity",
            Self::Color => "Color",
            Self::LinearBurn => "LinearBurn",
            Self::LinearLight => "LinearLight",
            Self::Difference => "Difference",
            Self::Exclusion => "Exclusion",
            Self::Divide => "Divide",
            Self::ColorDodge => "ColorDodge",
            Self::ColorBurn => "ColorBurn",
            Self::HardMix => "HardMix",
            Self::And => "AND",
            Self::Nand => "NAND",
            Self::Or => "OR",
            Self::Nor => "NOR",
            Self::Xor => "XOR",
            Self::Xnor => "XNOR",
            Self::Implication => "IMPLICATION",
            Self::NotImplication => "NOT IMPLICATION",
            Self::Converse => "CONVERSE",
            Self::NotConverse => "NOT CONVERSE",
        }
    }

    /// Function pointer implementing this mode.
    pub fn func(self) -> BlendFn {
        match self {
            Self::Normal => normal,
            Self::Addition => addition,
            Self::Subtract => subtract,
            Self::Multiply => multiply,
            Self::Screen => screen,
            Self::Overlay => overlay,
            Self::Lighten => lighten,
            Self::Darken => darken,
            Self::Luminosity => luminosity,
            Self::Color => color,
            Self::LinearBurn => linear_burn,
            Self::LinearLight => linear_light,
            Self::Difference => difference,
            Self::Exclusion => exclusion,
            Self::Divide => divide,
            Self::ColorDodge => color_dodge,
            Self::ColorBurn => color_burn,
            Self::HardMix => hard_mix,
            Self::And => bit_and,
            Self::Nand => bit_nand,
            Self::Or => bit_or,
            Self::Nor => bit_nor,
            Self::Xor => bit_xor,
            Self::Xnor => bit_xnor,
            Self::Implication => bit_implication,
            Self::NotImplication => bit_not_implication,
            Self::Converse => bit_converse,
            Self::NotConverse => bit_not_converse,
        }
    }

    /// Merge `src` into `dest`.
    pub fn apply(self, dest: Bgra8, src: Bgra8) -> Bgra8 {
        (self.func())(dest, src)
    }
}

#[inline(always)]
fn per_channel(dest: Bgra8, src: Bgra8, f: impl Fn(i32, i32) -> i32) -> Bgra8 {
    let c = |d: u8, s: u8| clamp_u8(f(i32::from(d), i32::from(s)));
    Bgra8::opaque(c(dest.b, src.b), c(dest.g, src.g), c(dest.r, src.r))
}

#[inline(always)]
fn per_channel_bits(dest: Bgra8, src: Bgra8, f: impl Fn(u8, u8) -> u8) -> Bgra8 {
    Bgra8::opaque(f(dest.b, src.b), f(dest.g, src.g), f(dest.r, src.r))
}

fn normal(_dest: Bgra8, src: Bgra8) -> Bgra8 {
    src
}

fn addition(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel(dest, src, |d, s| d + s)
}

fn subtract(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel(dest, src, |d, s| d - s)
}

fn multiply(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel(dest, src, |d, s| d * s / 255)
}

fn screen(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel(dest, src, |d, s| d + s - d * s / 255)
}

fn overlay(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel(dest, src, |d, s| {
        if d < 128 {
            2 * d * s / 255
        } else {
            255 - 2 * (255 - d) * (255 - s) / 255
        }
    })
}

fn lighten(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel(dest, src, i32::max)
}

fn darken(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel(dest, src, i32::min)
}

fn luminosity(dest: Bgra8, src: Bgra8) -> Bgra8 {
    let (yd, ys) = (YCbCr::from(dest), YCbCr::from(src));
    Bgra8::from(YCbCr::new(ys.y, yd.cb, yd.cr))
}

fn color(dest: Bgra8, src: Bgra8) -> Bgra8 {
    let (yd, ys) = (YCbCr::from(dest), YCbCr::from(src));
    Bgra8::from(YCbCr::new(yd.y, ys.cb, ys.cr))
}

fn linear_burn(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel(dest, src, |d, s| d + s - 255)
}

fn linear_light(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel(dest, src, |d, s| d + 2 * s - 255)
}

fn difference(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel(dest, src, |d, s| (d - s).abs())
}

fn exclusion(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel(dest, src, |d, s| d + s - 2 * d * s / 255)
}

fn divide(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel(dest, src, |d, s| if s == 0 { 255 } else { 255 * d / s })
}

fn color_dodge(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel(dest, src, |d, s| match (d, s) {
        (0, _) => 0,
        (_, 255) => 255,
        _ => 255 * d / (255 - s),
    })
}

fn color_burn(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel(dest, src, |d, s| match (d, s) {
        (255, _) => 255,
        (_, 0) => 0,
        _ => 255 - (255 * (255 - d) / s).min(255),
    })
}

fn hard_mix(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel(dest, src, |d, s| if d + s >= 255 { 255 } else { 0 })
}

fn bit_and(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel_bits(dest, src, |d, s| d & s)
}

fn bit_nand(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel_bits(dest, src, |d, s| !(d & s))
}

fn bit_or(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel_bits(dest, src, |d, s| d | s)
}

fn bit_nor(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel_bits(dest, src, |d, s| !(d | s))
}

fn bit_xor(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel_bits(dest, src, |d, s| d ^ s)
}

fn bit_xnor(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel_bits(dest, src, |d, s| !(d ^ s))
}

fn bit_implication(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel_bits(dest, src, |d, s| !d | s)
}

fn bit_not_implication(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel_bits(dest, src, |d, s| d & !s)
}

fn bit_converse(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel_bits(dest, src, |d, s| d | !s)
}

fn bit_not_converse(dest: Bgra8, src: Bgra8) -> Bgra8 {
    per_channel_bits(dest, src, |d, s| !d & s)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blend.rs"]
mod tests;
