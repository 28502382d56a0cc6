//! Porter-Duff mixing factors.
//!
//! Each operator maps the two alpha values to `(fd, fs)`, the weights (out of 255) applied to
//! the destination and source contributions. The render pipeline turns those weights into the
//! output alpha and color.

use crate::foundation::core::Bgra8;

/// Closed set of Porter-Duff operators.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CompositeOp {
    /// `(0, 0)`
    Clear,
    /// `(0, 255)`
    Copy,
    /// `(255, 0)`
    Destination,
    /// `(255 - src.a, 255)`
    #[default]
    SourceOver,
    /// `(255, 255 - dest.a)`
    DestinationOver,
    /// `(0, dest.a)`
    SourceIn,
    /// `(src.a, 0)`
    DestinationIn,
    /// `(0, 255 - dest.a)`
    SourceOut,
    /// `(255 - src.a, 0)`
    DestinationOut,
    /// `(255 - src.a, dest.a)`
    SourceAtop,
    /// `(src.a, 255 - dest.a)`
    DestinationAtop,
    /// `(255 - src.a, 255 - dest.a)`
    Xor,
    /// `(255, 255)`
    Lighter,
}

impl CompositeOp {
    /// Every operator, in id order.
    pub const ALL: [CompositeOp; 13] = [
        Self::Clear,
        Self::Copy,
        Self::Destination,
        Self::SourceOver,
        Self::DestinationOver,
        Self::SourceIn,
        Self::DestinationIn,
        Self::SourceOut,
        Self::DestinationOut,
        Self::SourceAtop,
        Self::DestinationAtop,
        Self::Xor,
        Self::Lighter,
    ];

    /// Resolve a numeric selector; `None` for anything outside `0..=12`.
    pub fn from_id(id: i64) -> Option<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Numeric selector of this operator.
    pub fn id(self) -> i64 {
        self as i64
    }

    /// Mixing factors `(fd, fs)` for a destination/source pixel pair.
    pub fn factors(self, dest: Bgra8, src: Bgra8) -> (i32, i32) {
        let da = i32::from(dest.a);
        let sa = i32::from(src.a);
        match self {
            Self::Clear => (0, 0),
            Self::Copy => (0, 255),
            Self::Destination => (255, 0),
            Self::SourceOver => (255 - sa, 255),
            Self::DestinationOver => (255, 255 - da),
            Self::SourceIn => (0, da),
            Self::DestinationIn => (sa, 0),
            Self::SourceOut => (0, 255 - da),
            Self::DestinationOut => (255 - sa, 0),
            Self::SourceAtop => (255 - sa, da),
            Self::DestinationAtop => (sa, 255 - da),
            Self::Xor => (255 - sa, 255 - da),
            Self::Lighter => (255, 255),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
