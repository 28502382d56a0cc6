//! Per-pixel fusion of Porter-Duff factors and blend color over straight-alpha storage.
//!
//! For destination `d`, sampled source `s` (alpha already scaled by the draw opacity), factors
//! `(fd, fs)` and blended color `b = B(d, s)`:
//!
//! ```text
//! a   = (d.a*fd + s.a*fs) / 255
//! m_c = (d.a*b_c + (255 - d.a)*s_c) / 255
//! c   = (d.a*fd*d_c + s.a*fs*m_c) / (a*255)      (black when a == 0)
//! ```
//!
//! `m` is the source color as seen through the blend over the covered part of the
//! destination; dividing by the output alpha keeps the straight-alpha color consistent with
//! the Porter-Duff weights. All divisions truncate and every channel is clamped to `[0, 255]`.

use crate::effects::blend::{BlendFn, BlendMode};
use crate::effects::composite::CompositeOp;
use crate::foundation::core::Bgra8;
use crate::foundation::math::{clamp_u8, trunc_u8};

/// Active operator pair plus draw opacity, resolved once per draw call.
#[derive(Clone, Copy, Debug)]
pub struct PixelCompositor {
    composite: CompositeOp,
    blend: BlendFn,
    alpha: f64,
}

impl PixelCompositor {
    /// Resolve the operators. `alpha` is clamped to `[0, 1]`.
    pub fn new(composite: CompositeOp, blend: BlendMode, alpha: f64) -> Self {
        Self {
            composite,
            blend: blend.func(),
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Draw opacity after clamping.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Combine destination pixel `pd` with source sample `ps`.
    #[inline]
    pub fn apply(&self, pd: Bgra8, ps: Bgra8) -> Bgra8 {
        let ps = ps.with_alpha(trunc_u8(f64::from(ps.a) * self.alpha));
        let (fd, fs) = self.composite.factors(pd, ps);

        let da = i32::from(pd.a);
        let sa = i32::from(ps.a);
        let a = (da * fd + sa * fs) / 255;
        if a == 0 {
            return Bgra8::TRANSPARENT;
        }

        let px = (self.blend)(pd, ps);
        let channel = |d: u8, s: u8, b: u8| {
            let (d, s, b) = (i32::from(d), i32::from(s), i32::from(b));
            let mixed = (da * b + (255 - da) * s) / 255;
            clamp_u8((da * fd * d + sa * fs * mixed) / (a * 255))
        };

        Bgra8::new(
            channel(pd.b, ps.b, px.b),
            channel(pd.g, ps.g, px.g),
            channel(pd.r, ps.r, px.r),
            clamp_u8(a),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
