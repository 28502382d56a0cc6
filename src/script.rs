//! JSON draw scripts replayed against an [`Engine`].
//!
//! ```json
//! {
//!   "width": 64,
//!   "height": 64,
//!   "background": {"b": 0, "g": 0, "r": 0, "a": 255},
//!   "commands": [
//!     {"op": "set_blend", "mode": "Multiply"},
//!     {"op": "draw", "image": "logo", "zoom": 0.5, "rotation_deg": 30},
//!     {"op": "draw_perspective", "image": "logo", "xy": [...], "uv": [...]}
//!   ]
//! }
//! ```
//!
//! Images are referenced by key; the caller supplies the decoded rasters.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::foundation::core::Bgra8;
use crate::foundation::error::{QuadblitError, QuadblitResult};
use crate::raster::image::Image;
use crate::render::draw::{DrawParams, DrawStats, PerspectiveParams};
use crate::session::engine::{Engine, EngineOpts};

/// Blend selector: numeric id or display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlendSelector {
    /// Numeric id, see [`crate::BlendMode::from_id`].
    Id(i64),
    /// Display name, see [`crate::BlendMode::from_name`].
    Name(String),
}

/// One engine operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Select the composite operator by id.
    SetComposite {
        /// Operator id, `0..=12`.
        id: i64,
    },
    /// Select the blend mode.
    SetBlend {
        /// Id or name.
        mode: BlendSelector,
    },
    /// Select the resample strategy by id.
    SetResample {
        /// `0` nearest, `1` bilinear.
        id: i64,
    },
    /// Clear the destination, optionally resizing it.
    Clear {
        /// New width; defaults to the current width.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
        /// New height; defaults to the current height.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
    },
    /// Affine draw.
    Draw {
        /// Image key.
        image: String,
        /// Placement.
        #[serde(flatten)]
        params: DrawParams,
    },
    /// Perspective draw.
    DrawPerspective {
        /// Image key.
        image: String,
        /// Corner correspondence.
        #[serde(flatten)]
        params: PerspectiveParams,
    },
}

impl Command {
    /// Image key used by a draw command.
    pub fn image(&self) -> Option<&str> {
        match self {
            Self::Draw { image, .. } | Self::DrawPerspective { image, .. } => Some(image.as_str()),
            _ => None,
        }
    }
}

/// A destination size plus a command list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Destination width.
    pub width: u32,
    /// Destination height.
    pub height: u32,
    /// Initial destination fill; transparent when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Bgra8>,
    /// Initial modes.
    #[serde(default)]
    pub opts: EngineOpts,
    /// Operations, applied in order.
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl Script {
    /// Parse a script from JSON text.
    pub fn from_json(text: &str) -> QuadblitResult<Self> {
        let script: Self = serde_json::from_str(text)?;
        Ok(script)
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> QuadblitResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every image key the commands reference.
    pub fn image_keys(&self) -> BTreeSet<&str> {
        self.commands.iter().filter_map(Command::image).collect()
    }

    /// Check that every referenced image is present.
    pub fn validate(&self, images: &BTreeMap<String, Image>) -> QuadblitResult<()> {
        let missing: Vec<&str> = self
            .image_keys()
            .into_iter()
            .filter(|k| !images.contains_key(*k))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(QuadblitError::validation(format!(
                "script references unknown images: {}",
                missing.join(", ")
            )))
        }
    }

    /// Reset `engine` to the script's destination and modes, then apply every command.
    ///
    /// Validation runs first, so a script with missing images leaves the engine untouched.
    #[tracing::instrument(skip_all, fields(width = self.width, height = self.height, commands = self.commands.len()))]
    pub fn run(
        &self,
        engine: &mut Engine,
        images: &BTreeMap<String, Image>,
    ) -> QuadblitResult<DrawStats> {
        self.validate(images)?;

        engine.try_clear_to(self.width, self.height)?;
        if let Some(bg) = self.background {
            engine.destination_mut().fill(bg);
        }
        engine.set_composite_mode(self.opts.composite);
        engine.set_blend_mode(self.opts.blend);
        engine.set_resample_mode(self.opts.resample);

        let mut total = DrawStats::default();
        for cmd in &self.commands {
            let stats = apply(engine, images, cmd)?;
            total.pixels_visited += stats.pixels_visited;
            total.pixels_written += stats.pixels_written;
        }
        Ok(total)
    }
}

fn lookup<'a>(images: &'a BTreeMap<String, Image>, key: &str) -> QuadblitResult<&'a Image> {
    images
        .get(key)
        .ok_or_else(|| QuadblitError::validation(format!("unknown image '{key}'")))
}

fn apply(
    engine: &mut Engine,
    images: &BTreeMap<String, Image>,
    cmd: &Command,
) -> QuadblitResult<DrawStats> {
    match cmd {
        Command::SetComposite { id } => engine.set_composite_mode_id(*id),
        Command::SetBlend {
            mode: BlendSelector::Id(id),
        } => engine.set_blend_mode_id(*id),
        Command::SetBlend {
            mode: BlendSelector::Name(name),
        } => engine.set_blend_mode_name(name),
        Command::SetResample { id } => engine.set_resample_mode_id(*id),
        Command::Clear { width, height } => {
            if width.is_none() && height.is_none() {
                engine.clear();
            } else {
                let dest = engine.destination();
                let w = width.unwrap_or(dest.width());
                let h = height.unwrap_or(dest.height());
                engine.try_clear_to(w, h)?;
            }
        }
        Command::Draw { image, params } => {
            let src = lookup(images, image)?;
            return Ok(engine.draw(&src.view(), params));
        }
        Command::DrawPerspective { image, params } => {
            let src = lookup(images, image)?;
            return Ok(engine.draw_perspective(&src.view(), params));
        }
    }
    Ok(DrawStats::default())
}

#[cfg(test)]
#[path = "../tests/unit/script.rs"]
mod tests;
