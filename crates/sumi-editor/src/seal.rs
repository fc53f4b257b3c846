//! Seal designer: renders a seal once and keeps it ready for stamping.

use crate::error::{StudioError, StudioResult};
use sumi_core::id::ObjectId;
use sumi_core::model::{LayerId, ObjectKind, SceneObject};
use sumi_render::seal::{Font, load_font, render_seal_data_uri};
use sumi_render::SealSpec;

/// Where a freshly applied seal lands, and at what scale.
pub const SEAL_ORIGIN: (f32, f32) = (100.0, 100.0);
pub const SEAL_SCALE: f32 = 0.5;

/// The most recently designed seal.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSeal {
    /// PNG data URI.
    pub src: String,
    pub size: u32,
}

#[derive(Default)]
pub struct SealDesigner {
    stored: Option<StoredSeal>,
    font: Option<Font<'static>>,
}

impl SealDesigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the font used for seal text.
    pub fn set_font(&mut self, bytes: Vec<u8>) -> StudioResult<()> {
        self.font = Some(load_font(bytes)?);
        log::debug!("seal: font loaded");
        Ok(())
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Rasterize `spec` and keep it, replacing any earlier seal.
    pub fn design(&mut self, spec: &SealSpec) -> StudioResult<&StoredSeal> {
        let src = render_seal_data_uri(spec, self.font.as_ref())?;
        log::info!(
            "seal: designed {:?} ({} {})",
            spec.text,
            spec.shape,
            spec.effect
        );
        Ok(self.stored.insert(StoredSeal {
            src,
            size: spec.size,
        }))
    }

    pub fn stored(&self) -> Option<&StoredSeal> {
        self.stored.as_ref()
    }

    /// An image object for the stored seal on `layer`.
    pub fn stamp(&self, layer: LayerId) -> StudioResult<SceneObject> {
        let seal = self.stored.as_ref().ok_or(StudioError::NoSeal)?;
        let mut object = SceneObject::new(
            ObjectId::with_prefix("seal"),
            ObjectKind::Image {
                src: seal.src.clone(),
                width: seal.size,
                height: seal.size,
            },
            layer,
        );
        (object.left, object.top) = SEAL_ORIGIN;
        object.scale_x = SEAL_SCALE;
        object.scale_y = SEAL_SCALE;
        Ok(object)
    }
}
