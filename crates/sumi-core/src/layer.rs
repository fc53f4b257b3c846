//! Flat layer model.
//!
//! A layer is a named, toggleable tag. Scene objects point at a layer by
//! `layer_id`; the stack never owns objects. Layer ids always equal their
//! index, so deleting a layer renumbers the layers above it and retags
//! their objects.
//!
//! Invariant: the stack is never empty.

use crate::error::{CoreError, CoreResult};
use crate::id::ObjectId;
use crate::model::{LayerId, Scene, SceneObject};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Name given to the layer every new drawing starts with.
pub const MAIN_LAYER_NAME: &str = "Main Layer";

/// A logical group of scene objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    /// Object ids tagged with this layer at the last membership sync.
    /// Written to project files for readers; ignored when loading.
    #[serde(default)]
    pub objects: SmallVec<[ObjectId; 8]>,
}

impl Layer {
    pub fn new(id: LayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            objects: SmallVec::new(),
        }
    }
}

/// The ordered layer list plus the active layer cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStack {
    layers: Vec<Layer>,
    active: LayerId,
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStack {
    /// A stack holding only the main layer.
    pub fn new() -> Self {
        Self {
            layers: vec![Layer::new(0, MAIN_LAYER_NAME)],
            active: 0,
        }
    }

    /// Adopt a layer list read from a project file.
    ///
    /// Ids are renumbered to their index and an empty list falls back to a
    /// fresh main layer. The first layer becomes active.
    pub fn from_layers(layers: Vec<Layer>) -> Self {
        if layers.is_empty() {
            log::warn!("layers: project has no layers, starting with a main layer");
            return Self::new();
        }
        let layers = layers
            .into_iter()
            .enumerate()
            .map(|(idx, mut layer)| {
                layer.id = idx;
                layer
            })
            .collect();
        Self { layers, active: 0 }
    }

    /// Adopt a project file's layer list and retag the scene to match.
    ///
    /// Files may carry gaps in their layer ids. Each object follows its
    /// layer to the layer's new index; tags that name no listed layer go to
    /// layer 0. Returns the stack and the number of such orphans.
    pub fn adopt(layers: Vec<Layer>, scene: &mut Scene) -> (Self, usize) {
        let mut index: HashMap<LayerId, LayerId> = HashMap::with_capacity(layers.len().max(1));
        for (idx, layer) in layers.iter().enumerate() {
            index.entry(layer.id).or_insert(idx);
        }
        if index.is_empty() {
            index.insert(0, 0);
        }
        let stack = Self::from_layers(layers);
        let mut orphans = 0;
        for obj in &mut scene.objects {
            obj.layer_id = match index.get(&obj.layer_id) {
                Some(&idx) => idx,
                None => {
                    orphans += 1;
                    0
                }
            };
        }
        (stack, orphans)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id)
    }

    pub fn active(&self) -> LayerId {
        self.active
    }

    pub fn active_layer(&self) -> &Layer {
        &self.layers[self.active]
    }

    /// Append a new visible layer and make it active.
    pub fn add(&mut self) -> LayerId {
        let id = self.layers.len();
        self.layers.push(Layer::new(id, format!("Layer {}", id + 1)));
        self.active = id;
        log::debug!("layers: added {id}");
        id
    }

    pub fn set_active(&mut self, id: LayerId) -> CoreResult<()> {
        if id >= self.layers.len() {
            return Err(CoreError::UnknownLayer(id));
        }
        self.active = id;
        Ok(())
    }

    /// Flip a layer's visibility and mirror it onto its objects.
    /// Returns the new visibility.
    pub fn toggle_visibility(&mut self, id: LayerId, scene: &mut Scene) -> CoreResult<bool> {
        let layer = self
            .layers
            .get_mut(id)
            .ok_or(CoreError::UnknownLayer(id))?;
        layer.visible = !layer.visible;
        let touched = scene.set_layer_visible(id, layer.visible);
        log::debug!(
            "layers: {id} visible={} ({touched} objects)",
            layer.visible
        );
        Ok(layer.visible)
    }

    /// Delete the active layer together with every object tagged with it.
    ///
    /// Rejected when it is the only layer. The layer below becomes active.
    /// Returns the removed objects.
    pub fn delete_active(&mut self, scene: &mut Scene) -> CoreResult<Vec<SceneObject>> {
        if self.layers.len() <= 1 {
            log::warn!("layers: refusing to delete the last layer");
            return Err(CoreError::LastLayer);
        }
        let id = self.active;
        let removed = scene.remove_layer_objects(id);
        self.layers.remove(id);
        for layer in self.layers.iter_mut().skip(id) {
            layer.id -= 1;
        }
        scene.close_layer_gap(id);
        self.active = id.saturating_sub(1);
        log::debug!(
            "layers: deleted {id} ({} objects), active={}",
            removed.len(),
            self.active
        );
        Ok(removed)
    }

    /// Merge the active layer down into the one below it.
    ///
    /// Rejected at the base layer. Returns the id of the receiving layer,
    /// which is also the new active layer.
    pub fn merge_active(&mut self, scene: &mut Scene) -> CoreResult<LayerId> {
        if self.active == 0 {
            log::warn!("layers: refusing to merge the base layer");
            return Err(CoreError::MergeBaseLayer);
        }
        let target = self.active - 1;
        let moved = scene.retag(self.active, target);
        log::debug!("layers: merging {} into {target} ({moved} objects)", self.active);
        let leftover = self.delete_active(scene)?;
        debug_assert!(leftover.is_empty());
        Ok(target)
    }

    /// Refresh each layer's `objects` list from the scene's tags.
    pub fn sync_membership(&mut self, scene: &Scene) {
        for layer in &mut self.layers {
            layer.objects = scene.objects_on_layer(layer.id).map(|o| o.id).collect();
        }
    }

    /// Layer list with membership refreshed, ready to be written out.
    pub fn snapshot(&self, scene: &Scene) -> Vec<Layer> {
        let mut copy = self.clone();
        copy.sync_membership(scene);
        copy.layers
    }
}
