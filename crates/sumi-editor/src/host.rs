//! Scene host: the authoritative scene plus the viewport it is shown in.
//!
//! Tools never touch the scene directly. They emit `SceneMutation`s which
//! the host applies.

use sumi_core::document::emit_scene;
use sumi_core::id::ObjectId;
use sumi_core::model::*;
use sumi_core::{CoreResult, Viewport};

/// A single edit to the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneMutation {
    /// Append an object on top of the stack.
    AddObject { object: Box<SceneObject> },
    /// Translate an object by (dx, dy) scene units.
    MoveObject { id: ObjectId, dx: f32, dy: f32 },
}

pub struct SceneHost {
    /// The current scene (single source of truth).
    pub scene: Scene,
    pub viewport: Viewport,
}

impl SceneHost {
    pub fn new(scene: Scene) -> Self {
        let viewport = Viewport::new(scene.width, scene.height);
        Self { scene, viewport }
    }

    /// Apply a mutation. Returns false when it referred to a missing object.
    pub fn apply(&mut self, mutation: SceneMutation) -> bool {
        match mutation {
            SceneMutation::AddObject { object } => {
                self.scene.add(*object);
                true
            }
            SceneMutation::MoveObject { id, dx, dy } => match self.scene.get_mut(id) {
                Some(obj) => {
                    obj.left += dx;
                    obj.top += dy;
                    true
                }
                None => false,
            },
        }
    }

    /// The scene as compact JSON, layer tags included.
    pub fn to_json(&self) -> CoreResult<String> {
        emit_scene(&self.scene)
    }
}
