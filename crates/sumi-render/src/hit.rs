//! Hit testing: point → object lookup.
//!
//! Walks the scene back-to-front (last painted = topmost). Images hit on
//! their bounds; strokes hit only near the stroked path itself.

use crate::paint::{object_affine, to_bez_path};
use kurbo::{ParamCurveNearest, Point};
use sumi_core::id::ObjectId;
use sumi_core::model::*;

const NEAREST_ACCURACY: f64 = 1e-3;

/// Find the topmost visible object at scene position (px, py).
///
/// `tolerance` widens strokes by that many scene units on each side.
/// Returns `None` on empty paper.
pub fn hit_test(scene: &Scene, px: f32, py: f32, tolerance: f32) -> Option<ObjectId> {
    scene
        .objects
        .iter()
        .rev()
        .filter(|o| o.visible)
        .find(|o| object_contains(o, px, py, tolerance))
        .map(|o| o.id)
}

fn object_contains(obj: &SceneObject, px: f32, py: f32, tolerance: f32) -> bool {
    let b = obj.bounds();
    let padded = Bounds {
        x: b.x - tolerance,
        y: b.y - tolerance,
        width: b.width + 2.0 * tolerance,
        height: b.height + 2.0 * tolerance,
    };
    if !padded.contains(px, py) {
        return false;
    }
    match &obj.kind {
        ObjectKind::Image { .. } => b.contains(px, py),
        ObjectKind::Path { commands, stroke } => {
            let affine = object_affine(obj);
            if affine.determinant().abs() < f64::EPSILON {
                return false;
            }
            let local = affine.inverse() * Point::new(px as f64, py as f64);
            let reach = (stroke.width / 2.0 + tolerance) as f64;
            let path = to_bez_path(commands);

            let mut segments = path.segments().peekable();
            if segments.peek().is_none() {
                // A lone move-to: treat as a dot.
                return commands.first().and_then(PathCmd::end_point).is_some_and(|(x, y)| {
                    local.distance(Point::new(x as f64, y as f64)) <= reach
                });
            }
            segments.any(|seg| seg.nearest(local, NEAREST_ACCURACY).distance_sq <= reach * reach)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal() -> SceneObject {
        SceneObject::stroke(
            vec![PathCmd::MoveTo(0.0, 0.0), PathCmd::LineTo(100.0, 100.0)],
            StrokeStyle {
                width: 4.0,
                ..StrokeStyle::default()
            },
            0,
        )
    }

    fn seal_at(name: &str, left: f32, top: f32) -> SceneObject {
        let mut obj = SceneObject::new(
            ObjectId::intern(name),
            ObjectKind::Image {
                src: String::new(),
                width: 200,
                height: 200,
            },
            0,
        );
        obj.left = left;
        obj.top = top;
        obj.scale_x = 0.5;
        obj.scale_y = 0.5;
        obj
    }

    #[test]
    fn stroke_hits_near_the_line_only() {
        let mut scene = Scene::default();
        let line = diagonal();
        let id = line.id;
        scene.add(line);

        assert_eq!(hit_test(&scene, 50.0, 51.0, 0.0), Some(id));
        // Inside the bounding box but far from the stroke.
        assert_eq!(hit_test(&scene, 90.0, 10.0, 0.0), None);
        assert_eq!(hit_test(&scene, 50.0, 56.0, 5.0), Some(id));
    }

    #[test]
    fn topmost_wins_and_hidden_is_skipped() {
        let mut scene = Scene::default();
        let below = seal_at("hit_below", 0.0, 0.0);
        let above = seal_at("hit_above", 50.0, 50.0);
        let (below_id, above_id) = (below.id, above.id);
        scene.add(below);
        scene.add(above);

        assert_eq!(hit_test(&scene, 75.0, 75.0, 0.0), Some(above_id));
        assert_eq!(hit_test(&scene, 25.0, 25.0, 0.0), Some(below_id));
        assert_eq!(hit_test(&scene, 300.0, 300.0, 0.0), None);

        scene.get_mut(above_id).unwrap().visible = false;
        assert_eq!(hit_test(&scene, 75.0, 75.0, 0.0), Some(below_id));
    }
}
