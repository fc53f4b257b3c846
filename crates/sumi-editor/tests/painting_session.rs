//! Integration tests: multi-step painting sessions driven through the
//! studio's pointer, layer and history commands.

use pretty_assertions::assert_eq;
use sumi_editor::input::Modifiers;
use sumi_editor::tools::ToolKind;
use sumi_editor::{Studio, StudioConfig};

fn stroke(studio: &mut Studio, from: (f32, f32), to: (f32, f32)) {
    studio.pointer_down(from.0, from.1, 1.0, Modifiers::NONE);
    studio.pointer_move((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0, 1.0, Modifiers::NONE);
    studio.pointer_move(to.0, to.1, 1.0, Modifiers::NONE);
    studio.pointer_up(to.0, to.1, Modifiers::NONE);
}

fn layer_tags(studio: &Studio) -> Vec<usize> {
    studio.scene().objects().map(|o| o.layer_id).collect()
}

// ─── History ─────────────────────────────────────────────────────────────

#[test]
fn history_cap_drops_the_oldest_states() {
    let config = StudioConfig::from_json(r#"{ "historyCap": 3 }"#).unwrap();
    let mut studio = Studio::seeded(config, 3);
    for i in 0..5 {
        let y = 50.0 + i as f32 * 40.0;
        stroke(&mut studio, (50.0, y), (300.0, y));
    }
    assert_eq!(studio.history().len(), 3);

    assert!(studio.undo());
    assert!(studio.undo());
    assert!(!studio.undo());
    assert_eq!(studio.scene().len(), 3);
}

#[test]
fn new_stroke_after_undo_discards_redo() {
    let mut studio = Studio::seeded(StudioConfig::default(), 4);
    stroke(&mut studio, (10.0, 10.0), (90.0, 10.0));
    stroke(&mut studio, (10.0, 50.0), (90.0, 50.0));
    assert!(studio.undo());
    assert!(studio.can_redo());

    stroke(&mut studio, (10.0, 90.0), (90.0, 90.0));
    assert!(!studio.can_redo());
    assert_eq!(studio.scene().len(), 2);
}

#[test]
fn undo_walks_back_to_the_blank_paper() {
    let mut studio = Studio::seeded(StudioConfig::default(), 5);
    let blank = studio.scene().clone();
    stroke(&mut studio, (10.0, 10.0), (90.0, 10.0));
    studio.set_tool(ToolKind::Pencil);
    stroke(&mut studio, (10.0, 50.0), (90.0, 50.0));
    studio.set_tool(ToolKind::Eraser);
    stroke(&mut studio, (10.0, 30.0), (90.0, 30.0));
    let painted = studio.scene().clone();

    while studio.undo() {}
    assert_eq!(studio.scene(), &blank);
    while studio.redo() {}
    assert_eq!(studio.scene(), &painted);
}

// ─── Layers ──────────────────────────────────────────────────────────────

#[test]
fn strokes_land_on_the_active_layer() {
    let mut studio = Studio::seeded(StudioConfig::default(), 6);
    stroke(&mut studio, (10.0, 10.0), (90.0, 10.0));
    studio.add_layer();
    stroke(&mut studio, (10.0, 50.0), (90.0, 50.0));
    studio.set_active_layer(0).unwrap();
    stroke(&mut studio, (10.0, 90.0), (90.0, 90.0));

    assert_eq!(layer_tags(&studio), vec![0, 1, 0]);
}

#[test]
fn merge_moves_objects_down_and_undo_splits_them_again() {
    let mut studio = Studio::seeded(StudioConfig::default(), 7);
    stroke(&mut studio, (10.0, 10.0), (90.0, 10.0));
    studio.add_layer();
    stroke(&mut studio, (10.0, 50.0), (90.0, 50.0));

    assert_eq!(studio.merge_layer().unwrap(), 0);
    assert_eq!(studio.layers().len(), 1);
    assert_eq!(studio.layers().active(), 0);
    assert_eq!(layer_tags(&studio), vec![0, 0]);

    assert!(studio.undo());
    assert_eq!(studio.layers().len(), 2);
    assert_eq!(studio.layers().active(), 1);
    assert_eq!(layer_tags(&studio), vec![0, 1]);
}

#[test]
fn deleting_a_middle_layer_renumbers_the_ones_above() {
    let mut studio = Studio::seeded(StudioConfig::default(), 8);
    studio.add_layer();
    stroke(&mut studio, (10.0, 10.0), (90.0, 10.0));
    studio.add_layer();
    stroke(&mut studio, (10.0, 50.0), (90.0, 50.0));

    studio.set_active_layer(1).unwrap();
    studio.delete_layer().unwrap();
    assert_eq!(studio.layers().len(), 2);
    assert_eq!(studio.layers().active(), 0);
    assert_eq!(layer_tags(&studio), vec![1]);
    assert_eq!(studio.layers().get(1).unwrap().name, "Layer 3");
}

// ─── Ink bleed ───────────────────────────────────────────────────────────

#[test]
fn lingering_brush_bleeds_more_than_a_quick_one() {
    let quick = {
        let mut studio = Studio::seeded(StudioConfig::default(), 9);
        studio.pointer_down(100.0, 100.0, 1.0, Modifiers::NONE);
        studio.pointer_move(101.0, 100.0, 1.0, Modifiers::NONE);
        studio.particles().len()
    };
    let lingering = {
        let mut studio = Studio::seeded(StudioConfig::default(), 9);
        studio.pointer_down(100.0, 100.0, 1.0, Modifiers::NONE);
        for _ in 0..60 {
            studio.tick(16.0);
        }
        studio.pointer_move(101.0, 100.0, 1.0, Modifiers::NONE);
        studio.particles().len()
    };
    assert!(lingering > quick, "{lingering} <= {quick}");
}

#[test]
fn zero_bleed_brush_only_bleeds_from_slow_motion() {
    let mut studio = Studio::seeded(StudioConfig::default(), 10);
    studio.set_bleed_factor(0.0);
    studio.pointer_down(100.0, 100.0, 1.0, Modifiers::NONE);
    for _ in 0..100 {
        studio.tick(16.0);
    }
    // Intensity is zero but the dwell term alone still emits particles.
    studio.pointer_move(100.0, 100.0, 1.0, Modifiers::NONE);
    let from_motion = studio.particles().len();
    assert_eq!(from_motion, 16);

    studio.pointer_up(100.0, 100.0, Modifiers::NONE);
    assert_eq!(studio.particles().len(), from_motion);
    assert_eq!(studio.scene().len(), 1);
}
