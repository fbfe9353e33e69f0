//! Frame draw pass: snapshot in, primitives out

use glam::Vec2;

use super::frame::FrameView;
use super::shapes::blob_outline;
use super::vertex::colors;
use super::{DrawOptions, Renderer, TextAlign};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, EDGE_ZONE};

/// Radius step between aura gradient rings
const AURA_STEP: f32 = 5.0;
/// Peak aura alpha at the hole center
const AURA_ALPHA: f32 = 100.0;
const HUD_TEXT_SIZE: f32 = 14.0;

/// Draw a whole frame, back to front
pub fn draw_frame(view: &FrameView, opts: &DrawOptions, r: &mut impl Renderer) {
    let canvas = Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT);

    r.fill_rect(Vec2::ZERO, canvas, colors::BACKGROUND);
    draw_edge_zone(r);

    if opts.tint && view.tint.a > 0.0 {
        r.fill_rect(Vec2::ZERO, canvas, view.tint);
    }

    for hole in &view.holes {
        let color = hole.color.aura();
        let mut radius = hole.aura_radius;
        while radius > 0.0 {
            let alpha = AURA_ALPHA * (1.0 - radius / hole.aura_radius);
            r.fill_circle(hole.center, radius, color.with_alpha(alpha));
            radius -= AURA_STEP;
        }
    }

    for b in &view.boxes {
        let half = Vec2::splat(b.size / 2.0);
        // 2px outline centered on the edge
        r.fill_rect(b.pos - half - Vec2::ONE, Vec2::splat(b.size + 2.0), colors::BOX_OUTLINE);
        r.fill_rect(b.pos - half + Vec2::ONE, Vec2::splat(b.size - 2.0), b.color.fill());
    }

    let blob = &view.blob;
    let wobble = match opts.max_wobble {
        Some(cap) => blob.wobble.min(cap),
        None => blob.wobble,
    };
    let outline = blob_outline(blob.pos, blob.radius, blob.points, wobble, blob.phase);
    r.fill_polygon(&outline, colors::BLOB);

    if let Some(color) = view.held {
        r.fill_rect(blob.pos + Vec2::new(-12.0, -40.0), Vec2::splat(24.0), color.fill());
    }

    if opts.hud {
        for (i, line) in view.hud_lines().iter().enumerate() {
            let pos = Vec2::new(10.0, 18.0 + 17.0 * i as f32);
            r.text(pos, line, HUD_TEXT_SIZE, TextAlign::Left, colors::HUD_TEXT);
        }
    }

    if view.victory {
        draw_victory(r);
    }
}

fn draw_edge_zone(r: &mut impl Renderer) {
    let c = colors::EDGE_ZONE;
    r.fill_rect(Vec2::ZERO, Vec2::new(CANVAS_WIDTH, EDGE_ZONE), c);
    r.fill_rect(Vec2::new(0.0, CANVAS_HEIGHT - EDGE_ZONE), Vec2::new(CANVAS_WIDTH, EDGE_ZONE), c);
    r.fill_rect(Vec2::ZERO, Vec2::new(EDGE_ZONE, CANVAS_HEIGHT), c);
    r.fill_rect(Vec2::new(CANVAS_WIDTH - EDGE_ZONE, 0.0), Vec2::new(EDGE_ZONE, CANVAS_HEIGHT), c);
}

fn draw_victory(r: &mut impl Renderer) {
    let canvas = Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    let mid = canvas / 2.0;

    r.fill_rect(Vec2::ZERO, canvas, colors::VICTORY_OVERLAY);
    r.text(mid - Vec2::new(0.0, 40.0), "VICTORY!", 72.0, TextAlign::Center, colors::VICTORY_TEXT);

    let panel = Vec2::new(200.0, 50.0);
    let panel_center = mid + Vec2::new(0.0, 60.0);
    r.fill_rect(panel_center - panel / 2.0, panel, colors::RESTART_PANEL);
    r.text(panel_center, "Press R to Restart", 24.0, TextAlign::Center, colors::RESTART_TEXT);
}
