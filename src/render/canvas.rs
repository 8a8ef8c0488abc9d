//! 2D canvas painters
//!
//! Thin push of layout data through a `CanvasRenderingContext2d`. Fallible
//! DOM calls whose failure leaves nothing useful to do are discarded.

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::layout::{polygon_points, tornado_glyphs};
use crate::consts::{GROUND_HEIGHT, RING_RADIUS, STAR_RADIUS};
use crate::sim::{DuelState, Star, Tornado};

/// Night-sky background: indigo-to-near-black gradient with a faint shimmer
/// overlay. Painted at load and after any full clear.
pub fn paint_night_sky(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.clear_rect(0.0, 0.0, width, height);

    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
    let _ = gradient.add_color_stop(0.0, "#1a1a40");
    let _ = gradient.add_color_stop(1.0, "#121212");
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, width, height);

    let shimmer = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
    let _ = shimmer.add_color_stop(0.0, "#2a2a50");
    let _ = shimmer.add_color_stop(1.0, "#3a3a60");
    ctx.set_global_alpha(0.08);
    ctx.set_fill_style_canvas_gradient(&shimmer);
    ctx.fill_rect(0.0, 0.0, width, height);
    ctx.set_global_alpha(1.0);
}

/// A filled white star polygon at its click point
pub fn paint_star(ctx: &CanvasRenderingContext2d, star: &Star) {
    let points = polygon_points(star.pos, STAR_RADIUS, star.sides);
    let Some((first, rest)) = points.split_first() else {
        return;
    };

    ctx.begin_path();
    ctx.move_to(first.x as f64, first.y as f64);
    for p in rest {
        ctx.line_to(p.x as f64, p.y as f64);
    }
    ctx.close_path();
    ctx.set_fill_style_str("rgb(255, 255, 255)");
    ctx.fill();
}

/// Soft glow ring marking the current star
pub fn paint_current_ring(ctx: &CanvasRenderingContext2d, pos: Vec2) {
    ctx.begin_path();
    let _ = ctx.arc(
        pos.x as f64,
        pos.y as f64,
        RING_RADIUS as f64,
        0.0,
        std::f64::consts::TAU,
    );
    ctx.set_stroke_style_str("rgba(255, 255, 255, 0.6)");
    ctx.set_line_width(2.0);
    ctx.stroke();
}

/// Connection line between two stars
pub fn paint_connection(ctx: &CanvasRenderingContext2d, from: Vec2, to: Vec2) {
    ctx.begin_path();
    ctx.move_to(from.x as f64, from.y as f64);
    ctx.line_to(to.x as f64, to.y as f64);
    ctx.set_stroke_style_str("rgba(255, 255, 255, 0.8)");
    ctx.set_line_width(2.0);
    ctx.stroke();
}

/// Duel background: sky gradient plus the ground strip
pub fn paint_duel_background(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
    let _ = gradient.add_color_stop(0.0, "#87CEEB");
    let _ = gradient.add_color_stop(1.0, "#E0E0E0");
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, width, height);

    ctx.set_fill_style_str("#8B7355");
    ctx.fill_rect(
        0.0,
        height - GROUND_HEIGHT as f64,
        width,
        GROUND_HEIGHT as f64,
    );
}

/// One tornado's character stack, translated to its base anchor
pub fn paint_tornado(ctx: &CanvasRenderingContext2d, tornado: &Tornado) {
    ctx.save();
    let _ = ctx.translate(tornado.x as f64, tornado.y as f64);
    ctx.set_font("bold 20px monospace");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    for glyph in tornado_glyphs(tornado) {
        ctx.set_fill_style_str(&format!("rgba(0, 0, 0, {})", glyph.alpha));
        let _ = ctx.fill_text(
            &glyph.ch.to_ascii_uppercase().to_string(),
            glyph.pos.x as f64,
            glyph.pos.y as f64,
        );
    }

    ctx.restore();
}

/// A complete duel frame: background, then projectiles, then tornadoes
pub fn paint_duel_frame(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    state: &DuelState,
) {
    ctx.clear_rect(0.0, 0.0, width, height);
    paint_duel_background(ctx, width, height);

    ctx.save();
    ctx.set_font("bold 16px monospace");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str("rgba(255, 0, 0, 0.9)");
    for projectile in &state.projectiles {
        let _ = ctx.fill_text(
            &projectile.glyph.to_ascii_uppercase().to_string(),
            projectile.pos.x as f64,
            projectile.pos.y as f64,
        );
    }
    ctx.restore();

    for tornado in &state.tornadoes {
        paint_tornado(ctx, tornado);
    }
}
