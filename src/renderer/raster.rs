//! CPU rasterizer for render trees.
//!
//! Shapes and clips go through tiny-skia (bundled with resvg), icons through
//! usvg/resvg and text through cosmic-text's swash cache. Used for visual
//! tests and by hosts that composite a bitmap instead of owning a GPU surface.

use resvg::tiny_skia::{
    self, FillRule, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Transform as SkiaTransform,
};

use super::commands::DrawCommand;
use super::text::{measure_text, with_text_engine};
use super::tree::{FlattenedCommand, RenderNode, WorldClip};
use super::types::{Shadow, TextAlign};
use crate::error::{Error, Result};
use crate::transform::Transform;
use crate::widgets::{Color, Rect};

/// Number of stacked layers used to approximate a blurred shadow
const SHADOW_STEPS: u32 = 4;

/// Rasterize a render tree onto a `width` x `height` pixmap filled with
/// `background`.
pub fn rasterize(root: &RenderNode, width: u32, height: u32, background: Color) -> Result<Pixmap> {
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| Error::Raster(format!("invalid surface size {}x{}", width, height)))?;
    pixmap.fill(skia_color(background));

    let commands = root.flatten();
    log::debug!("Rasterizing {} draw commands", commands.len());

    // Sibling commands share their clip, so its mask is built once per run
    let mut masks = ClipMasks::default();
    for flat in &commands {
        let mask = match flat.clip {
            Some(clip) => Some(masks.get(&pixmap, clip)?),
            None => None,
        };
        draw_command(&mut pixmap, flat, mask)?;
    }
    Ok(pixmap)
}

/// Most recently built clip mask, keyed by the clip it was built for.
#[derive(Default)]
struct ClipMasks {
    current: Option<(WorldClip, Mask)>,
}

impl ClipMasks {
    fn get(&mut self, pixmap: &Pixmap, clip: WorldClip) -> Result<&Mask> {
        let stale = !matches!(&self.current, Some((cached, _)) if *cached == clip);
        if stale {
            self.current = Some((clip, clip_mask(pixmap, &clip)?));
        }
        self.current
            .as_ref()
            .map(|(_, mask)| mask)
            .ok_or_else(|| Error::Raster("clip mask missing".to_string()))
    }
}

/// Convert a premultiplied pixmap into a straight-alpha RGBA image.
pub fn to_image(pixmap: &Pixmap) -> image::RgbaImage {
    image::RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        let pixel = pixmap
            .pixel(x, y)
            .map(|p| p.demultiply())
            .map(|c| [c.red(), c.green(), c.blue(), c.alpha()])
            .unwrap_or([0, 0, 0, 0]);
        image::Rgba(pixel)
    })
}

fn draw_command(
    pixmap: &mut Pixmap,
    flat: &FlattenedCommand<'_>,
    mask: Option<&Mask>,
) -> Result<()> {
    // A collapsed transform (e.g. the fill circle at rest) covers no pixels
    if flat.world_transform.uniform_scale() < 1e-6 {
        return Ok(());
    }

    let transform = flat.world_transform.to_skia();

    match flat.command {
        DrawCommand::RoundedRect {
            rect,
            color,
            radius,
            shadow,
        } => {
            if let Some(shadow) = shadow {
                draw_shadow(pixmap, rect, *radius, shadow, transform, mask);
            }
            if let Some(path) = rounded_rect_path(rect, *radius) {
                pixmap.fill_path(
                    &path,
                    &paint(*color),
                    FillRule::Winding,
                    transform,
                    mask,
                );
            }
        }
        DrawCommand::Circle {
            center,
            radius,
            color,
        } => {
            if let Some(path) = PathBuilder::from_circle(center.0, center.1, *radius) {
                pixmap.fill_path(
                    &path,
                    &paint(*color),
                    FillRule::Winding,
                    transform,
                    mask,
                );
            }
        }
        DrawCommand::Text {
            text,
            rect,
            color,
            font_size,
            align,
        } => draw_text(
            pixmap,
            text,
            rect,
            *color,
            *font_size,
            *align,
            transform,
            mask,
        ),
        DrawCommand::Icon {
            path,
            view_box,
            rect,
            color,
        } => draw_icon(
            pixmap,
            path,
            *view_box,
            rect,
            *color,
            &flat.world_transform,
            mask,
        )?,
    }
    Ok(())
}

fn clip_mask(pixmap: &Pixmap, clip: &WorldClip) -> Result<Mask> {
    let mut mask = Mask::new(pixmap.width(), pixmap.height())
        .ok_or_else(|| Error::Raster("failed to allocate clip mask".to_string()))?;
    if let Some(path) = rounded_rect_path(&clip.region.rect, clip.region.corner_radius) {
        mask.fill_path(&path, FillRule::Winding, true, clip.transform.to_skia());
    }
    Ok(mask)
}

fn draw_shadow(
    pixmap: &mut Pixmap,
    rect: &Rect,
    radius: f32,
    shadow: &Shadow,
    transform: SkiaTransform,
    mask: Option<&Mask>,
) {
    let layer_alpha = shadow.color.a / SHADOW_STEPS as f32;
    for step in (1..=SHADOW_STEPS).rev() {
        let spread = shadow.blur * step as f32 / SHADOW_STEPS as f32;
        let layer = Rect::new(
            rect.x + shadow.offset.0 - spread,
            rect.y + shadow.offset.1 - spread,
            rect.width + spread * 2.0,
            rect.height + spread * 2.0,
        );
        let color = Color {
            a: layer_alpha,
            ..shadow.color
        };
        if let Some(path) = rounded_rect_path(&layer, radius + spread) {
            pixmap.fill_path(&path, &paint(color), FillRule::Winding, transform, mask);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    pixmap: &mut Pixmap,
    text: &str,
    rect: &Rect,
    color: Color,
    font_size: f32,
    align: TextAlign,
    transform: SkiaTransform,
    mask: Option<&Mask>,
) {
    let size = measure_text(text, font_size, None);
    let x = match align {
        TextAlign::Start => rect.x,
        TextAlign::Center => rect.x + (rect.width - size.width) / 2.0,
        TextAlign::End => rect.x + rect.width - size.width,
    };
    let y = rect.y + (rect.height - size.height) / 2.0;

    with_text_engine(|engine| {
        engine.draw(text, font_size, color, |sx, sy, w, h, span_color| {
            let Some(span) =
                tiny_skia::Rect::from_xywh(x + sx as f32, y + sy as f32, w as f32, h as f32)
            else {
                return;
            };
            pixmap.fill_rect(span, &paint(span_color), transform, mask);
        });
    });
}

fn draw_icon(
    pixmap: &mut Pixmap,
    path: &str,
    view_box: f32,
    rect: &Rect,
    color: Color,
    world_transform: &Transform,
    mask: Option<&Mask>,
) -> Result<()> {
    let svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{vb}" height="{vb}" viewBox="0 0 {vb} {vb}"><path d="{path}" fill="{fill}" fill-opacity="{alpha}"/></svg>"#,
        vb = view_box,
        path = path,
        fill = color.to_hex_string(),
        alpha = color.a,
    );
    let tree = resvg::usvg::Tree::from_str(&svg, &resvg::usvg::Options::default())
        .map_err(|e| Error::Icon(e.to_string()))?;

    let placement = world_transform
        .then(&Transform::translate(rect.x, rect.y))
        .then(&Transform::scale_xy(rect.width / view_box, rect.height / view_box));

    // The layer only covers the icon's device-space bounds
    let Some((left, top, width, height)) = device_bounds(&placement, view_box, pixmap) else {
        return Ok(());
    };
    let mut layer = Pixmap::new(width, height)
        .ok_or_else(|| Error::Raster("failed to allocate icon layer".to_string()))?;
    let local = Transform::translate(-(left as f32), -(top as f32)).then(&placement);
    resvg::render(&tree, local.to_skia(), &mut layer.as_mut());

    pixmap.draw_pixmap(
        left,
        top,
        layer.as_ref(),
        &PixmapPaint::default(),
        SkiaTransform::identity(),
        mask,
    );
    Ok(())
}

/// Pixel bounds of the `view_box` square under `transform`, clipped to the
/// pixmap. `None` when nothing of it lands on the surface.
fn device_bounds(
    transform: &Transform,
    view_box: f32,
    pixmap: &Pixmap,
) -> Option<(i32, i32, u32, u32)> {
    let corners = [
        transform.transform_point(0.0, 0.0),
        transform.transform_point(view_box, 0.0),
        transform.transform_point(0.0, view_box),
        transform.transform_point(view_box, view_box),
    ];
    let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
    let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
    for (x, y) in corners {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    let left = (min_x.floor() as i32).max(0);
    let top = (min_y.floor() as i32).max(0);
    let right = (max_x.ceil() as i32).min(pixmap.width() as i32);
    let bottom = (max_y.ceil() as i32).min(pixmap.height() as i32);
    if right <= left || bottom <= top {
        return None;
    }
    Some((left, top, (right - left) as u32, (bottom - top) as u32))
}

/// Rounded rectangle outline; the radius is clamped to half the shorter side.
fn rounded_rect_path(rect: &Rect, radius: f32) -> Option<tiny_skia::Path> {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    if r <= 0.0 {
        let bounds = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)?;
        return Some(PathBuilder::from_rect(bounds));
    }

    // Cubic approximation of a quarter circle
    let k = r * 0.552_284_8;
    let (left, top) = (rect.x, rect.y);
    let (right, bottom) = (rect.x + rect.width, rect.y + rect.height);

    let mut pb = PathBuilder::new();
    pb.move_to(left + r, top);
    pb.line_to(right - r, top);
    pb.cubic_to(right - r + k, top, right, top + r - k, right, top + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(left + r, bottom);
    pb.cubic_to(left + r - k, bottom, left, bottom - r + k, left, bottom - r);
    pb.line_to(left, top + r);
    pb.cubic_to(left, top + r - k, left + r - k, top, left + r, top);
    pb.close();
    pb.finish()
}

fn skia_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::ClipRegion;

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let c = pixmap.pixel(x, y).unwrap().demultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }

    #[test]
    fn test_background_fill() {
        let root = RenderNode::with_bounds("root", Rect::new(0.0, 0.0, 4.0, 4.0));
        let pixmap = rasterize(&root, 4, 4, Color::WHITE).unwrap();
        assert_eq!(pixel(&pixmap, 2, 2), [255, 255, 255, 255]);
    }

    #[test]
    fn test_clip_hides_overflowing_circle() {
        let root = RenderNode::with_bounds("root", Rect::new(0.0, 0.0, 40.0, 40.0))
            .clip(ClipRegion {
                rect: Rect::new(0.0, 0.0, 20.0, 40.0),
                corner_radius: 0.0,
            })
            .command(DrawCommand::circle((20.0, 20.0), 18.0, Color::BLACK));
        let pixmap = rasterize(&root, 40, 40, Color::WHITE).unwrap();

        assert_eq!(pixel(&pixmap, 10, 20), [0, 0, 0, 255]);
        assert_eq!(pixel(&pixmap, 30, 20), [255, 255, 255, 255]);
    }

    #[test]
    fn test_zero_scale_draws_nothing() {
        let root = RenderNode::with_bounds("root", Rect::new(0.0, 0.0, 20.0, 20.0))
            .transform(Transform::scale_about(0.0, 10.0, 10.0))
            .command(DrawCommand::circle((10.0, 10.0), 10.0, Color::BLACK));
        let pixmap = rasterize(&root, 20, 20, Color::WHITE).unwrap();
        assert_eq!(pixel(&pixmap, 10, 10), [255, 255, 255, 255]);
    }

    #[test]
    fn test_icon_uses_tint() {
        let root = RenderNode::with_bounds("root", Rect::new(0.0, 0.0, 20.0, 20.0)).command(
            DrawCommand::Icon {
                path: "M0 0h10v10h-10z",
                view_box: 10.0,
                rect: Rect::new(0.0, 0.0, 20.0, 20.0),
                color: Color::from_hex(0x3B82F6),
            },
        );
        let pixmap = rasterize(&root, 20, 20, Color::WHITE).unwrap();
        assert_eq!(pixel(&pixmap, 10, 10), [0x3B, 0x82, 0xF6, 255]);
    }

    #[test]
    fn test_icon_layer_lands_at_node_offset() {
        let root = RenderNode::with_bounds("root", Rect::new(0.0, 0.0, 60.0, 40.0)).child(
            RenderNode::with_bounds("icon", Rect::new(30.0, 10.0, 20.0, 20.0)).command(
                DrawCommand::Icon {
                    path: "M0 0h10v10h-10z",
                    view_box: 10.0,
                    rect: Rect::new(0.0, 0.0, 20.0, 20.0),
                    color: Color::BLACK,
                },
            ),
        );
        let pixmap = rasterize(&root, 60, 40, Color::WHITE).unwrap();

        assert_eq!(pixel(&pixmap, 40, 20), [0, 0, 0, 255]);
        assert_eq!(pixel(&pixmap, 31, 11), [0, 0, 0, 255]);
        assert_eq!(pixel(&pixmap, 20, 20), [255, 255, 255, 255]);
        assert_eq!(pixel(&pixmap, 55, 35), [255, 255, 255, 255]);
    }

    #[test]
    fn test_icon_partly_off_surface() {
        let root = RenderNode::with_bounds("icon", Rect::new(-10.0, -10.0, 20.0, 20.0)).command(
            DrawCommand::Icon {
                path: "M0 0h10v10h-10z",
                view_box: 10.0,
                rect: Rect::new(0.0, 0.0, 20.0, 20.0),
                color: Color::BLACK,
            },
        );
        let pixmap = rasterize(&root, 20, 20, Color::WHITE).unwrap();

        assert_eq!(pixel(&pixmap, 5, 5), [0, 0, 0, 255]);
        assert_eq!(pixel(&pixmap, 15, 15), [255, 255, 255, 255]);
    }

    #[test]
    fn test_icon_off_surface_draws_nothing() {
        let root = RenderNode::with_bounds("icon", Rect::new(50.0, 50.0, 20.0, 20.0)).command(
            DrawCommand::Icon {
                path: "M0 0h10v10h-10z",
                view_box: 10.0,
                rect: Rect::new(0.0, 0.0, 20.0, 20.0),
                color: Color::BLACK,
            },
        );
        let pixmap = rasterize(&root, 20, 20, Color::WHITE).unwrap();
        assert_eq!(pixel(&pixmap, 10, 10), [255, 255, 255, 255]);
    }

    #[test]
    fn test_clip_applies_to_every_command_and_child() {
        let clip = ClipRegion {
            rect: Rect::new(0.0, 0.0, 20.0, 40.0),
            corner_radius: 0.0,
        };
        let root = RenderNode::with_bounds("root", Rect::new(0.0, 0.0, 40.0, 40.0))
            .clip(clip)
            .command(DrawCommand::circle((20.0, 10.0), 8.0, Color::BLACK))
            .command(DrawCommand::circle((20.0, 30.0), 8.0, Color::BLACK))
            .child(
                RenderNode::with_bounds("child", Rect::new(0.0, 0.0, 40.0, 40.0))
                    .command(DrawCommand::circle((30.0, 20.0), 8.0, Color::BLACK)),
            );
        // A second, unclipped tree after the clipped one
        let outer = RenderNode::with_bounds("outer", Rect::new(0.0, 0.0, 40.0, 40.0))
            .child(root)
            .child(
                RenderNode::with_bounds("free", Rect::new(0.0, 0.0, 40.0, 40.0))
                    .command(DrawCommand::circle((36.0, 36.0), 3.0, Color::BLACK)),
            );
        let pixmap = rasterize(&outer, 40, 40, Color::WHITE).unwrap();

        assert_eq!(pixel(&pixmap, 15, 10), [0, 0, 0, 255]);
        assert_eq!(pixel(&pixmap, 25, 10), [255, 255, 255, 255]);
        assert_eq!(pixel(&pixmap, 15, 30), [0, 0, 0, 255]);
        assert_eq!(pixel(&pixmap, 25, 30), [255, 255, 255, 255]);
        assert_eq!(pixel(&pixmap, 30, 20), [255, 255, 255, 255]);
        assert_eq!(pixel(&pixmap, 36, 36), [0, 0, 0, 255]);
    }

    #[test]
    fn test_rejects_empty_surface() {
        let root = RenderNode::with_bounds("root", Rect::default());
        assert!(matches!(
            rasterize(&root, 0, 10, Color::WHITE),
            Err(Error::Raster(_))
        ));
    }
}
