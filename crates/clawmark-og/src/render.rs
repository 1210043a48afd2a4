//! Drawing the preview card.
//!
//! The layout is fixed and designed for 1200x630. Custom sizes keep the same
//! absolute offsets; only horizontal centering follows the canvas width.

use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_ellipse_mut, draw_filled_rect_mut, draw_line_segment_mut,
};
use imageproc::rect::Rect;

use crate::color::gradient_color;
use crate::config::OgConfig;
use crate::fonts::{Face, FontSet, TextRole};
use crate::generator::OgError;

const TITLE_Y: i32 = 180;
const SUBTITLE_Y: i32 = 260;
const DESCRIPTION_Y: i32 = 320;

const ACCENT_RADIUS: i32 = 50;
const ACCENT_INSET: i32 = 100;

const BUTTON_WIDTH: u32 = 300;
const BUTTON_HEIGHT: u32 = 60;
const BUTTON_RADIUS: u32 = 30;
const BUTTON_Y: i32 = 400;
const CTA_OFFSET_Y: i32 = 16;

const FLOURISH_X: i32 = 200;
const FLOURISH_COUNT: i32 = 3;
const FLOURISH_THICKNESS: i32 = 4;

/// Draw the preview card described by `config`.
pub fn render_og_image(config: &OgConfig, fonts: &FontSet) -> Result<RgbImage, OgError> {
    let colors = config.validate()?;
    let (width, height) = (config.width, config.height);
    let (w, h) = (width as i32, height as i32);

    let mut canvas = RgbImage::new(width, height);
    paint_gradient(&mut canvas, colors.bg_start, colors.bg_end);

    draw_filled_ellipse_mut(
        &mut canvas,
        (ACCENT_INSET, ACCENT_INSET),
        ACCENT_RADIUS,
        ACCENT_RADIUS,
        Rgb(colors.accent1),
    );
    draw_filled_ellipse_mut(
        &mut canvas,
        (w - ACCENT_INSET, h - ACCENT_INSET),
        ACCENT_RADIUS,
        ACCENT_RADIUS,
        Rgb(colors.accent2),
    );

    let title_face = fonts.face(TextRole::Title);
    draw_centered(&mut canvas, &title_face, Rgb(colors.text), TITLE_Y, &config.title);

    if !config.subtitle.is_empty() {
        let face = fonts.face(TextRole::Subtitle);
        draw_centered(&mut canvas, &face, Rgb(colors.subtitle), SUBTITLE_Y, &config.subtitle);
    }

    if !config.description.is_empty() {
        let face = fonts.face(TextRole::Description);
        draw_centered(
            &mut canvas,
            &face,
            Rgb(colors.description),
            DESCRIPTION_Y,
            &config.description,
        );
    }

    let button_x = (w - BUTTON_WIDTH as i32).div_euclid(2);
    let button = Rect::at(button_x, BUTTON_Y).of_size(BUTTON_WIDTH, BUTTON_HEIGHT);
    draw_rounded_rect_mut(&mut canvas, button, BUTTON_RADIUS, Rgb(colors.button));

    let cta_face = fonts.face(TextRole::Cta);
    draw_centered(
        &mut canvas,
        &cta_face,
        Rgb(colors.text),
        BUTTON_Y + CTA_OFFSET_Y,
        &config.cta,
    );

    for i in 0..FLOURISH_COUNT {
        let y = 50 + i * 30;
        draw_thick_line(
            &mut canvas,
            (w - FLOURISH_X, y),
            (w - FLOURISH_X + 40, y + 30),
            FLOURISH_THICKNESS,
            Rgb(colors.accent2),
        );
    }

    Ok(canvas)
}

/// Fill the canvas with a top-to-bottom linear gradient.
pub fn paint_gradient(canvas: &mut RgbImage, start: [u8; 3], end: [u8; 3]) {
    let height = canvas.height();
    for (y, row) in canvas.enumerate_rows_mut() {
        let color = Rgb(gradient_color(start, end, y, height));
        for (_, _, pixel) in row {
            *pixel = color;
        }
    }
}

fn draw_centered(canvas: &mut RgbImage, face: &Face<'_>, color: Rgb<u8>, y: i32, text: &str) {
    let text_width = face.text_width(text) as i32;
    let x = (canvas.width() as i32 - text_width).div_euclid(2);
    face.draw(canvas, color, x, y, text);
}

/// Filled rectangle with circular corners of `radius`.
pub fn draw_rounded_rect_mut(canvas: &mut RgbImage, rect: Rect, radius: u32, color: Rgb<u8>) {
    let radius = radius.min(rect.width() / 2).min(rect.height() / 2);
    let r = radius as i32;

    if rect.width() > 2 * radius {
        let body = Rect::at(rect.left() + r, rect.top())
            .of_size(rect.width() - 2 * radius, rect.height());
        draw_filled_rect_mut(canvas, body, color);
    }
    if rect.height() > 2 * radius {
        let body = Rect::at(rect.left(), rect.top() + r)
            .of_size(rect.width(), rect.height() - 2 * radius);
        draw_filled_rect_mut(canvas, body, color);
    }

    let corners = [
        (rect.left() + r, rect.top() + r),
        (rect.right() - r, rect.top() + r),
        (rect.left() + r, rect.bottom() - r),
        (rect.right() - r, rect.bottom() - r),
    ];
    for center in corners {
        draw_filled_circle_mut(canvas, center, r, color);
    }
}

/// Line segment `thickness` pixels wide, widened horizontally.
fn draw_thick_line(
    canvas: &mut RgbImage,
    start: (i32, i32),
    end: (i32, i32),
    thickness: i32,
    color: Rgb<u8>,
) {
    for offset in 0..thickness {
        let dx = (offset - thickness / 2) as f32;
        draw_line_segment_mut(
            canvas,
            (start.0 as f32 + dx, start.1 as f32),
            (end.0 as f32 + dx, end.1 as f32),
            color,
        );
    }
}
