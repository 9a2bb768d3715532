use image::{Rgba, RgbaImage};

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const GRID_GREY: Rgba<u8> = Rgba([240, 242, 245, 255]);
pub const EDGE_GREY: Rgba<u8> = Rgba([203, 213, 225, 255]);
pub const DARK: Rgba<u8> = Rgba([51, 51, 51, 255]);

pub const INPUT_GREEN: Rgba<u8> = Rgba([22, 163, 74, 255]);
pub const HIDDEN_BLUE: Rgba<u8> = Rgba([30, 64, 175, 255]);
pub const OUTPUT_ORANGE: Rgba<u8> = Rgba([234, 88, 12, 255]);

pub const CLASS_BLUE: Rgba<u8> = Rgba([37, 99, 235, 255]);
pub const CLASS_RED: Rgba<u8> = Rgba([220, 38, 38, 255]);
pub const REGION_PALE_BLUE: Rgba<u8> = Rgba([219, 234, 254, 255]);
pub const REGION_PALE_RED: Rgba<u8> = Rgba([254, 226, 226, 255]);

pub const LOSS_RED: Rgba<u8> = Rgba([220, 38, 38, 255]);
pub const ACCURACY_BLUE: Rgba<u8> = Rgba([30, 64, 175, 255]);
pub const PREDICTION_AMBER: Rgba<u8> = Rgba([245, 158, 11, 255]);

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// Allocates a canvas filled with `color`.
pub fn blank_canvas(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color)
}

/// Writes one pixel, ignoring coordinates outside the canvas.
pub fn put(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham line between two canvas points.
pub fn draw_line(img: &mut RgbaImage, from: (f64, f64), to: (f64, f64), color: Rgba<u8>) {
    let (mut x0, mut y0) = (from.0.round() as i64, from.1.round() as i64);
    let (x1, y1) = (to.0.round() as i64, to.1.round() as i64);

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(img, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Connects consecutive points with line segments.
pub fn draw_polyline(img: &mut RgbaImage, points: &[(f64, f64)], color: Rgba<u8>) {
    for pair in points.windows(2) {
        draw_line(img, pair[0], pair[1], color);
    }
}

/// Filled disc centered at `(cx, cy)`.
pub fn fill_disc(img: &mut RgbaImage, center: (f64, f64), radius: f64, color: Rgba<u8>) {
    let (cx, cy) = (center.0.round() as i64, center.1.round() as i64);
    let r = radius.max(1.0).round() as i64;
    let r2 = r * r;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r2 {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Filled axis-aligned rectangle; clips at the canvas edges.
pub fn fill_rect(img: &mut RgbaImage, x: i64, y: i64, w: i64, h: i64, color: Rgba<u8>) {
    for yy in y..y + h {
        for xx in x..x + w {
            put(img, xx, yy, color);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
