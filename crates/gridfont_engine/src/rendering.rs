use rayon::prelude::*;

use crate::{CHARSET, GlyphMap, GlyphPath, Grid, PointType};

/// Pixel size of one editing surface / sheet cell.
pub const CANVAS_WIDTH: usize = 64;
pub const CANVAS_HEIGHT: usize = 100;

/// Thumbnails per character-sheet row.
pub const SHEET_COLUMNS: usize = 8;

pub const STROKE_WIDTH: f64 = 4.0;

const BACKGROUND: [u8; 4] = [0, 0, 0, 255];
const INK: [u8; 4] = [255, 255, 255, 255];
const GRID_LINE: [u8; 4] = [48, 48, 48, 255];
const MARKER: [u8; 4] = [255, 64, 64, 255];
const MARKER_RADIUS: i64 = 2;

/// A plain RGBA raster surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterCanvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl RasterCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        let mut canvas = RasterCanvas {
            width,
            height,
            pixels: vec![0; width * height * 4],
        };
        canvas.clear(BACKGROUND);
        canvas
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    pub fn clear(&mut self, color: [u8; 4]) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    pub fn set_pixel(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let offset = (y as usize * self.width + x as usize) * 4;
        self.pixels[offset..offset + 4].copy_from_slice(&color);
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let offset = (y * self.width + x) * 4;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
            self.pixels[offset + 3],
        ]
    }
}

#[derive(Clone, Copy, PartialEq)]
enum TraceState {
    Idle,
    Stroking,
    Filling,
}

/// Draws one glyph path onto the canvas: black surface, white ink.
///
/// Every position runs through [`Grid::snap`] first. The call clears and
/// redraws the full surface, so repeated invocations never accumulate.
pub fn render_path(canvas: &mut RasterCanvas, path: &GlyphPath, grid: Grid) {
    canvas.clear(BACKGROUND);

    let mut state = TraceState::Idle;
    let mut subpath: Vec<(f64, f64)> = Vec::new();

    for point in path.points() {
        let (qx, qy) = grid.snap(point.x, point.y);
        let pos = (qx * canvas.width as f64, qy * canvas.height as f64);

        match point.point_type {
            PointType::Line => {
                subpath.clear();
                subpath.push(pos);
                state = TraceState::Stroking;
            }
            PointType::Fill => {
                subpath.clear();
                subpath.push(pos);
                state = TraceState::Filling;
            }
            PointType::None => {
                // In idle state there is no subpath to extend.
                if state != TraceState::Idle {
                    subpath.push(pos);
                }
            }
            PointType::End | PointType::Close => match state {
                TraceState::Stroking => {
                    subpath.push(pos);
                    if point.point_type == PointType::Close {
                        subpath.push(subpath[0]);
                    }
                    stroke_polyline(canvas, &subpath, INK);
                    subpath.clear();
                    state = TraceState::Idle;
                }
                TraceState::Filling => {
                    subpath.push(pos);
                    // Filling closes the polygon implicitly.
                    fill_polygon(canvas, &subpath, INK);
                    subpath.clear();
                    state = TraceState::Idle;
                }
                TraceState::Idle => {
                    // Malformed input, tolerated: a terminator without an
                    // open subpath draws nothing.
                    log::debug!("path terminator without an open subpath, ignored");
                }
            },
        }
    }
    // An unterminated subpath is never stroked or filled.
}

/// Editor preview: the glyph plus the selection marker and grid overlay.
pub fn render_edit_view(canvas: &mut RasterCanvas, path: &GlyphPath, grid: Grid, selection: Option<usize>) {
    render_path(canvas, path, grid);

    if let Some(point) = selection.and_then(|index| path.get(index)) {
        let (qx, qy) = grid.snap(point.x, point.y);
        let cx = (qx * canvas.width as f64) as i64;
        let cy = (qy * canvas.height as f64) as i64;
        for y in cy - MARKER_RADIUS..=cy + MARKER_RADIUS {
            for x in cx - MARKER_RADIUS..=cx + MARKER_RADIUS {
                canvas.set_pixel(x, y, MARKER);
            }
        }
    }

    for i in 1..grid.res_x() {
        let x = (f64::from(i) / f64::from(grid.res_x()) * canvas.width as f64) as i64;
        for y in 0..canvas.height as i64 {
            canvas.set_pixel(x, y, GRID_LINE);
        }
    }
    for i in 1..grid.res_y() {
        let y = (f64::from(i) / f64::from(grid.res_y()) * canvas.height as f64) as i64;
        for x in 0..canvas.width as i64 {
            canvas.set_pixel(x, y, GRID_LINE);
        }
    }
}

/// Renders every charset character's glyph onto a thumbnail sheet,
/// [`SHEET_COLUMNS`] cells per row. Characters without a path get an empty
/// cell. Row bands render in parallel.
pub fn render_sheet(map: &GlyphMap, grid: Grid) -> RasterCanvas {
    let chars: Vec<char> = CHARSET.chars().collect();
    let rows = chars.len().div_ceil(SHEET_COLUMNS);
    let sheet_width = CANVAS_WIDTH * SHEET_COLUMNS;
    let mut sheet = RasterCanvas::new(sheet_width, CANVAS_HEIGHT * rows);

    let band_bytes = CANVAS_HEIGHT * sheet_width * 4;
    sheet.pixels.par_chunks_mut(band_bytes).enumerate().for_each(|(row, band)| {
        let empty = GlyphPath::new();
        let mut cell = RasterCanvas::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        for col in 0..SHEET_COLUMNS {
            let Some(&ch) = chars.get(row * SHEET_COLUMNS + col) else {
                break;
            };
            render_path(&mut cell, map.get(ch).unwrap_or(&empty), grid);
            for y in 0..CANVAS_HEIGHT {
                let src = &cell.pixels[y * CANVAS_WIDTH * 4..(y + 1) * CANVAS_WIDTH * 4];
                let dst = (y * sheet_width + col * CANVAS_WIDTH) * 4;
                band[dst..dst + CANVAS_WIDTH * 4].copy_from_slice(src);
            }
        }
    });

    sheet
}

fn stroke_polyline(canvas: &mut RasterCanvas, points: &[(f64, f64)], color: [u8; 4]) {
    for segment in points.windows(2) {
        stroke_segment(canvas, segment[0], segment[1], color);
    }
}

fn stroke_segment(canvas: &mut RasterCanvas, a: (f64, f64), b: (f64, f64), color: [u8; 4]) {
    let half = STROKE_WIDTH / 2.0;
    // Unclamped coordinates can push the bounding box far off canvas, so
    // clip it before iterating.
    let min_x = ((a.0.min(b.0) - half).floor() as i64).max(0);
    let max_x = ((a.0.max(b.0) + half).ceil() as i64).min(canvas.width as i64 - 1);
    let min_y = ((a.1.min(b.1) - half).floor() as i64).max(0);
    let max_y = ((a.1.max(b.1) + half).ceil() as i64).min(canvas.height as i64 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let center = (x as f64 + 0.5, y as f64 + 0.5);
            if dist_sq_to_segment(center, a, b) <= half * half {
                canvas.set_pixel(x, y, color);
            }
        }
    }
}

fn dist_sq_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (nx, ny) = (a.0 + t * dx, a.1 + t * dy);
    (p.0 - nx) * (p.0 - nx) + (p.1 - ny) * (p.1 - ny)
}

/// Even-odd scanline fill over pixel centers.
fn fill_polygon(canvas: &mut RasterCanvas, points: &[(f64, f64)], color: [u8; 4]) {
    if points.len() < 3 {
        return;
    }
    let mut crossings: Vec<f64> = Vec::new();
    for py in 0..canvas.height as i64 {
        let y = py as f64 + 0.5;
        crossings.clear();
        for i in 0..points.len() {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            if (a.1 <= y) != (b.1 <= y) {
                crossings.push(a.0 + (y - a.1) / (b.1 - a.1) * (b.0 - a.0));
            }
        }
        crossings.sort_unstable_by(f64::total_cmp);
        for span in crossings.chunks_exact(2) {
            let start = span[0].floor().max(0.0) as i64;
            let end = (span[1].ceil() as i64).min(canvas.width as i64);
            for px in start..end {
                let center = px as f64 + 0.5;
                if center >= span[0] && center < span[1] {
                    canvas.set_pixel(px, py, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> RasterCanvas {
        RasterCanvas::new(64, 64)
    }

    #[test]
    fn line_end_strokes_exactly_one_segment() {
        // Quantized on an 8x8 grid: (0.5, 0.5) -> (0.75, 0.5), so one
        // horizontal stroke from pixel x 32 to 48 at y 32.
        let path = GlyphPath::from_triples(&[3.0, 0.5, 0.5, 1.0, 0.8, 0.5]).unwrap();
        let mut canvas = canvas();
        render_path(&mut canvas, &path, Grid::default());

        assert_eq!(INK, canvas.pixel(40, 32));
        assert_eq!(INK, canvas.pixel(33, 31));
        assert_eq!(BACKGROUND, canvas.pixel(40, 27));
        assert_eq!(BACKGROUND, canvas.pixel(20, 32));
        assert_eq!(BACKGROUND, canvas.pixel(54, 32));
    }

    #[test]
    fn far_offscreen_points_stroke_only_the_visible_span() {
        // A dragged point can sit far outside the unit square; the stroke
        // work must stay bounded by the canvas, not the segment extent.
        let path = GlyphPath::from_triples(&[3.0, 0.5, 0.5, 1.0, 1e6, 0.5]).unwrap();
        let mut canvas = canvas();
        render_path(&mut canvas, &path, Grid::default());

        assert_eq!(INK, canvas.pixel(40, 32));
        assert_eq!(INK, canvas.pixel(63, 32));
        assert_eq!(BACKGROUND, canvas.pixel(20, 32));
        assert_eq!(BACKGROUND, canvas.pixel(40, 27));

        // A subpath entirely off canvas draws nothing.
        let offscreen = GlyphPath::from_triples(&[3.0, 5.0, -3.0, 1.0, 1e6, -1e6]).unwrap();
        render_path(&mut canvas, &offscreen, Grid::default());
        assert!(canvas.data().chunks_exact(4).all(|px| *px == BACKGROUND));
    }

    #[test]
    fn fill_covers_the_polygon_interior() {
        let path = GlyphPath::from_triples(&[
            4.0, 0.25, 0.25, //
            0.0, 0.75, 0.25, //
            0.0, 0.75, 0.75, //
            1.0, 0.25, 0.75,
        ])
        .unwrap();
        let mut canvas = canvas();
        render_path(&mut canvas, &path, Grid::default());

        assert_eq!(INK, canvas.pixel(32, 32));
        assert_eq!(INK, canvas.pixel(17, 17));
        assert_eq!(BACKGROUND, canvas.pixel(8, 8));
        assert_eq!(BACKGROUND, canvas.pixel(56, 32));
    }

    #[test]
    fn leading_terminators_render_nothing() {
        // A path whose first point never starts a subpath draws nothing for
        // that run.
        let path = GlyphPath::from_triples(&[0.0, 0.25, 0.25, 1.0, 0.75, 0.75]).unwrap();
        let mut canvas = canvas();
        render_path(&mut canvas, &path, Grid::default());
        assert!(canvas.data().chunks_exact(4).all(|px| *px == BACKGROUND));
    }

    #[test]
    fn unterminated_subpath_is_discarded() {
        let path = GlyphPath::from_triples(&[3.0, 0.25, 0.25, 0.0, 0.75, 0.75]).unwrap();
        let mut canvas = canvas();
        render_path(&mut canvas, &path, Grid::default());
        assert!(canvas.data().chunks_exact(4).all(|px| *px == BACKGROUND));
    }

    #[test]
    fn rendering_is_idempotent() {
        let path = GlyphPath::from_triples(&[3.0, 0.25, 0.25, 0.0, 0.75, 0.25, 2.0, 0.75, 0.75]).unwrap();
        let mut first = canvas();
        render_edit_view(&mut first, &path, Grid::default(), Some(1));
        let mut second = first.clone();
        render_edit_view(&mut second, &path, Grid::default(), Some(1));
        assert_eq!(first, second);
    }

    #[test]
    fn edit_view_overlays_grid_lines_and_marker() {
        let path = GlyphPath::from_triples(&[3.0, 0.5, 0.5, 1.0, 0.8, 0.5]).unwrap();
        let mut canvas = canvas();
        render_edit_view(&mut canvas, &path, Grid::default(), Some(0));

        // Grid line pixels away from the glyph.
        assert_eq!(GRID_LINE, canvas.pixel(8, 2));
        assert_eq!(GRID_LINE, canvas.pixel(2, 8));
        // The marker sits on the selected (snapped) point but grid lines
        // are drawn on top of it, so probe just off the crossing.
        assert_eq!(MARKER, canvas.pixel(33, 31));
    }

    #[test]
    fn sheet_has_one_cell_per_charset_entry() {
        let mut map = GlyphMap::new();
        map.insert(
            'a',
            GlyphPath::from_triples(&[4.0, 0.25, 0.25, 0.0, 0.75, 0.25, 0.0, 0.75, 0.75, 1.0, 0.25, 0.75]).unwrap(),
        );
        let sheet = render_sheet(&map, Grid::default());

        let rows = CHARSET.chars().count().div_ceil(SHEET_COLUMNS);
        assert_eq!(CANVAS_WIDTH * SHEET_COLUMNS, sheet.width());
        assert_eq!(CANVAS_HEIGHT * rows, sheet.height());

        // 'a' is the first cell; its filled box center is ink.
        assert_eq!(INK, sheet.pixel(CANVAS_WIDTH / 2, CANVAS_HEIGHT / 2));
        // 'b' has no path; its cell center stays background.
        assert_eq!(BACKGROUND, sheet.pixel(CANVAS_WIDTH + CANVAS_WIDTH / 2, CANVAS_HEIGHT / 2));
    }
}
