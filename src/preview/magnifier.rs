/// Magnified preview of the pixels around the cursor.
///
/// The panel shows every sampled pixel as a `pixel_size` square separated by
/// grid lines. The cursor's row and column are tinted with a colour that
/// contrasts with the sampled area so the exact pixel stays visible.
use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::errors::{RulerError, RulerResult};
use crate::geometry::quadrant::corner_anchor;
use crate::geometry::{
    placement_quadrant, resolve, Padding, Point, Quadrant, Resolution, SampleWindowSize,
    SamplingRect,
};
use crate::preview::traits::PixelSource;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub quadrant: Quadrant,
    /// Top-left corner of the panel in virtual-desktop coordinates.
    pub position: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    /// Top-left of the cell inside the panel.
    pub x: u32,
    pub y: u32,
    pub rgba: [u8; 4],
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagnifiedView {
    pub rect: SamplingRect,
    pub mean: [f64; 3],
    pub overlay: [u8; 4],
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Copy)]
pub struct Magnifier {
    window: SampleWindowSize,
    pixel_size: u32,
    grid_thickness: u32,
    padding: Padding,
    overlay_alpha: u8,
    panel_w: u32,
    panel_h: u32,
}

/// `cells * pixel_size + grid * (cells - 1) + 1`, or `None` on overflow.
fn panel_extent(cells: u32, pixel_size: u32, grid: u32) -> Option<u32> {
    cells
        .checked_mul(pixel_size)?
        .checked_add(grid.checked_mul(cells - 1)?)?
        .checked_add(1)
}

impl Magnifier {
    pub fn new(
        window: SampleWindowSize,
        pixel_size: u32,
        grid_thickness: u32,
        padding: Padding,
        overlay_alpha: u8,
    ) -> RulerResult<Self> {
        if pixel_size == 0 {
            return Err(RulerError::InvalidConfiguration(
                "magnifier pixel_size must be at least 1".into(),
            ));
        }
        let panel_w = panel_extent(window.width(), pixel_size, grid_thickness);
        let panel_h = panel_extent(window.height(), pixel_size, grid_thickness);
        let pitch = pixel_size.checked_add(grid_thickness);
        let (Some(panel_w), Some(panel_h), Some(_)) = (panel_w, panel_h, pitch) else {
            return Err(RulerError::InvalidConfiguration(format!(
                "magnifier panel for a {}x{} window with pixel_size {pixel_size} and \
                 grid_thickness {grid_thickness} does not fit in u32",
                window.width(),
                window.height()
            )));
        };
        Ok(Self {
            window,
            pixel_size,
            grid_thickness,
            padding,
            overlay_alpha,
            panel_w,
            panel_h,
        })
    }

    pub fn window(&self) -> SampleWindowSize {
        self.window
    }

    /// Panel size including the one-pixel border.
    pub fn panel_size(&self) -> (u32, u32) {
        (self.panel_w, self.panel_h)
    }

    fn pitch(&self) -> u32 {
        self.pixel_size + self.grid_thickness
    }

    /// x offsets of the vertical grid lines between columns.
    pub fn vertical_grid_lines(&self) -> Vec<u32> {
        self.grid_lines(self.window.width())
    }

    /// y offsets of the horizontal grid lines between rows.
    pub fn horizontal_grid_lines(&self) -> Vec<u32> {
        self.grid_lines(self.window.height())
    }

    fn grid_lines(&self, cells: u32) -> Vec<u32> {
        (0..cells - 1)
            .map(|i| 1 + (i + 1) * self.pixel_size + self.grid_thickness * i)
            .collect()
    }

    pub fn cell_origin(&self, row: u32, col: u32) -> (u32, u32) {
        (1 + col * self.pitch(), 1 + row * self.pitch())
    }

    pub fn sampling_rect(&self, cursor: Point, tile: Resolution) -> RulerResult<SamplingRect> {
        resolve(cursor, tile, self.window)
    }

    /// Corner of the cursor's tile, diagonally opposite the cursor.
    pub fn placement(&self, cursor: Point, tile: Resolution) -> Placement {
        let quadrant = placement_quadrant(cursor, tile);
        let (w, h) = self.panel_size();
        Placement {
            quadrant,
            position: corner_anchor(quadrant, cursor, tile, self.padding, w, h),
        }
    }

    /// Lay out the sampled `pixels` of `rect` as magnified cells.
    pub fn compose(
        &self,
        cursor: Point,
        rect: SamplingRect,
        pixels: &RgbImage,
    ) -> RulerResult<MagnifiedView> {
        let expected = (self.window.width(), self.window.height());
        if pixels.dimensions() != expected || (rect.width(), rect.height()) != expected {
            return Err(RulerError::Capture(format!(
                "captured {:?} pixels for a {}x{} window",
                pixels.dimensions(),
                expected.0,
                expected.1
            )));
        }

        let mean = mean_colour(pixels);
        let overlay = [
            contrast(mean[0]),
            contrast(mean[1]),
            contrast(mean[2]),
            self.overlay_alpha,
        ];
        let cursor_cell = rect.cell_of(cursor);

        let cells = pixels
            .enumerate_pixels()
            .map(|(col, row, px)| {
                let highlighted = cursor_cell
                    .map(|(r, c)| r == row || c == col)
                    .unwrap_or(false);
                let (x, y) = self.cell_origin(row, col);
                Cell {
                    row,
                    col,
                    x,
                    y,
                    rgba: if highlighted {
                        overlay
                    } else {
                        [px[0], px[1], px[2], 255]
                    },
                    highlighted,
                }
            })
            .collect();

        Ok(MagnifiedView {
            rect,
            mean,
            overlay,
            cells,
        })
    }

    /// Resolve, capture and compose in one step.
    pub fn capture_view(
        &self,
        source: &dyn PixelSource,
        cursor: Point,
        tile: Resolution,
    ) -> RulerResult<MagnifiedView> {
        let rect = self.sampling_rect(cursor, tile)?;
        let pixels = source.capture(&rect)?;
        self.compose(cursor, rect, &pixels)
    }
}

fn mean_colour(pixels: &RgbImage) -> [f64; 3] {
    let mut sum = [0u64; 3];
    for px in pixels.pixels() {
        for (acc, &c) in sum.iter_mut().zip(px.0.iter()) {
            *acc += c as u64;
        }
    }
    let n = (pixels.width() as u64 * pixels.height() as u64).max(1) as f64;
    [sum[0] as f64 / n, sum[1] as f64 / n, sum[2] as f64 / n]
}

fn contrast(mean: f64) -> u8 {
    (255.0 - mean).round().clamp(0.0, 255.0) as u8
}
