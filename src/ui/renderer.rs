//! Board rendering to images
//!
//! Implements board visualization using tiny-skia, with letters and clue
//! numbers rasterized by ab_glyph when a font is available. Separates layout
//! calculation from rendering for better testability.

use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use tiny_skia::{Color, Mask, Paint, PathBuilder, Pixmap, Rect as SkiaRect, Stroke, Transform};
use tracing::debug;

use crate::domain::core::GridCoords;
use crate::ui::view::{BoardView, CellView};

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Failed to create pixmap for rendering")]
    PixmapCreationFailed,

    #[error("Invalid board dimensions: {width}x{height}")]
    InvalidBoardDimensions { width: u32, height: u32 },

    #[error("Could not read font {path}: {source}")]
    FontRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Font {0} could not be parsed")]
    InvalidFont(String),

    #[error("Could not write PNG: {0}")]
    Encode(String),
}

/// Board palette
pub mod palette {
    use tiny_skia::Color;

    pub fn background() -> Color {
        Color::from_rgba8(255, 255, 255, 255)
    }
    pub fn blacked_out() -> Color {
        Color::from_rgba8(34, 34, 34, 255)
    }
    pub fn empty() -> Color {
        Color::from_rgba8(255, 255, 255, 255)
    }
    pub fn highlighted() -> Color {
        Color::from_rgba8(255, 236, 153, 255)
    }
    pub fn focused() -> Color {
        Color::from_rgba8(255, 200, 60, 255)
    }
    pub fn solved() -> Color {
        Color::from_rgba8(46, 160, 67, 255)
    }
    pub fn grid_line() -> Color {
        Color::from_rgba8(90, 90, 90, 255)
    }
    pub fn letter() -> Color {
        Color::from_rgba8(20, 20, 20, 255)
    }
    pub fn solved_letter() -> Color {
        Color::from_rgba8(255, 255, 255, 255)
    }
    pub fn clue_number() -> Color {
        Color::from_rgba8(80, 80, 80, 255)
    }
}

/// Filled background of one cell
#[derive(Debug, Clone)]
pub struct CellRect {
    pub coords: GridCoords,
    pub rect: SkiaRect,
    pub color: Color,
}

/// Represents a single line segment for grid rendering
#[derive(Debug, Clone)]
pub struct Line {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub width: f32,
    pub color: Color,
}

/// Where a glyph run is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `x`,`y` is the centre of the text box
    Center,
    /// `x`,`y` is the top-left corner of the text box
    TopLeft,
}

/// A run of text to draw
#[derive(Debug, Clone)]
pub struct GlyphRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub anchor: Anchor,
    pub font_size: f32,
    pub color: Color,
}

/// Pre-calculated layout for board rendering
///
/// Contains all the geometric information needed to draw a board; the
/// renderer only rasterizes it.
#[derive(Debug, Clone)]
pub struct BoardLayout {
    pub cells: Vec<CellRect>,
    pub lines: Vec<Line>,
    pub glyphs: Vec<GlyphRun>,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl BoardLayout {
    pub const DEFAULT_CELL_SIZE: f32 = 40.0;
    pub const MARGIN: f32 = 8.0;

    /// Create a layout from a board snapshot with square cells of `cell_size` pixels
    pub fn from_view(view: &BoardView, cell_size: f32) -> Result<Self, RendererError> {
        if view.width == 0 || view.height == 0 || cell_size < 1.0 {
            return Err(RendererError::InvalidBoardDimensions {
                width: view.width,
                height: view.height,
            });
        }

        let board_width = view.width as f32 * cell_size;
        let board_height = view.height as f32 * cell_size;
        let mut layout = Self {
            cells: Vec::with_capacity(view.cells.len()),
            lines: Vec::new(),
            glyphs: Vec::new(),
            canvas_width: board_width + 2.0 * Self::MARGIN,
            canvas_height: board_height + 2.0 * Self::MARGIN,
        };

        for cell in &view.cells {
            layout.push_cell(cell, cell_size);
        }
        layout.calculate_grid_lines(view, cell_size);

        Ok(layout)
    }

    fn cell_origin(coords: GridCoords, cell_size: f32) -> (f32, f32) {
        (
            Self::MARGIN + coords.x as f32 * cell_size,
            Self::MARGIN + coords.y as f32 * cell_size,
        )
    }

    fn push_cell(&mut self, cell: &CellView, cell_size: f32) {
        let (x, y) = Self::cell_origin(cell.coords, cell_size);
        let color = if cell.blacked_out {
            palette::blacked_out()
        } else if cell.locked {
            palette::solved()
        } else if cell.focused {
            palette::focused()
        } else if cell.highlighted {
            palette::highlighted()
        } else {
            palette::empty()
        };

        if let Some(rect) = SkiaRect::from_xywh(x, y, cell_size, cell_size) {
            self.cells.push(CellRect {
                coords: cell.coords,
                rect,
                color,
            });
        }

        if cell.blacked_out {
            return;
        }

        if let Some(number) = cell.clue_number {
            self.glyphs.push(GlyphRun {
                text: number.to_string(),
                x: x + cell_size * 0.06,
                y: y + cell_size * 0.04,
                anchor: Anchor::TopLeft,
                font_size: (cell_size * 0.28).max(6.0),
                color: if cell.locked {
                    palette::solved_letter()
                } else {
                    palette::clue_number()
                },
            });
        }

        if let Some(letter) = cell.letter {
            self.glyphs.push(GlyphRun {
                text: letter.to_string(),
                x: x + cell_size * 0.5,
                y: y + cell_size * 0.56,
                anchor: Anchor::Center,
                font_size: (cell_size * 0.6).max(8.0),
                color: if cell.locked {
                    palette::solved_letter()
                } else {
                    palette::letter()
                },
            });
        }
    }

    /// Calculate horizontal and vertical grid lines, borders included
    fn calculate_grid_lines(&mut self, view: &BoardView, cell_size: f32) {
        let line_width = (cell_size / 40.0).max(1.0);
        let left = Self::MARGIN;
        let top = Self::MARGIN;
        let right = left + view.width as f32 * cell_size;
        let bottom = top + view.height as f32 * cell_size;

        for col in 0..=view.width {
            let x = left + col as f32 * cell_size;
            self.lines.push(Line {
                x1: x,
                y1: top,
                x2: x,
                y2: bottom,
                width: line_width,
                color: palette::grid_line(),
            });
        }

        for row in 0..=view.height {
            let y = top + row as f32 * cell_size;
            self.lines.push(Line {
                x1: left,
                y1: y,
                x2: right,
                y2: y,
                width: line_width,
                color: palette::grid_line(),
            });
        }
    }
}

/// Board renderer using tiny-skia
pub struct BoardRenderer {
    /// Font for letters and clue numbers; text is skipped without one
    font: Option<FontVec>,
}

impl BoardRenderer {
    /// Create a renderer that draws cells and lines only
    pub fn new() -> Self {
        Self { font: None }
    }

    /// Create a renderer that also draws text with the given TTF/OTF font
    pub fn with_font_file(path: &Path) -> Result<Self, RendererError> {
        let data = std::fs::read(path).map_err(|source| RendererError::FontRead {
            path: path.display().to_string(),
            source,
        })?;
        let font = FontVec::try_from_vec(data)
            .map_err(|_| RendererError::InvalidFont(path.display().to_string()))?;
        Ok(Self { font: Some(font) })
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Render a board layout to a pixmap
    pub fn render_layout(&self, layout: &BoardLayout) -> Result<Pixmap, RendererError> {
        let width = layout.canvas_width.ceil() as u32;
        let height = layout.canvas_height.ceil() as u32;
        let mut pixmap = Pixmap::new(width, height).ok_or(RendererError::PixmapCreationFailed)?;
        pixmap.fill(palette::background());

        self.render_cells(&mut pixmap, &layout.cells);
        self.render_lines(&mut pixmap, &layout.lines);

        match &self.font {
            Some(font) => render_glyphs(&mut pixmap, font, &layout.glyphs)?,
            None => debug!(glyphs = layout.glyphs.len(), "no font configured, skipping text"),
        }

        Ok(pixmap)
    }

    /// Render a board snapshot straight to a PNG file
    pub fn render_png(&self, view: &BoardView, path: &Path) -> Result<(), RendererError> {
        let layout = BoardLayout::from_view(view, BoardLayout::DEFAULT_CELL_SIZE)?;
        let pixmap = self.render_layout(&layout)?;
        pixmap
            .save_png(path)
            .map_err(|e| RendererError::Encode(e.to_string()))
    }

    fn render_cells(&self, pixmap: &mut Pixmap, cells: &[CellRect]) {
        for cell in cells {
            let mut paint = Paint::default();
            paint.set_color(cell.color);
            pixmap.fill_rect(cell.rect, &paint, Transform::identity(), None);
        }
    }

    fn render_lines(&self, pixmap: &mut Pixmap, lines: &[Line]) {
        for line in lines {
            let mut path_builder = PathBuilder::new();
            path_builder.move_to(line.x1, line.y1);
            path_builder.line_to(line.x2, line.y2);

            if let Some(path) = path_builder.finish() {
                let mut paint = Paint::default();
                paint.set_color(line.color);

                let stroke = Stroke {
                    width: line.width,
                    ..Stroke::default()
                };

                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
    }
}

impl Default for BoardRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rasterizes glyph coverage into one mask per colour, then fills through it
fn render_glyphs(pixmap: &mut Pixmap, font: &FontVec, runs: &[GlyphRun]) -> Result<(), RendererError> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let mut layers: Vec<(Color, Mask)> = Vec::new();

    for run in runs {
        let layer = match layers.iter().position(|(color, _)| *color == run.color) {
            Some(index) => index,
            None => {
                let mask = Mask::new(width, height).ok_or(RendererError::PixmapCreationFailed)?;
                layers.push((run.color, mask));
                layers.len() - 1
            }
        };
        rasterize_run(font, run, &mut layers[layer].1, width, height);
    }

    let Some(full) = SkiaRect::from_xywh(0.0, 0.0, width as f32, height as f32) else {
        return Err(RendererError::InvalidBoardDimensions { width, height });
    };
    for (color, mask) in &layers {
        let mut paint = Paint::default();
        paint.set_color(*color);
        pixmap.fill_rect(full, &paint, Transform::identity(), Some(mask));
    }

    Ok(())
}

fn rasterize_run(font: &FontVec, run: &GlyphRun, mask: &mut Mask, width: u32, height: u32) {
    let scaled = font.as_scaled(PxScale::from(run.font_size));
    let text_width: f32 = run
        .text
        .chars()
        .map(|ch| scaled.h_advance(scaled.glyph_id(ch)))
        .sum();
    let text_height = scaled.ascent() - scaled.descent();

    let (left, top) = match run.anchor {
        Anchor::Center => (run.x - text_width / 2.0, run.y - text_height / 2.0),
        Anchor::TopLeft => (run.x, run.y),
    };
    let baseline = top + scaled.ascent();

    let data = mask.data_mut();
    let mut caret = left;
    for ch in run.text.chars() {
        let mut glyph = scaled.scaled_glyph(ch);
        glyph.position = point(caret, baseline);
        caret += scaled.h_advance(glyph.id);

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let px = bounds.min.x as i64 + gx as i64;
            let py = bounds.min.y as i64 + gy as i64;
            if px < 0 || py < 0 || px >= width as i64 || py >= height as i64 {
                return;
            }
            let index = py as usize * width as usize + px as usize;
            let value = (coverage.clamp(0.0, 1.0) * 255.0) as u8;
            if let Some(slot) = data.get_mut(index) {
                *slot = (*slot).max(value);
            }
        });
    }
}
