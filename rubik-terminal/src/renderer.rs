/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Vector3};
use rubik_core::{Camera, FaceColors, Label, Mesh, StickerColor, Triangle};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal color for a sticker.
pub fn sticker_color(color: StickerColor) -> Color {
    match color {
        StickerColor::Red => Color::Red,
        StickerColor::Orange => Color::Rgb { r: 255, g: 165, b: 0 },
        StickerColor::Yellow => Color::Yellow,
        StickerColor::White => Color::White,
        StickerColor::Green => Color::Green,
        StickerColor::Blue => Color::Blue,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    character: char,
    color: Color,
}

const EMPTY: Cell = Cell {
    character: ' ',
    color: Color::Reset,
};

/// ASCII renderer that converts cubie meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![EMPTY; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(EMPTY);
    }

    /// Character currently stored at a cell, for inspection.
    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].character)
    }

    /// Draws one cubie's mesh using its face colors.
    pub fn render_cubie(
        &mut self,
        mesh: &Mesh,
        model_matrix: &Matrix4<f32>,
        colors: &FaceColors,
        camera: &Camera,
    ) {
        let view_model = camera.view_matrix() * model_matrix;
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, model_matrix, &view_model, colors, camera);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        model_matrix: &Matrix4<f32>,
        view_model: &Matrix4<f32>,
        colors: &FaceColors,
        camera: &Camera,
    ) {
        // Back-face culling in view space
        let v0 = view_model.transform_point(&triangle.vertices[0].position);
        let normal = view_model.transform_vector(&triangle.calculate_normal()).normalize();
        let to_eye = if camera.mode == rubik_core::ProjectionMode::Perspective {
            -v0.coords
        } else {
            Vector3::z()
        };
        if normal.dot(&to_eye) <= 0.0 {
            return;
        }

        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (coord, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match camera.project_to_screen(
                &vertex.position,
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) {
                Some(projected) => *coord = projected,
                None => return, // Triangle is clipped
            }
        }

        // Light shines from the viewer
        let brightness = normal.dot(&Vector3::z()).max(0.0);

        // Map brightness to character
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
        let char_index = char_index.min(LUMINOSITY_RAMP.len() - 1);
        let cell = Cell {
            character: LUMINOSITY_RAMP[char_index],
            color: sticker_color(colors.get(triangle.face)),
        };

        self.rasterize_triangle(&screen_coords, cell);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], cell: Cell) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.cells[idx] = cell;
                }
            }
        }
    }

    /// Writes a label's text centered on its projected position. Labels are
    /// drawn on top of everything.
    pub fn render_label(&mut self, label: &Label, camera: &Camera) {
        let Some((x, y, _)) = camera.project_to_screen(
            &label.position,
            &Matrix4::identity(),
            self.width as u32,
            self.height as u32,
        ) else {
            return;
        };
        let row = y as usize;
        let start = (x as usize).saturating_sub(label.text.len() / 2);
        for (i, character) in label.text.chars().enumerate() {
            let col = start + i;
            if col < self.width && row < self.height {
                self.cells[row * self.width + col] = Cell {
                    character,
                    color: Color::Magenta,
                };
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.character))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubik_core::{face_labels, Puzzle};

    fn render(renderer: &mut AsciiRenderer, puzzle: &Puzzle, camera: &Camera) {
        let mesh = Mesh::cubie(puzzle.config().cubie_size);
        renderer.clear();
        puzzle.for_each_cubie(|_, transform, colors| {
            renderer.render_cubie(&mesh, &transform.to_homogeneous(), colors, camera);
        });
    }

    #[test]
    fn test_barycentric_inside_and_outside() {
        let inside = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (1.0, 1.0)).unwrap();
        assert!(inside.0 >= 0.0 && inside.1 >= 0.0 && inside.2 >= 0.0);
        let outside = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (5.0, 5.0)).unwrap();
        assert!(outside.0 < 0.0 || outside.1 < 0.0 || outside.2 < 0.0);
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.5, 0.5)).is_none());
    }

    #[test]
    fn test_front_view_shows_green_center() {
        let (w, h) = (80, 40);
        let camera = Camera::new(w as u32, h as u32);
        let mut renderer = AsciiRenderer::new(w, h);
        render(&mut renderer, &Puzzle::default(), &camera);

        let center = renderer.cells[(h / 2) * w + w / 2];
        assert_eq!(center.color, sticker_color(StickerColor::Green));
        assert_eq!(center.character, '@');
        assert_eq!(renderer.char_at(0, 0), Some(' '));
    }

    #[test]
    fn test_turn_changes_front_view() {
        let (w, h) = (80, 40);
        let camera = Camera::new(w as u32, h as u32);
        let mut puzzle = Puzzle::default();
        puzzle
            .rotate(rubik_core::Axis::X, 1, rubik_core::Direction::Positive)
            .unwrap();
        let mut renderer = AsciiRenderer::new(w, h);
        render(&mut renderer, &puzzle, &camera);

        // The middle column now shows the old bottom face.
        let center = renderer.cells[(h / 2) * w + w / 2];
        assert_eq!(center.color, sticker_color(StickerColor::White));
    }

    #[test]
    fn test_labels_drawn() {
        let (w, h) = (80, 40);
        let camera = Camera::new(w as u32, h as u32);
        let mut renderer = AsciiRenderer::new(w, h);
        for label in &face_labels() {
            renderer.render_label(label, &camera);
        }
        assert!(renderer.cells.iter().any(|c| c.character == 'U'));
        assert!(renderer.cells.iter().any(|c| c.character == 'R'));

        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        assert!(!out.is_empty());
    }
}
