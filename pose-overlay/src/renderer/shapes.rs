//! Shape primitives - triangle-list vertices for circles and lines
//!
//! Geometry is built in pixel space and mapped to clip space afterwards,
//! so circles stay round on non-square surfaces.

/// Vertex structure for rendering colored shapes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Segments per joint marker
pub const CIRCLE_SEGMENTS: u32 = 12;

/// Convert a pixel position to clip space (-1 to 1), flip Y
pub fn to_clip_space(x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
    (x / width * 2.0 - 1.0, -(y / height * 2.0 - 1.0))
}

/// Map a batch of pixel-space vertices to clip space in place
pub fn map_to_clip_space(vertices: &mut [Vertex], width: f32, height: f32) {
    for v in vertices.iter_mut() {
        let (x, y) = to_clip_space(v.position[0], v.position[1], width, height);
        v.position = [x, y];
    }
}

/// Generate vertices for a filled circle (triangle fan)
pub fn create_circle_vertices(
    cx: f32,
    cy: f32,
    radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let angle1 = (i as f32 / segments as f32) * std::f32::consts::TAU;
        let angle2 = ((i + 1) as f32 / segments as f32) * std::f32::consts::TAU;

        vertices.push(Vertex { position: [cx, cy], color });
        vertices.push(Vertex {
            position: [cx + radius * angle1.cos(), cy + radius * angle1.sin()],
            color,
        });
        vertices.push(Vertex {
            position: [cx + radius * angle2.cos(), cy + radius * angle2.sin()],
            color,
        });
    }

    vertices
}

/// Generate vertices for a line segment (rendered as a quad `width` thick)
pub fn create_line_vertices(
    x1: f32, y1: f32,
    x2: f32, y2: f32,
    width: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let len = (dx * dx + dy * dy).sqrt();

    if len < 0.001 { return vec![]; }

    // Perpendicular half-thickness on each side
    let half = width / 2.0;
    let px = -dy / len * half;
    let py = dx / len * half;

    vec![
        Vertex { position: [x1 - px, y1 - py], color },
        Vertex { position: [x1 + px, y1 + py], color },
        Vertex { position: [x2 + px, y2 + py], color },

        Vertex { position: [x1 - px, y1 - py], color },
        Vertex { position: [x2 + px, y2 + py], color },
        Vertex { position: [x2 - px, y2 - py], color },
    ]
}
