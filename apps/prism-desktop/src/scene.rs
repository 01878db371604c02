use glam::{Mat4, Vec3, Vec4};
use prism_common::{BasicVertex, LitVertex, TextureFilter, UiVertex, UniformBlock};
use prism_render_wgpu::{Mesh, ShadingRenderer, TextureId, WHITE_TEXTURE, textured_quad_vertices};
use prism_shading::RgbaTexture;

const CAMERA_EYE: Vec3 = Vec3::new(0.0, 1.2, 3.0);
const CLEAR_COLOR: Vec4 = Vec4::new(0.1, 0.1, 0.15, 1.0);
const PANEL_SIZE: u32 = 64;

/// Face colors, sRGB. The lit program decodes them to linear.
const FACE_COLORS: [[f32; 4]; 6] = [
    [1.0, 1.0, 1.0, 1.0],
    [1.0, 0.8, 0.0, 1.0],
    [0.2, 0.6, 1.0, 1.0],
    [1.0, 0.3, 0.3, 1.0],
    [0.4, 1.0, 0.4, 1.0],
    [0.7, 0.7, 0.7, 1.0],
];

/// One cube face: outward normal and its four corners, counter-clockwise
/// seen from outside.
struct Face {
    normal: [f32; 3],
    corners: [[f32; 3]; 4],
}

fn cube_faces() -> [Face; 6] {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let faces = [
        Face { normal: [0.0, 0.0, 1.0],  corners: [[-p, -p,  p], [ p, -p,  p], [ p,  p,  p], [-p,  p,  p]] },
        Face { normal: [0.0, 0.0, -1.0], corners: [[ p, -p, -p], [-p, -p, -p], [-p,  p, -p], [ p,  p, -p]] },
        Face { normal: [1.0, 0.0, 0.0],  corners: [[ p, -p,  p], [ p, -p, -p], [ p,  p, -p], [ p,  p,  p]] },
        Face { normal: [-1.0, 0.0, 0.0], corners: [[-p, -p, -p], [-p, -p,  p], [-p,  p,  p], [-p,  p, -p]] },
        Face { normal: [0.0, 1.0, 0.0],  corners: [[-p,  p,  p], [ p,  p,  p], [ p,  p, -p], [-p,  p, -p]] },
        Face { normal: [0.0, -1.0, 0.0], corners: [[-p, -p, -p], [ p, -p, -p], [ p, -p,  p], [-p, -p,  p]] },
    ];
    faces
}

/// Unit cube as 36 non-indexed vertices, faces in the order given.
pub fn cube_vertices(face_order: &[usize; 6]) -> Vec<LitVertex> {
    const UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
    let faces = cube_faces();
    let mut vertices = Vec::with_capacity(36);
    for &f in face_order {
        let face = &faces[f];
        for corner in [0, 1, 2, 2, 3, 0] {
            vertices.push(LitVertex::new(
                face.corners[corner],
                face.normal,
                FACE_COLORS[f],
                UVS[corner],
            ));
        }
    }
    vertices
}

/// Face indices sorted far to near under `model_view`, so later faces paint
/// over earlier ones without a depth buffer.
pub fn back_to_front(model_view: Mat4) -> [usize; 6] {
    let faces = cube_faces();
    let mut order = [0, 1, 2, 3, 4, 5];
    let depth = |f: usize| {
        let center = faces[f].corners.map(Vec3::from).into_iter().sum::<Vec3>() / 4.0;
        // Right-handed view space looks down -z.
        model_view.transform_point3(center).z
    };
    order.sort_by(|&a, &b| depth(a).total_cmp(&depth(b)));
    order
}

pub fn triangle_vertices() -> [BasicVertex; 3] {
    [
        BasicVertex::new([-0.9, -0.2, 0.5], [1.0, 0.0, 0.0, 1.0], [0.0, 0.0]),
        BasicVertex::new([-0.5, -0.2, 0.5], [0.0, 1.0, 0.0, 1.0], [1.0, 0.0]),
        BasicVertex::new([-0.7, 0.2, 0.5], [0.0, 0.0, 1.0, 1.0], [0.5, 1.0]),
    ]
}

/// Radial gray ramp for the UI panel, one byte per texel.
pub fn panel_pixels(size: u32) -> Vec<u8> {
    let half = size as f32 / 2.0;
    (0..size * size)
        .map(|i| {
            let (x, y) = ((i % size) as f32 + 0.5, (i / size) as f32 + 0.5);
            let d = ((x - half).powi(2) + (y - half).powi(2)).sqrt() / half;
            ((1.0 - d.min(1.0)) * 255.0) as u8
        })
        .collect()
}

pub fn camera_view() -> Mat4 {
    Mat4::look_at_rh(CAMERA_EYE, Vec3::ZERO, Vec3::Y)
}

/// Orthographic, so clip `w` stays 1 and the cube's clip depth stays inside
/// [0, 1] where the lit program leaves vertex colors alone.
pub fn camera_projection(aspect: f32) -> Mat4 {
    let h = 1.2;
    Mat4::orthographic_rh(-h * aspect, h * aspect, -h, h, 0.1, 10.0)
}

/// Everything the demo draws, in draw order.
pub struct Scene {
    cube: Mesh<LitVertex>,
    checker: TextureId,
    triangle: Mesh<BasicVertex>,
    panel: Mesh<UiVertex>,
    panel_texture: TextureId,
    angle: f32,
}

impl Scene {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        renderer: &mut ShadingRenderer,
    ) -> anyhow::Result<Self> {
        let checker_image =
            RgbaTexture::checkerboard(8, 8, 1, [255, 255, 255, 255], [90, 90, 90, 255])?;
        let checker = renderer.create_texture(
            device,
            checker_image.width(),
            checker_image.height(),
            TextureFilter::Nearest,
        )?;
        renderer.write_rgba_texture(queue, checker, checker_image.as_bytes())?;

        let panel_texture =
            renderer.create_texture(device, PANEL_SIZE, PANEL_SIZE, TextureFilter::Linear)?;
        renderer.write_monochrome_texture(queue, panel_texture, &panel_pixels(PANEL_SIZE))?;

        Ok(Self {
            cube: Mesh::new(device, &cube_vertices(&[0, 1, 2, 3, 4, 5])),
            checker,
            triangle: Mesh::new(device, &triangle_vertices()),
            panel: Mesh::new(device, &textured_quad_vertices()),
            panel_texture,
            angle: 0.0,
        })
    }

    pub fn update(&mut self, dt: f32) {
        self.angle = (self.angle + dt * 0.8) % std::f32::consts::TAU;
    }

    fn cube_model(&self) -> Mat4 {
        Mat4::from_rotation_y(self.angle) * Mat4::from_rotation_x(self.angle * 0.5)
    }

    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        renderer: &mut ShadingRenderer,
        target: &wgpu::TextureView,
        aspect: f32,
    ) -> anyhow::Result<()> {
        renderer.begin_frame();
        renderer.clear(device, queue, target, CLEAR_COLOR);

        let model = self.cube_model();
        let view = camera_view();
        self.cube
            .write(queue, &cube_vertices(&back_to_front(view * model)))?;
        let cube_uniforms = UniformBlock::new(camera_projection(aspect) * view * model, Vec4::ONE);
        renderer.draw(
            device,
            queue,
            target,
            &self.cube,
            self.checker,
            &cube_uniforms,
        )?;

        let triangle_uniforms = UniformBlock::new(Mat4::IDENTITY, Vec4::new(1.0, 0.9, 0.6, 1.0));
        renderer.draw(
            device,
            queue,
            target,
            &self.triangle,
            WHITE_TEXTURE,
            &triangle_uniforms,
        )?;

        // Unit quad placed in the lower-right corner of clip space.
        let panel_transform = Mat4::from_translation(Vec3::new(0.45, -0.95, 0.0))
            * Mat4::from_scale(Vec3::new(0.5, 0.5, 1.0));
        let panel_uniforms = UniformBlock::new(panel_transform, Vec4::new(0.0, 0.1, 0.3, -0.2));
        renderer.draw(
            device,
            queue,
            target,
            &self.panel,
            self.panel_texture,
            &panel_uniforms,
        )?;

        renderer.end_frame();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_six_faces_of_two_triangles() {
        let vertices = cube_vertices(&[0, 1, 2, 3, 4, 5]);
        assert_eq!(vertices.len(), 36);
        for v in &vertices {
            assert!((Vec3::from(v.normal).length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn cube_faces_wind_outward() {
        for face in cube_faces() {
            let [a, b, c, _] = face.corners.map(Vec3::from);
            let n = (b - a).cross(c - a).normalize();
            assert!((n - Vec3::from(face.normal)).length() < 1e-6);
        }
    }

    #[test]
    fn front_face_is_drawn_last() {
        let order = back_to_front(camera_view());
        // +Z faces the camera from the default eye position.
        assert_eq!(order[5], 0);
        assert_eq!(order[0], 1);
    }

    #[test]
    fn panel_is_brightest_in_the_middle() {
        let pixels = panel_pixels(8);
        assert_eq!(pixels.len(), 64);
        let center = pixels[4 * 8 + 4];
        assert!(center > pixels[0]);
        assert_eq!(pixels[0], 0);
    }

    #[test]
    fn projection_keeps_cube_inside_depth_range() {
        let mvp = camera_projection(16.0 / 9.0) * camera_view();
        for v in cube_vertices(&[0, 1, 2, 3, 4, 5]) {
            let clip = mvp * Vec3::from(v.position).extend(1.0);
            assert_eq!(clip.w, 1.0);
            assert!(clip.z > 0.0 && clip.z < 1.0, "{clip:?}");
        }
    }
}
