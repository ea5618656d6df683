//! Built-in demo scenes. Each uploads its geometry, configures a puller and
//! a program on the given `Gpu`, draws one frame and releases its objects.

use std::f32::consts::{PI, TAU};

use anyhow::Context;
use glam::{Mat4, Vec3, Vec4};
use softgpu_common::{AttributeType, BufferId, InFragment, IndexType, OutFragment, Uniforms};
use softgpu_render::{DrawStats, Gpu};

use crate::config::{RenderConfig, SceneKind};

const UNIFORM_VIEW: u32 = 0;
const UNIFORM_PROJECTION: u32 = 1;
const UNIFORM_LIGHT: u32 = 2;
const UNIFORM_CAMERA: u32 = 3;

const NEAR: f32 = 0.5;
const FAR: f32 = 100.0;
const SHININESS: f32 = 40.0;

/// Create the framebuffer, clear it and draw `config.scene`.
pub fn render(gpu: &mut Gpu, config: &RenderConfig) -> anyhow::Result<DrawStats> {
    gpu.create_framebuffer(config.width, config.height);
    let c = config.clear_color;
    gpu.clear(c.x, c.y, c.z, c.w);

    let stats = match config.scene {
        SceneKind::Triangle => draw_triangle(gpu),
        SceneKind::Cube => draw_cube(gpu, config),
        SceneKind::Phong => draw_phong(gpu, config),
    }
    .with_context(|| format!("drawing {:?} scene", config.scene))?;

    tracing::info!(
        scene = ?config.scene,
        triangles = stats.triangles_rasterized,
        fragments = stats.fragments_written,
        "frame rendered"
    );
    Ok(stats)
}

fn upload<T: bytemuck::Pod>(gpu: &mut Gpu, data: &[T]) -> anyhow::Result<BufferId> {
    let bytes: &[u8] = bytemuck::cast_slice(data);
    let id = gpu.create_buffer(bytes.len());
    gpu.set_buffer_data(id, 0, bytes)?;
    Ok(id)
}

fn perspective(config: &RenderConfig) -> Mat4 {
    Mat4::perspective_rh_gl(PI / 3.0, config.aspect(), NEAR, FAR)
}

// --- Triangle ---

fn draw_triangle(gpu: &mut Gpu) -> anyhow::Result<DrawStats> {
    // x, y, r, g, b
    #[rustfmt::skip]
    let vertices: [f32; 15] = [
        -0.8, -0.8,   1.0, 0.0, 0.0,
         0.8, -0.8,   0.0, 1.0, 0.0,
         0.0,  0.8,   0.0, 0.0, 1.0,
    ];
    let vbo = upload(gpu, &vertices)?;

    let puller = gpu.create_vertex_puller();
    gpu.set_vertex_puller_head(puller, 0, AttributeType::Vec2, 20, 0, vbo)?;
    gpu.set_vertex_puller_head(puller, 1, AttributeType::Vec3, 20, 8, vbo)?;
    gpu.enable_vertex_puller_head(puller, 0)?;
    gpu.enable_vertex_puller_head(puller, 1)?;

    let program = gpu.create_program();
    gpu.attach_shaders(
        program,
        |out, input, _| {
            out.position = input.attributes[0].as_vec2().extend(0.0).extend(1.0);
            out.attributes[0] = input.attributes[1];
        },
        |out, input, _| out.color = input.attributes[0].as_vec3().extend(1.0),
    )?;
    gpu.set_vs2fs_type(program, 0, AttributeType::Vec3)?;

    gpu.bind_vertex_puller(puller)?;
    gpu.use_program(program)?;
    let stats = gpu.draw_triangles(3)?;

    gpu.unbind_vertex_puller();
    gpu.delete_program(program)?;
    gpu.delete_vertex_puller(puller)?;
    gpu.delete_buffer(vbo)?;
    Ok(stats)
}

// --- Cube ---

/// Unit cube centred on the origin: 4 vertices per face (position, colour)
/// and two triangles per face as `u16` indices.
pub fn cube_mesh() -> (Vec<[f32; 6]>, Vec<u16>) {
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::new(1.0, 0.2, 0.2)),
        (Vec3::NEG_X, Vec3::Y, Vec3::new(0.2, 1.0, 0.2)),
        (Vec3::Y, Vec3::Z, Vec3::new(0.2, 0.2, 1.0)),
        (Vec3::NEG_Y, Vec3::Z, Vec3::new(1.0, 1.0, 0.2)),
        (Vec3::Z, Vec3::X, Vec3::new(1.0, 0.2, 1.0)),
        (Vec3::NEG_Z, Vec3::X, Vec3::new(0.2, 1.0, 1.0)),
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, up, color) in faces {
        let side = normal.cross(up);
        let base = vertices.len() as u16;
        for (s, u) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (normal + side * s + up * u) * 0.5;
            vertices.push([p.x, p.y, p.z, color.x, color.y, color.z]);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

fn draw_cube(gpu: &mut Gpu, config: &RenderConfig) -> anyhow::Result<DrawStats> {
    let (vertices, indices) = cube_mesh();
    let vbo = upload(gpu, &vertices)?;
    let ibo = upload(gpu, &indices)?;

    let puller = gpu.create_vertex_puller();
    gpu.set_vertex_puller_indexing(puller, IndexType::U16, ibo)?;
    gpu.set_vertex_puller_head(puller, 0, AttributeType::Vec3, 24, 0, vbo)?;
    gpu.set_vertex_puller_head(puller, 1, AttributeType::Vec3, 24, 12, vbo)?;
    gpu.enable_vertex_puller_head(puller, 0)?;
    gpu.enable_vertex_puller_head(puller, 1)?;

    let program = gpu.create_program();
    gpu.attach_shaders(
        program,
        |out, input, uniforms| {
            let mvp = uniforms.mat4(UNIFORM_PROJECTION) * uniforms.mat4(UNIFORM_VIEW);
            out.position = mvp * input.attributes[0].as_vec3().extend(1.0);
            out.attributes[0] = input.attributes[1];
        },
        |out, input, _| out.color = input.attributes[0].as_vec3().extend(1.0),
    )?;
    gpu.set_vs2fs_type(program, 0, AttributeType::Vec3)?;

    let eye = Vec3::new(0.0, 0.0, config.camera_distance);
    let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y)
        * Mat4::from_rotation_x(0.5)
        * Mat4::from_rotation_y(0.7);
    gpu.program_uniform_matrix_4f(program, UNIFORM_VIEW, view)?;
    gpu.program_uniform_matrix_4f(program, UNIFORM_PROJECTION, perspective(config))?;

    gpu.bind_vertex_puller(puller)?;
    gpu.use_program(program)?;
    let stats = gpu.draw_triangles(indices.len() as u32)?;

    gpu.unbind_vertex_puller();
    gpu.delete_program(program)?;
    gpu.delete_vertex_puller(puller)?;
    gpu.delete_buffer(ibo)?;
    gpu.delete_buffer(vbo)?;
    Ok(stats)
}

// --- Phong ---

/// UV sphere of radius 1: interleaved position and normal per vertex,
/// `u32` triangle indices.
pub fn sphere_mesh(stacks: u32, slices: u32) -> (Vec<[f32; 6]>, Vec<u32>) {
    let mut vertices = Vec::new();
    for i in 0..=stacks {
        let phi = PI * i as f32 / stacks as f32;
        for j in 0..=slices {
            let theta = TAU * j as f32 / slices as f32;
            let n = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            vertices.push([n.x, n.y, n.z, n.x, n.y, n.z]);
        }
    }
    let row = slices + 1;
    let mut indices = Vec::new();
    for i in 0..stacks {
        for j in 0..slices {
            let a = i * row + j;
            let b = a + row;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    (vertices, indices)
}

/// Diffuse colour: wavy green/yellow stripes along x, blended towards white
/// as the normal turns upwards.
fn stripe_texture(position: Vec3, normal: Vec3) -> Vec3 {
    const GREEN: Vec3 = Vec3::new(0.0, 0.5, 0.0);
    const YELLOW: Vec3 = Vec3::new(1.0, 1.0, 0.0);

    let coord = (position.x + (position.y * 10.0).sin() / 10.0) * 10.0;
    let odd = (coord as i32) % 2 != 0;
    let stripe = if odd == (coord >= 0.0) { YELLOW } else { GREEN };
    let snow = if normal.y > 0.0 { normal.y * normal.y } else { 0.0 };
    Vec3::ONE * snow + stripe * (1.0 - snow)
}

fn phong_fragment(out: &mut OutFragment, input: &InFragment, uniforms: &Uniforms) {
    let position = input.attributes[0].as_vec3();
    let normal = input.attributes[1].as_vec3().normalize();
    let to_camera = (uniforms.vec3(UNIFORM_CAMERA) - position).normalize();
    let to_light = (uniforms.vec3(UNIFORM_LIGHT) - position).normalize();

    let n_dot_l = normal.dot(to_light);
    let reflected = (2.0 * n_dot_l * normal - to_light).normalize();
    let specular = to_camera.dot(reflected).max(0.0).powf(SHININESS);
    let diffuse = n_dot_l.max(0.0) * stripe_texture(position, normal);

    let lit = (Vec3::splat(specular) + diffuse).min(Vec3::ONE);
    out.color = lit.extend(1.0);
}

fn draw_phong(gpu: &mut Gpu, config: &RenderConfig) -> anyhow::Result<DrawStats> {
    let (vertices, indices) = sphere_mesh(24, 48);
    let vbo = upload(gpu, &vertices)?;
    let ibo = upload(gpu, &indices)?;

    let puller = gpu.create_vertex_puller();
    gpu.set_vertex_puller_indexing(puller, IndexType::U32, ibo)?;
    gpu.set_vertex_puller_head(puller, 0, AttributeType::Vec3, 24, 0, vbo)?;
    gpu.set_vertex_puller_head(puller, 1, AttributeType::Vec3, 24, 12, vbo)?;
    gpu.enable_vertex_puller_head(puller, 0)?;
    gpu.enable_vertex_puller_head(puller, 1)?;

    let program = gpu.create_program();
    gpu.attach_shaders(
        program,
        |out, input, uniforms| {
            let mvp = uniforms.mat4(UNIFORM_PROJECTION) * uniforms.mat4(UNIFORM_VIEW);
            out.position = mvp * input.attributes[0].as_vec3().extend(1.0);
            out.attributes[0] = input.attributes[0];
            out.attributes[1] = input.attributes[1];
        },
        phong_fragment,
    )?;
    gpu.set_vs2fs_type(program, 0, AttributeType::Vec3)?;
    gpu.set_vs2fs_type(program, 1, AttributeType::Vec3)?;

    let camera = Vec3::new(0.0, 0.6, 1.0).normalize() * config.camera_distance;
    let light = Vec3::new(3.0, 4.0, 3.0);
    gpu.program_uniform_matrix_4f(
        program,
        UNIFORM_VIEW,
        Mat4::look_at_rh(camera, Vec3::ZERO, Vec3::Y),
    )?;
    gpu.program_uniform_matrix_4f(program, UNIFORM_PROJECTION, perspective(config))?;
    gpu.program_uniform_3f(program, UNIFORM_LIGHT, light)?;
    gpu.program_uniform_3f(program, UNIFORM_CAMERA, camera)?;

    gpu.bind_vertex_puller(puller)?;
    gpu.use_program(program)?;
    let stats = gpu.draw_triangles(indices.len() as u32)?;

    gpu.unbind_vertex_puller();
    gpu.delete_program(program)?;
    gpu.delete_vertex_puller(puller)?;
    gpu.delete_buffer(ibo)?;
    gpu.delete_buffer(vbo)?;
    Ok(stats)
}
