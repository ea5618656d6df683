use glam::{Vec2, Vec4};
use softgpu_common::{AttributeType, BufferId, GpuError, IndexType, ProgramId, VertexPullerId};
use softgpu_render::Gpu;
use softgpu_render::raster::edge;

fn upload<T: bytemuck::Pod>(gpu: &mut Gpu, data: &[T]) -> BufferId {
    let bytes: &[u8] = bytemuck::cast_slice(data);
    let id = gpu.create_buffer(bytes.len());
    gpu.set_buffer_data(id, 0, bytes).unwrap();
    id
}

/// Puller with one vec4 position head over `positions`, bound.
fn bind_positions(gpu: &mut Gpu, positions: &[[f32; 4]]) -> VertexPullerId {
    let vbo = upload(gpu, positions);
    let puller = gpu.create_vertex_puller();
    gpu.set_vertex_puller_head(puller, 0, AttributeType::Vec4, 16, 0, vbo)
        .unwrap();
    gpu.enable_vertex_puller_head(puller, 0).unwrap();
    gpu.bind_vertex_puller(puller).unwrap();
    puller
}

/// Program that forwards position and paints a uniform colour (uniform 0).
fn solid_program(gpu: &mut Gpu, color: Vec4) -> ProgramId {
    let program = gpu.create_program();
    gpu.attach_shaders(
        program,
        |out, input, _| out.position = input.attributes[0].as_vec4(),
        |out, _, uniforms| out.color = uniforms.vec4(0),
    )
    .unwrap();
    gpu.program_uniform_4f(program, 0, color).unwrap();
    gpu.use_program(program).unwrap();
    program
}

fn gpu_with_framebuffer(width: u32, height: u32) -> Gpu {
    let mut gpu = Gpu::new();
    gpu.create_framebuffer(width, height);
    gpu.clear(0.0, 0.0, 0.0, 1.0);
    gpu
}

#[test]
fn solid_triangle_covers_exactly_the_inside_pixels() {
    let mut gpu = gpu_with_framebuffer(16, 12);
    bind_positions(
        &mut gpu,
        &[
            [-0.8, -0.9, 0.0, 1.0],
            [0.7, -0.3, 0.0, 1.0],
            [-0.2, 0.85, 0.0, 1.0],
        ],
    );
    solid_program(&mut gpu, Vec4::new(1.0, 0.0, 0.0, 1.0));
    let stats = gpu.draw_triangles(3).unwrap();

    let screen = [(-0.8, -0.9), (0.7, -0.3), (-0.2, 0.85)]
        .map(|(x, y)| Vec2::new((x + 1.0) * 8.0, (y + 1.0) * 6.0));
    let [s0, s1, s2] = screen;
    // Clockwise on screen.
    assert!(edge(s0, s1, s2) < 0.0);

    let fb = gpu.framebuffer();
    let mut inside = 0;
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let covered =
                edge(s2, s1, p) >= 0.0 && edge(s0, s2, p) >= 0.0 && edge(s1, s0, p) >= 0.0;
            let expected = if covered {
                inside += 1;
                [255, 0, 0, 255]
            } else {
                [0, 0, 0, 255]
            };
            assert_eq!(fb.pixel(x, y), Some(expected), "pixel ({x}, {y})");
        }
    }
    assert!(inside > 0);
    assert_eq!(stats.fragments_written, inside);
}

#[test]
fn winding_does_not_matter() {
    // Screen positions (1, 2) (15, 6) (9, 15).
    let verts = [
        [-0.875, -0.75, 0.0, 1.0],
        [0.875, -0.25, 0.0, 1.0],
        [0.125, 0.875, 0.0, 1.0],
    ];
    let mut ccw = gpu_with_framebuffer(16, 16);
    bind_positions(&mut ccw, &verts);
    solid_program(&mut ccw, Vec4::ONE);
    ccw.draw_triangles(3).unwrap();

    let mut cw = gpu_with_framebuffer(16, 16);
    bind_positions(&mut cw, &[verts[0], verts[2], verts[1]]);
    solid_program(&mut cw, Vec4::ONE);
    cw.draw_triangles(3).unwrap();

    assert_eq!(ccw.framebuffer_color(), cw.framebuffer_color());
    assert!(ccw.framebuffer_color().chunks_exact(4).any(|px| px == [255; 4]));
}

#[test]
fn nearer_triangle_wins_in_either_draw_order() {
    let full = |z: f32| {
        [
            [-1.0, -1.0, z, 1.0],
            [3.0, -1.0, z, 1.0],
            [-1.0, 3.0, z, 1.0],
        ]
    };
    let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
    let blue = Vec4::new(0.0, 0.0, 1.0, 1.0);

    for near_first in [true, false] {
        let mut gpu = gpu_with_framebuffer(4, 4);
        let order = if near_first {
            [(0.2, red), (0.6, blue)]
        } else {
            [(0.6, blue), (0.2, red)]
        };
        for (z, color) in order {
            bind_positions(&mut gpu, &full(z));
            solid_program(&mut gpu, color);
            gpu.draw_triangles(3).unwrap();
        }
        for px in gpu.framebuffer_color().chunks_exact(4) {
            assert_eq!(px, &[255, 0, 0, 255]);
        }
        assert!(gpu.framebuffer_depth().iter().all(|&d| (d - 0.2).abs() < 1e-6));
    }
}

#[test]
fn nearer_triangle_wins_within_one_draw() {
    let full = |z: f32, color: [f32; 3]| {
        [[-1.0, -1.0], [3.0, -1.0], [-1.0, 3.0]].map(|[x, y]| {
            [x, y, z, 1.0, color[0], color[1], color[2]]
        })
    };
    let near = full(0.2, [1.0, 0.0, 0.0]);
    let far = full(0.6, [0.0, 0.0, 1.0]);

    for near_first in [true, false] {
        let mut gpu = gpu_with_framebuffer(4, 4);
        let (first, second) = if near_first { (near, far) } else { (far, near) };
        let data: Vec<[f32; 7]> = first.into_iter().chain(second).collect();
        let vbo = upload(&mut gpu, &data);
        let puller = gpu.create_vertex_puller();
        gpu.set_vertex_puller_head(puller, 0, AttributeType::Vec4, 28, 0, vbo)
            .unwrap();
        gpu.set_vertex_puller_head(puller, 1, AttributeType::Vec3, 28, 16, vbo)
            .unwrap();
        gpu.enable_vertex_puller_head(puller, 0).unwrap();
        gpu.enable_vertex_puller_head(puller, 1).unwrap();
        gpu.bind_vertex_puller(puller).unwrap();

        let program = gpu.create_program();
        gpu.attach_shaders(
            program,
            |out, input, _| {
                out.position = input.attributes[0].as_vec4();
                out.attributes[0] = input.attributes[1];
            },
            |out, input, _| out.color = input.attributes[0].as_vec3().extend(1.0),
        )
        .unwrap();
        gpu.set_vs2fs_type(program, 0, AttributeType::Vec3).unwrap();
        gpu.use_program(program).unwrap();

        let stats = gpu.draw_triangles(6).unwrap();
        assert_eq!(stats.triangles_rasterized, 2);
        for px in gpu.framebuffer_color().chunks_exact(4) {
            assert_eq!(px, &[255, 0, 0, 255], "near first: {near_first}");
        }
        assert!(gpu.framebuffer_depth().iter().all(|&d| (d - 0.2).abs() < 1e-6));
    }
}

#[test]
fn triangle_behind_near_plane_is_clipped() {
    let mut gpu = gpu_with_framebuffer(8, 8);
    // Vertex 2 has w + z < 0.
    bind_positions(
        &mut gpu,
        &[
            [-1.0, -1.0, 0.0, 1.0],
            [1.0, -1.0, 0.0, 1.0],
            [0.0, 1.0, -3.0, 1.0],
        ],
    );
    solid_program(&mut gpu, Vec4::ONE);
    let stats = gpu.draw_triangles(3).unwrap();
    assert_eq!(stats.triangles_assembled, 1);
    assert_eq!(stats.triangles_rasterized, 2);
    assert!(stats.fragments_written > 0);
    // Clipped at 1/3 of the way up: the top rows stay clear.
    assert_eq!(gpu.framebuffer().pixel(4, 7), Some([0, 0, 0, 255]));
    assert_eq!(gpu.framebuffer().pixel(4, 0), Some([255; 4]));
}

#[test]
fn two_vertices_behind_leave_one_triangle() {
    let mut gpu = gpu_with_framebuffer(8, 8);
    bind_positions(
        &mut gpu,
        &[
            [-1.0, -1.0, 0.0, 1.0],
            [1.0, -1.0, -3.0, 1.0],
            [0.0, 1.0, -3.0, 1.0],
        ],
    );
    solid_program(&mut gpu, Vec4::ONE);
    let stats = gpu.draw_triangles(3).unwrap();
    assert_eq!(stats.triangles_rasterized, 1);
}

#[test]
fn fully_clipped_triangle_writes_nothing() {
    let mut gpu = gpu_with_framebuffer(8, 8);
    bind_positions(
        &mut gpu,
        &[
            [-1.0, -1.0, -2.0, 1.0],
            [1.0, -1.0, -2.0, 1.0],
            [0.0, 1.0, -2.0, 1.0],
        ],
    );
    solid_program(&mut gpu, Vec4::ONE);
    let stats = gpu.draw_triangles(3).unwrap();
    assert_eq!(stats.triangles_rasterized, 0);
    assert_eq!(stats.fragments_shaded, 0);
}

#[test]
fn indexed_draw_visits_vertices_in_index_order() {
    let mut gpu = gpu_with_framebuffer(4, 4);
    let puller = bind_positions(
        &mut gpu,
        &[
            [-1.0, -1.0, 0.0, 1.0],
            [3.0, -1.0, 0.0, 1.0],
            [-1.0, 3.0, 0.0, 1.0],
        ],
    );
    let ibo = upload(&mut gpu, &[2u16, 1, 0]);
    gpu.set_vertex_puller_indexing(puller, IndexType::U16, ibo)
        .unwrap();

    let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = std::sync::Arc::clone(&seen);
    let program = gpu.create_program();
    gpu.attach_shaders(
        program,
        move |out, input, _| {
            sink.lock().unwrap().push(input.vertex_id);
            out.position = input.attributes[0].as_vec4();
        },
        |out, _, _| out.color = Vec4::ONE,
    )
    .unwrap();
    gpu.use_program(program).unwrap();

    gpu.draw_triangles(3).unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![2, 1, 0]);
    assert_eq!(gpu.framebuffer().pixel(3, 3), Some([255; 4]));

    seen.lock().unwrap().clear();
    gpu.disable_vertex_puller_indexing(puller).unwrap();
    gpu.draw_triangles(3).unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
}

#[test]
fn varyings_blend_across_the_triangle() {
    let mut gpu = gpu_with_framebuffer(2, 2);
    // Position in head 0, colour in head 1, interleaved.
    #[rustfmt::skip]
    let data: [f32; 21] = [
        -1.0, -1.0, 0.0, 1.0,   1.0, 0.0, 0.0,
         3.0, -1.0, 0.0, 1.0,   0.0, 1.0, 0.0,
        -1.0,  3.0, 0.0, 1.0,   0.0, 0.0, 1.0,
    ];
    let vbo = upload(&mut gpu, &data);
    let puller = gpu.create_vertex_puller();
    gpu.set_vertex_puller_head(puller, 0, AttributeType::Vec4, 28, 0, vbo)
        .unwrap();
    gpu.set_vertex_puller_head(puller, 1, AttributeType::Vec3, 28, 16, vbo)
        .unwrap();
    gpu.enable_vertex_puller_head(puller, 0).unwrap();
    gpu.enable_vertex_puller_head(puller, 1).unwrap();
    gpu.bind_vertex_puller(puller).unwrap();

    let program = gpu.create_program();
    gpu.attach_shaders(
        program,
        |out, input, _| {
            out.position = input.attributes[0].as_vec4();
            out.attributes[0] = input.attributes[1];
        },
        |out, input, _| out.color = input.attributes[0].as_vec3().extend(1.0),
    )
    .unwrap();
    gpu.set_vs2fs_type(program, 0, AttributeType::Vec3).unwrap();
    gpu.use_program(program).unwrap();
    gpu.draw_triangles(3).unwrap();

    // Screen triangle (0,0) (4,0) (0,4); centre (0.5, 0.5) weights
    // 0.75 / 0.125 / 0.125.
    let fb = gpu.framebuffer();
    assert_eq!(fb.pixel(0, 0), Some([191, 32, 32, 255]));
    // (1.5, 1.5): 0.25 / 0.375 / 0.375.
    assert_eq!(fb.pixel(1, 1), Some([64, 96, 96, 255]));
}

#[test]
fn failed_draw_leaves_framebuffer_untouched() {
    let mut gpu = gpu_with_framebuffer(4, 4);
    gpu.clear(0.2, 0.4, 0.6, 1.0);
    let before = gpu.framebuffer().clone();

    let puller = bind_positions(
        &mut gpu,
        &[
            [-1.0, -1.0, 0.0, 1.0],
            [3.0, -1.0, 0.0, 1.0],
            [-1.0, 3.0, 0.0, 1.0],
        ],
    );
    solid_program(&mut gpu, Vec4::ONE);
    // Index 7 is past the end of the vertex buffer.
    let ibo = upload(&mut gpu, &[0u8, 1, 2, 0, 1, 7]);
    gpu.set_vertex_puller_indexing(puller, IndexType::U8, ibo)
        .unwrap();

    assert!(matches!(
        gpu.draw_triangles(6),
        Err(GpuError::BufferOutOfBounds { .. })
    ));
    assert_eq!(gpu.framebuffer(), &before);
}

#[test]
fn fragment_coordinates_are_pixel_centres() {
    let mut gpu = gpu_with_framebuffer(3, 2);
    bind_positions(
        &mut gpu,
        &[
            [-1.0, -1.0, 0.25, 1.0],
            [3.0, -1.0, 0.25, 1.0],
            [-1.0, 3.0, 0.25, 1.0],
        ],
    );
    let program = gpu.create_program();
    gpu.attach_shaders(
        program,
        |out, input, _| out.position = input.attributes[0].as_vec4(),
        // Centre coordinate in red and green, depth in blue.
        |out, input, _| {
            out.color = Vec4::new(input.coord.x / 4.0, input.coord.y / 2.0, input.coord.z, 1.0)
        },
    )
    .unwrap();
    gpu.use_program(program).unwrap();
    gpu.draw_triangles(3).unwrap();

    let fb = gpu.framebuffer();
    // x = 2.5 / 4, y = 1.5 / 2, depth 0.25.
    assert_eq!(fb.pixel(2, 1), Some([159, 191, 64, 255]));
    let depth = fb.depth_at(2, 1).unwrap();
    assert!((depth - 0.25).abs() < 1e-6);
}
