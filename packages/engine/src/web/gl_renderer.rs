use js_sys::Float32Array;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::core::EngineError;
use crate::gpu::instances::{INDEX_COMPONENTS, OFFSET_COMPONENTS, POSITION_COMPONENTS, SEED_COMPONENTS};
use crate::gpu::shaders::{
    ATTR_CORNER, ATTR_GRID, ATTR_INDEX, ATTR_OFFSET, ATTR_SEED, FRAGMENT_SRC, QUAD_CORNERS, UNIFORMS, VERTEX_SRC,
};
use crate::gpu::{InstanceBuffers, UniformSet};

const INSTANCE_ATTRIBUTES: [(u32, usize); 4] = [
    (ATTR_OFFSET, OFFSET_COMPONENTS),
    (ATTR_INDEX, INDEX_COMPONENTS),
    (ATTR_SEED, SEED_COMPONENTS),
    (ATTR_GRID, POSITION_COMPONENTS),
];

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, EngineError> {
    let shader = gl.create_shader(kind).ok_or(EngineError::GlResource("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl.get_shader_parameter(&shader, GL::COMPILE_STATUS).as_bool().unwrap_or(false) {
        Ok(shader)
    } else {
        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(EngineError::ShaderCompile(info))
    }
}

fn link_program(gl: &GL, vs: &WebGlShader, fs: &WebGlShader) -> Result<WebGlProgram, EngineError> {
    let program = gl.create_program().ok_or(EngineError::GlResource("program"))?;
    gl.attach_shader(&program, vs);
    gl.attach_shader(&program, fs);
    gl.link_program(&program);
    if gl.get_program_parameter(&program, GL::LINK_STATUS).as_bool().unwrap_or(false) {
        Ok(program)
    } else {
        let info = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(EngineError::ProgramLink(info))
    }
}

/// WebGL2 side of the GPU backdrop: one program, one VAO, a static unit quad
/// and four per-instance attribute buffers.
pub struct GlBackdropRenderer {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    corner_buffer: WebGlBuffer,
    instance_buffers: Vec<WebGlBuffer>,
    uniforms: Vec<(Option<WebGlUniformLocation>, usize)>,
    instance_count: i32,
    // 0 until the first upload
    instances_version: u32,
}

impl GlBackdropRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, EngineError> {
        let gl = canvas
            .get_context("webgl2")
            .ok()
            .flatten()
            .ok_or(EngineError::ContextUnavailable("webgl2"))?
            .dyn_into::<GL>()
            .map_err(|_| EngineError::ContextUnavailable("webgl2"))?;

        let vs = compile_shader(&gl, GL::VERTEX_SHADER, VERTEX_SRC)?;
        let fs = compile_shader(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SRC)?;
        let linked = link_program(&gl, &vs, &fs);
        gl.delete_shader(Some(&vs));
        gl.delete_shader(Some(&fs));
        let program = linked?;

        let vao = gl.create_vertex_array().ok_or(EngineError::GlResource("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        let corner_buffer = gl.create_buffer().ok_or(EngineError::GlResource("buffer"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&corner_buffer));
        gl.buffer_data_with_array_buffer_view(
            GL::ARRAY_BUFFER,
            &Float32Array::from(&QUAD_CORNERS[..]),
            GL::STATIC_DRAW,
        );
        gl.enable_vertex_attrib_array(ATTR_CORNER);
        gl.vertex_attrib_pointer_with_i32(ATTR_CORNER, 2, GL::FLOAT, false, 0, 0);

        let mut instance_buffers = Vec::with_capacity(INSTANCE_ATTRIBUTES.len());
        for (location, components) in INSTANCE_ATTRIBUTES {
            let buffer = gl.create_buffer().ok_or(EngineError::GlResource("buffer"))?;
            gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_with_i32(location, components as i32, GL::FLOAT, false, 0, 0);
            gl.vertex_attrib_divisor(location, 1);
            instance_buffers.push(buffer);
        }
        gl.bind_vertex_array(None);

        let uniforms = UNIFORMS
            .iter()
            .map(|&(name, components)| (gl.get_uniform_location(&program, name), components))
            .collect();

        gl.enable(GL::BLEND);
        // fragment output is premultiplied
        gl.blend_func(GL::ONE, GL::ONE_MINUS_SRC_ALPHA);

        log::info!("webgl2 backdrop renderer ready");
        Ok(Self {
            canvas,
            gl,
            program,
            vao,
            corner_buffer,
            instance_buffers,
            uniforms,
            instance_count: 0,
            instances_version: 0,
        })
    }

    pub fn instances_version(&self) -> u32 {
        self.instances_version
    }

    pub fn upload_instances(&mut self, instances: &InstanceBuffers, version: u32) {
        let arrays = [&instances.offsets, &instances.indices, &instances.seeds, &instances.positions];
        for (buffer, data) in self.instance_buffers.iter().zip(arrays) {
            self.gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
            self.gl.buffer_data_with_array_buffer_view(
                GL::ARRAY_BUFFER,
                &Float32Array::from(data.as_slice()),
                GL::STATIC_DRAW,
            );
        }
        self.gl.bind_buffer(GL::ARRAY_BUFFER, None);
        self.instance_count = instances.len() as i32;
        self.instances_version = version;
    }

    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) {
        let pw = (width * dpr).round().max(0.0) as u32;
        let ph = (height * dpr).round().max(0.0) as u32;
        self.canvas.set_width(pw);
        self.canvas.set_height(ph);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));
        self.gl.viewport(0, 0, pw as i32, ph as i32);
    }

    pub fn draw(&self, uniforms: &UniformSet) {
        let gl = &self.gl;
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);
        if self.instance_count == 0 {
            return;
        }

        gl.use_program(Some(&self.program));
        let values = uniforms.to_array();
        let mut at = 0;
        for (location, components) in &self.uniforms {
            let v = &values[at..at + components];
            match components {
                1 => gl.uniform1f(location.as_ref(), v[0]),
                2 => gl.uniform2f(location.as_ref(), v[0], v[1]),
                4 => gl.uniform4f(location.as_ref(), v[0], v[1], v[2], v[3]),
                _ => {}
            }
            at += components;
        }

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays_instanced(GL::TRIANGLES, 0, (QUAD_CORNERS.len() / 2) as i32, self.instance_count);
        gl.bind_vertex_array(None);
    }
}

impl Drop for GlBackdropRenderer {
    fn drop(&mut self) {
        for buffer in &self.instance_buffers {
            self.gl.delete_buffer(Some(buffer));
        }
        self.gl.delete_buffer(Some(&self.corner_buffer));
        self.gl.delete_vertex_array(Some(&self.vao));
        self.gl.delete_program(Some(&self.program));
    }
}
