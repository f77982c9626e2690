use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::dom::{self, WindowScheduler};
use crate::capabilities::Capabilities;
use crate::config::PageConfig;
use crate::debounce::Debounced;
use crate::particles::{self, Mat4, ParticleSettings, Spin, Viewport};

const VERTEX_SHADER: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
uniform mat4 u_mvp;
uniform float u_point_size;
void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    gl_PointSize = u_point_size * (10.0 / gl_Position.w);
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;
uniform vec4 u_color;
out vec4 out_color;
void main() {
    float d = length(gl_PointCoord - vec2(0.5));
    if (d > 0.5) discard;
    out_color = vec4(u_color.rgb, u_color.a * smoothstep(0.5, 0.15, d));
}
"#;

struct Field {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    u_mvp: Option<WebGlUniformLocation>,
    u_point_size: Option<WebGlUniformLocation>,
    settings: ParticleSettings,
    count: i32,
    point_size: f32,
    spin: Cell<Spin>,
    projection: Cell<Mat4>,
    pixel_ratio: Cell<f32>,
    // At most one outstanding frame request; dropping it cancels the request.
    frame: RefCell<Option<AnimationFrame>>,
}

impl Field {
    fn resize(&self) {
        let Ok(window) = dom::window() else {
            return;
        };
        let css_w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
        let css_h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
        let ratio = window.device_pixel_ratio();
        let viewport = Viewport::from_css(css_w, css_h, ratio);

        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);
        self.gl
            .viewport(0, 0, viewport.width as i32, viewport.height as i32);
        self.pixel_ratio.set(ratio.clamp(1.0, 2.0) as f32);
        self.projection.set(viewport.projection(&self.settings));
    }

    fn draw(&self, now_ms: f64) {
        let mut spin = self.spin.get();
        spin.advance(now_ms, self.settings.spin_x, self.settings.spin_y);
        self.spin.set(spin);

        let mvp = particles::multiply(
            &self.projection.get(),
            &particles::model_view(&spin, self.settings.camera_distance),
        );

        let gl = &self.gl;
        gl.clear(GL::COLOR_BUFFER_BIT);
        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));
        gl.uniform_matrix4fv_with_f32_array(self.u_mvp.as_ref(), false, &mvp);
        gl.uniform1f(
            self.u_point_size.as_ref(),
            self.point_size * self.pixel_ratio.get(),
        );
        gl.draw_arrays(GL::POINTS, 0, self.count);
    }

    fn resume(self: &Rc<Self>) {
        if self.frame.borrow().is_some() {
            return;
        }
        let field = Rc::clone(self);
        let handle = request_animation_frame(move |timestamp| {
            field.frame.borrow_mut().take();
            field.draw(timestamp);
            field.resume();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn pause(&self) {
        self.frame.borrow_mut().take();
        let mut spin = self.spin.get();
        spin.pause();
        self.spin.set(spin);
    }
}

/// Animated point cloud behind the page. Dropping it stops the loop.
pub struct ParticleField {
    field: Rc<Field>,
    _listeners: Vec<EventListener>,
}

impl ParticleField {
    pub fn is_running(&self) -> bool {
        self.field.frame.borrow().is_some()
    }

    pub fn pause(&self) {
        self.field.pause();
    }

    pub fn resume(&self) {
        self.field.resume();
    }
}

impl Drop for ParticleField {
    fn drop(&mut self) {
        self.field.pause();
    }
}

pub fn mount(
    document: &Document,
    config: &PageConfig,
    caps: Capabilities,
) -> Option<ParticleField> {
    let canvas = dom::query_as::<HtmlCanvasElement>(document, config.selectors.particle_canvas)?;
    mount_canvas(canvas, caps, &config.particles, config.resize_debounce_ms)
}

/// Starts the background on `canvas`. Any setup failure hides the canvas
/// and leaves the rest of the page untouched.
pub fn mount_canvas(
    canvas: HtmlCanvasElement,
    caps: Capabilities,
    settings: &ParticleSettings,
    resize_debounce_ms: u32,
) -> Option<ParticleField> {
    if !caps.allows_particles() {
        return None;
    }
    match start(canvas.clone(), settings, resize_debounce_ms) {
        Ok(field) => Some(field),
        Err(err) => {
            log::warn!("particle background disabled: {}", dom::describe(&err));
            let _ = canvas.style().set_property("display", "none");
            None
        }
    }
}

/// Set up WebGL2 state, upload the cloud and start the render loop.
pub fn start(
    canvas: HtmlCanvasElement,
    settings: &ParticleSettings,
    resize_debounce_ms: u32,
) -> Result<ParticleField, JsValue> {
    let gl: GL = canvas
        .get_context("webgl2")?
        .ok_or("WebGL2 not supported")?
        .dyn_into()?;

    let window = dom::window()?;
    let document = dom::document()?;
    let css_width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let density = settings.density_for(css_width);

    let program = link_program(
        &gl,
        &compile_shader(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?,
        &compile_shader(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?,
    )?;

    let positions = particles::generate_cloud(density.count, settings.radius, settings.seed);
    let vao = gl
        .create_vertex_array()
        .ok_or("failed to create vertex array")?;
    gl.bind_vertex_array(Some(&vao));
    let buffer = gl.create_buffer().ok_or("failed to create buffer")?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    gl.buffer_data_with_array_buffer_view(
        GL::ARRAY_BUFFER,
        &js_sys::Float32Array::from(positions.as_slice()),
        GL::STATIC_DRAW,
    );
    gl.enable_vertex_attrib_array(0);
    gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, 0, 0);
    gl.bind_vertex_array(None);

    gl.use_program(Some(&program));
    let u_color = gl.get_uniform_location(&program, "u_color");
    gl.uniform4fv_with_f32_array(u_color.as_ref(), &settings.color);
    gl.clear_color(0.0, 0.0, 0.0, 0.0);
    gl.enable(GL::BLEND);
    gl.blend_func(GL::SRC_ALPHA, GL::ONE);

    let field = Rc::new(Field {
        canvas,
        u_mvp: gl.get_uniform_location(&program, "u_mvp"),
        u_point_size: gl.get_uniform_location(&program, "u_point_size"),
        gl,
        program,
        vao,
        settings: *settings,
        count: (positions.len() / 3) as i32,
        point_size: density.point_size,
        spin: Cell::new(Spin::default()),
        projection: Cell::new([0.0; 16]),
        pixel_ratio: Cell::new(1.0),
        frame: RefCell::new(None),
    });
    field.resize();

    let weak: Weak<Field> = Rc::downgrade(&field);
    let debounced_resize = Debounced::new(WindowScheduler, resize_debounce_ms, move |()| {
        if let Some(field) = weak.upgrade() {
            field.resize();
        }
    });
    let resize = EventListener::new(&window, "resize", move |_| debounced_resize.call(()));

    let weak: Weak<Field> = Rc::downgrade(&field);
    let doc = document.clone();
    let visibility = EventListener::new(&document, "visibilitychange", move |_| {
        let Some(field) = weak.upgrade() else {
            return;
        };
        if doc.hidden() {
            field.pause();
        } else {
            field.resume();
        }
    });

    if !document.hidden() {
        field.resume();
    }

    Ok(ParticleField {
        field,
        _listeners: vec![resize, visibility],
    })
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(kind)
        .ok_or("unable to create shader object")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown shader compile error".into());
        gl.delete_shader(Some(&shader));
        Err(log.into())
    }
}

fn link_program(gl: &GL, vert: &WebGlShader, frag: &WebGlShader) -> Result<WebGlProgram, JsValue> {
    let program = gl
        .create_program()
        .ok_or("unable to create program object")?;
    gl.attach_shader(&program, vert);
    gl.attach_shader(&program, frag);
    gl.link_program(&program);
    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown program link error".into());
        gl.delete_program(Some(&program));
        Err(log.into())
    }
}
