//! Plain-data scene graph handed from a scene to the presentation layer.
//!
//! Nodes carry named uniforms, shapes, an optional state table and
//! children.  Nothing here talks to the GPU; the app crate decides how much
//! of a graph it actually draws.

use std::collections::BTreeSet;

use glam::{IVec2, Mat4, UVec2, Vec2, Vec4};

use crate::color::Color;

#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Vec4(Vec4),
    Mat4(Mat4),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Uniform {
    pub name: String,
    pub value: UniformValue,
}

impl Uniform {
    pub fn new(name: impl Into<String>, value: UniformValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// An axis-aligned rectangle in the XY plane, centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleSpec {
    pub size: Vec2,
}

impl Default for RectangleSpec {
    fn default() -> Self {
        Self {
            size: Vec2::ONE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle(RectangleSpec),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    DepthTest,
    CullFace,
    Blend,
}

/// Global render state attached to a node.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTable {
    pub window_size: UVec2,
    pub viewport_origin: IVec2,
    pub viewport_size: UVec2,
    pub clear_color: Color,
    pub clear_depth: f32,
    enabled: BTreeSet<Capability>,
}

impl StateTable {
    /// State for a window of `size`; the viewport covers it entirely.
    pub fn new(size: UVec2) -> Self {
        Self {
            window_size: size,
            viewport_origin: IVec2::ZERO,
            viewport_size: size,
            clear_color: Color::BLACK,
            clear_depth: 1.0,
            enabled: BTreeSet::new(),
        }
    }

    pub fn set_viewport(&mut self, origin: IVec2, size: UVec2) {
        self.viewport_origin = origin;
        self.viewport_size = size;
    }

    pub fn enable(&mut self, cap: Capability, on: bool) {
        if on {
            self.enabled.insert(cap);
        } else {
            self.enabled.remove(&cap);
        }
    }

    pub fn is_enabled(&self, cap: Capability) -> bool {
        self.enabled.contains(&cap)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub uniforms: Vec<Uniform>,
    pub shapes: Vec<Shape>,
    pub state_table: Option<StateTable>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_uniform(&mut self, uniform: Uniform) {
        self.uniforms.push(uniform);
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.iter().find(|u| u.name == name).map(|u| &u.value)
    }
}
