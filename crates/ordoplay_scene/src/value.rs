// SPDX-License-Identifier: MIT OR Apache-2.0
//! Type-erased attribute values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// GLSL-like 2D float vector
pub type Vec2 = [f32; 2];
/// GLSL-like 3D float vector
pub type Vec3 = [f32; 3];
/// GLSL-like 4D float vector
pub type Vec4 = [f32; 4];
/// Row-major 2x2 float matrix
pub type Mat2 = [[f32; 2]; 2];
/// Row-major 3x3 float matrix
pub type Mat3 = [[f32; 3]; 3];
/// Row-major 4x4 float matrix
pub type Mat4 = [[f32; 4]; 4];

/// Type tag of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Boolean
    Bool,
    /// 32-bit integer
    Int,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// 2D float vector
    Float2,
    /// 3D float vector
    Float3,
    /// 4D float vector
    Float4,
    /// 2x2 float matrix
    Matrix2f,
    /// 3x3 float matrix
    Matrix3f,
    /// 4x4 float matrix
    Matrix4f,
    /// Interned identifier
    Token,
    /// Free-form string
    String,
    /// Asset reference (file path or URI)
    Asset,
}

impl ValueType {
    /// Scene-description type name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Double => "double",
            Self::Float2 => "float2",
            Self::Float3 => "float3",
            Self::Float4 => "float4",
            Self::Matrix2f => "matrix2f",
            Self::Matrix3f => "matrix3f",
            Self::Matrix4f => "matrix4f",
            Self::Token => "token",
            Self::String => "string",
            Self::Asset => "asset",
        }
    }

    /// Whether values of this type blend linearly between time samples
    pub fn is_interpolatable(&self) -> bool {
        matches!(
            self,
            Self::Float
                | Self::Double
                | Self::Float2
                | Self::Float3
                | Self::Float4
                | Self::Matrix2f
                | Self::Matrix3f
                | Self::Matrix4f
        )
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value stored on an attribute or in a time sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i32),
    /// Float
    Float(f32),
    /// Double
    Double(f64),
    /// 2D vector
    Float2(Vec2),
    /// 3D vector
    Float3(Vec3),
    /// 4D vector
    Float4(Vec4),
    /// 2x2 matrix
    Matrix2f(Mat2),
    /// 3x3 matrix
    Matrix3f(Mat3),
    /// 4x4 matrix
    Matrix4f(Mat4),
    /// Token
    Token(String),
    /// String
    String(String),
    /// Asset path
    Asset(String),
}

impl Value {
    /// Get the type tag for this value
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Float(_) => ValueType::Float,
            Self::Double(_) => ValueType::Double,
            Self::Float2(_) => ValueType::Float2,
            Self::Float3(_) => ValueType::Float3,
            Self::Float4(_) => ValueType::Float4,
            Self::Matrix2f(_) => ValueType::Matrix2f,
            Self::Matrix3f(_) => ValueType::Matrix3f,
            Self::Matrix4f(_) => ValueType::Matrix4f,
            Self::Token(_) => ValueType::Token,
            Self::String(_) => ValueType::String,
            Self::Asset(_) => ValueType::Asset,
        }
    }

    /// Get as token if possible
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Self::Token(v) => Some(v),
            _ => None,
        }
    }

    /// Linearly blend towards `other`. Returns `None` when the types differ
    /// or the type does not interpolate.
    pub fn lerp(&self, other: &Value, t: f64) -> Option<Value> {
        let tf = t as f32;
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => Some(Self::Float(lerp(*a, *b, tf))),
            (Self::Double(a), Self::Double(b)) => Some(Self::Double(a + (b - a) * t)),
            (Self::Float2(a), Self::Float2(b)) => Some(Self::Float2(lerp_array(a, b, tf))),
            (Self::Float3(a), Self::Float3(b)) => Some(Self::Float3(lerp_array(a, b, tf))),
            (Self::Float4(a), Self::Float4(b)) => Some(Self::Float4(lerp_array(a, b, tf))),
            (Self::Matrix2f(a), Self::Matrix2f(b)) => Some(Self::Matrix2f(lerp_matrix(a, b, tf))),
            (Self::Matrix3f(a), Self::Matrix3f(b)) => Some(Self::Matrix3f(lerp_matrix(a, b, tf))),
            (Self::Matrix4f(a), Self::Matrix4f(b)) => Some(Self::Matrix4f(lerp_matrix(a, b, tf))),
            _ => None,
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn lerp_array<const N: usize>(a: &[f32; N], b: &[f32; N], t: f32) -> [f32; N] {
    std::array::from_fn(|i| lerp(a[i], b[i], t))
}

fn lerp_matrix<const N: usize>(a: &[[f32; N]; N], b: &[[f32; N]; N], t: f32) -> [[f32; N]; N] {
    std::array::from_fn(|row| lerp_array(&a[row], &b[row], t))
}

macro_rules! impl_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_value_from! {
    bool => Bool,
    i32 => Int,
    f32 => Float,
    f64 => Double,
    Vec2 => Float2,
    Vec3 => Float3,
    Vec4 => Float4,
    Mat2 => Matrix2f,
    Mat3 => Matrix3f,
    Mat4 => Matrix4f,
    String => String,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}
