// SPDX-License-Identifier: MIT OR Apache-2.0
//! Checked conversion from type-erased values to the types shader
//! parameters are read as.

use ordoplay_scene::{Mat2, Mat3, Mat4, Value, Vec2, Vec3, Vec4};

/// A type a shader attribute can be evaluated as
pub trait ShaderValue: Sized {
    /// Name used in type mismatch reports
    const TYPE_NAME: &'static str;

    /// Convert a stored value, or `None` when the types are incompatible
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_shader_value {
    ($($ty:ty => $name:literal, $variant:ident;)*) => {
        $(
            impl ShaderValue for $ty {
                const TYPE_NAME: &'static str = $name;

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_shader_value! {
    bool => "bool", Bool;
    i32 => "int", Int;
    f32 => "float", Float;
    Vec2 => "float2", Float2;
    Vec3 => "float3", Float3;
    Vec4 => "float4", Float4;
    Mat2 => "matrix2f", Matrix2f;
    Mat3 => "matrix3f", Matrix3f;
    Mat4 => "matrix4f", Matrix4f;
}

impl ShaderValue for f64 {
    const TYPE_NAME: &'static str = "double";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Double(v) => Some(*v),
            // Lossless widening
            Value::Float(v) => Some(f64::from(*v)),
            _ => None,
        }
    }
}

impl ShaderValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) | Value::Token(s) | Value::Asset(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl ShaderValue for Value {
    const TYPE_NAME: &'static str = "value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matches() {
        assert_eq!(f32::from_value(&Value::Float(0.5)), Some(0.5));
        assert_eq!(Vec3::from_value(&Value::Float3([1.0, 2.0, 3.0])), Some([1.0, 2.0, 3.0]));
        assert_eq!(bool::from_value(&Value::Bool(true)), Some(true));
        assert_eq!(
            Mat2::from_value(&Value::Matrix2f([[1.0, 0.0], [0.0, 1.0]])),
            Some([[1.0, 0.0], [0.0, 1.0]])
        );
    }

    #[test]
    fn test_no_implicit_narrowing_or_reshaping() {
        assert_eq!(f32::from_value(&Value::Double(0.5)), None);
        assert_eq!(f32::from_value(&Value::Int(1)), None);
        assert_eq!(Vec4::from_value(&Value::Float3([1.0, 2.0, 3.0])), None);
        assert_eq!(Vec4::from_value(&Value::Matrix2f([[1.0, 0.0], [0.0, 1.0]])), None);
    }

    #[test]
    fn test_widening_and_text() {
        assert_eq!(f64::from_value(&Value::Float(0.25)), Some(0.25));
        assert_eq!(
            String::from_value(&Value::Token("UsdPreviewSurface".into())),
            Some("UsdPreviewSurface".to_string())
        );
        assert_eq!(String::from_value(&Value::Float(1.0)), None);
    }
}
