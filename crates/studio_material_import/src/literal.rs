// SPDX-License-Identifier: MIT OR Apache-2.0
//! Literal values written to sockets.
//!
//! Studio documents write numbers as text, vectors and colors as whitespace
//! (or comma) separated components. Values are coerced to the target socket
//! type only when they are assigned: short tuples are padded with 0, long
//! tuples are truncated.

use studio_material_graph::{SocketType, SocketValue};

/// Literal parse failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LiteralError {
    /// No components
    #[error("empty value")]
    Empty,

    /// A component is not a number
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// Shader sockets hold no value
    #[error("shader sockets have no value")]
    NoValue,
}

/// Split a literal into numeric components
pub fn parse_components(text: &str) -> Result<Vec<f32>, LiteralError> {
    let components = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f32>()
                .map_err(|_| LiteralError::NotANumber(part.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if components.is_empty() {
        return Err(LiteralError::Empty);
    }
    Ok(components)
}

/// Coerce components to a socket type
pub fn coerce(components: &[f32], socket_type: SocketType) -> Result<SocketValue, LiteralError> {
    let first = *components.first().ok_or(LiteralError::Empty)?;
    let value = match socket_type {
        SocketType::Float => SocketValue::Float(first),
        SocketType::Int => SocketValue::Int(first.round() as i32),
        SocketType::Bool => SocketValue::Bool(first != 0.0),
        SocketType::Vector => SocketValue::Vector(padded(components)),
        SocketType::Color => SocketValue::Color(padded(components)),
        SocketType::Shader => return Err(LiteralError::NoValue),
    };
    Ok(value)
}

/// Parse a literal for a socket of the given type.
///
/// Booleans also accept `true` and `false`.
pub fn parse_literal(text: &str, socket_type: SocketType) -> Result<SocketValue, LiteralError> {
    if socket_type == SocketType::Bool {
        match text.trim().to_ascii_lowercase().as_str() {
            "true" => return Ok(SocketValue::Bool(true)),
            "false" => return Ok(SocketValue::Bool(false)),
            _ => {}
        }
    }
    coerce(&parse_components(text)?, socket_type)
}

fn padded<const N: usize>(components: &[f32]) -> [f32; N] {
    let mut out = [0.0; N];
    for (slot, value) in out.iter_mut().zip(components) {
        *slot = *value;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components() {
        assert_eq!(parse_components("0.8 0.1  0.2").unwrap(), vec![0.8, 0.1, 0.2]);
        assert_eq!(parse_components("1,2,3").unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(parse_components("  "), Err(LiteralError::Empty));
        assert_eq!(parse_components("0.5 abc"), Err(LiteralError::NotANumber("abc".into())));
    }

    #[test]
    fn test_widening_pads_with_zero() {
        assert_eq!(coerce(&[1.0], SocketType::Vector).unwrap(), SocketValue::Vector([1.0, 0.0, 0.0]));
        assert_eq!(
            coerce(&[0.2, 0.4, 0.6], SocketType::Color).unwrap(),
            SocketValue::Color([0.2, 0.4, 0.6, 0.0])
        );
    }

    #[test]
    fn test_narrowing_truncates() {
        assert_eq!(coerce(&[0.2, 0.4, 0.6, 1.0], SocketType::Vector).unwrap(), SocketValue::Vector([0.2, 0.4, 0.6]));
        assert_eq!(coerce(&[0.25, 0.5], SocketType::Float).unwrap(), SocketValue::Float(0.25));
        assert_eq!(coerce(&[2.6], SocketType::Int).unwrap(), SocketValue::Int(3));
    }

    #[test]
    fn test_bool_literals() {
        assert_eq!(parse_literal("true", SocketType::Bool).unwrap(), SocketValue::Bool(true));
        assert_eq!(parse_literal("0", SocketType::Bool).unwrap(), SocketValue::Bool(false));
        assert!(parse_literal("1", SocketType::Shader).is_err());
    }
}
