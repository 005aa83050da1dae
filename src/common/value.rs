use std::fmt;

use crate::common::types::DataType;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int8(i8),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    /// Fixed-length array constant; every element shares `element`'s type.
    Array { element: DataType, values: Vec<Value> },
    Null,
}

impl Value {
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Bool(_) => Some(DataType::Bool),
            Value::Int8(_) => Some(DataType::Int8),
            Value::Int64(_) => Some(DataType::Int64),
            Value::Float32(_) => Some(DataType::Float32),
            Value::Float64(_) => Some(DataType::Float64),
            Value::String(_) => Some(DataType::String),
            Value::Array { element, values } => Some(DataType::Array {
                element: Box::new(element.clone()),
                size: values.len(),
            }),
            Value::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float32(v) => Some(*v),
            _ => None,
        }
    }

    /// Value-preserving cast. A cast succeeds only when the target value
    /// round-trips back to the source exactly; anything else is `None`.
    pub fn try_cast(&self, to: &DataType) -> Option<Value> {
        if self.data_type().as_ref() == Some(to) {
            return Some(self.clone());
        }
        match (self, to) {
            (Value::Int8(v), DataType::Float32) => Some(Value::Float32(f32::from(*v))),
            (Value::Int64(v), DataType::Float32) => {
                let f = *v as f32;
                (f as i64 == *v).then_some(Value::Float32(f))
            }
            (Value::Float64(v), DataType::Float32) => {
                let f = *v as f32;
                (f64::from(f) == *v).then_some(Value::Float32(f))
            }
            (Value::Array { values, .. }, DataType::Array { element, size }) => {
                if values.len() != *size {
                    return None;
                }
                let mut out = Vec::with_capacity(values.len());
                for value in values {
                    out.push(value.try_cast(element)?);
                }
                Some(Value::Array {
                    element: (**element).clone(),
                    values: out,
                })
            }
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int8(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "\"{v}\""),
            Value::Array { values, .. } => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Value::Null => write!(f, "NULL"),
        }
    }
}
