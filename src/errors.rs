#![allow(dead_code)]

use std::fmt;

use crate::model::Kind;

///
/// Conversion failures. A TypeMismatch means a converter was handed a
/// value of a kind it is not defined over; an InvariantViolation means a
/// value no loader should ever produce (e.g. a splitloc that is neither
/// an offset nor a sequence of offsets). Both are fatal to the run: the
/// partially built wire message is dropped on the error path.
///

#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    TypeMismatch {
        context: &'static str,
        expected: Kind,
        actual: Kind,
    },
    InvariantViolation {
        context: &'static str,
        detail: String,
    },
}

impl ConvertError {
    pub fn type_mismatch(context: &'static str, expected: Kind, actual: Kind) -> ConvertError {
        ConvertError::TypeMismatch {
            context,
            expected,
            actual,
        }
    }

    pub fn invariant(context: &'static str, detail: String) -> ConvertError {
        ConvertError::InvariantViolation { context, detail }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConvertError::TypeMismatch {
                context,
                expected,
                actual,
            } => {
                write!(f, "{} must be {}, found {}", context, expected, actual)
            }
            ConvertError::InvariantViolation { context, detail } => {
                write!(f, "{}: {}", context, detail)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SerializationError {
    msg: String,
}

impl SerializationError {
    pub fn new(msg: String) -> SerializationError {
        SerializationError { msg }
    }
}

impl From<ConvertError> for SerializationError {
    fn from(err: ConvertError) -> SerializationError {
        SerializationError::new(err.to_string())
    }
}

impl From<prost::EncodeError> for SerializationError {
    fn from(err: prost::EncodeError) -> SerializationError {
        SerializationError::new(err.to_string())
    }
}

impl From<std::io::Error> for SerializationError {
    fn from(err: std::io::Error) -> SerializationError {
        SerializationError::new(err.to_string())
    }
}

impl fmt::Display for SerializationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}

#[derive(Debug, Clone)]
pub struct DeserializationError {
    msg: String,
}

impl DeserializationError {
    pub fn new(msg: String) -> DeserializationError {
        DeserializationError { msg }
    }
}

impl From<prost::DecodeError> for DeserializationError {
    fn from(err: prost::DecodeError) -> DeserializationError {
        DeserializationError::new(err.to_string())
    }
}

impl From<std::io::Error> for DeserializationError {
    fn from(err: std::io::Error) -> DeserializationError {
        DeserializationError::new(err.to_string())
    }
}

impl fmt::Display for DeserializationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}
