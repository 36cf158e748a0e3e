#![allow(dead_code)]
#![allow(non_snake_case)]

use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use prost::Message;

use crate::compress;
use crate::convert;
use crate::errors;
use crate::types;

///
/// The source side of the conversion: a loaded baseline segmentation
/// model. The legacy persisted form is dynamically typed, so loaded
/// field values arrive as kind-tagged `Value`s and the converters check
/// kinds before reading anything, while the entity payloads themselves
/// (counts, cost fields) are fixed shapes that cannot be mis-built.
///
/// Everything here is read-only input for the conversion; nothing in
/// this module mutates a loaded model.
///

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    Int,
    Float,
    Str,
    Bool,
    List,
    Dict,
    Counter,
    ConstrNode,
    LexiconEncoding,
    CorpusEncoding,
    AnnotatedCorpusEncoding,
    FixedCorpusWeight,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Kind::Int => "Int",
            Kind::Float => "Float",
            Kind::Str => "Str",
            Kind::Bool => "Bool",
            Kind::List => "List",
            Kind::Dict => "Dict",
            Kind::Counter => "Counter",
            Kind::ConstrNode => "ConstrNode",
            Kind::LexiconEncoding => "LexiconEncoding",
            Kind::CorpusEncoding => "CorpusEncoding",
            Kind::AnnotatedCorpusEncoding => "AnnotatedCorpusEncoding",
            Kind::FixedCorpusWeight => "FixedCorpusWeight",
        };
        write!(f, "{}", name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    List(Vec<Value>),
    Dict(BTreeMap<String, Value>),
    Counter(BTreeMap<String, types::Count>),
    ConstrNode(Box<ConstrNode>),
    LexiconEncoding(Box<LexiconEncoding>),
    CorpusEncoding(Box<CorpusEncoding>),
    AnnotatedCorpusEncoding(Box<AnnotatedCorpusEncoding>),
    FixedCorpusWeight(FixedCorpusWeight),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::Bool(_) => Kind::Bool,
            Value::List(_) => Kind::List,
            Value::Dict(_) => Kind::Dict,
            Value::Counter(_) => Kind::Counter,
            Value::ConstrNode(_) => Kind::ConstrNode,
            Value::LexiconEncoding(_) => Kind::LexiconEncoding,
            Value::CorpusEncoding(_) => Kind::CorpusEncoding,
            Value::AnnotatedCorpusEncoding(_) => Kind::AnnotatedCorpusEncoding,
            Value::FixedCorpusWeight(_) => Kind::FixedCorpusWeight,
        }
    }

    // the presence rule for optional model fields: empty containers and
    // empty strings read as absent; scalars are never empty (zero and
    // false are meaningful values)
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Str(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Dict(entries) => entries.is_empty(),
            Value::Counter(counts) => counts.is_empty(),
            _ => false,
        }
    }

    // kind guards: every converter entry point runs its arguments
    // through one of these before reading any field

    pub fn expect_int(&self, context: &'static str) -> Result<i64, errors::ConvertError> {
        match self {
            Value::Int(v) => Ok(*v),
            _ => Err(errors::ConvertError::type_mismatch(
                context,
                Kind::Int,
                self.kind(),
            )),
        }
    }

    pub fn expect_str(&self, context: &'static str) -> Result<&str, errors::ConvertError> {
        match self {
            Value::Str(s) => Ok(s),
            _ => Err(errors::ConvertError::type_mismatch(
                context,
                Kind::Str,
                self.kind(),
            )),
        }
    }

    pub fn expect_list(&self, context: &'static str) -> Result<&[Value], errors::ConvertError> {
        match self {
            Value::List(items) => Ok(items),
            _ => Err(errors::ConvertError::type_mismatch(
                context,
                Kind::List,
                self.kind(),
            )),
        }
    }

    pub fn expect_dict(
        &self,
        context: &'static str,
    ) -> Result<&BTreeMap<String, Value>, errors::ConvertError> {
        match self {
            Value::Dict(entries) => Ok(entries),
            _ => Err(errors::ConvertError::type_mismatch(
                context,
                Kind::Dict,
                self.kind(),
            )),
        }
    }

    pub fn expect_counter(
        &self,
        context: &'static str,
    ) -> Result<&BTreeMap<String, types::Count>, errors::ConvertError> {
        match self {
            Value::Counter(counts) => Ok(counts),
            _ => Err(errors::ConvertError::type_mismatch(
                context,
                Kind::Counter,
                self.kind(),
            )),
        }
    }

    pub fn expect_constr_node(
        &self,
        context: &'static str,
    ) -> Result<&ConstrNode, errors::ConvertError> {
        match self {
            Value::ConstrNode(node) => Ok(node),
            _ => Err(errors::ConvertError::type_mismatch(
                context,
                Kind::ConstrNode,
                self.kind(),
            )),
        }
    }

    pub fn expect_lexicon_encoding(
        &self,
        context: &'static str,
    ) -> Result<&LexiconEncoding, errors::ConvertError> {
        match self {
            Value::LexiconEncoding(lexicon) => Ok(lexicon),
            _ => Err(errors::ConvertError::type_mismatch(
                context,
                Kind::LexiconEncoding,
                self.kind(),
            )),
        }
    }

    pub fn expect_corpus_encoding(
        &self,
        context: &'static str,
    ) -> Result<&CorpusEncoding, errors::ConvertError> {
        match self {
            Value::CorpusEncoding(corpus) => Ok(corpus),
            _ => Err(errors::ConvertError::type_mismatch(
                context,
                Kind::CorpusEncoding,
                self.kind(),
            )),
        }
    }

    pub fn expect_annotated_corpus_encoding(
        &self,
        context: &'static str,
    ) -> Result<&AnnotatedCorpusEncoding, errors::ConvertError> {
        match self {
            Value::AnnotatedCorpusEncoding(coding) => Ok(coding),
            _ => Err(errors::ConvertError::type_mismatch(
                context,
                Kind::AnnotatedCorpusEncoding,
                self.kind(),
            )),
        }
    }

    pub fn expect_fixed_corpus_weight(
        &self,
        context: &'static str,
    ) -> Result<&FixedCorpusWeight, errors::ConvertError> {
        match self {
            Value::FixedCorpusWeight(updater) => Ok(updater),
            _ => Err(errors::ConvertError::type_mismatch(
                context,
                Kind::FixedCorpusWeight,
                self.kind(),
            )),
        }
    }
}

/// Analysis node for one construction. splitloc is polymorphic in the
/// source model: a single offset (Int) or a sequence of offsets (List of
/// Int), never both. The converter normalizes it to a sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstrNode {
    pub rcount: types::Count,
    pub count: types::Count,
    pub splitloc: Value,
}

/// Base MDL cost accounting record. Never appears standalone in the wire
/// form; each encoding subtype embeds one. log2pi is precomputed by the
/// training side and only transported here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Encoding {
    pub logtokensum: f64,
    pub tokens: types::Count,
    pub boundaries: types::Count,
    pub weight: f64,
    pub log2pi: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LexiconEncoding {
    pub encoding: Encoding,
    pub atoms: Value, // Counter over atomic symbols
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorpusEncoding {
    pub encoding: Encoding,
    pub lexicon_encoding: Value, // LexiconEncoding
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedCorpusEncoding {
    pub encoding: Encoding,
    pub do_update_weight: bool,
    pub corpus_coding: Value, // CorpusEncoding
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedCorpusWeight {
    pub weight: f64,
}

///
/// The model root. Optional fields hold whatever the loader found; the
/// converter only touches the ones that are present and non-empty.
/// Scalar fields are always copied, zero/false included.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub annotations: Option<Value>,           // Dict: compound -> List of List of Str
    pub forcesplit_list: Option<Value>,       // List of Str
    pub nosplit_re: Option<Value>,            // Str
    pub penalty: f64,
    pub tokens: types::Count,
    pub types: types::Count,
    pub analyses: Option<Value>,              // Dict: construction -> ConstrNode
    pub annot_coding: Option<Value>,          // AnnotatedCorpusEncoding
    pub corpus_coding: Option<Value>,         // CorpusEncoding
    pub corpus_weight_updater: Option<Value>, // FixedCorpusWeight
    pub counter: Option<Value>,               // Counter
    pub lexicon_coding: Option<Value>,        // LexiconEncoding
    pub segment_only: bool,
    pub supervised: bool,
    pub use_skips: bool,
}

impl Model {
    // create a new empty model
    pub fn new() -> Model {
        return Model {
            annotations: None,
            forcesplit_list: None,
            nosplit_re: None,
            penalty: 0.0,
            tokens: 0,
            types: 0,
            analyses: None,
            annot_coding: None,
            corpus_coding: None,
            corpus_weight_updater: None,
            counter: None,
            lexicon_coding: None,
            segment_only: false,
            supervised: false,
            use_skips: false,
        };
    }

    // return this model as a protobuf Message
    pub fn proto(&self) -> Result<types::pb::BaselineModel, errors::ConvertError> {
        return convert::convert_model(self);
    }

    // convert and serialize to protobuf bytes
    pub fn serialize(
        &self,
        compress: bool,
    ) -> Result<types::ProtoBytes, errors::SerializationError> {
        let P = convert::convert_model(self)?;
        let mut buf = vec![];
        P.encode(&mut buf)?;
        if compress {
            return Ok(compress::compress_bytes(&buf)?);
        }
        return Ok(buf);
    }

    // return this Model as a JSON string
    pub fn json(&self) -> Result<String, serde_json::Error> {
        return Ok(serde_json::to_string(self)?);
    }
}
