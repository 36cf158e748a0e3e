#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(non_snake_case)]

use std::collections::BTreeMap;

use pyo3::exceptions;
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict};
use pyo3::PyResult;

pub mod compress;
pub mod convert;
pub mod errors;
pub mod model;
pub mod types;

//
// Python interface
//
// The model loader boundary: morfessor's BaselineModel lives in Python
// (loaded from its legacy pickled format there), so loading means
// walking a live Python object graph into the kind-tagged Value model.
// Dispatch is by runtime type name, the same discrimination the legacy
// format relies on. Order matters for the builtin fallbacks: Counter is
// a dict subclass and ConstrNode a tuple subclass, so entity names are
// matched before the builtin names.
//

fn extract_encoding(value: &PyAny) -> PyResult<model::Encoding> {
    Ok(model::Encoding {
        logtokensum: value.getattr("logtokensum")?.extract()?,
        tokens: value.getattr("tokens")?.extract()?,
        boundaries: value.getattr("boundaries")?.extract()?,
        weight: value.getattr("weight")?.extract()?,
        log2pi: value.getattr("_log2pi")?.extract()?,
    })
}

fn extract_value(value: &PyAny) -> PyResult<model::Value> {
    let type_name = value.get_type().name()?;
    match type_name {
        "Counter" => {
            let mut counts = BTreeMap::new();
            for (key, count) in value.downcast::<PyDict>()? {
                counts.insert(key.extract::<String>()?, count.extract::<types::Count>()?);
            }
            Ok(model::Value::Counter(counts))
        }
        "ConstrNode" => Ok(model::Value::ConstrNode(Box::new(model::ConstrNode {
            rcount: value.getattr("rcount")?.extract()?,
            count: value.getattr("count")?.extract()?,
            splitloc: extract_value(value.getattr("splitloc")?)?,
        }))),
        "LexiconEncoding" => Ok(model::Value::LexiconEncoding(Box::new(
            model::LexiconEncoding {
                encoding: extract_encoding(value)?,
                atoms: extract_value(value.getattr("atoms")?)?,
            },
        ))),
        "CorpusEncoding" => Ok(model::Value::CorpusEncoding(Box::new(
            model::CorpusEncoding {
                encoding: extract_encoding(value)?,
                lexicon_encoding: extract_value(value.getattr("lexicon_encoding")?)?,
            },
        ))),
        "AnnotatedCorpusEncoding" => Ok(model::Value::AnnotatedCorpusEncoding(Box::new(
            model::AnnotatedCorpusEncoding {
                encoding: extract_encoding(value)?,
                do_update_weight: value.getattr("do_update_weight")?.extract()?,
                corpus_coding: extract_value(value.getattr("corpus_coding")?)?,
            },
        ))),
        "FixedCorpusWeight" => Ok(model::Value::FixedCorpusWeight(model::FixedCorpusWeight {
            weight: value.getattr("weight")?.extract()?,
        })),
        "bool" => Ok(model::Value::Bool(value.extract::<bool>()?)),
        "int" => Ok(model::Value::Int(value.extract::<i64>()?)),
        "float" => Ok(model::Value::Float(value.extract::<f64>()?)),
        "str" => Ok(model::Value::Str(value.extract::<String>()?)),
        "list" | "tuple" => {
            let mut items = Vec::new();
            for item in value.iter()? {
                items.push(extract_value(item?)?);
            }
            Ok(model::Value::List(items))
        }
        "dict" => {
            let mut entries = BTreeMap::new();
            for (key, entry) in value.downcast::<PyDict>()? {
                entries.insert(key.extract::<String>()?, extract_value(entry)?);
            }
            Ok(model::Value::Dict(entries))
        }
        other => Err(PyErr::new::<exceptions::PyTypeError, _>(format!(
            "cannot load model value of type {}",
            other
        ))),
    }
}

fn extract_optional(root: &PyAny, attr: &str) -> PyResult<Option<model::Value>> {
    let field = root.getattr(attr)?;
    if field.is_none() {
        return Ok(None);
    }
    Ok(Some(extract_value(field)?))
}

fn extract_model(root: &PyAny) -> PyResult<model::Model> {
    Ok(model::Model {
        annotations: extract_optional(root, "annotations")?,
        forcesplit_list: extract_optional(root, "forcesplit_list")?,
        nosplit_re: extract_optional(root, "nosplit_re")?,
        penalty: root.getattr("penalty")?.extract()?,
        tokens: root.getattr("tokens")?.extract()?,
        types: root.getattr("types")?.extract()?,
        analyses: extract_optional(root, "_analyses")?,
        annot_coding: extract_optional(root, "_annot_coding")?,
        corpus_coding: extract_optional(root, "_corpus_coding")?,
        corpus_weight_updater: extract_optional(root, "_corpus_weight_updater")?,
        counter: extract_optional(root, "_counter")?,
        lexicon_coding: extract_optional(root, "_lexicon_coding")?,
        segment_only: root.getattr("_segment_only")?.extract()?,
        supervised: root.getattr("_supervised")?.extract()?,
        use_skips: root.getattr("_use_skips")?.extract()?,
    })
}

/// Convert a loaded morfessor BaselineModel to serialized wire bytes.
#[pyfunction]
#[pyo3(signature = (model, compress = false))]
fn convert_model(py: Python, model: &PyAny, compress: bool) -> PyResult<PyObject> {
    let M = extract_model(model)?;
    match M.serialize(compress) {
        Ok(b) => Ok(PyBytes::new(py, &b).into()),
        Err(e) => Err(PyErr::new::<exceptions::PyTypeError, _>(e.to_string())),
    }
}

/// Dump the loaded model as JSON (inspection/debugging aid).
#[pyfunction]
fn model_json(model: &PyAny) -> PyResult<String> {
    let M = extract_model(model)?;
    match M.json() {
        Ok(s) => Ok(s),
        Err(e) => Err(PyErr::new::<exceptions::PyValueError, _>(e.to_string())),
    }
}

#[pymodule]
fn _morfessor_convert(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(convert_model, m)?)?;
    m.add_function(wrap_pyfunction!(model_json, m)?)?;
    Ok(())
}
