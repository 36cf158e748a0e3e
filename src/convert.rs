#![allow(dead_code)]
#![allow(non_snake_case)]

use std::collections::HashMap;

use prost::Message;

use crate::compress;
use crate::errors;
use crate::model::{Encoding, Kind, Model, Value};
use crate::types;
use crate::types::pb;

///
/// One-shot conversion from a loaded baseline model to the wire message.
/// One converter per entity kind, composed root-to-leaf; every entry
/// point kind-checks its arguments before reading fields, and any
/// failure aborts the whole conversion (the partially built message is
/// dropped, never handed to the caller).
///

// symbol -> count mapping. Every entry is copied, zero counts included;
// an empty counter yields an empty wire map and the parent decides
// whether the field is set at all.
pub fn convert_counter(counter: &Value) -> Result<pb::Counter, errors::ConvertError> {
    let counts = counter.expect_counter("counter")?;
    let mut P = pb::Counter {
        counts: HashMap::with_capacity(counts.len()),
    };
    for (symbol, &count) in counts {
        P.counts.insert(symbol.clone(), count);
    }
    return Ok(P);
}

fn splitloc_offset(loc: i64) -> Result<u32, errors::ConvertError> {
    match u32::try_from(loc) {
        Ok(offset) => Ok(offset),
        Err(_) => Err(errors::ConvertError::invariant(
            "splitloc",
            format!("offset {} out of range", loc),
        )),
    }
}

// normalize the polymorphic splitloc into the wire sequence form: a
// single offset becomes a one-element sequence, a sequence is copied in
// order. Anything else is undefined at the source and fatal here.
fn convert_splitloc(splitloc: &Value) -> Result<Vec<u32>, errors::ConvertError> {
    match splitloc {
        Value::Int(loc) => Ok(vec![splitloc_offset(*loc)?]),
        Value::List(locs) => {
            let mut offsets = Vec::with_capacity(locs.len());
            for loc in locs {
                match loc {
                    Value::Int(loc) => offsets.push(splitloc_offset(*loc)?),
                    other => {
                        return Err(errors::ConvertError::invariant(
                            "splitloc",
                            format!("sequence element must be an offset, found {}", other.kind()),
                        ))
                    }
                }
            }
            Ok(offsets)
        }
        other => Err(errors::ConvertError::invariant(
            "splitloc",
            format!(
                "must be an offset or a sequence of offsets, found {}",
                other.kind()
            ),
        )),
    }
}

pub fn convert_constr_node(node: &Value) -> Result<pb::ConstrNode, errors::ConvertError> {
    let S = node.expect_constr_node("constr_node")?;
    let P = pb::ConstrNode {
        rcount: S.rcount,
        count: S.count,
        splitloc: convert_splitloc(&S.splitloc)?,
    };
    return Ok(P);
}

// gold-standard alternative segmentations for one compound. Both the
// order of analyses and the order of constructions within each analysis
// are meaningful and preserved exactly.
pub fn convert_annotation(annotation: &Value) -> Result<pb::Annotation, errors::ConvertError> {
    let analyses = annotation.expect_list("annotation")?;
    let mut P = pb::Annotation {
        analyses: Vec::with_capacity(analyses.len()),
    };
    for analysis in analyses {
        let constructions = analysis.expect_list("analysis")?;
        let mut A = pb::Analysis {
            constructions: Vec::with_capacity(constructions.len()),
        };
        for construction in constructions {
            A.constructions
                .push(construction.expect_str("construction")?.to_string());
        }
        P.analyses.push(A);
    }
    return Ok(P);
}

pub fn convert_lexicon_encoding(
    lexicon: &Value,
) -> Result<pb::LexiconEncoding, errors::ConvertError> {
    let S = lexicon.expect_lexicon_encoding("lexicon_encoding")?;
    let mut P = pb::LexiconEncoding {
        logtokensum: S.encoding.logtokensum,
        tokens: S.encoding.tokens,
        boundaries: S.encoding.boundaries,
        weight: S.encoding.weight,
        log2pi: S.encoding.log2pi,
        atoms: None,
    };
    P.atoms = Some(convert_counter(&S.atoms)?);
    return Ok(P);
}

pub fn convert_corpus_encoding(corpus: &Value) -> Result<pb::CorpusEncoding, errors::ConvertError> {
    let S = corpus.expect_corpus_encoding("corpus_encoding")?;
    let mut P = pb::CorpusEncoding {
        logtokensum: S.encoding.logtokensum,
        tokens: S.encoding.tokens,
        boundaries: S.encoding.boundaries,
        weight: S.encoding.weight,
        log2pi: S.encoding.log2pi,
        lexicon_encoding: None,
    };
    P.lexicon_encoding = Some(convert_lexicon_encoding(&S.lexicon_encoding)?);
    return Ok(P);
}

// the wire schema requires the full nesting depth: annotated corpus
// encoding wraps a corpus encoding wraps a lexicon encoding, with no
// shortcut that skips a level
pub fn convert_annotated_corpus_encoding(
    coding: &Value,
) -> Result<pb::AnnotatedCorpusEncoding, errors::ConvertError> {
    let S = coding.expect_annotated_corpus_encoding("annotated_corpus_encoding")?;
    let mut P = pb::AnnotatedCorpusEncoding {
        logtokensum: S.encoding.logtokensum,
        tokens: S.encoding.tokens,
        boundaries: S.encoding.boundaries,
        weight: S.encoding.weight,
        log2pi: S.encoding.log2pi,
        do_update_weight: S.do_update_weight,
        corpus_coding: None,
    };
    P.corpus_coding = Some(convert_corpus_encoding(&S.corpus_coding)?);
    return Ok(P);
}

pub fn convert_fixed_corpus_weight(
    updater: &Value,
) -> Result<pb::FixedCorpusWeight, errors::ConvertError> {
    let S = updater.expect_fixed_corpus_weight("corpus_weight_updater")?;
    let P = pb::FixedCorpusWeight { weight: S.weight };
    return Ok(P);
}

// absent fields and empty containers/strings both read as "not there"
fn present(field: &Option<Value>) -> Option<&Value> {
    match field {
        Some(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

// assemble the full wire message. Optional fields are converted only
// when present; scalar fields are copied unconditionally (zero and
// false are meaningful values with no absent state); mapping keys are
// carried over untransformed.
pub fn convert_model(model: &Model) -> Result<pb::BaselineModel, errors::ConvertError> {
    let mut P = pb::BaselineModel::default();

    if let Some(annotations) = present(&model.annotations) {
        for (compound, annotation) in annotations.expect_dict("annotations")? {
            P.annotations
                .insert(compound.clone(), convert_annotation(annotation)?);
        }
    }

    if let Some(forcesplit) = present(&model.forcesplit_list) {
        for atom in forcesplit.expect_list("forcesplit_list")? {
            P.forcesplit_list
                .push(atom.expect_str("forcesplit")?.to_string());
        }
    }

    if let Some(nosplit) = present(&model.nosplit_re) {
        P.nosplit_re = nosplit.expect_str("nosplit_re")?.to_string();
    }

    P.penalty = model.penalty;
    P.tokens = model.tokens;
    P.types = model.types;

    if let Some(analyses) = present(&model.analyses) {
        for (construction, node) in analyses.expect_dict("analyses")? {
            P.analyses
                .insert(construction.clone(), convert_constr_node(node)?);
        }
    }

    if let Some(coding) = present(&model.annot_coding) {
        P.annot_coding = Some(convert_annotated_corpus_encoding(coding)?);
    }

    if let Some(coding) = present(&model.corpus_coding) {
        P.corpus_coding = Some(convert_corpus_encoding(coding)?);
    }

    if let Some(updater) = present(&model.corpus_weight_updater) {
        P.corpus_weight_updater = Some(convert_fixed_corpus_weight(updater)?);
    }

    if let Some(counter) = present(&model.counter) {
        P.counter = Some(convert_counter(counter)?);
    }

    if let Some(coding) = present(&model.lexicon_coding) {
        P.lexicon_coding = Some(convert_lexicon_encoding(coding)?);
    }

    P.segment_only = model.segment_only;
    P.supervised = model.supervised;
    P.use_skips = model.use_skips;

    return Ok(P);
}

// read back a serialized wire message (the form the segmenter consumes)
pub fn decode_model(
    buf: &types::ProtoBytes,
    compressed: bool,
) -> Result<pb::BaselineModel, errors::DeserializationError> {
    if compressed {
        let b = compress::decompress_bytes(buf)?;
        return decode_model(&b, false);
    }
    let P: pb::BaselineModel = Message::decode(&buf[..])?;
    return Ok(P);
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::model::{
        AnnotatedCorpusEncoding, ConstrNode, CorpusEncoding, FixedCorpusWeight, LexiconEncoding,
    };
    use std::collections::BTreeMap;

    fn arbitrary_encoding() -> Encoding {
        return Encoding {
            logtokensum: 12.5,
            tokens: 100,
            boundaries: 7,
            weight: 1.0,
            log2pi: 1.8379,
        };
    }

    fn atoms_counter() -> Value {
        let mut counts = BTreeMap::new();
        counts.insert("a".to_string(), 3);
        counts.insert("b".to_string(), 1);
        return Value::Counter(counts);
    }

    fn lexicon_value() -> Value {
        return Value::LexiconEncoding(Box::new(LexiconEncoding {
            encoding: arbitrary_encoding(),
            atoms: atoms_counter(),
        }));
    }

    fn corpus_value() -> Value {
        return Value::CorpusEncoding(Box::new(CorpusEncoding {
            encoding: arbitrary_encoding(),
            lexicon_encoding: lexicon_value(),
        }));
    }

    fn annotated_value() -> Value {
        return Value::AnnotatedCorpusEncoding(Box::new(AnnotatedCorpusEncoding {
            encoding: arbitrary_encoding(),
            do_update_weight: true,
            corpus_coding: corpus_value(),
        }));
    }

    fn constr_node(splitloc: Value) -> Value {
        return Value::ConstrNode(Box::new(ConstrNode {
            rcount: 4,
            count: 9,
            splitloc,
        }));
    }

    #[test]
    fn test_convert_counter() {
        let mut counts = BTreeMap::new();
        counts.insert("un".to_string(), 12);
        counts.insert("bar".to_string(), 0); // zero is a valid count
        counts.insert("ed".to_string(), 7);

        let P = convert_counter(&Value::Counter(counts.clone())).unwrap();
        assert_eq!(P.counts.len(), counts.len());
        for (symbol, &count) in &counts {
            assert_eq!(P.counts[symbol], count);
        }
    }

    #[test]
    fn test_convert_counter_empty() {
        // an empty counter converts to an empty map, not an error; the
        // parent decides whether the field is attached at all
        let P = convert_counter(&Value::Counter(BTreeMap::new())).unwrap();
        assert_eq!(P.counts.len(), 0);
    }

    #[test]
    fn test_counter_kind_check() {
        match convert_counter(&Value::List(vec![])) {
            Err(errors::ConvertError::TypeMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, Kind::Counter);
                assert_eq!(actual, Kind::List);
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_constr_node_single_splitloc() {
        let P = convert_constr_node(&constr_node(Value::Int(3))).unwrap();
        assert_eq!(P.rcount, 4);
        assert_eq!(P.count, 9);
        assert_eq!(P.splitloc, vec![3]);
    }

    #[test]
    fn test_constr_node_sequence_splitloc() {
        let locs = Value::List(vec![Value::Int(2), Value::Int(5), Value::Int(3)]);
        let P = convert_constr_node(&constr_node(locs)).unwrap();
        // order preserved verbatim, no sorting
        assert_eq!(P.splitloc, vec![2, 5, 3]);
    }

    #[test]
    fn test_constr_node_malformed_splitloc() {
        match convert_constr_node(&constr_node(Value::Str("3".to_string()))) {
            Err(errors::ConvertError::InvariantViolation { context, .. }) => {
                assert_eq!(context, "splitloc");
            }
            other => panic!("expected InvariantViolation, got {:?}", other),
        }

        // offsets are never negative in a well-formed model
        match convert_constr_node(&constr_node(Value::Int(-1))) {
            Err(errors::ConvertError::InvariantViolation { context, .. }) => {
                assert_eq!(context, "splitloc");
            }
            other => panic!("expected InvariantViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_constr_node_kind_check() {
        match convert_constr_node(&Value::Int(1)) {
            Err(errors::ConvertError::TypeMismatch { expected, .. }) => {
                assert_eq!(expected, Kind::ConstrNode);
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_annotation() {
        let annotation = Value::List(vec![
            Value::List(vec![
                Value::Str("un".to_string()),
                Value::Str("supervised".to_string()),
            ]),
            Value::List(vec![
                Value::Str("un".to_string()),
                Value::Str("super".to_string()),
                Value::Str("vised".to_string()),
            ]),
        ]);

        let P = convert_annotation(&annotation).unwrap();
        assert_eq!(P.analyses.len(), 2);
        assert_eq!(P.analyses[0].constructions, vec!["un", "supervised"]);
        assert_eq!(P.analyses[1].constructions, vec!["un", "super", "vised"]);
    }

    #[test]
    fn test_annotation_rejects_mapping() {
        match convert_annotation(&Value::Dict(BTreeMap::new())) {
            Err(errors::ConvertError::TypeMismatch {
                context, expected, ..
            }) => {
                assert_eq!(context, "annotation");
                assert_eq!(expected, Kind::List);
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_lexicon_encoding() {
        let P = convert_lexicon_encoding(&lexicon_value()).unwrap();
        assert_eq!(P.logtokensum, 12.5);
        assert_eq!(P.tokens, 100);
        assert_eq!(P.boundaries, 7);
        assert_eq!(P.weight, 1.0);
        assert_eq!(P.log2pi, 1.8379);

        let atoms = P.atoms.unwrap();
        assert_eq!(atoms.counts.len(), 2);
        assert_eq!(atoms.counts["a"], 3);
        assert_eq!(atoms.counts["b"], 1);
    }

    #[test]
    fn test_convert_corpus_encoding_nesting() {
        let P = convert_corpus_encoding(&corpus_value()).unwrap();
        // nested exactly one level: corpus -> lexicon -> atoms
        let lexicon = P.lexicon_encoding.unwrap();
        let atoms = lexicon.atoms.unwrap();
        assert_eq!(atoms.counts["a"], 3);
        assert_eq!(atoms.counts["b"], 1);
    }

    #[test]
    fn test_convert_annotated_corpus_encoding() {
        let P = convert_annotated_corpus_encoding(&annotated_value()).unwrap();
        assert!(P.do_update_weight);

        // the nested coding comes from the actual source field, with the
        // full corpus -> lexicon depth below it
        let corpus = P.corpus_coding.unwrap();
        assert_eq!(corpus.tokens, 100);
        assert!(corpus.lexicon_encoding.is_some());
    }

    #[test]
    fn test_encoding_kind_checks() {
        assert!(convert_lexicon_encoding(&corpus_value()).is_err());
        assert!(convert_corpus_encoding(&lexicon_value()).is_err());
        assert!(convert_annotated_corpus_encoding(&corpus_value()).is_err());

        // a corrupted nested field fails at the nested converter
        let bad = Value::CorpusEncoding(Box::new(CorpusEncoding {
            encoding: arbitrary_encoding(),
            lexicon_encoding: Value::Int(0),
        }));
        match convert_corpus_encoding(&bad) {
            Err(errors::ConvertError::TypeMismatch { expected, .. }) => {
                assert_eq!(expected, Kind::LexiconEncoding);
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_fixed_corpus_weight() {
        let P =
            convert_fixed_corpus_weight(&Value::FixedCorpusWeight(FixedCorpusWeight {
                weight: 2.5,
            }))
            .unwrap();
        assert_eq!(P.weight, 2.5);
    }

    #[test]
    fn test_model_empty_fields_left_unset() {
        let mut model = Model::new();
        model.forcesplit_list = Some(Value::List(vec![]));
        model.counter = Some(Value::Counter(BTreeMap::new()));
        model.nosplit_re = Some(Value::Str(String::new()));

        let P = convert_model(&model).unwrap();
        assert!(P.forcesplit_list.is_empty());
        assert_eq!(P.counter, None); // absent, not an empty submessage
        assert_eq!(P.nosplit_re, "");
        assert!(P.annotations.is_empty());
        assert_eq!(P.annot_coding, None);
    }

    #[test]
    fn test_model_scalars_always_copied() {
        // zero/false are meaningful values, copied unconditionally
        let model = Model::new();
        let P = convert_model(&model).unwrap();
        assert_eq!(P.penalty, 0.0);
        assert_eq!(P.tokens, 0);
        assert_eq!(P.types, 0);
        assert!(!P.segment_only);
        assert!(!P.supervised);
        assert!(!P.use_skips);
    }

    #[test]
    fn test_convert_model_full() {
        let mut annotations = BTreeMap::new();
        annotations.insert(
            "unfoobared".to_string(),
            Value::List(vec![Value::List(vec![
                Value::Str("un".to_string()),
                Value::Str("foobar".to_string()),
                Value::Str("ed".to_string()),
            ])]),
        );

        let mut analyses = BTreeMap::new();
        analyses.insert("foobar".to_string(), constr_node(Value::Int(3)));
        analyses.insert(
            "unfoobared".to_string(),
            constr_node(Value::List(vec![Value::Int(2), Value::Int(8)])),
        );

        let mut counts = BTreeMap::new();
        counts.insert("foobar".to_string(), 21);

        let mut model = Model::new();
        model.annotations = Some(Value::Dict(annotations));
        model.forcesplit_list = Some(Value::List(vec![
            Value::Str("ab-".to_string()),
            Value::Str("cd".to_string()),
        ]));
        model.nosplit_re = Some(Value::Str("^[0-9]+$".to_string()));
        model.penalty = -9999.9;
        model.tokens = 1234;
        model.types = 56;
        model.analyses = Some(Value::Dict(analyses));
        model.annot_coding = Some(annotated_value());
        model.corpus_coding = Some(corpus_value());
        model.corpus_weight_updater =
            Some(Value::FixedCorpusWeight(FixedCorpusWeight { weight: 1.0 }));
        model.counter = Some(Value::Counter(counts));
        model.lexicon_coding = Some(lexicon_value());
        model.segment_only = true;
        model.supervised = true;
        model.use_skips = false;

        let P = convert_model(&model).unwrap();

        assert_eq!(P.annotations.len(), 1);
        assert_eq!(
            P.annotations["unfoobared"].analyses[0].constructions,
            vec!["un", "foobar", "ed"]
        );
        assert_eq!(P.forcesplit_list, vec!["ab-", "cd"]);
        assert_eq!(P.nosplit_re, "^[0-9]+$");
        assert_eq!(P.penalty, -9999.9);
        assert_eq!(P.tokens, 1234);
        assert_eq!(P.types, 56);

        // key identity preserved exactly
        assert_eq!(P.analyses.len(), 2);
        assert_eq!(P.analyses["foobar"].splitloc, vec![3]);
        assert_eq!(P.analyses["unfoobared"].splitloc, vec![2, 8]);

        assert!(P.annot_coding.is_some());
        assert!(P.corpus_coding.is_some());
        assert_eq!(P.corpus_weight_updater.unwrap().weight, 1.0);
        assert_eq!(P.counter.unwrap().counts["foobar"], 21);
        assert!(P.lexicon_coding.is_some());
        assert!(P.segment_only);
        assert!(P.supervised);
        assert!(!P.use_skips);
    }

    #[test]
    fn test_model_error_propagates() {
        // a wrong-kind value anywhere in the graph aborts the whole run
        let mut analyses = BTreeMap::new();
        analyses.insert("foobar".to_string(), Value::Int(21)); // not a ConstrNode

        let mut model = Model::new();
        model.analyses = Some(Value::Dict(analyses));

        match convert_model(&model) {
            Err(errors::ConvertError::TypeMismatch { expected, .. }) => {
                assert_eq!(expected, Kind::ConstrNode);
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_serialize_decode_round_trip() {
        let mut counts = BTreeMap::new();
        counts.insert("a".to_string(), 3);

        let mut model = Model::new();
        model.tokens = 42;
        model.counter = Some(Value::Counter(counts));
        model.lexicon_coding = Some(lexicon_value());
        model.use_skips = true;

        let P = convert_model(&model).unwrap();

        for compress in [false, true] {
            let buf = model.serialize(compress).unwrap();
            let Q = decode_model(&buf, compress).unwrap();
            assert_eq!(P, Q);
        }
    }
}
