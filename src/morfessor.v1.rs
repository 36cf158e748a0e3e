// @generated
/// One alternative segmentation of a compound: its constructions in order.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Analysis {
    #[prost(string, repeated, tag="1")]
    pub constructions: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}
/// Gold-standard reference segmentations for one compound, ranked.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Annotation {
    #[prost(message, repeated, tag="1")]
    pub analyses: ::prost::alloc::vec::Vec<Analysis>,
}
/// Analysis node for one construction: reference/total counts plus the
/// candidate split offsets. splitloc is always a sequence on the wire,
/// even when the in-memory model stored a single offset.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConstrNode {
    #[prost(int64, tag="1")]
    pub rcount: i64,
    #[prost(int64, tag="2")]
    pub count: i64,
    #[prost(uint32, repeated, tag="3")]
    pub splitloc: ::prost::alloc::vec::Vec<u32>,
}
/// Symbol -> occurrence count. Zero counts are valid entries.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Counter {
    #[prost(map="string, int64", tag="1")]
    pub counts: ::std::collections::HashMap<::prost::alloc::string::String, i64>,
}
/// MDL cost accounting for the lexicon, plus the atom counter.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LexiconEncoding {
    #[prost(double, tag="1")]
    pub logtokensum: f64,
    #[prost(int64, tag="2")]
    pub tokens: i64,
    #[prost(int64, tag="3")]
    pub boundaries: i64,
    #[prost(double, tag="4")]
    pub weight: f64,
    /// precomputed constant, transported as-is
    #[prost(double, tag="5")]
    pub log2pi: f64,
    #[prost(message, optional, tag="6")]
    pub atoms: ::core::option::Option<Counter>,
}
/// MDL cost accounting for the corpus; owns exactly one lexicon encoding.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CorpusEncoding {
    #[prost(double, tag="1")]
    pub logtokensum: f64,
    #[prost(int64, tag="2")]
    pub tokens: i64,
    #[prost(int64, tag="3")]
    pub boundaries: i64,
    #[prost(double, tag="4")]
    pub weight: f64,
    #[prost(double, tag="5")]
    pub log2pi: f64,
    #[prost(message, optional, tag="6")]
    pub lexicon_encoding: ::core::option::Option<LexiconEncoding>,
}
/// Cost accounting for the annotated corpus; owns exactly one corpus encoding.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AnnotatedCorpusEncoding {
    #[prost(double, tag="1")]
    pub logtokensum: f64,
    #[prost(int64, tag="2")]
    pub tokens: i64,
    #[prost(int64, tag="3")]
    pub boundaries: i64,
    #[prost(double, tag="4")]
    pub weight: f64,
    #[prost(double, tag="5")]
    pub log2pi: f64,
    #[prost(bool, tag="6")]
    pub do_update_weight: bool,
    #[prost(message, optional, tag="7")]
    pub corpus_coding: ::core::option::Option<CorpusEncoding>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FixedCorpusWeight {
    #[prost(double, tag="1")]
    pub weight: f64,
}
/// The full baseline segmentation model. Optional submessages are left
/// unset when the corresponding model field is absent or empty.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BaselineModel {
    #[prost(map="string, message", tag="1")]
    pub annotations: ::std::collections::HashMap<::prost::alloc::string::String, Annotation>,
    #[prost(string, repeated, tag="2")]
    pub forcesplit_list: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, tag="3")]
    pub nosplit_re: ::prost::alloc::string::String,
    #[prost(double, tag="4")]
    pub penalty: f64,
    #[prost(int64, tag="5")]
    pub tokens: i64,
    #[prost(int64, tag="6")]
    pub types: i64,
    #[prost(map="string, message", tag="7")]
    pub analyses: ::std::collections::HashMap<::prost::alloc::string::String, ConstrNode>,
    #[prost(message, optional, tag="8")]
    pub annot_coding: ::core::option::Option<AnnotatedCorpusEncoding>,
    #[prost(message, optional, tag="9")]
    pub corpus_coding: ::core::option::Option<CorpusEncoding>,
    #[prost(message, optional, tag="10")]
    pub corpus_weight_updater: ::core::option::Option<FixedCorpusWeight>,
    #[prost(message, optional, tag="11")]
    pub counter: ::core::option::Option<Counter>,
    #[prost(message, optional, tag="12")]
    pub lexicon_coding: ::core::option::Option<LexiconEncoding>,
    #[prost(bool, tag="13")]
    pub segment_only: bool,
    #[prost(bool, tag="14")]
    pub supervised: bool,
    #[prost(bool, tag="15")]
    pub use_skips: bool,
}
// @@protoc_insertion_point(module)
