#![allow(dead_code)]

pub mod pb {
    include!("morfessor.v1.rs");
}

pub type ProtoBytes = Vec<u8>;

// construction/atom occurrence counts are arbitrary-size in the source
// model; int64 covers anything a real corpus produces
pub type Count = i64;
