//! Block cipher modes of operation

pub mod ctr;
