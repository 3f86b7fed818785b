
//! Various utilities.

pub mod regexes;
