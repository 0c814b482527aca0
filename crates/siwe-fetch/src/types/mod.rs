/*
[INPUT]:  Authorization server wire schema and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for nonce and token exchange
[UPDATE]: When wire schema changes or new types added
*/

pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;
