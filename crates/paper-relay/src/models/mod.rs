//! Wire models for the caller-facing API and the paper agent API.
//!
//! Paper records stay opaque JSON objects; only `score` is ever read.

mod results;
mod search;

pub use results::{PaperRecord, RawResults, ResultPage};
pub use search::{AgentResultRequest, AgentSearchRequest, SearchAck, SearchRequest};
