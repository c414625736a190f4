//! CSV ingestion: reading raw uploads and cleaning them into the canonical
//! post table.

mod clean;
mod error;
mod reader;

pub use clean::{clean, parse_engagements, parse_post_date};
pub use error::IngestError;
pub use reader::{read_posts, RawPost};
