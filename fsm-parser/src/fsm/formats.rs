//! Output formats for element trees
//!
//! Parsed trees are serialized through a [Formatter] looked up by name in a
//! [FormatRegistry]:
//!
//!     tag      XML-like, one element per tag
//!     treeviz  one line per node, with icons and truncated labels
//!     json     serde_json, pretty printed
//!     yaml     serde_yaml

pub mod registry;
pub mod serde_formats;
pub mod tag;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use serde_formats::{JsonFormatter, YamlFormatter};
pub use tag::{to_tag_str, TagFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
