//! Codefence Syntax
//!
//! Language knowledge needed to recognise file-path markers in fenced
//! code blocks.
//!
//! # Features
//!
//! - **Language ids** - Map fence tags (py, ts, sh) to canonical language ids
//! - **Comment syntax** - Which comment leader (and closer) each language uses
//! - **File-path markers** - Detect and render `filepath:` comments
//!
//! # Example
//!
//! ```
//! use codefence_syntax::FilepathMarker;
//!
//! let marker = FilepathMarker::for_tag("python").unwrap();
//! assert_eq!(marker.extract("# filepath: app/main.py\n"), Some("app/main.py"));
//! ```

mod comments;
mod languages;

pub use comments::{comment_syntax, CommentSyntax, FilepathMarker, FILEPATH_KEYWORD};
pub use languages::{language_id, tags_for, LANGUAGE_IDS};
