//! Document Intake Common Library
//!
//! クライアントとバックエンド連携で共有される型とファイル名規則

pub mod error;
pub mod media;
pub mod naming;
pub mod parser;
pub mod types;

pub use error::{Error, Result};
pub use media::MediaType;
pub use naming::{has_recognized_extension, original_extension, resolve_outgoing_name};
pub use parser::{decode_commit, decode_drive_status, decode_dry_run};
pub use types::{
    CommitHints, CommitResponse, DriveStatus, DryRunResponse, ExtractedFields, FieldDisplay,
    ResponseStatus,
};
