//! macOS release tooling: `ditto`, `sign_update` and `generate_keys`.

pub mod archive;
pub mod keys;
pub mod sign;

pub use archive::create_archive;
pub use keys::{KeyStatus, query_public_key};
pub use sign::{Signature, parse_sign_update_output, sign_archive, validate_key_source};
