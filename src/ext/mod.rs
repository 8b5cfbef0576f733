// Extension traits for third-party crates live under `crate::ext`.

pub mod serde_json;
