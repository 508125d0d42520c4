//! Public types exposed by the `esgate-core` crate.

pub mod acl;
pub mod classification;
pub mod permission;
pub mod request;

pub use acl::{Acl, Operation};
pub use classification::Classification;
pub use permission::{
    CompiledPermission, NewPermission, PatchFields, Permission, PermissionDelta,
    check_patterns, normalize_pattern,
};
pub use request::{Method, RequestParts, normalize_path};
