// Handler groups, one file per operation.
//
// Everything under /api/* sits behind the JWT middleware; the pages group
// does its own cookie auth so it can redirect instead of returning 401.
pub mod access;
pub mod appointments;
pub mod auth;
pub mod clients;
pub mod organization;
pub mod pages;
pub mod sessions;
