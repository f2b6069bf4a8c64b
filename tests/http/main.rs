//! End-to-end HTTP tests against the assembled router.

mod api;
mod callback;
mod common;
mod pages;
