pub mod authz;
pub mod keys;
