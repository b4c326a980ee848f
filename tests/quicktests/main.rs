#[path = "../../src/test/quick.rs"]
mod quick;
mod tree;

pub(crate) use quick::Op;
