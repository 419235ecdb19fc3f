pub(crate) mod cmd;
pub(crate) mod iter;
