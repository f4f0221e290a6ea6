pub mod debounce;
pub mod dom;
