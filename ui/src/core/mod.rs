pub mod debounce;
pub mod format;
pub mod notify;
pub mod report;
pub mod seed;
pub mod storage;
pub mod timing;
pub mod validate;
