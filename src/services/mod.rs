pub mod key_namer;
pub mod retrieval;
pub mod storage;
pub mod upload;
