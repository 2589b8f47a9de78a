/// Durable team score persistence.
pub mod score_store;
/// Storage error types shared by persistence backends.
pub mod storage;
/// Word bank file loading.
pub mod word_bank;
