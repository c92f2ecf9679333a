pub mod engine;
pub mod matcher;
pub mod scorer;
pub mod topk;
