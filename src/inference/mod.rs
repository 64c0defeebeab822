pub mod candle_backend;

pub use candle_backend::{download_model, select_device, ModelFiles, SequenceClassifier};
