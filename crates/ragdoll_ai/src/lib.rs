pub mod embed;
pub mod eval;
pub mod ingest;
pub mod llm;
pub mod ollama;
pub mod pipeline;
pub mod rag;
pub mod vector;
