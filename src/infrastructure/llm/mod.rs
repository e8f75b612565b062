pub mod groq;
pub mod search;
