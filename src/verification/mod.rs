mod client;

pub use client::VerificationClient;
