#![no_std]

pub mod http;
pub mod identity;
pub mod pacing;
pub mod payload;
pub mod sample;
