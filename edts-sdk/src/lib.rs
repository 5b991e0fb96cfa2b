#![doc = include_str!("../README.md")]

#[cfg(feature = "remote")]
pub mod remote;
