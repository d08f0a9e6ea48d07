//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in spinwash-core on top of `embedded-hal` 1.0:
//!
//! - Motor drivers (PWM H-bridge)
//! - Countdown displays (TM1637 4-digit 7-segment)
//! - Front panel buttons (debounced, active low)

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod display;
pub mod input;
pub mod motor;
