//! Driver for the MAX31865 RTD-to-digital converter.
//!
//! The chip excites a platinum RTD (PT100/PT1000) through a reference
//! resistor and digitizes the resistance ratio to a 15-bit code over SPI.
//! This crate wraps register access, the one-shot conversion sequence, fault
//! handling, and the Callendar-Van Dusen resistance-to-temperature
//! conversion behind [`embedded-hal`] 0.2 blocking traits.
//!
//! Construct a transport first — [`HardwareSpi`] over a shared SPI
//! peripheral and a chip-select pin, or [`SoftwareSpi`] bit-banged over four
//! GPIOs — then hand it to [`Max31865`] together with a blocking delay and
//! call [`Max31865::begin`] with a [`Config`].
//!
//! Reads are synchronous: a one-shot conversion blocks for the bias settling
//! plus worst-case conversion time (75 ms total), because the chip offers no
//! completion signal. Wiring and range problems are never surfaced as bus
//! errors; poll [`Max31865::read_fault`] and inspect the [`Fault`] bits.
//!
//! [`embedded-hal`]: https://github.com/rust-embedded/embedded-hal

#![no_std]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod config;
pub mod conversion;
mod fault;
pub mod interface;
mod max31865;
pub mod registers;

pub use crate::{
    config::{Config, Filter, Wires},
    fault::Fault,
    interface::{Error, HardwareSpi, SoftwareSpi, SpiInterface},
    max31865::Max31865,
};
