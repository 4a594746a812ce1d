//! SPI transport for the MAX31865.
//!
//! The chip talks SPI mode 1 (clock idle low, data sampled on the trailing
//! edge), MSB first. Two transports are provided: [`HardwareSpi`] wraps a
//! shared hardware SPI peripheral plus a chip-select pin, [`SoftwareSpi`]
//! clocks the bus manually over four GPIOs. Both expose the same primitive:
//! a full-duplex in-place transfer bracketed by chip-select low/high.

mod error;

use core::convert::Infallible;

use embedded_hal::{
    blocking::spi::Transfer,
    digital::v2::{InputPin, OutputPin},
};

pub use self::error::*;

/// A chip-select-bracketed SPI transaction.
///
/// Implementations own the chip-select pin and hold the bus exclusively for
/// the duration of each call.
pub trait SpiInterface {
    type Error;

    /// Assert chip-select, transfer all of `words` in place (full duplex),
    /// release chip-select.
    fn transaction(&mut self, words: &mut [u8]) -> Result<(), Self::Error>;
}

/// Transport over a hardware SPI peripheral.
pub struct HardwareSpi<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> HardwareSpi<SPI, CS> {
    pub const fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    /// Release the peripheral and chip-select pin
    pub fn free(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS> SpiInterface for HardwareSpi<SPI, CS>
where
    SPI: Transfer<u8>,
    CS: OutputPin,
{
    type Error = Error<SPI::Error, CS::Error>;

    fn transaction(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(Error::Pin)?;
        self.spi.transfer(words).map_err(Error::Spi)?;
        self.cs.set_high().map_err(Error::Pin)
    }
}

/// Bit-banged transport over plain GPIOs.
pub struct SoftwareSpi<SCK, MOSI, MISO, CS> {
    sck: SCK,
    mosi: MOSI,
    miso: MISO,
    cs: CS,
}

impl<SCK, MOSI, MISO, CS> SoftwareSpi<SCK, MOSI, MISO, CS> {
    pub const fn new(sck: SCK, mosi: MOSI, miso: MISO, cs: CS) -> Self {
        Self {
            sck,
            mosi,
            miso,
            cs,
        }
    }

    /// Release the pins
    pub fn free(self) -> (SCK, MOSI, MISO, CS) {
        (self.sck, self.mosi, self.miso, self.cs)
    }
}

impl<SCK, MOSI, MISO, CS, PinE> SoftwareSpi<SCK, MOSI, MISO, CS>
where
    SCK: OutputPin<Error = PinE>,
    MOSI: OutputPin<Error = PinE>,
    MISO: InputPin<Error = PinE>,
    CS: OutputPin<Error = PinE>,
{
    /// Shift one byte out while shifting the response in, MSB first.
    ///
    /// Per bit: clock high, data-out driven, clock low, data-in sampled.
    fn transfer_byte(&mut self, byte: u8) -> Result<u8, PinE> {
        let mut reply = 0;

        for i in (0..8).rev() {
            reply <<= 1;

            self.sck.set_high()?;
            if byte & (1 << i) != 0 {
                self.mosi.set_high()?;
            } else {
                self.mosi.set_low()?;
            }
            self.sck.set_low()?;

            if self.miso.is_high()? {
                reply |= 1;
            }
        }

        Ok(reply)
    }
}

impl<SCK, MOSI, MISO, CS, PinE> SpiInterface for SoftwareSpi<SCK, MOSI, MISO, CS>
where
    SCK: OutputPin<Error = PinE>,
    MOSI: OutputPin<Error = PinE>,
    MISO: InputPin<Error = PinE>,
    CS: OutputPin<Error = PinE>,
{
    type Error = Error<Infallible, PinE>;

    fn transaction(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        // Clock must idle low before chip-select asserts
        self.sck.set_low().map_err(Error::Pin)?;
        self.cs.set_low().map_err(Error::Pin)?;

        for word in words.iter_mut() {
            *word = self.transfer_byte(*word).map_err(Error::Pin)?;
        }

        self.cs.set_high().map_err(Error::Pin)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::{cell::RefCell, convert::Infallible};
    use std::{rc::Rc, vec::Vec};

    use super::*;

    /// Everything a logic analyzer would see on the four wires.
    #[derive(Default)]
    struct WireState {
        sck: bool,
        mosi: bool,
        cs: bool,
        /// MOSI level captured at each falling clock edge
        sampled: Vec<bool>,
        /// Bits to present on MISO, one per sample
        miso_bits: Vec<bool>,
        miso_idx: usize,
        /// Chip-select transitions, true = asserted (low)
        cs_events: Vec<bool>,
    }

    #[derive(Clone)]
    struct Wire(Rc<RefCell<WireState>>);

    impl Wire {
        fn new(miso_bits: &[bool]) -> Self {
            Self(Rc::new(RefCell::new(WireState {
                miso_bits: miso_bits.to_vec(),
                ..WireState::default()
            })))
        }
    }

    struct SckPin(Wire);
    struct MosiPin(Wire);
    struct MisoPin(Wire);
    struct CsPin(Wire);

    impl OutputPin for SckPin {
        type Error = Infallible;

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0 .0.borrow_mut().sck = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Infallible> {
            let mut s = self.0 .0.borrow_mut();
            if s.sck {
                let mosi = s.mosi;
                s.sampled.push(mosi);
            }
            s.sck = false;
            Ok(())
        }
    }

    impl OutputPin for MosiPin {
        type Error = Infallible;

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0 .0.borrow_mut().mosi = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0 .0.borrow_mut().mosi = false;
            Ok(())
        }
    }

    impl OutputPin for CsPin {
        type Error = Infallible;

        fn set_high(&mut self) -> Result<(), Infallible> {
            let mut s = self.0 .0.borrow_mut();
            s.cs = false;
            s.cs_events.push(false);
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Infallible> {
            let mut s = self.0 .0.borrow_mut();
            s.cs = true;
            s.cs_events.push(true);
            Ok(())
        }
    }

    impl InputPin for MisoPin {
        type Error = Infallible;

        fn is_high(&self) -> Result<bool, Infallible> {
            let mut s = self.0 .0.borrow_mut();
            let bit = s.miso_bits.get(s.miso_idx).copied().unwrap_or(false);
            s.miso_idx += 1;
            Ok(bit)
        }

        fn is_low(&self) -> Result<bool, Infallible> {
            self.is_high().map(|b| !b)
        }
    }

    fn spi_over(wire: &Wire) -> SoftwareSpi<SckPin, MosiPin, MisoPin, CsPin> {
        SoftwareSpi::new(
            SckPin(wire.clone()),
            MosiPin(wire.clone()),
            MisoPin(wire.clone()),
            CsPin(wire.clone()),
        )
    }

    #[test]
    fn bitbang_shifts_out_msb_first() {
        let wire = Wire::new(&[]);
        let mut spi = spi_over(&wire);

        let mut words = [0xA5];
        spi.transaction(&mut words).unwrap();

        let s = wire.0.borrow();
        assert_eq!(
            s.sampled,
            [true, false, true, false, false, true, false, true]
        );
    }

    #[test]
    fn bitbang_samples_reply_msb_first() {
        // 0x3C = 0b0011_1100
        let wire = Wire::new(&[false, false, true, true, true, true, false, false]);
        let mut spi = spi_over(&wire);

        let mut words = [0x00];
        spi.transaction(&mut words).unwrap();
        assert_eq!(words, [0x3C]);
    }

    #[test]
    fn transaction_brackets_with_chip_select() {
        let wire = Wire::new(&[]);
        let mut spi = spi_over(&wire);

        spi.transaction(&mut [0x01, 0x02]).unwrap();

        let s = wire.0.borrow();
        assert_eq!(s.cs_events, [true, false]);
        assert!(!s.cs, "chip-select must be released");
        assert!(!s.sck, "clock must idle low after the transaction");
    }
}
