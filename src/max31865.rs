//! Driver for the MAX31865 RTD-to-digital converter.

use embedded_hal::blocking::delay::DelayUs;

use crate::{
    config::{Config, Filter, Wires},
    conversion,
    fault::Fault,
    interface::SpiInterface,
    registers,
};

/// Bias settling time before a one-shot conversion may start.
const SETTLE_DELAY_US: u32 = 10_000;
/// Worst-case conversion time. The chip has no completion signal, so the
/// driver must block for the full datasheet maximum.
const CONVERSION_DELAY_US: u32 = 65_000;

/// Cleared by `clear_fault` alongside setting the fault-clear bit:
/// one-shot plus the fault-detection-cycle bits. Bias and auto-convert
/// survive the mask; this matches the chip's documented write value.
const CLEAR_FAULT_MASK: u8 = 0x2C;

/// A MAX31865 behind an SPI transport, with a blocking delay for the
/// conversion waits.
///
/// All methods are synchronous and hold the bus for one register
/// transaction at a time. A conversion in flight cannot be aborted.
pub struct Max31865<I, D> {
    iface: I,
    delay: D,
    cable_resistance: f32,
    last_read: u16,
    last_fault: u8,
}

impl<I, D> Max31865<I, D>
where
    I: SpiInterface,
    D: DelayUs<u32>,
{
    pub fn new(iface: I, delay: D) -> Self {
        Self {
            iface,
            delay,
            cable_resistance: 0.0,
            last_read: 0,
            last_fault: 0,
        }
    }

    /// Apply the wiring scheme and noise filter, disable bias and
    /// auto-conversion, and clear any latched faults.
    ///
    /// Leaves the chip idle and ready for one-shot reads.
    pub fn begin(&mut self, config: Config) -> Result<(), I::Error> {
        self.cable_resistance = config.cable_resistance;

        self.set_wires(config.wires)?;
        self.enable_50hz(config.filter == Filter::Hz50)?;
        self.enable_bias(false)?;
        self.auto_convert(false)?;
        self.clear_fault()?;

        Ok(())
    }

    /// Read the raw fault-status register.
    ///
    /// Faults stay latched until [`Max31865::clear_fault`] is called.
    pub fn read_fault(&mut self) -> Result<Fault, I::Error> {
        let status = self.read_register8(registers::FAULT_STATUS)?;
        self.last_fault = status;
        Ok(Fault(status))
    }

    /// Clear all latched faults.
    ///
    /// Writes the config register with the one-shot and
    /// fault-detection-cycle bits cleared and the fault-clear bit set.
    /// Bias and auto-convert are untouched by the mask.
    pub fn clear_fault(&mut self) -> Result<(), I::Error> {
        let mut cfg = self.read_register8(registers::CONFIG)?;
        cfg &= !CLEAR_FAULT_MASK;
        cfg |= registers::CONFIG_FAULT_CLEAR;
        self.write_register8(registers::CONFIG, cfg)
    }

    /// Switch the bias voltage on the RTD sense loop.
    ///
    /// Bias must settle before a conversion; one-shot reads manage it
    /// themselves. Leaving it on between reads trades standby power for
    /// skipping the settling wait.
    pub fn enable_bias(&mut self, enable: bool) -> Result<(), I::Error> {
        self.set_config_bit(registers::CONFIG_BIAS, enable)
    }

    /// Switch continuous (50/60 Hz rate) conversion mode.
    pub fn auto_convert(&mut self, enable: bool) -> Result<(), I::Error> {
        self.set_config_bit(registers::CONFIG_MODE_AUTO, enable)
    }

    /// Filter 50 Hz mains noise instead of the default 60 Hz.
    pub fn enable_50hz(&mut self, enable: bool) -> Result<(), I::Error> {
        self.set_config_bit(registers::CONFIG_FILTER_50HZ, enable)
    }

    /// Set the RTD wiring scheme. 2-wire and 4-wire encode identically.
    pub fn set_wires(&mut self, wires: Wires) -> Result<(), I::Error> {
        let mut cfg = self.read_register8(registers::CONFIG)?;
        cfg &= !registers::CONFIG_THREE_WIRE;
        cfg |= wires.config_bits();
        self.write_register8(registers::CONFIG, cfg)
    }

    /// Trigger a one-shot conversion and read the 15-bit RTD code.
    ///
    /// Blocks for the bias settling time plus the worst-case conversion
    /// time (10 ms + 65 ms). The fault flag in bit 0 is shifted out; use
    /// [`Max31865::read_rtd_with_fault`] to keep it.
    pub fn read_rtd(&mut self) -> Result<u16, I::Error> {
        let rtd = self.one_shot()? >> 1;
        self.last_read = rtd;
        Ok(rtd)
    }

    /// Same conversion sequence as [`Max31865::read_rtd`], but the raw
    /// 16-bit register value is returned with the fault flag in bit 0.
    pub fn read_rtd_with_fault(&mut self) -> Result<u16, I::Error> {
        let raw = self.one_shot()?;
        self.last_read = raw >> 1;
        Ok(raw)
    }

    /// One-shot read scaled to whole ohms by integer arithmetic:
    /// `(code * ref_resistor) >> 16`.
    ///
    /// The 15-bit code against the 16-bit divisor comes out at half the
    /// true resistance. Kept bit-for-bit; use [`Max31865::temperature`]
    /// or [`conversion::resistance_from_raw`] for calibrated values.
    pub fn read_rtd_resistance(&mut self, ref_resistor: u32) -> Result<u16, I::Error> {
        let rtd = u32::from(self.read_rtd()?);
        Ok(((rtd * ref_resistor) >> 16) as u16)
    }

    /// One-shot read converted to degrees Celsius.
    ///
    /// `rtd_nominal` is the element's 0 °C resistance (100 for PT100,
    /// 1000 for PT1000), `ref_resistor` the reference resistor on the
    /// board (430 and 4300 on the usual breakouts). A configured cable
    /// resistance is subtracted before conversion.
    pub fn temperature(&mut self, rtd_nominal: f32, ref_resistor: f32) -> Result<f32, I::Error> {
        let raw = self.read_rtd()?;
        let ohms = conversion::resistance_from_raw(raw, ref_resistor) - self.cable_resistance;
        Ok(conversion::temperature_from_resistance(ohms, rtd_nominal))
    }

    /// Program the low and high fault thresholds, as raw 16-bit register
    /// values (15-bit code in the upper bits).
    pub fn set_thresholds(&mut self, lower: u16, upper: u16) -> Result<(), I::Error> {
        self.write_register8(registers::LOW_FAULT_LSB, lower as u8)?;
        self.write_register8(registers::LOW_FAULT_MSB, (lower >> 8) as u8)?;
        self.write_register8(registers::HIGH_FAULT_LSB, upper as u8)?;
        self.write_register8(registers::HIGH_FAULT_MSB, (upper >> 8) as u8)
    }

    /// Read back the programmed low fault threshold.
    pub fn lower_threshold(&mut self) -> Result<u16, I::Error> {
        self.read_register16(registers::LOW_FAULT_MSB)
    }

    /// Read back the programmed high fault threshold.
    pub fn upper_threshold(&mut self) -> Result<u16, I::Error> {
        self.read_register16(registers::HIGH_FAULT_MSB)
    }

    /// Most recent RTD code returned by a conversion.
    pub fn last_read(&self) -> u16 {
        self.last_read
    }

    /// Most recent fault-status byte seen by [`Max31865::read_fault`].
    pub fn last_fault(&self) -> u8 {
        self.last_fault
    }

    /// Release the transport and delay.
    pub fn free(self) -> (I, D) {
        (self.iface, self.delay)
    }

    /// Clear faults, bias up, settle, fire the one-shot bit, wait out the
    /// conversion, read the RTD register pair.
    fn one_shot(&mut self) -> Result<u16, I::Error> {
        self.clear_fault()?;
        self.enable_bias(true)?;
        self.delay.delay_us(SETTLE_DELAY_US);

        let cfg = self.read_register8(registers::CONFIG)? | registers::CONFIG_ONE_SHOT;
        self.write_register8(registers::CONFIG, cfg)?;
        self.delay.delay_us(CONVERSION_DELAY_US);

        self.read_register16(registers::RTD_MSB)
    }

    fn set_config_bit(&mut self, mask: u8, set: bool) -> Result<(), I::Error> {
        let mut cfg = self.read_register8(registers::CONFIG)?;
        if set {
            cfg |= mask;
        } else {
            cfg &= !mask;
        }
        self.write_register8(registers::CONFIG, cfg)
    }

    fn read_register8(&mut self, addr: u8) -> Result<u8, I::Error> {
        let mut buf = [addr & !registers::WRITE_FLAG, registers::DUMMY];
        self.iface.transaction(&mut buf)?;
        Ok(buf[1])
    }

    fn read_register16(&mut self, addr: u8) -> Result<u16, I::Error> {
        let mut buf = [
            addr & !registers::WRITE_FLAG,
            registers::DUMMY,
            registers::DUMMY,
        ];
        self.iface.transaction(&mut buf)?;
        Ok(u16::from_be_bytes([buf[1], buf[2]]))
    }

    fn write_register8(&mut self, addr: u8, data: u8) -> Result<(), I::Error> {
        let mut buf = [addr | registers::WRITE_FLAG, data];
        self.iface.transaction(&mut buf)
    }
}
