use defmt::Format;

#[derive(Debug, Format, Copy, Clone, Eq, PartialEq)]
pub enum Error<SpiE, PinE> {
    /// The shared SPI peripheral reported a transfer failure
    Spi(SpiE),

    /// A chip-select, clock or data pin could not be driven or sampled
    Pin(PinE),
}

impl<SpiE, PinE> Error<SpiE, PinE> {
    pub fn as_str(&self) -> &'static str {
        match self {
            Error::Spi(_) => "SPI transfer error",
            Error::Pin(_) => "Pin error",
        }
    }
}
