use defmt::Format;

/// Raw contents of the fault-status register.
///
/// The chip latches up to six fault conditions; reading this register does
/// not clear them, see [`Max31865::clear_fault`](crate::Max31865::clear_fault).
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Fault(pub u8);

impl Fault {
    const HIGH_THRESHOLD: u8 = 0x80;
    const LOW_THRESHOLD: u8 = 0x40;
    const REF_IN_LOW: u8 = 0x20;
    const REF_IN_HIGH: u8 = 0x10;
    const RTD_IN_LOW: u8 = 0x08;
    const OVER_UNDER_VOLTAGE: u8 = 0x04;

    /// Any fault condition latched
    pub const fn any(self) -> bool {
        self.0 != 0
    }

    /// RTD reading above the high fault threshold
    pub const fn high_threshold(self) -> bool {
        self.0 & Self::HIGH_THRESHOLD != 0
    }

    /// RTD reading below the low fault threshold
    pub const fn low_threshold(self) -> bool {
        self.0 & Self::LOW_THRESHOLD != 0
    }

    /// REFIN- below 0.85 × V_BIAS
    pub const fn ref_in_low(self) -> bool {
        self.0 & Self::REF_IN_LOW != 0
    }

    /// REFIN- above 0.85 × V_BIAS (FORCE- open)
    pub const fn ref_in_high(self) -> bool {
        self.0 & Self::REF_IN_HIGH != 0
    }

    /// RTDIN- below 0.85 × V_BIAS (FORCE- open)
    pub const fn rtd_in_low(self) -> bool {
        self.0 & Self::RTD_IN_LOW != 0
    }

    /// Over- or under-voltage on a protected input
    pub const fn over_under_voltage(self) -> bool {
        self.0 & Self::OVER_UNDER_VOLTAGE != 0
    }
}

impl core::fmt::Debug for Fault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(f, "Fault({:08b})", self.0)
    }
}

impl Format for Fault {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "Fault({=u8:08b})", self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_each_condition() {
        assert!(!Fault(0x00).any());
        assert!(Fault(0x80).high_threshold());
        assert!(Fault(0x40).low_threshold());
        assert!(Fault(0x20).ref_in_low());
        assert!(Fault(0x10).ref_in_high());
        assert!(Fault(0x08).rtd_in_low());
        assert!(Fault(0x04).over_under_voltage());

        let all = Fault(0xFC);
        assert!(all.any() && all.high_threshold() && all.over_under_voltage());
    }
}
