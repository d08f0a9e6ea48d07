//! TM1637 4-digit 7-segment display driver
//!
//! The TM1637 talks a two-wire protocol that looks like I2C without
//! addresses: LSB first, one ACK clock per byte, start/stop conditions on
//! DIO while CLK is high. Both lines are bit-banged.
//!
//! DIO must be open-drain (or emulated with a flex pin) because the chip
//! pulls it low to acknowledge each byte.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use spinwash_core::traits::{CountdownDisplay, DisplayError};

/// TM1637 commands
mod cmd {
    /// Data command: write display registers, auto-increment address
    pub const DATA_AUTO_INCREMENT: u8 = 0x40;
    /// Address command: start at digit 0
    pub const ADDRESS_DIGIT_0: u8 = 0xC0;
    /// Display control: display on, OR with brightness 0-7
    pub const DISPLAY_ON: u8 = 0x88;
}

/// Segment patterns for 0-9 (bit 0 = segment a)
const DIGIT_SEGMENTS: [u8; 10] = [0x3f, 0x06, 0x5b, 0x4f, 0x66, 0x6d, 0x7d, 0x07, 0x7f, 0x6f];

/// Digits on the module
pub const DIGIT_COUNT: usize = 4;

/// Largest number that fits
pub const MAX_NUMBER: u16 = 9999;

/// Maximum brightness level
pub const MAX_BRIGHTNESS: u8 = 7;

/// Half clock period (us)
const BIT_DELAY_US: u32 = 50;

/// TM1637 driver
pub struct Tm1637<CLK, DIO, D> {
    clk: CLK,
    dio: DIO,
    delay: D,
    brightness: u8,
}

impl<CLK, DIO, D> Tm1637<CLK, DIO, D>
where
    CLK: OutputPin,
    DIO: OutputPin + InputPin,
    D: DelayNs,
{
    /// Create a driver with both lines idle
    pub fn new(clk: CLK, dio: DIO, delay: D) -> Result<Self, DisplayError> {
        let mut display = Self {
            clk,
            dio,
            delay,
            brightness: MAX_BRIGHTNESS,
        };
        display.clk_high()?;
        display.dio_high()?;
        Ok(display)
    }

    /// Set brightness (0-7, clamped); applies on the next write
    pub fn set_brightness(&mut self, level: u8) {
        self.brightness = level.min(MAX_BRIGHTNESS);
    }

    /// Current brightness
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Write raw segment patterns, leftmost digit first
    pub fn write_segments(&mut self, segments: &[u8; DIGIT_COUNT]) -> Result<(), DisplayError> {
        self.frame(&[cmd::DATA_AUTO_INCREMENT])?;

        let mut data = [0u8; DIGIT_COUNT + 1];
        data[0] = cmd::ADDRESS_DIGIT_0;
        data[1..].copy_from_slice(segments);
        self.frame(&data)?;

        self.frame(&[cmd::DISPLAY_ON | self.brightness])
    }

    /// Give the pins back
    pub fn release(self) -> (CLK, DIO, D) {
        (self.clk, self.dio, self.delay)
    }

    /// Send one start..stop transfer
    ///
    /// The stop condition is sent even when a byte was not acknowledged,
    /// leaving the bus idle for the next transfer.
    fn frame(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.start()?;
        let mut result = Ok(());
        for &byte in bytes {
            result = self.write_byte(byte);
            if result.is_err() {
                break;
            }
        }
        self.stop()?;
        result
    }

    fn start(&mut self) -> Result<(), DisplayError> {
        self.dio_high()?;
        self.clk_high()?;
        self.bit_delay();
        self.dio_low()?;
        self.bit_delay();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DisplayError> {
        self.clk_low()?;
        self.bit_delay();
        self.dio_low()?;
        self.bit_delay();
        self.clk_high()?;
        self.bit_delay();
        self.dio_high()?;
        self.bit_delay();
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), DisplayError> {
        for bit in 0..8 {
            self.clk_low()?;
            if byte & (1 << bit) != 0 {
                self.dio_high()?;
            } else {
                self.dio_low()?;
            }
            self.bit_delay();
            self.clk_high()?;
            self.bit_delay();
        }

        // ACK clock: release DIO and let the chip pull it low
        self.clk_low()?;
        self.dio_high()?;
        self.bit_delay();
        self.clk_high()?;
        self.bit_delay();
        let acked = self.dio.is_low().map_err(|_| DisplayError::Bus)?;
        self.clk_low()?;
        self.bit_delay();

        if acked {
            Ok(())
        } else {
            warn!("tm1637: no ack for {=u8:#x}", byte);
            Err(DisplayError::NoAck)
        }
    }

    fn bit_delay(&mut self) {
        self.delay.delay_us(BIT_DELAY_US);
    }

    fn clk_high(&mut self) -> Result<(), DisplayError> {
        self.clk.set_high().map_err(|_| DisplayError::Bus)
    }

    fn clk_low(&mut self) -> Result<(), DisplayError> {
        self.clk.set_low().map_err(|_| DisplayError::Bus)
    }

    fn dio_high(&mut self) -> Result<(), DisplayError> {
        self.dio.set_high().map_err(|_| DisplayError::Bus)
    }

    fn dio_low(&mut self) -> Result<(), DisplayError> {
        self.dio.set_low().map_err(|_| DisplayError::Bus)
    }
}

/// Segment patterns for a right-aligned number, leading digits blank
pub fn number_segments(n: u16) -> Result<[u8; DIGIT_COUNT], DisplayError> {
    if n > MAX_NUMBER {
        return Err(DisplayError::Overflow);
    }

    let mut segments = [0u8; DIGIT_COUNT];
    let mut rest = n;
    for slot in segments.iter_mut().rev() {
        *slot = DIGIT_SEGMENTS[(rest % 10) as usize];
        rest /= 10;
        if rest == 0 {
            break;
        }
    }
    Ok(segments)
}

impl<CLK, DIO, D> CountdownDisplay for Tm1637<CLK, DIO, D>
where
    CLK: OutputPin,
    DIO: OutputPin + InputPin,
    D: DelayNs,
{
    fn show_number(&mut self, n: u16) -> Result<(), DisplayError> {
        let segments = number_segments(n)?;
        self.write_segments(&segments)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.write_segments(&[0; DIGIT_COUNT])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use heapless::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Line {
        Clk,
        Dio,
    }

    /// Records every level written to either line
    struct Bus {
        events: RefCell<Vec<(Line, bool), 2048>>,
        /// Whether the chip acknowledges bytes
        ack: Cell<bool>,
    }

    impl Bus {
        fn new() -> Self {
            Self {
                events: RefCell::new(Vec::new()),
                ack: Cell::new(true),
            }
        }

        /// Decode the recorded levels into transfers of bytes
        fn transfers(&self) -> Vec<Vec<u8, 8>, 16> {
            let mut transfers = Vec::new();
            let mut bits: Vec<bool, 128> = Vec::new();
            let mut clk = false;
            let mut dio = false;
            let mut in_frame = false;

            for &(line, level) in self.events.borrow().iter() {
                match line {
                    Line::Clk => {
                        if !clk && level && in_frame {
                            bits.push(dio).unwrap();
                        }
                        clk = level;
                    }
                    Line::Dio => {
                        if clk && dio && !level {
                            in_frame = true;
                            bits.clear();
                        } else if clk && !dio && level && in_frame {
                            in_frame = false;
                            // 8 data bits + ack clock per byte; the stop
                            // condition adds one trailing clock
                            let bytes = bits
                                .chunks_exact(9)
                                .map(|chunk| {
                                    chunk[..8]
                                        .iter()
                                        .enumerate()
                                        .fold(0u8, |acc, (i, &b)| acc | ((b as u8) << i))
                                })
                                .collect();
                            transfers.push(bytes).unwrap();
                        }
                        dio = level;
                    }
                }
            }
            transfers
        }
    }

    struct BusPin<'a> {
        bus: &'a Bus,
        line: Line,
    }

    impl ErrorType for BusPin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for BusPin<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.bus.events.borrow_mut().push((self.line, false)).unwrap();
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.bus.events.borrow_mut().push((self.line, true)).unwrap();
            Ok(())
        }
    }

    impl InputPin for BusPin<'_> {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(!self.bus.ack.get())
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(self.bus.ack.get())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn display(bus: &Bus) -> Tm1637<BusPin<'_>, BusPin<'_>, NoDelay> {
        Tm1637::new(
            BusPin {
                bus,
                line: Line::Clk,
            },
            BusPin {
                bus,
                line: Line::Dio,
            },
            NoDelay,
        )
        .unwrap()
    }

    #[test]
    fn test_number_segments() {
        assert_eq!(number_segments(0), Ok([0, 0, 0, 0x3f]));
        assert_eq!(number_segments(7), Ok([0, 0, 0, 0x07]));
        assert_eq!(number_segments(42), Ok([0, 0, 0x66, 0x5b]));
        assert_eq!(number_segments(1230), Ok([0x06, 0x5b, 0x4f, 0x3f]));
        assert_eq!(number_segments(9999), Ok([0x6f; 4]));
        assert_eq!(number_segments(10000), Err(DisplayError::Overflow));
    }

    #[test]
    fn test_longest_phase_fits() {
        assert!(number_segments(spinwash_core::engine::MAX_DURATION_S).is_ok());
    }

    #[test]
    fn test_show_number_transfers() {
        let bus = Bus::new();
        let mut display = display(&bus);

        display.show_number(1234).unwrap();

        let transfers = bus.transfers();
        assert_eq!(transfers.len(), 3);
        assert_eq!(transfers[0][..], [0x40]);
        assert_eq!(transfers[1][..], [0xC0, 0x06, 0x5b, 0x4f, 0x66]);
        assert_eq!(transfers[2][..], [0x8F]);
    }

    #[test]
    fn test_clear_blanks_all_digits() {
        let bus = Bus::new();
        let mut display = display(&bus);

        display.clear().unwrap();

        let transfers = bus.transfers();
        assert_eq!(transfers[1][..], [0xC0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_brightness_in_display_control() {
        let bus = Bus::new();
        let mut display = display(&bus);

        display.set_brightness(20);
        assert_eq!(display.brightness(), MAX_BRIGHTNESS);
        display.set_brightness(2);
        display.show_number(5).unwrap();

        assert_eq!(bus.transfers()[2][..], [0x8A]);
    }

    #[test]
    fn test_missing_ack() {
        let bus = Bus::new();
        bus.ack.set(false);
        let mut display = display(&bus);

        assert_eq!(display.show_number(3), Err(DisplayError::NoAck));

        // Bus left idle after the failed transfer
        let events = bus.events.borrow();
        assert_eq!(events[events.len() - 2..], [(Line::Clk, true), (Line::Dio, true)]);
    }

    #[test]
    fn test_overflow_sends_nothing() {
        let bus = Bus::new();
        let mut display = display(&bus);
        let idle_events = bus.events.borrow().len();

        assert_eq!(display.show_number(12345), Err(DisplayError::Overflow));
        assert_eq!(bus.events.borrow().len(), idle_events);
    }
}
