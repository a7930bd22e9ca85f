//! PWM backlight

use embedded_hal::pwm::SetDutyCycle;

use lumen_core::PanelError;

/// Backlight driven by a PWM channel
pub struct Backlight<P> {
    pwm: P,
    /// Current level in percent
    percent: u8,
}

impl<P: SetDutyCycle> Backlight<P> {
    /// Wrap a PWM channel; the level is not changed until set
    pub fn new(pwm: P) -> Self {
        Self { pwm, percent: 0 }
    }

    /// Set brightness in percent, clamped to 100
    pub fn set_brightness(&mut self, percent: u8) -> Result<(), PanelError> {
        let percent = percent.min(100);
        self.pwm
            .set_duty_cycle_percent(percent)
            .map_err(|_| PanelError::Peripheral)?;
        self.percent = percent;
        Ok(())
    }

    /// Switch the backlight off
    pub fn off(&mut self) -> Result<(), PanelError> {
        self.pwm
            .set_duty_cycle_fully_off()
            .map_err(|_| PanelError::Peripheral)?;
        self.percent = 0;
        Ok(())
    }

    /// Last brightness set, in percent
    pub fn brightness(&self) -> u8 {
        self.percent
    }

    /// Give back the PWM channel
    pub fn release(self) -> P {
        self.pwm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;

    /// 8-bit PWM channel like the LEDC timer the board uses
    struct MockPwm {
        duty: u16,
    }

    impl ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            255
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_brightness_scales_duty() {
        let mut bl = Backlight::new(MockPwm { duty: 0 });
        bl.set_brightness(100).unwrap();
        assert_eq!(bl.pwm.duty, 255);
        bl.set_brightness(78).unwrap();
        assert_eq!(bl.pwm.duty, 198);
        assert_eq!(bl.brightness(), 78);
    }

    #[test]
    fn test_brightness_clamped() {
        let mut bl = Backlight::new(MockPwm { duty: 0 });
        bl.set_brightness(250).unwrap();
        assert_eq!(bl.brightness(), 100);
        assert_eq!(bl.pwm.duty, 255);
    }

    #[test]
    fn test_off() {
        let mut bl = Backlight::new(MockPwm { duty: 0 });
        bl.set_brightness(50).unwrap();
        bl.off().unwrap();
        assert_eq!(bl.pwm.duty, 0);
        assert_eq!(bl.brightness(), 0);
    }
}
