//! Clock targets, the `H:MM` keypad buffer and hand angles.

use crate::config::Granularity;
use rand::Rng;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockTime
{
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime
{
    pub fn new(hour: u32, minute: u32) -> Self
    {
        Self { hour, minute }
    }

    pub fn random<R: Rng + ?Sized>(granularity: Granularity, rng: &mut R) -> Self
    {
        let step = granularity.minute_step();
        let slots = 60 / step;
        Self {
            hour: rng.gen_range(1..=12),
            minute: rng.gen_range(0..slots) * step,
        }
    }

    /// Degrees from the 3 o'clock position, clockwise.
    pub fn hour_hand_angle(&self) -> f64
    {
        (self.hour % 12) as f64 / 12.0 * 360.0 + self.minute as f64 / 60.0 * 30.0 - 90.0
    }

    pub fn minute_hand_angle(&self) -> f64
    {
        self.minute as f64 / 60.0 * 360.0 - 90.0
    }
}

impl fmt::Display for ClockTime
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessError
{
    MissingColon,
    NotANumber,
    OutOfRange,
}

/// Keypad text for a time guess. Keystrokes that can't lead to a valid
/// `H:MM` are refused and leave the buffer alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuessBuffer
{
    text: String,
}

impl GuessBuffer
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn as_str(&self) -> &str
    {
        &self.text
    }

    pub fn is_empty(&self) -> bool
    {
        self.text.is_empty()
    }

    pub fn push_digit(&mut self, digit: u8) -> bool
    {
        if digit > 9 {
            return false;
        }
        let ch = char::from(b'0' + digit);
        match self.text.split_once(':') {
            Some((_, minutes)) => {
                if minutes.len() >= 2 {
                    return false;
                }
                let candidate = format!("{minutes}{ch}");
                if candidate.parse::<u32>().map_or(true, |minute| minute > 59) {
                    return false;
                }
            }
            None => match self.text.len() {
                0 => {}
                1 => {
                    let candidate = format!("{}{ch}", self.text);
                    if !candidate.parse::<u32>().is_ok_and(|hour| (1..=12).contains(&hour)) {
                        return false;
                    }
                }
                _ => return false,
            },
        }
        self.text.push(ch);
        true
    }

    pub fn push_colon(&mut self) -> bool
    {
        if self.text.is_empty() || self.text.contains(':') {
            return false;
        }
        if !self.text.parse::<u32>().is_ok_and(|hour| (1..=12).contains(&hour)) {
            return false;
        }
        self.text.push(':');
        true
    }

    pub fn backspace(&mut self)
    {
        self.text.pop();
    }

    pub fn clear(&mut self)
    {
        self.text.clear();
    }

    pub fn parse(&self) -> Result<ClockTime, GuessError>
    {
        parse_guess(&self.text)
    }

    /// `--:--`, `3:--`, `3:1-`, `3:15`.
    pub fn display(&self) -> String
    {
        if self.text.is_empty() {
            return "--:--".to_string();
        }
        match self.text.split_once(':') {
            None => format!("{}:--", self.text),
            Some((hours, minutes)) => format!("{hours}:{minutes:-<2}"),
        }
    }
}

pub fn parse_guess(text: &str) -> Result<ClockTime, GuessError>
{
    let (hours, minutes) = text.split_once(':').ok_or(GuessError::MissingColon)?;
    let hour = hours.parse::<u32>().map_err(|_| GuessError::NotANumber)?;
    let minute = minutes.parse::<u32>().map_err(|_| GuessError::NotANumber)?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return Err(GuessError::OutOfRange);
    }
    Ok(ClockTime { hour, minute })
}

#[cfg(test)]
mod tests
{
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn typed(keys: &str) -> GuessBuffer
    {
        let mut buffer = GuessBuffer::new();
        for key in keys.chars() {
            match key {
                ':' => {
                    buffer.push_colon();
                }
                digit => {
                    buffer.push_digit(digit.to_digit(10).unwrap() as u8);
                }
            }
        }
        buffer
    }

    #[test]
    fn quarter_hour_targets_land_on_quarters()
    {
        let mut rng = StdRng::seed_from_u64(15);
        for _ in 0..1000 {
            let time = ClockTime::random(Granularity::QuarterHour, &mut rng);
            assert!([0, 15, 30, 45].contains(&time.minute), "{time}");
            assert!((1..=12).contains(&time.hour));
        }
    }

    #[test]
    fn hour_granularity_is_always_on_the_hour()
    {
        let mut rng = StdRng::seed_from_u64(60);
        for _ in 0..200 {
            assert_eq!(ClockTime::random(Granularity::Hour, &mut rng).minute, 0);
        }
    }

    #[test]
    fn minute_granularity_stays_in_range()
    {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            assert!(ClockTime::random(Granularity::Minute, &mut rng).minute <= 59);
        }
    }

    #[test]
    fn hour_digits_must_form_one_to_twelve()
    {
        assert_eq!(typed("12").as_str(), "12");
        assert_eq!(typed("13").as_str(), "1");
        assert_eq!(typed("10").as_str(), "10");
        assert_eq!(typed("123").as_str(), "12");
        assert_eq!(typed("9").as_str(), "9");
    }

    #[test]
    fn colon_needs_a_valid_hour_and_appears_once()
    {
        assert_eq!(typed(":").as_str(), "");
        assert_eq!(typed("0:").as_str(), "0");
        assert_eq!(typed("3::").as_str(), "3:");
        assert_eq!(typed("11:").as_str(), "11:");
    }

    #[test]
    fn minutes_stay_two_digits_up_to_59()
    {
        assert_eq!(typed("3:15").as_str(), "3:15");
        assert_eq!(typed("3:6").as_str(), "3:6");
        assert_eq!(typed("3:65").as_str(), "3:6");
        assert_eq!(typed("3:59").as_str(), "3:59");
        assert_eq!(typed("3:155").as_str(), "3:15");
        assert_eq!(typed("3:05").as_str(), "3:05");
    }

    #[test]
    fn backspace_walks_back_to_empty()
    {
        let mut buffer = typed("12:30");
        for expected in ["12:3", "12:", "12", "1", "", ""] {
            buffer.backspace();
            assert_eq!(buffer.as_str(), expected);
        }
    }

    #[test]
    fn display_pads_missing_parts()
    {
        assert_eq!(typed("").display(), "--:--");
        assert_eq!(typed("3").display(), "3:--");
        assert_eq!(typed("3:").display(), "3:--");
        assert_eq!(typed("3:1").display(), "3:1-");
        assert_eq!(typed("3:15").display(), "3:15");
    }

    #[test]
    fn parsing_rejects_malformed_guesses()
    {
        assert_eq!(parse_guess("3:15"), Ok(ClockTime::new(3, 15)));
        assert_eq!(parse_guess("3:5"), Ok(ClockTime::new(3, 5)));
        assert_eq!(parse_guess("315"), Err(GuessError::MissingColon));
        assert_eq!(parse_guess("3:"), Err(GuessError::NotANumber));
        assert_eq!(parse_guess("3:65"), Err(GuessError::OutOfRange));
        assert_eq!(parse_guess("13:00"), Err(GuessError::OutOfRange));
        assert_eq!(parse_guess("0:10"), Err(GuessError::OutOfRange));
    }

    #[test]
    fn hand_angles()
    {
        let three = ClockTime::new(3, 0);
        assert_eq!(three.hour_hand_angle(), 0.0);
        assert_eq!(three.minute_hand_angle(), -90.0);

        let noon = ClockTime::new(12, 0);
        assert_eq!(noon.hour_hand_angle(), -90.0);

        let half_past_six = ClockTime::new(6, 30);
        assert_eq!(half_past_six.hour_hand_angle(), 105.0);
        assert_eq!(half_past_six.minute_hand_angle(), 90.0);
    }

    #[test]
    fn display_pads_minutes()
    {
        assert_eq!(ClockTime::new(7, 5).to_string(), "7:05");
    }
}
