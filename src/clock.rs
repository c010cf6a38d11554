use chrono::{DateTime, Datelike, IsoWeek, Local};

/// Source of "now" for the session, so the weekly reset can be driven in tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Local>),
}

impl Clock {
    #[cfg(test)]
    pub fn fixed(at: DateTime<Local>) -> Self {
        Self::Fixed(at)
    }

    pub fn now(&self) -> DateTime<Local> {
        match self {
            Clock::System => Local::now(),
            Clock::Fixed(t) => *t,
        }
    }

    pub fn iso_week(&self) -> IsoWeek {
        self.now().iso_week()
    }

    /// Moves a fixed clock forward. No effect on the system clock.
    #[cfg(test)]
    pub fn advance(&mut self, delta: chrono::Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn fixed_clock_reports_iso_week() {
        // Monday 2026-10-19 is in ISO week 43.
        let clock = Clock::fixed(Local.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap());
        assert_eq!(clock.iso_week().week(), 43);
        assert_eq!(clock.iso_week().year(), 2026);
    }

    #[test]
    fn advance_moves_fixed_clock_only() {
        let start = Local.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let mut clock = Clock::fixed(start);
        clock.advance(Duration::days(7));
        assert_eq!(clock.iso_week().week(), 44);

        let mut system = Clock::System;
        system.advance(Duration::days(7));
        assert!(matches!(system, Clock::System));
    }
}
