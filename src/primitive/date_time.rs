/*
  Calendar dates and times of day with per-field wildcards.
  `None` in a field is the `*` wildcard.
*/

use {
  std::{fmt, str::FromStr},
  crate::{errors::CastError, primitive::DatatypeTag},
};

const DAYS_OF_WEEK: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/* `*` or an unsigned decimal within `range` */
fn field<T>(
  datatype: DatatypeTag,
  whole: &str,
  text: &str,
  range: std::ops::RangeInclusive<T>,
) -> Result<Option<T>, CastError>
where
  T: FromStr + PartialOrd,
{
  if text == "*" {
    return Ok(None)
  }
  if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
    return Err(CastError::malformed(datatype, whole))
  }
  match text.parse::<T>() {
    Ok(v) if range.contains(&v) => Ok(Some(v)),
    _ => Err(CastError::out_of_range(datatype, whole)),
  }
}

fn write_field(f: &mut fmt::Formatter, value: Option<u8>) -> fmt::Result {
  match value {
    Some(v) => write!(f, "{:02}", v),
    None => f.write_str("*"),
  }
}

/// `YYYY-MM-DD [dow]`. Month 13/14 mean odd/even months, day 32 the
/// last day of the month and 33/34 odd/even days. Day of week is 1 (Monday)
/// through 7 (Sunday).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Date {
  pub year: Option<u16>,
  pub month: Option<u8>,
  pub day: Option<u8>,
  pub day_of_week: Option<u8>,
}
impl FromStr for Date {
  type Err = CastError;

  fn from_str(s: &str) -> Result<Self, CastError> {
    let mut parts = s.split_whitespace();
    let date = parts.next().ok_or_else(|| CastError::malformed(DatatypeTag::Date, s))?;
    let day_of_week = match parts.next() {
      None | Some("*") => None,
      Some(dow) => {
        let dow = dow.to_ascii_lowercase();
        let index = DAYS_OF_WEEK.iter()
          .position(|d| *d == dow)
          .ok_or_else(|| CastError::malformed(DatatypeTag::Date, s))?;
        Some(index as u8 + 1)
      },
    };
    if parts.next().is_some() {
      return Err(CastError::malformed(DatatypeTag::Date, s))
    }
    let fields: Vec<&str> = date.split('-').collect();
    if fields.len() != 3 {
      return Err(CastError::malformed(DatatypeTag::Date, s))
    }
    Ok(Date {
      year: field(DatatypeTag::Date, s, fields[0], 1900..=2154)?,
      month: field(DatatypeTag::Date, s, fields[1], 1..=14)?,
      day: field(DatatypeTag::Date, s, fields[2], 1..=34)?,
      day_of_week,
    })
  }
}
impl fmt::Display for Date {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self.year {
      Some(year) => write!(f, "{:04}", year)?,
      None => f.write_str("*")?,
    }
    f.write_str("-")?;
    write_field(f, self.month)?;
    f.write_str("-")?;
    write_field(f, self.day)?;
    let dow = self.day_of_week
      .and_then(|dow| dow.checked_sub(1))
      .and_then(|index| DAYS_OF_WEEK.get(usize::from(index)));
    if let Some(dow) = dow {
      write!(f, " {}", dow)?;
    }
    Ok(())
  }
}

/// `HH:MM[:SS[.hh]]`; omitted seconds and hundredths are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Time {
  pub hour: Option<u8>,
  pub minute: Option<u8>,
  pub second: Option<u8>,
  pub hundredth: Option<u8>,
}
impl FromStr for Time {
  type Err = CastError;

  fn from_str(s: &str) -> Result<Self, CastError> {
    let text = s.trim();
    let fields: Vec<&str> = text.split(':').collect();
    if fields.len() < 2 || fields.len() > 3 {
      return Err(CastError::malformed(DatatypeTag::Time, s))
    }
    let hour = field(DatatypeTag::Time, s, fields[0], 0..=23)?;
    let minute = field(DatatypeTag::Time, s, fields[1], 0..=59)?;
    let (second, hundredth) = match fields.get(2) {
      None => (Some(0), Some(0)),
      Some(seconds) => match seconds.split_once('.') {
        None => (field(DatatypeTag::Time, s, seconds, 0..=59)?, Some(0)),
        Some((seconds, "*")) => (field(DatatypeTag::Time, s, seconds, 0..=59)?, None),
        Some((seconds, fraction)) => {
          /* a single digit is tenths */
          let hundredth = match fraction.len() {
            1 => field(DatatypeTag::Time, s, fraction, 0..=9)?.map(|tenths| tenths * 10),
            2 => field(DatatypeTag::Time, s, fraction, 0..=99)?,
            _ => return Err(CastError::malformed(DatatypeTag::Time, s)),
          };
          (field(DatatypeTag::Time, s, seconds, 0..=59)?, hundredth)
        },
      },
    };
    Ok(Time { hour, minute, second, hundredth })
  }
}
impl fmt::Display for Time {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write_field(f, self.hour)?;
    f.write_str(":")?;
    write_field(f, self.minute)?;
    f.write_str(":")?;
    write_field(f, self.second)?;
    f.write_str(".")?;
    write_field(f, self.hundredth)
  }
}

/// A date followed by a time, separated by whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateTime {
  pub date: Date,
  pub time: Time,
}
impl FromStr for DateTime {
  type Err = CastError;

  fn from_str(s: &str) -> Result<Self, CastError> {
    let text = s.trim();
    let (date, time) = text.rsplit_once(char::is_whitespace)
      .ok_or_else(|| CastError::malformed(DatatypeTag::DateTime, s))?;
    let date = date.parse::<Date>().map_err(|_| CastError::malformed(DatatypeTag::DateTime, s))?;
    let time = time.parse::<Time>().map_err(|_| CastError::malformed(DatatypeTag::DateTime, s))?;
    Ok(DateTime { date, time })
  }
}
impl fmt::Display for DateTime {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{} {}", self.date, self.time)
  }
}
