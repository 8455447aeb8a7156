use std::{fmt, str::FromStr};

use beerwise::{Day, Style};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};

/// One line of a rating log:
/// `user_id,beer_id,day,style,rating`, headerless, days as `%Y-%m-%d`.
#[serde_as]
#[derive(Deserialize, Debug)]
pub struct RawRating {
    pub user_id: String,
    pub beer_id: String,
    #[serde_as(as = "DisplayFromStr")]
    pub day: RatingDay,
    #[serde_as(as = "DisplayFromStr")]
    pub style: Style,
    pub rating: f64,
}

/// A calendar date on the rating log's day axis.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct RatingDay(NaiveDate);

impl FromStr for RatingDay {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<RatingDay, chrono::ParseError> {
        Ok(RatingDay(NaiveDate::parse_from_str(s, "%Y-%m-%d")?))
    }
}

impl fmt::Display for RatingDay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl RatingDay {
    pub fn to_day(self) -> Day {
        Day(i64::from(self.0.num_days_from_ce()))
    }

    pub fn from_day(Day(day): Day) -> RatingDay {
        RatingDay(NaiveDate::from_num_days_from_ce_opt(day as i32).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_round_trip_through_the_day_axis() {
        let date: RatingDay = "1996-08-22".parse().unwrap();
        assert_eq!(RatingDay::from_day(date.to_day()), date);
        assert_eq!(date.to_string(), "1996-08-22");
    }

    #[test]
    fn consecutive_dates_are_adjacent_days() {
        let first: RatingDay = "1999-12-31".parse().unwrap();
        let second: RatingDay = "2000-01-01".parse().unwrap();
        assert_eq!(second.to_day() - first.to_day(), beerwise::Days(1));
    }

    #[test]
    fn malformed_dates_are_rejected() {
        assert!("22/08/1996".parse::<RatingDay>().is_err());
        assert!("1996-13-01".parse::<RatingDay>().is_err());
    }
}
