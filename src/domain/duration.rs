use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A structured ISO-8601 duration.
///
/// Format:
/// `P[n]Y[n]M[n]DT[n]H[n]M[n]S` or `P[n]W`, where every field is an optional
/// non-negative integer. Absent fields are distinct from zero: `PT` and `PT0S`
/// parse to different values.
///
/// Week-form input (`P8W`) is normalised to days on parsing (`8 * 7 = 56`) and
/// is therefore *not* reproduced by [`fmt::Display`]; `"P8W"` round-trips to
/// `"P56DT"`. Downstream consumers rely on the day-normalised form, so week
/// notation is never reintroduced on output.
///
/// # Examples
///
/// ```
/// use cookbook::DurationComponents;
///
/// let duration: DurationComponents = "P1DT2H".parse().unwrap();
/// assert_eq!(duration.days, Some(1));
/// assert_eq!(duration.hours, Some(2));
/// assert_eq!(duration.to_string(), "P1DT2H");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationComponents {
    /// Calendar years (`Y` designator).
    pub years: Option<u32>,
    /// Calendar months (date-segment `M` designator).
    pub months: Option<u32>,
    /// Days (`D` designator, or weeks multiplied by 7).
    pub days: Option<u32>,
    /// Hours (`H` designator).
    pub hours: Option<u32>,
    /// Minutes (time-segment `M` designator).
    pub minutes: Option<u32>,
    /// Seconds (`S` designator).
    pub seconds: Option<u32>,
}

impl DurationComponents {
    /// Creates a duration from an hour/minute pair.
    ///
    /// Servers commonly report cooking times as plain hour and minute values;
    /// this maps them into the structured form without going through text.
    #[must_use]
    pub const fn from_hours_minutes(hours: u32, minutes: u32) -> Self {
        Self {
            years: None,
            months: None,
            days: None,
            hours: Some(hours),
            minutes: Some(minutes),
            seconds: None,
        }
    }

    /// Returns `true` when no field is specified.
    ///
    /// An empty duration is still valid and formats to `"PT"`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.years.is_none()
            && self.months.is_none()
            && self.days.is_none()
            && self.hours.is_none()
            && self.minutes.is_none()
            && self.seconds.is_none()
    }

    /// Renders the duration as an abbreviated human-readable string.
    ///
    /// Only days, hours, minutes and seconds are rendered ("2d 3h" style);
    /// years and months are omitted, as are absent and zero-valued fields.
    /// A duration with no renderable units produces the empty string.
    #[must_use]
    pub fn readable(&self) -> String {
        let units = [
            (self.days, "d"),
            (self.hours, "h"),
            (self.minutes, "m"),
            (self.seconds, "s"),
        ];

        units
            .into_iter()
            .filter_map(|(value, unit)| {
                value
                    .filter(|&v| v > 0)
                    .map(|v| format!("{v}{unit}"))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parses `text` and renders it human-readably, degrading to `""`.
    ///
    /// This is a best-effort convenience: unparseable input or a duration
    /// with no renderable units both yield the empty string rather than an
    /// error. Callers that need to distinguish the cases should parse
    /// explicitly.
    #[must_use]
    pub fn readable_from_str(text: &str) -> String {
        text.parse::<Self>()
            .map_or_else(|_| String::new(), |duration| duration.readable())
    }
}

/// Error returned when a string is not a well-formed ISO-8601 duration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid ISO-8601 duration '{0}'")]
pub struct InvalidDuration(String);

impl FromStr for DurationComponents {
    type Err = InvalidDuration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Anything before the first 'P' is ignored; the marker itself is
        // mandatory.
        let Some((_, rest)) = s.split_once('P') else {
            return Err(InvalidDuration(s.to_string()));
        };

        // Week form short-circuits: a single integer, multiplied out into
        // days. Nothing after the 'W' is considered.
        if let Some((weeks, _)) = rest.split_once('W') {
            let weeks: u32 = weeks
                .parse()
                .map_err(|_| InvalidDuration(s.to_string()))?;
            // A week count that doesn't fit u32 once multiplied out is as
            // unrepresentable as a numeral that doesn't parse.
            let days = weeks
                .checked_mul(7)
                .ok_or_else(|| InvalidDuration(s.to_string()))?;
            return Ok(Self {
                days: Some(days),
                ..Self::default()
            });
        }

        let (date, time) = rest.split_once('T').unwrap_or((rest, ""));

        let [years, months, days] = segment_fields(date, ['Y', 'M', 'D'], s)?;
        let [hours, minutes, seconds] = segment_fields(time, ['H', 'M', 'S'], s)?;

        Ok(Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        })
    }
}

/// Extracts up to three designated values from one segment of a duration.
///
/// The segment is decomposed into its maximal numeral runs and the text runs
/// between them; the two lists must be equal in length. Values are then
/// paired *positionally*: the k-th numeral belongs to whichever of the three
/// designators the k-th text run starts with. Runs starting with an
/// unrecognised letter are dropped silently; only a count mismatch is an
/// error.
///
/// Positional pairing means designator order in the input is not enforced:
/// `"D3Y2"` assigns 3 to `D` and 2 to `Y` even though the numerals trail
/// their letters. This mirrors the upstream behaviour that existing data
/// depends on.
fn segment_fields(
    segment: &str,
    designators: [char; 3],
    original: &str,
) -> Result<[Option<u32>; 3], InvalidDuration> {
    let numerals: Vec<&str> = segment
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .collect();
    let markers: Vec<&str> = segment
        .split(|c: char| c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .collect();

    if numerals.len() != markers.len() {
        return Err(InvalidDuration(original.to_string()));
    }

    let mut fields = [None; 3];
    for (numeral, marker) in numerals.iter().zip(&markers) {
        let value: u32 = numeral
            .parse()
            .map_err(|_| InvalidDuration(original.to_string()))?;
        if let Some(slot) = designators
            .iter()
            .position(|&designator| marker.starts_with(designator))
        {
            fields[slot] = Some(value);
        }
    }

    Ok(fields)
}

impl fmt::Display for DurationComponents {
    /// Formats in canonical order: `P`, the present date fields (`Y`, `M`,
    /// `D`), an unconditional `T`, then the present time fields (`H`, `M`,
    /// `S`). An empty duration formats to `"PT"`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("P")?;
        for (value, letter) in [(self.years, 'Y'), (self.months, 'M'), (self.days, 'D')] {
            if let Some(value) = value {
                write!(f, "{value}{letter}")?;
            }
        }
        f.write_str("T")?;
        for (value, letter) in [(self.hours, 'H'), (self.minutes, 'M'), (self.seconds, 'S')] {
            if let Some(value) = value {
                write!(f, "{value}{letter}")?;
            }
        }
        Ok(())
    }
}

impl Serialize for DurationComponents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DurationComponents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn components(
        years: Option<u32>,
        months: Option<u32>,
        days: Option<u32>,
        hours: Option<u32>,
        minutes: Option<u32>,
        seconds: Option<u32>,
    ) -> DurationComponents {
        DurationComponents {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    #[test]
    fn parse_hours_only() {
        let duration: DurationComponents = "PT11H".parse().unwrap();
        assert_eq!(duration, components(None, None, None, Some(11), None, None));
    }

    #[test]
    fn parse_days_only() {
        let duration: DurationComponents = "P2D".parse().unwrap();
        assert_eq!(duration, components(None, None, Some(2), None, None, None));
    }

    #[test]
    fn parse_days_and_hours() {
        let duration: DurationComponents = "P1DT2H".parse().unwrap();
        assert_eq!(
            duration,
            components(None, None, Some(1), Some(2), None, None)
        );
    }

    #[test]
    fn parse_all_fields() {
        let duration: DurationComponents = "P2Y4M3DT8H30M3S".parse().unwrap();
        assert_eq!(
            duration,
            components(Some(2), Some(4), Some(3), Some(8), Some(30), Some(3))
        );
    }

    #[test]
    fn parse_week_form_multiplies_into_days() {
        let duration: DurationComponents = "P8W".parse().unwrap();
        assert_eq!(duration, components(None, None, Some(56), None, None, None));
    }

    #[test]
    fn week_form_does_not_round_trip() {
        // Weeks are normalised to days on input and never re-emitted.
        let duration: DurationComponents = "P8W".parse().unwrap();
        assert_eq!(duration.to_string(), "P56DT");
    }

    #[test]
    fn parse_fractional_week_fails() {
        assert!("P1.5W".parse::<DurationComponents>().is_err());
    }

    #[test]
    fn parse_week_count_overflowing_days_fails() {
        // 613566757 weeks parse as u32 but exceed u32::MAX once multiplied
        // into days; that must be a parse error, not a wrap or a panic.
        let error = "P613566757W".parse::<DurationComponents>().unwrap_err();
        assert_eq!(error, InvalidDuration("P613566757W".to_string()));

        // The largest representable week count still works.
        let duration: DurationComponents = "P613566756W".parse().unwrap();
        assert_eq!(duration.days, Some(613_566_756 * 7));
    }

    #[test]
    fn parse_missing_marker_fails() {
        let error = "garbage".parse::<DurationComponents>().unwrap_err();
        assert_eq!(error, InvalidDuration("garbage".to_string()));
    }

    #[test]
    fn parse_count_mismatch_fails() {
        // One designator run, zero numerals.
        assert!("PXD".parse::<DurationComponents>().is_err());
    }

    #[test]
    fn parse_empty_string_fails() {
        assert!("".parse::<DurationComponents>().is_err());
    }

    #[test]
    fn parse_bare_marker_is_empty() {
        let duration: DurationComponents = "P".parse().unwrap();
        assert!(duration.is_empty());
    }

    #[test]
    fn parse_ignores_prefix_before_marker() {
        let duration: DurationComponents = "approx. P2D".parse().unwrap();
        assert_eq!(duration, components(None, None, Some(2), None, None, None));
    }

    #[test]
    fn parse_time_minutes_are_minutes_not_months() {
        // 'M' is positional: months before 'T', minutes after.
        let duration: DurationComponents = "P1MT2M".parse().unwrap();
        assert_eq!(
            duration,
            components(None, Some(1), None, None, Some(2), None)
        );
    }

    #[test]
    fn parse_pairs_positionally_when_designators_lead() {
        // First numeral pairs with first designator run, regardless of
        // whether the letter precedes or follows its numeral.
        let duration: DurationComponents = "PD3Y2".parse().unwrap();
        assert_eq!(
            duration,
            components(Some(2), None, Some(3), None, None, None)
        );
    }

    #[test]
    fn parse_drops_unknown_designators() {
        // Counts match, the letter is just not one of ours.
        let duration: DurationComponents = "P3X".parse().unwrap();
        assert!(duration.is_empty());
    }

    #[test]
    fn format_empty_is_marker_pair() {
        assert_eq!(DurationComponents::default().to_string(), "PT");
    }

    #[test]
    fn format_hours_only() {
        let duration = components(None, None, None, Some(11), None, None);
        assert_eq!(duration.to_string(), "PT11H");
    }

    // Canonical-order inputs survive a parse/format round trip (modulo the
    // unconditional 'T').
    #[test_case("PT11H"; "hours")]
    #[test_case("PT8H30M"; "hours and minutes")]
    #[test_case("P2DT"; "days with empty time")]
    #[test_case("P2Y4M3DT8H30M3S"; "all fields")]
    #[test_case("PT"; "empty")]
    fn round_trip_canonical(input: &str) {
        let duration: DurationComponents = input.parse().unwrap();
        assert_eq!(duration.to_string(), input);
    }

    #[test]
    fn from_hours_minutes_pair() {
        let duration = DurationComponents::from_hours_minutes(1, 30);
        assert_eq!(duration.to_string(), "PT1H30M");
    }

    #[test_case("P1DT2H30M", "1d 2h 30m")]
    #[test_case("PT45M", "45m")]
    #[test_case("P2Y4M3DT8H", "3d 8h"; "years and months omitted")]
    #[test_case("PT0S", ""; "zero fields dropped")]
    #[test_case("PT", ""; "nothing renderable")]
    fn readable_renders_fixed_units(input: &str, expected: &str) {
        let duration: DurationComponents = input.parse().unwrap();
        assert_eq!(duration.readable(), expected);
    }

    #[test]
    fn readable_from_str_swallows_parse_failures() {
        assert_eq!(DurationComponents::readable_from_str("garbage"), "");
        assert_eq!(DurationComponents::readable_from_str("PXD"), "");
    }

    #[test]
    fn serde_round_trip_as_string() {
        let duration: DurationComponents = "P1DT2H".parse().unwrap();
        let json = serde_json::to_string(&duration).unwrap();
        assert_eq!(json, "\"P1DT2H\"");

        let back: DurationComponents = serde_json::from_str(&json).unwrap();
        assert_eq!(back, duration);
    }

    #[test]
    fn serde_rejects_invalid_text() {
        assert!(serde_json::from_str::<DurationComponents>("\"nope\"").is_err());
    }

    #[test]
    fn error_display() {
        let error = InvalidDuration("PXD".to_string());
        assert_eq!(format!("{error}"), "Invalid ISO-8601 duration 'PXD'");
    }
}
